use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::instrument;

use crate::Result;
use crate::traits::{Entity, Fetcher};

use super::controller::{ApplyOutcome, ListController, Phase};
use super::filter::{FilterState, Filterable};

/// A [`ListController`] shared between concurrent callers.
///
/// The lock is held only to start a fetch and to apply its result, never
/// across the request itself, so a refresh can start while a load-more is
/// still waiting on the network.
#[derive(Debug)]
pub struct SharedListController<E> {
    inner: Arc<Mutex<ListController<E>>>,
}

impl<E> Clone for SharedListController<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> SharedListController<E> {
    pub fn new(controller: ListController<E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListController<E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the controller under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&ListController<E>) -> R) -> R {
        f(&self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    pub fn set_filter(&self, filter: FilterState) {
        self.lock().set_filter(filter);
    }
}

impl<E: Clone> SharedListController<E> {
    /// Copy of everything fetched so far.
    pub fn records(&self) -> Vec<E> {
        self.lock().records().to_vec()
    }
}

impl<E: Filterable + Clone> SharedListController<E> {
    /// Copy of the fetched records passing the current filter.
    pub fn filtered(&self) -> Vec<E> {
        self.lock().filtered().into_iter().cloned().collect()
    }
}

impl<E: Entity> SharedListController<E> {
    #[instrument(skip_all, fields(resource = E::RESOURCE))]
    pub async fn refresh<F>(&self, source: &F) -> Result<ApplyOutcome>
    where
        F: Fetcher<E> + ?Sized,
    {
        let ticket = self.lock().begin_refresh();
        let result = source.fetch_page(ticket.query()).await;
        self.lock().apply(ticket, result)
    }

    #[instrument(skip_all, fields(resource = E::RESOURCE))]
    pub async fn load_more<F>(&self, source: &F) -> Result<Option<ApplyOutcome>>
    where
        F: Fetcher<E> + ?Sized,
    {
        let Some(ticket) = self.lock().begin_load_more() else {
            return Ok(None);
        };
        let result = source.fetch_page(ticket.query()).await;
        self.lock().apply(ticket, result).map(Some)
    }
}
