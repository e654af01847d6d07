use tracing::{debug, instrument, warn};

use crate::Result;
use crate::traits::{Entity, Fetcher};
use crate::types::EntityId;

use super::cursor::PaginationState;
use super::filter::{FilterState, Filterable, filter};
use super::page::{ListPage, MergeMode, PageQuery, merge};

/// What a list is currently waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Refreshing,
}

/// A started fetch. Hand it back to [`ListController::apply`] together with
/// the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a ticket must be applied or the list stays in its loading phase"]
pub struct FetchTicket {
    generation: u64,
    query: PageQuery,
    mode: MergeMode,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn mode(&self) -> MergeMode {
        self.mode
    }
}

/// Result of applying a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The page was merged; `added` records came with it.
    Applied { added: usize },
    /// A newer fetch was started after this one; the page was dropped.
    Discarded,
}

/// Accumulated, paginated, filterable list of one entity type.
///
/// Every fetch gets a fresh generation number. Only the response carrying
/// the latest generation is merged, so a refresh always wins over a
/// load-more that was still in flight when it started.
#[derive(Debug, Clone)]
pub struct ListController<E> {
    records: Vec<E>,
    cursor: PaginationState,
    filter: FilterState,
    user_id: Option<EntityId>,
    phase: Phase,
    generation: u64,
}

impl<E> ListController<E> {
    /// Create an empty list fetching `page_size` records per request.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero.
    pub fn new(page_size: u32) -> Result<Self> {
        Ok(Self {
            records: Vec::new(),
            cursor: PaginationState::new(page_size)?,
            filter: FilterState::default(),
            user_id: None,
            phase: Phase::Idle,
            generation: 0,
        })
    }

    /// Scope every request to entities related to `user_id`.
    pub fn for_user(mut self, user_id: EntityId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Everything fetched so far, in server order.
    pub fn records(&self) -> &[E] {
        &self.records
    }

    /// Consume the controller, keeping only the fetched records.
    pub fn into_records(self) -> Vec<E> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> &PaginationState {
        &self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// The first `limit` fetched records. Showing more of what is already
    /// held never touches the server cursor.
    pub fn visible(&self, limit: usize) -> &[E] {
        &self.records[..limit.min(self.records.len())]
    }

    /// Start a refresh: page 1, replacing everything held.
    ///
    /// Allowed in any phase. Any fetch started earlier becomes stale.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.phase = Phase::Refreshing;
        self.issue(1, MergeMode::Replace)
    }

    /// Start loading the next page.
    ///
    /// Returns `None` while another fetch is in flight or when the server
    /// has no further pages.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase, "Load more ignored, fetch in flight");
            return None;
        }
        if !self.cursor.has_more() {
            debug!(total = ?self.cursor.total(), "Load more ignored, list complete");
            return None;
        }
        self.phase = Phase::Loading;
        Some(self.issue(self.cursor.next_page(), MergeMode::Append))
    }

    /// Fold the result of a fetch into the list.
    ///
    /// Stale tickets are discarded whatever their result. For the current
    /// ticket a failure leaves the records untouched and is returned.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<ListPage<E>>) -> Result<ApplyOutcome> {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                page = ticket.query.page,
                "Discarding stale page"
            );
            return Ok(ApplyOutcome::Discarded);
        }

        self.phase = Phase::Idle;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, page = ticket.query.page, "Page fetch failed");
                return Err(e);
            }
        };

        let added = page.records.len();
        if ticket.mode == MergeMode::Replace {
            self.cursor.reset();
        }
        self.records = merge(std::mem::take(&mut self.records), page.records, ticket.mode);
        self.cursor.advance();
        self.cursor.set_total(page.total);

        debug!(
            page = self.cursor.current_page(),
            added,
            held = self.records.len(),
            total = page.total,
            "Page applied"
        );
        Ok(ApplyOutcome::Applied { added })
    }

    fn issue(&mut self, page: u32, mode: MergeMode) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            query: PageQuery::new(page, self.cursor.page_size()).with_user(self.user_id.clone()),
            mode,
        }
    }
}

impl<E: Filterable> ListController<E> {
    /// Fetched records passing the current filter.
    pub fn filtered(&self) -> Vec<&E> {
        filter(&self.records, &self.filter)
    }
}

impl<E: Entity> ListController<E> {
    /// Fetch page 1 and replace the list with it.
    #[instrument(skip_all, fields(resource = E::RESOURCE))]
    pub async fn refresh<F>(&mut self, source: &F) -> Result<ApplyOutcome>
    where
        F: Fetcher<E> + ?Sized,
    {
        let ticket = self.begin_refresh();
        let result = source.fetch_page(ticket.query()).await;
        self.apply(ticket, result)
    }

    /// Fetch and append the next page. `Ok(None)` if there was nothing to
    /// load.
    #[instrument(skip_all, fields(resource = E::RESOURCE))]
    pub async fn load_more<F>(&mut self, source: &F) -> Result<Option<ApplyOutcome>>
    where
        F: Fetcher<E> + ?Sized,
    {
        let Some(ticket) = self.begin_load_more() else {
            return Ok(None);
        };
        let result = source.fetch_page(ticket.query()).await;
        self.apply(ticket, result).map(Some)
    }
}
