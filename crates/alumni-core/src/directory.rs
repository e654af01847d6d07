//! Shared cache of the member directory.
//!
//! Several views read the full member list. Instead of each re-fetching it,
//! they hold a [`MemberDirectory`], read [`snapshot`](MemberDirectory::snapshot)s,
//! and [`subscribe`](MemberDirectory::subscribe) to be told when the list is
//! replaced or invalidated.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::list::{ApplyOutcome, ListController, PaginationState};
use crate::model::Member;
use crate::traits::Fetcher;
use crate::types::EntityId;

/// The directory as of one refresh.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    pub members: Arc<Vec<Member>>,
    /// When the members were fetched; `None` until the first refresh.
    pub last_fetched: Option<DateTime<Utc>>,
    /// Set by [`MemberDirectory::invalidate`], cleared by the first refresh
    /// started after it.
    pub invalidated: bool,
}

impl DirectorySnapshot {
    /// True if the snapshot was invalidated, never fetched, or is at least
    /// `max_age` old at `now`.
    pub fn is_stale_at(&self, max_age: TimeDelta, now: DateTime<Utc>) -> bool {
        match self.last_fetched {
            None => true,
            Some(_) if self.invalidated => true,
            Some(at) => now - at >= max_age,
        }
    }

    pub fn find(&self, id: &EntityId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }
}

#[derive(Debug, Default)]
struct Generations {
    issued: u64,
    applied: u64,
    /// Last generation issued when `invalidate` ran. Refreshes up to and
    /// including it may carry data from before the invalidation.
    invalidated_at: u64,
}

#[derive(Debug)]
struct Inner {
    page_size: u32,
    state: watch::Sender<DirectorySnapshot>,
    generations: Mutex<Generations>,
}

/// Process-wide member list with explicit invalidation.
#[derive(Debug, Clone)]
pub struct MemberDirectory {
    inner: Arc<Inner>,
}

impl MemberDirectory {
    /// Create an empty directory that fetches `page_size` members per
    /// request when refreshing.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero.
    pub fn new(page_size: u32) -> Result<Self> {
        PaginationState::new(page_size)?;
        let (state, _) = watch::channel(DirectorySnapshot::default());
        Ok(Self {
            inner: Arc::new(Inner {
                page_size,
                state,
                generations: Mutex::new(Generations::default()),
            }),
        })
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        self.inner.state.borrow().clone()
    }

    /// Receive every replacement and invalidation from now on.
    pub fn subscribe(&self) -> watch::Receiver<DirectorySnapshot> {
        self.inner.state.subscribe()
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.inner.state.borrow().last_fetched
    }

    pub fn find(&self, id: &EntityId) -> Option<Member> {
        self.inner.state.borrow().find(id).cloned()
    }

    pub fn is_stale(&self, max_age: TimeDelta) -> bool {
        self.inner.state.borrow().is_stale_at(max_age, Utc::now())
    }

    /// Mark the held list as outdated. Data stays readable until the next
    /// refresh replaces it.
    pub fn invalidate(&self) {
        let mut g = self.generations();
        g.invalidated_at = g.issued;
        debug!(in_flight_up_to = g.issued, "Invalidating member directory");
        self.inner.state.send_modify(|s| s.invalidated = true);
    }

    /// Fetch every page and replace the directory wholesale.
    ///
    /// If a refresh started later has already landed, this one is dropped
    /// and [`ApplyOutcome::Discarded`] is returned.
    #[instrument(skip_all)]
    pub async fn refresh<F>(&self, source: &F) -> Result<ApplyOutcome>
    where
        F: Fetcher<Member> + ?Sized,
    {
        let generation = {
            let mut g = self.generations();
            g.issued += 1;
            g.issued
        };

        let members = self.fetch_all(source).await?;

        let mut g = self.generations();
        if generation < g.applied {
            debug!(generation, applied = g.applied, "Discarding stale directory refresh");
            return Ok(ApplyOutcome::Discarded);
        }
        g.applied = generation;

        // Started before the latest invalidation: the data may predate it.
        let invalidated = generation <= g.invalidated_at;

        let added = members.len();
        info!(members = added, invalidated, "Member directory refreshed");
        self.inner.state.send_replace(DirectorySnapshot {
            members: Arc::new(members),
            last_fetched: Some(Utc::now()),
            invalidated,
        });
        Ok(ApplyOutcome::Applied { added })
    }

    /// Return the held snapshot, refreshing first if it is stale.
    pub async fn get_or_refresh<F>(&self, source: &F, max_age: TimeDelta) -> Result<DirectorySnapshot>
    where
        F: Fetcher<Member> + ?Sized,
    {
        if self.is_stale(max_age) {
            self.refresh(source).await?;
        }
        Ok(self.snapshot())
    }

    async fn fetch_all<F>(&self, source: &F) -> Result<Vec<Member>>
    where
        F: Fetcher<Member> + ?Sized,
    {
        let mut list = ListController::new(self.inner.page_size)?;
        list.refresh(source).await?;
        while list.has_more() {
            match list.load_more(source).await? {
                Some(ApplyOutcome::Applied { added }) if added > 0 => {}
                // The server claims more than it serves; stop here.
                _ => break,
            }
        }
        Ok(list.into_records())
    }

    fn generations(&self) -> std::sync::MutexGuard<'_, Generations> {
        self.inner
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PagedFixture, member};

    fn members(n: usize) -> Vec<Member> {
        (0..n)
            .map(|i| member(&format!("m{i}"), "Member", &i.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn refresh_fetches_every_page() {
        let source = PagedFixture::new(members(7));
        let directory = MemberDirectory::new(3).unwrap();

        assert!(directory.is_stale(TimeDelta::hours(1)));
        let outcome = directory.refresh(&source).await.unwrap();

        assert_eq!(outcome, ApplyOutcome::Applied { added: 7 });
        assert_eq!(source.requests(), vec![1, 2, 3]);
        assert_eq!(directory.snapshot().members.len(), 7);
        assert!(directory.last_fetched().is_some());
        assert!(!directory.is_stale(TimeDelta::hours(1)));
    }

    #[tokio::test]
    async fn fresh_directory_is_not_refetched() {
        let source = PagedFixture::new(members(2));
        let directory = MemberDirectory::new(10).unwrap();

        directory.get_or_refresh(&source, TimeDelta::hours(1)).await.unwrap();
        let snapshot = directory.get_or_refresh(&source, TimeDelta::hours(1)).await.unwrap();

        assert_eq!(snapshot.members.len(), 2);
        assert_eq!(source.requests(), vec![1]);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch_and_notifies() {
        let source = PagedFixture::new(members(2));
        let directory = MemberDirectory::new(10).unwrap();
        directory.refresh(&source).await.unwrap();

        let mut rx = directory.subscribe();
        directory.invalidate();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().invalidated);
        assert_eq!(directory.snapshot().members.len(), 2);

        source.set_records(members(5));
        let snapshot = directory.get_or_refresh(&source, TimeDelta::hours(1)).await.unwrap();
        assert_eq!(snapshot.members.len(), 5);
        assert!(!snapshot.invalidated);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().members.len(), 5);
    }

    #[tokio::test]
    async fn older_refresh_cannot_clobber_newer() {
        let slow = PagedFixture::new(members(4)).gate_after_first_page();
        let fast = PagedFixture::new(members(1));
        let directory = MemberDirectory::new(2).unwrap();

        let older = directory.refresh(&slow);
        let newer = async {
            let outcome = directory.refresh(&fast).await;
            slow.open_gate();
            outcome
        };
        let (older, newer) = tokio::join!(older, newer);

        assert_eq!(newer.unwrap(), ApplyOutcome::Applied { added: 1 });
        assert_eq!(older.unwrap(), ApplyOutcome::Discarded);
        assert_eq!(directory.snapshot().members.len(), 1);
    }

    #[tokio::test]
    async fn invalidate_during_refresh_survives_it() {
        let source = PagedFixture::new(members(4)).gate_after_first_page();
        let directory = MemberDirectory::new(2).unwrap();

        let refresh = directory.refresh(&source);
        let invalidate = async {
            directory.invalidate();
            source.open_gate();
        };
        let (outcome, ()) = tokio::join!(refresh, invalidate);

        assert_eq!(outcome.unwrap(), ApplyOutcome::Applied { added: 4 });
        let snapshot = directory.snapshot();
        assert_eq!(snapshot.members.len(), 4);
        assert!(snapshot.invalidated);
        assert!(directory.is_stale(TimeDelta::hours(1)));

        directory.refresh(&source).await.unwrap();
        assert!(!directory.snapshot().invalidated);
    }

    #[test]
    fn snapshot_age() {
        let now = Utc::now();
        let snapshot = DirectorySnapshot {
            members: Arc::new(vec![member("m1", "Ada", "Lovelace")]),
            last_fetched: Some(now - TimeDelta::minutes(10)),
            invalidated: false,
        };
        assert!(!snapshot.is_stale_at(TimeDelta::minutes(15), now));
        assert!(snapshot.is_stale_at(TimeDelta::minutes(5), now));
        assert_eq!(
            snapshot.find(&EntityId::new("m1").unwrap()).map(|m| m.full_name()),
            Some("Ada Lovelace".to_string())
        );
    }
}
