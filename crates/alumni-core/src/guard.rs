//! Duplicate-submission guard for mutations.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::{Error, Result};

/// Tracks which mutations are currently in flight.
///
/// Acquiring a key that is already held fails with [`Error::InFlight`]. The
/// check and the insert happen under one lock, so two racing callers can
/// never both get through.
#[derive(Debug, Clone, Default)]
pub struct MutationGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl MutationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` until the returned permit is dropped.
    pub fn acquire(&self, key: impl Into<String>) -> Result<MutationPermit> {
        let key = key.into();
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !in_flight.insert(key.clone()) {
            debug!(%key, "Rejecting duplicate mutation");
            return Err(Error::InFlight { key });
        }

        Ok(MutationPermit {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Returns true if `key` is currently held.
    pub fn is_held(&self, key: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Releases its key on drop.
#[derive(Debug)]
#[must_use = "the key is released as soon as the permit is dropped"]
pub struct MutationPermit {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl MutationPermit {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for MutationPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
