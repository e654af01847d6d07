//! Entity trait.

use serde::de::DeserializeOwned;

use crate::types::EntityId;

/// A record served from a REST collection.
pub trait Entity: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path segment, e.g. `"groups"`.
    const RESOURCE: &'static str;

    /// Stable unique key.
    fn id(&self) -> &EntityId;
}
