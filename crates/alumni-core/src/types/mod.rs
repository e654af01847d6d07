//! Validated identifier types.
//!
//! These types enforce their invariants at construction time, so a request
//! path is never built from an invalid id or base URL.

mod api_url;
mod entity_id;

pub use api_url::ApiUrl;
pub use entity_id::EntityId;
