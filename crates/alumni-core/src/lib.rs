//! alumni-core - Core types, list controller and traits for the alumni
//! network client.

pub mod credentials;
pub mod directory;
pub mod error;
pub mod guard;
pub mod list;
pub mod model;
pub mod tokens;
pub mod traits;
pub mod types;

#[cfg(test)]
mod testing;

pub use credentials::Credentials;
pub use directory::{DirectorySnapshot, MemberDirectory};
pub use error::{Error, ErrorKind};
pub use guard::{MutationGuard, MutationPermit};
pub use list::{
    ApplyOutcome, FilterState, ListController, ListPage, PageQuery, Selector,
    SharedListController,
};
pub use model::{Group, Job, Member};
pub use tokens::AccessToken;
pub use traits::{Entity, Fetcher, Session};
pub use types::{ApiUrl, EntityId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
