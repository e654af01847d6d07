//! Paginated, filterable list views.
//!
//! One generic controller serves groups, jobs and members:
//!
//! - [`Fetcher`](crate::Fetcher) pulls one page from the server
//! - [`merge`] folds that page into the accumulated list
//! - [`FilterState`] derives the visible subset
//! - [`PaginationState`] decides whether another page exists
//!
//! [`ListController`] ties these together and tags every fetch with a
//! generation so a slow response can never overwrite a newer one.

mod controller;
mod cursor;
mod filter;
mod page;
mod shared;

pub use controller::{ApplyOutcome, FetchTicket, ListController, Phase};
pub use cursor::PaginationState;
pub use filter::{FilterState, Filterable, Selector, filter};
pub use page::{ListPage, MergeMode, PageQuery, merge};
pub use shared::SharedListController;
