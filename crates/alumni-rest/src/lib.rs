//! alumni-rest - REST-backed implementation of the alumni network client.
//!
//! # Example
//!
//! ```no_run
//! use alumni_core::{ApiUrl, Credentials, Group, ListController};
//! use alumni_rest::RestApi;
//!
//! # async fn example() -> Result<(), alumni_core::Error> {
//! let api = RestApi::new(ApiUrl::new("https://alumni.example.edu/api")?)?;
//! let session = api.login(&Credentials::new("ada@example.edu", "secret")).await?;
//!
//! let mut groups: ListController<Group> = ListController::new(10)?;
//! groups.refresh(&session).await?;
//! while groups.has_more() {
//!     groups.load_more(&session).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod endpoints;
mod session;
mod stream;

pub use api::RestApi;
pub use client::RestClient;
pub use config::{ClientConfig, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT};
pub use session::RestSession;
pub use stream::PageStream;
