//! Core traits for fetching and acting on the alumni API.

mod entity;
mod fetcher;
mod session;

pub use entity::Entity;
pub use fetcher::Fetcher;
pub use session::Session;
