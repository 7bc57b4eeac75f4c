//! Collection stores, per-entity engines and the dashboard composing them.

pub mod dashboard;
pub mod errors;
pub mod panel;
pub mod store;

pub use errors::{FetchError, SyncError, SyncResult, WriteError};
