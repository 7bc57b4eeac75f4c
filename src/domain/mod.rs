//! Domain entities and value objects consumed by the dashboard engine.

pub mod client;
pub mod project;
pub mod session;
pub mod types;
