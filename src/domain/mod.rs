//! Domain entities and value objects, free of persistence and web concerns.

pub mod client;
pub mod types;
pub mod wizard;
