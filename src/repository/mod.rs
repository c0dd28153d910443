//! Storage access for clients.
//!
//! The reader/writer traits are the client API the rest of the application
//! talks to: reads always return the complete collection and a successful
//! write returns the complete collection as it stands after the write.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::client::{Client, NewClient};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait ClientReader {
    /// Fetch the entire client collection ordered by id.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    /// Create one client and return the full updated collection.
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Vec<Client>>;
}
