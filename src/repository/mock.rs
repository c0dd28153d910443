//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Vec<Client>>;
    }
}
