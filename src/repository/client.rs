use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::client::{Client, NewClient};
use crate::models::client::{Client as DbClient, NewClient as DbNewClient};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};
use crate::schema::clients;

fn load_all_clients(conn: &mut SqliteConnection) -> RepositoryResult<Vec<Client>> {
    clients::table
        .order(clients::id.asc())
        .select(DbClient::as_select())
        .load::<DbClient>(conn)?
        .into_iter()
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl ClientReader for DieselRepository {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.conn()?;
        load_all_clients(&mut conn)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.conn()?;
        let insertable = DbNewClient::from(new_client);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::insert_into(clients::table)
                .values(&insertable)
                .execute(conn)?;
            load_all_clients(conn)
        })
    }
}
