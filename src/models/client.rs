use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{
    ClientEmail, ClientId, FirstName, LastName, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            first_name: FirstName::new(client.first_name)?,
            last_name: LastName::new(client.last_name)?,
            email: ClientEmail::new(client.email)?,
            phone_number: PhoneNumber::new(client.phone_number)?,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            first_name: client.first_name.as_str(),
            last_name: client.last_name.as_str(),
            email: client.email.as_str(),
            phone_number: client.phone_number.as_str(),
        }
    }
}
