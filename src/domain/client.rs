use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, ClientId, FirstName, LastName, PhoneNumber};

/// Client record as stored by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub first_name: FirstName,
    pub last_name: LastName,
    pub email: ClientEmail,
    pub phone_number: PhoneNumber,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Client {
    /// Case-insensitive substring match against first or last name.
    ///
    /// `needle` must already be lower-cased.
    fn name_contains(&self, needle: &str) -> bool {
        self.first_name.to_lowercase().contains(needle)
            || self.last_name.to_lowercase().contains(needle)
    }
}

/// Output of the personal-details wizard step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonalDetails {
    pub first_name: FirstName,
    pub last_name: LastName,
}

/// Output of the contact-details wizard step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: ClientEmail,
    pub phone_number: PhoneNumber,
}

/// Validated payload for creating a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub first_name: FirstName,
    pub last_name: LastName,
    pub email: ClientEmail,
    pub phone_number: PhoneNumber,
}

impl NewClient {
    /// Merges the outputs of both wizard steps.
    #[must_use]
    pub fn from_parts(personal: PersonalDetails, contact: ContactDetails) -> Self {
        Self {
            first_name: personal.first_name,
            last_name: personal.last_name,
            email: contact.email,
            phone_number: contact.phone_number,
        }
    }
}

/// Returns the clients whose first or last name contains `filter`,
/// ignoring case. An empty filter keeps every client.
pub fn filter_clients(clients: &[Client], filter: &str) -> Vec<Client> {
    let needle = filter.to_lowercase();
    clients
        .iter()
        .filter(|client| client.name_contains(&needle))
        .cloned()
        .collect()
}
