use validator::Validate;

use crate::domain::client::{Client, ContactDetails, NewClient, PersonalDetails};
use crate::dto::api::NewClientPayload;
use crate::forms::{FieldErrors, field_errors};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns the entire client collection.
pub fn list_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    Ok(repo.list_clients()?)
}

/// Validates the payload with the wizard rules, creates the client and
/// returns the full updated collection.
pub fn create_client<R>(repo: &R, payload: NewClientPayload) -> ServiceResult<Vec<Client>>
where
    R: ClientWriter + ?Sized,
{
    let (personal, contact) = payload.into_forms();
    let personal = personal.normalized();
    let contact = contact.normalized();

    let mut errors = FieldErrors::new();
    if let Err(err) = personal.validate() {
        errors.extend(field_errors(&err));
    }
    if let Err(err) = contact.validate() {
        errors.extend(field_errors(&err));
    }
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    let new_client = NewClient::from_parts(
        PersonalDetails::try_from(personal)?,
        ContactDetails::try_from(contact)?,
    );

    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create a client: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn payload(first: &str, email: &str) -> NewClientPayload {
        NewClientPayload {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            phone_number: "5551234".to_string(),
        }
    }

    #[test]
    fn create_collects_errors_from_both_steps() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().times(0);

        let result = create_client(&repo, payload("", "abc"));

        match result {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors["first_name"], "First name is required");
                assert_eq!(errors["email"], "Enter a valid email");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_passes_trimmed_client() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .withf(|c| c.first_name.as_str() == "Jane" && c.email.as_str() == "JANE@x.com")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let clients = create_client(&repo, payload(" Jane ", "JANE@x.com")).unwrap();

        assert!(clients.is_empty());
    }

    #[test]
    fn list_returns_repository_collection() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().times(1).returning(|| Ok(Vec::new()));

        assert!(list_clients(&repo).unwrap().is_empty());
    }

    #[test]
    fn payload_reads_camel_case() {
        let payload: NewClientPayload = serde_json::from_str(
            r#"{"firstName":"Jane","lastName":"Doe","email":"jane@x.com","phoneNumber":"5551234"}"#,
        )
        .unwrap();

        assert_eq!(payload.first_name, "Jane");
        assert_eq!(payload.phone_number, "5551234");
    }
}
