//! Create-client wizard operations.
//!
//! Each function takes the wizard state restored from the session and returns
//! the next state. The caller persists the result; on error the caller keeps
//! the state it already has.

use validator::Validate;

use crate::domain::client::{ContactDetails, NewClient, PersonalDetails};
use crate::domain::wizard::{CreateClientWizard, WizardError, WizardStep};
use crate::forms::field_errors;
use crate::forms::wizard::{ContactDetailsForm, PersonalDetailsForm};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::main::refresh_clients;
use crate::services::{ServiceError, ServiceResult};
use crate::store::ClientStore;

/// Starts a fresh wizard with an empty draft.
pub fn open_wizard() -> CreateClientWizard {
    CreateClientWizard::new()
}

fn ensure_step(wizard: &CreateClientWizard, expected: WizardStep) -> ServiceResult<()> {
    let actual = wizard.step();
    if actual == expected {
        Ok(())
    } else {
        Err(WizardError::UnexpectedStep { expected, actual }.into())
    }
}

/// Validates the personal-details step and advances to contact details.
pub fn submit_personal_details(
    wizard: CreateClientWizard,
    form: PersonalDetailsForm,
) -> ServiceResult<CreateClientWizard> {
    ensure_step(&wizard, WizardStep::PersonalDetails)?;

    let form = form.normalized();
    form.validate()
        .map_err(|err| ServiceError::Validation(field_errors(&err)))?;
    let details = PersonalDetails::try_from(form)?;

    Ok(wizard.submit_personal(details)?)
}

/// Returns to the personal-details step, keeping the committed draft.
pub fn go_back(wizard: CreateClientWizard) -> ServiceResult<CreateClientWizard> {
    Ok(wizard.back()?)
}

/// Validates the contact-details step, creates the client and refreshes the
/// cache. On success the wizard is finished and the dialog should close.
///
/// The collection returned by the create call is discarded; the cache is
/// refreshed with a separate fetch. A failed refresh is logged only, since
/// the client has been created by then.
pub fn submit_contact_details<R>(
    repo: &R,
    store: &ClientStore,
    wizard: CreateClientWizard,
    form: ContactDetailsForm,
) -> ServiceResult<NewClient>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    ensure_step(&wizard, WizardStep::ContactDetails)?;

    let form = form.normalized();
    form.validate()
        .map_err(|err| ServiceError::Validation(field_errors(&err)))?;
    let contact = ContactDetails::try_from(form)?;
    let new_client = wizard.submit_contact(contact)?;

    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create a client: {err}");
        err
    })?;

    if let Err(err) = refresh_clients(repo, store) {
        log::error!("Failed to refresh clients after create: {err}");
    }

    Ok(new_client)
}
