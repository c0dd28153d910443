//! DTOs exposed by the JSON API endpoints.

use serde::{Deserialize, Serialize};

use crate::forms::FieldErrors;
use crate::forms::wizard::{ContactDetailsForm, PersonalDetailsForm};

/// Body accepted by `POST /api/v1/clients`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClientPayload {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
}

impl NewClientPayload {
    /// Splits the payload into the two wizard step forms so both paths share
    /// the same validation rules.
    pub fn into_forms(self) -> (PersonalDetailsForm, ContactDetailsForm) {
        (
            PersonalDetailsForm {
                first_name: self.first_name,
                last_name: self.last_name,
            },
            ContactDetailsForm {
                email: self.email,
                phone_number: self.phone_number,
            },
        )
    }
}

/// Body returned with `422 Unprocessable Entity`.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: FieldErrors,
}
