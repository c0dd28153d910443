use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::client::{ContactDetails, PersonalDetails};
use crate::domain::types::{ClientEmail, FirstName, LastName, PhoneNumber, TypeConstraintError};
use crate::forms::FieldValues;

// The wizard draft travels in the session cookie, so every field is capped.
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_EMAIL_CHARS: usize = 254;
pub const MAX_PHONE_CHARS: usize = 32;

fn at_most(value: &str, max: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::new("too_long").with_message(message.into()))
    } else {
        Ok(())
    }
}

fn first_name_fits(value: &str) -> Result<(), ValidationError> {
    at_most(value, MAX_NAME_CHARS, "First name is too long")
}

fn last_name_fits(value: &str) -> Result<(), ValidationError> {
    at_most(value, MAX_NAME_CHARS, "Last name is too long")
}

fn email_fits(value: &str) -> Result<(), ValidationError> {
    at_most(value, MAX_EMAIL_CHARS, "Email is too long")
}

fn phone_number_fits(value: &str) -> Result<(), ValidationError> {
    at_most(value, MAX_PHONE_CHARS, "Phone number is too long")
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Form data for the personal-details step.
pub struct PersonalDetailsForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name is required"),
        custom(function = "first_name_fits")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Last name is required"),
        custom(function = "last_name_fits")
    )]
    pub last_name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Form data for the contact-details step.
pub struct ContactDetailsForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        custom(function = "email_fits"),
        email(message = "Enter a valid email")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Phone number is required"),
        custom(function = "phone_number_fits")
    )]
    pub phone_number: String,
}

impl PersonalDetailsForm {
    /// Trims every field so whitespace-only input counts as empty.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }

    /// Submitted values, for re-rendering the form.
    pub fn values(&self) -> FieldValues {
        FieldValues::from([
            ("first_name".to_string(), self.first_name.clone()),
            ("last_name".to_string(), self.last_name.clone()),
        ])
    }
}

impl ContactDetailsForm {
    /// Trims every field so whitespace-only input counts as empty.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }

    /// Submitted values, for re-rendering the form.
    pub fn values(&self) -> FieldValues {
        FieldValues::from([
            ("email".to_string(), self.email.clone()),
            ("phone_number".to_string(), self.phone_number.clone()),
        ])
    }
}

impl TryFrom<PersonalDetailsForm> for PersonalDetails {
    type Error = TypeConstraintError;

    fn try_from(form: PersonalDetailsForm) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: FirstName::new(form.first_name)?,
            last_name: LastName::new(form.last_name)?,
        })
    }
}

impl TryFrom<ContactDetailsForm> for ContactDetails {
    type Error = TypeConstraintError;

    fn try_from(form: ContactDetailsForm) -> Result<Self, Self::Error> {
        Ok(Self {
            email: ClientEmail::new(form.email)?,
            phone_number: PhoneNumber::new(form.phone_number)?,
        })
    }
}
