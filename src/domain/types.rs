//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, trimmed
//! non-empty names, validated email) so that once a value reaches
//! the domain layer it can be treated as trusted. String wrappers validate on
//! deserialization too, so values restored from a session cookie or a JSON
//! body go through the same checks.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
}

/// Trims and validates an email string. Case is kept as typed.
fn trimmed_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let trimmed = email.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if trimmed.validate_email() {
        Ok(trimmed)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Trims whitespace and rejects empty inputs.
fn non_empty<S: Into<String>>(value: S) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString)
    } else {
        Ok(trimmed)
    }
}

/// Unique identifier for a client, assigned by the database.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientId(i32);

impl ClientId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ClientId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for i32 {
    fn from(value: ClientId) -> Self {
        value.0
    }
}

/// Generates a string newtype whose constructor runs `$check` on the input.
macro_rules! string_newtype {
    ($name:ident, $check:path, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validates and normalizes the raw input.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                $check(value).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_newtype!(FirstName, non_empty, "Client first name, trimmed and non-empty.");
string_newtype!(LastName, non_empty, "Client last name, trimmed and non-empty.");
string_newtype!(
    PhoneNumber,
    non_empty,
    "Contact phone number, trimmed and non-empty. No format is imposed."
);
string_newtype!(
    ClientEmail,
    trimmed_email,
    "Trimmed and validated client email address, case kept as typed."
);
