//! Framework-free operations behind the routes.

use thiserror::Error;

use crate::domain::wizard::WizardError;
use crate::forms::FieldErrors;
use crate::repository::errors::RepositoryError;

pub mod api;
pub mod main;
pub mod wizard;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Submitted form failed validation; one message per invalid field.
    #[error("form validation failed")]
    Validation(FieldErrors),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
