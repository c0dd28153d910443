//! Two-step client creation wizard.
//!
//! The wizard is a small tagged union: it is either collecting personal
//! details (optionally pre-filled with a previously committed draft) or
//! collecting contact details on top of committed personal details.
//! Transitions consume the current state and return the next one.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::client::{ContactDetails, NewClient, PersonalDetails};

/// Identifies a wizard step without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    PersonalDetails,
    ContactDetails,
}

impl WizardStep {
    /// All steps in display order.
    pub const ALL: [WizardStep; 2] = [WizardStep::PersonalDetails, WizardStep::ContactDetails];

    /// Zero-based position of the step in the stepper.
    pub const fn index(self) -> usize {
        match self {
            WizardStep::PersonalDetails => 0,
            WizardStep::ContactDetails => 1,
        }
    }

    /// Stepper label.
    pub const fn label(self) -> &'static str {
        match self {
            WizardStep::PersonalDetails => "Personal Details",
            WizardStep::ContactDetails => "Contact Details",
        }
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("expected the {expected} step, wizard is at {actual}")]
    UnexpectedStep {
        expected: WizardStep,
        actual: WizardStep,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CreateClientWizard {
    /// Collecting first and last name. `draft` holds the values committed
    /// earlier when the user went back from the contact step.
    PersonalDetails { draft: Option<PersonalDetails> },
    /// Collecting email and phone number.
    ContactDetails { personal: PersonalDetails },
}

impl Default for CreateClientWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateClientWizard {
    /// Fresh wizard at the first step with an empty draft.
    pub const fn new() -> Self {
        CreateClientWizard::PersonalDetails { draft: None }
    }

    pub const fn step(&self) -> WizardStep {
        match self {
            CreateClientWizard::PersonalDetails { .. } => WizardStep::PersonalDetails,
            CreateClientWizard::ContactDetails { .. } => WizardStep::ContactDetails,
        }
    }

    /// Personal details committed so far, if any.
    pub fn draft(&self) -> Option<&PersonalDetails> {
        match self {
            CreateClientWizard::PersonalDetails { draft } => draft.as_ref(),
            CreateClientWizard::ContactDetails { personal } => Some(personal),
        }
    }

    fn expect(&self, expected: WizardStep) -> Result<(), WizardError> {
        let actual = self.step();
        if actual == expected {
            Ok(())
        } else {
            Err(WizardError::UnexpectedStep { expected, actual })
        }
    }

    /// Commits personal details and advances to the contact step.
    pub fn submit_personal(self, details: PersonalDetails) -> Result<Self, WizardError> {
        self.expect(WizardStep::PersonalDetails)?;
        Ok(CreateClientWizard::ContactDetails { personal: details })
    }

    /// Returns to the personal step keeping the committed personal details.
    pub fn back(self) -> Result<Self, WizardError> {
        match self {
            CreateClientWizard::ContactDetails { personal } => {
                Ok(CreateClientWizard::PersonalDetails {
                    draft: Some(personal),
                })
            }
            other => Err(WizardError::UnexpectedStep {
                expected: WizardStep::ContactDetails,
                actual: other.step(),
            }),
        }
    }

    /// Merges the contact details into the draft, finishing the wizard.
    pub fn submit_contact(self, contact: ContactDetails) -> Result<NewClient, WizardError> {
        match self {
            CreateClientWizard::ContactDetails { personal } => {
                Ok(NewClient::from_parts(personal, contact))
            }
            other => Err(WizardError::UnexpectedStep {
                expected: WizardStep::ContactDetails,
                actual: other.step(),
            }),
        }
    }
}
