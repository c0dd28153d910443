//! View model for the create-client dialog.

use serde::Serialize;

use crate::domain::wizard::{CreateClientWizard, WizardStep};
use crate::forms::{FieldErrors, FieldValues};

const FIELDS: [&str; 4] = ["first_name", "last_name", "email", "phone_number"];

/// Everything the dialog template needs. `values` and `errors` always carry
/// every field so templates can read them without existence checks.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WizardView {
    pub steps: Vec<&'static str>,
    pub active_step: usize,
    pub values: FieldValues,
    pub errors: FieldErrors,
}

fn blank_fields() -> FieldValues {
    FIELDS
        .iter()
        .map(|field| ((*field).to_string(), String::new()))
        .collect()
}

impl WizardView {
    /// Overwrites the pre-filled values with what the user submitted.
    #[must_use]
    pub fn with_values(mut self, values: FieldValues) -> Self {
        self.values.extend(values);
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors.extend(errors);
        self
    }
}

impl From<&CreateClientWizard> for WizardView {
    fn from(wizard: &CreateClientWizard) -> Self {
        let mut values = blank_fields();
        // Only the personal step shows the draft; contact values never persist.
        if let CreateClientWizard::PersonalDetails {
            draft: Some(personal),
        } = wizard
        {
            values.insert("first_name".into(), personal.first_name.to_string());
            values.insert("last_name".into(), personal.last_name.to_string());
        }

        Self {
            steps: WizardStep::ALL.iter().map(|step| step.label()).collect(),
            active_step: wizard.step().index(),
            values,
            errors: blank_fields(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::PersonalDetails;
    use crate::domain::types::{FirstName, LastName};

    fn jane() -> PersonalDetails {
        PersonalDetails {
            first_name: FirstName::new("Jane").unwrap(),
            last_name: LastName::new("Doe").unwrap(),
        }
    }

    #[test]
    fn fresh_wizard_has_blank_fields() {
        let view = WizardView::from(&CreateClientWizard::new());

        assert_eq!(view.active_step, 0);
        assert_eq!(view.steps, vec!["Personal Details", "Contact Details"]);
        assert!(view.values.values().all(String::is_empty));
        assert!(view.errors.values().all(String::is_empty));
        assert_eq!(view.values.len(), 4);
    }

    #[test]
    fn draft_prefills_personal_step() {
        let wizard = CreateClientWizard::PersonalDetails {
            draft: Some(jane()),
        };

        let view = WizardView::from(&wizard);

        assert_eq!(view.values["first_name"], "Jane");
        assert_eq!(view.values["last_name"], "Doe");
    }

    #[test]
    fn contact_step_starts_empty() {
        let wizard = CreateClientWizard::ContactDetails { personal: jane() };

        let view = WizardView::from(&wizard);

        assert_eq!(view.active_step, 1);
        assert!(view.values.values().all(String::is_empty));
    }

    #[test]
    fn errors_and_values_overlay_defaults() {
        let view = WizardView::from(&CreateClientWizard::new())
            .with_values(FieldValues::from([("first_name".into(), "Ja".into())]))
            .with_errors(FieldErrors::from([(
                "last_name".into(),
                "Last name is required".into(),
            )]));

        assert_eq!(view.values["first_name"], "Ja");
        assert_eq!(view.errors["last_name"], "Last name is required");
        assert_eq!(view.errors["first_name"], "");
    }
}
