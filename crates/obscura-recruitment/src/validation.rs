use obscura_schema::registry::{required_fields, FieldName, FieldValue};
use obscura_schema::types::Application;
use thiserror::Error;

use crate::state::field_value;

/// Applicants younger than this are sent to the parental consent flow.
pub const MINOR_AGE: i32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Full Name, Email, and Phone are required.")]
    MissingRequiredField(FieldName),
    #[error("You must complete the NDA before submitting.")]
    ConsentMissing,
}

/// What should happen when the applicant presses submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    Blocked(ValidationFailure),
    /// The applicant is a minor. Nothing may be written, and the
    /// form is replaced with the parental consent instructions.
    MinorConsentRequired { age: i32 },
}

/// Decides whether the application may be submitted.
///
/// Checks happen in order: required fields, then the NDA, then the
/// age of the applicant. Age is `current_year` minus the birth year
/// without looking at month or day. Without a date of birth, the
/// age check never fires.
#[must_use]
pub fn evaluate(application: &Application, current_year: i32) -> Verdict {
    let missing = required_fields()
        .map(|spec| spec.name)
        .find(|name| is_blank(application, *name));

    if let Some(name) = missing {
        return Verdict::Blocked(ValidationFailure::MissingRequiredField(name));
    }

    if !application.nda_agreement {
        return Verdict::Blocked(ValidationFailure::ConsentMissing);
    }

    match application.age_in(current_year) {
        Some(age) if age < MINOR_AGE => Verdict::MinorConsentRequired { age },
        _ => Verdict::Proceed,
    }
}

fn is_blank(application: &Application, name: FieldName) -> bool {
    match field_value(application, name) {
        FieldValue::Text(text) => text.is_empty(),
        FieldValue::Date(date) => date.is_none(),
        FieldValue::File(file) => file.is_none(),
        FieldValue::List(list) => list.is_empty(),
        FieldValue::Flag(flag) => !flag,
    }
}
