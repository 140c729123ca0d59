use chrono::NaiveDate;

use crate::types::Application;

/// An adult applicant with every required field filled out and
/// the NDA agreed to.
#[must_use]
pub fn jane_doe() -> Application {
    Application {
        full_name: "Jane Doe".into(),
        email: "jane@x.com".into(),
        phone: "555-1234".into(),
        dob: NaiveDate::from_ymd_opt(2000, 1, 1),
        nda_agreement: true,
        ..Default::default()
    }
}
