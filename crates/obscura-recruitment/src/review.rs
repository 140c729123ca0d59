use obscura_schema::forms::UpdateApplicationStatusForm;
use obscura_schema::types::ApplicationStatus;
use obscura_utils::error::exts::{IntoTypedError, ResultExt};
use obscura_utils::{Error, ErrorCategory, Result};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::ReviewError;
use crate::services::RecordStore;
use crate::session::ShellState;

/// The reason given to an applicant whose application got declined.
///
/// It is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclineNote(String);

impl DeclineNote {
    /// Trims the note, returning [`None`] if nothing is left.
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self(text.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Decline(DeclineNote),
}

impl ReviewDecision {
    #[must_use]
    pub fn status(&self) -> ApplicationStatus {
        match self {
            Self::Approve => ApplicationStatus::Approved,
            Self::Decline(..) => ApplicationStatus::Declined,
        }
    }

    fn form(&self) -> UpdateApplicationStatusForm<'_> {
        match self {
            Self::Approve => UpdateApplicationStatusForm::builder()
                .status(ApplicationStatus::Approved)
                .build(),
            Self::Decline(note) => UpdateApplicationStatusForm::builder()
                .status(ApplicationStatus::Declined)
                .decline_reason(Some(note.as_str()))
                .build(),
        }
    }
}

/// Writes the reviewer's decision to the applicant's row.
///
/// Only a signed in admin may review applications.
#[tracing::instrument(skip_all, fields(%applicant, status = %decision.status()))]
pub async fn apply(
    records: &dyn RecordStore,
    table: &str,
    reviewer: &ShellState,
    applicant: Uuid,
    decision: &ReviewDecision,
) -> Result<ApplicationStatus, ReviewError> {
    match reviewer.role() {
        None => return Err(Error::context(ErrorCategory::User, ReviewError::NotSignedIn)),
        Some(role) if !role.is_admin() => {
            return Err(Error::context(ErrorCategory::User, ReviewError::NotAdmin))
        }
        Some(..) => {}
    }

    let fields = match serde_json::to_value(decision.form()) {
        Ok(Value::Object(fields)) => fields,
        Ok(..) => Map::new(),
        Err(error) => return Err(error).into_typed_error().change_context(ReviewError::Write),
    };

    records
        .update_record(table, applicant, &fields)
        .await
        .change_context(ReviewError::Write)
        .attach_printable_lazy(|| format!("could not update record of {applicant}"))?;

    info!("application reviewed");
    Ok(decision.status())
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, Call, MockBackend};
    use obscura_schema::types::Role;
    use obscura_utils::error::exts::ErrorExt;

    fn admin() -> ShellState {
        ShellState::SignedIn {
            identity: test_utils::identity(Some(Role::Admin)),
            role: Role::Admin,
        }
    }

    fn applicant() -> Uuid {
        Uuid::from_u128(42)
    }

    #[test]
    fn test_decline_note() {
        assert_eq!(DeclineNote::new("  too young  ").unwrap().as_str(), "too young");
        assert!(DeclineNote::new("").is_none());
        assert!(DeclineNote::new(" \n\t").is_none());
    }

    #[tokio::test]
    async fn should_approve_application() {
        let backend = MockBackend::signed_in();
        let status = apply(&backend, "users", &admin(), applicant(), &ReviewDecision::Approve)
            .await
            .unwrap();

        assert_eq!(status, ApplicationStatus::Approved);
        let calls = backend.calls();
        let Call::UpdateRecord { id, fields, .. } = &calls[0] else {
            panic!("expected a record update");
        };
        assert_eq!(*id, applicant());
        assert_eq!(fields["status"], "approved");
        assert!(!fields.contains_key("decline_reason"));
    }

    #[tokio::test]
    async fn should_decline_with_note() {
        let backend = MockBackend::signed_in();
        let decision = ReviewDecision::Decline(DeclineNote::new("Incomplete profile").unwrap());

        let status = apply(&backend, "users", &admin(), applicant(), &decision)
            .await
            .unwrap();
        assert_eq!(status, ApplicationStatus::Declined);

        let fields = backend.writes().remove(0);
        assert_eq!(fields["status"], "declined");
        assert_eq!(fields["decline_reason"], "Incomplete profile");
    }

    #[tokio::test]
    async fn should_only_let_admins_review() {
        let backend = MockBackend::signed_in();
        let user = ShellState::SignedIn {
            identity: test_utils::identity(None),
            role: Role::User,
        };

        let error = apply(&backend, "users", &user, applicant(), &ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), ReviewError::NotAdmin));
        assert!(error.get_category().is_user_error());

        let error = apply(
            &backend,
            "users",
            &ShellState::SignedOut,
            applicant(),
            &ReviewDecision::Approve,
        )
        .await
        .unwrap_err();
        assert!(matches!(error.current_context(), ReviewError::NotSignedIn));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_report_failed_write() {
        let backend = MockBackend::signed_in();
        backend.fail_write();

        let error = apply(&backend, "users", &admin(), applicant(), &ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), ReviewError::Write));
    }
}
