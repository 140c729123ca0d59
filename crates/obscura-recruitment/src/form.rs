use chrono::{DateTime, Datelike, Utc};
use obscura_schema::registry::{FieldName, FieldValue};
use obscura_settings::MinorConsent;
use obscura_utils::{Error, ErrorCategory, Result};
use tracing::debug;

use crate::errors::SubmitError;
use crate::sections::{self, Layout};
use crate::state::{FieldUpdate, FormState};
use crate::submission::{SubmissionOutcome, SubmissionPipeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Editing,
    /// The applicant turned out to be a minor. The form is replaced
    /// with the parental consent instructions for the rest of the session.
    MinorConsent,
    /// Terminal. The application has been written.
    Submitted,
}

/// One applicant's visit of the recruitment form.
#[derive(Debug, Clone)]
pub struct FormSession {
    state: FormState,
    stage: Stage,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FormState::new(),
            stage: Stage::Editing,
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn get(&self, name: FieldName) -> FieldValue {
        self.state.get(name)
    }

    /// Applies the update if the form is still being edited.
    ///
    /// Returns `false` if the update was ignored.
    pub fn set(&mut self, update: FieldUpdate) -> bool {
        if self.stage != Stage::Editing {
            debug!(field = %update.name(), stage = ?self.stage, "ignoring field update");
            return false;
        }
        self.state.set(update);
        true
    }

    #[must_use]
    pub fn layout<'a>(&self, consent: &'a MinorConsent) -> Layout<'a> {
        let minor_branch_fired = self.stage == Stage::MinorConsent;
        sections::layout(self.state.application(), minor_branch_fired, consent)
    }

    /// Submits the application through the pipeline and moves the
    /// session along depending on the outcome.
    ///
    /// Failures leave the form untouched so the applicant may retry.
    pub async fn submit(
        &mut self,
        pipeline: &SubmissionPipeline,
        now: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, SubmitError> {
        match self.stage {
            Stage::Editing => {}
            Stage::MinorConsent => {
                let age = self
                    .state
                    .application()
                    .age_in(now.year())
                    .unwrap_or_default();
                return Ok(SubmissionOutcome::MinorConsentRequired { age });
            }
            Stage::Submitted => {
                return Err(Error::context(ErrorCategory::User, SubmitError::AlreadySubmitted));
            }
        }

        let outcome = pipeline.submit(self.state.application(), now).await?;
        self.stage = match &outcome {
            SubmissionOutcome::Submitted { .. } => Stage::Submitted,
            SubmissionOutcome::MinorConsentRequired { .. } => Stage::MinorConsent,
        };
        Ok(outcome)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::VisibleSections;
    use crate::test_utils::{self, MockBackend};
    use chrono::{NaiveDate, TimeZone};
    use obscura_schema::registry::Section;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn pipeline(backend: &Arc<MockBackend>) -> SubmissionPipeline {
        SubmissionPipeline::builder()
            .identity(backend.clone())
            .storage(backend.clone())
            .records(backend.clone())
            .photos_bucket("photos")
            .table("users")
            .build()
    }

    fn fill_in(session: &mut FormSession) {
        let application = test_utils::jane_doe();
        session.set(FieldUpdate::FullName(application.full_name));
        session.set(FieldUpdate::Email(application.email));
        session.set(FieldUpdate::Phone(application.phone));
        session.set(FieldUpdate::Dob(application.dob));
        session.set(FieldUpdate::NdaAgreement(true));
    }

    fn form_sections(session: &FormSession) -> VisibleSections {
        let consent = MinorConsent::default();
        match session.layout(&consent) {
            Layout::Form(sections) => sections,
            Layout::MinorConsent(..) => panic!("expected the form layout"),
        }
    }

    #[tokio::test]
    async fn should_become_terminal_once_submitted() {
        let backend = Arc::new(MockBackend::signed_in());
        let pipeline = pipeline(&backend);

        let mut session = FormSession::new();
        fill_in(&mut session);
        session.submit(&pipeline, now()).await.unwrap();
        assert_eq!(session.stage(), Stage::Submitted);

        assert!(!session.set(FieldUpdate::FullName("John".into())));
        let error = session.submit(&pipeline, now()).await.unwrap_err();
        assert!(matches!(error.current_context(), SubmitError::AlreadySubmitted));
        assert_eq!(backend.writes().len(), 1);
    }

    #[tokio::test]
    async fn should_switch_to_minor_consent_layout() {
        let backend = Arc::new(MockBackend::signed_in());
        let pipeline = pipeline(&backend);

        let mut session = FormSession::new();
        fill_in(&mut session);
        session.set(FieldUpdate::Dob(NaiveDate::from_ymd_opt(2010, 6, 1)));

        let outcome = session.submit(&pipeline, now()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::MinorConsentRequired { age: 14 });
        assert_eq!(session.stage(), Stage::MinorConsent);

        let consent = MinorConsent::default();
        assert!(matches!(session.layout(&consent), Layout::MinorConsent(..)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_keep_editing_after_failure() {
        let backend = Arc::new(MockBackend::signed_in());
        backend.fail_write();
        let pipeline = pipeline(&backend);

        let mut session = FormSession::new();
        fill_in(&mut session);
        let before = session.state().clone();

        assert!(session.submit(&pipeline, now()).await.is_err());
        assert_eq!(session.stage(), Stage::Editing);
        assert_eq!(session.state(), &before);
    }

    #[tokio::test]
    async fn should_keep_editing_after_failed_upload() {
        let backend = Arc::new(MockBackend::signed_in());
        backend.fail_upload("bucket not found");
        let pipeline = pipeline(&backend);

        let mut session = FormSession::new();
        fill_in(&mut session);
        session.set(FieldUpdate::Photo(Some(test_utils::photo("me.png"))));
        let before = session.state().clone();

        let error = session.submit(&pipeline, now()).await.unwrap_err();
        assert!(matches!(error.current_context(), SubmitError::Upload { .. }));
        assert_eq!(session.stage(), Stage::Editing);
        assert_eq!(session.state(), &before);
        assert!(backend.writes().is_empty());

        // still editable afterwards
        assert!(session.set(FieldUpdate::Photo(None)));
    }

    #[test]
    fn should_reveal_sections_while_editing() {
        let mut session = FormSession::new();
        assert!(!form_sections(&session).contains(Section::CreatorProfile));

        session.set(FieldUpdate::IsCreator(true));
        session.set(FieldUpdate::CreatorName("JaneLive".into()));
        assert!(form_sections(&session).contains(Section::CreatorProfile));

        session.set(FieldUpdate::IsCreator(false));
        session.set(FieldUpdate::IsCreator(true));
        assert_eq!(
            session.get(FieldName::CreatorName),
            FieldValue::Text("JaneLive".into())
        );
    }
}
