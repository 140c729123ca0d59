use chrono::{DateTime, Datelike, Utc};
use obscura_schema::forms::ApplicationPayload;
use obscura_schema::types::{Application, Identity, PhotoFile};
use obscura_utils::error::exts::{ErrorExt, IntoTypedError, ResultExt};
use obscura_utils::{Error, ErrorCategory, Result};
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use crate::errors::SubmitError;
use crate::services::{IdentityService, ObjectStorage, RecordStore};
use crate::validation::{self, Verdict};

pub const SUCCESS_MESSAGE: &str = "Application submitted successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The application has been written to the applicant's record.
    Submitted { photo_url: String },
    /// The applicant is a minor. Nothing has been written.
    MinorConsentRequired { age: i32 },
}

/// Sends a validated application to the backend services.
///
/// Only one submission may be in flight at a time. Starting another
/// one meanwhile fails right away with [`SubmitError::AlreadySubmitting`].
#[derive(TypedBuilder)]
pub struct SubmissionPipeline {
    identity: Arc<dyn IdentityService>,
    storage: Arc<dyn ObjectStorage>,
    records: Arc<dyn RecordStore>,
    #[builder(setter(into))]
    photos_bucket: String,
    #[builder(setter(into))]
    table: String,
    #[builder(default, setter(skip))]
    in_flight: AtomicBool,
}

impl SubmissionPipeline {
    /// Whether a submission is currently in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[tracing::instrument(skip_all)]
    pub async fn submit(
        &self,
        application: &Application,
        now: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            return Err(Error::context(ErrorCategory::User, SubmitError::AlreadySubmitting));
        };

        match validation::evaluate(application, now.year()) {
            Verdict::Proceed => {}
            Verdict::Blocked(failure) => {
                debug!(%failure, "application did not pass validation");
                return Err(Error::context(ErrorCategory::User, SubmitError::Validation(failure)));
            }
            Verdict::MinorConsentRequired { age } => {
                info!(%age, "applicant is a minor; diverting to parental consent");
                return Ok(SubmissionOutcome::MinorConsentRequired { age });
            }
        }

        let identity = self.resolve_identity().await?;
        let photo_url = match application.photo.as_ref() {
            Some(photo) => self.upload_photo(&application.full_name, photo, now).await?,
            None => String::new(),
        };

        let fields = ApplicationPayload::normalize(application, photo_url.clone())
            .into_fields()
            .into_typed_error()
            .change_context(SubmitError::Write)
            .attach_printable("could not normalize application")?;

        self.records
            .update_record(&self.table, identity.id, &fields)
            .await
            .change_context(SubmitError::Write)
            .attach_printable_lazy(|| format!("could not update record of {}", identity.id))?;

        info!(user.id = %identity.id, "application submitted");
        Ok(SubmissionOutcome::Submitted { photo_url })
    }

    async fn resolve_identity(&self) -> Result<Identity, SubmitError> {
        match self.identity.current_identity().await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => Err(Error::context(ErrorCategory::User, SubmitError::Authentication))
                .attach_printable("no user is signed in"),
            Err(error) => Err(error
                .change_context(SubmitError::Authentication)
                .category(ErrorCategory::User)),
        }
    }

    async fn upload_photo(
        &self,
        full_name: &str,
        photo: &PhotoFile,
        now: DateTime<Utc>,
    ) -> Result<String, SubmitError> {
        let key = storage_key(full_name, now, photo);
        debug!(bucket = %self.photos_bucket, %key, "uploading photo");

        if let Err(error) = self.storage.upload(&self.photos_bucket, &key, photo).await {
            let cause = error.current_context().to_string();
            return Err(error.change_context(SubmitError::Upload { cause }));
        }

        Ok(match self.storage.public_url(&self.photos_bucket, &key) {
            Some(url) => url,
            None => {
                warn!(%key, "could not resolve public URL of uploaded photo");
                String::new()
            }
        })
    }
}

#[allow(clippy::unwrap_used)]
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Object key of an uploaded photo, like `Jane_Doe_1700000000000.png`.
#[must_use]
pub fn storage_key(full_name: &str, now: DateTime<Utc>, photo: &PhotoFile) -> String {
    let name = WHITESPACE.replace_all(full_name, "_");
    format!("{name}_{}.{}", now.timestamp_millis(), photo.extension())
}

/// Clears the in-flight flag once the submission is over,
/// even if it is dropped halfway through.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
