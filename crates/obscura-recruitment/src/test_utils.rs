use async_trait::async_trait;
use chrono::NaiveDate;
use obscura_schema::types::{Application, Identity, IdentityMetadata, PhotoFile, Role};
use obscura_utils::error::exts::IntoTypedError;
use obscura_utils::{Error, ErrorCategory, Result};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Notify};
use uuid::Uuid;

use crate::errors::{IdentityError, RecordError, StorageError};
use crate::services::{IdentityService, ObjectStorage, RecordStore};

pub const PUBLIC_URL_PREFIX: &str = "https://cdn.test/public";

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

#[must_use]
pub fn identity(role: Option<Role>) -> Identity {
    Identity {
        id: Uuid::from_u128(0x7c0a_1f0e_5b2e_4d4f_9c39_1c7c_2f1b_8a11),
        email: Some("jane@x.com".into()),
        metadata: IdentityMetadata { role },
    }
}

#[must_use]
pub fn photo(file_name: &str) -> PhotoFile {
    PhotoFile::new(file_name, Some("image/png".into()), bytes::Bytes::from_static(b"png"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CurrentIdentity,
    Upload { bucket: String, key: String },
    UpdateRecord { table: String, id: Uuid, fields: Map<String, Value> },
    FetchRole { table: String, id: Uuid },
}

/// In-memory stand-in of every backend service, recording
/// each call made to it.
pub struct MockBackend {
    identity: watch::Sender<Option<Identity>>,
    identity_fails: AtomicBool,
    identity_gate: Option<Arc<Notify>>,
    upload_error: Mutex<Option<String>>,
    write_fails: AtomicBool,
    profile_role: Mutex<Option<Role>>,
    role_fails: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl MockBackend {
    #[must_use]
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity: watch::Sender::new(identity),
            identity_fails: AtomicBool::new(false),
            identity_gate: None,
            upload_error: Mutex::new(None),
            write_fails: AtomicBool::new(false),
            profile_role: Mutex::new(None),
            role_fails: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn signed_in() -> Self {
        Self::new(Some(identity(None)))
    }

    /// Identity lookups wait until the returned [`Notify`] is notified.
    pub fn gate_identity(&mut self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.identity_gate = Some(gate.clone());
        gate
    }

    pub fn fail_identity(&self) {
        self.identity_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_upload(&self, message: &str) {
        *self.upload_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_write(&self) {
        self.write_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_role(&self) {
        self.role_fails.store(true, Ordering::SeqCst);
    }

    pub fn set_profile_role(&self, role: Option<Role>) {
        *self.profile_role.lock().unwrap() = role;
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn writes(&self) -> Vec<Map<String, Value>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::UpdateRecord { fields, .. } => Some(fields),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl IdentityService for MockBackend {
    async fn current_identity(&self) -> Result<Option<Identity>, IdentityError> {
        self.record(Call::CurrentIdentity);
        if let Some(gate) = self.identity_gate.as_ref() {
            gate.notified().await;
        }

        if self.identity_fails.load(Ordering::SeqCst) {
            return Err(Error::context(ErrorCategory::Unknown, IdentityError));
        }
        Ok(self.identity.borrow().clone())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }
}

#[async_trait]
impl ObjectStorage for MockBackend {
    async fn upload(&self, bucket: &str, key: &str, _file: &PhotoFile) -> Result<(), StorageError> {
        self.record(Call::Upload {
            bucket: bucket.into(),
            key: key.into(),
        });

        let error = self.upload_error.lock().unwrap().clone();
        match error {
            Some(message) => Err(StorageError::new(message)).into_typed_error(),
            None => Ok(()),
        }
    }

    fn public_url(&self, bucket: &str, key: &str) -> Option<String> {
        Some(format!("{PUBLIC_URL_PREFIX}/{bucket}/{key}"))
    }
}

#[async_trait]
impl RecordStore for MockBackend {
    async fn update_record(
        &self,
        table: &str,
        id: Uuid,
        fields: &Map<String, Value>,
    ) -> Result<(), RecordError> {
        self.record(Call::UpdateRecord {
            table: table.into(),
            id,
            fields: fields.clone(),
        });

        if self.write_fails.load(Ordering::SeqCst) {
            return Err(Error::context(ErrorCategory::Unknown, RecordError));
        }
        Ok(())
    }

    async fn fetch_role(&self, table: &str, id: Uuid) -> Result<Option<Role>, RecordError> {
        self.record(Call::FetchRole {
            table: table.into(),
            id,
        });

        if self.role_fails.load(Ordering::SeqCst) {
            return Err(Error::context(ErrorCategory::Unknown, RecordError));
        }
        Ok(*self.profile_role.lock().unwrap())
    }
}
