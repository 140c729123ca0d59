//! Interfaces of the managed services Obscura talks to.
use async_trait::async_trait;
use obscura_schema::types::{Identity, PhotoFile, Role};
use obscura_utils::Result;
use serde_json::{Map, Value};
use tokio::sync::watch;
use uuid::Uuid;

use crate::errors::{IdentityError, RecordError, StorageError};

#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Checks who is currently signed in. A missing or expired session
    /// resolves to [`None`].
    async fn current_identity(&self) -> Result<Option<Identity>, IdentityError>;

    /// Streams every change of the signed in identity.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, bucket: &str, key: &str, file: &PhotoFile) -> Result<(), StorageError>;

    /// Public link of a stored object, if one can be made.
    fn public_url(&self, bucket: &str, key: &str) -> Option<String>;
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Updates the existing row whose `id` column matches `id`.
    async fn update_record(
        &self,
        table: &str,
        id: Uuid,
        fields: &Map<String, Value>,
    ) -> Result<(), RecordError>;

    /// Reads the `role` column of the row whose `id` column matches `id`.
    async fn fetch_role(&self, table: &str, id: Uuid) -> Result<Option<Role>, RecordError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_obj_safe;

    assert_obj_safe!(IdentityService, ObjectStorage, RecordStore);
}
