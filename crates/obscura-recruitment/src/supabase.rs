use async_trait::async_trait;
use obscura_schema::types::{Identity, PhotoFile, Role};
use obscura_settings::Backend;
use obscura_utils::error::exts::{ErrorExt, IntoTypedError, OptionExt, ResultExt};
use obscura_utils::types::{ProtectedString, Sensitive};
use obscura_utils::{Error, ErrorCategory, Result};
use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, trace};
use url::Url;
use uuid::Uuid;

use crate::errors::tags::RequestHttpTag;
use crate::errors::{
    BackendSetupError, IdentityError, RecordError, RequestHttpError, StorageError,
};
use crate::services::{IdentityService, ObjectStorage, RecordStore};

/// What the backend said went wrong.
#[derive(Debug)]
struct BackendMessage(String);

impl fmt::Display for BackendMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backend responded with: {}", self.0)
    }
}

/// Talks to a Supabase project over its REST interfaces.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: Sensitive<String>,
    access_token: Option<ProtectedString>,
    identity: watch::Sender<Option<Identity>>,
}

impl SupabaseClient {
    pub fn new(settings: &Backend) -> Result<Self, BackendSetupError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("obscura/", env!("CARGO_PKG_VERSION")))
            .build()
            .into_typed_error()
            .change_context(BackendSetupError)?;

        Ok(Self {
            http,
            base_url: settings.url.clone(),
            anon_key: settings.anon_key.clone(),
            access_token: settings.access_token.clone(),
            identity: watch::Sender::new(None),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RequestHttpError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()
            .ok_or_context(ErrorCategory::Unknown, RequestHttpError)
            .attach_printable("backend URL cannot be a base")?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Sends the `apikey` header along with the signed in user's access
    /// token, or the anonymous key if nobody is signed in.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .access_token
            .as_ref()
            .map_or(self.anon_key.as_str(), ProtectedString::expose);

        request
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(token)
    }

    #[tracing::instrument(skip_all, fields(
        request.method = tracing::field::Empty,
        request.path = tracing::field::Empty,
    ))]
    async fn execute(&self, request: RequestBuilder) -> Result<Response, RequestHttpError> {
        let request = request
            .build()
            .into_typed_error()
            .change_context(RequestHttpError)?;

        let method = request.method().clone();
        let path = request.url().path().to_string();

        let span = tracing::Span::current();
        if !span.is_disabled() {
            span.record("request.method", tracing::field::display(&method));
            span.record("request.path", tracing::field::display(&path));
        }

        trace!("sending request");
        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                let error = error.without_url();
                let message = BackendMessage(error.to_string());
                return Err(error)
                    .into_typed_error()
                    .change_context(RequestHttpError)
                    .attach_printable(message)
                    .attach(RequestHttpTag::new(method, &path));
            }
        };

        let status = response.status();
        trace!(%status, "received response");
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;
        Err(Error::context(ErrorCategory::Unknown, RequestHttpError)
            .attach(status)
            .attach_printable(format!("status: {status}"))
            .attach_printable(BackendMessage(message))
            .attach(RequestHttpTag::new(method, &path)))
    }

    fn publish(&self, identity: Option<&Identity>) {
        self.identity.send_if_modified(|current| {
            if current.as_ref() == identity {
                false
            } else {
                *current = identity.cloned();
                true
            }
        });
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "msg", alias = "error_description")]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|v| v.message.or(v.error))
        .or_else(|| Some(body.trim().to_string()).filter(|v| !v.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}

fn is_unauthorized(error: &Error<RequestHttpError>) -> bool {
    error
        .downcast_ref::<StatusCode>()
        .is_some_and(|status| *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN)
}

#[async_trait]
impl IdentityService for SupabaseClient {
    #[tracing::instrument(skip_all)]
    async fn current_identity(&self) -> Result<Option<Identity>, IdentityError> {
        let Some(token) = self.access_token.as_ref() else {
            debug!("no access token is set; treating as signed out");
            self.publish(None);
            return Ok(None);
        };

        let url = self
            .endpoint(&["auth", "v1", "user"])
            .change_context(IdentityError)?;

        let request = self
            .http
            .get(url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(token.expose());

        let identity = match self.execute(request).await {
            Ok(response) => Some(
                response
                    .json::<Identity>()
                    .await
                    .into_typed_error()
                    .change_context(IdentityError)
                    .attach_printable("could not parse the signed in user")?,
            ),
            Err(error) if is_unauthorized(&error) => {
                debug!("access token was rejected; treating as signed out");
                None
            }
            Err(error) => return Err(error.change_context(IdentityError)),
        };

        self.publish(identity.as_ref());
        Ok(identity)
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    #[tracing::instrument(skip_all, fields(%bucket, %key))]
    async fn upload(&self, bucket: &str, key: &str, file: &PhotoFile) -> Result<(), StorageError> {
        let url = self
            .endpoint(&["storage", "v1", "object", bucket, key])
            .change_context_lazy(|| StorageError::new("invalid storage URL"))?;

        let content_type = file
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");

        let request = self
            .authorized(self.http.post(url))
            .header(header::CONTENT_TYPE, content_type)
            .body(file.data.clone());

        if let Err(error) = self.execute(request).await {
            let message = match error.downcast_ref::<BackendMessage>() {
                Some(message) => message.0.clone(),
                None => error.current_context().to_string(),
            };
            return Err(error.change_context(StorageError::new(message)));
        }

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> Option<String> {
        self.endpoint(&["storage", "v1", "object", "public", bucket, key])
            .ok()
            .map(String::from)
    }
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    #[serde(default)]
    role: Option<Role>,
}

#[async_trait]
impl RecordStore for SupabaseClient {
    #[tracing::instrument(skip_all, fields(%table, %id))]
    async fn update_record(
        &self,
        table: &str,
        id: Uuid,
        fields: &Map<String, Value>,
    ) -> Result<(), RecordError> {
        let mut url = self
            .endpoint(&["rest", "v1", table])
            .change_context(RecordError)?;

        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let request = self
            .authorized(self.http.patch(url))
            .header("Prefer", "return=minimal")
            .json(fields);

        self.execute(request).await.change_context(RecordError)?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(%table, %id))]
    async fn fetch_role(&self, table: &str, id: Uuid) -> Result<Option<Role>, RecordError> {
        let mut url = self
            .endpoint(&["rest", "v1", table])
            .change_context(RecordError)?;

        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("select", "role");

        let rows = self
            .execute(self.authorized(self.http.get(url)))
            .await
            .change_context(RecordError)?
            .json::<Vec<RoleRow>>()
            .await
            .into_typed_error()
            .change_context(RecordError)
            .attach_printable("could not parse role of the user")?;

        Ok(rows.into_iter().next().and_then(|v| v.role))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;
    use std::time::Duration;

    assert_impl_all!(SupabaseClient: Send, Sync);

    fn client(url: &str) -> SupabaseClient {
        let settings: Backend = serde_json::from_value(serde_json::json!({
            "url": url,
            "anon_key": "anon",
        }))
        .unwrap();

        assert_eq!(settings.timeout, Duration::from_secs(30));
        SupabaseClient::new(&settings).unwrap()
    }

    #[test]
    fn should_build_endpoints() {
        let client = client("https://demo.supabase.co/");
        let url = client.endpoint(&["rest", "v1", "users"]).unwrap();
        assert_eq!(url.as_str(), "https://demo.supabase.co/rest/v1/users");
    }

    #[test]
    fn should_escape_object_keys() {
        let client = client("https://demo.supabase.co");
        assert_eq!(
            client.public_url("photos", "Jane_Doe_1.png").unwrap(),
            "https://demo.supabase.co/storage/v1/object/public/photos/Jane_Doe_1.png"
        );
        assert_eq!(
            client.public_url("photos", "a b#.png").unwrap(),
            "https://demo.supabase.co/storage/v1/object/public/photos/a%20b%23.png"
        );
    }

    #[tokio::test]
    async fn should_be_signed_out_without_access_token() {
        let client = client("https://demo.supabase.co");
        let mut changes = client.subscribe();

        assert_eq!(client.current_identity().await.unwrap(), None);
        assert!(!changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), None);
    }

    #[test]
    fn should_publish_only_changes() {
        let client = client("https://demo.supabase.co");
        let mut changes = client.subscribe();

        let identity: Identity = serde_json::from_value(serde_json::json!({
            "id": "7c0a1f0e-5b2e-4d4f-9c39-1c7c2f1b8a11",
        }))
        .unwrap();

        client.publish(Some(&identity));
        assert!(changes.has_changed().unwrap());
        changes.borrow_and_update();

        client.publish(Some(&identity));
        assert!(!changes.has_changed().unwrap());

        client.publish(None);
        assert!(changes.has_changed().unwrap());
    }
}
