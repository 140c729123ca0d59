use doku::Document;
use obscura_utils::types::{ProtectedString, Sensitive};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;
use url::Url;

#[serde_as]
#[derive(Debug, Deserialize, Document, Serialize)]
pub struct Backend {
    /// Base URL of the Supabase project that handles authentication,
    /// photo storage and the applicant records.
    ///
    /// It must be an `http` or `https` URL.
    #[doku(as = "String", example = "https://<project>.supabase.co")]
    pub url: Url,

    /// The project's public (anonymous) API key.
    ///
    /// It is sent along with every request as the `apikey` header.
    #[doku(as = "String", example = "<insert anon key here>")]
    pub anon_key: Sensitive<String>,

    /// Access token of the signed in applicant or reviewer.
    ///
    /// **DO NOT SHARE THIS TOKEN TO ANYONE!**
    ///
    /// Without it, Obscura treats the session as signed out and
    /// refuses to submit applications.
    #[doku(as = "String", example = "<insert access token here>")]
    #[serde(default)]
    pub access_token: Option<ProtectedString>,

    /// Maximum amount of time to wait for every request made
    /// to the backend before giving up.
    ///
    /// The default value is 30 seconds if not set.
    #[doku(as = "String", example = "30s")]
    #[serde(default = "Backend::default_timeout")]
    #[serde_as(as = "obscura_utils::serial::AsHumanDuration")]
    pub timeout: Duration,
}

impl Backend {
    fn default_timeout() -> Duration {
        Duration::from_secs(30)
    }
}
