use config::{Config, ConfigBuilder};
use doku::Document;
use obscura_utils::env::{var_opt, var_opt_parsed};
use obscura_utils::error::exts::{IntoTypedError, ResultExt};
use obscura_utils::error::tags::Suggestion;
use obscura_utils::{Error, ErrorCategory, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

mod backend;
mod error;
mod form;
mod logging;

pub use self::backend::*;
pub use self::form::*;
pub use self::logging::*;

pub use self::error::SettingsLoadError;

#[derive(Debug, Document, Deserialize)]
pub struct Settings {
    backend: Backend,

    #[serde(default)]
    storage: Storage,
    #[serde(default)]
    records: Records,
    #[serde(default)]
    minor_consent: MinorConsent,
    #[serde(default)]
    logging: Logging,

    #[serde(skip)]
    #[doku(skip)]
    path: Option<PathBuf>,
}

type DefaultBuilder = ConfigBuilder<config::builder::DefaultState>;

impl Settings {
    pub fn from_env() -> Result<Self, SettingsLoadError> {
        let mut builder = Config::builder().add_source(
            config::Environment::with_prefix("OBSCURA")
                .prefix_separator("_")
                .separator("__"),
        );

        let resolved_path = Self::resolve_path()?;
        if let Some(resolved_path) = resolved_path.as_ref() {
            let source: config::File<config::FileSourceFile, config::FileFormat> =
                resolved_path.clone().into();

            builder = builder.add_source(source.format(config::FileFormat::Toml));
        }

        let builder = Self::resolve_alternative_vars(builder)
            .change_context(SettingsLoadError)
            .attach_printable("could not resolve alternative variables")?;

        let mut settings: Settings = builder
            .build()
            .into_typed_error()
            .change_context(SettingsLoadError)
            .and_then(|v| {
                v.try_deserialize()
                    .into_typed_error()
                    .change_context(SettingsLoadError)
            })
            .attach_printable_lazy(|| format!("loaded settings file from: {resolved_path:?}"))?;

        settings.check()?;
        settings.path = resolved_path;
        Ok(settings)
    }

    const ALTERNATIVE_FILE_PATHS: &'static [&'static str] = &[
        "obscura.toml",
        // these are only applicable in Unix systems
        #[cfg(target_family = "unix")]
        "/etc/obscura/settings.toml",
    ];

    pub fn resolve_path() -> Result<Option<PathBuf>, SettingsLoadError> {
        // OBSCURA_SETTINGS
        let mut resolved_path = var_opt_parsed::<PathBuf>("OBSCURA_SETTINGS")
            .change_context(SettingsLoadError)
            .attach(Suggestion::new("`OBSCURA_SETTINGS` must be a valid path"))?;

        if resolved_path.is_none() {
            resolved_path = Self::ALTERNATIVE_FILE_PATHS
                .iter()
                .find(|path| {
                    std::fs::metadata(path)
                        .map(|v| v.is_file())
                        .unwrap_or(false)
                })
                .map(PathBuf::from);
        }

        Ok(resolved_path)
    }

    /// Generates TOML data with default values of [`Settings`] and
    /// documentation using [`doku`].
    #[must_use]
    pub fn generate_docs() -> String {
        let fmt = doku::toml::Formatting::default();
        doku::to_toml_fmt::<Self>(&fmt)
    }
}

impl Settings {
    #[must_use]
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn records(&self) -> &Records {
        &self.records
    }

    #[must_use]
    pub fn minor_consent(&self) -> &MinorConsent {
        &self.minor_consent
    }

    #[must_use]
    pub fn logging(&self) -> &Logging {
        &self.logging
    }

    /// Current working path for the [`Settings`] file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Settings {
    pub(crate) fn check(&self) -> Result<(), SettingsLoadError> {
        let scheme = self.backend.url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(Error::context(ErrorCategory::Unknown, SettingsLoadError))
                .attach_printable(format!("`backend.url` must be an HTTP(S) URL, got {scheme:?}"));
        }

        if self.storage.photos_bucket.trim().is_empty() {
            return Err(Error::context(ErrorCategory::Unknown, SettingsLoadError))
                .attach_printable("`storage.photos_bucket` must not be empty");
        }

        if self.records.table.trim().is_empty() {
            return Err(Error::context(ErrorCategory::Unknown, SettingsLoadError))
                .attach_printable("`records.table` must not be empty");
        }

        Ok(())
    }

    fn resolve_alternative_vars(mut builder: DefaultBuilder) -> Result<DefaultBuilder> {
        // Supabase's own tooling names these variables differently, so
        // they are accepted as fallbacks.
        const FALLBACKS: &[(&str, &str)] = &[
            ("SUPABASE_URL", "backend.url"),
            ("SUPABASE_ANON_KEY", "backend.anon_key"),
            ("SUPABASE_ACCESS_TOKEN", "backend.access_token"),
        ];

        for &(var, key) in FALLBACKS {
            if let Some(value) = var_opt(var).anonymize_error()? {
                builder = builder
                    .set_default(key, value)
                    .into_typed_error()
                    .attach_printable_lazy(|| format!("could not set {key} from {var}"))
                    .anonymize_error()?;
            }
        }

        // `RUST_LOG` usage
        if let Some(value) = var_opt("RUST_LOG").anonymize_error()? {
            builder = builder
                .set_override("logging.targets", value)
                .into_typed_error()
                .attach_printable("could not override settings for RUST_LOG")
                .anonymize_error()?;
        }

        Ok(builder)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(value: serde_json::Value) -> Settings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_fill_in_defaults() {
        let settings = from_json(serde_json::json!({
            "backend": {
                "url": "https://demo.supabase.co",
                "anon_key": "anon",
            }
        }));

        assert!(settings.check().is_ok());
        assert_eq!(settings.storage().photos_bucket, "photos");
        assert_eq!(settings.records().table, "users");
        assert_eq!(settings.minor_consent().recruitment_path, "/minor-recruitment");
        assert_eq!(settings.backend().timeout, std::time::Duration::from_secs(30));
        assert!(settings.backend().access_token.is_none());
    }

    #[test]
    fn should_reject_non_http_backend() {
        let settings = from_json(serde_json::json!({
            "backend": {
                "url": "ftp://demo.supabase.co",
                "anon_key": "anon",
            }
        }));
        assert!(settings.check().is_err());
    }

    #[test]
    fn should_reject_empty_bucket() {
        let settings = from_json(serde_json::json!({
            "backend": {
                "url": "https://demo.supabase.co",
                "anon_key": "anon",
                "timeout": "5s",
            },
            "storage": { "photos_bucket": "  " }
        }));
        assert!(settings.check().is_err());
        assert_eq!(settings.backend().timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    fn should_generate_docs() {
        let docs = Settings::generate_docs();
        assert!(docs.contains("photos_bucket"));
        assert!(docs.contains("anon_key"));
    }
}
