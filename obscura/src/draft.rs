//! Drafts are TOML files holding values of the recruitment form,
//! keyed by field name:
//!
//! ```toml
//! full_name = "Jane Doe"
//! email = "jane@example.com"
//! phone = "555-1234"
//! dob = "2000-01-01"
//! photo = "me.png"
//! is_creator = true
//! platforms = ["Twitch", "YouTube"]
//! nda_agreement = true
//! ```
use bytes::Bytes;
use chrono::NaiveDate;
use obscura_recruitment::state::FieldUpdate;
use obscura_recruitment::FormSession;
use obscura_schema::registry::{FieldKind, FieldName, FieldValue, ValueKind};
use obscura_schema::types::PhotoFile;
use obscura_utils::error::exts::{IntoTypedError, ResultExt};
use obscura_utils::{Error, ErrorCategory, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
#[error("could not load draft")]
pub struct LoadDraftError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DraftValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl DraftValue {
    fn kind(&self) -> ValueKind {
        match self {
            Self::Flag(..) => ValueKind::Flag,
            Self::Text(..) => ValueKind::Text,
            Self::List(..) => ValueKind::List,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    path: PathBuf,
    updates: Vec<FieldUpdate>,
}

impl Draft {
    pub fn load(path: &Path) -> Result<Self, LoadDraftError> {
        let values: BTreeMap<String, DraftValue> = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize())
            .into_typed_error()
            .change_context(LoadDraftError)
            .category(ErrorCategory::User)
            .attach_printable_lazy(|| format!("draft file: {}", path.display()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let updates = values
            .into_iter()
            .map(|(key, value)| resolve(base_dir, &key, value))
            .collect::<Result<Vec<_>, LoadDraftError>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            updates,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn updates(&self) -> &[FieldUpdate] {
        &self.updates
    }

    /// Fills in the form with every value of the draft.
    pub fn apply(self, session: &mut FormSession) {
        for update in self.updates {
            session.set(update);
        }
    }
}

/// Turns a single draft entry into a [`FieldUpdate`]. Relative
/// photo paths are resolved from `base_dir`.
pub fn resolve(base_dir: &Path, key: &str, value: DraftValue) -> Result<FieldUpdate, LoadDraftError> {
    let Some(name) = FieldName::from_key(key) else {
        return Err(Error::context(ErrorCategory::User, LoadDraftError))
            .attach_printable(format!("unknown field {key:?}"));
    };

    let value = match (name.spec().kind, value) {
        (FieldKind::YesNo, DraftValue::Text(text)) => FieldValue::Flag(text == "yes"),
        (FieldKind::Date, DraftValue::Text(text)) => FieldValue::Date(parse_date(key, &text)?),
        (FieldKind::File, DraftValue::Text(text)) => {
            FieldValue::File(read_photo(base_dir, &text)?)
        }
        (FieldKind::MultiSelect(..), DraftValue::Text(text)) => FieldValue::List(vec![text]),
        (kind, value) => match (kind.value_kind(), value) {
            (ValueKind::Text, DraftValue::Text(text)) => FieldValue::Text(text),
            (ValueKind::Flag, DraftValue::Flag(flag)) => FieldValue::Flag(flag),
            (ValueKind::List, DraftValue::List(list)) => FieldValue::List(list),
            (expected, value) => {
                return Err(Error::context(ErrorCategory::User, LoadDraftError)).attach_printable(
                    format!("{key} expects a {expected} value, got {}", value.kind()),
                )
            }
        },
    };

    FieldUpdate::from_value(name, value)
        .into_typed_error()
        .change_context(LoadDraftError)
        .category(ErrorCategory::User)
}

fn parse_date(key: &str, text: &str) -> Result<Option<NaiveDate>, LoadDraftError> {
    if text.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Some)
        .into_typed_error()
        .change_context(LoadDraftError)
        .category(ErrorCategory::User)
        .attach_printable_lazy(|| format!("{key} must be a YYYY-MM-DD date, got {text:?}"))
}

fn read_photo(base_dir: &Path, path: &str) -> Result<Option<PhotoFile>, LoadDraftError> {
    if path.is_empty() {
        return Ok(None);
    }

    let path = base_dir.join(path);
    let data = std::fs::read(&path)
        .into_typed_error()
        .change_context(LoadDraftError)
        .category(ErrorCategory::User)
        .attach_printable_lazy(|| format!("could not read photo at {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|v| v.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content_type = content_type_of(&file_name).map(String::from);
    Ok(Some(PhotoFile::new(file_name, content_type, Bytes::from(data))))
}

fn content_type_of(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use obscura_schema::types::CompetitiveStatus;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("obscura-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn should_resolve_values_by_field_kind() {
        let base = Path::new(".");
        let text = |v: &str| DraftValue::Text(v.into());

        assert_eq!(
            resolve(base, "full_name", text("Jane Doe")).unwrap(),
            FieldUpdate::FullName("Jane Doe".into())
        );
        assert_eq!(
            resolve(base, "is_creator", text("yes")).unwrap(),
            FieldUpdate::IsCreator(true)
        );
        assert_eq!(
            resolve(base, "competitive", text("maybe")).unwrap(),
            FieldUpdate::Competitive(CompetitiveStatus::Maybe)
        );
        assert_eq!(
            resolve(base, "dob", text("2000-01-01")).unwrap(),
            FieldUpdate::Dob(NaiveDate::from_ymd_opt(2000, 1, 1))
        );
        assert_eq!(
            resolve(base, "platforms", text("Twitch")).unwrap(),
            FieldUpdate::Platforms(vec!["Twitch".into()])
        );
        assert_eq!(
            resolve(base, "nda_agreement", DraftValue::Flag(true)).unwrap(),
            FieldUpdate::NdaAgreement(true)
        );
    }

    #[test]
    fn should_reject_bad_entries() {
        let base = Path::new(".");
        assert!(resolve(base, "nda", DraftValue::Flag(true)).is_err());
        assert!(resolve(base, "camera", DraftValue::Text("yes".into())).is_err());
        assert!(resolve(base, "dob", DraftValue::Text("01/01/2000".into())).is_err());
        assert!(resolve(base, "competitive", DraftValue::Text("often".into())).is_err());
        assert!(resolve(base, "photo", DraftValue::Text("missing.png".into())).is_err());
    }

    #[test]
    fn should_load_draft_with_photo() {
        let dir = temp_dir("draft");
        std::fs::write(dir.join("me.PNG"), b"png").unwrap();
        std::fs::write(
            dir.join("draft.toml"),
            r#"
full_name = "Jane Doe"
email = "jane@x.com"
phone = "555-1234"
photo = "me.PNG"
platforms = ["Twitch", "Kick"]
nda_agreement = true
"#,
        )
        .unwrap();

        let draft = Draft::load(&dir.join("draft.toml")).unwrap();
        let photo = draft.updates().iter().find_map(|v| match v {
            FieldUpdate::Photo(photo) => photo.clone(),
            _ => None,
        });

        let photo = photo.unwrap();
        assert_eq!(photo.file_name, "me.PNG");
        assert_eq!(photo.content_type.as_deref(), Some("image/png"));
        assert_eq!(&photo.data[..], b"png");

        let mut session = FormSession::new();
        draft.apply(&mut session);
        let application = session.state().application();
        assert_eq!(application.full_name, "Jane Doe");
        assert_eq!(application.creator.platforms, vec!["Twitch", "Kick"]);
        assert!(application.nda_agreement);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
