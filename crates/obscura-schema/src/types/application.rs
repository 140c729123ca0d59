use bytes::Bytes;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// The recruitment record edited by one applicant in a single form session.
///
/// Every field starts out blank, matching what the applicant sees
/// when the form first loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Application {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gamertag: String,
    pub discord: String,
    pub gender: String,
    pub dob: Option<NaiveDate>,
    pub division: String,
    pub photo: Option<PhotoFile>,
    pub competitive: CompetitiveStatus,
    pub experience: String,
    pub is_creator: bool,
    pub creator: CreatorProfile,
    pub nda_agreement: bool,
}

impl Application {
    /// Computes the applicant's age by subtracting the birth year from
    /// `current_year`. Month and day are not taken into account.
    ///
    /// Returns [`None`] if there's no date of birth filled in.
    #[must_use]
    pub fn age_in(&self, current_year: i32) -> Option<i32> {
        self.dob.map(|dob| current_year - dob.year())
    }
}

/// Content creator details. Only relevant when
/// [`Application::is_creator`] is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorProfile {
    pub creator_name: String,
    pub timezone: String,
    pub platforms: Vec<String>,
    pub other_platform: String,
    pub schedule: String,
    pub content_type: String,
    pub games: String,
    pub languages: Vec<String>,
    pub other_language: String,
    pub internet: String,
    pub software: Vec<String>,
    pub other_software: String,
    pub equipment: String,
    /// Kept as raw text until the application is normalized.
    pub years_creating: String,
    pub sponsor_list: String,
    pub camera: bool,
    pub sponsors: bool,
    pub collabs: String,
    pub creator_goals: String,
    pub creator_notes: String,
}

impl Default for CreatorProfile {
    fn default() -> Self {
        Self {
            creator_name: String::new(),
            timezone: String::new(),
            platforms: Vec::new(),
            other_platform: String::new(),
            schedule: String::new(),
            content_type: String::new(),
            games: String::new(),
            languages: Vec::new(),
            other_language: String::new(),
            internet: String::new(),
            software: Vec::new(),
            other_software: String::new(),
            equipment: String::new(),
            years_creating: String::new(),
            sponsor_list: String::new(),
            camera: false,
            sponsors: false,
            collabs: String::from("no"),
            creator_goals: String::new(),
            creator_notes: String::new(),
        }
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CompetitiveStatus {
    Yes,
    #[default]
    No,
    Maybe,
}

impl CompetitiveStatus {
    pub const ALL: &'static [Self] = &[Self::Yes, Self::No, Self::Maybe];

    /// Whether the applicant has (or might have) competitive experience
    /// worth describing.
    #[must_use]
    pub fn has_experience(self) -> bool {
        matches!(self, Self::Yes | Self::Maybe)
    }
}

#[derive(Debug, Error)]
#[error("unknown competitive status {0:?}")]
pub struct ParseCompetitiveStatusError(String);

impl FromStr for CompetitiveStatus {
    type Err = ParseCompetitiveStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_ref() == s)
            .ok_or_else(|| ParseCompetitiveStatusError(s.to_string()))
    }
}

/// An opaque handle of the photo attached by the applicant.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl PhotoFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    /// Everything after the last `.` of the file name. If the file
    /// name has no `.`, the whole file name is returned.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.file_name.rsplit('.').next().unwrap_or_default()
    }
}

impl fmt::Debug for PhotoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Declined,
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Application: Send, Sync, Clone);

    #[test]
    fn should_start_blank() {
        let application = Application::default();
        assert_eq!(application.competitive, CompetitiveStatus::No);
        assert_eq!(application.creator.collabs, "no");
        assert!(!application.is_creator);
        assert!(!application.nda_agreement);
        assert!(application.dob.is_none());
    }

    #[test]
    fn test_age_in() {
        let mut application = Application::default();
        assert_eq!(application.age_in(2026), None);

        application.dob = NaiveDate::from_ymd_opt(2008, 12, 31);
        assert_eq!(application.age_in(2026), Some(18));
    }

    #[test]
    fn test_photo_extension() {
        let photo = PhotoFile::new("me.final.PNG", None, Bytes::new());
        assert_eq!(photo.extension(), "PNG");

        let photo = PhotoFile::new("portrait", None, Bytes::new());
        assert_eq!(photo.extension(), "portrait");
    }

    #[test]
    fn test_competitive_status_from_str() {
        assert_eq!("maybe".parse::<CompetitiveStatus>().unwrap(), CompetitiveStatus::Maybe);
        assert!("Yes".parse::<CompetitiveStatus>().is_err());
        assert!(CompetitiveStatus::Yes.has_experience());
        assert!(!CompetitiveStatus::No.has_experience());
    }
}
