use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{Application, ApplicationStatus, CompetitiveStatus, CreatorProfile};

/// The canonical shape of an [`Application`] written to the records table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationPayload<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub gamertag: &'a str,
    pub discord: &'a str,
    pub gender: &'a str,
    pub dob: Option<String>,
    pub division: &'a str,
    pub competitive: CompetitiveStatus,
    pub experience: &'a str,
    pub is_creator: bool,
    #[serde(flatten)]
    pub creator: Option<CreatorPayload<'a>>,
    pub nda_agreement: bool,
    pub is_minor: bool,
    pub status: ApplicationStatus,
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorPayload<'a> {
    pub creator_name: &'a str,
    pub timezone: &'a str,
    pub platforms: &'a [String],
    pub other_platform: &'a str,
    pub schedule: &'a str,
    pub content_type: &'a str,
    pub games: &'a str,
    pub languages: &'a [String],
    pub other_language: &'a str,
    pub internet: &'a str,
    pub software: &'a [String],
    pub other_software: &'a str,
    pub equipment: &'a str,
    pub years_creating: Option<i64>,
    pub sponsor_list: &'a str,
    pub camera: bool,
    pub sponsors: bool,
    pub collabs: &'a str,
    pub creator_goals: &'a str,
    pub creator_notes: &'a str,
}

impl<'a> ApplicationPayload<'a> {
    /// Normalizes the application into the shape expected by the records
    /// table. Creator details are left out unless the applicant is a creator.
    ///
    /// Applicants reaching this point are never minors; minors are sent
    /// to a separate consent flow before anything gets written.
    #[must_use]
    pub fn normalize(application: &'a Application, photo_url: String) -> Self {
        let creator = application
            .is_creator
            .then(|| CreatorPayload::normalize(&application.creator));

        Self {
            full_name: &application.full_name,
            email: &application.email,
            phone: &application.phone,
            gamertag: &application.gamertag,
            discord: &application.discord,
            gender: &application.gender,
            dob: application.dob.map(canonical_timestamp),
            division: &application.division,
            competitive: application.competitive,
            experience: &application.experience,
            is_creator: application.is_creator,
            creator,
            nda_agreement: application.nda_agreement,
            is_minor: false,
            status: ApplicationStatus::Pending,
            photo_url,
        }
    }

    /// Serializes the payload into a flat map of fields, leaving
    /// out every field that has no value.
    pub fn into_fields(self) -> Result<Map<String, Value>, serde_json::Error> {
        let fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        Ok(strip_nulls(fields))
    }
}

impl<'a> CreatorPayload<'a> {
    #[must_use]
    pub fn normalize(profile: &'a CreatorProfile) -> Self {
        Self {
            creator_name: &profile.creator_name,
            timezone: &profile.timezone,
            platforms: &profile.platforms,
            other_platform: &profile.other_platform,
            schedule: &profile.schedule,
            content_type: &profile.content_type,
            games: &profile.games,
            languages: &profile.languages,
            other_language: &profile.other_language,
            internet: &profile.internet,
            software: &profile.software,
            other_software: &profile.other_software,
            equipment: &profile.equipment,
            years_creating: parse_leading_int(&profile.years_creating),
            sponsor_list: &profile.sponsor_list,
            camera: profile.camera,
            sponsors: profile.sponsors,
            collabs: &profile.collabs,
            creator_goals: &profile.creator_goals,
            creator_notes: &profile.creator_notes,
        }
    }
}

/// Formats the date as midnight UTC, like `2000-01-01T00:00:00.000Z`.
#[must_use]
pub fn canonical_timestamp(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses the integer at the start of the text, ignoring leading
/// whitespace and anything after the digits (`" 5 years"` is `5`).
///
/// Returns [`None`] if the text does not start with a number. Numbers
/// too large for an [`i64`] saturate at [`i64::MAX`] (or [`i64::MIN`]).
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut digits = rest.bytes().take_while(u8::is_ascii_digit).peekable();
    digits.peek()?;

    Some(digits.fold(0i64, |value, digit| {
        let value = value.saturating_mul(10);
        let digit = i64::from(digit - b'0');
        if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        }
    }))
}

fn strip_nulls(fields: Map<String, Value>) -> Map<String, Value> {
    fields.into_iter().filter(|(_, v)| !v.is_null()).collect()
}
