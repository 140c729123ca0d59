use chrono::NaiveDate;
use obscura_schema::registry::{FieldName, FieldValue, ValueKind};
use obscura_schema::types::{Application, CompetitiveStatus, PhotoFile};
use thiserror::Error;

/// A single edit of one form field, carrying a value of the
/// field's own type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FullName(String),
    Email(String),
    Phone(String),
    Gamertag(String),
    Discord(String),
    Gender(String),
    Dob(Option<NaiveDate>),
    Division(String),
    Photo(Option<PhotoFile>),
    Competitive(CompetitiveStatus),
    Experience(String),
    IsCreator(bool),
    CreatorName(String),
    Timezone(String),
    Platforms(Vec<String>),
    OtherPlatform(String),
    Schedule(String),
    ContentType(String),
    Games(String),
    Languages(Vec<String>),
    OtherLanguage(String),
    Internet(String),
    Software(Vec<String>),
    OtherSoftware(String),
    Equipment(String),
    YearsCreating(String),
    SponsorList(String),
    Camera(bool),
    Sponsors(bool),
    Collabs(String),
    CreatorGoals(String),
    CreatorNotes(String),
    NdaAgreement(bool),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldUpdateError {
    #[error("{field} expects a {expected} value, got {actual}")]
    KindMismatch {
        field: FieldName,
        expected: ValueKind,
        actual: ValueKind,
    },
    #[error("{value:?} is not a valid option for {field}")]
    InvalidOption { field: FieldName, value: String },
}

impl FieldUpdate {
    #[must_use]
    pub fn name(&self) -> FieldName {
        match self {
            Self::FullName(..) => FieldName::FullName,
            Self::Email(..) => FieldName::Email,
            Self::Phone(..) => FieldName::Phone,
            Self::Gamertag(..) => FieldName::Gamertag,
            Self::Discord(..) => FieldName::Discord,
            Self::Gender(..) => FieldName::Gender,
            Self::Dob(..) => FieldName::Dob,
            Self::Division(..) => FieldName::Division,
            Self::Photo(..) => FieldName::Photo,
            Self::Competitive(..) => FieldName::Competitive,
            Self::Experience(..) => FieldName::Experience,
            Self::IsCreator(..) => FieldName::IsCreator,
            Self::CreatorName(..) => FieldName::CreatorName,
            Self::Timezone(..) => FieldName::Timezone,
            Self::Platforms(..) => FieldName::Platforms,
            Self::OtherPlatform(..) => FieldName::OtherPlatform,
            Self::Schedule(..) => FieldName::Schedule,
            Self::ContentType(..) => FieldName::ContentType,
            Self::Games(..) => FieldName::Games,
            Self::Languages(..) => FieldName::Languages,
            Self::OtherLanguage(..) => FieldName::OtherLanguage,
            Self::Internet(..) => FieldName::Internet,
            Self::Software(..) => FieldName::Software,
            Self::OtherSoftware(..) => FieldName::OtherSoftware,
            Self::Equipment(..) => FieldName::Equipment,
            Self::YearsCreating(..) => FieldName::YearsCreating,
            Self::SponsorList(..) => FieldName::SponsorList,
            Self::Camera(..) => FieldName::Camera,
            Self::Sponsors(..) => FieldName::Sponsors,
            Self::Collabs(..) => FieldName::Collabs,
            Self::CreatorGoals(..) => FieldName::CreatorGoals,
            Self::CreatorNotes(..) => FieldName::CreatorNotes,
            Self::NdaAgreement(..) => FieldName::NdaAgreement,
        }
    }

    /// Builds an update for `name` out of a loosely typed [`FieldValue`].
    ///
    /// The value must be of the kind declared for the field in the
    /// registry. Competitive status is the only select field whose
    /// options are enforced since it is stored as an enum.
    pub fn from_value(name: FieldName, value: FieldValue) -> Result<Self, FieldUpdateError> {
        let expected = name.spec().kind.value_kind();
        if value.kind() != expected {
            return Err(FieldUpdateError::KindMismatch {
                field: name,
                expected,
                actual: value.kind(),
            });
        }

        let update = match (name, value) {
            (FieldName::Dob, FieldValue::Date(v)) => Some(Self::Dob(v)),
            (FieldName::Photo, FieldValue::File(v)) => Some(Self::Photo(v)),
            (FieldName::Competitive, FieldValue::Text(v)) => match v.parse() {
                Ok(status) => Some(Self::Competitive(status)),
                Err(..) => return Err(FieldUpdateError::InvalidOption { field: name, value: v }),
            },

            (FieldName::IsCreator, FieldValue::Flag(v)) => Some(Self::IsCreator(v)),
            (FieldName::Camera, FieldValue::Flag(v)) => Some(Self::Camera(v)),
            (FieldName::Sponsors, FieldValue::Flag(v)) => Some(Self::Sponsors(v)),
            (FieldName::NdaAgreement, FieldValue::Flag(v)) => Some(Self::NdaAgreement(v)),

            (FieldName::Platforms, FieldValue::List(v)) => Some(Self::Platforms(v)),
            (FieldName::Languages, FieldValue::List(v)) => Some(Self::Languages(v)),
            (FieldName::Software, FieldValue::List(v)) => Some(Self::Software(v)),

            (name, FieldValue::Text(v)) => Self::text(name, v),
            _ => None,
        };

        // The kind was already checked above, so this only
        // trips if the registry and this enum disagree.
        update.ok_or(FieldUpdateError::KindMismatch {
            field: name,
            expected,
            actual: expected,
        })
    }

    fn text(name: FieldName, v: String) -> Option<Self> {
        let update = match name {
            FieldName::FullName => Self::FullName(v),
            FieldName::Email => Self::Email(v),
            FieldName::Phone => Self::Phone(v),
            FieldName::Gamertag => Self::Gamertag(v),
            FieldName::Discord => Self::Discord(v),
            FieldName::Gender => Self::Gender(v),
            FieldName::Division => Self::Division(v),
            FieldName::Experience => Self::Experience(v),
            FieldName::CreatorName => Self::CreatorName(v),
            FieldName::Timezone => Self::Timezone(v),
            FieldName::OtherPlatform => Self::OtherPlatform(v),
            FieldName::Schedule => Self::Schedule(v),
            FieldName::ContentType => Self::ContentType(v),
            FieldName::Games => Self::Games(v),
            FieldName::OtherLanguage => Self::OtherLanguage(v),
            FieldName::Internet => Self::Internet(v),
            FieldName::OtherSoftware => Self::OtherSoftware(v),
            FieldName::Equipment => Self::Equipment(v),
            FieldName::YearsCreating => Self::YearsCreating(v),
            FieldName::SponsorList => Self::SponsorList(v),
            FieldName::Collabs => Self::Collabs(v),
            FieldName::CreatorGoals => Self::CreatorGoals(v),
            FieldName::CreatorNotes => Self::CreatorNotes(v),
            _ => return None,
        };
        Some(update)
    }
}

/// Holds the [`Application`] being edited during one form session.
///
/// Every update is applied as is. Nothing is cleared when a
/// conditional section gets hidden, so switching `is_creator` off
/// and on again brings back the creator details entered before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    application: Application,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn application(&self) -> &Application {
        &self.application
    }

    #[must_use]
    pub fn into_application(self) -> Application {
        self.application
    }

    pub fn set(&mut self, update: FieldUpdate) {
        let app = &mut self.application;
        let creator = &mut app.creator;
        match update {
            FieldUpdate::FullName(v) => app.full_name = v,
            FieldUpdate::Email(v) => app.email = v,
            FieldUpdate::Phone(v) => app.phone = v,
            FieldUpdate::Gamertag(v) => app.gamertag = v,
            FieldUpdate::Discord(v) => app.discord = v,
            FieldUpdate::Gender(v) => app.gender = v,
            FieldUpdate::Dob(v) => app.dob = v,
            FieldUpdate::Division(v) => app.division = v,
            FieldUpdate::Photo(v) => app.photo = v,
            FieldUpdate::Competitive(v) => app.competitive = v,
            FieldUpdate::Experience(v) => app.experience = v,
            FieldUpdate::IsCreator(v) => app.is_creator = v,
            FieldUpdate::CreatorName(v) => creator.creator_name = v,
            FieldUpdate::Timezone(v) => creator.timezone = v,
            FieldUpdate::Platforms(v) => creator.platforms = v,
            FieldUpdate::OtherPlatform(v) => creator.other_platform = v,
            FieldUpdate::Schedule(v) => creator.schedule = v,
            FieldUpdate::ContentType(v) => creator.content_type = v,
            FieldUpdate::Games(v) => creator.games = v,
            FieldUpdate::Languages(v) => creator.languages = v,
            FieldUpdate::OtherLanguage(v) => creator.other_language = v,
            FieldUpdate::Internet(v) => creator.internet = v,
            FieldUpdate::Software(v) => creator.software = v,
            FieldUpdate::OtherSoftware(v) => creator.other_software = v,
            FieldUpdate::Equipment(v) => creator.equipment = v,
            FieldUpdate::YearsCreating(v) => creator.years_creating = v,
            FieldUpdate::SponsorList(v) => creator.sponsor_list = v,
            FieldUpdate::Camera(v) => creator.camera = v,
            FieldUpdate::Sponsors(v) => creator.sponsors = v,
            FieldUpdate::Collabs(v) => creator.collabs = v,
            FieldUpdate::CreatorGoals(v) => creator.creator_goals = v,
            FieldUpdate::CreatorNotes(v) => creator.creator_notes = v,
            FieldUpdate::NdaAgreement(v) => app.nda_agreement = v,
        }
    }

    #[must_use]
    pub fn get(&self, name: FieldName) -> FieldValue {
        field_value(&self.application, name)
    }
}

/// Reads the current value of a field out of the application.
#[must_use]
pub fn field_value(app: &Application, name: FieldName) -> FieldValue {
    let creator = &app.creator;
    let text = |v: &String| FieldValue::Text(v.clone());
    let list = |v: &Vec<String>| FieldValue::List(v.clone());

    match name {
        FieldName::FullName => text(&app.full_name),
        FieldName::Email => text(&app.email),
        FieldName::Phone => text(&app.phone),
        FieldName::Gamertag => text(&app.gamertag),
        FieldName::Discord => text(&app.discord),
        FieldName::Gender => text(&app.gender),
        FieldName::Dob => FieldValue::Date(app.dob),
        FieldName::Division => text(&app.division),
        FieldName::Photo => FieldValue::File(app.photo.clone()),
        FieldName::Competitive => FieldValue::Text(app.competitive.to_string()),
        FieldName::Experience => text(&app.experience),
        FieldName::IsCreator => FieldValue::Flag(app.is_creator),
        FieldName::CreatorName => text(&creator.creator_name),
        FieldName::Timezone => text(&creator.timezone),
        FieldName::Platforms => list(&creator.platforms),
        FieldName::OtherPlatform => text(&creator.other_platform),
        FieldName::Schedule => text(&creator.schedule),
        FieldName::ContentType => text(&creator.content_type),
        FieldName::Games => text(&creator.games),
        FieldName::Languages => list(&creator.languages),
        FieldName::OtherLanguage => text(&creator.other_language),
        FieldName::Internet => text(&creator.internet),
        FieldName::Software => list(&creator.software),
        FieldName::OtherSoftware => text(&creator.other_software),
        FieldName::Equipment => text(&creator.equipment),
        FieldName::YearsCreating => text(&creator.years_creating),
        FieldName::SponsorList => text(&creator.sponsor_list),
        FieldName::Camera => FieldValue::Flag(creator.camera),
        FieldName::Sponsors => FieldValue::Flag(creator.sponsors),
        FieldName::Collabs => text(&creator.collabs),
        FieldName::CreatorGoals => text(&creator.creator_goals),
        FieldName::CreatorNotes => text(&creator.creator_notes),
        FieldName::NdaAgreement => FieldValue::Flag(app.nda_agreement),
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use obscura_schema::registry::FIELDS;

    #[test]
    fn should_overwrite_only_the_named_field() {
        let mut state = FormState::new();
        state.set(FieldUpdate::FullName("Jane".into()));
        state.set(FieldUpdate::FullName("Jane Doe".into()));
        state.set(FieldUpdate::Camera(true));

        assert_eq!(state.get(FieldName::FullName), FieldValue::Text("Jane Doe".into()));
        assert_eq!(state.get(FieldName::Camera), FieldValue::Flag(true));
        assert_eq!(state.get(FieldName::Email), FieldValue::Text(String::new()));
        assert_eq!(state.application().creator.collabs, "no");
    }

    #[test]
    fn should_retain_creator_details_when_toggled() {
        let mut state = FormState::new();
        state.set(FieldUpdate::IsCreator(true));
        state.set(FieldUpdate::CreatorName("JaneLive".into()));
        state.set(FieldUpdate::Platforms(vec!["Twitch".into()]));
        state.set(FieldUpdate::IsCreator(false));
        state.set(FieldUpdate::IsCreator(true));

        let app = state.application();
        assert_eq!(app.creator.creator_name, "JaneLive");
        assert_eq!(app.creator.platforms, vec!["Twitch".to_string()]);
    }

    #[test]
    fn should_match_value_kind_of_every_field() {
        let state = FormState::new();
        for spec in FIELDS {
            assert_eq!(
                state.get(spec.name).kind(),
                spec.kind.value_kind(),
                "{} has a mismatched value",
                spec.name
            );
        }
    }

    #[test]
    fn should_build_updates_from_values() {
        for spec in FIELDS {
            let value = FormState::new().get(spec.name);
            let update = FieldUpdate::from_value(spec.name, value).unwrap();
            assert_eq!(update.name(), spec.name);
        }

        let update =
            FieldUpdate::from_value(FieldName::Competitive, FieldValue::Text("maybe".into()))
                .unwrap();
        assert_eq!(update, FieldUpdate::Competitive(CompetitiveStatus::Maybe));
    }

    #[test]
    fn should_reject_mismatched_values() {
        let error = FieldUpdate::from_value(FieldName::NdaAgreement, FieldValue::Text("yes".into()))
            .unwrap_err();
        assert_eq!(
            error,
            FieldUpdateError::KindMismatch {
                field: FieldName::NdaAgreement,
                expected: ValueKind::Flag,
                actual: ValueKind::Text,
            }
        );

        let error =
            FieldUpdate::from_value(FieldName::Competitive, FieldValue::Text("often".into()))
                .unwrap_err();
        assert!(matches!(error, FieldUpdateError::InvalidOption { .. }));
    }
}
