//! Declarative description of every field of the recruitment form.
use chrono::NaiveDate;
use strum_macros::{AsRefStr, Display, IntoStaticStr};

use crate::types::PhotoFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FieldName {
    FullName,
    Email,
    Phone,
    Gamertag,
    Discord,
    Gender,
    Dob,
    Division,
    Photo,
    Competitive,
    Experience,
    IsCreator,
    CreatorName,
    Timezone,
    Platforms,
    OtherPlatform,
    Schedule,
    ContentType,
    Games,
    Languages,
    OtherLanguage,
    Internet,
    Software,
    OtherSoftware,
    Equipment,
    YearsCreating,
    SponsorList,
    Camera,
    Sponsors,
    Collabs,
    CreatorGoals,
    CreatorNotes,
    NdaAgreement,
}

impl FieldName {
    /// Resolves the field from its snake_case key, like `full_name`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        FIELDS.iter().map(|v| v.name).find(|v| v.as_ref() == key)
    }

    /// Looks up the declaration of this field.
    #[must_use]
    pub fn spec(self) -> &'static FieldSpec {
        // Every variant is declared exactly once in FIELDS, in order.
        &FIELDS[self as usize]
    }
}

/// Sections of the form as the applicant sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Section {
    #[strum(to_string = "Personal Details")]
    PersonalDetails,
    #[strum(to_string = "Photo Upload")]
    PhotoUpload,
    #[strum(to_string = "Competitive Experience")]
    CompetitiveExperience,
    #[strum(to_string = "Competitive Experience Details")]
    CompetitiveExperienceDetail,
    #[strum(to_string = "Content Creation")]
    ContentCreation,
    #[strum(to_string = "Creator Profile")]
    CreatorProfile,
    #[strum(to_string = "Non-Disclosure Agreement")]
    NonDisclosureAgreement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Date,
    File,
    Checkbox,
    /// A `yes`/`no` select that is stored as a boolean.
    YesNo,
    Select(&'static [&'static str]),
    MultiSelect(&'static [&'static str]),
}

impl FieldKind {
    /// What kind of [`FieldValue`] this field holds.
    #[must_use]
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Text | Self::Email | Self::Phone | Self::Select(..) => ValueKind::Text,
            Self::Date => ValueKind::Date,
            Self::File => ValueKind::File,
            Self::Checkbox | Self::YesNo => ValueKind::Flag,
            Self::MultiSelect(..) => ValueKind::List,
        }
    }

    #[must_use]
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::Select(options) | Self::MultiSelect(options) => options,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    Text,
    Flag,
    Date,
    File,
    List,
}

/// The value held by one form field, discriminated by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Date(Option<NaiveDate>),
    File(Option<PhotoFile>),
    List(Vec<String>),
}

impl FieldValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(..) => ValueKind::Text,
            Self::Flag(..) => ValueKind::Flag,
            Self::Date(..) => ValueKind::Date,
            Self::File(..) => ValueKind::File,
            Self::List(..) => ValueKind::List,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
    pub section: Section,
    pub required: bool,
}

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];

pub const DIVISIONS: &[&str] = &[
    "Call of Duty",
    "FIFA",
    "Clash of Clans",
    "Siege",
    "Valorant",
    "Counter Strike",
    "Apex",
    "Overwatch 2",
    "GTA/ RP",
    "Motorsports",
    "All of The Above",
];

pub const COMPETITIVE_STATUSES: &[&str] = &["yes", "no", "maybe"];
pub const YES_NO: &[&str] = &["no", "yes"];

pub const PLATFORMS: &[&str] = &["Twitch", "YouTube", "TikTok", "Kick", "Instagram", "X"];
pub const LANGUAGES: &[&str] = &["English", "Spanish", "French", "German", "Portuguese"];
pub const SOFTWARE: &[&str] = &["OBS", "Streamlabs", "Premiere Pro", "DaVinci Resolve"];

const fn field(
    name: FieldName,
    label: &'static str,
    kind: FieldKind,
    section: Section,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        section,
        required: false,
    }
}

const fn required(name: FieldName, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        section: Section::PersonalDetails,
        required: true,
    }
}

/// Every field of the form, ordered the same way as [`FieldName`].
#[rustfmt::skip]
pub const FIELDS: &[FieldSpec] = &[
    required(FieldName::FullName, "Full Name", FieldKind::Text),
    required(FieldName::Email, "Email", FieldKind::Email),
    required(FieldName::Phone, "Phone", FieldKind::Phone),
    field(FieldName::Gamertag, "Gamertag", FieldKind::Text, Section::PersonalDetails),
    field(FieldName::Discord, "Discord", FieldKind::Text, Section::PersonalDetails),
    field(FieldName::Gender, "Gender", FieldKind::Select(GENDERS), Section::PersonalDetails),
    field(FieldName::Dob, "Date of Birth", FieldKind::Date, Section::PersonalDetails),
    field(FieldName::Division, "Division", FieldKind::Select(DIVISIONS), Section::PersonalDetails),
    field(FieldName::Photo, "Upload a Photo", FieldKind::File, Section::PhotoUpload),
    field(FieldName::Competitive, "Competitive", FieldKind::Select(COMPETITIVE_STATUSES), Section::CompetitiveExperience),
    field(FieldName::Experience, "Competitive Experience", FieldKind::Text, Section::CompetitiveExperienceDetail),
    field(FieldName::IsCreator, "Content Creator", FieldKind::YesNo, Section::ContentCreation),
    field(FieldName::CreatorName, "Creator Name", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Timezone, "Timezone", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Platforms, "Platforms", FieldKind::MultiSelect(PLATFORMS), Section::CreatorProfile),
    field(FieldName::OtherPlatform, "Other Platform", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Schedule, "Schedule", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::ContentType, "Content Type", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Games, "Games", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Languages, "Languages", FieldKind::MultiSelect(LANGUAGES), Section::CreatorProfile),
    field(FieldName::OtherLanguage, "Other Language", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Internet, "Internet Quality", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Software, "Software", FieldKind::MultiSelect(SOFTWARE), Section::CreatorProfile),
    field(FieldName::OtherSoftware, "Other Software", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Equipment, "Equipment", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::YearsCreating, "Years Creating", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::SponsorList, "Sponsors List", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::Camera, "Camera", FieldKind::Checkbox, Section::CreatorProfile),
    field(FieldName::Sponsors, "Sponsored", FieldKind::Checkbox, Section::CreatorProfile),
    field(FieldName::Collabs, "Open to Collabs", FieldKind::Select(YES_NO), Section::CreatorProfile),
    field(FieldName::CreatorGoals, "Goals", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::CreatorNotes, "Notes", FieldKind::Text, Section::CreatorProfile),
    field(FieldName::NdaAgreement, "I agree to the NDA", FieldKind::Checkbox, Section::NonDisclosureAgreement),
];

/// Fields that must be filled out before the application can be submitted.
pub fn required_fields() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|v| v.required)
}

/// Fields that belong to the given section.
pub fn fields_in(section: Section) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |v| v.section == section)
}
