use obscura_schema::registry::{fields_in, FieldSpec, Section};
use obscura_schema::types::Application;
use obscura_settings::MinorConsent;
use std::collections::BTreeSet;

/// Sections shown regardless of what has been filled in.
pub const ALWAYS_VISIBLE: &[Section] = &[
    Section::PersonalDetails,
    Section::PhotoUpload,
    Section::CompetitiveExperience,
    Section::ContentCreation,
    Section::NonDisclosureAgreement,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout<'a> {
    /// Replaces the entire form once the applicant turned out
    /// to be a minor.
    MinorConsent(&'a MinorConsent),
    Form(VisibleSections),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSections(BTreeSet<Section>);

impl VisibleSections {
    #[must_use]
    pub fn contains(&self, section: Section) -> bool {
        self.0.contains(&section)
    }

    /// Visible sections in the order they appear on the form.
    pub fn iter(&self) -> impl Iterator<Item = Section> + '_ {
        self.0.iter().copied()
    }

    /// Fields of every visible section in the order they
    /// appear on the form.
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.iter().flat_map(fields_in)
    }
}

/// Works out what the applicant should currently see.
///
/// Hiding a section never touches the application, so values of
/// hidden fields stay around until they are shown again.
#[must_use]
pub fn layout<'a>(
    application: &Application,
    minor_branch_fired: bool,
    consent: &'a MinorConsent,
) -> Layout<'a> {
    if minor_branch_fired {
        return Layout::MinorConsent(consent);
    }

    let mut sections = ALWAYS_VISIBLE.iter().copied().collect::<BTreeSet<_>>();
    if application.competitive.has_experience() {
        sections.insert(Section::CompetitiveExperienceDetail);
    }
    if application.is_creator {
        sections.insert(Section::CreatorProfile);
    }

    Layout::Form(VisibleSections(sections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use obscura_schema::registry::FieldName;
    use obscura_schema::types::CompetitiveStatus;

    fn visible(application: &Application) -> VisibleSections {
        let consent = MinorConsent::default();
        match layout(application, false, &consent) {
            Layout::Form(sections) => sections,
            Layout::MinorConsent(..) => panic!("expected the form layout"),
        }
    }

    #[test]
    fn should_show_base_sections_on_blank_form() {
        let sections = visible(&Application::default());
        assert_eq!(sections.iter().collect::<Vec<_>>(), ALWAYS_VISIBLE.to_vec());
    }

    #[test]
    fn should_show_experience_detail_for_yes_or_maybe() {
        let mut application = Application::default();
        for (status, shown) in [
            (CompetitiveStatus::Yes, true),
            (CompetitiveStatus::Maybe, true),
            (CompetitiveStatus::No, false),
        ] {
            application.competitive = status;
            assert_eq!(
                visible(&application).contains(Section::CompetitiveExperienceDetail),
                shown
            );
        }
    }

    #[test]
    fn should_show_creator_profile_for_creators() {
        let mut application = Application::default();
        application.is_creator = true;
        application.creator.creator_name = "JaneLive".into();

        let sections = visible(&application);
        assert!(sections.contains(Section::CreatorProfile));
        assert!(sections.fields().any(|v| v.name == FieldName::Platforms));

        application.is_creator = false;
        assert!(!visible(&application).contains(Section::CreatorProfile));
        assert_eq!(application.creator.creator_name, "JaneLive");
    }

    #[test]
    fn should_replace_form_once_minor_branch_fired() {
        let consent = MinorConsent::default();
        let application = Application::default();

        let Layout::MinorConsent(shown) = layout(&application, true, &consent) else {
            panic!("expected the minor consent layout");
        };
        assert_eq!(shown.recruitment_path, "/minor-recruitment");
    }

    #[test]
    fn should_be_deterministic() {
        let mut application = Application::default();
        application.competitive = CompetitiveStatus::Yes;
        assert_eq!(visible(&application), visible(&application));
    }
}
