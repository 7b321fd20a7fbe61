use bevy::prelude::*;
use constants::portfolio::ACTIVE_SECTION_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Portfolio sections in page order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    #[default]
    Home,
    About,
    Skills,
    Projects,
    Extracurricular,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Extracurricular,
        SectionId::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Extracurricular => "extracurricular",
            SectionId::Contact => "contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Extracurricular => "Extracurricular",
            SectionId::Contact => "Contact",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        SectionId::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// One bullet of the side navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Section(SectionId),
    /// Opens the configured resume URL instead of scrolling.
    Resume,
}

impl NavEntry {
    /// Bullets top to bottom. Resume sits between Projects and Extracurricular.
    pub const ORDER: [NavEntry; 7] = [
        NavEntry::Section(SectionId::Home),
        NavEntry::Section(SectionId::About),
        NavEntry::Section(SectionId::Skills),
        NavEntry::Section(SectionId::Projects),
        NavEntry::Resume,
        NavEntry::Section(SectionId::Extracurricular),
        NavEntry::Section(SectionId::Contact),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NavEntry::Section(section) => section.label(),
            NavEntry::Resume => "Resume",
        }
    }
}

/// Currently highlighted section.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSection {
    pub current: SectionId,
}

/// Request to scroll a section's top edge to the viewport top.
#[derive(Event, Debug, Clone, Copy)]
pub struct NavigateToSection {
    pub section: SectionId,
}

/// The last section, in page order, whose top edge sits above
/// `threshold × viewport_height`. Falls back to Home.
///
/// `section_tops` holds each section's top edge relative to the viewport top
/// in logical pixels; negative values are scrolled past.
pub fn active_section(section_tops: &[(SectionId, f32)], viewport_height: f32) -> SectionId {
    active_section_with_threshold(section_tops, viewport_height, ACTIVE_SECTION_THRESHOLD)
}

pub fn active_section_with_threshold(
    section_tops: &[(SectionId, f32)],
    viewport_height: f32,
    threshold: f32,
) -> SectionId {
    let line = viewport_height * threshold;
    let mut ordered = section_tops.to_vec();
    ordered.sort_by_key(|(section, _)| *section);

    ordered
        .into_iter()
        .filter(|(_, top)| *top < line)
        .map(|(section, _)| section)
        .last()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Section tops for a page of 900 px sections scrolled by `offset`.
    fn page_at(offset: f32) -> Vec<(SectionId, f32)> {
        SectionId::ALL
            .iter()
            .enumerate()
            .map(|(i, section)| (*section, i as f32 * 900.0 - offset))
            .collect()
    }

    #[test]
    fn top_of_page_is_home() {
        assert_eq!(active_section(&page_at(0.0), 800.0), SectionId::Home);
    }

    #[test]
    fn section_becomes_active_once_above_the_third_line() {
        // Skills starts at 1800; the line is at 264 px.
        assert_eq!(active_section(&page_at(1500.0), 800.0), SectionId::About);
        assert_eq!(active_section(&page_at(1540.0), 800.0), SectionId::Skills);
    }

    #[test]
    fn bottom_of_page_is_contact() {
        assert_eq!(active_section(&page_at(4600.0), 800.0), SectionId::Contact);
    }

    #[test]
    fn nothing_above_the_line_falls_back_to_home() {
        let tops = vec![(SectionId::About, 500.0), (SectionId::Contact, 900.0)];
        assert_eq!(active_section(&tops, 800.0), SectionId::Home);
        assert_eq!(active_section(&[], 800.0), SectionId::Home);
    }

    #[test]
    fn declared_order_wins_over_input_order() {
        let tops = vec![
            (SectionId::Projects, -10.0),
            (SectionId::Home, -2000.0),
            (SectionId::Skills, -900.0),
        ];
        assert_eq!(active_section(&tops, 800.0), SectionId::Projects);
    }

    #[test]
    fn section_names_round_trip() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_string(section.as_str()), Some(section));
        }
        assert_eq!(SectionId::from_string(" Contact "), Some(SectionId::Contact));
        assert_eq!(SectionId::from_string("blog"), None);
    }

    #[test]
    fn resume_sits_between_projects_and_extracurricular() {
        let resume = NavEntry::ORDER
            .iter()
            .position(|entry| *entry == NavEntry::Resume);
        assert_eq!(resume, Some(4));
        assert_eq!(NavEntry::ORDER[3], NavEntry::Section(SectionId::Projects));
        assert_eq!(
            NavEntry::ORDER[5],
            NavEntry::Section(SectionId::Extracurricular)
        );
    }
}
