use bevy::prelude::*;
use constants::portfolio::MSG_STATS_FAILED;
use serde::{Deserialize, Serialize};

use crate::engine::core::subscription::Subscription;
use crate::net::error::NetError;

/// The few public profile fields the popup shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub login: String,
    pub avatar_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub public_repos: u32,
    pub html_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileFetchState {
    #[default]
    NotRequested,
    Loading,
    Loaded(ProfileSummary),
    Error(String),
}

/// Profile popup attached to the floating badge.
///
/// Every opening issues a fresh request tagged with a generation number;
/// responses carrying an older generation are dropped.
#[derive(Resource, Debug, Default)]
pub struct ProfilePopup {
    open: bool,
    generation: u64,
    state: ProfileFetchState,
    outside_click: Option<Subscription>,
}

impl ProfilePopup {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> &ProfileFetchState {
        &self.state
    }

    /// Open the popup and start loading. Returns the generation the caller
    /// must tag its request with.
    pub fn open(&mut self, frame: u32) -> u64 {
        self.open = true;
        self.generation += 1;
        self.state = ProfileFetchState::Loading;
        self.outside_click = Some(Subscription::attach_deferred("profile-outside-click", frame));
        self.generation
    }

    pub fn close(&mut self) {
        self.open = false;
        self.outside_click = None;
    }

    /// Returns the new request generation when this opened the popup.
    pub fn toggle(&mut self, frame: u32) -> Option<u64> {
        if self.open {
            self.close();
            None
        } else {
            Some(self.open(frame))
        }
    }

    /// Apply a response. Returns false when it was stale and discarded.
    pub fn resolve(
        &mut self,
        generation: u64,
        result: Result<ProfileSummary, NetError>,
    ) -> bool {
        if !self.open || generation != self.generation {
            return false;
        }

        self.state = match result {
            Ok(summary) => ProfileFetchState::Loaded(summary),
            Err(_) => ProfileFetchState::Error(MSG_STATS_FAILED.to_string()),
        };
        true
    }

    /// Whether a pointer press this frame should close the popup.
    pub fn closes_on_press(&self, frame: u32, inside_popup: bool) -> bool {
        if inside_popup {
            return false;
        }
        self.outside_click
            .as_ref()
            .is_some_and(|subscription| subscription.is_live(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ProfileSummary {
        ProfileSummary {
            login: "octo".into(),
            avatar_url: "https://example.com/a.png".into(),
            name: Some("Octo Cat".into()),
            bio: None,
            public_repos: 12,
            html_url: "https://github.com/octo".into(),
        }
    }

    #[test]
    fn open_enters_loading_then_loaded() {
        let mut popup = ProfilePopup::default();
        assert_eq!(popup.state(), &ProfileFetchState::NotRequested);

        let generation = popup.open(10);
        assert_eq!(popup.state(), &ProfileFetchState::Loading);
        assert!(popup.resolve(generation, Ok(summary())));
        assert_eq!(popup.state(), &ProfileFetchState::Loaded(summary()));
    }

    #[test]
    fn any_failure_shows_the_fallback_message() {
        let mut popup = ProfilePopup::default();
        let generation = popup.open(0);
        assert!(popup.resolve(generation, Err(NetError::Status(404))));
        assert_eq!(
            popup.state(),
            &ProfileFetchState::Error("Could not load stats.".into())
        );
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut popup = ProfilePopup::default();
        let first = popup.toggle(1).expect("opened");
        assert_eq!(popup.toggle(2), None);
        let second = popup.toggle(3).expect("reopened");
        assert_ne!(first, second);

        assert!(!popup.resolve(first, Ok(summary())));
        assert_eq!(popup.state(), &ProfileFetchState::Loading);
        assert!(popup.resolve(second, Err(NetError::Status(500))));
    }

    #[test]
    fn response_after_close_is_ignored() {
        let mut popup = ProfilePopup::default();
        let generation = popup.open(1);
        popup.close();
        assert!(!popup.resolve(generation, Ok(summary())));
    }

    #[test]
    fn opening_press_does_not_close() {
        let mut popup = ProfilePopup::default();
        popup.open(50);
        assert!(!popup.closes_on_press(50, false));
        assert!(popup.closes_on_press(51, false));
        assert!(!popup.closes_on_press(51, true));
        popup.close();
        assert!(!popup.closes_on_press(52, false));
    }

    #[test]
    fn summary_decodes_from_api_json() {
        let json = r#"{
            "login": "octo",
            "id": 1,
            "avatar_url": "https://example.com/a.png",
            "name": null,
            "public_repos": 3,
            "followers": 9,
            "html_url": "https://github.com/octo"
        }"#;
        let decoded: ProfileSummary = serde_json::from_str(json).expect("decodes");
        assert_eq!(decoded.name, None);
        assert_eq!(decoded.bio, None);
        assert_eq!(decoded.public_repos, 3);
    }
}
