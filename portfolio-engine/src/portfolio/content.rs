use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnerProfile {
    pub name: String,
    pub headline: String,
    pub introduction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillEntry {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub live_demo_url: Option<String>,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organisation {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtracurricularEntry {
    pub logo: String,
    pub title: String,
    pub org: Organisation,
    pub date: String,
    pub badge: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteLinks {
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub photography_url: Option<String>,
}

/// Third-party identifiers used by the profile badge and the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Integrations {
    pub profile_user: String,
    pub email_service_id: String,
    pub email_template_id: String,
    pub email_public_key: String,
    pub chat_number: String,
}

/// Everything the portfolio page shows, as a Bevy asset. Mirrors the JSON
/// structure of `site.manifest.json` exactly.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource, PartialEq)]
pub struct SiteManifest {
    pub owner: OwnerProfile,
    #[serde(default)]
    pub typewriter: Vec<String>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub extracurriculars: Vec<ExtracurricularEntry>,
    #[serde(default)]
    pub links: SiteLinks,
    pub integrations: Integrations,
}

impl SiteManifest {
    pub fn profile_url(&self, endpoint_base: &str) -> String {
        format!(
            "{}/{}",
            endpoint_base.trim_end_matches('/'),
            self.integrations.profile_user
        )
    }
}
