//! Portfolio projects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ResourceId;

/// Platform a project targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Both,
}

impl ProjectCategory {
    pub const ALL: [Self; 3] = [Self::Web, Self::Mobile, Self::Both];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = super::UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| super::UnknownLabel(s.to_string()))
    }
}

/// A showcased project as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Body of an admin create/update call: a [`Project`] without its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store: Option<String>,
    pub featured: bool,
    pub images: Vec<String>,
}

impl ProjectDraft {
    /// Attach a server-assigned id, yielding the stored form.
    pub fn into_project(self, id: ResourceId) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            tech_stack: self.tech_stack,
            live_demo: self.live_demo,
            github: self.github,
            play_store: self.play_store,
            app_store: self.app_store,
            featured: self.featured,
            images: self.images,
        }
    }
}
