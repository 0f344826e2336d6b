//! Read-only projections over store state used by the portfolio pages.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{AppStore, StoreSnapshot};
use crate::domain::{Project, ProjectCategory, Testimonial, UnknownLabel};

/// Category tab on the portfolio page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Web,
    Mobile,
}

impl CategoryFilter {
    /// Exact category match; `both` projects only show under `All`.
    pub fn matches(self, category: ProjectCategory) -> bool {
        match self {
            Self::All => true,
            Self::Web => category == ProjectCategory::Web,
            Self::Mobile => category == ProjectCategory::Mobile,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "web" => Ok(Self::Web),
            "mobile" => Ok(Self::Mobile),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// Projects in `filter` whose title or description contains `search` (case-insensitive).
pub fn filter_projects<'a>(
    projects: &'a [Project],
    filter: CategoryFilter,
    search: &str,
) -> Vec<&'a Project> {
    let needle = search.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| filter.matches(p.category))
        .filter(|p| {
            needle.is_empty()
                || p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn featured_projects(snapshot: &StoreSnapshot) -> Vec<&Project> {
    snapshot.projects.data.iter().filter(|p| p.featured).collect()
}

pub fn featured_testimonials(snapshot: &StoreSnapshot) -> Vec<&Testimonial> {
    snapshot
        .testimonials
        .data
        .iter()
        .filter(|t| t.featured)
        .collect()
}

impl AppStore {
    /// Owned copy of the projects matching `filter` and `search`.
    pub fn projects_matching(&self, filter: CategoryFilter, search: &str) -> Vec<Project> {
        self.select(|s| {
            filter_projects(&s.projects.data, filter, search)
                .into_iter()
                .cloned()
                .collect()
        })
    }
}
