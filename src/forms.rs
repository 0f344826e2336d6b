//! Form-layer validation.
//!
//! Forms hold raw user input as strings and turn it into typed payloads. All
//! problems are collected before returning, so a form can mark every bad field
//! at once. Nothing here touches the network.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    BudgetRange, ContactSubmission, Credentials, DEFAULT_RATING, ProjectCategory, ProjectDraft,
    ProjectType, Registration, TestimonialDraft, Timeline,
};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    InvalidFormat,
    InvalidChoice,
    OutOfRange,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Required => "is required",
            Self::InvalidFormat => "is not in a valid format",
            Self::InvalidChoice => "is not one of the available options",
            Self::OutOfRange => "is out of range",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the field (`projectType`, not `project_type`).
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

/// Every problem found in one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", render(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn render(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.kind))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = FieldErrorKind> + 'a {
        self.0.iter().filter(move |e| e.field == field).map(|e| e.kind)
    }

    pub fn count(&self, kind: FieldErrorKind) -> usize {
        self.0.iter().filter(|e| e.kind == kind).count()
    }

    fn push(&mut self, field: &'static str, kind: FieldErrorKind) {
        self.0.push(FieldError { field, kind });
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }

    fn required(&mut self, field: &'static str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, FieldErrorKind::Required);
        }
        value.to_string()
    }

    fn email(&mut self, field: &'static str, value: &str) -> String {
        let value = self.required(field, value);
        if !value.is_empty() && !is_valid_email(&value) {
            self.push(field, FieldErrorKind::InvalidFormat);
        }
        value
    }

    /// Parse a required choice. `None` means an error was recorded.
    fn choice<T: std::str::FromStr>(&mut self, field: &'static str, value: &str) -> Option<T> {
        if self.required(field, value).is_empty() {
            return None;
        }
        self.optional_choice(field, value).flatten()
    }

    /// `Some(None)` for an empty field, `None` when the label is unknown.
    fn optional_choice<T: std::str::FromStr>(
        &mut self,
        field: &'static str,
        value: &str,
    ) -> Option<Option<T>> {
        let Some(value) = non_empty(value) else {
            return Some(None);
        };
        if let Ok(parsed) = value.parse() {
            Some(Some(parsed))
        } else {
            self.push(field, FieldErrorKind::InvalidChoice);
            None
        }
    }

    fn link(&mut self, field: &'static str, value: &str) -> Option<String> {
        let value = non_empty(value)?;
        match url::Url::parse(&value) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => Some(value),
            _ => {
                self.push(field, FieldErrorKind::InvalidFormat);
                None
            }
        }
    }
}

/// `local@domain.tld` with no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// =============================================================================
// Contact
// =============================================================================

/// Raw contact page input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields, the email format and the option labels.
    pub fn validate(&self) -> Result<ContactSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = errors.required("name", &self.name);
        let email = errors.email("email", &self.email);
        let project_type = errors.choice::<ProjectType>("projectType", &self.project_type);
        let budget = errors.optional_choice::<BudgetRange>("budget", &self.budget);
        let timeline = errors.optional_choice::<Timeline>("timeline", &self.timeline);
        let message = errors.required("message", &self.message);

        match (project_type, budget, timeline) {
            (Some(project_type), Some(budget), Some(timeline)) if errors.is_empty() => {
                Ok(ContactSubmission {
                    name,
                    email,
                    phone: non_empty(&self.phone),
                    company: non_empty(&self.company),
                    project_type,
                    budget,
                    timeline,
                    message,
                })
            }
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Admin authentication
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let email = errors.email("email", &self.email);
        if self.password.is_empty() {
            errors.push("password", FieldErrorKind::Required);
        }
        errors.finish(|| Credentials {
            email,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = errors.required("name", &self.name);
        let email = errors.email("email", &self.email);
        if self.password.is_empty() {
            errors.push("password", FieldErrorKind::Required);
        }
        errors.finish(|| Registration {
            name,
            email,
            password: self.password.clone(),
        })
    }
}

// =============================================================================
// Admin content
// =============================================================================

/// Raw admin project editor input. List fields are comma-separated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tech_stack: String,
    pub live_demo: String,
    pub github: String,
    pub play_store: String,
    pub app_store: String,
    pub featured: bool,
    pub images: String,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<ProjectDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = errors.required("title", &self.title);
        let description = errors.required("description", &self.description);
        let category = errors.choice::<ProjectCategory>("category", &self.category);
        let live_demo = errors.link("liveDemo", &self.live_demo);
        let github = errors.link("github", &self.github);
        let play_store = errors.link("playStore", &self.play_store);
        let app_store = errors.link("appStore", &self.app_store);

        let images = split_list(&self.images);
        for image in &images {
            if errors.link("images", image).is_none() {
                break;
            }
        }

        match category {
            Some(category) if errors.is_empty() => Ok(ProjectDraft {
                title,
                description,
                category,
                tech_stack: split_list(&self.tech_stack),
                live_demo,
                github,
                play_store,
                app_store,
                featured: self.featured,
                images,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw admin testimonial editor input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialForm {
    pub client_name: String,
    pub position: String,
    pub company: String,
    pub content: String,
    /// Empty means the default rating.
    pub rating: String,
    pub project: String,
    pub avatar: String,
    pub featured: bool,
}

impl TestimonialForm {
    pub fn validate(&self) -> Result<TestimonialDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let client_name = errors.required("clientName", &self.client_name);
        let position = errors.required("position", &self.position);
        let company = errors.required("company", &self.company);
        let content = errors.required("content", &self.content);
        let avatar = errors.link("avatar", &self.avatar);

        let rating = match non_empty(&self.rating) {
            None => DEFAULT_RATING,
            Some(raw) => match raw.parse::<u8>() {
                Ok(r @ 1..=5) => r,
                Ok(_) => {
                    errors.push("rating", FieldErrorKind::OutOfRange);
                    DEFAULT_RATING
                }
                Err(_) => {
                    errors.push("rating", FieldErrorKind::InvalidFormat);
                    DEFAULT_RATING
                }
            },
        };

        errors.finish(|| TestimonialDraft {
            client_name,
            position,
            company,
            content,
            rating,
            project: non_empty(&self.project),
            avatar,
            featured: self.featured,
        })
    }
}
