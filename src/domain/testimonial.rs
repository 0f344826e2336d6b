//! Client testimonials.

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Rating assumed when the backend omits one.
pub const DEFAULT_RATING: u8 = 5;

fn default_rating() -> u8 {
    DEFAULT_RATING
}

/// A client quote shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub client_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub company: String,
    pub content: String,
    /// 1 to 5 stars.
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Body of an admin create/update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialDraft {
    pub client_name: String,
    pub position: String,
    pub company: String,
    pub content: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub featured: bool,
}

impl TestimonialDraft {
    pub fn into_testimonial(self, id: ResourceId) -> Testimonial {
        Testimonial {
            id,
            client_name: self.client_name,
            position: self.position,
            company: self.company,
            content: self.content,
            rating: self.rating,
            project: self.project,
            avatar: self.avatar,
            featured: self.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_defaults_to_five() {
        let json = r#"{"id":3,"clientName":"Jane","content":"Great work"}"#;
        let t: Testimonial = serde_json::from_str(json).unwrap();

        assert_eq!(t.rating, DEFAULT_RATING);
        assert_eq!(t.client_name, "Jane");
        assert!(t.position.is_empty());
        assert_eq!(t.avatar, None);
    }
}
