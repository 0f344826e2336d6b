//! Contact inquiries and their fixed option labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A label that is not one of the fixed options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown option: {0:?}")]
pub struct UnknownLabel(pub String);

/// Declares a closed set of human-readable labels that travel on the wire verbatim.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s)
                    .ok_or_else(|| UnknownLabel(s.to_string()))
            }
        }
    };
}

labelled_enum! {
    /// Kind of engagement the inquiry is about.
    ProjectType {
        MobileApp => "Mobile App Development",
        WebApplication => "Web Application",
        MobileAndWeb => "Mobile + Web App",
        UiUxDesign => "UI/UX Design",
        Consultation => "Consultation",
        Other => "Other",
    }
}

labelled_enum! {
    BudgetRange {
        Under10k => "Under $10,000",
        From10kTo50k => "$10,000 - $50,000",
        From50kTo100k => "$50,000 - $100,000",
        Over100k => "$100,000+",
        Flexible => "Flexible",
        Confidential => "Confidential",
    }
}

labelled_enum! {
    Timeline {
        Asap => "ASAP",
        OneMonth => "1 Month",
        TwoToThreeMonths => "2-3 Months",
        ThreeToSixMonths => "3-6 Months",
        OverSixMonths => "6+ Months",
        Flexible => "Flexible",
    }
}

/// Validated inquiry posted to `/contact`. Never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    pub message: String,
}
