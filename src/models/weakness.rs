//! Weakness taxonomy records

use super::null_as_default;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weaknesses a program accepts reports for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weaknesses {
    #[serde(default)]
    pub data: Vec<Weakness>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weakness {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub attributes: WeaknessAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaknessAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Taxonomy reference such as `cwe-79`
    #[serde(deserialize_with = "null_as_default")]
    pub external_id: String,
}

impl Weaknesses {
    /// Look up a weakness by its external taxonomy id, ignoring case
    pub fn by_external_id(&self, external_id: &str) -> Option<&Weakness> {
        self.data
            .iter()
            .find(|w| w.attributes.external_id.eq_ignore_ascii_case(external_id))
    }
}
