//! Program records

use super::null_as_default;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full program record as returned by the program detail endpoint
///
/// List responses use the same shape without relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramDetail {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub attributes: ProgramAttributes,
    #[serde(default)]
    pub relationships: Relationships,
}

/// Program attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub handle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_picture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub submission_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub triage_active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    pub started_accepting_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_reports_for_user: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_valid_reports_for_user: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub bounty_earned_for_user: f64,
    pub last_invitation_accepted_at_for_user: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub bookmarked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allows_bounty_splitting: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub offers_bounties: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationships {
    #[serde(default)]
    pub structured_scopes: StructuredScopes,
}

/// Assets in scope for a program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredScopes {
    #[serde(default)]
    pub data: Vec<ScopeData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeData {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub attributes: ScopeAttributes,
}

/// One asset definition with its eligibility and severity metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub asset_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub asset_identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eligible_for_bounty: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub eligible_for_submission: bool,
    pub instruction: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub max_severity: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidentiality_requirement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_requirement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_requirement: Option<String>,
}

impl ScopeAttributes {
    /// Check if a report against this asset can earn a bounty
    pub fn is_bounty_eligible(&self) -> bool {
        self.eligible_for_submission && self.eligible_for_bounty
    }
}

impl ProgramDetail {
    /// Scopes accepting submissions
    pub fn in_scope(&self) -> impl Iterator<Item = &ScopeData> {
        self.relationships
            .structured_scopes
            .data
            .iter()
            .filter(|scope| scope.attributes.eligible_for_submission)
    }
}

/// Body of one page of the program list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramList {
    #[serde(default)]
    pub data: Vec<ProgramDetail>,
}
