//! Wire types for the Nova REST API.
//!
//! Roster rows deserialize straight into [`LocationRecord`]; the types here
//! cover the remaining endpoints.

use crate::domain::{LocationRecord, RecordId};
use serde::{Deserialize, Serialize};

/// What a search suggestion refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Practitioner,
    Specialty,
    Organization,
    #[default]
    #[serde(other)]
    Other,
}

impl SuggestionKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Practitioner => "practitioner",
            Self::Specialty => "specialty",
            Self::Organization => "organization",
            Self::Other => "other",
        }
    }
}

/// One entry from `GET api/search/suggestions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(alias = "label", alias = "text")]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: SuggestionKind,
    /// Secondary text such as an organization's city.
    #[serde(default)]
    pub detail: Option<String>,
}

/// One entry from `GET api/organizations/suggestions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSuggestion {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<OrganizationSuggestion> for Suggestion {
    fn from(organization: OrganizationSuggestion) -> Self {
        let detail = [organization.city.as_deref(), organization.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: Some(organization.id),
            name: organization.name,
            kind: SuggestionKind::Organization,
            detail: (!detail.is_empty()).then_some(detail),
        }
    }
}

/// One entry from `GET api/states`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateOption {
    #[serde(alias = "abbreviation")]
    pub code: String,
    pub name: String,
}

/// Body of `GET api/organizations/{id}/exists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct ExistsResponse {
    pub exists: bool,
}

/// Body of `GET api/practitioners/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PractitionerProfile {
    pub practitioner_id: RecordId,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub npi: Option<String>,
    pub gender: Option<String>,
    pub specialties: Vec<String>,
    pub languages: Vec<String>,
    pub locations: Vec<LocationRecord>,
}

impl PractitionerProfile {
    #[must_use]
    pub fn display_name(&self) -> String {
        LocationRecord {
            full_name: self.full_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            ..LocationRecord::default()
        }
        .display_name()
    }
}
