//! Filter criteria snapshot.
//!
//! A [`FilterCriteria`] value is produced by the filter inputs and handed to
//! the filter engine as an immutable snapshot each time any field changes.

use serde::{Deserialize, Serialize};

/// Text filter fields that are edited as free text and debounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    City,
    State,
    Specialty,
    ProviderType,
}

impl TextField {
    /// Parses the short names used by the terminal host (`name`, `city`, `state`,
    /// `specialty`, `type`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "city" => Some(Self::City),
            "state" => Some(Self::State),
            "specialty" => Some(Self::Specialty),
            "type" | "provider_type" | "providerType" => Some(Self::ProviderType),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::City => "City",
            Self::State => "State",
            Self::Specialty => "Specialty",
            Self::ProviderType => "Provider type",
        }
    }
}

/// User-specified predicate parameters.
///
/// String fields are case-insensitive substring matches; an empty or
/// whitespace-only string disables that predicate. `specialty` and
/// `provider_type` are carried for the filter inputs but records have no data
/// to match them against, so they never exclude anything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub name: String,
    pub city: String,
    pub state: String,
    pub specialty: String,
    pub provider_type: String,
    pub accepting_new_patients: bool,
    pub include_inactive: bool,
}

impl FilterCriteria {
    /// Returns the current value of a text field.
    #[must_use]
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::City => &self.city,
            TextField::State => &self.state,
            TextField::Specialty => &self.specialty,
            TextField::ProviderType => &self.provider_type,
        }
    }

    /// Returns a copy with one text field replaced.
    #[must_use]
    pub fn with_text(mut self, field: TextField, value: impl Into<String>) -> Self {
        let slot = match field {
            TextField::Name => &mut self.name,
            TextField::City => &mut self.city,
            TextField::State => &mut self.state,
            TextField::Specialty => &mut self.specialty,
            TextField::ProviderType => &mut self.provider_type,
        };
        *slot = value.into();
        self
    }

    /// Number of text predicates that currently constrain the result.
    #[must_use]
    pub fn active_text_filters(&self) -> usize {
        [&self.name, &self.city, &self.state]
            .into_iter()
            .filter(|value| !value.trim().is_empty())
            .count()
    }
}
