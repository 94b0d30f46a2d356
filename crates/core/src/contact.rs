//! Contact details volunteered by the user.

use serde::{Deserialize, Serialize};

/// Contact fields recovered from the conversation.
///
/// Recomputed from scratch on every request; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactInfo {
    /// No field was found.
    pub fn is_empty(&self) -> bool {
        !self.has_any()
    }

    /// At least one field was found.
    pub fn has_any(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.email.is_some()
            || self.phone.is_some()
    }

    /// First and last name joined, if any name part is known.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }

    /// Whether the fields demanded by `requirement` are all present.
    pub fn satisfies(&self, requirement: ContactRequirement) -> bool {
        let reachable = self.email.is_some() && self.phone.is_some();
        match requirement {
            ContactRequirement::EmailAndPhone => reachable,
            ContactRequirement::NameEmailPhone => reachable && self.first_name.is_some(),
            ContactRequirement::FullNameEmailPhone => {
                reachable && self.first_name.is_some() && self.last_name.is_some()
            }
        }
    }
}

/// Which fields must be present before contact info counts as collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRequirement {
    EmailAndPhone,
    #[default]
    NameEmailPhone,
    FullNameEmailPhone,
}
