//! Member naming conventions used for structural capability matching.

use serde::{Deserialize, Serialize};

use crate::errors::{AssertionError, Diagnostic};

fn config_error(code: &str, message: impl Into<String>) -> AssertionError {
    AssertionError::Config(Diagnostic::new(code, message))
}

/// Names under which the resolver looks for each capability role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberConventions {
    /// Zero-argument method returning a fresh iterator object.
    #[serde(default = "MemberConventions::default_acquire")]
    pub acquire: String,
    /// Iterator property exposing the element at the current position.
    #[serde(default = "MemberConventions::default_current")]
    pub current: String,
    /// Iterator method moving forward and reporting whether an element is available.
    #[serde(default = "MemberConventions::default_advance")]
    pub advance: String,
    /// Optional iterator method invoked when the iterator is released.
    #[serde(default = "MemberConventions::default_release")]
    pub release: String,
    /// Contract property reporting the element count.
    #[serde(default = "MemberConventions::default_length")]
    pub length: String,
    /// Contract method reading the element at a position.
    #[serde(default = "MemberConventions::default_positional")]
    pub positional: String,
}

impl MemberConventions {
    fn default_acquire() -> String {
        "iter".to_string()
    }

    fn default_current() -> String {
        "current".to_string()
    }

    fn default_advance() -> String {
        "move_next".to_string()
    }

    fn default_release() -> String {
        "release".to_string()
    }

    fn default_length() -> String {
        "len".to_string()
    }

    fn default_positional() -> String {
        "get".to_string()
    }

    /// Parses a JSON document, filling omitted roles with their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, AssertionError> {
        serde_json::from_str(json).map_err(|err| {
            config_error(
                "conventions-parse",
                format!("invalid member conventions document: {err}"),
            )
        })
    }

    /// Serialises the conventions as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, AssertionError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            config_error(
                "conventions-serialize",
                format!("failed to serialise member conventions: {err}"),
            )
        })
    }

    /// Returns whether `name` is one of the three iteration roles.
    pub fn is_iteration_member(&self, name: &str) -> bool {
        name == self.acquire || name == self.current || name == self.advance
    }
}

impl Default for MemberConventions {
    fn default() -> Self {
        Self {
            acquire: Self::default_acquire(),
            current: Self::default_current(),
            advance: Self::default_advance(),
            release: Self::default_release(),
            length: Self::default_length(),
            positional: Self::default_positional(),
        }
    }
}
