//! Payload for the feedback form.

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Body of `POST /api/suggestions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub suggestion: String,
}

impl Suggestion {
    /// Trims both fields. An empty suggestion is rejected before anything is
    /// sent; the name may be empty.
    pub fn new(name: &str, suggestion: &str) -> Result<Self, DashboardError> {
        let suggestion = suggestion.trim();
        if suggestion.is_empty() {
            return Err(DashboardError::EmptySuggestion);
        }

        Ok(Self {
            name: name.trim().to_string(),
            suggestion: suggestion.to_string(),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Editing,
    Submitting,
    /// Accepted; the thank-you notice is showing until the form resets.
    ThankYou,
}

/// How long the thank-you notice stays up before the form resets.
pub const THANK_YOU_SECONDS: f64 = 3.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_trimmed() {
        let suggestion = Suggestion::new("  Ada ", "\tMore stations please\n").unwrap();
        assert_eq!(suggestion.name, "Ada");
        assert_eq!(suggestion.suggestion, "More stations please");
        assert_eq!(
            suggestion.to_json().unwrap(),
            r#"{"name":"Ada","suggestion":"More stations please"}"#
        );
    }

    #[test]
    fn blank_suggestion_is_rejected() {
        assert_eq!(Suggestion::new("Ada", "   "), Err(DashboardError::EmptySuggestion));
        assert_eq!(Suggestion::new("", ""), Err(DashboardError::EmptySuggestion));
    }

    #[test]
    fn anonymous_suggestions_are_allowed() {
        assert_eq!(Suggestion::new("", "hi").unwrap().name, "");
    }
}
