use chrono::{DateTime, Utc};

use super::PartialPostcode;

/// Persisted onboarding facts.
///
/// Answers the user has given so far. The OS-owned facts (permissions,
/// radio state) are never stored here; they are queried fresh each time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OnboardingProgress {
    /// Whether the user accepted data sharing on the start screen
    pub allowed_data_sharing: bool,
    /// Outward part of the user's postcode
    pub partial_postcode: Option<PartialPostcode>,
    /// When the flow last reached its terminal state
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for OnboardingProgress {
    fn default() -> Self {
        Self {
            allowed_data_sharing: false,
            partial_postcode: None,
            completed_at: None,
        }
    }
}

impl OnboardingProgress {
    pub fn has_postcode(&self) -> bool {
        self.partial_postcode.is_some()
    }
}
