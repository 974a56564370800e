//! Onboarding progress port
//!
//! This port defines the contract for persisting and retrieving the answers
//! the user gave during onboarding. Implementations are provided by the
//! infrastructure layer (e.g., file-based storage).

use async_trait::async_trait;

use crate::onboarding::OnboardingProgress;

#[async_trait]
pub trait OnboardingProgressPort: Send + Sync {
    /// Get current onboarding progress
    async fn get_progress(&self) -> anyhow::Result<OnboardingProgress>;

    /// Replace the stored onboarding progress
    async fn set_progress(&self, progress: &OnboardingProgress) -> anyhow::Result<()>;

    /// Forget every answer (for testing or re-onboarding)
    async fn reset(&self) -> anyhow::Result<()>;
}
