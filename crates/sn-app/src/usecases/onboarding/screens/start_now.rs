use std::sync::Arc;

use tracing::info;

use sn_core::ports::OnboardingProgressPort;

use crate::usecases::onboarding::ContinuationCallback;

/// Consent screen shown for [`sn_core::FlowState::Initial`].
pub struct StartNowScreen {
    progress: Arc<dyn OnboardingProgressPort>,
    on_continue: ContinuationCallback,
}

impl StartNowScreen {
    pub fn new(progress: Arc<dyn OnboardingProgressPort>, on_continue: ContinuationCallback) -> Self {
        Self {
            progress,
            on_continue,
        }
    }

    /// User tapped "start now": record the consent and move on.
    pub async fn accept(&self) -> anyhow::Result<()> {
        let mut progress = self.progress.get_progress().await?;
        progress.allowed_data_sharing = true;
        self.progress.set_progress(&progress).await?;
        info!("data sharing accepted");

        (self.on_continue)();
        Ok(())
    }
}
