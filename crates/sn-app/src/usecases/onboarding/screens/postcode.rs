use std::sync::Arc;

use tracing::{debug, info};

use sn_core::ports::OnboardingProgressPort;
use sn_core::{PartialPostcode, PostcodeError};

use crate::usecases::onboarding::ContinuationCallback;

#[derive(Debug, thiserror::Error)]
pub enum PostcodeSubmitError {
    #[error("invalid postcode: {0}")]
    Invalid(#[from] PostcodeError),
    #[error("failed to store postcode: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Postcode entry screen shown for [`sn_core::FlowState::PartialPostcode`].
pub struct PostcodeScreen {
    progress: Arc<dyn OnboardingProgressPort>,
    on_continue: ContinuationCallback,
}

impl PostcodeScreen {
    pub fn new(progress: Arc<dyn OnboardingProgressPort>, on_continue: ContinuationCallback) -> Self {
        Self {
            progress,
            on_continue,
        }
    }

    /// Validate and store the outward code. Invalid input leaves the screen in place.
    pub async fn submit(&self, input: &str) -> Result<PartialPostcode, PostcodeSubmitError> {
        let postcode = PartialPostcode::parse(input).inspect_err(|err| {
            debug!(error = %err, "rejected postcode input");
        })?;

        let mut progress = self
            .progress
            .get_progress()
            .await
            .map_err(PostcodeSubmitError::Storage)?;
        progress.partial_postcode = Some(postcode.clone());
        self.progress
            .set_progress(&progress)
            .await
            .map_err(PostcodeSubmitError::Storage)?;
        info!(postcode = %postcode, "partial postcode stored");

        (self.on_continue)();
        Ok(postcode)
    }
}
