use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use sn_core::ports::OnboardingProgressPort;
use sn_core::OnboardingProgress;

/// Onboarding progress kept in memory only.
#[derive(Default)]
pub struct InMemoryProgress {
    progress: Mutex<OnboardingProgress>,
}

impl InMemoryProgress {
    pub fn new(progress: OnboardingProgress) -> Self {
        Self {
            progress: Mutex::new(progress),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, OnboardingProgress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OnboardingProgressPort for InMemoryProgress {
    async fn get_progress(&self) -> anyhow::Result<OnboardingProgress> {
        Ok(self.lock().clone())
    }

    async fn set_progress(&self, progress: &OnboardingProgress) -> anyhow::Result<()> {
        *self.lock() = progress.clone();
        Ok(())
    }

    async fn reset(&self) -> anyhow::Result<()> {
        *self.lock() = OnboardingProgress::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reset_forgets_everything() {
        let store = InMemoryProgress::new(OnboardingProgress {
            allowed_data_sharing: true,
            ..Default::default()
        });

        store.reset().await.unwrap();

        assert_eq!(store.get_progress().await.unwrap(), OnboardingProgress::default());
    }
}
