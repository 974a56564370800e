use async_trait::async_trait;

use crate::onboarding::AuthorizationStatus;

/// Current grant status of the app-level permissions the flow depends on.
#[async_trait]
pub trait AuthorizationPort: Send + Sync {
    /// Bluetooth authorization is known synchronously on every platform we target.
    fn bluetooth(&self) -> AuthorizationStatus;

    /// Notification authorization has to be fetched from the OS.
    async fn notifications(&self) -> anyhow::Result<AuthorizationStatus>;
}
