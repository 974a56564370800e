use async_trait::async_trait;

#[async_trait]
pub trait RemoteNotificationPort: Send + Sync {
    /// Ask the OS for notification permission. Returns whether it was granted.
    async fn request_authorization(&self) -> anyhow::Result<bool>;
}
