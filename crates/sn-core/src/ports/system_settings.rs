use anyhow::Result;

#[async_trait::async_trait]
pub trait SystemSettingsPort: Send + Sync {
    async fn open_settings(&self) -> Result<()>;
}
