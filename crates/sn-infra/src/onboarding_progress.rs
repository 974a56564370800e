//! File-based onboarding progress repository
//!
//! Persists the onboarding answers to a local JSON file in the application
//! data directory. Saves go through a sibling temp file that is renamed over
//! the real one, so a reader sees either the old record or the new one.

use anyhow::Context;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use sn_core::ports::OnboardingProgressPort;
use sn_core::OnboardingProgress;

pub const DEFAULT_PROGRESS_FILE: &str = "onboarding_progress.json";

pub struct FileOnboardingProgressRepository {
    progress_file_path: PathBuf,
}

impl FileOnboardingProgressRepository {
    /// Create repository with custom file path
    pub fn new(progress_file_path: PathBuf) -> Self {
        Self { progress_file_path }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            progress_file_path: base_dir.join(DEFAULT_PROGRESS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.progress_file_path
    }

    /// `<file name>.tmp` next to the progress file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .progress_file_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_PROGRESS_FILE));
        name.push(".tmp");
        self.progress_file_path.with_file_name(name)
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.progress_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl OnboardingProgressPort for FileOnboardingProgressRepository {
    async fn get_progress(&self) -> anyhow::Result<OnboardingProgress> {
        if !fs::try_exists(&self.progress_file_path).await? {
            return Ok(OnboardingProgress::default());
        }

        let content = fs::read_to_string(&self.progress_file_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to read progress file: {}",
                    self.progress_file_path.display()
                )
            })?;

        if content.trim().is_empty() {
            return Ok(OnboardingProgress::default());
        }

        let progress: OnboardingProgress = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse onboarding progress: {}", e))?;

        Ok(progress)
    }

    async fn set_progress(&self, progress: &OnboardingProgress) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(progress)
            .map_err(|e| anyhow::anyhow!("Failed to serialize onboarding progress: {}", e))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create progress file: {}", e))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write progress file: {}", e))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync progress file: {}", e))?;
        drop(file);

        fs::rename(&temp_path, &self.progress_file_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to replace progress file: {}",
                    self.progress_file_path.display()
                )
            })?;

        debug!(path = %self.progress_file_path.display(), "onboarding progress saved");
        Ok(())
    }

    async fn reset(&self) -> anyhow::Result<()> {
        if fs::try_exists(&self.progress_file_path).await? {
            fs::remove_file(&self.progress_file_path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sn_core::PartialPostcode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_progress_returns_default_when_file_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileOnboardingProgressRepository::new(temp_dir.path().join("missing.json"));

        let progress = repo.get_progress().await.unwrap();

        assert_eq!(progress, OnboardingProgress::default());
    }

    #[tokio::test]
    async fn test_set_progress_and_get_progress() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileOnboardingProgressRepository::with_defaults(temp_dir.path().join("nested"));

        let original = OnboardingProgress {
            allowed_data_sharing: true,
            partial_postcode: Some(PartialPostcode::parse("B1").unwrap()),
            completed_at: None,
        };
        repo.set_progress(&original).await.unwrap();

        assert!(repo.path().ends_with(DEFAULT_PROGRESS_FILE));
        assert_eq!(repo.get_progress().await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.json");
        std::fs::write(&path, "  \n").unwrap();
        let repo = FileOnboardingProgressRepository::new(path);

        assert_eq!(repo.get_progress().await.unwrap(), OnboardingProgress::default());
    }

    #[tokio::test]
    async fn test_invalid_postcode_in_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.json");
        std::fs::write(
            &path,
            r#"{"allowed_data_sharing": true, "partial_postcode": "???"}"#,
        )
        .unwrap();
        let repo = FileOnboardingProgressRepository::new(path);

        let err = repo.get_progress().await.unwrap_err();

        assert!(err.to_string().contains("Failed to parse onboarding progress"));
    }

    #[tokio::test]
    async fn test_set_progress_replaces_file_without_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileOnboardingProgressRepository::new(temp_dir.path().join("progress.json"));
        repo.set_progress(&OnboardingProgress {
            allowed_data_sharing: true,
            partial_postcode: Some(PartialPostcode::parse("SW1A").unwrap()),
            completed_at: None,
        })
        .await
        .unwrap();

        let shorter = OnboardingProgress {
            allowed_data_sharing: true,
            ..Default::default()
        };
        repo.set_progress(&shorter).await.unwrap();

        assert_eq!(repo.get_progress().await.unwrap(), shorter);
        assert!(!repo.temp_path().exists());
        let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_interrupted_save_keeps_previous_progress() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileOnboardingProgressRepository::new(temp_dir.path().join("progress.json"));
        let saved = OnboardingProgress {
            allowed_data_sharing: true,
            partial_postcode: Some(PartialPostcode::parse("E1").unwrap()),
            completed_at: None,
        };
        repo.set_progress(&saved).await.unwrap();

        // A save that died mid-write leaves only a truncated temp file behind.
        std::fs::write(repo.temp_path(), r#"{"allowed_data_sh"#).unwrap();

        assert_eq!(repo.get_progress().await.unwrap(), saved);

        // The next save overwrites the stale temp file.
        repo.set_progress(&OnboardingProgress::default()).await.unwrap();
        assert_eq!(repo.get_progress().await.unwrap(), OnboardingProgress::default());
        assert!(!repo.temp_path().exists());
    }

    #[tokio::test]
    async fn test_reset_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileOnboardingProgressRepository::new(temp_dir.path().join("progress.json"));
        repo.set_progress(&OnboardingProgress {
            allowed_data_sharing: true,
            ..Default::default()
        })
        .await
        .unwrap();

        repo.reset().await.unwrap();

        assert!(!repo.path().exists());
        assert_eq!(repo.get_progress().await.unwrap(), OnboardingProgress::default());
        // Resetting twice is fine.
        repo.reset().await.unwrap();
    }
}
