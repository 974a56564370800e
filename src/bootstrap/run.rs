//! Headless onboarding run.
//!
//! Drives the real controller, resolver and screens against the simulated
//! device, acting on every presented screen the way a user would.

use anyhow::{bail, Context};
use chrono::Utc;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, info_span, warn, Instrument};

use sn_app::usecases::onboarding::{
    OnboardingFlowController, PresenterPort, ScreenDescriptor, ScreenFactory, ScreenKind,
};
use sn_core::config::AppConfig;
use sn_core::ports::UiQueuePort;
use sn_core::OnboardingProgress;
use sn_platform::ui_queue::main_ui_queue;

use super::wiring::wire_dependencies;

/// Give up after this many screens; a user who keeps refusing never finishes.
const MAX_SCREENS: usize = 16;

/// What a finished run went through.
#[derive(Debug)]
pub struct RunSummary {
    pub session_id: String,
    pub screens: Vec<ScreenKind>,
    pub progress: OnboardingProgress,
}

/// Hands every presented screen to the simulated user.
struct ChannelPresenter {
    screens: mpsc::UnboundedSender<ScreenDescriptor>,
}

impl PresenterPort for ChannelPresenter {
    fn show_exactly(&self, screen: ScreenDescriptor) {
        if self.screens.send(screen).is_err() {
            warn!("simulated user has gone away, screen dropped");
        }
    }
}

async fn act_on(screen: &ScreenDescriptor, config: &AppConfig) -> anyhow::Result<()> {
    match screen {
        ScreenDescriptor::StartNow(screen) => screen.accept().await,
        ScreenDescriptor::Postcode(screen) => {
            let postcode = &config.simulation.postcode;
            screen
                .submit(postcode)
                .await
                .with_context(|| format!("postcode {postcode:?} was not accepted"))?;
            Ok(())
        }
        ScreenDescriptor::Permissions(screen) => {
            screen.request_permissions().await;
            Ok(())
        }
        ScreenDescriptor::Recovery(screen) => {
            screen.open_settings().await?;
            screen.app_became_active();
            Ok(())
        }
    }
}

/// Run one onboarding session to completion.
///
/// Must be called from within a tokio runtime. Records the completion time
/// in the progress store once the flow finishes.
pub async fn run_onboarding(config: &AppConfig) -> anyhow::Result<RunSummary> {
    let (ui_queue, ui_loop) = main_ui_queue();
    let ui_queue: Arc<dyn UiQueuePort> = Arc::new(ui_queue);
    let deps = wire_dependencies(config, Arc::clone(&ui_queue))?;

    let (screen_tx, mut screens) = mpsc::unbounded_channel();
    let (done_tx, mut done) = oneshot::channel();
    let controller = OnboardingFlowController::new(
        Arc::clone(&deps.resolver),
        ScreenFactory::new(deps.screens.clone()),
        Arc::new(ChannelPresenter { screens: screen_tx }),
        ui_queue,
        Handle::current(),
        Box::new(move || {
            let _ = done_tx.send(());
        }),
    );

    let ui_task = tokio::spawn(ui_loop.run());
    let span = info_span!("onboarding.run", session = %controller.session_id());

    let shown = async {
        controller.start();
        let mut shown = Vec::new();
        loop {
            tokio::select! {
                biased;
                finished = &mut done => {
                    finished.context("onboarding flow dropped before completing")?;
                    break;
                }
                screen = screens.recv() => {
                    let screen = screen.context("presenter closed before the flow completed")?;
                    shown.push(screen.kind());
                    if shown.len() > MAX_SCREENS {
                        bail!("onboarding did not finish after {MAX_SCREENS} screens");
                    }
                    info!(screen = ?screen.kind(), "simulated user acting on screen");
                    act_on(&screen, config).await?;
                }
            }
        }
        Ok::<_, anyhow::Error>(shown)
    }
    .instrument(span)
    .await;

    ui_task.abort();
    let shown = shown?;

    let mut progress = deps.progress.get_progress().await?;
    progress.completed_at = Some(Utc::now());
    deps.progress
        .set_progress(&progress)
        .await
        .context("Failed to record onboarding completion")?;

    info!(screens = shown.len(), "onboarding finished");
    Ok(RunSummary {
        session_id: controller.session_id().to_string(),
        screens: shown,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = crate::bootstrap::config::default_config();
        config.progress_file = dir.path().join("progress.json");
        config
    }

    #[tokio::test]
    async fn fresh_install_walks_the_whole_flow() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let summary = run_onboarding(&config).await.unwrap();

        assert_eq!(
            summary.screens,
            vec![ScreenKind::StartNow, ScreenKind::Postcode, ScreenKind::Permissions]
        );
        assert!(summary.progress.allowed_data_sharing);
        assert_eq!(
            summary.progress.partial_postcode.as_ref().map(|p| p.as_str()),
            Some("SW1")
        );
        assert!(summary.progress.completed_at.is_some());
    }

    #[tokio::test]
    async fn second_run_finishes_without_any_screen() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        run_onboarding(&config).await.unwrap();

        let mut config = config;
        config.simulation.bluetooth_authorization = "allowed".to_string();
        config.simulation.notification_authorization = "allowed".to_string();
        config.simulation.radio_state = "on".to_string();
        let summary = run_onboarding(&config).await.unwrap();

        assert!(summary.screens.is_empty());
    }

    #[tokio::test]
    async fn radio_off_passes_through_recovery() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.simulation.bluetooth_authorization = "allowed".to_string();
        config.simulation.notification_authorization = "allowed".to_string();
        config.simulation.radio_state = "off".to_string();

        let summary = run_onboarding(&config).await.unwrap();

        assert_eq!(
            summary.screens,
            vec![ScreenKind::StartNow, ScreenKind::Postcode, ScreenKind::BluetoothOff]
        );
    }

    #[tokio::test]
    async fn stubborn_user_never_finishes() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.simulation.grant_on_request = false;

        let err = run_onboarding(&config).await.unwrap_err();

        assert!(err.to_string().contains("did not finish"));
    }

    #[tokio::test]
    async fn invalid_postcode_stops_the_run() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.simulation.postcode = "12".to_string();

        let err = run_onboarding(&config).await.unwrap_err();

        assert!(err.to_string().contains("was not accepted"));
    }
}
