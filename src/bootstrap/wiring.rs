//! # Dependency Wiring
//!
//! Builds every port implementation the onboarding flow needs from an
//! [`AppConfig`]. This is the only place that knows which adapter backs
//! which port.

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use sn_app::usecases::onboarding::{FlowStateResolver, OnboardingResolver, ScreenDeps};
use sn_core::config::AppConfig;
use sn_core::ports::{OnboardingProgressPort, UiQueuePort};
use sn_infra::FileOnboardingProgressRepository;
use sn_platform::simulated::SimulatedDevice;

/// Directory created under the platform data dir.
const APP_DIR_NAME: &str = "sonar";

/// Everything the controller and its screens are built from.
pub struct OnboardingDeps {
    pub progress: Arc<dyn OnboardingProgressPort>,
    pub device: Arc<SimulatedDevice>,
    pub resolver: Arc<dyn FlowStateResolver>,
    pub screens: ScreenDeps,
}

/// Progress store at the configured file, or in the platform data
/// directory when the config leaves the path empty.
pub fn progress_repository(config: &AppConfig) -> anyhow::Result<FileOnboardingProgressRepository> {
    if !config.progress_file.as_os_str().is_empty() {
        return Ok(FileOnboardingProgressRepository::new(
            config.progress_file.clone(),
        ));
    }
    let data_dir = dirs::data_dir().context("platform has no data directory")?;
    Ok(FileOnboardingProgressRepository::with_defaults(
        data_dir.join(APP_DIR_NAME),
    ))
}

pub fn wire_dependencies(
    config: &AppConfig,
    ui_queue: Arc<dyn UiQueuePort>,
) -> anyhow::Result<OnboardingDeps> {
    let repository = progress_repository(config)?;
    info!(path = %repository.path().display(), "using onboarding progress file");
    let progress: Arc<dyn OnboardingProgressPort> = Arc::new(repository);

    let device = Arc::new(
        SimulatedDevice::from_config(&config.simulation)
            .context("Failed to build simulated device")?,
    );

    let resolver: Arc<dyn FlowStateResolver> = Arc::new(OnboardingResolver::new(
        Arc::clone(&progress),
        device.clone(),
        device.clone(),
    ));

    let screens = ScreenDeps {
        progress: Arc::clone(&progress),
        authorization: device.clone(),
        remote_notifications: device.clone(),
        nursery: device.clone(),
        settings: device.clone(),
        ui_queue,
    };

    Ok(OnboardingDeps {
        progress,
        device,
        resolver,
        screens,
    })
}
