use std::sync::Arc;

use tracing::{debug, info};

use sn_core::ports::{SystemSettingsPort, UiQueuePort};
use sn_core::FlowState;

use crate::usecases::onboarding::ContinuationCallback;

/// Why the user ended up on a recovery screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryReason {
    BluetoothDenied,
    BluetoothOff,
    NotificationsDenied,
}

impl RecoveryReason {
    pub fn for_state(state: FlowState) -> Option<Self> {
        match state {
            FlowState::BluetoothDenied => Some(Self::BluetoothDenied),
            FlowState::BluetoothOff => Some(Self::BluetoothOff),
            FlowState::NotificationsDenied => Some(Self::NotificationsDenied),
            _ => None,
        }
    }
}

/// Screen telling the user how to fix a refused permission or a powered-off radio.
///
/// The fix happens outside the app, so the only way forward is to come back
/// and re-evaluate.
pub struct RecoveryScreen {
    reason: RecoveryReason,
    settings: Arc<dyn SystemSettingsPort>,
    ui_queue: Arc<dyn UiQueuePort>,
    on_continue: ContinuationCallback,
}

impl RecoveryScreen {
    pub fn new(
        reason: RecoveryReason,
        settings: Arc<dyn SystemSettingsPort>,
        ui_queue: Arc<dyn UiQueuePort>,
        on_continue: ContinuationCallback,
    ) -> Self {
        Self {
            reason,
            settings,
            ui_queue,
            on_continue,
        }
    }

    pub fn reason(&self) -> RecoveryReason {
        self.reason
    }

    pub async fn open_settings(&self) -> anyhow::Result<()> {
        info!(reason = ?self.reason, "opening system settings");
        self.settings.open_settings().await
    }

    /// The app returned to the foreground, possibly from the settings app.
    pub fn app_became_active(&self) {
        debug!(reason = ?self.reason, "app active again, re-evaluating");
        self.continue_on_ui_queue();
    }

    /// User asked to check again without leaving the app.
    pub fn retry(&self) {
        self.continue_on_ui_queue();
    }

    fn continue_on_ui_queue(&self) {
        let on_continue = Arc::clone(&self.on_continue);
        self.ui_queue.dispatch(Box::new(move || on_continue()));
    }
}
