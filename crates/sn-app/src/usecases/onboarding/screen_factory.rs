//! Screen factory.
//!
//! Total mapping from every non-terminal [`FlowState`] to a freshly built
//! screen. Building a screen has no side effects.

use std::sync::Arc;

use sn_core::ports::{
    AuthorizationPort, BluetoothNurseryPort, OnboardingProgressPort, RemoteNotificationPort,
    SystemSettingsPort, UiQueuePort,
};
use sn_core::FlowState;

use super::screens::{
    PermissionsScreen, PostcodeScreen, RecoveryReason, RecoveryScreen, StartNowScreen,
};
use super::ContinuationCallback;

/// Dependencies handed to screens (non-Builder, just parameter grouping).
///
/// All dependencies are required - no defaults, no optional fields.
#[derive(Clone)]
pub struct ScreenDeps {
    pub progress: Arc<dyn OnboardingProgressPort>,
    pub authorization: Arc<dyn AuthorizationPort>,
    pub remote_notifications: Arc<dyn RemoteNotificationPort>,
    pub nursery: Arc<dyn BluetoothNurseryPort>,
    pub settings: Arc<dyn SystemSettingsPort>,
    pub ui_queue: Arc<dyn UiQueuePort>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScreenFactoryError {
    #[error("flow state {0} is terminal and has no screen")]
    TerminalState(FlowState),
}

/// Classification of the screen on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    StartNow,
    Postcode,
    Permissions,
    BluetoothDenied,
    BluetoothOff,
    NotificationsDenied,
}

impl ScreenKind {
    /// `None` only for [`FlowState::Done`].
    pub fn for_state(state: FlowState) -> Option<Self> {
        match state {
            FlowState::Initial => Some(Self::StartNow),
            FlowState::PartialPostcode => Some(Self::Postcode),
            FlowState::Permissions => Some(Self::Permissions),
            FlowState::BluetoothDenied => Some(Self::BluetoothDenied),
            FlowState::BluetoothOff => Some(Self::BluetoothOff),
            FlowState::NotificationsDenied => Some(Self::NotificationsDenied),
            FlowState::Done => None,
        }
    }
}

/// A constructed screen together with everything it needs.
pub enum ScreenDescriptor {
    StartNow(StartNowScreen),
    Postcode(PostcodeScreen),
    Permissions(PermissionsScreen),
    Recovery(RecoveryScreen),
}

impl ScreenDescriptor {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Self::StartNow(_) => ScreenKind::StartNow,
            Self::Postcode(_) => ScreenKind::Postcode,
            Self::Permissions(_) => ScreenKind::Permissions,
            Self::Recovery(screen) => match screen.reason() {
                RecoveryReason::BluetoothDenied => ScreenKind::BluetoothDenied,
                RecoveryReason::BluetoothOff => ScreenKind::BluetoothOff,
                RecoveryReason::NotificationsDenied => ScreenKind::NotificationsDenied,
            },
        }
    }
}

impl std::fmt::Debug for ScreenDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ScreenDescriptor").field(&self.kind()).finish()
    }
}

pub struct ScreenFactory {
    deps: ScreenDeps,
}

impl ScreenFactory {
    pub fn new(deps: ScreenDeps) -> Self {
        Self { deps }
    }

    pub fn build(
        &self,
        state: FlowState,
        on_continue: ContinuationCallback,
    ) -> Result<ScreenDescriptor, ScreenFactoryError> {
        let deps = &self.deps;
        let screen = match state {
            FlowState::Initial => ScreenDescriptor::StartNow(StartNowScreen::new(
                Arc::clone(&deps.progress),
                on_continue,
            )),
            FlowState::PartialPostcode => ScreenDescriptor::Postcode(PostcodeScreen::new(
                Arc::clone(&deps.progress),
                on_continue,
            )),
            FlowState::Permissions => ScreenDescriptor::Permissions(PermissionsScreen::new(
                Arc::clone(&deps.authorization),
                Arc::clone(&deps.remote_notifications),
                Arc::clone(&deps.nursery),
                Arc::clone(&deps.ui_queue),
                on_continue,
            )),
            FlowState::BluetoothDenied
            | FlowState::BluetoothOff
            | FlowState::NotificationsDenied => {
                let reason = RecoveryReason::for_state(state)
                    .ok_or(ScreenFactoryError::TerminalState(state))?;
                ScreenDescriptor::Recovery(RecoveryScreen::new(
                    reason,
                    Arc::clone(&deps.settings),
                    Arc::clone(&deps.ui_queue),
                    on_continue,
                ))
            }
            FlowState::Done => return Err(ScreenFactoryError::TerminalState(state)),
        };
        Ok(screen)
    }
}
