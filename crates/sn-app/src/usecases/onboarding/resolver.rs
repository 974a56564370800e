//! Flow state resolution.
//!
//! Reads every state source in a fixed order and stops at the first fact
//! that still needs the user's attention. A failing source never escapes as
//! an error; it is mapped to the state whose screen can re-establish the fact.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use sn_core::ports::{AuthorizationPort, BluetoothNurseryPort, OnboardingProgressPort};
use sn_core::{AuthorizationStatus, FlowState, RadioState};

/// Source of fresh flow states for the controller.
#[async_trait]
pub trait FlowStateResolver: Send + Sync {
    /// Always yields a state. Failures are folded into a fallback state.
    async fn resolve(&self) -> FlowState;
}

/// Resolver backed by persistence, OS authorization and the Bluetooth nursery.
pub struct OnboardingResolver {
    progress: Arc<dyn OnboardingProgressPort>,
    authorization: Arc<dyn AuthorizationPort>,
    nursery: Arc<dyn BluetoothNurseryPort>,
}

impl OnboardingResolver {
    pub fn new(
        progress: Arc<dyn OnboardingProgressPort>,
        authorization: Arc<dyn AuthorizationPort>,
        nursery: Arc<dyn BluetoothNurseryPort>,
    ) -> Self {
        Self {
            progress,
            authorization,
            nursery,
        }
    }

    async fn progress_state(&self) -> Option<FlowState> {
        let progress = match self.progress.get_progress().await {
            Ok(progress) => progress,
            Err(err) => {
                warn!(error = %err, "onboarding progress unavailable, restarting flow");
                return Some(FlowState::Initial);
            }
        };

        if !progress.allowed_data_sharing {
            return Some(FlowState::Initial);
        }
        if !progress.has_postcode() {
            return Some(FlowState::PartialPostcode);
        }
        None
    }

    async fn permission_state(&self) -> Option<FlowState> {
        match self.authorization.bluetooth() {
            AuthorizationStatus::NotDetermined => return Some(FlowState::Permissions),
            AuthorizationStatus::Denied => return Some(FlowState::BluetoothDenied),
            AuthorizationStatus::Allowed => {}
        }

        match self.authorization.notifications().await {
            Ok(AuthorizationStatus::Allowed) => None,
            Ok(AuthorizationStatus::Denied) => Some(FlowState::NotificationsDenied),
            Ok(AuthorizationStatus::NotDetermined) => Some(FlowState::Permissions),
            Err(err) => {
                warn!(error = %err, "notification authorization query failed");
                Some(FlowState::Permissions)
            }
        }
    }

    async fn radio_state(&self) -> Option<FlowState> {
        match self.nursery.radio_state().await {
            Ok(RadioState::PoweredOn) => None,
            Ok(RadioState::PoweredOff) | Ok(RadioState::Unknown) => Some(FlowState::BluetoothOff),
            Ok(RadioState::Unsupported) => {
                warn!("bluetooth radio unsupported on this device, finishing onboarding anyway");
                None
            }
            Err(err) => {
                warn!(error = %err, "bluetooth radio state query failed");
                Some(FlowState::BluetoothOff)
            }
        }
    }
}

#[async_trait]
impl FlowStateResolver for OnboardingResolver {
    async fn resolve(&self) -> FlowState {
        let state = match self.progress_state().await {
            Some(state) => state,
            None => match self.permission_state().await {
                Some(state) => state,
                None => self.radio_state().await.unwrap_or(FlowState::Done),
            },
        };
        debug!(%state, "resolved onboarding flow state");
        state
    }
}
