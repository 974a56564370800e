//! Simulated phone: permission grants, the Bluetooth radio and the settings app.
//!
//! Prompts are answered according to `grant_on_request`. Visiting the
//! settings app with `grant_on_request` set fixes every refused permission
//! and switches the radio on, like a cooperative user would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, info};

use sn_core::config::SimulationConfig;
use sn_core::ports::{
    AuthorizationPort, BluetoothNurseryPort, RemoteNotificationPort, SystemSettingsPort,
};
use sn_core::{AuthorizationStatus, RadioState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceFacts {
    pub bluetooth: AuthorizationStatus,
    pub notifications: AuthorizationStatus,
    pub radio: RadioState,
    pub grant_on_request: bool,
}

pub struct SimulatedDevice {
    facts: Mutex<DeviceFacts>,
    notification_delay: Duration,
    settings_opened: AtomicUsize,
}

impl SimulatedDevice {
    pub fn new(facts: DeviceFacts) -> Self {
        Self {
            facts: Mutex::new(facts),
            notification_delay: Duration::ZERO,
            settings_opened: AtomicUsize::new(0),
        }
    }

    /// Interpret the raw simulation section of the config.
    pub fn from_config(config: &SimulationConfig) -> anyhow::Result<Self> {
        let facts = DeviceFacts {
            bluetooth: config
                .bluetooth_authorization
                .parse()
                .context("invalid simulation.bluetooth_authorization")?,
            notifications: config
                .notification_authorization
                .parse()
                .context("invalid simulation.notification_authorization")?,
            radio: config
                .radio_state
                .parse()
                .context("invalid simulation.radio_state")?,
            grant_on_request: config.grant_on_request,
        };
        Ok(Self::new(facts)
            .with_notification_delay(Duration::from_millis(config.resolve_delay_ms)))
    }

    /// Latency added to every notification status query.
    pub fn with_notification_delay(mut self, delay: Duration) -> Self {
        self.notification_delay = delay;
        self
    }

    pub fn facts(&self) -> DeviceFacts {
        self.lock().clone()
    }

    pub fn update(&self, change: impl FnOnce(&mut DeviceFacts)) {
        change(&mut *self.lock());
    }

    pub fn settings_opened(&self) -> usize {
        self.settings_opened.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, DeviceFacts> {
        self.facts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn prompt_answer(grant: bool) -> AuthorizationStatus {
        if grant {
            AuthorizationStatus::Allowed
        } else {
            AuthorizationStatus::Denied
        }
    }
}

#[async_trait]
impl AuthorizationPort for SimulatedDevice {
    fn bluetooth(&self) -> AuthorizationStatus {
        self.lock().bluetooth
    }

    async fn notifications(&self) -> anyhow::Result<AuthorizationStatus> {
        if !self.notification_delay.is_zero() {
            tokio::time::sleep(self.notification_delay).await;
        }
        Ok(self.lock().notifications)
    }
}

#[async_trait]
impl BluetoothNurseryPort for SimulatedDevice {
    async fn radio_state(&self) -> anyhow::Result<RadioState> {
        Ok(self.lock().radio)
    }

    async fn start(&self) -> anyhow::Result<()> {
        let mut facts = self.lock();
        if facts.bluetooth == AuthorizationStatus::NotDetermined {
            facts.bluetooth = Self::prompt_answer(facts.grant_on_request);
            info!(bluetooth = %facts.bluetooth, "bluetooth permission prompt answered");
        }
        if facts.bluetooth == AuthorizationStatus::Allowed && facts.radio == RadioState::Unknown {
            facts.radio = RadioState::PoweredOn;
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteNotificationPort for SimulatedDevice {
    async fn request_authorization(&self) -> anyhow::Result<bool> {
        let mut facts = self.lock();
        if facts.notifications == AuthorizationStatus::NotDetermined {
            facts.notifications = Self::prompt_answer(facts.grant_on_request);
            info!(notifications = %facts.notifications, "notification permission prompt answered");
        }
        Ok(facts.notifications == AuthorizationStatus::Allowed)
    }
}

#[async_trait]
impl SystemSettingsPort for SimulatedDevice {
    async fn open_settings(&self) -> anyhow::Result<()> {
        self.settings_opened.fetch_add(1, Ordering::SeqCst);
        let mut facts = self.lock();
        if !facts.grant_on_request {
            debug!("user left settings unchanged");
            return Ok(());
        }
        if facts.bluetooth == AuthorizationStatus::Denied {
            facts.bluetooth = AuthorizationStatus::Allowed;
        }
        if facts.notifications == AuthorizationStatus::Denied {
            facts.notifications = AuthorizationStatus::Allowed;
        }
        if facts.radio == RadioState::PoweredOff {
            facts.radio = RadioState::PoweredOn;
        }
        info!(facts = ?*facts, "user fixed permissions in settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_answers_bluetooth_prompt_once() {
        let device = SimulatedDevice::new(DeviceFacts {
            grant_on_request: true,
            ..Default::default()
        });

        device.start().await.unwrap();
        assert_eq!(device.bluetooth(), AuthorizationStatus::Allowed);
        assert_eq!(device.radio_state().await.unwrap(), RadioState::PoweredOn);

        device.update(|facts| facts.bluetooth = AuthorizationStatus::Denied);
        device.start().await.unwrap();
        assert_eq!(device.bluetooth(), AuthorizationStatus::Denied);
    }

    #[tokio::test]
    async fn settings_visit_fixes_refusals_for_cooperative_user() {
        let device = SimulatedDevice::new(DeviceFacts {
            bluetooth: AuthorizationStatus::Denied,
            notifications: AuthorizationStatus::Denied,
            radio: RadioState::PoweredOff,
            grant_on_request: true,
        });

        device.open_settings().await.unwrap();

        let facts = device.facts();
        assert_eq!(facts.bluetooth, AuthorizationStatus::Allowed);
        assert_eq!(facts.notifications, AuthorizationStatus::Allowed);
        assert_eq!(facts.radio, RadioState::PoweredOn);
        assert_eq!(device.settings_opened(), 1);
    }

    #[test]
    fn from_config_parses_status_strings() {
        let config = SimulationConfig {
            bluetooth_authorization: "allowed".into(),
            notification_authorization: "".into(),
            radio_state: "off".into(),
            grant_on_request: false,
            resolve_delay_ms: 10,
            postcode: String::new(),
        };

        let device = SimulatedDevice::from_config(&config).unwrap();

        assert_eq!(
            device.facts(),
            DeviceFacts {
                bluetooth: AuthorizationStatus::Allowed,
                notifications: AuthorizationStatus::NotDetermined,
                radio: RadioState::PoweredOff,
                grant_on_request: false,
            }
        );
        assert_eq!(device.notification_delay, Duration::from_millis(10));
    }

    #[test]
    fn from_config_rejects_unknown_status() {
        let config = SimulationConfig {
            radio_state: "sideways".into(),
            ..Default::default()
        };

        let err = SimulatedDevice::from_config(&config).err().unwrap();

        assert!(err.to_string().contains("simulation.radio_state"));
    }
}
