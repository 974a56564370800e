//! Port interfaces for the application layer
//!
//! Ports define the contract between the onboarding use cases and the
//! platform or infrastructure implementations. The flow controller never
//! talks to an OS subsystem directly; it only sees these traits.
//!
//! ## Port Placement Guidelines
//!
//! A port lives in `sn-core/ports` when it represents a state source or
//! capability that is implemented outside the application layer. Ports that
//! only the application layer implements (presentation, resolution) live
//! next to their use case in `sn-app`.

pub mod authorization;
pub mod bluetooth;
pub mod onboarding;
pub mod remote_notification;
pub mod system_settings;
pub mod ui_queue;

pub use authorization::AuthorizationPort;
pub use bluetooth::BluetoothNurseryPort;
pub use onboarding::OnboardingProgressPort;
pub use remote_notification::RemoteNotificationPort;
pub use system_settings::SystemSettingsPort;
pub use ui_queue::{UiQueuePort, UiTask};
