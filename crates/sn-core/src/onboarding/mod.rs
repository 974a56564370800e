//! Onboarding domain models
//!
//! This module defines the core domain models for the onboarding flow: the
//! flow state classification, the persisted progress facts, and the status
//! values reported by the OS-facing state sources.

mod postcode;
mod progress;
mod state;
mod status;

pub use postcode::{PartialPostcode, PostcodeError};
pub use progress::OnboardingProgress;
pub use state::{FlowState, RequestId};
pub use status::{AuthorizationStatus, RadioState};
