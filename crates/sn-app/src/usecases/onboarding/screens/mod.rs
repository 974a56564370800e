//! Onboarding screens.
//!
//! Headless view models. Each one is built fresh by the screen factory for a
//! single flow state and does nothing until the user acts on it. Permission
//! prompts, persistence writes and the like happen inside those actions,
//! never at construction.

mod permissions;
mod postcode;
mod recovery;
mod start_now;

pub use permissions::PermissionsScreen;
pub use postcode::{PostcodeScreen, PostcodeSubmitError};
pub use recovery::{RecoveryReason, RecoveryScreen};
pub use start_now::StartNowScreen;
