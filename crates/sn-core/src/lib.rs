//! # sn-core
//!
//! Core domain models and ports for the Sonar onboarding flow.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod onboarding;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use onboarding::{
    AuthorizationStatus, FlowState, OnboardingProgress, PartialPostcode, PostcodeError,
    RadioState, RequestId,
};
