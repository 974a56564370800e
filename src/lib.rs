//! Sonar onboarding runner.
//!
//! Wires the onboarding crates together and drives a headless session
//! against the simulated device.

pub mod bootstrap;
