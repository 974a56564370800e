//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//!
//! > **This module contains data only, no policy, no validation.**
//! > Status strings are kept verbatim; interpreting them is the caller's job.

mod app_config;

pub use app_config::{AppConfig, SimulationConfig};
