//! Platform adapters for the onboarding flow.
//!
//! - [`ui_queue`]: UI-affinity execution contexts
//! - [`simulated`]: in-process stand-ins for the OS state sources, used by
//!   the headless runner and by tests

pub mod simulated;
pub mod ui_queue;
