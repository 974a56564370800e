//! In-process stand-ins for the OS state sources.

mod device;
mod progress;

pub use device::{DeviceFacts, SimulatedDevice};
pub use progress::InMemoryProgress;
