//! Onboarding use cases
//!
//! Resolution of the current flow state, the mapping from state to screen,
//! and the controller that keeps the displayed screen in step with the most
//! recent resolution.

mod controller;
mod presenter;
mod resolver;
mod screen_factory;
pub mod screens;

pub use controller::{CompletionHandler, OnboardingFlowController};
pub use presenter::PresenterPort;
pub use resolver::{FlowStateResolver, OnboardingResolver};
pub use screen_factory::{ScreenDeps, ScreenDescriptor, ScreenFactory, ScreenFactoryError, ScreenKind};

use std::sync::Arc;

/// Callback a screen fires once its step is complete.
///
/// Holds only a weak reference to the controller; firing it after the flow
/// was dropped does nothing.
pub type ContinuationCallback = Arc<dyn Fn() + Send + Sync>;
