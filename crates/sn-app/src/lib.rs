//! Sonar Onboarding Application Layer
//!
//! This crate contains the onboarding use cases: flow state resolution, the
//! screen factory and screens, the flow controller, and the self-diagnosis
//! question screen.

pub mod usecases;

pub use usecases::onboarding::{
    FlowStateResolver, OnboardingFlowController, OnboardingResolver, PresenterPort,
    ScreenDescriptor, ScreenFactory, ScreenKind,
};
pub use usecases::self_diagnosis::QuestionScreen;
