//! Infrastructure adapters for the onboarding flow.

pub mod onboarding_progress;

pub use onboarding_progress::FileOnboardingProgressRepository;
