pub mod onboarding;
pub mod self_diagnosis;
