use super::ScreenDescriptor;

/// Display slot driven by the flow controller.
///
/// Implementations own exactly one live screen. `show_exactly` replaces it;
/// dropping the previous screen is the implementation's business.
pub trait PresenterPort: Send + Sync {
    fn show_exactly(&self, screen: ScreenDescriptor);
}
