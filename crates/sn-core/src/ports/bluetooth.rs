use async_trait::async_trait;

use crate::onboarding::RadioState;

/// Owner of the Bluetooth stack ("nursery").
///
/// Starting the stack is what makes the OS show its Bluetooth permission
/// prompt, so `start` belongs to the permissions screen, never to resolution.
#[async_trait]
pub trait BluetoothNurseryPort: Send + Sync {
    /// Waits until the radio state is known and returns it.
    async fn radio_state(&self) -> anyhow::Result<RadioState>;

    async fn start(&self) -> anyhow::Result<()>;
}
