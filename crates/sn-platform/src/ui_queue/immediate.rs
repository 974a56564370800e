use sn_core::ports::{UiQueuePort, UiTask};

/// Runs every task inline, on the caller's thread.
///
/// Deterministic stand-in for the UI context in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateUiQueue;

impl UiQueuePort for ImmediateUiQueue {
    fn dispatch(&self, task: UiTask) {
        task();
    }
}
