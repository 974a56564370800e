//! UI-affinity execution context port
//!
//! Every presentation mutation runs through this port. Production code hands
//! tasks to the single UI context; tests substitute a queue that runs them
//! inline.

/// Unit of work to run on the UI context.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

pub trait UiQueuePort: Send + Sync {
    /// Schedule `task` on the UI context. Tasks run in dispatch order.
    fn dispatch(&self, task: UiTask);
}
