mod immediate;
mod main_loop;

pub use immediate::ImmediateUiQueue;
pub use main_loop::{main_ui_queue, MainUiQueue, UiLoop};
