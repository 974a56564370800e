//! Channel-backed UI context.
//!
//! `MainUiQueue` handles are cheap to clone and can be used from any thread.
//! The single `UiLoop` drains them, one task at a time, on whichever task owns
//! it; that owner is the UI context.

use tokio::sync::mpsc;
use tracing::{trace, warn};

use sn_core::ports::{UiQueuePort, UiTask};

pub type UiTaskSender = mpsc::UnboundedSender<UiTask>;
pub type UiTaskReceiver = mpsc::UnboundedReceiver<UiTask>;

/// Create a connected queue/loop pair.
pub fn main_ui_queue() -> (MainUiQueue, UiLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MainUiQueue { tx }, UiLoop { rx })
}

#[derive(Clone)]
pub struct MainUiQueue {
    tx: UiTaskSender,
}

impl UiQueuePort for MainUiQueue {
    fn dispatch(&self, task: UiTask) {
        if self.tx.send(task).is_err() {
            warn!("ui loop has shut down, dropping task");
        }
    }
}

pub struct UiLoop {
    rx: UiTaskReceiver,
}

impl UiLoop {
    /// Run the next task, waiting for one if needed. `false` once every
    /// queue handle is gone.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                trace!("running ui task");
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks until every queue handle has been dropped.
    pub async fn run(mut self) {
        while self.run_next().await {}
    }

    /// Run whatever is queued right now without waiting. Returns the count.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn tasks_run_in_dispatch_order_on_the_loop() {
        let (queue, mut ui_loop) = main_ui_queue();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = Arc::clone(&order);
            queue.dispatch(Box::new(move || order.lock().unwrap().push(i)));
        }
        assert!(order.lock().unwrap().is_empty());

        assert_eq!(ui_loop.run_until_idle(), 3);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn dispatch_from_other_threads_reaches_the_loop() {
        let (queue, mut ui_loop) = main_ui_queue();
        let hits = Arc::new(Mutex::new(0));

        let worker = {
            let queue = queue.clone();
            let hits = Arc::clone(&hits);
            tokio::spawn(async move {
                queue.dispatch(Box::new(move || *hits.lock().unwrap() += 1));
            })
        };
        worker.await.unwrap();

        assert!(ui_loop.run_next().await);
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn run_stops_when_all_handles_are_dropped() {
        let (queue, ui_loop) = main_ui_queue();
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        queue.dispatch(Box::new(move || *counter.lock().unwrap() += 1));
        drop(queue);

        ui_loop.run().await;

        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn dispatch_after_loop_is_gone_is_dropped_quietly() {
        let (queue, ui_loop) = main_ui_queue();
        drop(ui_loop);

        queue.dispatch(Box::new(|| panic!("must not run")));
    }
}
