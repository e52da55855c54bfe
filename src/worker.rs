use std::sync::mpsc;
use std::thread;

use crate::arrange::{Arrangement, Arranger};
use crate::error::{BoxpackError, PackError};
use crate::packing::PackableItem;

/// Handle for an arrangement running on a worker thread.
///
/// Interactive callers poll it from their own loop instead of blocking.
pub struct BackgroundTask<T> {
    receiver: mpsc::Receiver<T>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    /// Run `job` on a new thread and return a handle to its result
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may already be gone if the caller lost interest
            let _ = sender.send(job());
        });
        Self { receiver }
    }

    /// Non-blocking poll for result
    pub fn poll(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Block until the worker reports
    pub fn wait(self) -> Result<T, BoxpackError> {
        self.receiver
            .recv()
            .map_err(|_disconnected| BoxpackError::WorkerDisconnected)
    }
}

/// Arrange `items` on a worker thread
pub fn arrange_in_background(
    arranger: Arranger,
    items: Vec<PackableItem>,
) -> BackgroundTask<Result<Arrangement, PackError>> {
    BackgroundTask::spawn(move || arranger.arrange(items))
}
