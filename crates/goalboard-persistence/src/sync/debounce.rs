use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A single cancellable delayed job.
///
/// Scheduling aborts whatever job is pending and starts a fresh timer, so a
/// burst of changes produces one run a full window after the last change.
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct SaveScheduler {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SaveScheduler {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn schedule<F>(&mut self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            job.await;
        }));
    }

    /// Abort the pending job. Returns true if it had not finished yet.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let unfinished = !handle.is_finished();
                handle.abort();
                unfinished
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for SaveScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
