use thiserror::Error;

/// Error returned by [`WatcherHandle`](crate::watcher::WatcherHandle) submissions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Intake queue is full (try again later or use async `submit`).
    #[error("watcher queue full")]
    Full,

    /// Watcher channel is closed (bridge shut down).
    #[error("watcher channel closed")]
    Closed,
}
