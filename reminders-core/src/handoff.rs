//! One-shot handoff from a completion callback to a waiting caller.
//!
//! Store operations that report their result through a callback hand that
//! callback a [`Completion`]; the caller awaits [`wait_for`] exactly once.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::timeout;

use crate::error::{RemindersError, RemindersResult};

/// The sending half of a handoff. Consumed by [`Completion::complete`], so a
/// callback can signal at most once.
#[derive(Debug)]
pub struct Completion<T> {
    tx: oneshot::Sender<T>,
}

impl<T> Completion<T> {
    pub fn complete(self, value: T) {
        // The waiter may have timed out and gone away
        let _ = self.tx.send(value);
    }
}

/// Start a callback-style operation and wait for its completion.
///
/// `start` receives the [`Completion`] and is expected to arrange for it to be
/// completed. With `limit` set, waiting longer than that is a `Timeout` error;
/// without it, this waits until the completion fires.
///
/// A timeout does not cancel whatever `start` set running. Blocking workers
/// cannot be aborted, so the CLI treats `Timeout` as fatal and shuts the
/// runtime down in the background instead of joining them.
pub async fn wait_for<T, F>(limit: Option<Duration>, start: F) -> RemindersResult<T>
where
    F: FnOnce(Completion<T>),
{
    let (tx, rx) = oneshot::channel();
    start(Completion { tx });

    let received = match limit {
        Some(limit) => timeout(limit, rx)
            .await
            .map_err(|_| RemindersError::Timeout(limit.as_secs()))?,
        None => rx.await,
    };

    received.map_err(|_| RemindersError::Store("completion handler was dropped".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_value_completed_inline() {
        let value = wait_for(None, |done| done.complete(42)).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn returns_value_completed_from_worker() {
        let value = wait_for(None, |done| {
            tokio::task::spawn_blocking(move || done.complete("granted"));
        })
        .await
        .unwrap();
        assert_eq!(value, "granted");
    }

    #[tokio::test]
    async fn dropped_completion_is_an_error() {
        let result: RemindersResult<bool> = wait_for(None, drop).await;
        assert!(matches!(result, Err(RemindersError::Store(_))));
    }

    #[tokio::test]
    async fn times_out_when_limit_elapses() {
        let mut pending = None;
        let result: RemindersResult<bool> =
            wait_for(Some(Duration::from_millis(10)), |done| pending = Some(done)).await;
        assert!(matches!(result, Err(RemindersError::Timeout(_))));
        drop(pending);
    }

    #[tokio::test]
    async fn timeout_does_not_wait_for_busy_worker() {
        let started = std::time::Instant::now();
        let result: RemindersResult<bool> = wait_for(Some(Duration::from_millis(10)), |done| {
            tokio::task::spawn_blocking(move || {
                std::thread::sleep(Duration::from_millis(500));
                done.complete(true);
            });
        })
        .await;

        assert!(matches!(result, Err(RemindersError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_millis(400));
    }
}
