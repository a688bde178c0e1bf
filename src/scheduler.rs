//! Fan-out/fan-in of collection work.
//!
//! [`fan_out`] spawns one tokio task per work item, without any concurrency limit, and
//! collects results from a channel until exactly as many results as dispatched items have
//! arrived. Results come back in completion order.
//!
//! There is no timeout: a task blocked on I/O stalls the whole round.

use std::future::Future;

/// Errors that may occur while joining dispatched tasks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("collection round lost results: dispatched {dispatched}, received {received}")]
    LostResults { dispatched: usize, received: usize },
}

/// Runs `work` for every item concurrently and returns one result per item.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns [`Error::LostResults`] if a task terminated without reporting, which only
/// happens if it panicked.
///
/// # Examples
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut doubled = lxd_stats::scheduler::fan_out(vec![1, 2, 3], |n| async move { n * 2 })
///     .await
///     .unwrap();
/// doubled.sort();
/// assert_eq!(doubled, [2, 4, 6]);
/// # }
/// ```
pub async fn fan_out<T, R, F, Fut>(items: Vec<T>, work: F) -> Result<Vec<R>, Error>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let dispatched = items.len();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<R>();

    for item in items {
        let tx = tx.clone();
        let fut = work(item);
        tokio::spawn(async move {
            // The receiver only goes away once the barrier gave up.
            let _ = tx.send(fut.await);
        });
    }
    drop(tx);

    let before = std::time::Instant::now();
    let mut results = Vec::with_capacity(dispatched);
    while results.len() < dispatched {
        match rx.recv().await {
            Some(result) => results.push(result),
            None => break,
        }
    }
    log::trace!(
        "joined {}/{} tasks in {} microseconds",
        results.len(),
        dispatched,
        before.elapsed().as_micros()
    );

    if results.len() != dispatched {
        return Err(Error::LostResults {
            dispatched,
            received: results.len(),
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_empty_round() {
        let results = fan_out(Vec::<u32>::new(), |n| async move { n }).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_every_task_reports_exactly_once() {
        let items: Vec<u64> = (0..500).collect();
        let mut results = fan_out(items, |n| async move {
            // Finish in a different order than dispatched.
            tokio::time::sleep(Duration::from_micros((500 - n) % 17)).await;
            n
        })
        .await
        .unwrap();

        results.sort_unstable();
        assert_eq!(results, (0..500).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_results_in_completion_order() {
        let results = fan_out(vec![30u64, 0], |ms| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            ms
        })
        .await
        .unwrap();
        assert_eq!(results, [0, 30]);
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported() {
        let err = fan_out(vec![1, 2, 3], |n| async move {
            if n == 2 {
                panic!("task {n} failed");
            }
            n
        })
        .await
        .unwrap_err();

        match err {
            Error::LostResults {
                dispatched,
                received,
            } => {
                assert_eq!(dispatched, 3);
                assert_eq!(received, 2);
            }
        }
    }
}
