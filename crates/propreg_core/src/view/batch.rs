//! Bounded per-document batch execution.

use log::warn;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Runs independent per-item work, optionally on a dedicated rayon pool.
///
/// # Invariants
/// - Output order equals input order regardless of scheduling.
/// - Any failing item fails the whole batch. Sequentially that is the first
///   failure in input order; on the pool, which failure is reported is
///   unspecified.
pub struct BatchRunner {
    pool: Option<ThreadPool>,
}

impl BatchRunner {
    /// Builds a runner with `worker_threads` workers.
    ///
    /// `0` or `1` runs every batch on the caller thread. When the pool cannot
    /// be built the runner degrades to sequential execution.
    pub fn new(worker_threads: usize) -> Self {
        if worker_threads <= 1 {
            return Self::sequential();
        }

        match ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|index| format!("propreg-batch-{index}"))
            .build()
        {
            Ok(pool) => Self { pool: Some(pool) },
            Err(err) => {
                warn!(
                    "event=batch_pool_init module=view status=degraded worker_threads={} error={}",
                    worker_threads, err
                );
                Self::sequential()
            }
        }
    }

    pub fn sequential() -> Self {
        Self { pool: None }
    }

    /// Number of workers in use; `1` when sequential.
    pub fn worker_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    /// Applies `work` to every item and collects the results in input order.
    pub fn try_map<T, R, E, F>(&self, items: &[T], work: F) -> Result<Vec<R>, E>
    where
        T: Sync,
        R: Send,
        E: Send,
        F: Fn(&T) -> Result<R, E> + Sync + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(&work).collect()),
            None => items.iter().map(work).collect(),
        }
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::sequential()
    }
}

#[cfg(test)]
mod tests {
    use super::BatchRunner;

    #[test]
    fn pooled_runner_keeps_input_order() {
        let runner = BatchRunner::new(4);
        let items: Vec<i64> = (0..200).collect();

        let doubled: Result<Vec<i64>, String> = runner.try_map(&items, |item| Ok(item * 2));

        assert_eq!(doubled.unwrap(), (0..200).map(|item| item * 2).collect::<Vec<_>>());
        assert_eq!(runner.worker_threads(), 4);
    }

    #[test]
    fn small_thread_counts_run_sequentially() {
        assert_eq!(BatchRunner::new(0).worker_threads(), 1);
        assert_eq!(BatchRunner::new(1).worker_threads(), 1);
    }

    #[test]
    fn any_failure_fails_the_batch() {
        let runner = BatchRunner::new(3);
        let items: Vec<i64> = (0..50).collect();

        let result: Result<Vec<i64>, String> = runner.try_map(&items, |item| {
            if *item == 17 {
                Err(format!("item {item} failed"))
            } else {
                Ok(*item)
            }
        });

        assert_eq!(result.unwrap_err(), "item 17 failed");
    }

    #[test]
    fn failed_batch_reports_one_of_its_failing_items() {
        let items: Vec<i64> = (0..50).collect();
        let fail_from_10 = |item: &i64| {
            if *item >= 10 {
                Err(*item)
            } else {
                Ok(*item)
            }
        };

        assert_eq!(
            BatchRunner::sequential().try_map(&items, fail_from_10),
            Err(10)
        );

        let pooled = BatchRunner::new(4).try_map(&items, fail_from_10);
        assert!(matches!(pooled, Err(item) if item >= 10));
    }
}
