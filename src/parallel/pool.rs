//! Rayon thread pool configuration for scenario workloads.
//!
//! Use [WorkerPool::install] to run independent attacks with a fixed number of
//! threads, or rely on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;

use crate::error::{MathhammerError, Result};

/// Configures how many worker threads evaluate attacks in parallel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the global Rayon pool.
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure with this worker count. A count of 0 runs on the global pool;
    /// anything else builds a temporary pool of that size.
    pub fn install<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return Ok(f());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| MathhammerError::WorkerPool(e.to_string()))?;
        Ok(pool.install(f))
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;

    #[test]
    fn sized_pool_runs_closure() {
        let pool = WorkerPool::with_workers(2);
        let total: u64 = pool
            .install(|| (1..=100u64).into_par_iter().sum())
            .unwrap();
        assert_eq!(total, 5050);
    }

    #[test]
    fn zero_workers_uses_global_pool() {
        let threads = WorkerPool::default()
            .install(rayon::current_num_threads)
            .unwrap();
        assert!(threads >= 1);
    }
}
