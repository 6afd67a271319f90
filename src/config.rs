//! Runtime settings read from the environment.

use std::env;
use std::path::PathBuf;

use crate::catalog::store::DEFAULT_DATA_DIR;
use crate::parallel::WorkerPool;

pub const DATA_DIR_VAR: &str = "MATHHAMMER_DATA_DIR";
pub const WORKERS_VAR: &str = "MATHHAMMER_WORKERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding one sub-directory per data set.
    pub data_dir: PathBuf,
    /// Worker threads for scenario runs; 0 means Rayon's default.
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            workers: 0,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let workers = match lookup(WORKERS_VAR) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                tracing::warn!(
                    "invalid {WORKERS_VAR} '{raw}', defaulting to {}",
                    defaults.workers
                );
                defaults.workers
            }),
            None => defaults.workers,
        };
        Self { data_dir, workers }
    }

    pub fn data_set_dir(&self, data_set: &str) -> PathBuf {
        self.data_dir.join(data_set)
    }

    pub fn worker_pool(&self) -> WorkerPool {
        WorkerPool::with_workers(self.workers)
    }
}
