//! Shared environment guards for integration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Guard that applies scoped environment variable updates.
///
/// Holding the guard serializes every test that touches the process
/// environment; dropping it restores the previous values.
pub struct EnvVarGuard {
    previous: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets (`Some`) or removes (`None`) each variable for the guard lifetime.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = env_lock();
        let mut previous = Vec::with_capacity(changes.len());

        for &(key, value) in changes {
            previous.push((key.to_owned(), env::var(key).ok()));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }

    /// Removes every `SKILLTRACK_*` override for the guard lifetime.
    pub fn cleared() -> Self {
        Self::set_many(&[
            ("SKILLTRACK_DATABASE_URL", None),
            ("SKILLTRACK_JWT_SECRET", None),
            ("SKILLTRACK_LOG_LEVEL", None),
        ])
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
