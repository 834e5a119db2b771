//! Helpers shared by unit tests that touch process-wide environment state.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that read or write environment variables.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `f` with `XDG_CONFIG_HOME` pointed at `dir`, restoring the previous
/// value afterwards. Callers must hold [`lock_env`].
pub fn with_config_home<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe { std::env::set_var("XDG_CONFIG_HOME", dir) };

    let result = f();

    match original {
        Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
        None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
    }
    result
}
