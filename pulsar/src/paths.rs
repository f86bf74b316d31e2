use std::path::PathBuf;
#[cfg(test)]
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Environment variable that relocates Pulsar's data directory.
pub const PULSAR_HOME_ENV: &str = "PULSAR_HOME";

/// Get Pulsar's data directory.
///
/// `$PULSAR_HOME` when set, otherwise `~/.pulsar`.
pub fn pulsar_home_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(v) = std::env::var(PULSAR_HOME_ENV)
        && !v.trim().is_empty()
    {
        return Ok(PathBuf::from(v.trim()));
    }

    let home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;

    Ok(home.join(".pulsar"))
}

#[cfg(test)]
pub(crate) fn test_pulsar_home_env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .expect("PULSAR_HOME test env lock poisoned")
}
