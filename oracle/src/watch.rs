//! File watching for oracle binary changes.
//!
//! Watches an oracle executable and invalidates the client's spec cache
//! when the file changes (the "updated" signal in long-lived watch mode).
//! Events are debounced so a rebuild writing the binary in several steps
//! produces one invalidation. Consumers that need to re-run work subscribe
//! on the [`ProcessOracle`] itself.

use std::sync::Arc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{Debouncer, new_debouncer};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::process::ProcessOracle;

/// Keeps the underlying watcher alive; dropping it stops watching.
pub struct WatcherHandle {
    _debouncer: Debouncer<RecommendedWatcher>,
}

/// Watches the oracle's binary path and invalidates its cache on change.
///
/// `debounce` must be between 10ms and 5s.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidWatch`] for an out-of-range debounce or a
/// path that cannot be watched.
pub fn watch_oracle(
    oracle: Arc<ProcessOracle>,
    debounce: Duration,
) -> Result<WatcherHandle, ConfigError> {
    if debounce < Duration::from_millis(10) || debounce > Duration::from_secs(5) {
        return Err(ConfigError::InvalidWatch(format!(
            "debounce must be between 10ms and 5000ms, got {}ms",
            debounce.as_millis()
        )));
    }

    let path = oracle.path().to_path_buf();
    let watched = Arc::clone(&oracle);

    let mut debouncer = new_debouncer(
        debounce,
        move |result: notify_debouncer_mini::DebounceEventResult| match result {
            Ok(events) => {
                if !events.is_empty() {
                    debug!(path = %watched.path().display(), "oracle binary changed");
                    watched.invalidate();
                }
            }
            Err(error) => {
                warn!(error = %error, "oracle watcher error");
            }
        },
    )
    .map_err(|error| ConfigError::InvalidWatch(format!("failed to create watcher: {error}")))?;

    debouncer
        .watcher()
        .watch(&path, RecursiveMode::NonRecursive)
        .map_err(|error| {
            ConfigError::InvalidWatch(format!("failed to watch {}: {error}", path.display()))
        })?;

    Ok(WatcherHandle {
        _debouncer: debouncer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn script_oracle(dir: &std::path::Path) -> Arc<ProcessOracle> {
        let path = dir.join("oracle.sh");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh\necho '[]'").unwrap();
        Arc::new(ProcessOracle::new(path).unwrap())
    }

    #[test]
    fn test_rejects_out_of_range_debounce() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = script_oracle(dir.path());

        let too_low = watch_oracle(Arc::clone(&oracle), Duration::from_millis(1));
        assert!(matches!(too_low, Err(ConfigError::InvalidWatch(_))));

        let too_high = watch_oracle(oracle, Duration::from_secs(30));
        assert!(matches!(too_high, Err(ConfigError::InvalidWatch(_))));
    }

    #[test]
    fn test_watch_existing_binary_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = script_oracle(dir.path());
        let handle = watch_oracle(oracle, Duration::from_millis(50));
        assert!(handle.is_ok());
    }
}
