//! Subprocess oracle transport.
//!
//! Wraps one external CLI-introspection binary. The protocol is two
//! invocations of the same executable:
//!
//! - `<path> commands` — emits a JSON array of command specs on stdout.
//! - `<path> describe -- <argv...>` — emits a describe result, or `null`
//!   when the vector does not resolve. The `--` guard keeps argv words such
//!   as `--amend` from being read as flags of the oracle binary itself.
//!
//! One process is spawned per request, so concurrent calls never share
//! in-flight state and a crashed process is replaced on the next call
//! without any bookkeeping. Stdout is drained on a thread while the child
//! runs under a deadline; timeouts kill the child and surface as
//! [`OracleError::Unavailable`].

use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use cmd_annotate_core::{CommandSpec, DescribeResult, validate_describe, validate_spec};

use crate::client::Oracle;
use crate::error::OracleError;

/// Deadline for one oracle invocation (milliseconds).
const ORACLE_TIMEOUT_MS: u64 = 5000;

type InvalidateCallback = Box<dyn Fn() + Send + Sync>;

/// Oracle client backed by an external introspection binary.
///
/// Construction fails with [`OracleError::BinaryNotFound`] when the path
/// does not resolve — the only setup-fatal failure. Runtime failures are
/// per-call and non-fatal to the caller's document.
///
/// The `list_commands` result is cached lazily as a whole-set `Arc`
/// snapshot; [`invalidate`](ProcessOracle::invalidate) drops the snapshot
/// and notifies subscribers, and the next fetch re-reads the binary. A
/// reader holding the old `Arc` keeps a consistent (merely stale) view;
/// mixed old/new reads cannot happen.
pub struct ProcessOracle {
    path: PathBuf,
    timeout: Duration,
    specs: RwLock<Option<Arc<Vec<CommandSpec>>>>,
    on_invalidate: Mutex<Vec<InvalidateCallback>>,
}

impl ProcessOracle {
    /// Creates a client for the binary at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, OracleError> {
        let path = path.into();
        if !path.exists() {
            return Err(OracleError::BinaryNotFound(path));
        }
        Ok(Self {
            path,
            timeout: Duration::from_millis(ORACLE_TIMEOUT_MS),
            specs: RwLock::new(None),
            on_invalidate: Mutex::new(Vec::new()),
        })
    }

    /// Path of the wrapped binary.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overrides the per-invocation deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Drops the cached spec set and notifies subscribers.
    ///
    /// Called on the external "updated" signal (e.g. the binary was
    /// rebuilt). The next `list_commands` call re-fetches.
    pub fn invalidate(&self) {
        {
            let mut cached = self
                .specs
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *cached = None;
        }
        debug!(path = %self.path.display(), "oracle spec cache invalidated");

        let callbacks = self
            .on_invalidate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for callback in callbacks.iter() {
            callback();
        }
    }

    /// Registers a callback fired after each invalidation, so dependent
    /// work (e.g. re-annotating a document) can re-run.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.on_invalidate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Box::new(callback));
    }

    /// Runs the binary with `args` and returns its stdout.
    fn invoke(&self, args: &[&str]) -> Result<String, OracleError> {
        let mut child = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| match error.kind() {
                ErrorKind::NotFound => OracleError::BinaryNotFound(self.path.clone()),
                _ => OracleError::Unavailable(format!("spawn failed: {error}")),
            })?;

        // Drain both pipes on threads so the child cannot deadlock on a
        // full pipe buffer before it exits.
        let stdout_thread = child.stdout.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let result = pipe.read_to_end(&mut buf);
                (buf, result)
            })
        });
        let stderr_thread = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let result = pipe.read_to_end(&mut buf);
                (buf, result)
            })
        });

        let status = match child.wait_timeout(self.timeout)? {
            Some(status) => status,
            None => {
                warn!(
                    path = %self.path.display(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "oracle invocation timed out, killing process"
                );
                let _ = child.kill();
                let _ = child.wait();
                return Err(OracleError::Unavailable(format!(
                    "timed out after {}ms",
                    self.timeout.as_millis()
                )));
            }
        };

        let stdout = stdout_thread
            .and_then(|thread| thread.join().ok())
            .map(|(buf, _)| buf)
            .unwrap_or_default();
        let stderr = stderr_thread
            .and_then(|thread| thread.join().ok())
            .map(|(buf, _)| buf)
            .unwrap_or_default();

        if !status.success() {
            let preview = String::from_utf8_lossy(&stderr);
            let preview = preview.lines().next().unwrap_or_default();
            return Err(OracleError::Unavailable(format!(
                "exited with {status}: {preview}"
            )));
        }

        String::from_utf8(stdout)
            .map_err(|error| OracleError::MalformedResponse(format!("non-UTF-8 output: {error}")))
    }

    fn fetch_commands(&self) -> Result<Arc<Vec<CommandSpec>>, OracleError> {
        let raw = self.invoke(&["commands"])?;
        let specs: Vec<CommandSpec> = serde_json::from_str(&raw)
            .map_err(|error| OracleError::MalformedResponse(error.to_string()))?;

        for spec in &specs {
            let errors = validate_spec(spec);
            if let Some(error) = errors.first() {
                return Err(OracleError::MalformedResponse(format!(
                    "spec '{}': {error}",
                    spec.primary_path.join(" ")
                )));
            }
        }

        debug!(
            path = %self.path.display(),
            specs = specs.len(),
            "fetched oracle command specs"
        );
        Ok(Arc::new(specs))
    }
}

impl Oracle for ProcessOracle {
    fn list_commands(&self) -> Result<Arc<Vec<CommandSpec>>, OracleError> {
        if let Some(cached) = self
            .specs
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return Ok(Arc::clone(cached));
        }

        let fetched = self.fetch_commands()?;

        let mut cached = self
            .specs
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Another caller may have fetched while this one was; either
        // snapshot is complete, so keep whichever landed first.
        match cached.as_ref() {
            Some(existing) => Ok(Arc::clone(existing)),
            None => {
                *cached = Some(Arc::clone(&fetched));
                Ok(fetched)
            }
        }
    }

    fn describe(&self, argv: &[String]) -> Result<Option<DescribeResult>, OracleError> {
        let mut args = vec!["describe", "--"];
        args.extend(argv.iter().map(String::as_str));

        let raw = self.invoke(&args)?;
        let result: Option<DescribeResult> = serde_json::from_str(&raw)
            .map_err(|error| OracleError::MalformedResponse(error.to_string()))?;

        if let Some(result) = &result {
            let errors = validate_describe(result, argv);
            if let Some(error) = errors.first() {
                return Err(OracleError::MalformedResponse(error.to_string()));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_fatal_at_construction() {
        let result = ProcessOracle::new("/nonexistent/oracle-binary");
        assert!(matches!(result, Err(OracleError::BinaryNotFound(_))));
    }
}
