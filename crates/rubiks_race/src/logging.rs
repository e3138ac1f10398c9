//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout, so TUI runs log to a file (appending, no
//! ANSI colors). Headless runs log to stderr. Both honour `RUST_LOG` and
//! default to `info`.

use crate::error::SessionError;
use std::fs::OpenOptions;
use std::panic::{self, PanicHookInfo};
use std::path::Path;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends all tracing output to `path`.
pub fn init_file(path: &Path) -> Result<(), SessionError> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SessionError::new(format!("Failed to open log file {}: {}", path.display(), e)))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Sends all tracing output to stderr.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Routes panic messages to the tracing log instead of stderr while alive.
///
/// A panicking racer thread must not scribble over the alternate screen.
/// Dropping the guard puts the previous hook back.
pub struct PanicLog {
    previous: Option<PanicHook>,
}

impl PanicLog {
    /// Replaces the process panic hook with one that logs at `error`.
    pub fn install() -> Self {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| {
            let thread = std::thread::current();
            error!(
                thread = thread.name().unwrap_or("unnamed"),
                panic = %info,
                "Thread panicked"
            );
        }));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for PanicLog {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}

impl std::fmt::Debug for PanicLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanicLog")
            .field("installed", &self.previous.is_some())
            .finish()
    }
}
