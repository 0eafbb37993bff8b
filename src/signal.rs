//! Removes the sandbox when the process is interrupted or terminated, since `Drop` does
//! not run on those paths. The action log of an interrupted session is not written.

use std::path::PathBuf;

use anyhow::Result;
#[cfg(unix)]
use anyhow::Context;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Exit status after an interrupting signal.
#[cfg(unix)]
const INTERRUPTED: i32 = 130;

pub(crate) struct SandboxCleanupGuard {
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: Option<std::thread::JoinHandle<()>>,
}

impl SandboxCleanupGuard {
    /// `sandbox` is removed on SIGINT/SIGTERM when given; `None` only exits.
    #[cfg(unix)]
    pub(crate) fn new(sandbox: Option<PathBuf>) -> Result<Self> {
        let mut signals =
            Signals::new([SIGINT, SIGTERM]).context("failed to register signal handlers")?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::warn!(signal, "interrupted, ending session without writing the log");
                if let Some(root) = sandbox.as_ref() {
                    if let Err(e) = vfs_shell::utils::rm_on_host(root) {
                        tracing::warn!(root = %root.display(), error = %e, "unable to remove sandbox");
                    }
                }
                std::process::exit(INTERRUPTED);
            }
        });

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }

    #[cfg(not(unix))]
    pub(crate) fn new(_sandbox: Option<PathBuf>) -> Result<Self> {
        Ok(Self {})
    }
}

impl Drop for SandboxCleanupGuard {
    #[cfg(unix)]
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    #[cfg(not(unix))]
    fn drop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_dropping_guard_leaves_sandbox() {
        let tmp = TempDir::new("signal_test").unwrap();
        let guard = SandboxCleanupGuard::new(Some(tmp.path().to_path_buf())).unwrap();
        drop(guard);
        assert!(tmp.path().exists());
    }
}
