//! Registry of spawned MAME processes.
//!
//! Every process the invoker starts is registered here so a shutdown sweep,
//! possibly running on another thread, can stop whatever is still alive.
//! The map sits behind a `Mutex`; children are removed from it before they
//! are waited on, so the lock is never held across a blocking wait.

use std::collections::HashMap;
use std::process::{Child, ExitStatus};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// How long a process gets to exit after a close request before it is killed.
pub const GRACEFUL_EXIT_TIMEOUT: Duration = Duration::from_secs(5);

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Identifies a registered process.
///
/// The id is unique for the lifetime of the registry, so a stale handle
/// never matches a later process that was given the same pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessHandle {
    id: u64,
    pid: u32,
}

impl ProcessHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }
}

/// Thread-safe set of live child processes, keyed by registration id.
#[derive(Debug)]
pub struct ProcessRegistry {
    children: Mutex<HashMap<u64, Child>>,
    next_id: AtomicU64,
    grace_period: Duration,
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::with_grace_period(GRACEFUL_EXIT_TIMEOUT)
    }

    /// Registry whose graceful stop waits `grace_period` before killing.
    pub fn with_grace_period(grace_period: Duration) -> Self {
        Self {
            children: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            grace_period,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u64, Child>> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Track a process for termination on shutdown.
    pub fn register(&self, child: Child) -> ProcessHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pid = child.id();
        self.lock().insert(id, child);
        ProcessHandle { id, pid }
    }

    pub fn contains(&self, handle: ProcessHandle) -> bool {
        self.lock().contains_key(&handle.id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Wait for a process that is expected to exit on its own and forget it.
    ///
    /// Returns `None` if the process was not registered (already reaped or
    /// terminated by a sweep).
    pub fn reap(&self, handle: ProcessHandle) -> Option<ExitStatus> {
        let mut child = self.lock().remove(&handle.id)?;
        match child.wait() {
            Ok(status) => {
                log::debug!("MAME exited; pid: {}, {}", handle.pid, status);
                Some(status)
            }
            Err(e) => {
                log::warn!("Unable to wait for MAME; pid: {}: {}", handle.pid, e);
                None
            }
        }
    }

    /// Stop one process: close request first, kill after the grace period.
    pub fn terminate(&self, handle: ProcessHandle) {
        let child = self.lock().remove(&handle.id);
        if let Some(child) = child {
            stop_child(child, self.grace_period);
        }
    }

    /// Stop every registered process.
    pub fn terminate_all(&self) {
        let children: Vec<Child> = self.lock().drain().map(|(_, child)| child).collect();
        if !children.is_empty() {
            log::debug!("Stopping {} MAME process(es)", children.len());
        }
        for child in children {
            stop_child(child, self.grace_period);
        }
    }
}

impl Drop for ProcessRegistry {
    fn drop(&mut self) {
        self.terminate_all();
    }
}

fn stop_child(mut child: Child, grace_period: Duration) {
    let pid = child.id();
    match child.try_wait() {
        Ok(Some(status)) => {
            log::debug!("MAME already exited; pid: {}, {}", pid, status);
            return;
        }
        Ok(None) => {}
        Err(e) => log::warn!("Unable to query MAME state; pid: {}: {}", pid, e),
    }

    log::debug!("Stopping MAME; pid: {}", pid);

    if request_close(&child) {
        log::debug!("Waiting for MAME to exit");
        if wait_with_timeout(&mut child, grace_period) {
            log::debug!("MAME stopped; pid: {}", pid);
            return;
        }
        log::warn!("Timeout waiting for MAME to exit; killing MAME");
    } else {
        log::debug!("Killing MAME as it cannot be asked to close");
    }

    if let Err(e) = child.kill() {
        log::error!("Error stopping MAME; pid: {}: {}", pid, e);
    }
    match child.wait() {
        Ok(_) => log::debug!("MAME stopped; pid: {}", pid),
        Err(e) => log::error!("Error waiting for MAME; pid: {}: {}", pid, e),
    }
}

/// Poll until the child exits or `timeout` elapses. True if it exited.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return true,
            Ok(None) => {}
            Err(_) => return false,
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(EXIT_POLL_INTERVAL);
    }
}

/// Ask the process to close. False when no request could be delivered.
#[cfg(unix)]
fn request_close(child: &Child) -> bool {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Ok(pid) = i32::try_from(child.id()) else {
        return false;
    };
    match kill(Pid::from_raw(pid), Signal::SIGTERM) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Unable to signal MAME; pid: {}: {}", pid, e);
            false
        }
    }
}

#[cfg(not(unix))]
fn request_close(_child: &Child) -> bool {
    false
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
