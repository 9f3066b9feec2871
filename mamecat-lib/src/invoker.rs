//! Runs the configured MAME executable.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{ChildStdout, Command, Stdio};
use std::sync::Arc;

use mamecat_core::{CatalogError, ToolInvoker, ToolOutput};

use crate::registry::{ProcessHandle, ProcessRegistry};

/// Spawns MAME with argument vectors and tracks every process it starts.
///
/// Processes run in the executable's directory so relative paths in
/// `mame.ini` resolve the way MAME itself resolves them.
#[derive(Debug, Clone)]
pub struct MameInvoker {
    executable: PathBuf,
    working_dir: Option<PathBuf>,
    registry: Arc<ProcessRegistry>,
}

impl MameInvoker {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self::with_registry(executable, Arc::new(ProcessRegistry::new()))
    }

    /// Invoker sharing an existing registry, e.g. one a shutdown hook sweeps.
    pub fn with_registry(executable: impl Into<PathBuf>, registry: Arc<ProcessRegistry>) -> Self {
        let executable = executable.into();
        let working_dir = executable
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Self {
            executable,
            working_dir,
            registry,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn registry(&self) -> &Arc<ProcessRegistry> {
        &self.registry
    }

    fn command(&self, args: &[String]) -> Result<Command, CatalogError> {
        if !self.executable.is_file() {
            return Err(CatalogError::ExecutableNotFound(self.executable.clone()));
        }

        let mut cmd = Command::new(&self.executable);
        cmd.args(args).stdin(Stdio::null()).stderr(Stdio::null());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }

    /// Start MAME without capturing its output (e.g. to play a game).
    ///
    /// The process stays registered until [`terminate`](Self::terminate) or
    /// a sweep stops it.
    pub fn launch(&self, args: &[String]) -> Result<ProcessHandle, CatalogError> {
        log::debug!("Launching MAME with arguments: {}", args.join(" "));

        let mut cmd = self.command(args)?;
        cmd.stdout(Stdio::null());
        let child = cmd.spawn().map_err(|e| {
            log::error!("Unable to run MAME: {} {}", self.executable.display(), args.join(" "));
            CatalogError::process_start(&self.executable, e)
        })?;
        log::debug!("MAME started; pid: {}", child.id());

        Ok(self.registry.register(child))
    }

    /// Gracefully stop a process started by this invoker.
    pub fn terminate(&self, handle: ProcessHandle) {
        self.registry.terminate(handle);
    }

    /// Stop every process still registered.
    pub fn terminate_all(&self) {
        self.registry.terminate_all();
    }
}

impl ToolInvoker for MameInvoker {
    fn invoke(&self, args: &[String]) -> Result<ToolOutput, CatalogError> {
        log::debug!("Invoking MAME with arguments: {}", args.join(" "));

        let mut cmd = self.command(args)?;
        cmd.stdout(Stdio::piped());
        let mut child = cmd.spawn().map_err(|e| {
            log::error!("Unable to run MAME: {} {}", self.executable.display(), args.join(" "));
            CatalogError::process_start(&self.executable, e)
        })?;
        log::debug!("MAME started; pid: {}", child.id());

        let stdout = child.stdout.take();
        let handle = self.registry.register(child);
        let Some(stdout) = stdout else {
            self.registry.terminate(handle);
            return Err(CatalogError::process_start(
                &self.executable,
                io::Error::other("standard output was not captured"),
            ));
        };

        Ok(Box::new(ChildOutput {
            reader: Some(BufReader::new(stdout)),
            handle,
            registry: Arc::clone(&self.registry),
        }))
    }

    fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

/// Standard output of a running MAME process.
///
/// Dropping it closes the pipe and reaps the process.
struct ChildOutput {
    reader: Option<BufReader<ChildStdout>>,
    handle: ProcessHandle,
    registry: Arc<ProcessRegistry>,
}

impl Read for ChildOutput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reader.as_mut() {
            Some(reader) => reader.read(buf),
            None => Ok(0),
        }
    }
}

impl BufRead for ChildOutput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self.reader.as_mut() {
            Some(reader) => reader.fill_buf(),
            None => Ok(&[]),
        }
    }

    fn consume(&mut self, amt: usize) {
        if let Some(reader) = self.reader.as_mut() {
            reader.consume(amt);
        }
    }
}

impl Drop for ChildOutput {
    fn drop(&mut self) {
        // Close the pipe first so a child still writing sees EPIPE and exits.
        drop(self.reader.take());
        self.registry.reap(self.handle);
    }
}

#[cfg(test)]
#[path = "tests/invoker_tests.rs"]
mod tests;
