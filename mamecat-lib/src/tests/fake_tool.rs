//! Scripted stand-in for MAME used by the unit tests.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mamecat_core::{CatalogError, ToolInvoker, ToolOutput};

type Responder = Box<dyn Fn(&[String]) -> String + Send + Sync>;

pub(crate) struct FakeTool {
    respond: Responder,
    calls: Mutex<Vec<Vec<String>>>,
    working_dir: Option<PathBuf>,
}

impl FakeTool {
    pub(crate) fn new(respond: impl Fn(&[String]) -> String + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
            working_dir: None,
        }
    }

    /// A tool that prints `text` whatever it is asked.
    pub(crate) fn constant(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| text.clone())
    }

    pub(crate) fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolInvoker for FakeTool {
    fn invoke(&self, args: &[String]) -> Result<ToolOutput, CatalogError> {
        self.calls.lock().unwrap().push(args.to_vec());
        let text = (self.respond)(args);
        Ok(Box::new(Cursor::new(text.into_bytes())))
    }

    fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}
