//! Shared types for building a MAME catalog: the records the pipeline
//! produces, its error taxonomy, and the seams (`ToolInvoker`,
//! `CategorySource`) the pipeline talks to.

use std::io::BufRead;
use std::path::Path;

pub mod error;
pub mod machine;
pub mod progress;
pub mod status;

pub use error::CatalogError;
pub use machine::{CatalogEntry, CategoryDetail, MachineRecord, VerifiedEntry, VerifiedSets};
pub use progress::{BatchProgress, BuildPhase};
pub use status::{AcceptedStatuses, DriverStatus, StatusParseError};

/// Buffered standard output of one tool invocation.
pub type ToolOutput = Box<dyn BufRead + Send>;

/// Something that can run the emulation tool with an argument vector.
///
/// The production implementation spawns MAME; tests substitute scripted
/// output.
pub trait ToolInvoker: Send + Sync {
    /// Run the tool with `args` and return its standard output.
    ///
    /// # Errors
    /// * `CatalogError::ExecutableNotFound` - configured path does not exist
    /// * `CatalogError::ProcessStart` - the OS refused to start the process
    fn invoke(&self, args: &[String]) -> Result<ToolOutput, CatalogError>;

    /// Directory the tool runs in. Relative paths in its configuration are
    /// resolved against it.
    fn working_dir(&self) -> Option<&Path> {
        None
    }
}

impl<T: ToolInvoker + ?Sized> ToolInvoker for &T {
    fn invoke(&self, args: &[String]) -> Result<ToolOutput, CatalogError> {
        (**self).invoke(args)
    }

    fn working_dir(&self) -> Option<&Path> {
        (**self).working_dir()
    }
}

/// Looks up the category of a set by name.
pub trait CategorySource: Send + Sync {
    /// Category for `name`; both fields empty when unknown.
    fn category(&self, name: &str) -> CategoryDetail;
}

/// A category source that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCategories;

impl CategorySource for NoCategories {
    fn category(&self, _name: &str) -> CategoryDetail {
        CategoryDetail::default()
    }
}
