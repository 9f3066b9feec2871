//! Builds a catalog of playable MAME machines.
//!
//! [`CatalogBuilder`] drives the whole pipeline through a
//! [`ToolInvoker`](mamecat_core::ToolInvoker): it asks MAME where the ROMs
//! live, verifies the archives found there, and reads `-listxml` details
//! for the good sets. [`MameInvoker`] is the invoker that runs the real
//! executable.

pub mod batch;
pub mod catalog;
pub mod category;
pub mod error;
pub mod invoker;
pub mod listxml;
pub mod paths;
pub mod progress;
pub mod registry;
pub mod settings;
pub mod store;
pub mod verify;

pub use batch::{BatchOutcome, DEFAULT_BATCH_SIZE, RetryReason, run_with_fallback};
pub use catalog::{CatalogBuilder, CatalogOptions, Rejection, check_validity};
pub use category::CatverIndex;
pub use error::{CategoryError, StoreError};
pub use invoker::MameInvoker;
pub use listxml::{MachineReader, parse_machines};
pub use paths::{ART_PATH_KEY, ArtPathCache, PathResolver, ROM_PATH_KEY, extract_config_paths};
pub use progress::{PhaseTracker, report};
pub use registry::{GRACEFUL_EXIT_TIMEOUT, ProcessHandle, ProcessRegistry};
pub use settings::Settings;
pub use verify::{RomVerifier, parse_verify_output, rom_candidates};

#[cfg(test)]
#[path = "tests/fake_tool.rs"]
mod fake_tool;

#[cfg(test)]
#[path = "tests/log_capture.rs"]
mod log_capture;
