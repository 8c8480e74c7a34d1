//! omx-validate library
//!
//! Validator for the OMX ("open matrix") convention: 2-D matrix data and
//! row/column label lookups stored inside an HDF5 container file under a
//! small set of naming and attribute rules, so travel demand tools can
//! exchange matrices without a bespoke binary format.
//!
//! The crate runs twelve independent checks against a container file (root
//! attributes, the `data` matrix group, the optional `lookup` group) and
//! reports a per-check pass/fail plus an overall verdict computed from the
//! required checks only. Checks never abort the batch: backend faults are
//! converted into failing outcomes with the error text attached.
//!
//! # Example
//!
//! ```
//! use omx_validate::container::{DatasetInfo, MemoryContainer, ValueKind};
//! use omx_validate::validate_container;
//!
//! let file = MemoryContainer::new()
//!     .with_version(b"0.2")
//!     .with_shape(&[4, 4])
//!     .with_matrix(
//!         "distance",
//!         DatasetInfo::new(&[4, 4], ValueKind::Float)
//!             .chunked(&[2, 2])
//!             .compressed("zlib", Some(1)),
//!     );
//!
//! let report = validate_container(&file, "example.omx");
//! assert_eq!(report.checks.len(), 12);
//! assert!(report.overall());
//! ```

pub mod checks;
pub mod cli;
pub mod container;
pub mod convention;
pub mod engine;
pub mod version;

use std::path::PathBuf;

use thiserror::Error;

use container::MatrixContainer;

// Re-exports for public API
pub use checks::{CheckOutcome, CheckStatus};
pub use engine::report::{ResultSummary, ValidationReport};

/// Errors fatal to a validation run. Per-check faults are never surfaced
/// here; they live in the report as error outcomes.
#[derive(Debug, Error)]
pub enum OmxError {
    /// The path does not name an existing file; raised before any backend
    /// call.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// The backend could not interpret the file as a container. No checks
    /// run.
    #[error("unable to open {path} as an HDF5 container: {message}")]
    BackendOpen { path: PathBuf, message: String },
}

/// Run the full check suite against an already-opened container.
///
/// `source` identifies the file in the report; it is not dereferenced.
pub fn validate_container(file: &dyn MatrixContainer, source: &str) -> ValidationReport {
    engine::runner::run_suite(file, source)
}

/// Open `path` with the HDF5 backend and run the full check suite.
///
/// Fails with [`OmxError::FileNotFound`] before any backend call when the
/// path does not exist, and with [`OmxError::BackendOpen`] when the backend
/// rejects the file; no checks run in either case. The file handle is
/// closed on every exit path.
#[cfg(feature = "hdf5")]
pub fn run_checks<P: AsRef<std::path::Path>>(path: P) -> Result<ValidationReport, OmxError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(OmxError::FileNotFound(path.to_path_buf()));
    }

    let file = container::Hdf5Container::open(path).map_err(|err| OmxError::BackendOpen {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(validate_container(&file, &path.display().to_string()))
}
