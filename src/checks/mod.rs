//! The OMX convention checks.
//!
//! Twelve independent checks, numbered as in the OMX convention
//! documentation:
//! - 1–2: file-level attributes (`file_attrs`)
//! - 3–8: the `data` group and its matrices (`matrices`)
//! - 9–12: the `lookup` group and its label mappings (`lookups`)
//!
//! Required checks decide the overall verdict; optional checks are
//! informational only. Every check is a pure read of the opened container
//! and reports backend faults through its `Result` instead of panicking, so
//! one malformed node can never stop the rest of the suite.

pub mod file_attrs;
pub mod lookups;
pub mod matrices;

use serde::Serialize;

use crate::container::{AttrNum, ContainerError, MatrixContainer};

/// What a single check concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    /// The check hit an internal fault while inspecting the file. Counts as
    /// a failure for the overall verdict.
    Error { message: String },
}

impl CheckStatus {
    pub fn passed(&self) -> bool {
        matches!(self, CheckStatus::Passed)
    }
}

/// Outcome of one numbered check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub number: u8,
    pub name: &'static str,
    pub required: bool,
    pub status: CheckStatus,
    /// Human-readable per-item diagnostic lines.
    pub details: Vec<String>,
}

/// Verdict being built up inside a check body.
///
/// Starts passing: the fold over per-matrix or per-lookup results is an
/// explicit boolean AND, and an empty collection passes vacuously (no
/// matrices, nothing to fail).
#[derive(Debug, Clone, Default)]
pub struct Eval {
    pub passed: bool,
    pub details: Vec<String>,
}

impl Eval {
    pub fn new() -> Self {
        Eval {
            passed: true,
            details: Vec::new(),
        }
    }

    /// AND one per-item result into the verdict.
    pub fn and(&mut self, ok: bool) {
        self.passed = self.passed && ok;
    }

    /// Record a diagnostic line.
    pub fn note(&mut self, line: impl Into<String>) {
        self.details.push(line.into());
    }
}

pub(crate) fn pass_or_fail(ok: bool) -> &'static str {
    if ok {
        "pass"
    } else {
        "fail"
    }
}

/// Whether a dataset shape matches the declared file `SHAPE`, element-wise
/// under value-preserving casts.
pub(crate) fn dims_match(shape: &[u64], declared: &[AttrNum]) -> bool {
    shape.len() == declared.len()
        && shape
            .iter()
            .zip(declared)
            .all(|(&dim, want)| want.as_exact_int() == Some(dim as i64))
}

type CheckFn = fn(&dyn MatrixContainer) -> Result<Eval, ContainerError>;

/// A registered check: its convention number, display name, classification,
/// and body.
pub struct CheckDef {
    pub number: u8,
    pub name: &'static str,
    pub required: bool,
    pub run: CheckFn,
}

/// All twelve checks in convention order.
pub fn all_checks() -> Vec<CheckDef> {
    vec![
        CheckDef {
            number: 1,
            name: "OMX_VERSION attribute set to 0.2",
            required: true,
            run: file_attrs::version,
        },
        CheckDef {
            number: 2,
            name: "SHAPE attribute set to two item integer array",
            required: true,
            run: file_attrs::shape,
        },
        CheckDef {
            number: 3,
            name: "data group for matrices",
            required: true,
            run: matrices::data_group,
        },
        CheckDef {
            number: 4,
            name: "matrix shape matches file shape",
            required: true,
            run: matrices::shapes,
        },
        CheckDef {
            number: 5,
            name: "common data types (float or int) for matrices",
            required: true,
            run: matrices::dtypes,
        },
        CheckDef {
            number: 6,
            name: "matrices chunked for faster I/O",
            required: true,
            run: matrices::chunking,
        },
        CheckDef {
            number: 7,
            name: "zlib compression if compression used",
            required: false,
            run: matrices::compression,
        },
        CheckDef {
            number: 8,
            name: "NA attribute if desired",
            required: false,
            run: matrices::na_attribute,
        },
        CheckDef {
            number: 9,
            name: "lookup group for labels/indexes if desired",
            required: false,
            run: lookups::lookup_group,
        },
        CheckDef {
            number: 10,
            name: "lookup shapes are 1-d and match file shape",
            required: false,
            run: lookups::shapes,
        },
        CheckDef {
            number: 11,
            name: "common data types (int or string) for lookups",
            required: false,
            run: lookups::dtypes,
        },
        CheckDef {
            number: 12,
            name: "lookup DIM attribute of 0 (row) or 1 (column) if desired",
            required: false,
            run: lookups::dim_attribute,
        },
    ]
}
