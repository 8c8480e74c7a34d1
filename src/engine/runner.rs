//! Check execution.
//!
//! Runs the registered checks in convention order against an opened
//! container. Faults inside a check body (backend errors, panics) become
//! failing outcomes carrying the error text, so one broken check never
//! stops the rest of the suite. No function here panics.

use std::panic::{catch_unwind, AssertUnwindSafe};

use log::{debug, warn};

use crate::checks::{all_checks, CheckDef, CheckOutcome, CheckStatus};
use crate::container::MatrixContainer;
use crate::convention::{CHECK_COUNT, CREATED_WITH_ATTR};
use crate::engine::report::ValidationReport;

/// Run the full suite against an opened container.
///
/// `source` is the path (or other identifier) of the inspected file, used
/// only for reporting.
pub fn run_suite(file: &dyn MatrixContainer, source: &str) -> ValidationReport {
    let created_with = file
        .root_attr_bytes(CREATED_WITH_ATTR)
        .ok()
        .flatten()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

    let mut outcomes = Vec::with_capacity(CHECK_COUNT);
    for def in all_checks() {
        debug!("running check {}: {}", def.number, def.name);
        outcomes.push(execute(&def, file));
    }

    ValidationReport::new(source, created_with, outcomes)
}

/// Execute one check, converting any fault into an error outcome.
fn execute(def: &CheckDef, file: &dyn MatrixContainer) -> CheckOutcome {
    let run = def.run;
    let result = catch_unwind(AssertUnwindSafe(|| run(file)));

    let (status, details) = match result {
        Ok(Ok(eval)) => {
            let status = if eval.passed {
                CheckStatus::Passed
            } else {
                CheckStatus::Failed
            };
            (status, eval.details)
        }
        Ok(Err(err)) => {
            warn!("check {} hit a backend fault: {}", def.number, err);
            (
                CheckStatus::Error {
                    message: err.to_string(),
                },
                Vec::new(),
            )
        }
        Err(_) => {
            warn!("check {} panicked during execution", def.number);
            (
                CheckStatus::Error {
                    message: "check panicked during execution".to_string(),
                },
                Vec::new(),
            )
        }
    };

    CheckOutcome {
        number: def.number,
        name: def.name,
        required: def.required,
        status,
        details,
    }
}
