//! Validation report and verdict.

use serde::Serialize;

use crate::checks::{CheckOutcome, CheckStatus};

/// Summary statistics over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub passed: u32,
    pub failed: u32,
    pub errored: u32,
    pub total: u32,
}

/// Results of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Path of the inspected file.
    pub source: String,
    /// Tool identification, for report headers and CI logs.
    pub tool: String,
    /// Writer recorded in the file's `OMX_CREATED_WITH` attribute, when
    /// present. Informational only, never checked.
    pub created_with: Option<String>,
    /// Per-check outcomes in convention order.
    pub checks: Vec<CheckOutcome>,
}

impl ValidationReport {
    pub fn new(
        source: &str,
        created_with: Option<String>,
        checks: Vec<CheckOutcome>,
    ) -> Self {
        ValidationReport {
            source: source.to_string(),
            tool: crate::version::build_info().to_string(),
            created_with,
            checks,
        }
    }

    /// Overall verdict: AND over the required checks. Optional checks never
    /// change the verdict; an internal error on a required check counts as
    /// a failure.
    pub fn overall(&self) -> bool {
        self.checks
            .iter()
            .filter(|check| check.required)
            .all(|check| check.status.passed())
    }

    /// Count outcomes by status.
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::default();
        for check in &self.checks {
            summary.total += 1;
            match &check.status {
                CheckStatus::Passed => summary.passed += 1,
                CheckStatus::Failed => summary.failed += 1,
                CheckStatus::Error { .. } => summary.errored += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(number: u8, required: bool, status: CheckStatus) -> CheckOutcome {
        CheckOutcome {
            number,
            name: "test check",
            required,
            status,
            details: Vec::new(),
        }
    }

    #[test]
    fn overall_ignores_optional_failures() {
        let report = ValidationReport::new(
            "test.omx",
            None,
            vec![
                outcome(1, true, CheckStatus::Passed),
                outcome(7, false, CheckStatus::Failed),
                outcome(12, false, CheckStatus::Failed),
            ],
        );
        assert!(report.overall());
    }

    #[test]
    fn overall_fails_on_required_failure_or_error() {
        let failed = ValidationReport::new(
            "test.omx",
            None,
            vec![
                outcome(1, true, CheckStatus::Failed),
                outcome(9, false, CheckStatus::Passed),
            ],
        );
        assert!(!failed.overall());

        let errored = ValidationReport::new(
            "test.omx",
            None,
            vec![outcome(
                4,
                true,
                CheckStatus::Error {
                    message: "group 'data' not found".to_string(),
                },
            )],
        );
        assert!(!errored.overall());
    }

    #[test]
    fn empty_report_passes_vacuously() {
        let report = ValidationReport::new("test.omx", None, Vec::new());
        assert!(report.overall());
        assert_eq!(report.summary(), ResultSummary::default());
    }

    #[test]
    fn summary_counts_by_status() {
        let report = ValidationReport::new(
            "test.omx",
            None,
            vec![
                outcome(1, true, CheckStatus::Passed),
                outcome(2, true, CheckStatus::Failed),
                outcome(3, true, CheckStatus::Error {
                    message: "backend error: truncated".to_string(),
                }),
            ],
        );
        let summary = report.summary();
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errored, 1);
        assert_eq!(summary.total, 3);
    }
}
