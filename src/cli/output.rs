//! Output formatting for validation reports.
//!
//! Provides terminal (human-readable, optionally colored) and JSON
//! formatters. All formatters produce valid output for any report input;
//! no function in this module panics.

use std::fmt;

use serde::Serialize;

use crate::checks::CheckStatus;
use crate::engine::report::{ResultSummary, ValidationReport};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for output formatters.
pub trait OutputFormatter {
    /// Format a validation report into a string.
    fn format(&self, report: &ValidationReport) -> String;
}

/// Pick a formatter for the requested format and flags.
pub fn get_formatter(
    format: OutputFormat,
    no_color: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(!no_color, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        TerminalFormatter {
            color,
            verbose,
            quiet,
        }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.colorize(text, "32")
    }

    fn yellow(&self, text: &str) -> String {
        self.colorize(text, "33")
    }

    fn red(&self, text: &str) -> String {
        self.colorize(text, "31")
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        output.push_str(
            "--------------------------------------------------------------------------------\n",
        );
        output.push_str(&format!("{} validation report\n", report.tool));
        output.push_str(&format!("File: {}\n", report.source));
        if let Some(ref created_with) = report.created_with {
            output.push_str(&format!("Created with: {}\n", created_with));
        }
        output.push_str(
            "--------------------------------------------------------------------------------\n",
        );

        for check in &report.checks {
            if self.quiet && check.status.passed() {
                continue;
            }

            let tag = match &check.status {
                CheckStatus::Passed => self.green("[PASS]"),
                CheckStatus::Failed | CheckStatus::Error { .. } if check.required => {
                    self.red("[FAIL]")
                }
                CheckStatus::Failed | CheckStatus::Error { .. } => self.yellow("[FAIL]"),
            };
            let required = if check.required {
                "required"
            } else {
                "optional"
            };
            output.push_str(&format!(
                "{} check {:2} ({}) {}\n",
                tag, check.number, required, check.name
            ));

            if let CheckStatus::Error { message } = &check.status {
                output.push_str(&format!("       error: {}\n", message));
            }

            if self.verbose || !check.status.passed() {
                for line in &check.details {
                    output.push_str(&format!("       {}\n", line));
                }
            }
        }

        let summary = report.summary();
        output.push_str(&format!(
            "\n{} passed, {} failed, {} errored of {} checks\n",
            summary.passed, summary.failed, summary.errored, summary.total
        ));

        let overall = if report.overall() {
            self.green("PASS")
        } else {
            self.red("FAIL")
        };
        output.push_str(&format!("Overall: {}\n", overall));

        output
    }
}

/// JSON formatter for CI consumption.
pub struct JsonFormatter {
    pretty: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ValidationReport,
    overall: bool,
    summary: ResultSummary,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let wrapped = JsonReport {
            report,
            overall: report.overall(),
            summary: report.summary(),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&wrapped)
        } else {
            serde_json::to_string(&wrapped)
        };
        rendered.unwrap_or_else(|err| format!("{{\"error\":\"{}\"}}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckOutcome;

    fn sample_report() -> ValidationReport {
        ValidationReport::new(
            "sample.omx",
            Some("python omx 0.3.3".to_string()),
            vec![
                CheckOutcome {
                    number: 1,
                    name: "OMX_VERSION attribute set to 0.2",
                    required: true,
                    status: CheckStatus::Passed,
                    details: vec!["file version is 0.2: pass".to_string()],
                },
                CheckOutcome {
                    number: 9,
                    name: "lookup group for labels/indexes if desired",
                    required: false,
                    status: CheckStatus::Failed,
                    details: vec!["group: fail".to_string()],
                },
            ],
        )
    }

    #[test]
    fn terminal_output_has_tags_and_verdict() {
        let formatter = TerminalFormatter::new(false, false, false);
        let output = formatter.format(&sample_report());
        assert!(output.contains("[PASS] check  1"));
        assert!(output.contains("[FAIL] check  9"));
        assert!(output.contains("Overall: PASS"));
        // no ANSI escapes with color disabled
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn quiet_hides_passing_checks() {
        let formatter = TerminalFormatter::new(false, false, true);
        let output = formatter.format(&sample_report());
        assert!(!output.contains("check  1"));
        assert!(output.contains("check  9"));
    }

    #[test]
    fn json_output_round_trips() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["overall"], serde_json::Value::Bool(true));
        assert_eq!(value["checks"].as_array().unwrap().len(), 2);
        assert_eq!(value["summary"]["passed"], 1);
    }
}
