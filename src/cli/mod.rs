//! CLI support: report output formatting.

pub mod output;
