//! Check execution and reporting.

pub mod report;
pub mod runner;
