#![warn(missing_docs)]
//! CPUBench Report - Output Generation
//!
//! Turns a finished run into something a consumer can read: pretty JSON
//! for history/tooling hand-off, and a terminal summary for humans.
//! Report metadata (system info, timestamp) is collected here too.

mod human;
mod json;
mod meta;
mod report;

pub use human::format_human_output;
pub use json::generate_json_report;
pub use meta::build_report_meta;
pub use report::{OutputFormat, ParseFormatError, ReportMeta, RunReport, SystemInfo};
