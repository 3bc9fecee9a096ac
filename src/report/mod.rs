//! Scan report: data model, console rendering and the JSON file.

mod render;
mod types;
mod write;

// Re-export public API
pub use render::{banner, render_summary, render_table, section};
pub use types::ScanReport;
pub use write::{report_path, write_report};
