//! # update-digest
//!
//! Category filters for rendering update digests with Tera.
//!
//! ## Usage
//!
//! ```text
//! {{ "Security" | extract_category_updates(updates=updates) }}
//! {{ "Security" | extract_and_format_lines(categorized=categorized) }}
//! ```
//!
//! ## Modules
//!
//! - `update` - Update records and the ordered collections built from them
//! - `extract` - Case-insensitive substring extraction of updates by category
//! - `format` - Header, bullet and spacing lines for one category
//! - `registry` - Fixed filter table and Tera registration
//! - `report` - Host-side digest rendering, direct or through a Tera template
//! - `loader` - YAML/JSON loading and shape checks for update data
//! - `config` - Report configuration from TOML and environment
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod loader;
pub mod registry;
pub mod report;
pub mod update;

#[cfg(test)]
mod property_tests;

pub use error::{Error, Result};
pub use extract::{categorize, extract_category_updates};
pub use format::extract_and_format_lines;
pub use registry::{register_filters, Filter, FilterRegistry};
pub use report::{render_report, ReportRenderer};
pub use update::{CategorizedUpdates, CategoryMatch, UpdateId, UpdateRecord, Updates};
