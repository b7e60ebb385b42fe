//! Digest rendering
//!
//! Drives the two filters the way a template host does: extract once per
//! category, collect the results into a categorized mapping, format each
//! category and join the lines.

use std::fs;
use std::path::Path;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::Result;
use crate::extract::categorize;
use crate::format::extract_and_format_lines;
use crate::registry::register_filters;
use crate::update::Updates;

pub const DEFAULT_TEMPLATE_NAME: &str = "update_digest.txt";

/// Built-in layout: every category's lines, joined by `separator`
pub const DEFAULT_REPORT_TEMPLATE: &str = "{% for category in categories %}\
{{ category | extract_and_format_lines(categorized=categorized) | join(sep=separator) }}\
{% if not loop.last %}{{ separator }}{% endif %}\
{% endfor %}";

/// All report lines for `categories`, in category order
pub fn report_lines(categories: &[String], updates: &Updates) -> Vec<String> {
    let categorized = categorize(categories, updates);

    categorized
        .keys()
        .flat_map(|category| extract_and_format_lines(category, &categorized))
        .collect()
}

pub fn render_report(categories: &[String], updates: &Updates, separator: &str) -> String {
    report_lines(categories, updates).join(separator)
}

/// Renders digests through Tera with the update filters registered
pub struct ReportRenderer {
    engine: Tera,
    template_name: String,
}

impl ReportRenderer {
    pub fn new() -> Result<Self> {
        Self::with_template(DEFAULT_TEMPLATE_NAME, DEFAULT_REPORT_TEMPLATE)
    }

    pub fn with_template(name: &str, template: &str) -> Result<Self> {
        let mut engine = Tera::default();
        engine.autoescape_on(vec![]);
        register_filters(&mut engine);
        engine.add_raw_template(name, template)?;

        Ok(Self {
            engine,
            template_name: name.to_string(),
        })
    }

    pub fn from_template_file(path: &Path) -> Result<Self> {
        let template = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_TEMPLATE_NAME);
        debug!("Loading report template from {}", path.display());
        Self::with_template(name, &template)
    }

    /// Render the digest for `categories`
    ///
    /// The template context holds `categories`, `updates`, `categorized`
    /// (the extraction result per category) and `separator`.
    pub fn render(
        &self,
        categories: &[String],
        updates: &Updates,
        separator: &str,
    ) -> Result<String> {
        let categorized = categorize(categories, updates);

        let mut context = Context::new();
        context.insert("categories", &categorized.keys().collect::<Vec<_>>());
        context.insert("updates", updates);
        context.insert("categorized", &categorized);
        context.insert("separator", separator);

        debug!(
            "Rendering '{}' for {} categories over {} updates",
            self.template_name,
            categorized.len(),
            updates.len()
        );

        Ok(self.engine.render(&self.template_name, &context)?)
    }
}
