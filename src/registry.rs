//! Filter registration for the Tera template engine
//!
//! The table of filters is fixed at compile time. Templates receive the
//! category name as the piped value:
//!
//! ```text
//! {{ "Security" | extract_category_updates(updates=updates) }}
//! {{ "Security" | extract_and_format_lines(categorized=categorized) }}
//! ```
//!
//! Loops need the result bound first, since Tera cannot iterate a filter
//! applied to a literal:
//!
//! ```text
//! {% set matches = "Security" | extract_category_updates(updates=updates) %}
//! {% for pair in matches %}{{ pair.0 }}{% endfor %}
//! ```
//!
//! Template values with the wrong layout are rejected with a Tera error that
//! names the filter and the offending argument.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tera::{Tera, Value};
use tracing::debug;

use crate::error::Error;
use crate::extract::extract_category_updates;
use crate::format::extract_and_format_lines;
use crate::loader::{categorized_from_value, updates_from_value};

/// Signature shared by every registered filter
pub type FilterFn = fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>;

/// A function exposed to templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    ExtractCategoryUpdates,
    ExtractAndFormatLines,
}

impl Filter {
    pub const ALL: [Filter; 2] = [Filter::ExtractCategoryUpdates, Filter::ExtractAndFormatLines];

    /// Name the filter is registered under
    pub fn name(self) -> &'static str {
        match self {
            Filter::ExtractCategoryUpdates => "extract_category_updates",
            Filter::ExtractAndFormatLines => "extract_and_format_lines",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.name() == name)
    }

    /// Keyword argument carrying the filter's data
    pub fn data_arg(self) -> &'static str {
        match self {
            Filter::ExtractCategoryUpdates => "updates",
            Filter::ExtractAndFormatLines => "categorized",
        }
    }

    fn function(self) -> FilterFn {
        match self {
            Filter::ExtractCategoryUpdates => extract_category_updates_filter,
            Filter::ExtractAndFormatLines => extract_and_format_lines_filter,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::NotFound(format!("Filter '{s}' not found")))
    }
}

/// Read-only table from filter name to filter function
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    entries: Vec<(Filter, FilterFn)>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self {
            entries: Filter::ALL
                .into_iter()
                .map(|filter| (filter, filter.function()))
                .collect(),
        }
    }

    /// Look up a filter function by its registered name
    pub fn get(&self, name: &str) -> Option<FilterFn> {
        self.entries
            .iter()
            .find(|(filter, _)| filter.name() == name)
            .map(|(_, function)| *function)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(filter, _)| filter.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FilterFn)> + '_ {
        self.entries
            .iter()
            .map(|(filter, function)| (filter.name(), *function))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Install every filter on `tera`
    pub fn register(&self, tera: &mut Tera) {
        for (name, function) in self.iter() {
            debug!("Registering template filter '{}'", name);
            tera.register_filter(name, function);
        }
    }
}

/// Install the default filter set on `tera`
pub fn register_filters(tera: &mut Tera) {
    FilterRegistry::new().register(tera);
}

fn extract_category_updates_filter(
    value: &Value,
    args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let filter = Filter::ExtractCategoryUpdates;
    let category_name = category_name(filter, value)?;
    let updates =
        updates_from_value(data_arg(filter, args)?.clone()).map_err(|e| shape_error(filter, e))?;

    let matches = extract_category_updates(category_name, &updates);
    tera::to_value(matches).map_err(|e| {
        tera::Error::msg(format!(
            "Filter `{filter}` failed to serialize matches: {e}"
        ))
    })
}

fn extract_and_format_lines_filter(
    value: &Value,
    args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let filter = Filter::ExtractAndFormatLines;
    let category_name = category_name(filter, value)?;
    let categorized = categorized_from_value(data_arg(filter, args)?.clone())
        .map_err(|e| shape_error(filter, e))?;

    let lines = extract_and_format_lines(category_name, &categorized);
    Ok(Value::Array(lines.into_iter().map(Value::String).collect()))
}

fn category_name(filter: Filter, value: &Value) -> tera::Result<&str> {
    value.as_str().ok_or_else(|| {
        tera::Error::msg(format!(
            "Filter `{filter}` expects a category name string as input, got `{value}`"
        ))
    })
}

fn data_arg<'a>(filter: Filter, args: &'a HashMap<String, Value>) -> tera::Result<&'a Value> {
    let name = filter.data_arg();
    args.get(name).ok_or_else(|| {
        tera::Error::msg(format!("Filter `{filter}` expected an argument `{name}`"))
    })
}

fn shape_error(filter: Filter, err: Error) -> tera::Error {
    tera::Error::msg(format!("Filter `{filter}` received invalid data: {err}"))
}
