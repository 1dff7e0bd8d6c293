use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

pub const DEFAULT_PRIORITY: &str = "Medium";

/// A single to-do entry.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub completed: bool,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

impl Task {
    pub fn new<D: Into<String>>(
        description: D,
        due_date: Option<String>,
        priority: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            due_date,
            priority: priority.unwrap_or_else(default_priority),
            completed: false,
        }
    }

    /// True when the due date is absent or a real `YYYY-MM-DD` calendar date.
    pub fn has_well_formed_due_date(&self) -> bool {
        match self.due_date.as_deref() {
            Some(value) => Date::parse(value, format_description!("[year]-[month]-[day]")).is_ok(),
            None => true,
        }
    }

    pub(crate) fn status_marker(&self) -> &'static str {
        if self.completed { "✓" } else { "✗" }
    }
}

/// `high` becomes `High`, `LOW` becomes `Low`; blank input falls back to the default.
pub fn canonical_priority(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => default_priority(),
    }
}
