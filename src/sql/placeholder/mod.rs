//! Placeholder styles.
//!
//! The builder numbers literal parameters itself; a style decides only how
//! a parameter index is spelled in the command text:
//!
//! | Style | Token for index 0 | Typical driver |
//! |-------|-------------------|----------------|
//! | `indexed` | `{0}` | none (neutral, substituted by the caller) |
//! | `at_p` | `@p0` | SQL Server |
//! | `dollar` | `$1` | PostgreSQL |
//! | `question` | `?` | ODBC, MySQL, SQLite |
//! | `inline` | the literal itself | logging, tests |
//!
//! # Usage
//!
//! ```ignore
//! use sqlselect::sql::placeholder::{ParamStyle, PlaceholderSyntax};
//!
//! assert_eq!(ParamStyle::Dollar.placeholder(0), "$1");
//! ```

pub mod helpers;
mod at_p;
mod dollar;
mod indexed;
mod inline;
mod question;

pub use at_p::AtP;
pub use dollar::Dollar;
pub use indexed::Indexed;
pub use inline::Inline;
pub use question::Question;

use serde::{Deserialize, Serialize};

use crate::model::Value;

/// Placeholder syntax trait - defines how bound parameters are spelled.
pub trait PlaceholderSyntax: std::fmt::Debug {
    /// Style name for display/logging.
    fn name(&self) -> &'static str;

    /// Placeholder text for the parameter at `index` (0-based).
    fn placeholder(&self, index: usize) -> String;

    /// Whether literals are written into the text instead of being bound.
    fn inlines_literals(&self) -> bool {
        false
    }

    /// Whether placeholders carry no index, so a value reused in the text
    /// must be bound once per occurrence.
    fn is_positional(&self) -> bool {
        false
    }

    /// Literal text for inline rendering; `None` when the value has no
    /// SQL literal form.
    fn format_literal(&self, value: &Value) -> Option<String> {
        helpers::format_literal(value)
    }
}

/// Supported placeholder styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamStyle {
    #[default]
    Indexed,
    AtP,
    Dollar,
    Question,
    Inline,
}

impl ParamStyle {
    /// Get the style implementation.
    pub fn syntax(&self) -> &'static dyn PlaceholderSyntax {
        match self {
            ParamStyle::Indexed => &Indexed,
            ParamStyle::AtP => &AtP,
            ParamStyle::Dollar => &Dollar,
            ParamStyle::Question => &Question,
            ParamStyle::Inline => &Inline,
        }
    }
}

// Implement PlaceholderSyntax for ParamStyle by delegating to concrete types
impl PlaceholderSyntax for ParamStyle {
    fn name(&self) -> &'static str {
        self.syntax().name()
    }

    fn placeholder(&self, index: usize) -> String {
        self.syntax().placeholder(index)
    }

    fn inlines_literals(&self) -> bool {
        self.syntax().inlines_literals()
    }

    fn is_positional(&self) -> bool {
        self.syntax().is_positional()
    }

    fn format_literal(&self, value: &Value) -> Option<String> {
        self.syntax().format_literal(value)
    }
}

impl std::fmt::Display for ParamStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.syntax().name())
    }
}
