//! Anonymous placeholders: `?`.
//!
//! Used by ODBC, MySQL and SQLite drivers; binding is purely positional.

use super::PlaceholderSyntax;

/// `?` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Question;

impl PlaceholderSyntax for Question {
    fn name(&self) -> &'static str {
        "question"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn is_positional(&self) -> bool {
        true
    }
}
