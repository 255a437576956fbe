//! PostgreSQL placeholders: `$1`, `$2`, ...
//!
//! 1-based, unlike the parameter indices reported alongside them.

use super::helpers;
use super::PlaceholderSyntax;

/// `$N` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Dollar;

impl PlaceholderSyntax for Dollar {
    fn name(&self) -> &'static str {
        "dollar"
    }

    fn placeholder(&self, index: usize) -> String {
        helpers::placeholder_dollar(index)
    }
}
