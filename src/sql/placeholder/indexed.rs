//! Indexed placeholders: `{0}`, `{1}`, ...
//!
//! The builder's own neutral syntax. Callers substitute it with their
//! driver's syntax at the boundary.

use super::helpers;
use super::PlaceholderSyntax;

/// `{n}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Indexed;

impl PlaceholderSyntax for Indexed {
    fn name(&self) -> &'static str {
        "indexed"
    }

    fn placeholder(&self, index: usize) -> String {
        helpers::placeholder_braced(index)
    }
}
