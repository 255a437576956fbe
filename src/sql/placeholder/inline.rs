//! Inline literals: values are written into the command text.
//!
//! Produces an empty parameter list. Meant for logging and tests; bound
//! parameters should be preferred when executing.

use super::helpers;
use super::PlaceholderSyntax;

/// Literal text instead of placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Inline;

impl PlaceholderSyntax for Inline {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn placeholder(&self, index: usize) -> String {
        // Only reached if a caller asks for a placeholder explicitly.
        helpers::placeholder_braced(index)
    }

    fn inlines_literals(&self) -> bool {
        true
    }
}
