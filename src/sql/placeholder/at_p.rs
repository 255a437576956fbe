//! Named positional placeholders: `@p0`, `@p1`, ...
//!
//! The convention of SQL Server drivers.

use super::helpers;
use super::PlaceholderSyntax;

/// `@pN` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct AtP;

impl PlaceholderSyntax for AtP {
    fn name(&self) -> &'static str {
        "at_p"
    }

    fn placeholder(&self, index: usize) -> String {
        helpers::placeholder_at_p(index)
    }
}
