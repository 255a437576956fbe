//! SQL text generation.
//!
//! - [`token`] - token types the renderer emits
//! - [`placeholder`] - placeholder styles for bound literals
//! - [`render`] - clause assembly and parameter numbering

pub mod placeholder;
pub mod render;
pub mod token;

#[cfg(test)]
pub mod test_utils;

pub use placeholder::{ParamStyle, PlaceholderSyntax};
pub use render::{render_filter, render_statement, Parameter, RenderedStatement};
pub use token::{Token, TokenStream};
