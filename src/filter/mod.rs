//! Filter predicates: the boolean expression tree behind WHERE, HAVING and
//! JOIN ... ON clauses.
//!
//! - [`node`] - the immutable predicate tree
//! - [`compiler`] - pure constructors for comparison, containment and null terms
//! - [`typed`] - the per-entity fluent front end

pub mod compiler;
pub mod node;
pub mod typed;

pub use compiler::{ComparisonOperator, ContainsOperator};
pub use node::{FilterNode, FilterParameter, FilterTerm, Logic, TemplatePart};
pub use typed::{FieldFilter, Filter};
