//! Statement assembly.
//!
//! - [`join`] - join kinds and the join resolver
//! - [`statement`] - the immutable [`StatementDescriptor`]
//! - [`builder`] - the typed [`Select`] front end

pub mod builder;
pub mod join;
pub mod statement;

pub use builder::Select;
pub use join::{join_from_equality, join_from_filter, Join, JoinKind};
pub use statement::{OrderByField, SortDir, StatementDescriptor, Top};
