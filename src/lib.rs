//! # sqlselect
//!
//! A typed SQL SELECT builder. Entities, members, filters and joins go in;
//! deterministic command text plus an ordered parameter list come out. No
//! database connection is ever touched.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        entity! declarations (Entity, Member<E, T>)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata: member -> column, memoized]
//! ┌─────────────────────────────────────────────────────────┐
//! │     FieldDescriptor / FilterNode / Join (immutable)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [select: Select<E> builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 StatementDescriptor                      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql: validate, tokens, placeholders]
//! ┌─────────────────────────────────────────────────────────┐
//! │     RenderedStatement { command_text, parameters }       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use sqlselect::prelude::*;
//!
//! sqlselect::entity! {
//!     pub struct Person as "Person" {
//!         id: i64 => "Id",
//!         last_name: String => "LastName",
//!     }
//! }
//!
//! let rendered = Select::<Person>::new()
//!     .add_member(Person::id())?
//!     .filter(Filter::field(Person::last_name())?.is_not_null())
//!     .render()?;
//!
//! assert_eq!(
//!     rendered.command_text,
//!     "SELECT\n    pe.Id\nFROM\n    Person pe\nWHERE\n    pe.LastName IS NOT NULL"
//! );
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod model;
pub mod select;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{RenderSettings, Settings};
    pub use crate::error::{SelectError, SelectResult};
    pub use crate::filter::{ComparisonOperator, ContainsOperator, FieldFilter, Filter, FilterNode};
    pub use crate::model::{
        alias_for, Aggregate, Alias, BinaryExpr, Entity, EntityAlias, FieldDescriptor, Member,
        Value,
    };
    pub use crate::select::{JoinKind, OrderByField, Select, SortDir};
    pub use crate::sql::{ParamStyle, RenderedStatement};
}

// Also export at crate root for convenience
pub use error::{SelectError, SelectResult};
pub use select::{Select, StatementDescriptor};
pub use sql::RenderedStatement;
