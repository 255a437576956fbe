//! Typed entity model: entities, members, aliases and field descriptors.

pub mod alias;
pub mod entity;
pub mod expr;
pub mod field;
pub mod types;

pub use alias::{alias_for, default_alias_value, Alias, AliasRegistry, EntityAlias};
pub use entity::{Entity, EntityType, Member, MemberInfo, MemberRef};
pub use expr::{BinaryExpr, CompareOp, Operand};
pub use field::{Aggregate, FieldDescriptor};
pub use types::{SqlType, Value, ValueType};
