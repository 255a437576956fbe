//! Field descriptors and the aggregate registry.

use std::fmt;
use std::sync::Arc;

use super::alias::{Alias, EntityAlias};
use super::entity::{Entity, EntityType, Member};
use super::types::{SqlType, ValueType};
use crate::error::{SelectError, SelectResult};
use crate::metadata::MetadataProvider;

// =============================================================================
// Aggregates
// =============================================================================

/// Aggregate functions a field can be wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregate {
    /// SQL keyword for the function.
    pub fn keyword(&self) -> &'static str {
        match self {
            Aggregate::Count => "COUNT",
            Aggregate::Sum => "SUM",
            Aggregate::Avg => "AVG",
            Aggregate::Min => "MIN",
            Aggregate::Max => "MAX",
        }
    }

    /// Result type of the aggregate over a column of type `column`.
    pub fn result_type(&self, column: ValueType) -> ValueType {
        match self {
            Aggregate::Count => ValueType::Int,
            Aggregate::Avg => ValueType::Float,
            Aggregate::Sum | Aggregate::Min | Aggregate::Max => column,
        }
    }
}

// =============================================================================
// Field Descriptor
// =============================================================================

/// A column, optionally wrapped in an aggregate, on a specific alias.
///
/// Two descriptors are equal iff entity, value type, column, alias and
/// aggregate all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    entity: EntityType,
    value_type: ValueType,
    column: Arc<str>,
    alias: Alias,
    aggregate: Option<Aggregate>,
}

impl FieldDescriptor {
    /// Build a plain column reference.
    ///
    /// Fails with [`SelectError::InvalidField`] when the column name is empty
    /// or no alias (or a blank one) is given.
    pub fn new(
        entity: EntityType,
        value_type: ValueType,
        column: &str,
        alias: Option<Alias>,
    ) -> SelectResult<Self> {
        if column.trim().is_empty() {
            return Err(SelectError::InvalidField {
                entity: entity.name().to_string(),
                reason: "column name is empty".into(),
            });
        }
        let alias = alias.ok_or_else(|| SelectError::InvalidField {
            entity: entity.name().to_string(),
            reason: format!("column '{}' has no alias", column),
        })?;
        if alias.is_blank() {
            return Err(SelectError::InvalidField {
                entity: entity.name().to_string(),
                reason: format!("column '{}' has an empty alias", column),
            });
        }
        Ok(Self {
            entity,
            value_type,
            column: Arc::from(column),
            alias,
            aggregate: None,
        })
    }

    /// Wrap this field in an aggregate.
    ///
    /// The declared value type becomes the aggregate's result type.
    pub fn aggregated(&self, aggregate: Aggregate) -> Self {
        Self {
            value_type: aggregate.result_type(self.value_type),
            aggregate: Some(aggregate),
            ..self.clone()
        }
    }

    /// Column reference for a typed member on the default alias of `E`.
    pub fn of<E: Entity, T: SqlType>(member: Member<E, T>) -> SelectResult<Self> {
        Self::of_in(member, &EntityAlias::default())
    }

    /// Column reference for a typed member on an explicit alias.
    pub fn of_in<E: Entity, T: SqlType>(
        member: Member<E, T>,
        alias: &EntityAlias<E>,
    ) -> SelectResult<Self> {
        Self::resolve_with(MetadataProvider::global(), member, alias)
    }

    /// Column reference resolved through a specific metadata provider.
    pub fn resolve_with<E: Entity, T: SqlType>(
        provider: &MetadataProvider,
        member: Member<E, T>,
        alias: &EntityAlias<E>,
    ) -> SelectResult<Self> {
        let member = member.erase();
        let column = provider.resolve_column_name(&member)?;
        Self::new(
            member.entity,
            member.value_type,
            &column,
            Some(alias.alias().clone()),
        )
    }

    /// `COUNT(alias.column)` on the default alias.
    pub fn count<E: Entity, T: SqlType>(member: Member<E, T>) -> SelectResult<Self> {
        Ok(Self::of(member)?.aggregated(Aggregate::Count))
    }

    /// `COUNT(alias.column)` on an explicit alias value.
    pub fn count_in<E: Entity, T: SqlType>(
        member: Member<E, T>,
        alias: &str,
    ) -> SelectResult<Self> {
        Ok(Self::of_in(member, &EntityAlias::new(alias))?.aggregated(Aggregate::Count))
    }

    pub fn sum<E: Entity, T: SqlType>(member: Member<E, T>) -> SelectResult<Self> {
        Ok(Self::of(member)?.aggregated(Aggregate::Sum))
    }

    pub fn avg<E: Entity, T: SqlType>(member: Member<E, T>) -> SelectResult<Self> {
        Ok(Self::of(member)?.aggregated(Aggregate::Avg))
    }

    pub fn min<E: Entity, T: SqlType>(member: Member<E, T>) -> SelectResult<Self> {
        Ok(Self::of(member)?.aggregated(Aggregate::Min))
    }

    pub fn max<E: Entity, T: SqlType>(member: Member<E, T>) -> SelectResult<Self> {
        Ok(Self::of(member)?.aggregated(Aggregate::Max))
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    pub fn aggregate(&self) -> Option<Aggregate> {
        self.aggregate
    }
}

impl fmt::Display for FieldDescriptor {
    /// `alias.column`, or `AGG(alias.column)` for aggregates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.aggregate {
            Some(agg) => write!(f, "{}({}.{})", agg.keyword(), self.alias, self.column),
            None => write!(f, "{}.{}", self.alias, self.column),
        }
    }
}
