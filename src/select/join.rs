//! Join resolver.
//!
//! Turns a binary member expression (or a ready-made filter) into a
//! [`Join`] clause: which entity is joined, on which alias, and under which
//! condition.

use std::fmt;

use crate::error::{SelectError, SelectResult};
use crate::filter::compiler::{self, ComparisonOperator};
use crate::filter::FilterNode;
use crate::metadata::MetadataProvider;
use crate::model::{Alias, BinaryExpr, CompareOp, FieldDescriptor, MemberRef};

/// Type of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        };
        f.write_str(s)
    }
}

/// A JOIN clause: the joined alias and its condition.
///
/// Cross joins carry no condition; every other kind carries exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    kind: JoinKind,
    alias: Alias,
    condition: Option<FilterNode>,
}

impl Join {
    /// `CROSS JOIN <table> <alias>`
    pub fn cross(alias: Alias) -> Self {
        Self {
            kind: JoinKind::Cross,
            alias,
            condition: None,
        }
    }

    /// `<kind> JOIN <table> <alias> ON <condition>`
    pub fn on(kind: JoinKind, alias: Alias, condition: FilterNode) -> SelectResult<Self> {
        if kind == JoinKind::Cross {
            return Err(SelectError::join(
                "CROSS JOIN takes no condition",
                alias.value(),
            ));
        }
        Ok(Self {
            kind,
            alias,
            condition: Some(condition),
        })
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    pub fn condition(&self) -> Option<&FilterNode> {
        self.condition.as_ref()
    }
}

/// Build a join from an equality between a member of the left alias and a
/// member of the joined alias.
///
/// The operands may appear in either order; the rendered condition keeps
/// the order of the expression. When both aliases share an entity type
/// (self-join) the left operand binds to `left_alias`.
pub fn join_from_equality(
    provider: &MetadataProvider,
    kind: JoinKind,
    expr: &BinaryExpr,
    left_alias: &Alias,
    join_alias: &Alias,
) -> SelectResult<Join> {
    let (left, right) = match expr.members() {
        Some(members) if expr.op == CompareOp::Eq => members,
        _ => return Err(SelectError::join("Invalid join expression", expr)),
    };

    let (left_on, right_on) = if left.entity == left_alias.entity()
        && right.entity == join_alias.entity()
    {
        (left_alias, join_alias)
    } else if left.entity == join_alias.entity() && right.entity == left_alias.entity() {
        (join_alias, left_alias)
    } else {
        return Err(SelectError::join(
            &format!(
                "Join expression does not relate '{}' to '{}'",
                left_alias.entity(),
                join_alias.entity()
            ),
            expr,
        ));
    };

    tracing::debug!(
        expr = %expr,
        left = %left_on,
        right = %right_on,
        join = %join_alias,
        "resolved join orientation"
    );

    let left_field = resolve(provider, left, left_on)?;
    let right_field = resolve(provider, right, right_on)?;
    let condition = compiler::comparison(&left_field, ComparisonOperator::Eq, right_field);

    Join::on(kind, join_alias.clone(), condition)
}

/// Build a join from a caller-supplied condition.
///
/// Only the join kind is checked here; alias uniqueness is checked when the
/// join is added to a statement, alias consistency when it is rendered.
pub fn join_from_filter(kind: JoinKind, condition: FilterNode, join_alias: &Alias) -> SelectResult<Join> {
    Join::on(kind, join_alias.clone(), condition)
}

fn resolve(provider: &MetadataProvider, member: &MemberRef, alias: &Alias) -> SelectResult<FieldDescriptor> {
    let column = provider.resolve_column_name(member)?;
    FieldDescriptor::new(member.entity, member.value_type, &column, Some(alias.clone()))
}
