//! Binary member expressions.
//!
//! [`BinaryExpr`] is the structural form of a comparison between two
//! operands, such as `Person.id == Passport.person_id`. The join resolver
//! consumes it to find out which operand belongs to which alias.

use std::fmt;

use super::entity::{Entity, Member, MemberRef};
use super::types::{SqlType, Value};

/// Comparison operators usable in binary member expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    /// SQL operator text.
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }
}

/// One side of a binary expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Member(MemberRef),
    Value(Value),
}

impl Operand {
    pub fn as_member(&self) -> Option<&MemberRef> {
        match self {
            Operand::Member(m) => Some(m),
            Operand::Value(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Member(m) => write!(f, "{}", m),
            Operand::Value(v) => write!(f, "{}", v),
        }
    }
}

/// A binary comparison between two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: CompareOp,
    pub left: Operand,
    pub right: Operand,
}

impl BinaryExpr {
    pub fn new(op: CompareOp, left: Operand, right: Operand) -> Self {
        Self { op, left, right }
    }

    /// Both operands as members, if this is a member-to-member comparison.
    pub fn members(&self) -> Option<(&MemberRef, &MemberRef)> {
        Some((self.left.as_member()?, self.right.as_member()?))
    }
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.symbol(), self.right)
    }
}

impl<E: Entity, T: SqlType> Member<E, T> {
    fn compare<J: Entity>(self, op: CompareOp, other: Member<J, T>) -> BinaryExpr {
        BinaryExpr::new(
            op,
            Operand::Member(self.erase()),
            Operand::Member(other.erase()),
        )
    }

    /// `self == other`
    pub fn equals<J: Entity>(self, other: Member<J, T>) -> BinaryExpr {
        self.compare(CompareOp::Eq, other)
    }

    /// `self != other`
    pub fn not_equals<J: Entity>(self, other: Member<J, T>) -> BinaryExpr {
        self.compare(CompareOp::Ne, other)
    }

    /// `self < other`
    pub fn less_than<J: Entity>(self, other: Member<J, T>) -> BinaryExpr {
        self.compare(CompareOp::Lt, other)
    }

    /// `self > other`
    pub fn greater_than<J: Entity>(self, other: Member<J, T>) -> BinaryExpr {
        self.compare(CompareOp::Gt, other)
    }

    /// `self == value`
    pub fn equals_value(self, value: impl Into<T>) -> BinaryExpr {
        let value: T = value.into();
        BinaryExpr::new(
            CompareOp::Eq,
            Operand::Member(self.erase()),
            Operand::Value(value.into()),
        )
    }
}
