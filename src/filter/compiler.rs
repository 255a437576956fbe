//! Filter predicate compiler.
//!
//! Pure constructors turning field descriptors, operators and operands into
//! [`FilterNode`] terms. The subject field always fills slot `{0}`.

use super::node::{FilterNode, FilterParameter, FilterTerm, TemplatePart};
use crate::error::{SelectError, SelectResult};
use crate::model::{CompareOp, FieldDescriptor, Value};

/// Binary comparison operators for filter terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
}

impl ComparisonOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "<>",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Lte => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Gte => ">=",
            ComparisonOperator::Like => "LIKE",
            ComparisonOperator::NotLike => "NOT LIKE",
        }
    }
}

impl From<CompareOp> for ComparisonOperator {
    fn from(op: CompareOp) -> Self {
        match op {
            CompareOp::Eq => ComparisonOperator::Eq,
            CompareOp::Ne => ComparisonOperator::Ne,
            CompareOp::Lt => ComparisonOperator::Lt,
            CompareOp::Lte => ComparisonOperator::Lte,
            CompareOp::Gt => ComparisonOperator::Gt,
            CompareOp::Gte => ComparisonOperator::Gte,
        }
    }
}

/// Set membership operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainsOperator {
    In,
    NotIn,
}

impl ContainsOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ContainsOperator::In => "IN",
            ContainsOperator::NotIn => "NOT IN",
        }
    }
}

/// `{0} <op> {1}` where `{1}` is a literal or another field.
pub fn comparison(
    field: &FieldDescriptor,
    op: ComparisonOperator,
    operand: impl Into<FilterParameter>,
) -> FilterNode {
    term(
        vec![
            TemplatePart::Slot(0),
            text(&format!(" {} ", op.as_sql())),
            TemplatePart::Slot(1),
        ],
        vec![FilterParameter::Field(field.clone()), operand.into()],
    )
}

/// `{0} <op> ({1},{2},...)`, one slot per value, order preserved.
///
/// An empty value list is rejected: `IN ()` is not valid SQL.
pub fn contains<I, V>(field: &FieldDescriptor, op: ContainsOperator, values: I) -> SelectResult<FilterNode>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let mut params = vec![FilterParameter::Field(field.clone())];
    params.extend(values.into_iter().map(|v| FilterParameter::Literal(v.into())));
    if params.len() == 1 {
        return Err(SelectError::invalid_filter(
            &format!("{{0}} {} ()", op.as_sql()),
            format!("{} list for '{}' is empty", op.as_sql(), field),
        ));
    }

    let mut parts = vec![TemplatePart::Slot(0), text(&format!(" {} (", op.as_sql()))];
    for i in 1..params.len() {
        if i > 1 {
            parts.push(text(","));
        }
        parts.push(TemplatePart::Slot(i));
    }
    parts.push(text(")"));
    Ok(term(parts, params))
}

/// `{0} IS NULL`
pub fn is_null(field: &FieldDescriptor) -> FilterNode {
    term(
        vec![TemplatePart::Slot(0), text(" IS NULL")],
        vec![field.clone().into()],
    )
}

/// `{0} IS NOT NULL`
pub fn is_not_null(field: &FieldDescriptor) -> FilterNode {
    term(
        vec![TemplatePart::Slot(0), text(" IS NOT NULL")],
        vec![field.clone().into()],
    )
}

/// `left AND right`
pub fn and(left: &FilterNode, right: &FilterNode) -> FilterNode {
    left.and(right)
}

/// `left OR right`
pub fn or(left: &FilterNode, right: &FilterNode) -> FilterNode {
    left.or(right)
}

fn text(s: &str) -> TemplatePart {
    TemplatePart::Text(s.to_string())
}

fn term(parts: Vec<TemplatePart>, params: Vec<FilterParameter>) -> FilterNode {
    FilterNode::Term(FilterTerm::from_parts(parts, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::entity! {
        struct Person as "Person" {
            id: i64 => "Id",
            last_name: String => "LastName",
        }
    }

    fn id() -> FieldDescriptor {
        FieldDescriptor::of(Person::id()).unwrap()
    }

    fn template_of(node: &FilterNode) -> String {
        match node {
            FilterNode::Term(t) => t.template().to_string(),
            FilterNode::Combinator { .. } => panic!("expected a term"),
        }
    }

    #[test]
    fn test_comparison_with_literal() {
        let node = comparison(&id(), ComparisonOperator::Gt, Value::Int(2));
        assert_eq!(template_of(&node), "{0} > {1}");
    }

    #[test]
    fn test_comparison_with_field() {
        let last_name = FieldDescriptor::of(Person::last_name()).unwrap();
        let node = comparison(&id(), ComparisonOperator::Eq, last_name.clone());
        assert_eq!(node.fields(), vec![&id(), &last_name]);
    }

    #[test]
    fn test_contains_one_slot_per_value() {
        let node = contains(&id(), ContainsOperator::In, [3, 1, 2]).unwrap();
        assert_eq!(template_of(&node), "{0} IN ({1},{2},{3})");

        let FilterNode::Term(term) = &node else {
            panic!("expected a term")
        };
        let literals: Vec<_> = term
            .params()
            .iter()
            .filter_map(|p| match p {
                FilterParameter::Literal(v) => Some(v.clone()),
                FilterParameter::Field(_) => None,
            })
            .collect();
        assert_eq!(literals, vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        assert_eq!(
            term.parts().iter().filter(|p| matches!(p, TemplatePart::Slot(_))).count(),
            4
        );
    }

    #[test]
    fn test_contains_empty_is_rejected() {
        let err = contains(&id(), ContainsOperator::NotIn, Vec::<i64>::new()).unwrap_err();
        assert!(err.to_string().contains("NOT IN list for 'pe.Id' is empty"));
    }

    #[test]
    fn test_generated_terms_match_parsed_templates() {
        let generated = [
            comparison(&id(), ComparisonOperator::NotLike, Value::Text("a%".into())),
            contains(&id(), ContainsOperator::In, [1, 2]).unwrap(),
            is_not_null(&id()),
        ];
        for node in generated {
            let FilterNode::Term(term) = &node else {
                panic!("expected a term")
            };
            let parsed = FilterNode::term(term.template(), term.params().to_vec()).unwrap();
            assert_eq!(parsed, node);
        }
    }

    #[test]
    fn test_null_checks() {
        assert_eq!(template_of(&is_null(&id())), "{0} IS NULL");
        assert_eq!(template_of(&is_not_null(&id())), "{0} IS NOT NULL");
    }

    #[test]
    fn test_operator_from_compare_op() {
        assert_eq!(ComparisonOperator::from(CompareOp::Lte), ComparisonOperator::Lte);
        assert_eq!(ComparisonOperator::NotLike.as_sql(), "NOT LIKE");
    }
}
