//! Filter predicate tree.
//!
//! A [`FilterNode`] is either a term (an expression template such as
//! `"{0} = {1}"` plus the parameters filling its slots) or an AND/OR
//! combinator over two nodes. Nodes are immutable; combinators share their
//! operands through `Arc`.

use std::fmt;
use std::sync::Arc;

use crate::error::{SelectError, SelectResult};
use crate::model::{Alias, FieldDescriptor, Value};

/// A value filling one slot of a term template.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterParameter {
    /// Rendered as `alias.column` (or `AGG(alias.column)`).
    Field(FieldDescriptor),
    /// Rendered as a positional placeholder and collected as a parameter.
    Literal(Value),
}

impl From<FieldDescriptor> for FilterParameter {
    fn from(field: FieldDescriptor) -> Self {
        FilterParameter::Field(field)
    }
}

impl From<Value> for FilterParameter {
    fn from(value: Value) -> Self {
        FilterParameter::Literal(value)
    }
}

/// Parsed piece of a term template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Text(String),
    Slot(usize),
}

/// Parse a template into text and slot parts.
///
/// `{n}` is a slot, `{{` and `}}` are literal braces.
fn parse_template(template: &str) -> SelectResult<Vec<TemplatePart>> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                text.push('{');
            }
            '{' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        _ => {
                            return Err(SelectError::invalid_filter(
                                template,
                                "slot must be a number closed by '}'",
                            ))
                        }
                    }
                }
                if digits.is_empty() {
                    return Err(SelectError::invalid_filter(template, "empty slot '{}'"));
                }
                let slot = digits.parse::<usize>().map_err(|_| {
                    SelectError::invalid_filter(
                        template,
                        format!("slot {{{}}} is out of range", digits),
                    )
                })?;
                if !text.is_empty() {
                    parts.push(TemplatePart::Text(std::mem::take(&mut text)));
                }
                parts.push(TemplatePart::Slot(slot));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                text.push('}');
            }
            '}' => {
                return Err(SelectError::invalid_filter(template, "unmatched '}'"));
            }
            other => text.push(other),
        }
    }

    if !text.is_empty() {
        parts.push(TemplatePart::Text(text));
    }
    Ok(parts)
}

/// A single predicate: template plus ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTerm {
    template: Arc<str>,
    parts: Arc<[TemplatePart]>,
    params: Arc<[FilterParameter]>,
}

impl FilterTerm {
    /// Build a term, checking that every slot indexes a parameter.
    pub fn new(template: &str, params: Vec<FilterParameter>) -> SelectResult<Self> {
        let parts = parse_template(template)?;
        for part in &parts {
            if let TemplatePart::Slot(n) = part {
                if *n >= params.len() {
                    return Err(SelectError::invalid_filter(
                        template,
                        format!("slot {{{}}} has no parameter ({} given)", n, params.len()),
                    ));
                }
            }
        }
        Ok(Self {
            template: Arc::from(template),
            parts: parts.into(),
            params: params.into(),
        })
    }

    /// Build a term from parts whose slots all index `params`.
    pub(crate) fn from_parts(parts: Vec<TemplatePart>, params: Vec<FilterParameter>) -> Self {
        debug_assert!(parts.iter().all(|p| match p {
            TemplatePart::Slot(n) => *n < params.len(),
            TemplatePart::Text(_) => true,
        }));
        let mut template = String::new();
        for part in &parts {
            match part {
                TemplatePart::Text(t) => template.push_str(&t.replace('{', "{{").replace('}', "}}")),
                TemplatePart::Slot(n) => template.push_str(&format!("{{{}}}", n)),
            }
        }
        Self {
            template: Arc::from(template),
            parts: parts.into(),
            params: params.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn params(&self) -> &[FilterParameter] {
        &self.params
    }
}

/// Boolean connective of a combinator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    And,
    Or,
}

/// A node of the predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Term(FilterTerm),
    Combinator {
        logic: Logic,
        left: Arc<FilterNode>,
        right: Arc<FilterNode>,
    },
}

impl FilterNode {
    /// A term node from a template and its parameters.
    pub fn term(template: &str, params: Vec<FilterParameter>) -> SelectResult<Self> {
        Ok(FilterNode::Term(FilterTerm::new(template, params)?))
    }

    /// `self AND other`
    pub fn and(&self, other: &FilterNode) -> FilterNode {
        self.combine(Logic::And, other)
    }

    /// `self OR other`
    pub fn or(&self, other: &FilterNode) -> FilterNode {
        self.combine(Logic::Or, other)
    }

    fn combine(&self, logic: Logic, other: &FilterNode) -> FilterNode {
        FilterNode::Combinator {
            logic,
            left: Arc::new(self.clone()),
            right: Arc::new(other.clone()),
        }
    }

    pub fn is_combinator(&self) -> bool {
        matches!(self, FilterNode::Combinator { .. })
    }

    /// Field descriptors referenced by the tree, in render order.
    pub fn fields(&self) -> Vec<&FieldDescriptor> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldDescriptor>) {
        match self {
            FilterNode::Term(term) => {
                for part in term.parts() {
                    if let TemplatePart::Slot(n) = part {
                        if let FilterParameter::Field(field) = &term.params()[*n] {
                            out.push(field);
                        }
                    }
                }
            }
            FilterNode::Combinator { left, right, .. } => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
        }
    }

    /// True when any referenced field sits on `alias`.
    pub fn references_alias(&self, alias: &Alias) -> bool {
        self.fields().iter().any(|f| f.alias() == alias)
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::And => f.write_str("AND"),
            Logic::Or => f.write_str("OR"),
        }
    }
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

    #[test]
    fn test_parse_template() {
        let parts = parse_template("{0} IN ({1},{2})").unwrap();
        assert_eq!(
            parts,
            vec![
                TemplatePart::Slot(0),
                TemplatePart::Text(" IN (".into()),
                TemplatePart::Slot(1),
                TemplatePart::Text(",".into()),
                TemplatePart::Slot(2),
                TemplatePart::Text(")".into()),
            ]
        );
    }

    #[test]
    fn test_parse_template_escaped_braces() {
        let parts = parse_template("{{x}} {0}").unwrap();
        assert_eq!(
            parts,
            vec![TemplatePart::Text("{x} ".into()), TemplatePart::Slot(0)]
        );
    }

    #[test]
    fn test_parse_template_rejects_garbage() {
        assert!(parse_template("{a}").is_err());
        assert!(parse_template("{}").is_err());
        assert!(parse_template("{0").is_err());
        assert!(parse_template("x }").is_err());
    }

    #[test]
    fn test_parse_template_overflowing_slot() {
        let err = parse_template("{99999999999999999999}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid filter '{99999999999999999999}': slot {99999999999999999999} is out of range"
        );
        assert_eq!(
            parse_template("{}").unwrap_err().to_string(),
            "Invalid filter '{}': empty slot '{}'"
        );
    }

    #[test]
    fn test_term_slot_out_of_range() {
        let err = FilterNode::term("{0} = {1}", vec![id().into()]).unwrap_err();
        assert!(matches!(err, SelectError::InvalidFilter { .. }));
        assert!(err.to_string().contains("slot {1}"));
    }

    #[test]
    fn test_combinators_share_operands() {
        let a = FilterNode::term("{0} IS NULL", vec![id().into()]).unwrap();
        let b = FilterNode::term("{0} > {1}", vec![id().into(), Value::Int(1).into()]).unwrap();
        let both = a.and(&b);
        let either = both.or(&a);

        assert!(both.is_combinator());
        assert!(!a.is_combinator());
        assert_eq!(either.fields().len(), 3);
    }

    #[test]
    fn test_references_alias() {
        let node = FilterNode::term("{0} IS NULL", vec![id().into()]).unwrap();
        assert!(node.references_alias(id().alias()));

        let other = crate::model::EntityAlias::<Person>::new("p2");
        assert!(!node.references_alias(other.alias()));
    }
}
