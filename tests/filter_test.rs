//! Filter compilation and predicate rendering.

use pretty_assertions::assert_eq;
use sqlselect::filter::compiler;
use sqlselect::filter::{FilterParameter, TemplatePart};
use sqlselect::prelude::*;
use sqlselect::sql::render_filter;

sqlselect::entity! {
    pub struct Person as "Person" {
        id: i64 => "Id",
        last_name: String => "LastName",
        active: bool => "IsActive",
    }
}

fn id() -> FieldDescriptor {
    FieldDescriptor::of(Person::id()).unwrap()
}

fn text(node: &FilterNode) -> String {
    render_filter(node, &RenderSettings::default())
        .unwrap()
        .command_text
}

#[test]
fn test_or_of_and_parenthesizes_only_the_and() {
    let a = Filter::field(Person::id()).unwrap().gt(1);
    let b = Filter::field(Person::last_name()).unwrap().is_not_null();
    let c = Filter::field(Person::active()).unwrap().eq(true);

    let node = compiler::or(&compiler::and(a.node(), b.node()), c.node());
    assert_eq!(
        text(&node),
        "(pe.Id > {0} AND pe.LastName IS NOT NULL) OR pe.IsActive = {1}"
    );
}

#[test]
fn test_deep_nesting() {
    let a = compiler::is_null(&id());
    let b = compiler::is_not_null(&id());
    let node = a.or(&b).and(&a.and(&b).or(&b));

    assert_eq!(
        text(&node),
        "(pe.Id IS NULL OR pe.Id IS NOT NULL) AND ((pe.Id IS NULL AND pe.Id IS NOT NULL) OR pe.Id IS NOT NULL)"
    );
}

#[test]
fn test_in_list_has_one_placeholder_per_value() {
    let values = [9, 2, 7, 4];
    let node = compiler::contains(&id(), ContainsOperator::In, values).unwrap();

    let FilterNode::Term(term) = &node else {
        panic!("expected a term")
    };
    let slots = term
        .parts()
        .iter()
        .filter(|p| matches!(p, TemplatePart::Slot(_)))
        .count();
    assert_eq!(slots, values.len() + 1);

    let rendered = render_filter(&node, &RenderSettings::default()).unwrap();
    assert_eq!(rendered.command_text, "pe.Id IN ({0},{1},{2},{3})");
    let expected: Vec<Value> = values.iter().map(|v| Value::from(*v)).collect();
    assert_eq!(rendered.values(), expected.iter().collect::<Vec<_>>());
}

#[test]
fn test_not_in_and_empty_list() {
    let node = Filter::field(Person::last_name())
        .unwrap()
        .not_in_values(["a", "b"])
        .unwrap();
    assert_eq!(text(node.node()), "pe.LastName NOT IN ({0},{1})");

    let err = Filter::field(Person::id())
        .unwrap()
        .in_values(Vec::<i64>::new())
        .unwrap_err();
    assert!(matches!(err, SelectError::InvalidFilter { .. }));
}

#[test]
fn test_comparison_operators() {
    let f = || Filter::field(Person::id()).unwrap();
    let cases = [
        (f().eq(1), "pe.Id = {0}"),
        (f().ne(1), "pe.Id <> {0}"),
        (f().lt(1), "pe.Id < {0}"),
        (f().lte(1), "pe.Id <= {0}"),
        (f().gt(1), "pe.Id > {0}"),
        (f().gte(1), "pe.Id >= {0}"),
    ];
    for (filter, expected) in cases {
        assert_eq!(text(filter.node()), expected);
    }

    let like = Filter::field(Person::last_name()).unwrap().not_like("A%");
    assert_eq!(text(like.node()), "pe.LastName NOT LIKE {0}");
}

#[test]
fn test_custom_term() {
    let node = FilterNode::term(
        "LEN({0}) > {1}",
        vec![
            FilterParameter::Field(FieldDescriptor::of(Person::last_name()).unwrap()),
            FilterParameter::Literal(Value::Int(3)),
        ],
    )
    .unwrap();
    let rendered = render_filter(&node, &RenderSettings::inline()).unwrap();
    assert_eq!(rendered.command_text, "LEN(pe.LastName) > 3");
}

#[test]
fn test_custom_term_validation() {
    let err = FilterNode::term("{0} = {2}", vec![id().into(), Value::Int(1).into()]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid filter '{0} = {2}': slot {2} has no parameter (2 given)"
    );
}

#[test]
fn test_inline_values() {
    let node = Filter::field(Person::active())
        .unwrap()
        .eq(false)
        .and(Filter::field(Person::last_name()).unwrap().eq("it's"));
    let rendered = render_filter(node.node(), &RenderSettings::inline()).unwrap();
    assert_eq!(rendered.command_text, "pe.IsActive = 0 AND pe.LastName = 'it''s'");
}
