//! Typed per-entity filter front end.
//!
//! [`Filter<E>`] wraps a [`FilterNode`] rooted at entity `E`;
//! [`FieldFilter<E, T>`] is the intermediate state positioned on one field
//! of type `T`, waiting for an operator.
//!
//! ```ignore
//! let filter = Filter::field(Person::last_name())?
//!     .is_not_null()
//!     .and(Filter::field(Person::id())?.gt(2));
//! ```

use std::marker::PhantomData;

use super::compiler::{self, ComparisonOperator, ContainsOperator};
use super::node::FilterNode;
use crate::error::SelectResult;
use crate::metadata::MetadataProvider;
use crate::model::{Entity, EntityAlias, FieldDescriptor, Member, SqlType, Value};

/// A compiled predicate rooted at entity `E`.
pub struct Filter<E> {
    node: FilterNode,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Entity> Filter<E> {
    /// Start a filter on a member of `E` with the default alias.
    pub fn field<T: SqlType>(member: Member<E, T>) -> SelectResult<FieldFilter<E, T>> {
        Ok(FieldFilter::new(FieldDescriptor::of(member)?))
    }

    /// Start a filter on a member of `E` with an explicit alias.
    pub fn field_in<T: SqlType>(
        member: Member<E, T>,
        alias: &EntityAlias<E>,
    ) -> SelectResult<FieldFilter<E, T>> {
        Ok(FieldFilter::new(FieldDescriptor::of_in(member, alias)?))
    }

    /// Start a filter on a member resolved through `provider`.
    pub fn field_with<T: SqlType>(
        provider: &MetadataProvider,
        member: Member<E, T>,
        alias: &EntityAlias<E>,
    ) -> SelectResult<FieldFilter<E, T>> {
        Ok(FieldFilter::new(FieldDescriptor::resolve_with(
            provider, member, alias,
        )?))
    }

    /// Start a filter on an existing field descriptor, e.g. an aggregate.
    pub fn from_field<T: SqlType>(field: FieldDescriptor) -> FieldFilter<E, T> {
        FieldFilter::new(field)
    }

    /// Wrap an already compiled node.
    pub fn from_node(node: FilterNode) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    /// `self AND other`
    pub fn and(self, other: impl Into<FilterNode>) -> Self {
        Self::from_node(compiler::and(&self.node, &other.into()))
    }

    /// `self OR other`
    pub fn or(self, other: impl Into<FilterNode>) -> Self {
        Self::from_node(compiler::or(&self.node, &other.into()))
    }

    pub fn node(&self) -> &FilterNode {
        &self.node
    }

    pub fn into_node(self) -> FilterNode {
        self.node
    }
}

impl<E> Clone for Filter<E> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for Filter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Filter").field(&self.node).finish()
    }
}

impl<E> From<Filter<E>> for FilterNode {
    fn from(filter: Filter<E>) -> Self {
        filter.node
    }
}

/// A filter positioned on one field of type `T`.
pub struct FieldFilter<E, T> {
    field: FieldDescriptor,
    _marker: PhantomData<fn() -> (E, T)>,
}

impl<E: Entity, T: SqlType> FieldFilter<E, T> {
    fn new(field: FieldDescriptor) -> Self {
        Self {
            field,
            _marker: PhantomData,
        }
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    fn value(self, op: ComparisonOperator, value: impl Into<T>) -> Filter<E> {
        let value: T = value.into();
        let value: Value = value.into();
        Filter::from_node(compiler::comparison(&self.field, op, value))
    }

    /// `field = value`
    pub fn eq(self, value: impl Into<T>) -> Filter<E> {
        self.value(ComparisonOperator::Eq, value)
    }

    /// `field <> value`
    pub fn ne(self, value: impl Into<T>) -> Filter<E> {
        self.value(ComparisonOperator::Ne, value)
    }

    /// `field < value`
    pub fn lt(self, value: impl Into<T>) -> Filter<E> {
        self.value(ComparisonOperator::Lt, value)
    }

    /// `field <= value`
    pub fn lte(self, value: impl Into<T>) -> Filter<E> {
        self.value(ComparisonOperator::Lte, value)
    }

    /// `field > value`
    pub fn gt(self, value: impl Into<T>) -> Filter<E> {
        self.value(ComparisonOperator::Gt, value)
    }

    /// `field >= value`
    pub fn gte(self, value: impl Into<T>) -> Filter<E> {
        self.value(ComparisonOperator::Gte, value)
    }

    /// Compare against another field descriptor.
    pub fn compare_field(self, op: ComparisonOperator, other: FieldDescriptor) -> Filter<E> {
        Filter::from_node(compiler::comparison(&self.field, op, other))
    }

    /// `field = other` where `other` is a member of `J` on its default alias.
    pub fn eq_field<J: Entity>(self, other: Member<J, T>) -> SelectResult<Filter<E>> {
        self.eq_field_in(other, &EntityAlias::default())
    }

    /// `field = other` where `other` is a member of `J` on `alias`.
    pub fn eq_field_in<J: Entity>(
        self,
        other: Member<J, T>,
        alias: &EntityAlias<J>,
    ) -> SelectResult<Filter<E>> {
        let other = FieldDescriptor::of_in(other, alias)?;
        Ok(self.compare_field(ComparisonOperator::Eq, other))
    }

    /// `field IS NULL`
    pub fn is_null(self) -> Filter<E> {
        Filter::from_node(compiler::is_null(&self.field))
    }

    /// `field IS NOT NULL`
    pub fn is_not_null(self) -> Filter<E> {
        Filter::from_node(compiler::is_not_null(&self.field))
    }

    /// `field IN (values...)`; fails on an empty list.
    pub fn in_values<I>(self, values: I) -> SelectResult<Filter<E>>
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        self.contains(ContainsOperator::In, values)
    }

    /// `field NOT IN (values...)`; fails on an empty list.
    pub fn not_in_values<I>(self, values: I) -> SelectResult<Filter<E>>
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        self.contains(ContainsOperator::NotIn, values)
    }

    fn contains<I>(self, op: ContainsOperator, values: I) -> SelectResult<Filter<E>>
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let values = values.into_iter().map(|v| -> Value {
            let v: T = v.into();
            v.into()
        });
        Ok(Filter::from_node(compiler::contains(&self.field, op, values)?))
    }
}

impl<E: Entity> FieldFilter<E, String> {
    /// `field LIKE pattern`
    pub fn like(self, pattern: impl Into<String>) -> Filter<E> {
        self.value(ComparisonOperator::Like, pattern)
    }

    /// `field NOT LIKE pattern`
    pub fn not_like(self, pattern: impl Into<String>) -> Filter<E> {
        self.value(ComparisonOperator::NotLike, pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::node::{FilterParameter, Logic};

    crate::entity! {
        struct Person as "Person" {
            id: i64 => "Id",
            last_name: String => "LastName",
        }
    }

    crate::entity! {
        struct Passport as "Passport" {
            person_id: i64 => "PersonId",
        }
    }

    #[test]
    fn test_typed_comparison() {
        let filter = Filter::field(Person::id()).unwrap().gt(2);
        let FilterNode::Term(term) = filter.node() else {
            panic!("expected a term")
        };
        assert_eq!(term.template(), "{0} > {1}");
        assert_eq!(term.params()[1], FilterParameter::Literal(Value::Int(2)));
    }

    #[test]
    fn test_field_to_field_on_other_entity() {
        let filter = Filter::field(Person::id())
            .unwrap()
            .eq_field(Passport::person_id())
            .unwrap();
        let fields = filter.node().fields();
        assert_eq!(fields[0].to_string(), "pe.Id");
        assert_eq!(fields[1].to_string(), "pa.PersonId");
    }

    #[test]
    fn test_and_or_build_combinators() {
        let filter = Filter::field(Person::last_name())
            .unwrap()
            .like("Sm%")
            .or(Filter::field(Person::id()).unwrap().is_null());
        match filter.node() {
            FilterNode::Combinator { logic, .. } => assert_eq!(*logic, Logic::Or),
            FilterNode::Term(_) => panic!("expected a combinator"),
        }
    }

    #[test]
    fn test_in_values() {
        let filter = Filter::field(Person::last_name())
            .unwrap()
            .in_values(["a", "b"])
            .unwrap();
        let FilterNode::Term(term) = filter.node() else {
            panic!("expected a term")
        };
        assert_eq!(term.template(), "{0} IN ({1},{2})");
    }

    #[test]
    fn test_from_aggregate_field() {
        let count = FieldDescriptor::count(Person::id()).unwrap();
        let filter = Filter::<Person>::from_field::<i64>(count.clone()).gt(2);
        assert_eq!(filter.node().fields(), vec![&count]);
    }

    #[test]
    fn test_explicit_alias() {
        let alias = EntityAlias::<Person>::new("p2");
        let filter = Filter::field_in(Person::id(), &alias).unwrap().is_null();
        assert!(filter.node().references_alias(alias.alias()));
    }
}
