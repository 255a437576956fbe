//! Typed fluent front end.
//!
//! [`Select<E>`] wraps a [`StatementDescriptor`] rooted at entity `E`.
//! Every call returns a new builder; the receiver stays usable.
//!
//! ```ignore
//! let select = Select::<Person>::new()
//!     .add_member(Person::id())?
//!     .inner_join::<Person, Passport>(Person::id().equals(Passport::person_id()))?
//!     .filter(Filter::field(Person::last_name())?.is_not_null());
//!
//! let rendered = select.render()?;
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use super::join::{join_from_equality, join_from_filter, Join, JoinKind};
use super::statement::{OrderByField, StatementDescriptor};
use crate::config::RenderSettings;
use crate::error::SelectResult;
use crate::filter::FilterNode;
use crate::metadata::MetadataProvider;
use crate::model::{alias_for, Alias, BinaryExpr, Entity, EntityAlias, EntityType, FieldDescriptor, Member, SqlType};
use crate::sql::render::RenderedStatement;

/// A SELECT statement rooted at entity `E`.
#[must_use = "builders are immutable; use the returned value"]
pub struct Select<E> {
    descriptor: StatementDescriptor,
    metadata: Option<Arc<MetadataProvider>>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Entity> Select<E> {
    /// `SELECT * FROM <E> <default alias>`
    pub fn new() -> Self {
        Self::aliased(alias_for::<E>())
    }

    /// `SELECT * FROM <E> <alias>`
    pub fn aliased(alias: EntityAlias<E>) -> Self {
        Self {
            descriptor: StatementDescriptor::new(alias.into()),
            metadata: None,
            _marker: PhantomData,
        }
    }

    /// Resolve members through `provider` instead of the process-wide one.
    pub fn with_metadata(self, provider: Arc<MetadataProvider>) -> Self {
        Self {
            metadata: Some(provider),
            ..self
        }
    }

    fn metadata(&self) -> &MetadataProvider {
        self.metadata
            .as_deref()
            .unwrap_or_else(|| MetadataProvider::global())
    }

    fn with(&self, descriptor: StatementDescriptor) -> Self {
        Self {
            descriptor,
            metadata: self.metadata.clone(),
            _marker: PhantomData,
        }
    }

    fn root_alias(&self) -> EntityAlias<E> {
        EntityAlias::new(self.descriptor.root().value())
    }

    fn root_field<T: SqlType>(&self, member: Member<E, T>) -> SelectResult<FieldDescriptor> {
        FieldDescriptor::resolve_with(self.metadata(), member, &self.root_alias())
    }

    // =========================================================================
    // Select list
    // =========================================================================

    /// Add a field descriptor (plain column or aggregate) to the select list.
    pub fn add_field(&self, field: FieldDescriptor) -> Self {
        self.add_fields([field])
    }

    pub fn add_fields(&self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.with(self.descriptor.add_fields(fields))
    }

    /// Add a member of `E` on the root alias.
    pub fn add_member<T: SqlType>(&self, member: Member<E, T>) -> SelectResult<Self> {
        Ok(self.add_field(self.root_field(member)?))
    }

    /// Add a member of any entity on an explicit alias.
    pub fn add_member_in<J: Entity, T: SqlType>(
        &self,
        member: Member<J, T>,
        alias: &EntityAlias<J>,
    ) -> SelectResult<Self> {
        let field = FieldDescriptor::resolve_with(self.metadata(), member, alias)?;
        Ok(self.add_field(field))
    }

    // =========================================================================
    // GROUP BY / ORDER BY
    // =========================================================================

    /// `GROUP BY` a member of `E` on the root alias.
    pub fn group_by<T: SqlType>(&self, member: Member<E, T>) -> SelectResult<Self> {
        Ok(self.group_by_fields([self.root_field(member)?]))
    }

    pub fn group_by_fields(&self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.with(self.descriptor.group_by(fields))
    }

    /// `ORDER BY` a member of `E` on the root alias, default direction.
    pub fn order_by<T: SqlType>(&self, member: Member<E, T>) -> SelectResult<Self> {
        Ok(self.order_by_fields([OrderByField::new(self.root_field(member)?)]))
    }

    /// `ORDER BY <member> DESC`
    pub fn order_by_desc<T: SqlType>(&self, member: Member<E, T>) -> SelectResult<Self> {
        Ok(self.order_by_fields([OrderByField::desc(self.root_field(member)?)]))
    }

    pub fn order_by_fields(&self, items: impl IntoIterator<Item = OrderByField>) -> Self {
        self.with(self.descriptor.order_by(items))
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    pub fn distinct(&self, distinct: bool) -> Self {
        self.with(self.descriptor.distinct(distinct))
    }

    /// `TOP n`
    pub fn top(&self, count: u64) -> Self {
        self.with(self.descriptor.top(count, false))
    }

    /// `TOP n PERCENT`
    pub fn top_percent(&self, count: u64) -> Self {
        self.with(self.descriptor.top(count, true))
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// Add a WHERE predicate; repeated calls combine with AND.
    pub fn filter(&self, filter: impl Into<FilterNode>) -> Self {
        self.with(self.descriptor.filter(filter))
    }

    /// Add a HAVING predicate; repeated calls combine with AND.
    pub fn having(&self, filter: impl Into<FilterNode>) -> Self {
        self.with(self.descriptor.having(filter))
    }

    // =========================================================================
    // Joins
    // =========================================================================

    /// Join `J` on its default alias using an equality between a member of
    /// `L` (on its default alias) and a member of `J`.
    pub fn join<L: Entity, J: Entity>(&self, kind: JoinKind, expr: BinaryExpr) -> SelectResult<Self> {
        self.join_aliased(kind, expr, &alias_for::<L>(), &alias_for::<J>())
    }

    /// Join with explicit left and joined aliases.
    pub fn join_aliased<L: Entity, J: Entity>(
        &self,
        kind: JoinKind,
        expr: BinaryExpr,
        left: &EntityAlias<L>,
        joined: &EntityAlias<J>,
    ) -> SelectResult<Self> {
        self.descriptor.ensure_alias_free(joined.alias())?;
        let join = join_from_equality(self.metadata(), kind, &expr, left.alias(), joined.alias())?;
        self.push_join(join)
    }

    pub fn inner_join<L: Entity, J: Entity>(&self, expr: BinaryExpr) -> SelectResult<Self> {
        self.join::<L, J>(JoinKind::Inner, expr)
    }

    pub fn left_join<L: Entity, J: Entity>(&self, expr: BinaryExpr) -> SelectResult<Self> {
        self.join::<L, J>(JoinKind::Left, expr)
    }

    pub fn right_join<L: Entity, J: Entity>(&self, expr: BinaryExpr) -> SelectResult<Self> {
        self.join::<L, J>(JoinKind::Right, expr)
    }

    pub fn full_join<L: Entity, J: Entity>(&self, expr: BinaryExpr) -> SelectResult<Self> {
        self.join::<L, J>(JoinKind::Full, expr)
    }

    /// Join `J` under a caller-built condition, on `alias` or the default
    /// alias of `J`.
    pub fn join_on<J: Entity>(
        &self,
        kind: JoinKind,
        condition: impl Into<FilterNode>,
        alias: Option<EntityAlias<J>>,
    ) -> SelectResult<Self> {
        let alias: Alias = alias.unwrap_or_else(alias_for::<J>).into();
        self.descriptor.ensure_alias_free(&alias)?;
        self.push_join(join_from_filter(kind, condition.into(), &alias)?)
    }

    pub fn inner_join_on<J: Entity>(&self, condition: impl Into<FilterNode>) -> SelectResult<Self> {
        self.join_on::<J>(JoinKind::Inner, condition, None)
    }

    pub fn left_join_on<J: Entity>(&self, condition: impl Into<FilterNode>) -> SelectResult<Self> {
        self.join_on::<J>(JoinKind::Left, condition, None)
    }

    /// `CROSS JOIN` on the default alias of `J`.
    pub fn cross_join<J: Entity>(&self) -> SelectResult<Self> {
        self.cross_join_aliased(alias_for::<J>())
    }

    pub fn cross_join_aliased<J: Entity>(&self, alias: EntityAlias<J>) -> SelectResult<Self> {
        self.push_join(Join::cross(alias.into()))
    }

    fn push_join(&self, join: Join) -> SelectResult<Self> {
        Ok(self.with(self.descriptor.join(join)?))
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Render with default settings: `\n` lines, 4-space indent, `{n}`
    /// placeholders.
    pub fn render(&self) -> SelectResult<RenderedStatement> {
        self.render_with(&RenderSettings::default())
    }

    pub fn render_with(&self, settings: &RenderSettings) -> SelectResult<RenderedStatement> {
        self.descriptor.render(settings)
    }

    /// Command text with default settings.
    pub fn command_text(&self) -> SelectResult<String> {
        Ok(self.render()?.command_text)
    }

    pub fn descriptor(&self) -> &StatementDescriptor {
        &self.descriptor
    }

    pub fn into_descriptor(self) -> StatementDescriptor {
        self.descriptor
    }

    pub fn entity_type(&self) -> EntityType {
        EntityType::of::<E>()
    }
}

impl<E: Entity> Default for Select<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Select<E> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            metadata: self.metadata.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for Select<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("descriptor", &self.descriptor)
            .field("custom_metadata", &self.metadata.is_some())
            .finish()
    }
}
