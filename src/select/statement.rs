//! Immutable statement descriptor.
//!
//! Every operation returns a new [`StatementDescriptor`]; the receiver is
//! never modified. List slots are `Arc`-shared and copied only on write, so
//! a chain of builder calls shares unchanged parts with its predecessors.

use std::sync::Arc;

use super::join::Join;
use crate::config::RenderSettings;
use crate::error::SelectResult;
use crate::filter::FilterNode;
use crate::model::{Alias, AliasRegistry, FieldDescriptor};
use crate::sql::render::{render_statement, RenderedStatement};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// An ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByField {
    pub field: FieldDescriptor,
    pub dir: Option<SortDir>,
}

impl OrderByField {
    pub fn new(field: FieldDescriptor) -> Self {
        Self { field, dir: None }
    }

    pub fn asc(field: FieldDescriptor) -> Self {
        Self {
            field,
            dir: Some(SortDir::Asc),
        }
    }

    pub fn desc(field: FieldDescriptor) -> Self {
        Self {
            field,
            dir: Some(SortDir::Desc),
        }
    }
}

/// `TOP n` or `TOP n PERCENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Top {
    pub count: u64,
    pub percent: bool,
}

/// The complete description of one SELECT statement.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "descriptors are immutable; use the returned value"]
pub struct StatementDescriptor {
    root: Alias,
    aliases: AliasRegistry,
    fields: Arc<Vec<FieldDescriptor>>,
    joins: Arc<Vec<Join>>,
    where_clause: Option<FilterNode>,
    group_by: Arc<Vec<FieldDescriptor>>,
    having: Option<FilterNode>,
    order_by: Arc<Vec<OrderByField>>,
    distinct: bool,
    top: Option<Top>,
}

fn appended<T: Clone>(list: &Arc<Vec<T>>, items: impl IntoIterator<Item = T>) -> Arc<Vec<T>> {
    let mut list = Arc::clone(list);
    Arc::make_mut(&mut list).extend(items);
    list
}

fn and_combined(existing: &Option<FilterNode>, node: FilterNode) -> Option<FilterNode> {
    Some(match existing {
        Some(prev) => prev.and(&node),
        None => node,
    })
}

impl StatementDescriptor {
    /// An empty statement selecting from `root`.
    pub fn new(root: Alias) -> Self {
        Self {
            aliases: AliasRegistry::with_root(root.clone()),
            root,
            fields: Arc::default(),
            joins: Arc::default(),
            where_clause: None,
            group_by: Arc::default(),
            having: None,
            order_by: Arc::default(),
            distinct: false,
            top: None,
        }
    }

    /// Append fields to the select list.
    pub fn add_fields(&self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Self {
            fields: appended(&self.fields, fields),
            ..self.clone()
        }
    }

    /// Append GROUP BY fields.
    pub fn group_by(&self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Self {
            group_by: appended(&self.group_by, fields),
            ..self.clone()
        }
    }

    /// Append ORDER BY items.
    pub fn order_by(&self, items: impl IntoIterator<Item = OrderByField>) -> Self {
        Self {
            order_by: appended(&self.order_by, items),
            ..self.clone()
        }
    }

    /// Add a WHERE predicate. Repeated calls combine with AND.
    pub fn filter(&self, node: impl Into<FilterNode>) -> Self {
        Self {
            where_clause: and_combined(&self.where_clause, node.into()),
            ..self.clone()
        }
    }

    /// Add a HAVING predicate. Repeated calls combine with AND.
    pub fn having(&self, node: impl Into<FilterNode>) -> Self {
        Self {
            having: and_combined(&self.having, node.into()),
            ..self.clone()
        }
    }

    pub fn distinct(&self, distinct: bool) -> Self {
        Self {
            distinct,
            ..self.clone()
        }
    }

    /// Set `TOP count [PERCENT]`, replacing any previous value.
    pub fn top(&self, count: u64, percent: bool) -> Self {
        Self {
            top: Some(Top { count, percent }),
            ..self.clone()
        }
    }

    /// Add a join, registering its alias.
    ///
    /// Fails with `DuplicateAlias` when the alias value is already used by
    /// the root or an earlier join.
    pub fn join(&self, join: Join) -> SelectResult<Self> {
        let aliases = self.aliases.register(join.alias())?;
        Ok(Self {
            aliases,
            joins: appended(&self.joins, [join]),
            ..self.clone()
        })
    }

    /// Check that `alias` could be registered by a join.
    pub fn ensure_alias_free(&self, alias: &Alias) -> SelectResult<()> {
        self.aliases.register(alias).map(|_| ())
    }

    /// Render with the given settings.
    pub fn render(&self, settings: &RenderSettings) -> SelectResult<RenderedStatement> {
        render_statement(self, settings)
    }

    // Accessors

    pub fn root(&self) -> &Alias {
        &self.root
    }

    pub fn aliases(&self) -> &AliasRegistry {
        &self.aliases
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn where_clause(&self) -> Option<&FilterNode> {
        self.where_clause.as_ref()
    }

    pub fn group_by_fields(&self) -> &[FieldDescriptor] {
        &self.group_by
    }

    pub fn having_clause(&self) -> Option<&FilterNode> {
        self.having.as_ref()
    }

    pub fn order_by_fields(&self) -> &[OrderByField] {
        &self.order_by
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn top_clause(&self) -> Option<Top> {
        self.top
    }
}
