//! Statement renderer.
//!
//! Assembles the clauses of a [`StatementDescriptor`] into a token stream
//! in fixed order:
//!
//! ```text
//! SELECT [DISTINCT] [TOP n [PERCENT]] <fields | *>
//! FROM <root>
//! [<kind> JOIN <table> <alias> [ON <condition>]]...
//! [WHERE <predicate>]
//! [GROUP BY <fields>]
//! [HAVING <predicate>]
//! [ORDER BY <field [ASC|DESC]>...]
//! ```
//!
//! Literal parameters are numbered during the same walk, so numbering is a
//! function of the descriptor alone.

use serde::Serialize;

use super::placeholder::PlaceholderSyntax;
use super::token::{Token, TokenStream};
use crate::config::RenderSettings;
use crate::error::{SelectError, SelectResult};
use crate::filter::{FilterNode, FilterParameter, FilterTerm, Logic, TemplatePart};
use crate::model::{FieldDescriptor, Value};
use crate::select::{Join, JoinKind, SortDir, StatementDescriptor};

/// One bound parameter: its placeholder index and value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub index: usize,
    pub value: Value,
}

/// Rendered command text plus parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedStatement {
    pub command_text: String,
    pub parameters: Vec<Parameter>,
}

impl RenderedStatement {
    /// Parameter values in placeholder order.
    pub fn values(&self) -> Vec<&Value> {
        self.parameters.iter().map(|p| &p.value).collect()
    }
}

/// Render a statement.
///
/// Fails with `InvalidState` when the statement references an alias it
/// does not register, and with `InvalidFilter` when a literal cannot be
/// written inline.
pub fn render_statement(
    stmt: &StatementDescriptor,
    settings: &RenderSettings,
) -> SelectResult<RenderedStatement> {
    tracing::debug!(
        root = %stmt.root(),
        joins = stmt.joins().len(),
        style = %settings.param_style,
        "rendering statement"
    );

    validate(stmt)?;

    let mut renderer = Renderer::new(settings);
    let ts = renderer.statement(stmt)?;
    let rendered = RenderedStatement {
        command_text: ts.serialize(settings),
        parameters: renderer.parameters,
    };

    tracing::debug!(parameters = rendered.parameters.len(), "rendered statement");
    Ok(rendered)
}

/// Render a single predicate tree, numbering its literals from 0.
pub fn render_filter(node: &FilterNode, settings: &RenderSettings) -> SelectResult<RenderedStatement> {
    let mut renderer = Renderer::new(settings);
    let mut ts = TokenStream::new();
    renderer.node(node, &mut ts)?;
    Ok(RenderedStatement {
        command_text: ts.serialize(settings),
        parameters: renderer.parameters,
    })
}

// =============================================================================
// Validation
// =============================================================================

fn validate(stmt: &StatementDescriptor) -> SelectResult<()> {
    if stmt.root().is_blank() {
        return Err(stmt.root().blank_error("FROM"));
    }

    let check = |field: &FieldDescriptor, context: &str| -> SelectResult<()> {
        if stmt.aliases().contains(field.alias()) {
            Ok(())
        } else {
            Err(SelectError::InvalidState {
                alias: field.alias().value().to_string(),
                entity: field.alias().entity().name().to_string(),
                context: format!("{} references {}", context, field),
            })
        }
    };

    for field in stmt.fields() {
        check(field, "select list")?;
    }

    for join in stmt.joins() {
        let Some(condition) = join.condition() else {
            continue;
        };
        for field in condition.fields() {
            check(field, "join condition")?;
        }
        if !condition.references_alias(join.alias()) {
            return Err(SelectError::InvalidState {
                alias: join.alias().value().to_string(),
                entity: join.alias().entity().name().to_string(),
                context: format!("{} condition never references the joined alias", join.kind()),
            });
        }
    }

    if let Some(node) = stmt.where_clause() {
        for field in node.fields() {
            check(field, "WHERE")?;
        }
    }
    for field in stmt.group_by_fields() {
        check(field, "GROUP BY")?;
    }
    if let Some(node) = stmt.having_clause() {
        for field in node.fields() {
            check(field, "HAVING")?;
        }
    }
    for item in stmt.order_by_fields() {
        check(&item.field, "ORDER BY")?;
    }

    Ok(())
}

// =============================================================================
// Renderer
// =============================================================================

struct Renderer<'a> {
    settings: &'a RenderSettings,
    parameters: Vec<Parameter>,
}

impl<'a> Renderer<'a> {
    fn new(settings: &'a RenderSettings) -> Self {
        Self {
            settings,
            parameters: Vec::new(),
        }
    }

    fn statement(&mut self, stmt: &StatementDescriptor) -> SelectResult<TokenStream> {
        let mut ts = TokenStream::new();

        // SELECT
        ts.push(Token::Select).newline().indent(1);
        let mut modifiers = TokenStream::new();
        if stmt.is_distinct() {
            modifiers.push(Token::Distinct).space();
        }
        if let Some(top) = stmt.top_clause() {
            modifiers.push(Token::Top).space().push(Token::Count(top.count)).space();
            if top.percent {
                modifiers.push(Token::Percent).space();
            }
        }
        ts.append(&modifiers);

        if stmt.fields().is_empty() {
            ts.push(Token::Star);
        } else {
            ts.append(&field_list(stmt.fields()));
        }

        // FROM
        ts.newline().push(Token::From).newline().indent(1);
        ts.push(Token::Ident(stmt.root().entity().table_name().to_string()))
            .space()
            .push(Token::Ident(stmt.root().value().to_string()));

        // JOINs
        for join in stmt.joins() {
            ts.newline();
            self.join(join, &mut ts)?;
        }

        // WHERE
        if let Some(node) = stmt.where_clause() {
            ts.newline().push(Token::Where).newline().indent(1);
            self.node(node, &mut ts)?;
        }

        // GROUP BY
        if !stmt.group_by_fields().is_empty() {
            ts.newline().push(Token::GroupBy).newline().indent(1);
            ts.append(&field_list(stmt.group_by_fields()));
        }

        // HAVING
        if let Some(node) = stmt.having_clause() {
            ts.newline().push(Token::Having).newline().indent(1);
            self.node(node, &mut ts)?;
        }

        // ORDER BY
        if !stmt.order_by_fields().is_empty() {
            ts.newline().push(Token::OrderBy).newline().indent(1);
            for (i, item) in stmt.order_by_fields().iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&field_tokens(&item.field));
                if let Some(dir) = item.dir {
                    ts.space().push(match dir {
                        SortDir::Asc => Token::Asc,
                        SortDir::Desc => Token::Desc,
                    });
                }
            }
        }

        Ok(ts)
    }

    fn join(&mut self, join: &Join, ts: &mut TokenStream) -> SelectResult<()> {
        match join.kind() {
            JoinKind::Inner => ts.push(Token::Inner),
            JoinKind::Left => ts.push(Token::Left),
            JoinKind::Right => ts.push(Token::Right),
            JoinKind::Full => ts.push(Token::Full),
            JoinKind::Cross => ts.push(Token::Cross),
        };
        ts.space().push(Token::Join).newline().indent(1);
        ts.push(Token::Ident(join.alias().entity().table_name().to_string()))
            .space()
            .push(Token::Ident(join.alias().value().to_string()));

        if let Some(condition) = join.condition() {
            ts.space().push(Token::On).space();
            self.node(condition, ts)?;
        }
        Ok(())
    }

    /// Render a predicate; combinator operands that are themselves
    /// combinators are parenthesized.
    fn node(&mut self, node: &FilterNode, ts: &mut TokenStream) -> SelectResult<()> {
        match node {
            FilterNode::Term(term) => self.term(term, ts),
            FilterNode::Combinator { logic, left, right } => {
                self.operand(left, ts)?;
                ts.space().push(match logic {
                    Logic::And => Token::And,
                    Logic::Or => Token::Or,
                });
                ts.space();
                self.operand(right, ts)
            }
        }
    }

    fn operand(&mut self, node: &FilterNode, ts: &mut TokenStream) -> SelectResult<()> {
        if node.is_combinator() {
            ts.lparen();
            self.node(node, ts)?;
            ts.rparen();
            Ok(())
        } else {
            self.node(node, ts)
        }
    }

    fn term(&mut self, term: &FilterTerm, ts: &mut TokenStream) -> SelectResult<()> {
        // A slot used twice in one template binds one parameter, unless the
        // placeholders are positional and every occurrence needs a value.
        let positional = self.settings.param_style.is_positional();
        let mut bound: Vec<Option<usize>> = vec![None; term.params().len()];

        for part in term.parts() {
            match part {
                TemplatePart::Text(text) => {
                    ts.push(Token::Raw(text.clone()));
                }
                TemplatePart::Slot(n) => match &term.params()[*n] {
                    FilterParameter::Field(field) => {
                        ts.append(&field_tokens(field));
                    }
                    FilterParameter::Literal(value) => {
                        if self.settings.param_style.inlines_literals() {
                            let text = self
                                .settings
                                .param_style
                                .format_literal(value)
                                .ok_or_else(|| {
                                    SelectError::invalid_filter(
                                        term.template(),
                                        format!("value {} has no SQL literal form", value),
                                    )
                                })?;
                            ts.push(Token::Literal(text));
                        } else {
                            let index = match bound[*n] {
                                Some(index) if !positional => index,
                                _ => {
                                    let index = self.parameters.len();
                                    self.parameters.push(Parameter {
                                        index,
                                        value: value.clone(),
                                    });
                                    bound[*n] = Some(index);
                                    index
                                }
                            };
                            ts.push(Token::Placeholder(index));
                        }
                    }
                },
            }
        }
        Ok(())
    }
}

/// `alias.column` or `AGG(alias.column)`.
fn field_tokens(field: &FieldDescriptor) -> TokenStream {
    let mut ts = TokenStream::new();
    if let Some(agg) = field.aggregate() {
        ts.push(Token::FunctionName(agg.keyword().to_string())).lparen();
    }
    ts.push(Token::Ident(field.alias().value().to_string()))
        .push(Token::Dot)
        .push(Token::Ident(field.column().to_string()));
    if field.aggregate().is_some() {
        ts.rparen();
    }
    ts
}

fn field_list(fields: &[FieldDescriptor]) -> TokenStream {
    let mut ts = TokenStream::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            ts.comma().space();
        }
        ts.append(&field_tokens(field));
    }
    ts
}
