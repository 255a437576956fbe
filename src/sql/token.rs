//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are layout-agnostic; line breaks, indentation and placeholders
//! are spelled out only when a stream is serialized with
//! [`RenderSettings`].

use super::placeholder::PlaceholderSyntax;
use crate::config::RenderSettings;

/// SQL Token - every element a SELECT statement is made of.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    Distinct,
    Top,
    Percent,
    From,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Cross,
    On,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Asc,
    Desc,
    And,
    Or,

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LParen,
    RParen,

    // === Whitespace / Formatting ===
    Space,
    Newline,
    Indent(usize),

    // === Dynamic Content ===
    /// Identifier (table, column, alias), emitted as-is
    Ident(String),
    /// Aggregate or function name
    FunctionName(String),
    /// Unsigned count (TOP n)
    Count(u64),
    /// Bound parameter, by 0-based index
    Placeholder(usize),
    /// Literal already formatted as SQL text
    Literal(String),

    // === Escape Hatch ===
    /// Raw text from a filter template, passed through unchanged.
    Raw(String),
}

impl Token {
    /// Serialize this token to a string.
    pub fn serialize(&self, settings: &RenderSettings) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::Top => "TOP".into(),
            Token::Percent => "PERCENT".into(),
            Token::From => "FROM".into(),
            Token::Join => "JOIN".into(),
            Token::Inner => "INNER".into(),
            Token::Left => "LEFT".into(),
            Token::Right => "RIGHT".into(),
            Token::Full => "FULL".into(),
            Token::Cross => "CROSS".into(),
            Token::On => "ON".into(),
            Token::Where => "WHERE".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::Having => "HAVING".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Desc => "DESC".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            // Whitespace
            Token::Space => " ".into(),
            Token::Newline => settings.line_separator.clone(),
            Token::Indent(n) => settings.indent_unit().repeat(*n),

            // Dynamic
            Token::Ident(name) => name.clone(),
            Token::FunctionName(name) => name.to_uppercase(),
            Token::Count(n) => n.to_string(),
            Token::Placeholder(index) => settings.param_style.placeholder(*index),
            Token::Literal(text) => text.clone(),

            // Escape hatch
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self, settings: &RenderSettings) -> String {
        self.tokens.iter().map(|t| t.serialize(settings)).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn indent(&mut self, n: usize) -> &mut Self {
        self.push(Token::Indent(n))
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
