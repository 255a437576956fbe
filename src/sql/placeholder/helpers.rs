//! Shared helper functions for placeholder styles.
//!
//! Small building blocks the styles compose to implement
//! `PlaceholderSyntax`.

use crate::model::Value;

// =============================================================================
// Placeholder Tokens
// =============================================================================

/// `{0}`, `{1}`, ... (0-based).
pub fn placeholder_braced(index: usize) -> String {
    format!("{{{}}}", index)
}

/// `@p0`, `@p1`, ... (0-based).
/// Used by: SQL Server (ADO.NET, tiberius)
pub fn placeholder_at_p(index: usize) -> String {
    format!("@p{}", index)
}

/// `$1`, `$2`, ... (1-based).
/// Used by: PostgreSQL
pub fn placeholder_dollar(index: usize) -> String {
    format!("${}", index + 1)
}

// =============================================================================
// Literal Formatting
// =============================================================================

/// Quote string with single quotes (standard SQL).
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Format boolean as numeric 1/0.
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

/// Shortest round-trip float text; `None` for NaN and infinities, which
/// have no SQL literal form.
pub fn format_float(f: f64) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    let mut buffer = ryu::Buffer::new();
    Some(buffer.format(f).to_string())
}

/// SQL literal text for a value.
pub fn format_literal(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("NULL".to_string()),
        Value::Bool(b) => Some(format_bool_numeric(*b).to_string()),
        Value::Int(n) => Some(n.to_string()),
        Value::Float(f) => format_float(*f),
        Value::Text(s) => Some(quote_string_single(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholder_braced(3), "{3}");
        assert_eq!(placeholder_at_p(0), "@p0");
        assert_eq!(placeholder_dollar(0), "$1");
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string_single("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(3.14).as_deref(), Some("3.14"));
        assert_eq!(format_float(1.0).as_deref(), Some("1.0"));
        assert_eq!(format_float(f64::NAN), None);
        assert_eq!(format_float(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_format_literal() {
        assert_eq!(format_literal(&Value::Null).as_deref(), Some("NULL"));
        assert_eq!(format_literal(&Value::Bool(true)).as_deref(), Some("1"));
        assert_eq!(format_literal(&Value::Int(-4)).as_deref(), Some("-4"));
        assert_eq!(
            format_literal(&Value::Text("a".into())).as_deref(),
            Some("'a'")
        );
    }
}
