//! Test utilities for SQL output validation.
//!
//! Rendered statements are parsed back with sqlparser-rs to make sure the
//! emitted text is syntactically valid. Render with the `question` or
//! `inline` style before validating; `{n}` placeholders are not SQL.

use sqlparser::dialect::{GenericDialect, MsSqlDialect};
use sqlparser::parser::Parser;

/// Parser dialect used for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseDialect {
    Generic,
    MsSql,
}

/// Validates that a SQL string parses under the given dialect.
///
/// # Example
///
/// ```ignore
/// use crate::sql::test_utils::{validate_sql, ParseDialect};
///
/// validate_sql("SELECT * FROM Person pe", ParseDialect::Generic).unwrap();
/// ```
pub fn validate_sql(sql: &str, dialect: ParseDialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        ParseDialect::Generic => Box::new(GenericDialect {}),
        ParseDialect::MsSql => Box::new(MsSqlDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderSettings;
    use crate::filter::compiler::{self, ComparisonOperator, ContainsOperator};
    use crate::model::{alias_for, FieldDescriptor, Value};
    use crate::select::{join_from_filter, JoinKind, OrderByField, StatementDescriptor};
    use crate::sql::placeholder::ParamStyle;

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
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM Person pe", ParseDialect::Generic).unwrap();
        validate_sql("SELECT * FROM Person pe", ParseDialect::MsSql).unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM Person", ParseDialect::Generic);
        assert!(result.is_err());
    }

    #[test]
    fn test_rendered_statement_parses() {
        let id = FieldDescriptor::of(Person::id()).unwrap();
        let last_name = FieldDescriptor::of(Person::last_name()).unwrap();
        let person_id = FieldDescriptor::of(Passport::person_id()).unwrap();
        let count = FieldDescriptor::count(Person::id()).unwrap();

        let on = compiler::comparison(&id, ComparisonOperator::Eq, person_id);
        let stmt = StatementDescriptor::new(alias_for::<Person>().into())
            .add_fields([last_name.clone(), count.clone()])
            .join(join_from_filter(JoinKind::Left, on, &alias_for::<Passport>().into()).unwrap())
            .unwrap()
            .filter(
                compiler::contains(&id, ContainsOperator::NotIn, [1, 2])
                    .unwrap()
                    .or(&compiler::is_null(&last_name)),
            )
            .group_by([last_name.clone()])
            .having(compiler::comparison(&count, ComparisonOperator::Gt, Value::Int(2)))
            .order_by([OrderByField::desc(last_name)]);

        for style in [ParamStyle::Question, ParamStyle::Inline] {
            let rendered = stmt
                .render(&RenderSettings::with_param_style(style))
                .unwrap();
            validate_sql(&rendered.command_text, ParseDialect::Generic).unwrap();
        }
    }
}
