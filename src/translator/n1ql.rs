//! N1QL (SQL++ for documents) rendering of `QueryExpression`
//!
//! Identifiers are backtick-quoted per path segment. Literals are
//! rendered as JSON scalars, which N1QL accepts verbatim.

use std::collections::HashSet;

use serde_json::Value;

use super::ast::{FilterOp, Predicate, QueryExpression, SortSpec};
use super::errors::{TranslationError, TranslationResult};
use super::translator::{TranslatedQuery, Translator};

/// Translates `QueryExpression` into N1QL text
#[derive(Debug, Clone, Copy, Default)]
pub struct N1qlTranslator;

impl N1qlTranslator {
    pub fn new() -> Self {
        Self
    }

    fn render(&self, query: &QueryExpression) -> TranslationResult<TranslatedQuery> {
        if query.keyspace.trim().is_empty() {
            return Err(TranslationError::MissingKeyspace);
        }
        if query.columns.is_empty() {
            return Err(TranslationError::NoColumns);
        }

        let mut output_columns = Vec::with_capacity(query.columns.len());
        let mut seen = HashSet::new();
        let mut projections = Vec::with_capacity(query.columns.len());

        for column in &query.columns {
            let name = column.output_name();
            if !seen.insert(name.to_string()) {
                return Err(TranslationError::DuplicateColumn(name.to_string()));
            }

            let mut projection = quote_path(&column.path)?;
            if let Some(alias) = &column.alias {
                projection.push_str(" AS ");
                projection.push_str(&quote_identifier(alias)?);
            }
            projections.push(projection);
            output_columns.push(name.to_string());
        }

        let mut text = format!(
            "SELECT {} FROM {}",
            projections.join(", "),
            quote_identifier(&query.keyspace)?
        );

        if !query.predicates.is_empty() {
            let conditions = query
                .predicates
                .iter()
                .map(render_predicate)
                .collect::<TranslationResult<Vec<_>>>()?;
            text.push_str(" WHERE ");
            text.push_str(&conditions.join(" AND "));
        }

        if !query.sort.is_empty() {
            let keys = query
                .sort
                .iter()
                .map(render_sort)
                .collect::<TranslationResult<Vec<_>>>()?;
            text.push_str(" ORDER BY ");
            text.push_str(&keys.join(", "));
        }

        if let Some(limit) = query.limit {
            text.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = query.offset {
            text.push_str(&format!(" OFFSET {}", offset));
        }

        Ok(TranslatedQuery::new(text, output_columns))
    }
}

impl Translator for N1qlTranslator {
    type Query = QueryExpression;

    fn translate(&self, query: &QueryExpression) -> TranslationResult<TranslatedQuery> {
        self.render(query)
    }
}

fn render_predicate(predicate: &Predicate) -> TranslationResult<String> {
    let field = quote_path(&predicate.field)?;
    match (&predicate.op, predicate.op.value()) {
        (FilterOp::Eq(_), Value::Null) => Ok(format!("{} IS NULL", field)),
        (FilterOp::Ne(_), Value::Null) => Ok(format!("{} IS NOT NULL", field)),
        (op, Value::Null) if op.is_range() => Err(TranslationError::unsupported(format!(
            "null operand for '{}' on {}",
            op.symbol(),
            predicate.field
        ))),
        (op, value) => Ok(format!("{} {} {}", field, op.symbol(), render_literal(value)?)),
    }
}

fn render_sort(sort: &SortSpec) -> TranslationResult<String> {
    Ok(format!("{} {}", quote_path(&sort.field)?, sort.direction.as_str()))
}

fn render_literal(value: &Value) -> TranslationResult<String> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => serde_json::to_string(value)
            .map_err(|e| TranslationError::unsupported(format!("literal {}: {}", value, e))),
        Value::Array(_) => Err(TranslationError::unsupported("array literal")),
        Value::Object(_) => Err(TranslationError::unsupported("object literal")),
        Value::Null => Err(TranslationError::unsupported("null literal")),
    }
}

fn quote_path(path: &str) -> TranslationResult<String> {
    let segments = path
        .split('.')
        .map(quote_identifier)
        .collect::<TranslationResult<Vec<_>>>()?;
    Ok(segments.join("."))
}

fn quote_identifier(identifier: &str) -> TranslationResult<String> {
    if identifier.is_empty() {
        return Err(TranslationError::invalid_identifier(identifier, "empty segment"));
    }
    if identifier.contains('`') {
        return Err(TranslationError::invalid_identifier(identifier, "contains a backtick"));
    }
    Ok(format!("`{}`", identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::SortSpec;
    use serde_json::json;

    fn translate(query: &QueryExpression) -> TranslationResult<TranslatedQuery> {
        N1qlTranslator::new().translate(query)
    }

    #[test]
    fn test_simple_projection() {
        let query = QueryExpression::new("users").select("name").select("age");
        let translated = translate(&query).unwrap();

        assert_eq!(translated.query_text, "SELECT `name`, `age` FROM `users`");
        assert_eq!(translated.output_columns, vec!["name", "age"]);
    }

    #[test]
    fn test_full_query() {
        let query = QueryExpression::new("users")
            .select("name")
            .select_as("address.city", "town")
            .with_predicate(Predicate::gte("age", json!(21)))
            .with_predicate(Predicate::eq("name", json!("Ana \"A\"")))
            .with_sort(SortSpec::desc("age"))
            .with_sort(SortSpec::asc("name"))
            .with_limit(10)
            .with_offset(5);
        let translated = translate(&query).unwrap();

        assert_eq!(
            translated.query_text,
            "SELECT `name`, `address`.`city` AS `town` FROM `users` \
             WHERE `age` >= 21 AND `name` = \"Ana \\\"A\\\"\" \
             ORDER BY `age` DESC, `name` ASC LIMIT 10 OFFSET 5"
        );
        assert_eq!(translated.output_columns, vec!["name", "town"]);
    }

    #[test]
    fn test_nested_path_outputs_last_segment() {
        let query = QueryExpression::new("users").select("address.city");
        let translated = translate(&query).unwrap();
        assert_eq!(translated.output_columns, vec!["city"]);
    }

    #[test]
    fn test_null_comparisons() {
        let query = QueryExpression::new("users")
            .select("name")
            .with_predicate(Predicate::eq("email", Value::Null))
            .with_predicate(Predicate::ne("phone", Value::Null));
        let translated = translate(&query).unwrap();
        assert!(translated
            .query_text
            .ends_with("WHERE `email` IS NULL AND `phone` IS NOT NULL"));

        let query = QueryExpression::new("users")
            .select("name")
            .with_predicate(Predicate::gt("age", Value::Null));
        assert!(matches!(translate(&query), Err(TranslationError::Unsupported(_))));
    }

    #[test]
    fn test_rejects_unsupported_constructs() {
        assert_eq!(
            translate(&QueryExpression::new("").select("a")),
            Err(TranslationError::MissingKeyspace)
        );
        assert_eq!(
            translate(&QueryExpression::new("users")),
            Err(TranslationError::NoColumns)
        );
        assert_eq!(
            translate(&QueryExpression::new("users").select("a.city").select("city")),
            Err(TranslationError::DuplicateColumn("city".into()))
        );
        assert!(matches!(
            translate(&QueryExpression::new("users").select("we`ird")),
            Err(TranslationError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            translate(&QueryExpression::new("users").select("a..b")),
            Err(TranslationError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            translate(
                &QueryExpression::new("users")
                    .select("a")
                    .with_predicate(Predicate::eq("tags", json!(["x"])))
            ),
            Err(TranslationError::Unsupported(_))
        ));
    }
}
