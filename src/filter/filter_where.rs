use serde_json::Value;

use super::error::FilterError;
use super::filter::is_valid_identifier;
use super::types::{SearchColumn, SearchTerm};

/// Builds the free-text search predicate: an OR across every search column,
/// all sharing a single bound `%term%` pattern.
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Returns `(sql, params)`; the SQL is empty when there is nothing to filter on.
    pub fn generate(
        term: Option<&SearchTerm>,
        columns: &[SearchColumn],
        starting_param_index: usize,
    ) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new(starting_param_index);
        filter_where.build(term, columns)
    }

    pub fn validate(columns: &[SearchColumn]) -> Result<(), FilterError> {
        for column in columns {
            if !is_valid_identifier(column.name()) {
                return Err(FilterError::InvalidColumn(column.name().to_string()));
            }
        }
        Ok(())
    }

    fn build(&mut self, term: Option<&SearchTerm>, columns: &[SearchColumn]) -> Result<(String, Vec<Value>), FilterError> {
        Self::validate(columns)?;

        let term = match term {
            Some(term) if !columns.is_empty() => term,
            _ => return Ok((String::new(), vec![])),
        };

        let placeholder = self.param(Value::String(term.like_pattern()));
        let conditions: Vec<String> = columns
            .iter()
            .map(|column| Self::build_condition(column, &placeholder))
            .collect();

        Ok((format!("({})", conditions.join(" OR ")), self.param_values.clone()))
    }

    fn build_condition(column: &SearchColumn, placeholder: &str) -> String {
        match column {
            SearchColumn::Text(name) => format!("\"{}\" ILIKE {}", name, placeholder),
            SearchColumn::JsonTextArray(name) => format!(
                "EXISTS (SELECT 1 FROM jsonb_array_elements_text(\"{}\") AS elem(label) WHERE elem.label ILIKE {})",
                name, placeholder
            ),
            SearchColumn::CastText(name) => format!("\"{}\"::text ILIKE {}", name, placeholder),
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
