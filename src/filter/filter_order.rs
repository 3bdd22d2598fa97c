use super::error::FilterError;
use super::filter::is_valid_identifier;
use super::types::{FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse `"created_at desc, id desc"` style specs. Direction defaults to ascending.
    pub fn validate_and_parse(spec: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        for part in spec.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() { continue; }
            let mut it = trimmed.split_whitespace();
            let Some(col) = it.next() else { continue };
            if !is_valid_identifier(col) {
                return Err(FilterError::InvalidColumn(col.to_string()));
            }
            let sort = match it.next() {
                None => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                Some(dir) => return Err(FilterError::InvalidOrder(format!("unknown direction '{}'", dir))),
            };
            if it.next().is_some() {
                return Err(FilterError::InvalidOrder(trimmed.to_string()));
            }
            out.push(FilterOrderInfo { column: col.to_string(), sort });
        }
        Ok(out)
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() { return String::new(); }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}
