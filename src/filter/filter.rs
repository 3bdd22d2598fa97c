use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterOrderInfo, SearchColumn, SearchTerm, SqlResult};

/// Column alias carrying the window count of matching rows.
pub const TOTAL_COUNT_COLUMN: &str = "total_count";

pub struct Filter {
    table_name: String,
    select_columns: Vec<String>,
    search: Option<SearchTerm>,
    search_columns: Vec<SearchColumn>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<u32>,
    offset: Option<u64>,
    with_total_count: bool,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        if !is_valid_identifier(&table_name) {
            return Err(FilterError::InvalidTableName(table_name));
        }
        Ok(Self {
            table_name,
            select_columns: vec![],
            search: None,
            search_columns: vec![],
            order_data: vec![],
            limit: None,
            offset: None,
            with_total_count: false,
        })
    }

    pub fn select(&mut self, columns: &[&str]) -> Result<&mut Self, FilterError> {
        for column in columns {
            if !is_valid_identifier(column) {
                return Err(FilterError::InvalidColumn(column.to_string()));
            }
        }
        self.select_columns = columns.iter().map(|c| c.to_string()).collect();
        Ok(self)
    }

    /// Restrict to rows where `term` appears in any of `columns`. `None` clears the filter.
    pub fn search(&mut self, term: Option<SearchTerm>, columns: &[SearchColumn]) -> Result<&mut Self, FilterError> {
        FilterWhere::validate(columns)?;
        self.search = term;
        self.search_columns = columns.to_vec();
        Ok(self)
    }

    pub fn order(&mut self, order_spec: &str) -> Result<&mut Self, FilterError> {
        self.order_data = FilterOrder::validate_and_parse(order_spec)?;
        Ok(self)
    }

    pub fn limit(&mut self, limit: u32, offset: Option<u64>) -> Result<&mut Self, FilterError> {
        if limit == 0 { return Err(FilterError::InvalidLimit("Limit must be positive".to_string())); }
        self.limit = Some(limit);
        self.offset = offset;
        Ok(self)
    }

    /// Add `COUNT(*) OVER()` so each row carries the total matching count.
    pub fn with_total_count(&mut self) -> &mut Self {
        self.with_total_count = true;
        self
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let select_clause = self.build_select_clause();
        let where_result = self.to_where_sql()?;
        let order_clause = FilterOrder::generate(&self.order_data);
        let limit_clause = self.build_limit_clause();

        let query = [
            format!("SELECT {}", select_clause),
            format!("FROM \"{}\"", self.table_name),
            if where_result.query.is_empty() { String::new() } else { format!("WHERE {}", where_result.query) },
            order_clause,
            limit_clause,
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");

        Ok(SqlResult { query, params: where_result.params })
    }

    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        let (query, params) = FilterWhere::generate(self.search.as_ref(), &self.search_columns, 0)?;
        Ok(SqlResult { query, params })
    }

    /// Count over the same predicate, ignoring order and pagination.
    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql()?;
        let query = if where_result.query.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table_name)
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", self.table_name, where_result.query)
        };
        Ok(SqlResult { query, params: where_result.params })
    }

    fn build_select_clause(&self) -> String {
        let mut columns = if self.select_columns.is_empty() {
            "*".to_string()
        } else {
            self.select_columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
        };
        if self.with_total_count {
            columns.push_str(&format!(", COUNT(*) OVER() AS \"{}\"", TOTAL_COUNT_COLUMN));
        }
        columns
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            _ => String::new(),
        }
    }
}

/// Plain SQL identifiers only: a letter or underscore, then alphanumerics/underscores.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
