use serde_json::Value;

/// A trimmed, non-empty search term.
///
/// Matching is a case-insensitive substring test; the folded form is kept
/// alongside the original so in-process matching doesn't re-lowercase it per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Returns `None` when the input is empty after trimming (no filter).
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            raw: trimmed.to_string(),
            folded: trimmed.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// `%term%` with LIKE metacharacters escaped, so `%` and `_` match literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.raw.len() + 2);
        pattern.push('%');
        for c in self.raw.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// How a column participates in the free-text search predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchColumn {
    /// Text column matched with ILIKE.
    Text(&'static str),
    /// JSONB array of strings; matches when any element does.
    JsonTextArray(&'static str),
    /// Non-text column matched through its `::text` cast.
    CastText(&'static str),
}

impl SearchColumn {
    pub fn name(&self) -> &'static str {
        match self {
            SearchColumn::Text(name) | SearchColumn::JsonTextArray(name) | SearchColumn::CastText(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
