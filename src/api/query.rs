use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::filter::SearchTerm;

/// Raw `GET /api/advocates` query string. Everything stays a string so bad
/// numbers surface as validation issues instead of extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvocateQuery {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub search: Option<SearchTerm>,
    pub page: u32,
    pub limit: u32,
}

impl SearchParams {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    InvalidQuery,
}

/// One problem with the request, reported in the 400 body's `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, field: &str, message: impl Into<String>) -> Self {
        Self {
            code,
            path: if field.is_empty() { vec![] } else { vec![field.to_string()] },
            message: message.into(),
        }
    }

    /// The query string itself could not be decoded.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new(IssueCode::InvalidQuery, "", message)
    }
}

impl AdvocateQuery {
    /// Apply defaults and bounds. Collects every issue rather than stopping at the first.
    pub fn validate(&self, limits: &SearchConfig) -> Result<SearchParams, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let search = match self.search.as_deref() {
            Some(raw) if raw.chars().count() > limits.max_search_length => {
                issues.push(ValidationIssue::new(
                    IssueCode::TooBig,
                    "search",
                    format!("String must contain at most {} character(s)", limits.max_search_length),
                ));
                None
            }
            Some(raw) => SearchTerm::parse(raw),
            None => None,
        };

        let page = parse_bounded("page", self.page.as_deref(), 1, limits.max_page, &mut issues);
        let limit = parse_bounded("limit", self.limit.as_deref(), limits.default_limit, limits.max_limit, &mut issues);

        if issues.is_empty() {
            Ok(SearchParams { search, page, limit })
        } else {
            Err(issues)
        }
    }
}

fn parse_bounded(field: &str, raw: Option<&str>, default: u32, max: u32, issues: &mut Vec<ValidationIssue>) -> u32 {
    let raw = match raw.map(str::trim) {
        None | Some("") => return default,
        Some(raw) => raw,
    };

    let value: i64 = match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            issues.push(ValidationIssue::new(
                IssueCode::InvalidType,
                field,
                format!("Expected integer, received '{}'", raw),
            ));
            return default;
        }
    };

    if value < 1 {
        issues.push(ValidationIssue::new(IssueCode::TooSmall, field, "Number must be greater than 0"));
        return default;
    }
    match u32::try_from(value) {
        Ok(value) if value <= max => value,
        _ => {
            issues.push(ValidationIssue::new(
                IssueCode::TooBig,
                field,
                format!("Number must be less than or equal to {}", max),
            ));
            default
        }
    }
}

/// Strip `<` and `>` from user-typed search input before it is sent.
/// Server-side validation stays authoritative.
pub fn sanitize_search_input(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, '<' | '>')).collect()
}
