pub mod pagination;
pub mod query;

pub use pagination::{AdvocatesResponse, PaginationInfo};
pub use query::{sanitize_search_input, AdvocateQuery, IssueCode, SearchParams, ValidationIssue};
