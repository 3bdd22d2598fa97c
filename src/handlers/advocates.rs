use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::api::{AdvocateQuery, AdvocatesResponse, ValidationIssue};
use crate::app::AppState;
use crate::database::models::Advocate;
use crate::error::ApiError;

pub const INVALID_PARAMS: &str = "Invalid query parameters";

/// GET /api/advocates - search and paginate advocates, newest first
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<AdvocateQuery>, QueryRejection>,
) -> Result<Json<AdvocatesResponse<Advocate>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::validation_error(INVALID_PARAMS, vec![ValidationIssue::invalid_query(rejection.body_text())])
    })?;

    let params = query.validate(&state.config.search).map_err(|issues| {
        tracing::debug!("Rejected advocate query: {:?}", issues);
        ApiError::validation_error(INVALID_PARAMS, issues)
    })?;

    let response = state.advocates.search(&params).await?;
    Ok(Json(response))
}
