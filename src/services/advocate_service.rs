use std::sync::Arc;

use tracing::debug;

use crate::api::{AdvocatesResponse, PaginationInfo, SearchParams};
use crate::database::models::Advocate;
use crate::source::{RecordSource, RecordSourceError, SearchRequest, SourceKind};

/// Turns validated search parameters into a page of advocates plus the
/// pagination envelope. Agnostic to which record source backs it.
pub struct AdvocateService {
    source: Arc<dyn RecordSource>,
}

impl AdvocateService {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub async fn search(&self, params: &SearchParams) -> Result<AdvocatesResponse<Advocate>, RecordSourceError> {
        let request = SearchRequest {
            term: params.search.clone(),
            limit: params.limit,
            offset: params.offset(),
        };

        let page = self.source.search(&request).await?;

        debug!(
            "search term={:?} page={} limit={} -> {} of {} ({})",
            request.term.as_ref().map(|t| t.as_str()),
            params.page,
            params.limit,
            page.records.len(),
            page.total,
            self.source.kind()
        );

        Ok(AdvocatesResponse {
            data: page.records,
            pagination: PaginationInfo::new(params.page, params.limit, page.total),
        })
    }

    pub async fn health_check(&self) -> Result<(), RecordSourceError> {
        self.source.health_check().await
    }
}
