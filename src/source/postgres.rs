use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseManager;
use crate::database::models::advocate::{AdvocateRow, COLUMNS, DEFAULT_ORDER, SEARCH_COLUMNS, TABLE};
use crate::database::query_builder::QueryBuilder;

use super::{validate_rows, RecordSource, RecordSourceError, SearchPage, SearchRequest, SourceKind};

/// A page row with the window count of all matching rows attached.
#[derive(Debug, FromRow)]
struct CountedRow {
    #[sqlx(flatten)]
    advocate: AdvocateRow,
    total_count: i64,
}

pub struct PgRecordSource {
    pool: PgPool,
    slow_query_threshold: Option<Duration>,
}

impl PgRecordSource {
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        let slow_query_threshold = config
            .enable_slow_query_warning
            .then(|| Duration::from_millis(config.slow_query_threshold_ms));
        Self { pool, slow_query_threshold }
    }

    fn warn_if_slow(&self, started: Instant, request: &SearchRequest) {
        let elapsed = started.elapsed();
        if let Some(threshold) = self.slow_query_threshold {
            if elapsed > threshold {
                tracing::warn!(
                    "Slow advocate search: {:?} (term={:?}, limit={}, offset={})",
                    elapsed,
                    request.term.as_ref().map(|t| t.as_str()),
                    request.limit,
                    request.offset
                );
            }
        }
    }
}

#[async_trait]
impl RecordSource for PgRecordSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Postgres
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, RecordSourceError> {
        let started = Instant::now();

        let query = QueryBuilder::<CountedRow>::new(TABLE)?
            .select(COLUMNS)?
            .search(request.term.clone(), SEARCH_COLUMNS)?
            .order(DEFAULT_ORDER)?
            .limit(request.limit, Some(request.offset))?
            .with_total_count();

        let rows = query.select_all(&self.pool).await?;

        // Past the last page the window count has no row to ride on
        let total = match rows.first() {
            Some(row) => row.total_count,
            None if request.offset > 0 => query.count(&self.pool).await?,
            None => 0,
        };

        self.warn_if_slow(started, request);

        let records = validate_rows(rows.into_iter().map(|row| row.advocate))?;
        Ok(SearchPage {
            records,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn health_check(&self) -> Result<(), RecordSourceError> {
        DatabaseManager::health_check(&self.pool).await?;
        Ok(())
    }
}
