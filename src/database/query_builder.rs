use serde_json::Value;
use sqlx::{self, postgres::{PgArguments, PgRow}, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, SearchColumn, SearchTerm, SqlResult};

/// Typed front-end over [`Filter`]: builds the SQL, binds parameters and decodes rows into `T`.
pub struct QueryBuilder<T> {
    filter: Filter,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        Ok(Self {
            filter: Filter::new(table_name)?,
            _phantom: std::marker::PhantomData,
        })
    }

    pub fn select(mut self, columns: &[&str]) -> Result<Self, DatabaseError> {
        self.filter.select(columns)?;
        Ok(self)
    }

    pub fn search(mut self, term: Option<SearchTerm>, columns: &[SearchColumn]) -> Result<Self, DatabaseError> {
        self.filter.search(term, columns)?;
        Ok(self)
    }

    pub fn order(mut self, order_spec: &str) -> Result<Self, DatabaseError> {
        self.filter.order(order_spec)?;
        Ok(self)
    }

    pub fn limit(mut self, limit: u32, offset: Option<u64>) -> Result<Self, DatabaseError> {
        self.filter.limit(limit, offset)?;
        Ok(self)
    }

    pub fn with_total_count(mut self) -> Self {
        self.filter.with_total_count();
        self
    }

    pub async fn select_all(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = self.filter.to_sql()?;
        tracing::trace!("select: {}", sql_result.query);
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    /// Count rows matching the same predicate, ignoring order and pagination.
    pub async fn count(&self, pool: &PgPool) -> Result<i64, DatabaseError> {
        let sql_result: SqlResult = self.filter.to_count_sql()?;
        tracing::trace!("count: {}", sql_result.query);
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}

// Search patterns bind as text; anything structured goes over as JSONB.
fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::String(s) => q.bind(s.as_str()),
        other => q.bind(other),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        Value::String(s) => q.bind(s.as_str()),
        other => q.bind(other),
    }
}
