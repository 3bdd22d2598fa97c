use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;

/// DDL for the advocates table and its lookup indexes. Every statement is idempotent.
pub const STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "advocates" (
        "id" SERIAL PRIMARY KEY,
        "first_name" TEXT NOT NULL,
        "last_name" TEXT NOT NULL,
        "city" TEXT NOT NULL,
        "degree" TEXT NOT NULL,
        "specialties" JSONB NOT NULL DEFAULT '[]'::jsonb,
        "years_of_experience" INTEGER NOT NULL,
        "phone_number" BIGINT NOT NULL,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"CREATE INDEX IF NOT EXISTS "first_name_idx" ON "advocates" ("first_name")"#,
    r#"CREATE INDEX IF NOT EXISTS "last_name_idx" ON "advocates" ("last_name")"#,
    r#"CREATE INDEX IF NOT EXISTS "city_idx" ON "advocates" ("city")"#,
    r#"CREATE INDEX IF NOT EXISTS "degree_idx" ON "advocates" ("degree")"#,
    r#"CREATE INDEX IF NOT EXISTS "experience_idx" ON "advocates" ("years_of_experience")"#,
    r#"CREATE INDEX IF NOT EXISTS "name_search_idx" ON "advocates" ("first_name", "last_name")"#,
    r#"CREATE INDEX IF NOT EXISTS "specialties_gin_idx" ON "advocates" USING GIN ("specialties")"#,
    r#"CREATE INDEX IF NOT EXISTS "experience_range_idx" ON "advocates" ("years_of_experience") WHERE "years_of_experience" > 0"#,
    r#"CREATE INDEX IF NOT EXISTS "created_at_idx" ON "advocates" ("created_at" DESC, "id" DESC)"#,
];

/// Create the advocates table and indexes if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!("Advocates schema is up to date ({} statements)", STATEMENTS.len());
    Ok(())
}
