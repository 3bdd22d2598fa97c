//! Store-backed record source against a live Postgres.
//!
//! Skipped unless `TEST_DATABASE_URL` points at a database the tests may
//! freely migrate and reseed. Every test replaces the whole advocates table,
//! so they take a shared lock and run one at a time.

mod common;

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};

use advocate_directory::config::{AppConfig, DatabaseConfig};
use advocate_directory::database::models::NewAdvocate;
use advocate_directory::database::{schema, seed, DatabaseManager};
use advocate_directory::filter::SearchTerm;
use advocate_directory::source::{FixtureRecordSource, PgRecordSource, RecordSource, SearchRequest};

use common::{advocate, app_with_source, get_json, numbered_advocates};

static STORE_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Store {
    pool: PgPool,
    config: DatabaseConfig,
    _guard: MutexGuard<'static, ()>,
}

impl Store {
    fn source(&self) -> PgRecordSource {
        PgRecordSource::new(self.pool.clone(), &self.config)
    }

    fn app(&self) -> axum::Router {
        app_with_source(Arc::new(self.source()))
    }
}

/// Migrate and reseed with `records`, or `None` when no test database is configured.
async fn store_with(records: Vec<NewAdvocate>) -> Result<Option<Store>> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set; skipping store-backed test");
            return Ok(None);
        }
    };

    let guard = STORE_LOCK.lock().await;

    let mut config = AppConfig::development().database;
    config.url = Some(url);
    config.max_connections = 2;

    let pool = DatabaseManager::connect(&config).await?;
    schema::ensure_schema(&pool).await?;
    // Second run proves the DDL is idempotent
    schema::ensure_schema(&pool).await?;

    let report = seed::seed(&pool, &records).await?;
    assert_eq!(report.inserted, records.len() as u64);
    assert_eq!(report.total, records.len() as i64);

    Ok(Some(Store { pool, config, _guard: guard }))
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row["id"].as_i64()).collect())
        .unwrap_or_default()
}

fn first_names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row["firstName"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn wildcard_dataset() -> Vec<NewAdvocate> {
    vec![
        advocate("Jane", "Smith", &["Oncology"], 8),
        advocate("Bob", "Jones", &["100% remote"], 4),
        advocate("Ann_Marie", "Lee", &["Pediatrics"], 6),
        advocate("Carl", "Back\\slash", &["Sleep issues"], 15),
        advocate("Dora", "Straße", &["Trauma & PTSD"], 21),
    ]
}

#[tokio::test]
async fn specialty_search_matches_inside_jsonb_array() -> Result<()> {
    let Some(store) = store_with(vec![
        advocate("Jane", "Smith", &["Oncology", "Chronic pain"], 8),
        advocate("Bob", "Jones", &["Cardiology"], 4),
    ])
    .await?
    else {
        return Ok(());
    };

    let (status, body) = get_json(&store.app(), "/api/advocates?search=onco").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first_names(&body), vec!["Jane"]);
    assert_eq!(body["data"][0]["specialties"], json!(["Oncology", "Chronic pain"]));
    assert_eq!(
        body["pagination"],
        json!({ "page": 1, "limit": 20, "total": 1, "totalPages": 1, "hasNext": false, "hasPrev": false })
    );

    let (_, body) = get_json(&store.app(), "/api/advocates?search=%20JONES%20").await?;
    assert_eq!(first_names(&body), vec!["Bob"]);
    Ok(())
}

#[tokio::test]
async fn like_metacharacters_match_literally() -> Result<()> {
    let Some(store) = store_with(wildcard_dataset()).await? else {
        return Ok(());
    };
    let app = store.app();

    let (_, body) = get_json(&app, "/api/advocates?search=%25").await?;
    assert_eq!(first_names(&body), vec!["Bob"]);

    let (_, body) = get_json(&app, "/api/advocates?search=_").await?;
    assert_eq!(first_names(&body), vec!["Ann_Marie"]);

    let (_, body) = get_json(&app, "/api/advocates?search=%5C").await?;
    assert_eq!(first_names(&body), vec!["Carl"]);

    let (_, body) = get_json(&app, "/api/advocates?search=1").await?;
    // years 15 and 21, plus "100% remote"
    let mut names = first_names(&body);
    names.sort();
    assert_eq!(names, vec!["Bob", "Carl", "Dora"]);
    Ok(())
}

#[tokio::test]
async fn store_and_fixture_agree() -> Result<()> {
    let dataset = wildcard_dataset();
    let Some(store) = store_with(dataset.clone()).await? else {
        return Ok(());
    };
    let pg = store.source();
    let fixture = FixtureRecordSource::new(dataset)?;

    for term in ["", "%", "_", "\\", "straße", "onco", "PTSD", "1", "zzz"] {
        for offset in [0, 2, 60] {
            let request = SearchRequest { term: SearchTerm::parse(term), limit: 2, offset };
            let from_store = pg.search(&request).await?;
            let from_fixture = fixture.search(&request).await?;

            assert_eq!(from_store.total, from_fixture.total, "total for {:?} at {}", term, offset);
            let names = |page: &advocate_directory::source::SearchPage| -> Vec<String> {
                page.records.iter().map(|a| a.first_name.clone()).collect()
            };
            assert_eq!(names(&from_store), names(&from_fixture), "page for {:?} at {}", term, offset);
        }
    }
    Ok(())
}

#[tokio::test]
async fn pages_newest_first_with_exact_totals() -> Result<()> {
    let Some(store) = store_with(numbered_advocates(45)).await? else {
        return Ok(());
    };
    let app = store.app();

    let mut seen = Vec::new();
    for (page, expected) in [(1, 20), (2, 20), (3, 5)] {
        let (status, body) = get_json(&app, &format!("/api/advocates?page={}&limit=20", page)).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(expected), "page {}", page);
        assert_eq!(body["pagination"]["total"], 45);
        assert_eq!(body["pagination"]["totalPages"], 3);
        assert_eq!(body["pagination"]["hasNext"], page < 3);
        assert_eq!(body["pagination"]["hasPrev"], page > 1);
        seen.extend(ids(&body));
    }

    // One bulk insert shares a creation time, so ids break the tie, highest first
    assert_eq!(seen.len(), 45);
    assert!(seen.windows(2).all(|pair| pair[0] > pair[1]), "not newest first: {:?}", seen);
    Ok(())
}

#[tokio::test]
async fn page_past_the_end_reports_total() -> Result<()> {
    let Some(store) = store_with(numbered_advocates(45)).await? else {
        return Ok(());
    };

    let (status, body) = get_json(&store.app(), "/api/advocates?page=4&limit=20").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 45);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrev"], true);

    let (_, body) = get_json(&store.app(), "/api/advocates?search=anxiety&page=10&limit=20").await?;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 45);
    Ok(())
}

#[tokio::test]
async fn malformed_row_fails_the_request() -> Result<()> {
    let Some(store) = store_with(numbered_advocates(3)).await? else {
        return Ok(());
    };

    sqlx::query(r#"UPDATE "advocates" SET "specialties" = '"x"'::jsonb WHERE "id" = (SELECT MAX("id") FROM "advocates")"#)
        .execute(&store.pool)
        .await?;

    let (status, body) = get_json(&store.app(), "/api/advocates").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch advocates" }));
    Ok(())
}

#[tokio::test]
async fn health_check_reaches_the_store() -> Result<()> {
    let Some(store) = store_with(vec![]).await? else {
        return Ok(());
    };

    let (status, body) = get_json(&store.app(), "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "postgres");
    Ok(())
}
