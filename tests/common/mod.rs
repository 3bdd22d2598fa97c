#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use reqwest::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

use advocate_directory::app::{router, AppState};
use advocate_directory::config::AppConfig;
use advocate_directory::database::models::NewAdvocate;
use advocate_directory::source::{FixtureRecordSource, RecordSource};

/// A running server binary. Dropping it kills the process.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Blank DATABASE_URL wins over any .env file and selects the fixture dataset
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_advocate-directory"));
        cmd.env("ADVOCATES_PORT", port.to_string())
            .env("ADVOCATES_HOST", "127.0.0.1")
            .env("DATABASE_URL", "")
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Spawn a fresh server for the calling test and wait until it answers `/health`.
pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Router over an arbitrary record source with development settings.
pub fn app_with_source(source: Arc<dyn RecordSource>) -> Router {
    router(AppState::new(AppConfig::development(), source))
}

/// Router over an in-memory dataset built from `seed`, ids assigned in order.
pub fn app_with_advocates(seed: Vec<NewAdvocate>) -> Router {
    let source = FixtureRecordSource::new(seed).expect("seed dataset should be valid");
    app_with_source(Arc::new(source))
}

/// Router over the built-in dataset.
pub fn fixture_app() -> Router {
    let source = FixtureRecordSource::builtin().expect("built-in dataset should be valid");
    app_with_source(Arc::new(source))
}

/// Issue a GET against the router and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;

    let status = StatusCode::from_u16(response.status().as_u16())?;
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body from {}", uri))?;
    Ok((status, body))
}

pub fn advocate(first_name: &str, last_name: &str, specialties: &[&str], years: i32) -> NewAdvocate {
    NewAdvocate {
        first_name: first_name.into(),
        last_name: last_name.into(),
        city: "New York".into(),
        degree: "MD".into(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        years_of_experience: years,
        phone_number: 5551234567,
    }
}

/// `count` advocates named `Person 1..=count`, each with "Anxiety" as the only specialty.
pub fn numbered_advocates(count: usize) -> Vec<NewAdvocate> {
    (1..=count)
        .map(|n| advocate("Person", &n.to_string(), &["Anxiety"], 3))
        .collect()
}
