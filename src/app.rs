use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{advocates, system};
use crate::services::AdvocateService;
use crate::source::RecordSource;

/// Per-process context handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub advocates: Arc<AdvocateService>,
}

impl AppState {
    pub fn new(config: AppConfig, source: Arc<dyn RecordSource>) -> Self {
        Self {
            config: Arc::new(config),
            advocates: Arc::new(AdvocateService::new(source)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Directory API
        .route("/api/advocates", get(advocates::list))
        .fallback(system::not_found)
        .with_state(state);

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET]),
    )
}
