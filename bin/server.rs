// Leak Ledger - Web Server
// REST API with Axum: score identities from raw provider payloads

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use leak_ledger::logging::init_logging;
use leak_ledger::{
    DetailRow, EngineConfig, IdentityResponses, ProfileRow, ProviderAResult, ProviderBResult,
    ProviderWarning, ReportEngine,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Shared application state (read-only); the engine and its pool live for the whole process
#[derive(Clone)]
struct AppState {
    engine: Arc<ReportEngine>,
}

impl AppState {
    fn new(config: &EngineConfig) -> Self {
        AppState {
            engine: Arc::new(ReportEngine::new(config)),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Raw provider payloads for one identity; `null` means the call failed
#[derive(Deserialize)]
struct IdentityRequest {
    email: String,
    #[serde(default)]
    leakcheck: Value,
    #[serde(default)]
    hibp: Value,
}

impl IdentityRequest {
    fn into_responses(self) -> IdentityResponses {
        let leakcheck = match self.leakcheck {
            Value::Null => ProviderAResult::Failure("no LeakCheck response".to_string()),
            other => ProviderAResult::from_value(other),
        };
        let hibp = match self.hibp {
            Value::Null => ProviderBResult::Failure("no HIBP response".to_string()),
            other => ProviderBResult::from_value(other),
        };
        IdentityResponses {
            email: self.email,
            leakcheck,
            hibp,
        }
    }
}

#[derive(Deserialize)]
struct ReportRequest {
    client: String,
    identities: Vec<IdentityRequest>,
}

#[derive(Serialize)]
struct ProfileResponse {
    profile: ProfileRow,
    details: Vec<DetailRow>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct ReportResponse {
    client: String,
    profiles: Vec<ProfileRow>,
    details: Vec<DetailRow>,
    warnings: Vec<String>,
}

fn warning_lines(warnings: &[ProviderWarning]) -> Vec<String> {
    warnings.iter().map(|w| w.to_string()).collect()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/profile - Consolidate one identity
async fn build_profile(
    State(state): State<AppState>,
    Json(request): Json<IdentityRequest>,
) -> impl IntoResponse {
    let response = profile_response(&state.engine, request, Utc::now());
    (StatusCode::OK, Json(ApiResponse::ok(response)))
}

fn profile_response(engine: &ReportEngine, request: IdentityRequest, now: DateTime<Utc>) -> ProfileResponse {
    let id = request.into_responses();
    let outcome = engine.builder().build(&id.email, &id.leakcheck, &id.hibp, now);
    ProfileResponse {
        profile: outcome.profile.to_row(),
        details: outcome.details.iter().map(|d| d.to_row()).collect(),
        warnings: warning_lines(&outcome.warnings),
    }
}

fn report_response(engine: &ReportEngine, request: ReportRequest, now: DateTime<Utc>) -> ReportResponse {
    let identities: Vec<IdentityResponses> = request
        .identities
        .into_iter()
        .map(IdentityRequest::into_responses)
        .collect();
    let report = engine.build(&request.client, &identities, now);
    ReportResponse {
        client: report.client.clone(),
        profiles: report.rows(),
        details: report.detail_rows(),
        warnings: warning_lines(&report.warnings),
    }
}

/// POST /api/report - Consolidate every identity of a client
async fn build_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> impl IntoResponse {
    let engine = Arc::clone(&state.engine);

    // CPU-bound fold; keep it off the async workers
    let joined = tokio::task::spawn_blocking(move || report_response(&engine, request, Utc::now())).await;

    match joined {
        Ok(response) => (StatusCode::OK, Json(ApiResponse::ok(Some(response)))).into_response(),
        Err(e) => {
            error!(error = %e, "report task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<ReportResponse>> {
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = match std::env::var("LEAK_LEDGER_CONFIG") {
        Ok(path) => EngineConfig::load(std::path::Path::new(&path))?,
        Err(_) => EngineConfig::default(),
    };

    let state = AppState::new(&config);

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/profile", post(build_profile))
        .route("/report", post(build_report))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let addr = std::env::var("LEAK_LEDGER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "server running");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    fn identity(email: &str) -> IdentityRequest {
        IdentityRequest {
            email: email.to_string(),
            leakcheck: serde_json::json!({"success": true, "found": 1, "fields": ["password"], "sources": [{"name": "Acme", "date": "2016-02"}]}),
            hibp: Value::Null,
        }
    }

    #[test]
    fn test_state_clones_share_one_engine() {
        let state = AppState::new(&EngineConfig {
            workers: 2,
            ..EngineConfig::default()
        });
        let handler_copy = state.clone();
        assert!(Arc::ptr_eq(&state.engine, &handler_copy.engine));
    }

    #[test]
    fn test_repeated_reports_reuse_engine() {
        let state = AppState::new(&EngineConfig {
            workers: 2,
            ..EngineConfig::default()
        });
        for _ in 0..3 {
            let request = ReportRequest {
                client: "Acme".to_string(),
                identities: vec![identity("a@x.io"), identity("b@x.io")],
            };
            let response = report_response(&state.engine, request, now());
            assert_eq!(response.profiles.len(), 2);
            assert_eq!(response.profiles[0].risk_score, "High");
            assert_eq!(response.warnings.len(), 2);
        }
        assert_eq!(Arc::strong_count(&state.engine), 1);
    }

    #[test]
    fn test_profile_uses_shared_builder() {
        let state = AppState::new(&EngineConfig::default());
        let response = profile_response(&state.engine, identity("a@x.io"), now());
        assert_eq!(response.profile.email, "a@x.io");
        assert_eq!(response.profile.leak_summary, "Acme (2016-02)");
        assert_eq!(response.warnings.len(), 1);
    }
}
