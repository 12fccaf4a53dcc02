//! HTTP surface of the site API.
//!
//! Every handler is independent: the catalog is immutable and the intake only
//! touches atomic counters, so requests never wait on each other.

use crate::adapters::mail::HttpMailRelay;
use crate::adapters::smtp::SmtpMailRelay;
use crate::config::RelayTransport;
use crate::core::intake::{LeadIntake, MailRouting, SERVER_FAILURE_MESSAGE};
use crate::core::{ConfigProvider, LeadError, Mailer};
use crate::domain::catalog;
use crate::domain::lead::LeadIssue;
use crate::domain::model::{CaseStudy, ResponseEnvelope, ServiceOffering, SiteOptions};
use crate::utils::error::{Result, SiteError};
use crate::utils::monitor::IntakeStats;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const BANNER: &str = "One Digital Office API Running";

#[derive(Clone)]
pub struct AppState {
    intake: Arc<LeadIntake>,
}

impl AppState {
    pub fn new(intake: LeadIntake) -> Self {
        Self {
            intake: Arc::new(intake),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let intake = match config.mail_relay() {
            Some(relay) => {
                let mailer: Arc<dyn Mailer> = match relay.transport {
                    RelayTransport::Smtp => Arc::new(SmtpMailRelay::from_config(relay)?),
                    RelayTransport::Http => Arc::new(HttpMailRelay::from_config(relay)?),
                };
                tracing::info!("📮 Lead notifications go to relay {}", mailer.describe());
                LeadIntake::with_mailer(mailer, MailRouting::from(relay))
            }
            None => {
                tracing::info!("📭 No mail relay configured, lead notifications are disabled");
                LeadIntake::unconfigured()
            }
        };
        Ok(Self::new(intake))
    }

    pub fn intake(&self) -> &LeadIntake {
        &self.intake
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub mail_relay: String,
    pub intake: IntakeStats,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/services", get(services))
        .route("/api/case-studies", get(case_studies))
        .route("/api/site-options", get(site_options))
        .route("/api/status", get(status))
        .route("/api/lead", post(submit_lead))
        .fallback(not_found)
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve<C: ConfigProvider>(config: &C) -> Result<()> {
    let state = AppState::from_config(config)?;
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| SiteError::ServerError {
            message: format!("could not bind {}: {}", address, e),
        })?;
    tracing::info!("🚀 Server running on {}", listener.local_addr()?);

    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SiteError::ServerError {
            message: format!("connection loop on {} ended: {}", address, e),
        })?;

    state.intake().monitor().log_stats("Shutdown");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}

async fn index() -> &'static str {
    BANNER
}

async fn services() -> Json<&'static [ServiceOffering]> {
    Json(catalog::list_services())
}

async fn case_studies() -> Json<&'static [CaseStudy]> {
    Json(catalog::list_case_studies())
}

async fn site_options() -> Json<SiteOptions> {
    Json(catalog::site_options())
}

async fn status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(StatusReport {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mail_relay: state
            .intake()
            .relay_description()
            .unwrap_or_else(|| "unconfigured".to_string()),
        intake: state.intake().monitor().snapshot(),
    })
}

/// An empty body counts as `{}` so the visitor gets the usual
/// required-field issues.
fn parse_body(body: &[u8]) -> std::result::Result<Value, LeadIssue> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(LeadIssue::invalid_json)
}

async fn submit_lead(State(state): State<AppState>, body: Bytes) -> Response {
    let raw = match parse_body(&body) {
        Ok(raw) => raw,
        Err(issue) => {
            state.intake().monitor().record_rejected();
            tracing::info!("Lead rejected: {}", issue.message);
            return (
                StatusCode::BAD_REQUEST,
                Json(ResponseEnvelope::invalid(vec![issue])),
            )
                .into_response();
        }
    };

    match state.intake().submit_lead(&raw).await {
        Ok(accepted) => (
            StatusCode::OK,
            Json(ResponseEnvelope::accepted(accepted.message)),
        )
            .into_response(),
        Err(LeadError::Validation(issues)) => (
            StatusCode::BAD_REQUEST,
            Json(ResponseEnvelope::invalid(issues)),
        )
            .into_response(),
        Err(LeadError::Server { .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ResponseEnvelope::failed(SERVER_FAILURE_MESSAGE)),
        )
            .into_response(),
    }
}

async fn not_found() -> (StatusCode, Json<ResponseEnvelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(ResponseEnvelope::failed("Not found")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, MailRelayConfig, ServerConfig};

    #[test]
    fn test_parse_body_treats_blank_as_empty_object() {
        assert_eq!(parse_body(b"").unwrap(), Value::Object(Map::new()));
        assert_eq!(parse_body(b"  \n").unwrap(), Value::Object(Map::new()));
    }

    #[test]
    fn test_parse_body_reports_malformed_json() {
        let issue = parse_body(b"{\"name\": ").unwrap_err();
        assert!(issue.path.is_empty());
        assert!(issue.message.starts_with("Malformed JSON body"));
    }

    #[test]
    fn test_state_follows_relay_config() {
        let unconfigured = AppState::from_config(&AppConfig::default()).unwrap();
        assert!(unconfigured.intake().relay_description().is_none());

        let config = AppConfig {
            mail: Some(MailRelayConfig::new("relay.internal")),
            ..AppConfig::default()
        };
        let configured = AppState::from_config(&config).unwrap();
        assert_eq!(
            configured.intake().relay_description().as_deref(),
            Some("smtp://relay.internal:587")
        );

        let config = AppConfig {
            mail: Some(MailRelayConfig::http("gateway.internal")),
            ..AppConfig::default()
        };
        let gateway = AppState::from_config(&config).unwrap();
        assert_eq!(
            gateway.intake().relay_description().as_deref(),
            Some("gateway.internal:80")
        );
    }

    #[tokio::test]
    async fn test_bind_failure_is_a_server_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: taken.local_addr().unwrap().port(),
            },
            ..AppConfig::default()
        };

        let err = serve(&config).await.unwrap_err();
        match err {
            SiteError::ServerError { message } => {
                assert!(message.starts_with("could not bind 127.0.0.1:"));
            }
            other => panic!("expected a server error, got {other:?}"),
        }
    }
}
