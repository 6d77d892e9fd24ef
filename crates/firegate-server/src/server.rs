// firegate-server/src/server.rs
// ============================================================================
// Module: Firegate HTTP Server
// Description: The /api/vault/resolve surface consumed by UI collaborators.
// Purpose: Serve runtime decisions over HTTP with rate limiting and auditing.
// Dependencies: axum, firegate-core, serde, tokio
// ============================================================================

//! ## Overview
//! The resolve endpoint accepts a locator (tape or path) plus optional score
//! overrides via query parameters or a JSON body; POST body fields take
//! precedence when both are given. Each request reloads the vault map, runs
//! the fail-closed pipeline (validate, flatten, match, resolve, decide), and
//! returns the decision or a machine-readable error code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use firegate_core::RuntimeDecision;
use firegate_core::ScoreOverrides;
use firegate_core::compute_runtime_decision;
use firegate_core::flatten_entries;
use firegate_core::resolve_entry_ref;
use firegate_core::select_entry;
use firegate_core::to_number_or_null;
use firegate_core::validate_vault_map;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::audit::AuditSink;
use crate::audit::ResolveAuditEvent;
use crate::audit::StderrAuditSink;
use crate::config::ConfigError;
use crate::config::FiregateConfig;
use crate::rate_limit::FixedWindowLimiter;
use crate::vault_store::FileVaultStore;

// ============================================================================
// SECTION: Server
// ============================================================================

/// Firegate HTTP server instance.
pub struct FiregateServer {
    /// Validated server configuration.
    config: FiregateConfig,
}

impl FiregateServer {
    /// Builds a server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid.
    pub fn from_config(config: FiregateConfig) -> Result<Self, ServerError> {
        config.validate()?;
        Ok(Self {
            config,
        })
    }

    /// Serves resolve requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self.config.server.bind.parse().map_err(|_| {
            ServerError::Config(ConfigError::Invalid("bad bind address".to_string()))
        })?;
        let state = Arc::new(ServerState::new(&self.config, Arc::new(StderrAuditSink)));
        let app = router(state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the resolve router over shared state.
fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/vault/resolve", get(handle_resolve_get).post(handle_resolve_post))
        .with_state(state)
}

/// Shared server state for resolve handlers.
pub(crate) struct ServerState {
    /// Filesystem-backed vault store.
    store: FileVaultStore,
    /// Per-client rate limiter.
    limiter: FixedWindowLimiter,
    /// Audit sink for resolve outcomes.
    audit: Arc<dyn AuditSink>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

impl ServerState {
    /// Builds state from configuration and an audit sink.
    pub(crate) fn new(config: &FiregateConfig, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            store: FileVaultStore::new(config.server.vault_root.clone()),
            limiter: FixedWindowLimiter::from_config(&config.server.rate_limit),
            audit,
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}

// ============================================================================
// SECTION: Request Parameters
// ============================================================================

/// Query-string parameters; every value arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct QueryParams {
    /// Tape locator.
    tape: Option<String>,
    /// Path locator.
    path: Option<String>,
    /// Somatic score override.
    somatic: Option<String>,
    /// Source score override.
    source: Option<String>,
    /// Mapping score override.
    mapping: Option<String>,
    /// Interpretation score override.
    interpretation: Option<String>,
}

/// JSON body parameters; the tape locator may be a string or a number.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct BodyParams {
    /// Tape locator.
    tape: Option<TapeValue>,
    /// Path locator.
    path: Option<String>,
    /// Somatic score override.
    somatic: Option<f64>,
    /// Source score override.
    source: Option<f64>,
    /// Mapping score override.
    mapping: Option<f64>,
    /// Interpretation score override.
    interpretation: Option<f64>,
}

/// Tape locator wire forms.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TapeValue {
    /// String form.
    Text(String),
    /// Numeric form; stringified before matching, so `0` stays present.
    Number(serde_json::Number),
}

impl TapeValue {
    /// Returns the locator as matching text.
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// A merged resolve request independent of transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ResolveRequest {
    /// Tape locator, when given.
    pub(crate) tape: Option<String>,
    /// Path locator, when given.
    pub(crate) path: Option<String>,
    /// Score overrides superseding stored scores.
    pub(crate) overrides: ScoreOverrides,
}

/// Builds a request from query parameters alone.
pub(crate) fn request_from_query(query: QueryParams) -> ResolveRequest {
    ResolveRequest {
        tape: query.tape,
        path: query.path,
        overrides: ScoreOverrides {
            somatic: parse_override(query.somatic.as_deref()),
            source: parse_override(query.source.as_deref()),
            mapping: parse_override(query.mapping.as_deref()),
            interpretation: parse_override(query.interpretation.as_deref()),
        },
    }
}

/// Merges body parameters over query parameters; body fields win.
pub(crate) fn merge_request(query: QueryParams, body: BodyParams) -> ResolveRequest {
    let base = request_from_query(query);
    ResolveRequest {
        tape: body.tape.map(TapeValue::into_text).or(base.tape),
        path: body.path.or(base.path),
        overrides: ScoreOverrides {
            somatic: to_number_or_null(body.somatic).or(base.overrides.somatic),
            source: to_number_or_null(body.source).or(base.overrides.source),
            mapping: to_number_or_null(body.mapping).or(base.overrides.mapping),
            interpretation: to_number_or_null(body.interpretation)
                .or(base.overrides.interpretation),
        },
    }
}

/// Parses a textual override into a known score, or unknown.
fn parse_override(value: Option<&str>) -> Option<f64> {
    to_number_or_null(value.and_then(|text| text.parse::<f64>().ok()))
}

// ============================================================================
// SECTION: Resolve Pipeline
// ============================================================================

/// Resolve failures mapped onto the HTTP error surface.
#[derive(Debug, Error)]
pub enum ResolveFailure {
    /// Neither locator was supplied.
    #[error("Missing query. Provide tape or path.")]
    MissingQuery,
    /// No entry matched the locator.
    #[error("No matching vault entry.")]
    NoMatch,
    /// The vault map failed schema validation.
    #[error("vault schema invalid: {0}")]
    SchemaInvalid(String),
    /// Any other failure during resolution.
    #[error("vault resolve failed: {0}")]
    Internal(String),
}

/// Runs the full resolve pipeline for one request.
///
/// Locator presence is checked with `Option::is_some`; a tape value of `"0"`
/// is a present locator. The vault map is reloaded from disk on every call.
///
/// # Errors
///
/// Returns [`ResolveFailure`] describing which stage rejected the request.
pub(crate) fn resolve_request(
    store: &FileVaultStore,
    request: &ResolveRequest,
) -> Result<RuntimeDecision, ResolveFailure> {
    if request.tape.is_none() && request.path.is_none() {
        return Err(ResolveFailure::MissingQuery);
    }

    let map = store.load_map().map_err(|err| ResolveFailure::Internal(err.to_string()))?;
    let report = validate_vault_map(&map);
    if !report.valid {
        return Err(ResolveFailure::SchemaInvalid(report.errors.join("; ")));
    }

    let entries = flatten_entries(&map);
    let entry = select_entry(&entries, request.tape.as_deref(), request.path.as_deref())
        .ok_or(ResolveFailure::NoMatch)?;

    let loader = store.reference_loader();
    let resolved = resolve_entry_ref(entry, &loader);
    Ok(compute_runtime_decision(&resolved, &request.overrides))
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Error payload returned on resolve failures.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Machine-readable error code or message.
    error: String,
    /// Human-readable detail, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// Handles GET resolve requests.
async fn handle_resolve_get(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Query(query): Query<QueryParams>,
) -> Response {
    let request = request_from_query(query);
    respond(&state, peer, request)
}

/// Handles POST resolve requests; body fields take precedence over query.
async fn handle_resolve_post(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Query(query): Query<QueryParams>,
    bytes: Bytes,
) -> Response {
    if bytes.len() > state.max_body_bytes {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            axum::Json(ErrorBody {
                error: "request body too large".to_string(),
                detail: None,
            }),
        )
            .into_response();
    }
    let body: BodyParams = if bytes.is_empty() {
        BodyParams::default()
    } else {
        match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(err) => {
                return (
                    StatusCode::BAD_REQUEST,
                    axum::Json(ErrorBody {
                        error: "Invalid JSON body.".to_string(),
                        detail: Some(err.to_string()),
                    }),
                )
                    .into_response();
            }
        }
    };
    let request = merge_request(query, body);
    respond(&state, peer, request)
}

/// Runs the pipeline and renders the HTTP response plus audit event.
fn respond(state: &ServerState, peer: SocketAddr, request: ResolveRequest) -> Response {
    if !state.limiter.allow(peer.ip()) {
        let response = (
            StatusCode::TOO_MANY_REQUESTS,
            axum::Json(ErrorBody {
                error: "rate_limited".to_string(),
                detail: None,
            }),
        )
            .into_response();
        audit(state, peer, &request, StatusCode::TOO_MANY_REQUESTS, None);
        return response;
    }

    let outcome = run_blocking(|| resolve_request(&state.store, &request));
    match outcome {
        Ok(decision) => {
            audit(state, peer, &request, StatusCode::OK, Some(&decision));
            (StatusCode::OK, axum::Json(decision)).into_response()
        }
        Err(failure) => {
            let (status, body) = failure_response(&failure);
            audit(state, peer, &request, status, None);
            (status, axum::Json(body)).into_response()
        }
    }
}

/// Maps a resolve failure onto its status code and error payload.
fn failure_response(failure: &ResolveFailure) -> (StatusCode, ErrorBody) {
    match failure {
        ResolveFailure::MissingQuery => (StatusCode::BAD_REQUEST, ErrorBody {
            error: "Missing query. Provide tape or path.".to_string(),
            detail: None,
        }),
        ResolveFailure::NoMatch => (StatusCode::NOT_FOUND, ErrorBody {
            error: "No matching vault entry.".to_string(),
            detail: None,
        }),
        ResolveFailure::SchemaInvalid(detail) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody {
            error: "vault_schema_invalid".to_string(),
            detail: Some(detail.clone()),
        }),
        ResolveFailure::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody {
            error: "vault_resolve_failed".to_string(),
            detail: Some(detail.clone()),
        }),
    }
}

/// Executes the pipeline, shifting to a blocking context when available.
fn run_blocking<T>(operation: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(operation)
        }
        _ => operation(),
    }
}

/// Emits one audit event for a finished request.
fn audit(
    state: &ServerState,
    peer: SocketAddr,
    request: &ResolveRequest,
    status: StatusCode,
    decision: Option<&RuntimeDecision>,
) {
    let verdict = decision.and_then(|decision| {
        serde_json::to_value(decision.runtime_decision)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
    });
    state.audit.record(&ResolveAuditEvent {
        event: "vault_resolve",
        client: peer.ip().to_string(),
        tape: request.tape.clone(),
        path: request.path.clone(),
        status: status.as_u16(),
        decision: verdict,
        ts: now_rfc3339(),
    });
}

/// Formats the current UTC time as RFC 3339, or empty on formatter failure.
fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Firegate server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
