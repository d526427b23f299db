//! Health-Check-Endpunkt fuer Piquante
//!
//! Endpoint: `GET /health`
//! Response: JSON mit Status, Version, Uptime und DB-Verbindungsstatus

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

/// Typ-Alias fuer eine geboxte Send-Future
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Prueft ob die Datenbank erreichbar ist
pub type DbPruefungFn = Arc<dyn Fn() -> BoxFuture<'static, bool> + Send + Sync>;

/// Status des Health-Checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Antwort des Health-Check-Endpunkts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub db_connected: bool,
}

/// Geteilter Zustand fuer den Health-Check-Handler
#[derive(Clone)]
pub struct HealthState {
    start_time: Arc<Instant>,
    db_pruefung: Option<DbPruefungFn>,
}

impl HealthState {
    /// Zustand ohne Datenbank-Pruefung (DB gilt als verbunden)
    pub fn neu() -> Self {
        Self {
            start_time: Arc::new(Instant::now()),
            db_pruefung: None,
        }
    }

    /// Zustand mit Datenbank-Pruefung pro Anfrage
    pub fn mit_db_pruefung(db_pruefung: DbPruefungFn) -> Self {
        Self {
            start_time: Arc::new(Instant::now()),
            db_pruefung: Some(db_pruefung),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub async fn db_verbunden(&self) -> bool {
        match &self.db_pruefung {
            Some(pruefung) => pruefung().await,
            None => true,
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::neu()
    }
}

/// Axum-Router fuer den `/health`-Endpunkt
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// `GET /health` – gibt den Serverstatus zurueck
async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let db_connected = state.db_verbunden().await;
    let (status, http_status) = if db_connected {
        (HealthStatus::Healthy, StatusCode::OK)
    } else {
        (HealthStatus::Unhealthy, StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        db_connected,
    };

    (http_status, Json(response))
}
