//! Axum HTTP-Server fuer Piquante

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use piquante_observability::{health_router, request_timing_layer, timing_middleware, HealthState};

use crate::middleware::{rate_limit_middleware, RateLimitState};
use crate::rate_limit::{RateLimitKonfig, RateLimiter};
use crate::routes::api_router;
use crate::state::AppState;

/// Intervall, in dem volle Rate-Limit-Buckets entfernt werden
const CLEANUP_INTERVALL: Duration = Duration::from_secs(60);

/// REST-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct RestServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt.
    pub cors_origins: Vec<String>,
    pub rate_limit: RateLimitKonfig,
    /// Verzeichnis das unter `/images` ausgeliefert wird
    pub bilder_verzeichnis: PathBuf,
    /// Maximale Groesse eines Anfrage-Koerpers (inklusive Bild)
    pub max_upload_bytes: usize,
}

impl Default for RestServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors_origins: vec![],
            rate_limit: RateLimitKonfig::default(),
            bilder_verzeichnis: PathBuf::from("images"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// Baut die vollstaendige Anwendung
///
/// `/api/*` laeuft durch das Rate Limit, `/images` und `/health` nicht.
pub fn app_router(
    state: AppState,
    konfig: &RestServerKonfig,
    limiter: Arc<RateLimiter>,
    health: HealthState,
) -> Router {
    let rls = RateLimitState { limiter };

    let api = api_router()
        .layer(DefaultBodyLimit::max(konfig.max_upload_bytes))
        .layer(middleware::from_fn_with_state(rls, rate_limit_middleware))
        .with_state(state);

    Router::new()
        .merge(api)
        .nest_service("/images", ServeDir::new(&konfig.bilder_verzeichnis))
        .merge(health_router(health))
        .layer(middleware::from_fn(timing_middleware))
        .layer(request_timing_layer())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("0"),
        ))
        .layer(cors_layer(&konfig.cors_origins))
}

/// Axum HTTP-Server fuer Piquante
pub struct RestServer {
    konfig: RestServerKonfig,
}

impl RestServer {
    pub fn neu(konfig: RestServerKonfig) -> Self {
        Self { konfig }
    }

    /// Startet den Server und blockiert bis zum Herunterfahren
    pub async fn starten(self, state: AppState, health: HealthState) -> Result<()> {
        let limiter = RateLimiter::neu(self.konfig.rate_limit.clone());

        let aufraeumer = {
            let limiter = limiter.clone();
            tokio::spawn(async move {
                let mut intervall = tokio::time::interval(CLEANUP_INTERVALL);
                loop {
                    intervall.tick().await;
                    let entfernt = limiter.cleanup();
                    if entfernt > 0 {
                        tracing::debug!(entfernt, "Rate-Limit-Buckets bereinigt");
                    }
                }
            })
        };

        let app = app_router(state, &self.konfig, limiter, health);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "REST-Server gestartet");

        let ergebnis = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await;

        aufraeumer.abort();
        ergebnis?;
        tracing::info!("REST-Server beendet");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(%e, "Ctrl+C-Handler konnte nicht installiert werden");
        std::future::pending::<()>().await;
    }
    tracing::info!("Herunterfahren angefordert");
}
