//! Request-Timing Middleware fuer Axum
//!
//! Misst die Antwortzeit jeder HTTP-Anfrage und protokolliert sie als
//! strukturiertes Log-Event.

use axum::{
    body::Body,
    http::{Request, Response},
    middleware::Next,
};
use std::time::Instant;

/// TraceLayer fuer HTTP-Spans (Methode, URI, Version)
pub fn request_timing_layer() -> tower_http::trace::TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
> {
    use tower_http::trace::TraceLayer;
    TraceLayer::new_for_http()
}

/// Axum-Middleware-Funktion: misst Antwortzeit und loggt strukturiert.
///
/// Verwendung:
/// ```ignore
/// Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn(timing_middleware))
/// ```
pub async fn timing_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let methode = req.method().to_string();
    let pfad = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let dauer_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        tracing::warn!(
            method = %methode,
            path = %pfad,
            status = status,
            duration_ms = dauer_ms,
            "HTTP-Anfrage mit Serverfehler"
        );
    } else {
        tracing::info!(
            method = %methode,
            path = %pfad,
            status = status,
            duration_ms = dauer_ms,
            bucket = dauer_bucket(dauer_ms),
            "HTTP-Anfrage abgeschlossen"
        );
    }

    response
}

/// Grobe Dauer-Klasse fuer Log-Auswertungen
pub fn dauer_bucket(dauer_ms: u64) -> &'static str {
    match dauer_ms {
        0..=5 => "<=5ms",
        6..=25 => "<=25ms",
        26..=100 => "<=100ms",
        101..=500 => "<=500ms",
        501..=1000 => "<=1s",
        _ => ">1s",
    }
}
