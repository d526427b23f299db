//! Axum-Extraktoren und Middleware fuer Auth und Rate Limiting

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use piquante_core::UserId;

use crate::error::{ApiError, MELDUNG_NICHT_AUTHENTIFIZIERT};
use crate::rate_limit::RateLimiter;
use crate::state::AppState;

/// Identitaet des Aufrufers, aus dem Bearer-Token gelesen
///
/// Als Handler-Parameter erzwingt sie ein gueltiges Token. Der Handler
/// laeuft nicht, wenn die Pruefung fehlschlaegt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthIdentitaet {
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthIdentitaet {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            ApiError::NichtAuthentifiziert(MELDUNG_NICHT_AUTHENTIFIZIERT.into())
        })?;

        let user_id = state.konten.token_pruefen(token)?;

        Ok(Self { user_id })
    }
}

/// Oeffentliche Basis-URL fuer Bild-Links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisUrl(pub String);

#[async_trait]
impl FromRequestParts<AppState> for BasisUrl {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(basis_url(
            &parts.headers,
            state.oeffentliche_url.as_deref(),
        )))
    }
}

/// Konfigurierte URL, sonst `http://<Host-Header>`
pub fn basis_url(headers: &HeaderMap, konfiguriert: Option<&str>) -> String {
    if let Some(url) = konfiguriert {
        return url.to_string();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost");
    format!("http://{host}")
}

/// Extrahiert Bearer-Token aus Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Client-IP fuer das Rate Limit
///
/// Standard ist die Peer-Adresse der Verbindung. Der erste Eintrag aus
/// `X-Forwarded-For` zaehlt nur mit `proxy_vertrauen`.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, proxy_vertrauen: bool) -> String {
    let weitergeleitet = if proxy_vertrauen {
        headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    } else {
        None
    };

    weitergeleitet
        .or_else(|| peer.map(|p| p.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum-State der den RateLimiter enthaelt (fuer die Middleware)
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<RateLimiter>,
}

/// Axum-Middleware: Rate Limiting per IP
pub async fn rate_limit_middleware(
    State(rls): State<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let ip = client_ip(req.headers(), peer, rls.limiter.konfig().proxy_vertrauen);

    match rls.limiter.pruefe_ip(&ip) {
        Ok(()) => next.run(req).await,
        Err(retry_after_secs) => {
            tracing::warn!(ip = %ip, retry_after_secs, "Rate Limit ueberschritten");
            ApiError::RateLimitUeberschritten { retry_after_secs }.into_response()
        }
    }
}
