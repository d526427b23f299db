//! REST-Handler fuer Registrierung und Anmeldung

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub const MELDUNG_BENUTZER_ERSTELLT: &str = "Utilisateur créé !";

/// Anmeldedaten fuer Signup und Login
#[derive(Debug, Deserialize)]
pub struct Zugangsdaten {
    pub email: String,
    pub password: String,
}

fn zugangsdaten(
    body: Result<Json<Zugangsdaten>, JsonRejection>,
) -> ApiResult<Zugangsdaten> {
    body.map(|Json(daten)| daten)
        .map_err(|e| ApiError::UngueltigeAnfrage(e.body_text()))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<Zugangsdaten>, JsonRejection>,
) -> ApiResult<Response> {
    let daten = zugangsdaten(body)?;
    state.konten.registrieren(&daten.email, &daten.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": MELDUNG_BENUTZER_ERSTELLT })),
    )
        .into_response())
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Zugangsdaten>, JsonRejection>,
) -> ApiResult<Response> {
    let daten = zugangsdaten(body)?;
    let anmeldung = state.konten.anmelden(&daten.email, &daten.password).await?;

    Ok((StatusCode::OK, Json(anmeldung)).into_response())
}
