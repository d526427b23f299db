//! REST-Handler fuer Saucen und Abstimmungen
//!
//! Alle Handler verlangen eine gueltige [`AuthIdentitaet`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use piquante_core::{SauceId, Uebergang};

use crate::error::{ApiError, ApiResult};
use crate::middleware::{AuthIdentitaet, BasisUrl};
use crate::state::AppState;
use crate::upload::SauceKoerper;

pub const MELDUNG_ERSTELLT: &str = "Objet enregistré !";
pub const MELDUNG_GEAENDERT: &str = "Objet modifié !";
pub const MELDUNG_GELOESCHT: &str = "Objet supprimé !";

/// Antworttext fuer einen Abstimmungs-Uebergang
pub fn stimme_meldung(uebergang: Uebergang) -> &'static str {
    match uebergang {
        Uebergang::LikeHinzugefuegt => "Like ajouté !",
        Uebergang::DislikeHinzugefuegt => "Dislike ajouté !",
        Uebergang::LikeEntfernt => "Like supprimé !",
        Uebergang::DislikeEntfernt => "Dislike supprimé !",
        Uebergang::ZuLikeGewechselt | Uebergang::ZuDislikeGewechselt => "Vote modifié !",
        Uebergang::Unveraendert => "Aucun changement",
    }
}

/// Eine nicht lesbare ID verhaelt sich wie eine unbekannte Sauce
fn sauce_id(roh: &str) -> ApiResult<SauceId> {
    roh.parse()
        .map_err(|_| ApiError::NichtGefunden(roh.to_string()))
}

fn nachricht(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// GET /api/sauces
pub async fn list_sauces(
    State(state): State<AppState>,
    _identitaet: AuthIdentitaet,
) -> ApiResult<Response> {
    let saucen = state.saucen.alle().await?;
    Ok((StatusCode::OK, Json(saucen)).into_response())
}

/// GET /api/sauces/:id
pub async fn get_sauce(
    State(state): State<AppState>,
    _identitaet: AuthIdentitaet,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let sauce = state.saucen.laden(sauce_id(&id)?).await?;
    Ok((StatusCode::OK, Json(sauce)).into_response())
}

/// POST /api/sauces
pub async fn create_sauce(
    State(state): State<AppState>,
    identitaet: AuthIdentitaet,
    BasisUrl(basis): BasisUrl,
    koerper: SauceKoerper,
) -> ApiResult<Response> {
    state
        .saucen
        .erstellen(identitaet.user_id, koerper.felder, koerper.bild, &basis)
        .await?;

    Ok(nachricht(StatusCode::CREATED, MELDUNG_ERSTELLT))
}

/// PUT /api/sauces/:id
pub async fn update_sauce(
    State(state): State<AppState>,
    identitaet: AuthIdentitaet,
    BasisUrl(basis): BasisUrl,
    Path(id): Path<String>,
    koerper: SauceKoerper,
) -> ApiResult<Response> {
    state
        .saucen
        .bearbeiten(
            sauce_id(&id)?,
            identitaet.user_id,
            koerper.felder,
            koerper.bild,
            &basis,
        )
        .await?;

    Ok(nachricht(StatusCode::OK, MELDUNG_GEAENDERT))
}

/// DELETE /api/sauces/:id
pub async fn delete_sauce(
    State(state): State<AppState>,
    identitaet: AuthIdentitaet,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    state
        .saucen
        .loeschen(sauce_id(&id)?, identitaet.user_id)
        .await?;

    Ok(nachricht(StatusCode::OK, MELDUNG_GELOESCHT))
}

/// Koerper einer Abstimmung. Ein mitgesendetes `userId` wird ignoriert.
#[derive(Debug, Deserialize)]
pub struct StimmeAnfrage {
    pub like: i64,
}

/// POST /api/sauces/:id/like
pub async fn like_sauce(
    State(state): State<AppState>,
    identitaet: AuthIdentitaet,
    Path(id): Path<String>,
    body: Result<Json<StimmeAnfrage>, JsonRejection>,
) -> ApiResult<Response> {
    let id = sauce_id(&id)?;
    let Json(anfrage) = body.map_err(|e| ApiError::UngueltigeAnfrage(e.body_text()))?;

    let (_, uebergang) = state
        .saucen
        .abstimmen(id, identitaet.user_id, anfrage.like)
        .await?;

    Ok(nachricht(StatusCode::OK, stimme_meldung(uebergang)))
}
