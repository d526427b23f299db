//! Lesen von Saucen-Anfragen: Multipart (`sauce` + `image`) oder JSON

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
    Json,
};

use piquante_sauces::{BildUpload, SauceFelder};

use crate::error::ApiError;

/// Name des Multipart-Felds mit den Saucen-Daten als JSON-Text
pub const FELD_SAUCE: &str = "sauce";
/// Name des Multipart-Felds mit der Bilddatei
pub const FELD_BILD: &str = "image";

/// Inhalt einer Anlage- oder Aenderungsanfrage
#[derive(Debug, Default)]
pub struct SauceKoerper {
    pub felder: SauceFelder,
    pub bild: Option<BildUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for SauceKoerper
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ist_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if ist_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::UngueltigeAnfrage(e.body_text()))?;
            multipart_lesen(multipart).await
        } else {
            let Json(felder) = Json::<SauceFelder>::from_request(req, state)
                .await
                .map_err(|e| ApiError::UngueltigeAnfrage(e.body_text()))?;
            Ok(Self { felder, bild: None })
        }
    }
}

/// Liest die Felder `sauce` (JSON-Text) und `image` (Datei)
///
/// Weitere Felder werden ignoriert.
pub async fn multipart_lesen(mut multipart: Multipart) -> Result<SauceKoerper, ApiError> {
    let mut koerper = SauceKoerper::default();

    while let Some(feld) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::UngueltigeAnfrage(e.body_text()))?
    {
        let name = feld.name().map(str::to_string);
        match name.as_deref() {
            Some(FELD_SAUCE) => {
                let text = feld
                    .text()
                    .await
                    .map_err(|e| ApiError::UngueltigeAnfrage(e.body_text()))?;
                koerper.felder = serde_json::from_str(&text).map_err(|e| {
                    ApiError::UngueltigeAnfrage(format!("Feld 'sauce' ist kein gueltiges JSON: {e}"))
                })?;
            }
            Some(FELD_BILD) => {
                let original_name = feld.file_name().unwrap_or_default().to_string();
                let mime_type = feld.content_type().unwrap_or_default().to_string();
                let data = feld
                    .bytes()
                    .await
                    .map_err(|e| ApiError::UngueltigeAnfrage(e.body_text()))?;
                koerper.bild = Some(BildUpload {
                    original_name,
                    mime_type,
                    data: data.to_vec(),
                });
            }
            andere => {
                tracing::debug!(feld = ?andere, "Unbekanntes Multipart-Feld ignoriert");
            }
        }
    }

    Ok(koerper)
}
