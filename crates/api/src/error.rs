//! Fehlertypen der REST-Schnittstelle
//!
//! Jeder Fehler wird in genau eine HTTP-Antwort uebersetzt. 401 und 500
//! antworten mit `{ "error": ... }`, alle anderen mit `{ "message": ... }`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use piquante_auth::AuthError;
use piquante_sauces::SauceError;

pub const MELDUNG_NICHT_AUTHENTIFIZIERT: &str = "Requête non authentifiée !";
pub const MELDUNG_BENUTZER_UNBEKANNT: &str = "Utilisateur non trouvé...";
pub const MELDUNG_FALSCHE_ANMELDEDATEN: &str = "Mot de passe ou email incorrect !";
pub const MELDUNG_EMAIL_VERGEBEN: &str = "Un compte existe déjà avec cet Email.";
pub const MELDUNG_PASSWORT_RICHTLINIE: &str = "Votre mot de passe doit contenir au moins 8 caractères, avec une lettre majuscule , une lettre minuscule et au moins 1 chiffre !";
pub const MELDUNG_KEINE_BERECHTIGUNG: &str = "Not authorized";
pub const MELDUNG_NICHT_GEFUNDEN: &str = "Sauce introuvable !";
pub const MELDUNG_RATE_LIMIT: &str =
    "Tu ne peux pas réessayer pour l'instant, recommence plus tard !";
pub const MELDUNG_INTERN: &str = "Erreur interne du serveur";

/// Alle Fehler, die ein Handler zurueckgeben kann
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Nicht authentifiziert: {0}")]
    NichtAuthentifiziert(String),

    #[error("Keine Berechtigung")]
    KeineBerechtigung,

    #[error("Nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Ungueltige Anfrage: {0}")]
    UngueltigeAnfrage(String),

    #[error("Rate Limit ueberschritten: bitte warte {retry_after_secs} Sekunden")]
    RateLimitUeberschritten { retry_after_secs: u64 },

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NichtAuthentifiziert(_) => StatusCode::UNAUTHORIZED,
            Self::KeineBerechtigung => StatusCode::FORBIDDEN,
            Self::NichtGefunden(_) => StatusCode::NOT_FOUND,
            Self::UngueltigeAnfrage(_) => StatusCode::BAD_REQUEST,
            Self::RateLimitUeberschritten { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Intern(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let koerper = match &self {
            Self::NichtAuthentifiziert(meldung) => json!({ "error": meldung }),
            Self::KeineBerechtigung => json!({ "message": MELDUNG_KEINE_BERECHTIGUNG }),
            Self::NichtGefunden(_) => json!({ "message": MELDUNG_NICHT_GEFUNDEN }),
            Self::UngueltigeAnfrage(meldung) => json!({ "message": meldung }),
            Self::RateLimitUeberschritten { .. } => json!({ "message": MELDUNG_RATE_LIMIT }),
            Self::Intern(details) => {
                tracing::error!(fehler = %details, "Interner Fehler bei der Anfrage");
                json!({ "error": MELDUNG_INTERN })
            }
        };

        let mut antwort = (status, Json(koerper)).into_response();
        if let Self::RateLimitUeberschritten { retry_after_secs } = self {
            if let Ok(wert) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                antwort.headers_mut().insert(header::RETRY_AFTER, wert);
            }
        }
        antwort
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::BenutzerNichtGefunden => {
                Self::NichtAuthentifiziert(MELDUNG_BENUTZER_UNBEKANNT.into())
            }
            AuthError::UngueltigeAnmeldedaten => {
                Self::NichtAuthentifiziert(MELDUNG_FALSCHE_ANMELDEDATEN.into())
            }
            AuthError::TokenUngueltig | AuthError::TokenAbgelaufen => {
                Self::NichtAuthentifiziert(MELDUNG_NICHT_AUTHENTIFIZIERT.into())
            }
            AuthError::PasswortRichtlinie(_) => {
                Self::UngueltigeAnfrage(MELDUNG_PASSWORT_RICHTLINIE.into())
            }
            AuthError::EmailVergeben(_) => Self::UngueltigeAnfrage(MELDUNG_EMAIL_VERGEBEN.into()),
            AuthError::UngueltigeEingabe(meldung) => Self::UngueltigeAnfrage(meldung),
            andere => Self::Intern(andere.to_string()),
        }
    }
}

impl From<SauceError> for ApiError {
    fn from(e: SauceError) -> Self {
        match e {
            SauceError::NichtGefunden(id) => Self::NichtGefunden(id),
            SauceError::KeineBerechtigung => Self::KeineBerechtigung,
            eingabe if eingabe.ist_eingabefehler() => Self::UngueltigeAnfrage(eingabe.to_string()),
            andere => Self::Intern(andere.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use piquante_core::CoreError;

    async fn koerper(antwort: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn statuscodes() {
        assert_eq!(
            ApiError::NichtAuthentifiziert("x".into()).http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::KeineBerechtigung.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NichtGefunden("x".into()).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::UngueltigeAnfrage("x".into()).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::RateLimitUeberschritten { retry_after_secs: 1 }.http_status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::Intern("x".into()).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn auth_fehler_nutzen_error_schluessel() {
        let antwort = ApiError::from(AuthError::UngueltigeAnmeldedaten).into_response();
        assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(koerper(antwort).await["error"], MELDUNG_FALSCHE_ANMELDEDATEN);
    }

    #[tokio::test]
    async fn eingabefehler_nutzen_message_schluessel() {
        let antwort = ApiError::from(AuthError::EmailVergeben("a@b.c".into())).into_response();
        assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);
        assert_eq!(koerper(antwort).await["message"], MELDUNG_EMAIL_VERGEBEN);
    }

    #[tokio::test]
    async fn interne_details_werden_nicht_ausgeliefert() {
        let antwort = ApiError::Intern("SQL kaputt".into()).into_response();
        let json = koerper(antwort).await;
        assert_eq!(json["error"], MELDUNG_INTERN);
        assert!(!json.to_string().contains("SQL"));
    }

    #[test]
    fn sauce_fehler_zuordnung() {
        assert!(matches!(
            ApiError::from(SauceError::KeineBerechtigung),
            ApiError::KeineBerechtigung
        ));
        assert!(matches!(
            ApiError::from(SauceError::NichtGefunden("x".into())),
            ApiError::NichtGefunden(_)
        ));
        assert!(matches!(
            ApiError::from(SauceError::UngueltigeStimme(CoreError::UngueltigeStimme(3))),
            ApiError::UngueltigeAnfrage(_)
        ));
    }

    #[test]
    fn rate_limit_setzt_retry_after() {
        let antwort = ApiError::RateLimitUeberschritten { retry_after_secs: 42 }.into_response();
        assert_eq!(antwort.headers()[header::RETRY_AFTER], "42");
    }
}
