//! Signierte, zeitlich begrenzte Tokens (HS256 JWT)
//!
//! Claims: `{ "userId", "iat", "exp" }`. Die Gueltigkeit wird beim Ausstellen
//! festgelegt, beim Pruefen wird die Ablaufzeit ohne Toleranz erzwungen.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use piquante_core::UserId;

use crate::error::{AuthError, AuthResult};

/// Standard-Gueltigkeit eines Tokens in Stunden
pub const STANDARD_GUELTIGKEIT_STUNDEN: i64 = 24;

/// Inhalt eines Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: UserId,
    /// Ausstellungszeit (Unix-Sekunden)
    pub iat: i64,
    /// Ablaufzeit (Unix-Sekunden)
    pub exp: i64,
}

/// Stellt Tokens aus und prueft sie
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    gueltigkeit: Duration,
}

impl TokenService {
    /// Erstellt den Service mit dem geheimen Schluessel
    ///
    /// Ein leeres Geheimnis ist ein Konfigurationsfehler.
    pub fn neu(geheimnis: &str, gueltigkeit: Duration) -> AuthResult<Self> {
        if geheimnis.trim().is_empty() {
            return Err(AuthError::Konfiguration(
                "Token-Geheimnis darf nicht leer sein".into(),
            ));
        }
        if gueltigkeit <= Duration::zero() {
            return Err(AuthError::Konfiguration(
                "Token-Gueltigkeit muss positiv sein".into(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(geheimnis.as_bytes()),
            decoding: DecodingKey::from_secret(geheimnis.as_bytes()),
            validation,
            gueltigkeit,
        })
    }

    /// Stellt ein Token fuer den Benutzer aus, gueltig ab jetzt
    pub fn ausstellen(&self, user_id: UserId) -> AuthResult<String> {
        self.ausstellen_zum(user_id, Utc::now())
    }

    /// Stellt ein Token mit explizitem Ausstellungszeitpunkt aus
    pub fn ausstellen_zum(&self, user_id: UserId, jetzt: DateTime<Utc>) -> AuthResult<String> {
        let claims = Claims {
            user_id,
            iat: jetzt.timestamp(),
            exp: (jetzt + self.gueltigkeit).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::intern(format!("Token konnte nicht signiert werden: {e}")))
    }

    /// Prueft Signatur und Ablaufzeit und gibt die Claims zurueck
    pub fn pruefen(&self, token: &str) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|daten| daten.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenAbgelaufen,
                _ => {
                    tracing::debug!(fehler = %e, "Token abgelehnt");
                    AuthError::TokenUngueltig
                }
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("gueltigkeit", &self.gueltigkeit)
            .finish_non_exhaustive()
    }
}
