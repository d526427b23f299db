//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Passwort erfuellt die Richtlinie nicht: {0}")]
    PasswortRichtlinie(String),

    // --- Anmeldung ---
    #[error("Benutzer nicht gefunden")]
    BenutzerNichtGefunden,

    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    // --- Registrierung ---
    #[error("E-Mail bereits registriert: {0}")]
    EmailVergeben(String),

    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    // --- Token ---
    #[error("Token ungueltig")]
    TokenUngueltig,

    #[error("Token abgelaufen")]
    TokenAbgelaufen,

    // --- Konfiguration ---
    #[error("Auth-Konfiguration ungueltig: {0}")]
    Konfiguration(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] piquante_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
