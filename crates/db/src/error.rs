//! Fehlertypen fuer das Datenbank-Crate

use piquante_core::SauceId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Sauce {0} existiert nicht")]
    NichtGefunden(SauceId),

    #[error("E-Mail '{0}' ist bereits registriert")]
    EmailVergeben(String),

    /// Gespeicherter Wert laesst sich nicht zurueck in den Domaenentyp lesen
    #[error("Beschaedigter Datensatz in '{tabelle}': {grund}")]
    Beschaedigt { tabelle: &'static str, grund: String },

    #[error("Waehlerliste nicht lesbar: {0}")]
    Waehlerliste(#[from] serde_json::Error),

    #[error("SQLite-Fehler: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration fehlgeschlagen: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    pub(crate) fn beschaedigt(tabelle: &'static str, grund: impl Into<String>) -> Self {
        Self::Beschaedigt {
            tabelle,
            grund: grund.into(),
        }
    }

    /// Eine E-Mail-Adresse ist bereits vergeben
    pub fn ist_eindeutigkeit(&self) -> bool {
        match self {
            Self::EmailVergeben(_) => true,
            Self::Sqlx(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}
