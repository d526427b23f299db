//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Die Dienste in `piquante-auth` und
//! `piquante-sauces` sind generisch ueber diese Traits, Tests koennen eigene
//! In-Memory-Implementierungen einsetzen.

use piquante_core::{SauceId, Stimme, Uebergang, UserId};

use crate::error::DbError;
use crate::models::{BenutzerRecord, NeueSauce, NeuerBenutzer, SauceRecord, SauceUpdate};

/// Result-Alias fuer alle Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://piquante.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://piquante.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzerkonten
#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync {
    /// Legt einen neuen Benutzer an.
    ///
    /// Gibt `DbError::EmailVergeben` zurueck wenn die E-Mail bereits existiert.
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Einen Benutzer anhand seiner ID laden
    async fn get_by_id(&self, id: UserId) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer anhand seiner E-Mail laden
    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;
}

/// Repository fuer Saucen
#[allow(async_fn_in_trait)]
pub trait SauceRepository: Send + Sync {
    /// Legt eine neue Sauce mit leerer Bewertung an
    async fn create(&self, data: NeueSauce<'_>) -> DbResult<SauceRecord>;

    /// Eine Sauce anhand ihrer ID laden
    async fn get_by_id(&self, id: SauceId) -> DbResult<Option<SauceRecord>>;

    /// Alle Saucen in Anlage-Reihenfolge
    async fn list(&self) -> DbResult<Vec<SauceRecord>>;

    /// Aktualisiert die gesetzten Felder.
    ///
    /// Gibt `DbError::NichtGefunden` zurueck wenn die Sauce nicht existiert.
    async fn update(&self, id: SauceId, data: SauceUpdate) -> DbResult<SauceRecord>;

    /// Loescht eine Sauce. `false` wenn sie nicht existierte.
    async fn delete(&self, id: SauceId) -> DbResult<bool>;

    /// Wendet eine Stimme atomar an (Lesen, Uebergang, Schreiben).
    ///
    /// Gibt `None` zurueck wenn die Sauce nicht existiert.
    async fn abstimmen(
        &self,
        id: SauceId,
        user: UserId,
        stimme: Stimme,
    ) -> DbResult<Option<(SauceRecord, Uebergang)>>;
}
