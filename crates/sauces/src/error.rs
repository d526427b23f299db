//! Fehlertypen fuer das Saucen-Crate

use thiserror::Error;

/// Saucen-Fehlertypen
#[derive(Debug, Error)]
pub enum SauceError {
    #[error("Sauce nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Keine Berechtigung: nur der Besitzer darf die Sauce aendern")]
    KeineBerechtigung,

    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    #[error("Bildtyp nicht unterstuetzt: {0}")]
    BildtypNichtUnterstuetzt(String),

    #[error("Ungueltige Stimme: {0}")]
    UngueltigeStimme(#[from] piquante_core::CoreError),

    #[error("Datenbank-Fehler: {0}")]
    DatenbankFehler(#[from] piquante_db::DbError),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

impl SauceError {
    /// `true` fuer Fehler, die auf eine fehlerhafte Anfrage zurueckgehen
    pub fn ist_eingabefehler(&self) -> bool {
        matches!(
            self,
            Self::UngueltigeEingabe(_) | Self::BildtypNichtUnterstuetzt(_) | Self::UngueltigeStimme(_)
        )
    }
}

pub type SauceResult<T> = Result<T, SauceError>;
