//! Fehlertypen fuer piquante-core

use thiserror::Error;

/// Fehler beim Parsen von Domain-Werten
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Ungueltige Stimme: {0} (erlaubt sind 1, -1 und 0)")]
    UngueltigeStimme(i64),

    #[error("Ungueltige ID '{0}'")]
    UngueltigeId(String),
}
