//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `PQ_LOG_LEVEL`: Log-Level oder Filter-Direktive, Standard aus der Konfiguration
//! - `PQ_LOG_FORMAT`: Format (text/json), Standard aus der Konfiguration

use anyhow::{anyhow, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG_LEVEL: &str = "PQ_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "PQ_LOG_FORMAT";

/// Initialisiert das Logging-System.
///
/// `PQ_LOG_LEVEL` und `PQ_LOG_FORMAT` haben Vorrang vor den uebergebenen
/// Werten. Ein ungueltiger Filter faellt auf `info` zurueck.
pub fn logging_initialisieren(level: &str, format: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env(ENV_LOG_LEVEL)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let aus_env = std::env::var(ENV_LOG_FORMAT).ok();
    let format = effektives_format(aus_env.as_deref(), format);

    let ergebnis = match format {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .try_init(),
        _ => fmt().with_env_filter(filter).with_target(true).try_init(),
    };

    ergebnis.map_err(|e| anyhow!("Logging konnte nicht initialisiert werden: {e}"))
}

/// Waehlt das Log-Format: Umgebung vor Konfiguration, unbekannte Werte werden zu `text`.
pub fn effektives_format<'a>(aus_env: Option<&'a str>, konfiguriert: &'a str) -> &'a str {
    let gewaehlt = aus_env.unwrap_or(konfiguriert);
    if log_format_gueltig(gewaehlt) {
        gewaehlt
    } else {
        "text"
    }
}

/// Validiert einen Log-Level oder eine Filter-Direktive wie `piquante_api=debug,info`.
///
/// Jede Direktive braucht eine Stufe, reine Target-Namen werden abgelehnt.
pub fn log_level_gueltig(level: &str) -> bool {
    let mut direktiven = level.split(',').map(str::trim).filter(|d| !d.is_empty()).peekable();
    if direktiven.peek().is_none() {
        return false;
    }
    let stufen_ok = direktiven.all(|direktive| {
        let stufe = direktive.rsplit_once('=').map_or(direktive, |(_, s)| s);
        stufe.parse::<LevelFilter>().is_ok()
    });
    stufen_ok && EnvFilter::try_new(level).is_ok()
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}
