//! Piquante Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use piquante_observability::logging_initialisieren;
use piquante_server::{config::ServerConfig, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let (config, quelle) = ServerConfig::aus_umgebung()?;

    logging_initialisieren(&config.logging.level, &config.logging.format)?;
    quelle.protokollieren();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Piquante Server wird initialisiert"
    );

    Server::neu(config).starten().await
}
