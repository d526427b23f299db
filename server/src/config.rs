//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! Standardwerte, nur das Token-Geheimnis muss gesetzt werden (in der Datei
//! oder per `PIQUANTE_TOKEN_SECRET`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use piquante_api::{RateLimitKonfig, RestServerKonfig};
use piquante_db::DatabaseConfig;

pub const ENV_CONFIG: &str = "PIQUANTE_CONFIG";
pub const ENV_TOKEN_SECRET: &str = "PIQUANTE_TOKEN_SECRET";
pub const ENV_DATABASE_URL: &str = "PIQUANTE_DATABASE_URL";

/// Standardpfad der Konfigurationsdatei
pub const STANDARD_PFAD: &str = "config.toml";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerEinstellungen,
    pub datenbank: DatenbankEinstellungen,
    pub auth: AuthEinstellungen,
    pub bilder: BilderEinstellungen,
    pub rate_limit: RateLimitEinstellungen,
    pub cors: CorsEinstellungen,
    pub logging: LoggingEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Bind-Adresse der HTTP-Schnittstelle
    pub bind: String,
    /// Oeffentliche Basis-URL fuer Bild-Links (leer = aus dem Host-Header)
    pub oeffentliche_url: Option<String>,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".into(),
            oeffentliche_url: None,
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    pub url: String,
    pub max_verbindungen: u32,
    pub sqlite_wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_verbindungen: db.max_verbindungen,
            sqlite_wal: db.sqlite_wal,
        }
    }
}

/// Token- und Passwort-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// HMAC-Geheimnis fuer die Token-Signatur
    pub token_geheimnis: String,
    pub gueltigkeit_stunden: i64,
    /// Argon2 Speicherkosten in KiB
    pub argon2_speicher_kib: u32,
    pub argon2_iterationen: u32,
    pub argon2_parallelitaet: u32,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            token_geheimnis: String::new(),
            gueltigkeit_stunden: piquante_auth::STANDARD_GUELTIGKEIT_STUNDEN,
            argon2_speicher_kib: 19 * 1024,
            argon2_iterationen: 2,
            argon2_parallelitaet: 1,
        }
    }
}

/// Ablage hochgeladener Bilder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BilderEinstellungen {
    pub verzeichnis: PathBuf,
    /// Maximale Anfragegroesse in MiB
    pub max_upload_mb: usize,
}

impl Default for BilderEinstellungen {
    fn default() -> Self {
        Self {
            verzeichnis: PathBuf::from("images"),
            max_upload_mb: 10,
        }
    }
}

/// Rate Limit pro Client-IP auf `/api`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitEinstellungen {
    pub max_anfragen: u32,
    pub fenster_sekunden: u64,
    /// Client-IP aus `X-Forwarded-For` lesen (nur hinter einem Reverse Proxy)
    pub proxy_vertrauen: bool,
}

impl Default for RateLimitEinstellungen {
    fn default() -> Self {
        let standard = RateLimitKonfig::default();
        Self {
            max_anfragen: standard.max_anfragen,
            fenster_sekunden: standard.fenster.as_secs(),
            proxy_vertrauen: standard.proxy_vertrauen,
        }
    }
}

/// CORS-Einstellungen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsEinstellungen {
    /// Erlaubte Origins (leer = alle erlaubt)
    pub origins: Vec<String>,
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level oder Filter-Direktive, z.B. "info" oder "piquante_api=debug,info"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Herkunft der geladenen Konfiguration, wird nach dem Logging-Start gemeldet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quelle {
    Datei(String),
    /// Datei fehlt, alle Werte sind Standardwerte
    Standardwerte(String),
}

impl Quelle {
    /// Meldet die Herkunft ueber tracing. Erst nach `logging_initialisieren` aufrufen.
    pub fn protokollieren(&self) {
        match self {
            Self::Datei(pfad) => tracing::info!(pfad = %pfad, "Konfiguration geladen"),
            Self::Standardwerte(pfad) => tracing::warn!(
                pfad = %pfad,
                "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
            ),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<(Self, Quelle)> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config = toml::from_str(&inhalt)
                    .with_context(|| format!("Konfigurationsfehler in '{pfad}'"))?;
                Ok((config, Quelle::Datei(pfad.to_string())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok((Self::default(), Quelle::Standardwerte(pfad.to_string())))
            }
            Err(e) => Err(e).with_context(|| format!("Konfigurationsdatei '{pfad}' nicht lesbar")),
        }
    }

    /// Laedt Datei aus `PIQUANTE_CONFIG` und wendet Umgebungsvariablen an
    pub fn aus_umgebung() -> anyhow::Result<(Self, Quelle)> {
        let pfad = std::env::var(ENV_CONFIG).unwrap_or_else(|_| STANDARD_PFAD.into());
        let (mut config, quelle) = Self::laden(&pfad)?;
        config.umgebung_anwenden(|name| std::env::var(name).ok());
        Ok((config, quelle))
    }

    /// Ueberschreibt Werte aus Umgebungsvariablen
    pub fn umgebung_anwenden(&mut self, lesen: impl Fn(&str) -> Option<String>) {
        if let Some(geheimnis) = lesen(ENV_TOKEN_SECRET).filter(|s| !s.is_empty()) {
            self.auth.token_geheimnis = geheimnis;
        }
        if let Some(url) = lesen(ENV_DATABASE_URL).filter(|s| !s.is_empty()) {
            self.datenbank.url = url;
        }
    }

    /// Prueft die Werte, die nicht sinnvoll vorbelegt werden koennen
    pub fn validieren(&self) -> anyhow::Result<()> {
        if self.auth.token_geheimnis.trim().is_empty() {
            bail!("Kein Token-Geheimnis konfiguriert (auth.token_geheimnis oder {ENV_TOKEN_SECRET})");
        }
        if self.auth.gueltigkeit_stunden <= 0 {
            bail!("auth.gueltigkeit_stunden muss positiv sein");
        }
        if self.bilder.max_upload_mb == 0 {
            bail!("bilder.max_upload_mb muss groesser als 0 sein");
        }
        if self.rate_limit.max_anfragen == 0 {
            bail!("rate_limit.max_anfragen muss groesser als 0 sein");
        }
        if !piquante_observability::logging::log_level_gueltig(&self.logging.level) {
            bail!("Ungueltiger Log-Level '{}'", self.logging.level);
        }
        if !piquante_observability::logging::log_format_gueltig(&self.logging.format) {
            bail!("Unbekanntes Log-Format '{}'", self.logging.format);
        }
        self.bind_adresse()?;
        Ok(())
    }

    pub fn bind_adresse(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{}'", self.server.bind))
    }

    pub fn datenbank_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.sqlite_wal,
        }
    }

    pub fn token_gueltigkeit(&self) -> chrono::Duration {
        chrono::Duration::hours(self.auth.gueltigkeit_stunden)
    }

    pub fn rest_konfig(&self) -> anyhow::Result<RestServerKonfig> {
        Ok(RestServerKonfig {
            bind_addr: self.bind_adresse()?,
            cors_origins: self.cors.origins.clone(),
            rate_limit: RateLimitKonfig {
                max_anfragen: self.rate_limit.max_anfragen,
                fenster: Duration::from_secs(self.rate_limit.fenster_sekunden),
                proxy_vertrauen: self.rate_limit.proxy_vertrauen,
            },
            bilder_verzeichnis: self.bilder.verzeichnis.clone(),
            max_upload_bytes: self.bilder.max_upload_mb * 1024 * 1024,
        })
    }
}
