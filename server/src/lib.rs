//! piquante-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Datenbank, Dienste und REST-Server.

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};

use piquante_api::{AppState, RestServer};
use piquante_auth::{AccountService, PasswortHasher, TokenService};
use piquante_db::SqliteDb;
use piquante_observability::health::BoxFuture;
use piquante_observability::{DbPruefungFn, HealthState};
use piquante_sauces::{DiskStorage, SauceService};

use config::ServerConfig;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Baut den Axum-State aus der Konfiguration
    ///
    /// Oeffnet die Datenbank, fuehrt Migrationen aus und legt das
    /// Bildverzeichnis an.
    pub async fn state_aufbauen(&self) -> Result<(AppState, SqliteDb)> {
        let cfg = &self.config;

        let db = SqliteDb::oeffnen(&cfg.datenbank_config())
            .await
            .context("Datenbank konnte nicht geoeffnet werden")?;

        let speicher = DiskStorage::new(&cfg.bilder.verzeichnis);
        speicher
            .verzeichnis_anlegen()
            .await
            .context("Bildverzeichnis konnte nicht angelegt werden")?;

        let tokens = Arc::new(TokenService::neu(
            &cfg.auth.token_geheimnis,
            cfg.token_gueltigkeit(),
        )?);
        let hasher = PasswortHasher::neu(
            cfg.auth.argon2_speicher_kib,
            cfg.auth.argon2_iterationen,
            cfg.auth.argon2_parallelitaet,
        )?;

        let repo = Arc::new(db.clone());
        let konten = Arc::new(AccountService::neu(repo.clone(), hasher, tokens));
        let saucen = Arc::new(SauceService::neu(repo, Arc::new(speicher)));

        let state = AppState::neu(konten, saucen, cfg.server.oeffentliche_url.clone());
        Ok((state, db))
    }

    /// Startet den Server und laeuft bis zum Shutdown-Signal
    pub async fn starten(self) -> Result<()> {
        self.config.validieren()?;

        tracing::info!(
            bind = %self.config.server.bind,
            datenbank = %self.config.datenbank.url,
            bilder = %self.config.bilder.verzeichnis.display(),
            "Server startet"
        );

        let (state, db) = self.state_aufbauen().await?;

        let db_pruefung: DbPruefungFn = Arc::new(move || -> BoxFuture<'static, bool> {
            let db = db.clone();
            Box::pin(async move { db.erreichbar().await })
        });
        let health = HealthState::mit_db_pruefung(db_pruefung);

        RestServer::neu(self.config.rest_konfig()?)
            .starten(state, health)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn state_aus_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.auth.token_geheimnis = "geheim".into();
        config.auth.argon2_speicher_kib = 1024;
        config.auth.argon2_iterationen = 1;
        config.datenbank.url = format!("sqlite://{}", dir.path().join("test.db").display());
        config.bilder.verzeichnis = dir.path().join("bilder");

        let server = Server::neu(config);
        let (state, db) = server.state_aufbauen().await.unwrap();

        assert!(db.erreichbar().await);
        assert!(dir.path().join("bilder").is_dir());
        assert!(state.oeffentliche_url.is_none());
        assert!(state.saucen.alle().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn start_ohne_geheimnis_schlaegt_fehl() {
        let server = Server::neu(ServerConfig::default());
        assert!(server.starten().await.is_err());
    }
}
