//! Speicher fuer Saucen-Bilder
//!
//! Das `BildSpeicher`-Trait abstrahiert den konkreten Speicher, `DiskStorage`
//! legt die Dateien flach in einem Verzeichnis ab, das auch statisch
//! ausgeliefert wird.

use std::path::{Path, PathBuf};

use crate::bild::ist_sicherer_name;
use crate::error::{SauceError, SauceResult};

/// Abstrakter Bildspeicher
#[allow(async_fn_in_trait)]
pub trait BildSpeicher: Send + Sync {
    /// Bild unter dem angegebenen Namen speichern
    async fn store(&self, name: &str, data: &[u8]) -> SauceResult<()>;

    /// Bild loeschen. Ein bereits fehlendes Bild ist kein Fehler.
    async fn delete(&self, name: &str) -> SauceResult<()>;
}

/// Disk-basierter Bildspeicher
///
/// Speichert Dateien unter `base_dir/<name>`.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    base_dir: PathBuf,
}

impl DiskStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Basisverzeichnis (wird unter `/images` ausgeliefert)
    pub fn verzeichnis(&self) -> &Path {
        &self.base_dir
    }

    /// Legt das Basisverzeichnis an falls es fehlt
    pub async fn verzeichnis_anlegen(&self) -> SauceResult<()> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }

    fn full_path(&self, name: &str) -> SauceResult<PathBuf> {
        if !ist_sicherer_name(name) {
            return Err(SauceError::UngueltigeEingabe(format!(
                "Ungueltiger Dateiname: {name}"
            )));
        }
        Ok(self.base_dir.join(name))
    }
}

impl BildSpeicher for DiskStorage {
    async fn store(&self, name: &str, data: &[u8]) -> SauceResult<()> {
        let full = self.full_path(name)?;

        tokio::fs::create_dir_all(&self.base_dir).await?;
        tokio::fs::write(&full, data).await?;
        tracing::debug!(path = %full.display(), bytes = data.len(), "Bild gespeichert");
        Ok(())
    }

    async fn delete(&self, name: &str) -> SauceResult<()> {
        let full = self.full_path(name)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => {
                tracing::debug!(path = %full.display(), "Bild geloescht");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
