//! SauceService – Anlegen, Lesen, Bearbeiten, Loeschen und Abstimmen
//!
//! Aendernde Operationen pruefen zuerst, ob die Sauce existiert, und danach,
//! ob der Aufrufer ihr Besitzer ist. Bilder werden erst nach beiden Pruefungen
//! gespeichert.

use std::sync::Arc;

use chrono::Utc;

use piquante_core::{SauceId, Stimme, Uebergang, UserId};
use piquante_db::{
    models::{NeueSauce, SauceRecord},
    DbError, SauceRepository,
};

use crate::{
    bild,
    error::{SauceError, SauceResult},
    storage::BildSpeicher,
    types::{BildUpload, SauceFelder},
};

/// Erlaubt die Aenderung nur dem Besitzer der Sauce
pub fn eigentuemer_pruefen(sauce: &SauceRecord, aufrufer: UserId) -> SauceResult<()> {
    if sauce.owner_id == aufrufer {
        Ok(())
    } else {
        Err(SauceError::KeineBerechtigung)
    }
}

/// Verwaltet Saucen und ihre Bilder
pub struct SauceService<R, S>
where
    R: SauceRepository,
    S: BildSpeicher,
{
    repo: Arc<R>,
    speicher: Arc<S>,
}

impl<R, S> SauceService<R, S>
where
    R: SauceRepository,
    S: BildSpeicher,
{
    pub fn neu(repo: Arc<R>, speicher: Arc<S>) -> Self {
        Self { repo, speicher }
    }

    /// Legt eine Sauce an
    ///
    /// `basis_url` ist die oeffentliche Adresse des Servers, unter der
    /// `/images` erreichbar ist.
    pub async fn erstellen(
        &self,
        besitzer: UserId,
        felder: SauceFelder,
        bild: Option<BildUpload>,
        basis_url: &str,
    ) -> SauceResult<SauceRecord> {
        let felder = felder.fuer_neue_sauce()?;
        let bild = bild.ok_or_else(|| SauceError::UngueltigeEingabe("Bild fehlt".into()))?;

        let dateiname = self.bild_speichern(&bild).await?;
        let image_url = bild::bild_url(basis_url, &dateiname);

        let ergebnis = self
            .repo
            .create(NeueSauce {
                owner_id: besitzer,
                name: &felder.name,
                manufacturer: &felder.manufacturer,
                description: &felder.description,
                main_pepper: &felder.main_pepper,
                image_url: &image_url,
                heat: felder.heat,
            })
            .await;

        match ergebnis {
            Ok(sauce) => {
                tracing::info!(sauce_id = %sauce.id, owner = %besitzer, "Sauce erstellt");
                Ok(sauce)
            }
            Err(e) => {
                tracing::error!(%e, "Sauce konnte nicht gespeichert werden, entferne Bild");
                self.bild_entfernen(&dateiname).await;
                Err(e.into())
            }
        }
    }

    /// Eine Sauce laden
    pub async fn laden(&self, id: SauceId) -> SauceResult<SauceRecord> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| SauceError::NichtGefunden(id.to_string()))
    }

    /// Alle Saucen in Anlage-Reihenfolge
    pub async fn alle(&self) -> SauceResult<Vec<SauceRecord>> {
        Ok(self.repo.list().await?)
    }

    /// Bearbeitet eine Sauce (nur Besitzer)
    ///
    /// Mit neuem Bild wird das bisherige Bild entfernt, bevor der Datensatz
    /// geschrieben wird.
    pub async fn bearbeiten(
        &self,
        id: SauceId,
        aufrufer: UserId,
        felder: SauceFelder,
        bild: Option<BildUpload>,
        basis_url: &str,
    ) -> SauceResult<SauceRecord> {
        let bestehend = self.laden(id).await?;
        eigentuemer_pruefen(&bestehend, aufrufer)?;

        let mut update = felder.fuer_update()?;

        let neues_bild = match bild {
            Some(bild) => {
                let dateiname = self.bild_speichern(&bild).await?;
                update.image_url = Some(bild::bild_url(basis_url, &dateiname));
                self.altes_bild_entfernen(&bestehend.image_url).await;
                Some(dateiname)
            }
            None => None,
        };

        match self.repo.update(id, update).await {
            Ok(sauce) => {
                tracing::info!(sauce_id = %id, neues_bild = neues_bild.is_some(), "Sauce bearbeitet");
                Ok(sauce)
            }
            Err(e) => {
                if let Some(dateiname) = neues_bild {
                    self.bild_entfernen(&dateiname).await;
                }
                // Zwischen Pruefung und Update geloescht
                Err(match e {
                    DbError::NichtGefunden(id) => SauceError::NichtGefunden(id.to_string()),
                    andere => andere.into(),
                })
            }
        }
    }

    /// Loescht eine Sauce samt Bild (nur Besitzer)
    pub async fn loeschen(&self, id: SauceId, aufrufer: UserId) -> SauceResult<()> {
        let bestehend = self.laden(id).await?;
        eigentuemer_pruefen(&bestehend, aufrufer)?;

        self.altes_bild_entfernen(&bestehend.image_url).await;

        if !self.repo.delete(id).await? {
            return Err(SauceError::NichtGefunden(id.to_string()));
        }

        tracing::info!(sauce_id = %id, "Sauce geloescht");
        Ok(())
    }

    /// Gibt eine Stimme ab
    ///
    /// `wert` ist 1 (Like), -1 (Dislike) oder 0 (zurueckziehen).
    pub async fn abstimmen(
        &self,
        id: SauceId,
        waehler: UserId,
        wert: i64,
    ) -> SauceResult<(SauceRecord, Uebergang)> {
        let stimme = Stimme::try_from(wert)?;

        self.repo
            .abstimmen(id, waehler, stimme)
            .await?
            .ok_or_else(|| SauceError::NichtGefunden(id.to_string()))
    }

    async fn bild_speichern(&self, bild: &BildUpload) -> SauceResult<String> {
        let dateiname = bild::dateiname_bauen(
            &bild.original_name,
            &bild.mime_type,
            Utc::now().timestamp_millis(),
        )?;
        self.speicher.store(&dateiname, &bild.data).await?;
        Ok(dateiname)
    }

    async fn altes_bild_entfernen(&self, image_url: &str) {
        match bild::dateiname_aus_url(image_url) {
            Some(dateiname) => self.bild_entfernen(dateiname).await,
            None => {
                tracing::warn!(url = %image_url, "Bild-URL ohne Dateinamen, nichts zu loeschen")
            }
        }
    }

    async fn bild_entfernen(&self, dateiname: &str) {
        if let Err(e) = self.speicher.delete(dateiname).await {
            tracing::warn!(%e, datei = %dateiname, "Bild konnte nicht geloescht werden");
        }
    }
}
