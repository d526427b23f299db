//! Eingabetypen fuer den Saucen-Service

use serde::Deserialize;

use piquante_db::models::SauceUpdate;

use crate::error::{SauceError, SauceResult};

/// Beschreibende Felder einer Sauce, wie sie der Client sendet
///
/// Unbekannte Felder (`_id`, `userId`, `likes`, `usersLiked`, ...) werden
/// beim Deserialisieren verworfen. Besitzer und Abstimmung setzt nur der Server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SauceFelder {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub description: Option<String>,
    pub main_pepper: Option<String>,
    pub heat: Option<i64>,
}

/// Vollstaendig validierte Felder fuer eine neue Sauce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeueSauceFelder {
    pub name: String,
    pub manufacturer: String,
    pub description: String,
    pub main_pepper: String,
    pub heat: i64,
}

impl SauceFelder {
    /// Alle Felder sind Pflicht und duerfen nicht leer sein
    pub fn fuer_neue_sauce(self) -> SauceResult<NeueSauceFelder> {
        Ok(NeueSauceFelder {
            name: pflichtfeld(self.name, "name")?,
            manufacturer: pflichtfeld(self.manufacturer, "manufacturer")?,
            description: pflichtfeld(self.description, "description")?,
            main_pepper: pflichtfeld(self.main_pepper, "mainPepper")?,
            heat: self
                .heat
                .ok_or_else(|| SauceError::UngueltigeEingabe("Feld 'heat' fehlt".into()))?,
        })
    }

    /// Gesetzte Felder werden uebernommen, gesetzte Texte duerfen nicht leer sein
    pub fn fuer_update(self) -> SauceResult<SauceUpdate> {
        Ok(SauceUpdate {
            name: optionalfeld(self.name, "name")?,
            manufacturer: optionalfeld(self.manufacturer, "manufacturer")?,
            description: optionalfeld(self.description, "description")?,
            main_pepper: optionalfeld(self.main_pepper, "mainPepper")?,
            image_url: None,
            heat: self.heat,
        })
    }
}

fn pflichtfeld(wert: Option<String>, feld: &str) -> SauceResult<String> {
    optionalfeld(wert, feld)?
        .ok_or_else(|| SauceError::UngueltigeEingabe(format!("Feld '{feld}' fehlt")))
}

fn optionalfeld(wert: Option<String>, feld: &str) -> SauceResult<Option<String>> {
    match wert {
        Some(v) if v.trim().is_empty() => Err(SauceError::UngueltigeEingabe(format!(
            "Feld '{feld}' darf nicht leer sein"
        ))),
        andere => Ok(andere),
    }
}

/// Ein hochgeladenes Bild
#[derive(Debug, Clone)]
pub struct BildUpload {
    /// Dateiname wie vom Client gesendet
    pub original_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}
