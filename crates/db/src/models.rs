//! Datenbankmodelle fuer Piquante
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank. `SauceRecord`
//! wird direkt als JSON ausgeliefert und traegt daher die Feldnamen des
//! Front-End-Vertrags (`_id`, `userId`, `mainPepper`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use piquante_core::{Bewertung, SauceId, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenutzerRecord {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Saucen
// ---------------------------------------------------------------------------

/// Sauce-Datensatz aus der Datenbank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SauceRecord {
    #[serde(rename = "_id")]
    pub id: SauceId,
    #[serde(rename = "userId")]
    pub owner_id: UserId,
    pub name: String,
    pub manufacturer: String,
    pub description: String,
    #[serde(rename = "mainPepper")]
    pub main_pepper: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub heat: i64,
    #[serde(flatten)]
    pub bewertung: Bewertung,
}

/// Daten zum Erstellen einer neuen Sauce
///
/// Zaehler und Waehlerlisten starten immer leer.
#[derive(Debug, Clone)]
pub struct NeueSauce<'a> {
    pub owner_id: UserId,
    pub name: &'a str,
    pub manufacturer: &'a str,
    pub description: &'a str,
    pub main_pepper: &'a str,
    pub image_url: &'a str,
    pub heat: i64,
}

/// Daten zum Aktualisieren einer Sauce (nur gesetzte Felder werden geaendert)
///
/// Besitzer und Abstimmungsdaten sind hier bewusst nicht enthalten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SauceUpdate {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub description: Option<String>,
    pub main_pepper: Option<String>,
    pub image_url: Option<String>,
    pub heat: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use piquante_core::Stimme;

    fn beispiel() -> SauceRecord {
        SauceRecord {
            id: SauceId::new(),
            owner_id: UserId::new(),
            name: "Piment d'Espelette".into(),
            manufacturer: "Maison Rouge".into(),
            description: "Fruchtig und mild".into(),
            main_pepper: "Gorria".into(),
            image_url: "http://localhost:3000/images/espelette1700000000000.png".into(),
            heat: 4,
            bewertung: Bewertung::neu(),
        }
    }

    #[test]
    fn sauce_json_feldnamen() {
        let mut sauce = beispiel();
        let user = UserId::new();
        sauce.bewertung.anwenden(user, Stimme::Like);

        let json = serde_json::to_value(&sauce).unwrap();
        assert_eq!(json["_id"], sauce.id.to_string());
        assert_eq!(json["userId"], sauce.owner_id.to_string());
        assert_eq!(json["mainPepper"], "Gorria");
        assert_eq!(json["imageUrl"], sauce.image_url);
        assert_eq!(json["heat"], 4);
        assert_eq!(json["likes"], 1);
        assert_eq!(json["usersLiked"][0], user.to_string());
    }

    #[test]
    fn sauce_json_roundtrip() {
        let sauce = beispiel();
        let json = serde_json::to_string(&sauce).unwrap();
        let zurueck: SauceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(sauce, zurueck);
    }

    #[test]
    fn passwort_hash_wird_nicht_serialisiert() {
        let user = BenutzerRecord {
            id: UserId::new(),
            email: "a@b.com".into(),
            password_hash: "$argon2id$geheim".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
