//! Gemeinsame Identifikationstypen fuer Piquante
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Benutzer- und Sauce-IDs zur Compilezeit auszuschliessen. Auf dem Draht
//! (JSON, JWT-Claims) erscheinen sie als nackte UUID-Strings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Eindeutige Benutzer-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Erstellt eine neue zufaellige UserId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| CoreError::UngueltigeId(s.to_string()))
    }
}

/// Eindeutige Sauce-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SauceId(pub Uuid);

impl SauceId {
    /// Erstellt eine neue zufaellige SauceId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SauceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SauceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SauceId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| CoreError::UngueltigeId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_eindeutig() {
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(a, b, "Zwei neue UserIds muessen verschieden sein");
    }

    #[test]
    fn sauce_id_aus_string() {
        let id = SauceId::new();
        let geparst: SauceId = id.to_string().parse().unwrap();
        assert_eq!(id, geparst);
    }

    #[test]
    fn ungueltige_id_wird_abgelehnt() {
        let ergebnis = "keine-uuid".parse::<SauceId>();
        assert_eq!(ergebnis, Err(CoreError::UngueltigeId("keine-uuid".into())));
    }

    #[test]
    fn ids_serialisieren_als_nackte_uuid() {
        let uid = UserId(Uuid::nil());
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
        let zurueck: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(uid, zurueck);
    }
}
