//! piquante-core – Gemeinsame Typen und Abstimmungslogik
//!
//! Dieses Crate stellt die fundamentalen Bausteine bereit, die von allen
//! anderen Piquante-Crates gemeinsam genutzt werden:
//! - ID-Newtypes fuer Benutzer und Saucen
//! - die Like/Dislike-Zustandsmaschine ([`vote`])

pub mod error;
pub mod types;
pub mod vote;

// Re-Exporte fuer bequemen Zugriff
pub use error::CoreError;
pub use types::{SauceId, UserId};
pub use vote::{Bewertung, Stimme, Uebergang, VoteZustand};
