//! piquante-sauces – Saucen, Abstimmungen und Bilder
//!
//! Dieses Crate implementiert:
//! - SauceService: Anlegen, Lesen, Bearbeiten, Loeschen, Abstimmen
//! - Besitzer-Pruefung fuer aendernde Operationen
//! - BildSpeicher-Trait + DiskStorage-Implementierung
//! - Namens- und URL-Regeln fuer hochgeladene Bilder
//!
//! # Beispiel
//!
//! ```no_run
//! use std::sync::Arc;
//! use piquante_sauces::{DiskStorage, SauceService};
//! use piquante_db::SqliteDb;
//!
//! #[tokio::main]
//! async fn main() {
//!     let db = Arc::new(SqliteDb::in_memory().await.unwrap());
//!     let bilder = Arc::new(DiskStorage::new("images"));
//!     let saucen = SauceService::neu(db, bilder);
//!     let alle = saucen.alle().await.unwrap();
//!     assert!(alle.is_empty());
//! }
//! ```

pub mod bild;
pub mod error;
pub mod service;
pub mod storage;
pub mod types;

#[cfg(test)]
mod tests;

// Bequeme Re-Exporte
pub use error::{SauceError, SauceResult};
pub use service::{eigentuemer_pruefen, SauceService};
pub use storage::{BildSpeicher, DiskStorage};
pub use types::{BildUpload, NeueSauceFelder, SauceFelder};
