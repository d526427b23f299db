//! piquante-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit. Die Geschaeftslogik
//! arbeitet gegen [`UserRepository`] und [`SauceRepository`]; die konkrete
//! Implementierung ist [`SqliteDb`].

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use repository::{DatabaseConfig, DbResult, SauceRepository, UserRepository};
pub use sqlite::SqliteDb;
