//! piquante-auth – Konten und Authentifizierung
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - die Passwort-Richtlinie fuer neue Konten
//! - signierte, zeitlich begrenzte Tokens (HS256)
//! - AccountService (Registrierung, Anmeldung)

pub mod error;
pub mod password;
pub mod policy;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use password::PasswortHasher;
pub use service::{AccountService, Anmeldung};
pub use token::{Claims, TokenService, STANDARD_GUELTIGKEIT_STUNDEN};
