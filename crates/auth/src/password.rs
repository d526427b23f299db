//! Passwort-Hashing mit Argon2id
//!
//! Der gespeicherte Wert ist immer ein PHC-String (Algorithmus, Parameter,
//! Salt und Hash). Das Klartext-Passwort verlaesst diesen Modul nie.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Argon2id-Hasher mit festen Kostenparametern
#[derive(Clone)]
pub struct PasswortHasher {
    argon2: Argon2<'static>,
}

impl PasswortHasher {
    /// Erstellt einen Hasher mit eigenen Kostenparametern
    ///
    /// `speicher_kib` ist der Speicherbedarf in KiB, `iterationen` die Anzahl
    /// der Durchlaeufe.
    pub fn neu(speicher_kib: u32, iterationen: u32, parallelitaet: u32) -> AuthResult<Self> {
        let params = Params::new(speicher_kib, iterationen, parallelitaet, None)
            .map_err(|e| AuthError::Konfiguration(format!("Argon2-Parameter ungueltig: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hasht ein Passwort mit einem zufaelligen Salt
    pub fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))
    }

    /// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
    ///
    /// Die Parameter werden aus dem Hash gelesen, aeltere Hashes mit anderen
    /// Kosten bleiben damit gueltig.
    pub fn verifizieren(&self, passwort: &str, hash: &str) -> AuthResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

        match self.argon2.verify_password(passwort.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
        }
    }
}

impl Default for PasswortHasher {
    /// OWASP-Empfehlung: 19 MiB, 2 Iterationen, 1 Thread
    fn default() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }
}

impl std::fmt::Debug for PasswortHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswortHasher").finish_non_exhaustive()
    }
}
