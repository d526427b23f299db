//! Passwort-Richtlinie
//!
//! Wird vor dem Hashing geprueft: 8 bis 100 Zeichen, mindestens ein
//! Grossbuchstabe, ein Kleinbuchstabe und eine Ziffer, keine Leerzeichen.

use crate::error::{AuthError, AuthResult};

pub const MIN_LAENGE: usize = 8;
pub const MAX_LAENGE: usize = 100;

/// Prueft ein Klartext-Passwort gegen die Richtlinie
pub fn pruefen(passwort: &str) -> AuthResult<()> {
    let laenge = passwort.chars().count();

    let verstoss = if laenge < MIN_LAENGE {
        Some("zu kurz")
    } else if laenge > MAX_LAENGE {
        Some("zu lang")
    } else if !passwort.chars().any(char::is_uppercase) {
        Some("Grossbuchstabe fehlt")
    } else if !passwort.chars().any(char::is_lowercase) {
        Some("Kleinbuchstabe fehlt")
    } else if !passwort.chars().any(|c| c.is_ascii_digit()) {
        Some("Ziffer fehlt")
    } else if passwort.chars().any(char::is_whitespace) {
        Some("enthaelt Leerzeichen")
    } else {
        None
    };

    match verstoss {
        Some(grund) => Err(AuthError::PasswortRichtlinie(grund.into())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gueltige_passwoerter() {
        assert!(pruefen("Abcdefg1").is_ok());
        assert!(pruefen("SehrSicher2024").is_ok());
        assert!(pruefen(&format!("Aa1{}", "x".repeat(97))).is_ok());
    }

    #[test]
    fn laengengrenzen() {
        assert!(pruefen("Abcdef1").is_err());
        assert!(pruefen(&format!("Aa1{}", "x".repeat(98))).is_err());
    }

    #[test]
    fn zeichenklassen_pflicht() {
        assert!(pruefen("abcdefg1").is_err(), "ohne Grossbuchstabe");
        assert!(pruefen("ABCDEFG1").is_err(), "ohne Kleinbuchstabe");
        assert!(pruefen("Abcdefgh").is_err(), "ohne Ziffer");
    }

    #[test]
    fn leerzeichen_verboten() {
        let ergebnis = pruefen("Abc defg1");
        assert!(matches!(ergebnis, Err(AuthError::PasswortRichtlinie(_))));
    }
}
