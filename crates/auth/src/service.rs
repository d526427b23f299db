//! Konto-Service fuer Piquante
//!
//! Registrierung und Anmeldung. Nutzt das UserRepository, den Argon2id-Hasher
//! und den TokenService.

use std::sync::Arc;

use serde::Serialize;

use piquante_core::UserId;
use piquante_db::{
    models::{BenutzerRecord, NeuerBenutzer},
    repository::UserRepository,
};

use crate::{
    error::{AuthError, AuthResult},
    password::PasswortHasher,
    policy,
    token::TokenService,
};

/// Ergebnis einer erfolgreichen Anmeldung
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anmeldung {
    pub user_id: UserId,
    pub token: String,
}

/// Zentraler Einstiegspunkt fuer Registrierung und Anmeldung
pub struct AccountService<U: UserRepository> {
    user_repo: Arc<U>,
    hasher: PasswortHasher,
    tokens: Arc<TokenService>,
}

impl<U: UserRepository> AccountService<U> {
    pub fn neu(user_repo: Arc<U>, hasher: PasswortHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
        }
    }

    /// Registriert einen neuen Benutzer
    ///
    /// Die Passwort-Richtlinie wird vor dem Hashing geprueft. Eine bereits
    /// registrierte E-Mail fuehrt zu `AuthError::EmailVergeben`.
    pub async fn registrieren(&self, email: &str, passwort: &str) -> AuthResult<BenutzerRecord> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::UngueltigeEingabe("E-Mail fehlt".into()));
        }
        policy::pruefen(passwort)?;

        if self.user_repo.get_by_email(email).await?.is_some() {
            return Err(AuthError::EmailVergeben(email.to_string()));
        }

        let passwort_hash = self.hasher.hashen(passwort)?;

        let benutzer = self
            .user_repo
            .create(NeuerBenutzer {
                email,
                password_hash: &passwort_hash,
            })
            .await
            .map_err(|e| {
                // Paralleler Insert mit derselben E-Mail
                if e.ist_eindeutigkeit() {
                    AuthError::EmailVergeben(email.to_string())
                } else {
                    AuthError::Datenbank(e)
                }
            })?;

        tracing::info!(user_id = %benutzer.id, "Neuer Benutzer registriert");

        Ok(benutzer)
    }

    /// Meldet einen Benutzer an und stellt ein Token aus
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<Anmeldung> {
        let benutzer = self
            .user_repo
            .get_by_email(email.trim())
            .await?
            .ok_or(AuthError::BenutzerNichtGefunden)?;

        let korrekt = self.hasher.verifizieren(passwort, &benutzer.password_hash)?;
        if !korrekt {
            tracing::warn!(user_id = %benutzer.id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let token = self.tokens.ausstellen(benutzer.id)?;

        tracing::info!(user_id = %benutzer.id, "Benutzer angemeldet");

        Ok(Anmeldung {
            user_id: benutzer.id,
            token,
        })
    }

    /// Validiert ein Token und gibt die Identitaet zurueck
    pub fn token_pruefen(&self, token: &str) -> AuthResult<UserId> {
        self.tokens.pruefen(token).map(|claims| claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::{Duration, Utc};
    use piquante_db::DbError;

    // Minimaler In-Memory UserRepository fuer Tests
    #[derive(Default)]
    struct TestUserRepo {
        benutzer: Mutex<Vec<BenutzerRecord>>,
    }

    impl UserRepository for TestUserRepo {
        async fn create(&self, data: NeuerBenutzer<'_>) -> piquante_db::DbResult<BenutzerRecord> {
            let mut benutzer = self.benutzer.lock().unwrap();
            if benutzer.iter().any(|u| u.email == data.email) {
                return Err(DbError::EmailVergeben(data.email.to_string()));
            }
            let record = BenutzerRecord {
                id: UserId::new(),
                email: data.email.to_string(),
                password_hash: data.password_hash.to_string(),
                created_at: Utc::now(),
            };
            benutzer.push(record.clone());
            Ok(record)
        }

        async fn get_by_id(&self, id: UserId) -> piquante_db::DbResult<Option<BenutzerRecord>> {
            Ok(self.benutzer.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn get_by_email(&self, email: &str) -> piquante_db::DbResult<Option<BenutzerRecord>> {
            Ok(self
                .benutzer
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }
    }

    fn test_service() -> (AccountService<TestUserRepo>, Arc<TestUserRepo>) {
        let repo = Arc::new(TestUserRepo::default());
        let tokens = Arc::new(TokenService::neu("geheim", Duration::hours(24)).unwrap());
        let hasher = PasswortHasher::neu(1024, 1, 1).unwrap();
        (AccountService::neu(repo.clone(), hasher, tokens), repo)
    }

    #[tokio::test]
    async fn registrieren_und_anmelden() {
        let (service, _) = test_service();

        let user = service
            .registrieren("test@example.com", "Sicher123")
            .await
            .expect("Registrierung fehlgeschlagen");
        assert_eq!(user.email, "test@example.com");

        let anmeldung = service
            .anmelden("test@example.com", "Sicher123")
            .await
            .expect("Anmeldung fehlgeschlagen");

        assert_eq!(anmeldung.user_id, user.id);
        assert_eq!(service.token_pruefen(&anmeldung.token).unwrap(), user.id);
    }

    #[tokio::test]
    async fn klartext_wird_nicht_gespeichert() {
        let (service, repo) = test_service();
        service
            .registrieren("plain@example.com", "Klartext123")
            .await
            .unwrap();

        let benutzer = repo.benutzer.lock().unwrap();
        assert_eq!(benutzer.len(), 1);
        assert!(!benutzer[0].password_hash.contains("Klartext123"));
        assert!(benutzer[0].password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn doppelte_registrierung_schlaegt_fehl() {
        let (service, repo) = test_service();
        service
            .registrieren("dup@example.com", "Passwort1")
            .await
            .unwrap();
        let ergebnis = service.registrieren("dup@example.com", "Anderes12").await;
        assert!(matches!(ergebnis, Err(AuthError::EmailVergeben(_))));
        assert_eq!(repo.benutzer.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn schwaches_passwort_wird_abgelehnt() {
        let (service, repo) = test_service();
        let ergebnis = service.registrieren("weak@example.com", "schwach").await;
        assert!(matches!(ergebnis, Err(AuthError::PasswortRichtlinie(_))));
        assert!(repo.benutzer.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn falsches_passwort_abgelehnt() {
        let (service, _) = test_service();
        service
            .registrieren("user@example.com", "Richtig123")
            .await
            .unwrap();
        let ergebnis = service.anmelden("user@example.com", "Falsch1234").await;
        assert!(matches!(ergebnis, Err(AuthError::UngueltigeAnmeldedaten)));
    }

    #[tokio::test]
    async fn unbekannte_email_abgelehnt() {
        let (service, _) = test_service();
        let ergebnis = service.anmelden("niemand@example.com", "Egal12345").await;
        assert!(matches!(ergebnis, Err(AuthError::BenutzerNichtGefunden)));
    }
}
