//! Integration-Tests fuer UserRepository (In-Memory SQLite)

use piquante_core::UserId;
use piquante_db::{models::NeuerBenutzer, SqliteDb, UserRepository};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

#[tokio::test]
async fn benutzer_erstellen_und_laden() {
    let db = db().await;

    let user = UserRepository::create(
        &db,
        NeuerBenutzer {
            email: "alice@example.com",
            password_hash: "hash_alice",
        },
    )
    .await
    .expect("Benutzer erstellen fehlgeschlagen");

    assert_eq!(user.email, "alice@example.com");

    let geladen = UserRepository::get_by_id(&db, user.id)
        .await
        .expect("get_by_id fehlgeschlagen")
        .expect("Benutzer sollte gefunden werden");

    assert_eq!(geladen.id, user.id);
    assert_eq!(geladen.email, "alice@example.com");
    assert_eq!(geladen.password_hash, "hash_alice");
}

#[tokio::test]
async fn benutzer_nach_email_laden() {
    let db = db().await;

    UserRepository::create(
        &db,
        NeuerBenutzer {
            email: "bob@example.com",
            password_hash: "hash_bob",
        },
    )
    .await
    .unwrap();

    let gefunden = UserRepository::get_by_email(&db, "bob@example.com")
        .await
        .unwrap()
        .expect("Benutzer 'bob' sollte gefunden werden");
    assert_eq!(gefunden.email, "bob@example.com");

    let nicht_gefunden = UserRepository::get_by_email(&db, "unbekannt@example.com")
        .await
        .unwrap();
    assert!(nicht_gefunden.is_none());
}

#[tokio::test]
async fn unbekannte_id_liefert_none() {
    let db = db().await;
    let ergebnis = UserRepository::get_by_id(&db, UserId::new()).await.unwrap();
    assert!(ergebnis.is_none());
}

#[tokio::test]
async fn email_ist_eindeutig() {
    let db = db().await;

    UserRepository::create(
        &db,
        NeuerBenutzer {
            email: "charlie@example.com",
            password_hash: "hash1",
        },
    )
    .await
    .unwrap();

    let err = UserRepository::create(
        &db,
        NeuerBenutzer {
            email: "charlie@example.com",
            password_hash: "hash2",
        },
    )
    .await;

    assert!(err.is_err());
    assert!(err.unwrap_err().ist_eindeutigkeit());
}
