//! Tests fuer den SauceService (In-Memory SQLite + DiskStorage)

use std::sync::Arc;

use piquante_core::{SauceId, Uebergang, UserId};
use piquante_db::SqliteDb;

use crate::{
    error::SauceError,
    service::SauceService,
    storage::DiskStorage,
    types::{BildUpload, SauceFelder},
};

const BASIS: &str = "http://localhost:3000";

struct Umgebung {
    service: SauceService<SqliteDb, DiskStorage>,
    bilder: DiskStorage,
    _dir: tempfile::TempDir,
}

async fn umgebung() -> Umgebung {
    let db = Arc::new(
        SqliteDb::in_memory()
            .await
            .expect("In-Memory-DB konnte nicht geoeffnet werden"),
    );
    let dir = tempfile::tempdir().expect("Temp-Verzeichnis konnte nicht erstellt werden");
    let bilder = DiskStorage::new(dir.path());
    let service = SauceService::neu(db, Arc::new(bilder.clone()));
    Umgebung {
        service,
        bilder,
        _dir: dir,
    }
}

fn felder() -> SauceFelder {
    SauceFelder {
        name: Some("Habanero Gold".into()),
        manufacturer: Some("Feuerwerk".into()),
        description: Some("Fruchtig und sehr scharf".into()),
        main_pepper: Some("Habanero".into()),
        heat: Some(8),
    }
}

fn bild(name: &str) -> BildUpload {
    BildUpload {
        original_name: name.into(),
        mime_type: "image/png".into(),
        data: b"\x89PNG".to_vec(),
    }
}

fn bild_datei(u: &Umgebung, url: &str) -> std::path::PathBuf {
    let name = crate::bild::dateiname_aus_url(url).expect("URL ohne Dateiname");
    u.bilder.verzeichnis().join(name)
}

fn anzahl_bilder(u: &Umgebung) -> usize {
    std::fs::read_dir(u.bilder.verzeichnis())
        .map(|d| d.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_erstellen_und_laden() {
    let u = umgebung().await;
    let besitzer = UserId::new();

    let sauce = u
        .service
        .erstellen(besitzer, felder(), Some(bild("habanero gold.png")), BASIS)
        .await
        .expect("Erstellen fehlgeschlagen");

    assert_eq!(sauce.owner_id, besitzer);
    assert_eq!(sauce.name, "Habanero Gold");
    assert_eq!(sauce.heat, 8);
    assert_eq!(sauce.bewertung.likes(), 0);
    assert!(sauce
        .image_url
        .starts_with("http://localhost:3000/images/habanero_gold.png"));
    assert!(sauce.image_url.ends_with(".png"));
    assert!(bild_datei(&u, &sauce.image_url).exists());

    let geladen = u.service.laden(sauce.id).await.unwrap();
    assert_eq!(geladen, sauce);
}

#[tokio::test]
async fn test_erstellen_ohne_bild() {
    let u = umgebung().await;
    let ergebnis = u.service.erstellen(UserId::new(), felder(), None, BASIS).await;
    assert!(matches!(ergebnis, Err(SauceError::UngueltigeEingabe(_))));
    assert!(u.service.alle().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_erstellen_falscher_bildtyp_speichert_nichts() {
    let u = umgebung().await;
    let mut gif = bild("animiert.gif");
    gif.mime_type = "image/gif".into();

    let ergebnis = u
        .service
        .erstellen(UserId::new(), felder(), Some(gif), BASIS)
        .await;

    assert!(matches!(ergebnis, Err(SauceError::BildtypNichtUnterstuetzt(_))));
    assert_eq!(anzahl_bilder(&u), 0);
}

#[tokio::test]
async fn test_erstellen_fehlendes_feld_speichert_kein_bild() {
    let u = umgebung().await;
    let mut unvollstaendig = felder();
    unvollstaendig.manufacturer = None;

    let ergebnis = u
        .service
        .erstellen(UserId::new(), unvollstaendig, Some(bild("x.png")), BASIS)
        .await;

    assert!(matches!(ergebnis, Err(SauceError::UngueltigeEingabe(_))));
    assert_eq!(anzahl_bilder(&u), 0);
}

#[tokio::test]
async fn test_laden_unbekannt() {
    let u = umgebung().await;
    let ergebnis = u.service.laden(SauceId::new()).await;
    assert!(matches!(ergebnis, Err(SauceError::NichtGefunden(_))));
}

#[tokio::test]
async fn test_bearbeiten_ohne_bild() {
    let u = umgebung().await;
    let besitzer = UserId::new();
    let sauce = u
        .service
        .erstellen(besitzer, felder(), Some(bild("a.png")), BASIS)
        .await
        .unwrap();

    let aenderung = SauceFelder {
        description: Some("Jetzt mit Mango".into()),
        heat: Some(6),
        ..Default::default()
    };
    let neu = u
        .service
        .bearbeiten(sauce.id, besitzer, aenderung, None, BASIS)
        .await
        .unwrap();

    assert_eq!(neu.description, "Jetzt mit Mango");
    assert_eq!(neu.heat, 6);
    assert_eq!(neu.name, sauce.name);
    assert_eq!(neu.image_url, sauce.image_url);
    assert!(bild_datei(&u, &sauce.image_url).exists());
}

#[tokio::test]
async fn test_bearbeiten_mit_bild_ersetzt_altes_bild() {
    let u = umgebung().await;
    let besitzer = UserId::new();
    let sauce = u
        .service
        .erstellen(besitzer, felder(), Some(bild("alt.png")), BASIS)
        .await
        .unwrap();
    let alte_datei = bild_datei(&u, &sauce.image_url);

    let neu = u
        .service
        .bearbeiten(
            sauce.id,
            besitzer,
            SauceFelder::default(),
            Some(bild("neu.png")),
            BASIS,
        )
        .await
        .unwrap();

    assert_ne!(neu.image_url, sauce.image_url);
    assert!(neu.image_url.contains("/images/neu.png"));
    assert!(!alte_datei.exists(), "Altes Bild muss entfernt werden");
    assert!(bild_datei(&u, &neu.image_url).exists());
}

#[tokio::test]
async fn test_bearbeiten_fremder_sauce_verboten() {
    let u = umgebung().await;
    let sauce = u
        .service
        .erstellen(UserId::new(), felder(), Some(bild("a.png")), BASIS)
        .await
        .unwrap();

    let ergebnis = u
        .service
        .bearbeiten(
            sauce.id,
            UserId::new(),
            SauceFelder {
                name: Some("Gekapert".into()),
                ..Default::default()
            },
            Some(bild("fremd.png")),
            BASIS,
        )
        .await;

    assert!(matches!(ergebnis, Err(SauceError::KeineBerechtigung)));
    assert_eq!(u.service.laden(sauce.id).await.unwrap(), sauce);
    assert_eq!(anzahl_bilder(&u), 1, "Fremdes Bild darf nicht gespeichert werden");
}

#[tokio::test]
async fn test_bearbeiten_unbekannt() {
    let u = umgebung().await;
    let ergebnis = u
        .service
        .bearbeiten(SauceId::new(), UserId::new(), felder(), None, BASIS)
        .await;
    assert!(matches!(ergebnis, Err(SauceError::NichtGefunden(_))));
}

#[tokio::test]
async fn test_loeschen_entfernt_sauce_und_bild() {
    let u = umgebung().await;
    let besitzer = UserId::new();
    let sauce = u
        .service
        .erstellen(besitzer, felder(), Some(bild("weg.png")), BASIS)
        .await
        .unwrap();
    let datei = bild_datei(&u, &sauce.image_url);

    u.service.loeschen(sauce.id, besitzer).await.unwrap();

    assert!(!datei.exists());
    assert!(matches!(
        u.service.laden(sauce.id).await,
        Err(SauceError::NichtGefunden(_))
    ));
}

#[tokio::test]
async fn test_loeschen_fremder_sauce_verboten() {
    let u = umgebung().await;
    let sauce = u
        .service
        .erstellen(UserId::new(), felder(), Some(bild("bleibt.png")), BASIS)
        .await
        .unwrap();

    let ergebnis = u.service.loeschen(sauce.id, UserId::new()).await;
    assert!(matches!(ergebnis, Err(SauceError::KeineBerechtigung)));
    assert!(u.service.laden(sauce.id).await.is_ok());
    assert!(bild_datei(&u, &sauce.image_url).exists());
}

#[tokio::test]
async fn test_abstimmen_ablauf() {
    let u = umgebung().await;
    let sauce = u
        .service
        .erstellen(UserId::new(), felder(), Some(bild("vote.png")), BASIS)
        .await
        .unwrap();
    let waehler = UserId::new();

    let (s, ue) = u.service.abstimmen(sauce.id, waehler, 1).await.unwrap();
    assert_eq!(ue, Uebergang::LikeHinzugefuegt);
    assert_eq!(s.bewertung.likes(), 1);

    // Zweites Like zaehlt nicht doppelt
    let (s, ue) = u.service.abstimmen(sauce.id, waehler, 1).await.unwrap();
    assert_eq!(ue, Uebergang::Unveraendert);
    assert_eq!(s.bewertung.likes(), 1);

    let (s, ue) = u.service.abstimmen(sauce.id, waehler, -1).await.unwrap();
    assert_eq!(ue, Uebergang::ZuDislikeGewechselt);
    assert_eq!(s.bewertung.likes(), 0);
    assert_eq!(s.bewertung.dislikes(), 1);

    let (s, ue) = u.service.abstimmen(sauce.id, waehler, 0).await.unwrap();
    assert_eq!(ue, Uebergang::DislikeEntfernt);
    assert_eq!(s.bewertung.dislikes(), 0);
    assert!(s.bewertung.users_disliked().is_empty());
}

#[tokio::test]
async fn test_abstimmen_ungueltiger_wert() {
    let u = umgebung().await;
    let sauce = u
        .service
        .erstellen(UserId::new(), felder(), Some(bild("v.png")), BASIS)
        .await
        .unwrap();

    let ergebnis = u.service.abstimmen(sauce.id, UserId::new(), 2).await;
    assert!(matches!(ergebnis, Err(SauceError::UngueltigeStimme(_))));
}

#[tokio::test]
async fn test_abstimmen_unbekannte_sauce() {
    let u = umgebung().await;
    let ergebnis = u.service.abstimmen(SauceId::new(), UserId::new(), 1).await;
    assert!(matches!(ergebnis, Err(SauceError::NichtGefunden(_))));
}
