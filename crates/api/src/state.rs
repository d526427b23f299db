//! Axum-State der REST-API

use std::sync::Arc;

use piquante_auth::AccountService;
use piquante_db::SqliteDb;
use piquante_sauces::{DiskStorage, SauceService};

pub type Konten = AccountService<SqliteDb>;
pub type Saucen = SauceService<SqliteDb, DiskStorage>;

/// Geteilter Zustand aller Handler
#[derive(Clone)]
pub struct AppState {
    pub konten: Arc<Konten>,
    pub saucen: Arc<Saucen>,
    /// Oeffentliche Basis-URL fuer Bild-Links. Ohne Wert wird sie aus dem
    /// Host-Header der Anfrage gebildet.
    pub oeffentliche_url: Option<Arc<str>>,
}

impl AppState {
    pub fn neu(
        konten: Arc<Konten>,
        saucen: Arc<Saucen>,
        oeffentliche_url: Option<String>,
    ) -> Self {
        Self {
            konten,
            saucen,
            oeffentliche_url: oeffentliche_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .map(Arc::from),
        }
    }
}
