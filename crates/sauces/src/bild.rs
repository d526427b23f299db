//! Regeln fuer Bilddateien: erlaubte Typen, Dateinamen und oeffentliche URLs
//!
//! Gespeicherte Namen haben die Form `<Originalname mit '_' statt Leerzeichen><Unix-Millis>.<Endung>`.
//! Die URL einer Sauce zeigt auf `<Basis-URL>/images/<Dateiname>`.

use crate::error::{SauceError, SauceResult};

/// Pfadsegment unter dem Bilder ausgeliefert werden
pub const BILD_PFAD: &str = "/images/";

/// Obergrenze fuer den Namensanteil in Bytes. Mit Zeitstempel und Endung
/// bleibt der Dateiname unter der ueblichen Grenze von 255 Bytes.
const MAX_BASIS_BYTES: usize = 200;

/// Dateiendung fuer einen MIME-Typ, `None` wenn der Typ nicht erlaubt ist
pub fn endung_fuer_mime(mime: &str) -> Option<&'static str> {
    match mime.trim().to_ascii_lowercase().as_str() {
        "image/jpg" | "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        _ => None,
    }
}

/// Baut den Speichernamen fuer ein hochgeladenes Bild
///
/// Verzeichnisanteile im Originalnamen werden verworfen.
pub fn dateiname_bauen(original: &str, mime: &str, zeit_ms: i64) -> SauceResult<String> {
    let endung = endung_fuer_mime(mime)
        .ok_or_else(|| SauceError::BildtypNichtUnterstuetzt(mime.to_string()))?;

    let basis = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let basis = if basis.is_empty() || basis == "." || basis == ".." {
        "image".to_string()
    } else {
        let mut basis = basis.replace(' ', "_");
        let mut ende = basis.len().min(MAX_BASIS_BYTES);
        while !basis.is_char_boundary(ende) {
            ende -= 1;
        }
        basis.truncate(ende);
        basis
    };

    Ok(format!("{basis}{zeit_ms}.{endung}"))
}

/// Oeffentliche URL eines gespeicherten Bildes
pub fn bild_url(basis_url: &str, dateiname: &str) -> String {
    format!("{}{BILD_PFAD}{dateiname}", basis_url.trim_end_matches('/'))
}

/// Extrahiert den Dateinamen aus einer Bild-URL
///
/// `None` wenn die URL nicht auf `/images/` zeigt oder der Name einen Pfad enthaelt.
pub fn dateiname_aus_url(url: &str) -> Option<&str> {
    let (_, name) = url.rsplit_once(BILD_PFAD)?;
    if ist_sicherer_name(name) {
        Some(name)
    } else {
        None
    }
}

/// Ein Name ohne Verzeichnisanteil
pub fn ist_sicherer_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
