//! SQLite-Implementierung des SauceRepository
//!
//! Die Waehlerlisten liegen als JSON-Arrays in `users_liked` bzw.
//! `users_disliked`; `likes`/`dislikes` werden bei jedem Schreibvorgang aus
//! den Listen uebernommen.

use chrono::Utc;

use piquante_core::{Bewertung, SauceId, Stimme, Uebergang, UserId};

use crate::error::DbError;
use crate::models::{NeueSauce, SauceRecord, SauceUpdate};
use crate::repository::{DbResult, SauceRepository};
use crate::sqlite::pool::SqliteDb;

const SAUCE_SPALTEN: &str = "id, user_id, name, manufacturer, description, main_pepper,
     image_url, heat, users_liked, users_disliked";

impl SauceRepository for SqliteDb {
    async fn create(&self, data: NeueSauce<'_>) -> DbResult<SauceRecord> {
        let id = SauceId::new();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO sauces
             (id, user_id, name, manufacturer, description, main_pepper, image_url, heat,
              likes, dislikes, users_liked, users_disliked, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0, '[]', '[]', ?)",
        )
        .bind(id.to_string())
        .bind(data.owner_id.to_string())
        .bind(data.name)
        .bind(data.manufacturer)
        .bind(data.description)
        .bind(data.main_pepper)
        .bind(data.image_url)
        .bind(data.heat)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        tracing::debug!(sauce_id = %id, owner = %data.owner_id, "Sauce angelegt");

        Ok(SauceRecord {
            id,
            owner_id: data.owner_id,
            name: data.name.to_string(),
            manufacturer: data.manufacturer.to_string(),
            description: data.description.to_string(),
            main_pepper: data.main_pepper.to_string(),
            image_url: data.image_url.to_string(),
            heat: data.heat,
            bewertung: Bewertung::neu(),
        })
    }

    async fn get_by_id(&self, id: SauceId) -> DbResult<Option<SauceRecord>> {
        let sql = format!("SELECT {SAUCE_SPALTEN} FROM sauces WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_sauce(&r)).transpose()
    }

    async fn list(&self) -> DbResult<Vec<SauceRecord>> {
        let sql = format!("SELECT {SAUCE_SPALTEN} FROM sauces ORDER BY rowid");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_sauce).collect()
    }

    async fn update(&self, id: SauceId, data: SauceUpdate) -> DbResult<SauceRecord> {
        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.name.is_some() {
            sets.push("name = ?");
        }
        if data.manufacturer.is_some() {
            sets.push("manufacturer = ?");
        }
        if data.description.is_some() {
            sets.push("description = ?");
        }
        if data.main_pepper.is_some() {
            sets.push("main_pepper = ?");
        }
        if data.image_url.is_some() {
            sets.push("image_url = ?");
        }
        if data.heat.is_some() {
            sets.push("heat = ?");
        }

        if sets.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or(DbError::NichtGefunden(id));
        }

        let sql = format!("UPDATE sauces SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = data.name {
            q = q.bind(v);
        }
        if let Some(ref v) = data.manufacturer {
            q = q.bind(v);
        }
        if let Some(ref v) = data.description {
            q = q.bind(v);
        }
        if let Some(ref v) = data.main_pepper {
            q = q.bind(v);
        }
        if let Some(ref v) = data.image_url {
            q = q.bind(v);
        }
        if let Some(v) = data.heat {
            q = q.bind(v);
        }
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::NichtGefunden(id));
        }

        self.get_by_id(id)
            .await?
            .ok_or(DbError::NichtGefunden(id))
    }

    async fn delete(&self, id: SauceId) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM sauces WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn abstimmen(
        &self,
        id: SauceId,
        user: UserId,
        stimme: Stimme,
    ) -> DbResult<Option<(SauceRecord, Uebergang)>> {
        let mut tx = self.pool.begin().await?;

        // Schreibsperre vor dem Lesen holen, damit parallele Stimmen
        // nacheinander auf dem jeweils aktuellen Stand arbeiten
        let gesperrt = sqlx::query("UPDATE sauces SET id = id WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if gesperrt == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let sql = format!("SELECT {SAUCE_SPALTEN} FROM sauces WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_one(&mut *tx)
            .await?;
        let mut sauce = row_to_sauce(&row)?;

        let uebergang = sauce.bewertung.anwenden(user, stimme);
        if uebergang.hat_aenderung() {
            sqlx::query(
                "UPDATE sauces
                 SET likes = ?, dislikes = ?, users_liked = ?, users_disliked = ?
                 WHERE id = ?",
            )
            .bind(sauce.bewertung.likes())
            .bind(sauce.bewertung.dislikes())
            .bind(serde_json::to_string(sauce.bewertung.users_liked())?)
            .bind(serde_json::to_string(sauce.bewertung.users_disliked())?)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            sauce_id = %id,
            user_id = %user,
            uebergang = ?uebergang,
            likes = sauce.bewertung.likes(),
            dislikes = sauce.bewertung.dislikes(),
            "Stimme angewendet"
        );

        Ok(Some((sauce, uebergang)))
    }
}

fn row_to_sauce(row: &sqlx::sqlite::SqliteRow) -> DbResult<SauceRecord> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = id_str
        .parse::<SauceId>()
        .map_err(|e| DbError::beschaedigt("sauces", format!("id '{id_str}': {e}")))?;

    let owner_str: String = row.try_get("user_id")?;
    let owner_id = owner_str
        .parse::<UserId>()
        .map_err(|e| DbError::beschaedigt("sauces", format!("user_id '{owner_str}': {e}")))?;

    let liked_json: String = row.try_get("users_liked")?;
    let disliked_json: String = row.try_get("users_disliked")?;
    let users_liked: Vec<UserId> = serde_json::from_str(&liked_json)?;
    let users_disliked: Vec<UserId> = serde_json::from_str(&disliked_json)?;

    Ok(SauceRecord {
        id,
        owner_id,
        name: row.try_get("name")?,
        manufacturer: row.try_get("manufacturer")?,
        description: row.try_get("description")?,
        main_pepper: row.try_get("main_pepper")?,
        image_url: row.try_get("image_url")?,
        heat: row.try_get("heat")?,
        bewertung: Bewertung::aus_listen(users_liked, users_disliked),
    })
}
