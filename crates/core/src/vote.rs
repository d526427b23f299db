//! Like/Dislike-Zustandsmaschine
//!
//! Jede Kombination aus Sauce und Benutzer befindet sich in genau einem von
//! drei Zustaenden: [`VoteZustand::Neutral`], [`VoteZustand::Liked`] oder
//! [`VoteZustand::Disliked`]. Eine [`Stimme`] ueberfuehrt den Zustand:
//!
//! | Zustand \ Stimme | Like      | Dislike    | Zurueckziehen |
//! |------------------|-----------|------------|---------------|
//! | Neutral          | Liked     | Disliked   | Neutral       |
//! | Liked            | Liked     | Disliked   | Neutral       |
//! | Disliked         | Liked     | Disliked   | Neutral       |
//!
//! Wiederholte Stimmen sind idempotent. Die Zaehler werden ausschliesslich
//! aus den Waehlerlisten abgeleitet, daher gilt `likes == users_liked.len()`
//! und `dislikes == users_disliked.len()` nach jeder Operation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::UserId;

/// Eine abgegebene Stimme (`1`, `-1` oder `0` auf dem Draht)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stimme {
    Like,
    Dislike,
    /// Nimmt die aktuelle Stimme des Benutzers zurueck
    Zurueckziehen,
}

impl TryFrom<i64> for Stimme {
    type Error = CoreError;

    fn try_from(wert: i64) -> Result<Self, Self::Error> {
        match wert {
            1 => Ok(Self::Like),
            -1 => Ok(Self::Dislike),
            0 => Ok(Self::Zurueckziehen),
            andere => Err(CoreError::UngueltigeStimme(andere)),
        }
    }
}

/// Zustand eines Benutzers bezueglich einer Sauce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteZustand {
    Neutral,
    Liked,
    Disliked,
}

/// Ergebnis einer angewendeten Stimme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uebergang {
    LikeHinzugefuegt,
    DislikeHinzugefuegt,
    LikeEntfernt,
    DislikeEntfernt,
    /// Dislike wurde durch Like ersetzt
    ZuLikeGewechselt,
    /// Like wurde durch Dislike ersetzt
    ZuDislikeGewechselt,
    Unveraendert,
}

impl Uebergang {
    /// `true` wenn sich die Bewertung geaendert hat und gespeichert werden muss
    pub fn hat_aenderung(&self) -> bool {
        !matches!(self, Self::Unveraendert)
    }
}

/// Abstimmungsdaten einer Sauce
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BewertungDaten")]
pub struct Bewertung {
    likes: i64,
    dislikes: i64,
    users_liked: Vec<UserId>,
    users_disliked: Vec<UserId>,
}

/// Rohform fuer die Deserialisierung; Zaehler werden neu berechnet
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BewertungDaten {
    #[serde(default)]
    users_liked: Vec<UserId>,
    #[serde(default)]
    users_disliked: Vec<UserId>,
}

impl From<BewertungDaten> for Bewertung {
    fn from(daten: BewertungDaten) -> Self {
        Self::aus_listen(daten.users_liked, daten.users_disliked)
    }
}

impl Bewertung {
    /// Leere Bewertung (0 Likes, 0 Dislikes)
    pub fn neu() -> Self {
        Self::default()
    }

    /// Baut eine Bewertung aus gespeicherten Waehlerlisten.
    ///
    /// Doppelte Eintraege werden entfernt. Steht ein Benutzer in beiden
    /// Listen, gewinnt das Like.
    pub fn aus_listen(users_liked: Vec<UserId>, users_disliked: Vec<UserId>) -> Self {
        let mut bewertung = Self::default();
        for user in users_liked {
            if !bewertung.users_liked.contains(&user) {
                bewertung.users_liked.push(user);
            }
        }
        for user in users_disliked {
            if !bewertung.users_liked.contains(&user) && !bewertung.users_disliked.contains(&user) {
                bewertung.users_disliked.push(user);
            }
        }
        bewertung.zaehler_aktualisieren();
        bewertung
    }

    pub fn likes(&self) -> i64 {
        self.likes
    }

    pub fn dislikes(&self) -> i64 {
        self.dislikes
    }

    pub fn users_liked(&self) -> &[UserId] {
        &self.users_liked
    }

    pub fn users_disliked(&self) -> &[UserId] {
        &self.users_disliked
    }

    /// Aktueller Zustand eines Benutzers
    pub fn zustand(&self, user: UserId) -> VoteZustand {
        if self.users_liked.contains(&user) {
            VoteZustand::Liked
        } else if self.users_disliked.contains(&user) {
            VoteZustand::Disliked
        } else {
            VoteZustand::Neutral
        }
    }

    /// Wendet eine Stimme an und gibt den ausgefuehrten Uebergang zurueck
    pub fn anwenden(&mut self, user: UserId, stimme: Stimme) -> Uebergang {
        let uebergang = match (self.zustand(user), stimme) {
            (VoteZustand::Neutral, Stimme::Like) => {
                self.users_liked.push(user);
                Uebergang::LikeHinzugefuegt
            }
            (VoteZustand::Neutral, Stimme::Dislike) => {
                self.users_disliked.push(user);
                Uebergang::DislikeHinzugefuegt
            }
            (VoteZustand::Disliked, Stimme::Like) => {
                self.users_disliked.retain(|u| *u != user);
                self.users_liked.push(user);
                Uebergang::ZuLikeGewechselt
            }
            (VoteZustand::Liked, Stimme::Dislike) => {
                self.users_liked.retain(|u| *u != user);
                self.users_disliked.push(user);
                Uebergang::ZuDislikeGewechselt
            }
            (VoteZustand::Liked, Stimme::Zurueckziehen) => {
                self.users_liked.retain(|u| *u != user);
                Uebergang::LikeEntfernt
            }
            (VoteZustand::Disliked, Stimme::Zurueckziehen) => {
                self.users_disliked.retain(|u| *u != user);
                Uebergang::DislikeEntfernt
            }
            (VoteZustand::Liked, Stimme::Like)
            | (VoteZustand::Disliked, Stimme::Dislike)
            | (VoteZustand::Neutral, Stimme::Zurueckziehen) => Uebergang::Unveraendert,
        };
        self.zaehler_aktualisieren();
        uebergang
    }

    fn zaehler_aktualisieren(&mut self) {
        self.likes = self.users_liked.len() as i64;
        self.dislikes = self.users_disliked.len() as i64;
    }
}
