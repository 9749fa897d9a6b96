//! Data models for the flashcard collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Separators accepted between genre names (ASCII comma and ideographic comma)
const GENRE_SEPARATORS: [char; 2] = [',', '、'];

/// A vocabulary card: native-language prompt and target-language answer.
///
/// The field names on the wire follow the exported JSON backups, which mix
/// snake_case text fields with camelCase study fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub native_text: String,
    pub target_text: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub pronunciation: Option<String>,
    /// Comma-delimited genre list; a card may belong to several genres
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub memo: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    /// Number of outstanding mistakes, the only difficulty signal
    #[serde(default, rename = "wrongCount")]
    pub wrong_count: u32,
    #[serde(default, rename = "lastAnswered", skip_serializing_if = "Option::is_none")]
    pub last_answered: Option<DateTime<Utc>>,
}

impl Card {
    pub fn new(native_text: String, target_text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            native_text,
            target_text,
            pronunciation: None,
            genre: None,
            memo: None,
            favorite: false,
            wrong_count: 0,
            last_answered: None,
        }
    }

    /// Genre names this card belongs to, trimmed and without empty entries
    pub fn genres(&self) -> Vec<&str> {
        self.genre.as_deref().map(split_genres).unwrap_or_default()
    }

    /// Check whether the card belongs to the named genre
    pub fn has_genre(&self, name: &str) -> bool {
        let name = name.trim();
        !name.is_empty() && self.genres().iter().any(|g| *g == name)
    }

    /// A card counts as weak while it has unresolved mistakes
    pub fn is_weak(&self) -> bool {
        self.wrong_count > 0
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: CardUpdate) {
        if let Some(native_text) = update.native_text {
            self.native_text = native_text;
        }
        if let Some(target_text) = update.target_text {
            self.target_text = target_text;
        }
        if let Some(pronunciation) = update.pronunciation {
            self.pronunciation = pronunciation;
        }
        if let Some(genre) = update.genre {
            self.genre = genre;
        }
        if let Some(memo) = update.memo {
            self.memo = memo;
        }
        if let Some(favorite) = update.favorite {
            self.favorite = favorite;
        }
        if let Some(wrong_count) = update.wrong_count {
            self.wrong_count = wrong_count;
        }
        if let Some(last_answered) = update.last_answered {
            self.last_answered = Some(last_answered);
        }
    }
}

/// Split a raw genre string into trimmed, non-empty names
pub fn split_genres(raw: &str) -> Vec<&str> {
    raw.split(&GENRE_SEPARATORS[..])
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect()
}

/// Fields for creating a new card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCard {
    pub native_text: String,
    pub target_text: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl NewCard {
    pub fn new(native_text: impl Into<String>, target_text: impl Into<String>) -> Self {
        Self {
            native_text: native_text.into(),
            target_text: target_text.into(),
            ..Default::default()
        }
    }

    pub fn into_card(self) -> Card {
        let mut card = Card::new(
            self.native_text.trim().to_string(),
            self.target_text.trim().to_string(),
        );
        card.pronunciation = non_blank(self.pronunciation);
        card.genre = non_blank(self.genre);
        card.memo = non_blank(self.memo);
        card
    }
}

/// Partial update of a card. `None` leaves the field untouched; for the
/// optional text fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub native_text: Option<String>,
    pub target_text: Option<String>,
    pub pronunciation: Option<Option<String>>,
    pub genre: Option<Option<String>>,
    pub memo: Option<Option<String>>,
    pub favorite: Option<bool>,
    pub wrong_count: Option<u32>,
    pub last_answered: Option<DateTime<Utc>>,
}

impl CardUpdate {
    /// Update recording a quiz outcome
    pub fn outcome(wrong_count: u32, answered_at: DateTime<Utc>) -> Self {
        Self {
            wrong_count: Some(wrong_count),
            last_answered: Some(answered_at),
            ..Default::default()
        }
    }

    pub fn favorite(favorite: bool) -> Self {
        Self {
            favorite: Some(favorite),
            ..Default::default()
        }
    }

    pub fn wrong_count(wrong_count: u32) -> Self {
        Self {
            wrong_count: Some(wrong_count),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Overview numbers for the whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_cards: usize,
    pub genres: usize,
    pub weak_cards: usize,
    pub favorite_cards: usize,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Backups store unset text fields as `""`; read those as absent
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(non_blank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_genres_mixed_separators() {
        assert_eq!(split_genres("greeting, basics、 food ,,"), vec!["greeting", "basics", "food"]);
        assert!(split_genres(" , 、").is_empty());
    }

    #[test]
    fn test_has_genre_is_exact_per_entry() {
        let mut card = Card::new("こんにちは".to_string(), "สวัสดี".to_string());
        card.genre = Some("greeting, basics".to_string());

        assert!(card.has_genre("basics"));
        assert!(card.has_genre(" greeting "));
        assert!(!card.has_genre("basic"));
        assert!(!card.has_genre(""));
    }

    #[test]
    fn test_deserialize_backup_format() {
        let json = r#"{
            "id": "5b4c8a8e-35f3-4a3b-9d0e-0f5a4a1f6c11",
            "native_text": "ありがとう",
            "target_text": "ขอบคุณ",
            "pronunciation": "khop khun",
            "genre": "basics",
            "favorite": true,
            "wrongCount": 3,
            "lastAnswered": "2026-01-02T03:04:05Z"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.wrong_count, 3);
        assert!(card.favorite);
        assert!(card.last_answered.is_some());
        assert_eq!(card.memo, None);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"{ "native_text": "水", "target_text": "น้ำ" }"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.wrong_count, 0);
        assert!(!card.favorite);
        assert!(!card.id.is_nil());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut card = Card::new("猫".to_string(), "แมว".to_string());
        card.pronunciation = Some("maew".to_string());

        card.apply(CardUpdate {
            pronunciation: Some(None),
            wrong_count: Some(2),
            ..Default::default()
        });

        assert_eq!(card.pronunciation, None);
        assert_eq!(card.wrong_count, 2);
        assert_eq!(card.native_text, "猫");
    }

    #[test]
    fn test_new_card_trims_and_drops_blank_fields() {
        let card = NewCard {
            native_text: "  犬 ".to_string(),
            target_text: "หมา".to_string(),
            pronunciation: Some("   ".to_string()),
            genre: Some(" animals ".to_string()),
            memo: None,
        }
        .into_card();

        assert_eq!(card.native_text, "犬");
        assert_eq!(card.pronunciation, None);
        assert_eq!(card.genre.as_deref(), Some("animals"));
    }
}
