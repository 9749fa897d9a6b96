//! Which cards a quiz draws from, and in which direction they are asked

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::flashcards::Card;

use super::selector::DEFAULT_SESSION_SIZE;

const ALL_KEY: &str = "all";
const FAVORITES_KEY: &str = "_fav";
const WEAK_KEY: &str = "_weak";

/// Selection criterion for the candidate pool.
///
/// Rendered as a short key (`all`, `_fav`, `_weak`, or the genre name) so a
/// finished session can be replayed over the same set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuizFilter {
    All,
    Favorites,
    /// Cards with at least one outstanding mistake
    Weak,
    Genre(String),
}

impl Default for QuizFilter {
    fn default() -> Self {
        Self::All
    }
}

impl QuizFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::Favorites => card.favorite,
            Self::Weak => card.is_weak(),
            Self::Genre(name) => card.has_genre(name),
        }
    }

    /// Candidate pool for this filter, in collection order
    pub fn pool(&self, cards: &[Card]) -> Vec<Card> {
        cards.iter().filter(|c| self.matches(c)).cloned().collect()
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL_KEY,
            Self::Favorites => FAVORITES_KEY,
            Self::Weak => WEAK_KEY,
            Self::Genre(name) => name,
        }
    }
}

impl From<&str> for QuizFilter {
    fn from(key: &str) -> Self {
        match key.trim() {
            "" | ALL_KEY => Self::All,
            FAVORITES_KEY => Self::Favorites,
            WEAK_KEY => Self::Weak,
            genre => Self::Genre(genre.to_string()),
        }
    }
}

impl From<String> for QuizFilter {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<QuizFilter> for String {
    fn from(filter: QuizFilter) -> Self {
        filter.key().to_string()
    }
}

impl FromStr for QuizFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for QuizFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Direction of the exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    /// Prompt with the native text, answer with the target text
    #[default]
    #[serde(alias = "jp-zhh")]
    NativeToTarget,
    /// Prompt with the target text, answer with the native text
    #[serde(alias = "zhh-jp")]
    TargetToNative,
}

impl QuizMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NativeToTarget => "native-to-target",
            Self::TargetToNative => "target-to-native",
        }
    }
}

impl FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "native-to-target" | "jp-zhh" => Ok(Self::NativeToTarget),
            "target-to-native" | "zhh-jp" => Ok(Self::TargetToNative),
            other => Err(format!(
                "unknown quiz mode '{}' (expected native-to-target or target-to-native)",
                other
            )),
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to draw a session, kept so it can be replayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub filter: QuizFilter,
    pub mode: QuizMode,
    #[serde(default = "default_session_size")]
    pub size: usize,
}

fn default_session_size() -> usize {
    DEFAULT_SESSION_SIZE
}

impl QuizRequest {
    pub fn new(filter: QuizFilter, mode: QuizMode) -> Self {
        Self {
            filter,
            mode,
            size: DEFAULT_SESSION_SIZE,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self::new(QuizFilter::All, QuizMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(genre: Option<&str>, wrong_count: u32, favorite: bool) -> Card {
        let mut card = Card::new("n".to_string(), "t".to_string());
        card.genre = genre.map(str::to_string);
        card.wrong_count = wrong_count;
        card.favorite = favorite;
        card
    }

    #[test]
    fn test_filter_keys_round_trip() {
        for key in ["all", "_fav", "_weak", "food"] {
            assert_eq!(QuizFilter::from(key).to_string(), key);
        }
        assert_eq!(QuizFilter::from(""), QuizFilter::All);
        assert_eq!(QuizFilter::from("_weak"), QuizFilter::Weak);
        assert_eq!(QuizFilter::from(" food "), QuizFilter::Genre("food".to_string()));
    }

    #[test]
    fn test_filter_pool() {
        let cards = vec![
            card(Some("food, basics"), 0, true),
            card(Some("food"), 2, false),
            card(None, 0, false),
        ];

        assert_eq!(QuizFilter::All.pool(&cards).len(), 3);
        assert_eq!(QuizFilter::Favorites.pool(&cards).len(), 1);
        assert_eq!(QuizFilter::Weak.pool(&cards).len(), 1);
        assert_eq!(QuizFilter::Genre("food".to_string()).pool(&cards).len(), 2);
        assert_eq!(QuizFilter::Genre("basics".to_string()).pool(&cards).len(), 1);
        assert!(QuizFilter::Genre("drinks".to_string()).pool(&cards).is_empty());
    }

    #[test]
    fn test_mode_parsing_accepts_legacy_keys() {
        assert_eq!("jp-zhh".parse::<QuizMode>().unwrap(), QuizMode::NativeToTarget);
        assert_eq!("zhh-jp".parse::<QuizMode>().unwrap(), QuizMode::TargetToNative);
        assert_eq!(
            "target-to-native".parse::<QuizMode>().unwrap(),
            QuizMode::TargetToNative
        );
        assert!("sideways".parse::<QuizMode>().is_err());
    }

    #[test]
    fn test_request_serializes_filter_as_key() {
        let request = QuizRequest::new(QuizFilter::Favorites, QuizMode::TargetToNative);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["filter"], "_fav");
        assert_eq!(json["mode"], "target-to-native");
        assert_eq!(json["size"], 20);
    }
}
