//! Queries over the whole card collection

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use super::models::{Card, CardUpdate, CollectionStats};
use super::storage::{CardStore, Result, StoreError};

/// Unique genre names across the collection, sorted
pub fn genres(cards: &[Card]) -> Vec<String> {
    let set: BTreeSet<&str> = cards.iter().flat_map(|c| c.genres()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Number of cards in each genre, sorted by genre name
pub fn genre_counts(cards: &[Card]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for card in cards {
        for genre in card.genres() {
            *counts.entry(genre).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(genre, count)| (genre.to_string(), count))
        .collect()
}

pub fn collection_stats(cards: &[Card]) -> CollectionStats {
    CollectionStats {
        total_cards: cards.len(),
        genres: genres(cards).len(),
        weak_cards: cards.iter().filter(|c| c.is_weak()).count(),
        favorite_cards: cards.iter().filter(|c| c.favorite).count(),
    }
}

/// Cards with outstanding mistakes, most-missed first
pub fn weak_cards(cards: &[Card]) -> Vec<Card> {
    let mut weak: Vec<Card> = cards.iter().filter(|c| c.is_weak()).cloned().collect();
    weak.sort_by(|a, b| b.wrong_count.cmp(&a.wrong_count));
    weak
}

pub fn favorite_cards(cards: &[Card]) -> Vec<Card> {
    cards.iter().filter(|c| c.favorite).cloned().collect()
}

/// Case-insensitive text search, optionally restricted to one genre
pub fn search(cards: &[Card], query: Option<&str>, genre: Option<&str>) -> Vec<Card> {
    let query = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    cards
        .iter()
        .filter(|c| genre.map_or(true, |g| c.has_genre(g)))
        .filter(|c| match &query {
            None => true,
            Some(q) => {
                c.native_text.to_lowercase().contains(q)
                    || c.target_text.to_lowercase().contains(q)
                    || c
                        .pronunciation
                        .as_deref()
                        .map_or(false, |p| p.to_lowercase().contains(q))
            }
        })
        .cloned()
        .collect()
}

/// Find a card by full id or unambiguous id prefix
pub fn find_by_id_prefix<'a>(cards: &'a [Card], prefix: &str) -> Result<&'a Card> {
    if let Ok(id) = Uuid::parse_str(prefix) {
        return cards
            .iter()
            .find(|c| c.id == id)
            .ok_or(StoreError::CardNotFound(id));
    }

    let prefix = prefix.to_lowercase();
    let matches: Vec<&Card> = cards
        .iter()
        .filter(|c| c.id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [card] => Ok(card),
        [] => Err(StoreError::InvalidCard(format!("no card id starts with '{}'", prefix))),
        _ => Err(StoreError::InvalidCard(format!(
            "id prefix '{}' matches {} cards",
            prefix,
            matches.len()
        ))),
    }
}

/// Flip a card's favourite flag, returning the new value
pub async fn toggle_favorite<S: CardStore + ?Sized>(store: &S, id: Uuid) -> Result<bool> {
    let cards = store.get_all().await?;
    let card = cards
        .iter()
        .find(|c| c.id == id)
        .ok_or(StoreError::CardNotFound(id))?;

    let updated = store
        .update_by_id(id, CardUpdate::favorite(!card.favorite))
        .await?;
    Ok(updated.favorite)
}

/// Clear the mistake count of every weak card, returning how many were reset
pub async fn reset_weak<S: CardStore + ?Sized>(store: &S) -> Result<usize> {
    let weak = weak_cards(&store.get_all().await?);
    for card in &weak {
        store.update_by_id(card.id, CardUpdate::wrong_count(0)).await?;
    }

    log::info!("Reset mistake count on {} cards", weak.len());
    Ok(weak.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::storage::MemoryCardStore;

    fn card(native: &str, genre: Option<&str>, wrong_count: u32, favorite: bool) -> Card {
        let mut card = Card::new(native.to_string(), format!("{}-target", native));
        card.genre = genre.map(str::to_string);
        card.wrong_count = wrong_count;
        card.favorite = favorite;
        card
    }

    fn sample() -> Vec<Card> {
        vec![
            card("おはよう", Some("greeting, basics"), 0, true),
            card("りんご", Some("food"), 3, false),
            card("みかん", Some("food、basics"), 1, true),
            card("空", None, 0, false),
        ]
    }

    #[test]
    fn test_genres_are_unique_and_sorted() {
        assert_eq!(genres(&sample()), vec!["basics", "food", "greeting"]);
    }

    #[test]
    fn test_genre_counts() {
        let counts = genre_counts(&sample());
        assert_eq!(
            counts,
            vec![
                ("basics".to_string(), 2),
                ("food".to_string(), 2),
                ("greeting".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_collection_stats() {
        let stats = collection_stats(&sample());
        assert_eq!(stats.total_cards, 4);
        assert_eq!(stats.genres, 3);
        assert_eq!(stats.weak_cards, 2);
        assert_eq!(stats.favorite_cards, 2);
    }

    #[test]
    fn test_weak_cards_sorted_descending() {
        let weak = weak_cards(&sample());
        let counts: Vec<u32> = weak.iter().map(|c| c.wrong_count).collect();
        assert_eq!(counts, vec![3, 1]);
    }

    #[test]
    fn test_search_with_query_and_genre() {
        let cards = sample();
        assert_eq!(search(&cards, Some("りんご"), None).len(), 1);
        assert_eq!(search(&cards, Some("TARGET"), Some("basics")).len(), 2);
        assert_eq!(search(&cards, None, None).len(), 4);
        assert!(search(&cards, Some("missing"), None).is_empty());
    }

    #[test]
    fn test_find_by_id_prefix() {
        let cards = sample();
        let full = cards[1].id.to_string();

        assert_eq!(find_by_id_prefix(&cards, &full).unwrap().id, cards[1].id);
        assert_eq!(find_by_id_prefix(&cards, &full[..18]).unwrap().id, cards[1].id);
        assert!(find_by_id_prefix(&cards, "").is_err());
    }

    #[tokio::test]
    async fn test_toggle_favorite_and_reset_weak() {
        let cards = sample();
        let id = cards[3].id;
        let store = MemoryCardStore::with_cards(cards);

        assert!(toggle_favorite(&store, id).await.unwrap());
        assert!(!toggle_favorite(&store, id).await.unwrap());

        assert_eq!(reset_weak(&store).await.unwrap(), 2);
        let after = store.get_all().await.unwrap();
        assert!(after.iter().all(|c| c.wrong_count == 0));
    }
}
