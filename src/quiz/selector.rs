//! Weighted sampling of study cards
//!
//! Every card in the pool gets weight `1 + 2 * wrong_count`, so cards that
//! were missed before come up more often while no card ever drops to zero
//! probability. Cards are drawn one at a time without replacement.
//!
//! The draw walks the remaining pool linearly. That is plenty for a few
//! hundred cards; a cumulative-weight table with binary search would give
//! the same draws for larger pools.

use std::collections::HashSet;

use rand::Rng;

use crate::flashcards::Card;

/// Cards per session when the caller does not ask for a size
pub const DEFAULT_SESSION_SIZE: usize = 20;

/// Selection weight of a card
pub fn weight(card: &Card) -> u64 {
    1 + 2 * u64::from(card.wrong_count)
}

/// Draw up to `target_size` distinct cards from `pool`.
///
/// The result has `min(target_size, distinct cards in pool)` entries in draw
/// order. An empty pool yields an empty draw; callers are expected to
/// reject that case before starting a session.
pub fn select_session<R: Rng + ?Sized>(pool: Vec<Card>, target_size: usize, rng: &mut R) -> Vec<Card> {
    let mut seen = HashSet::new();
    let mut remaining: Vec<Card> = pool.into_iter().filter(|c| seen.insert(c.id)).collect();

    let size = target_size.min(remaining.len());
    let mut selected = Vec::with_capacity(size);

    while selected.len() < size && !remaining.is_empty() {
        let total_weight: u64 = remaining.iter().map(weight).sum();
        let r = rng.gen_range(0.0..total_weight as f64);
        let index = pick_index(&remaining, r);
        selected.push(remaining.remove(index));
    }

    selected
}

/// Index of the first card whose running weight exceeds `r`
fn pick_index(cards: &[Card], r: f64) -> usize {
    let mut accumulated = 0.0;
    for (i, card) in cards.iter().enumerate() {
        accumulated += weight(card) as f64;
        if accumulated > r {
            return i;
        }
    }
    // Only reachable through float rounding at the very top of the range
    cards.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn card_with_misses(wrong_count: u32) -> Card {
        let mut card = Card::new("n".to_string(), "t".to_string());
        card.wrong_count = wrong_count;
        card
    }

    fn pool(size: usize) -> Vec<Card> {
        (0..size).map(|i| card_with_misses((i % 4) as u32)).collect()
    }

    #[test]
    fn test_weight() {
        assert_eq!(weight(&card_with_misses(0)), 1);
        assert_eq!(weight(&card_with_misses(1)), 3);
        assert_eq!(weight(&card_with_misses(5)), 11);
    }

    #[test]
    fn test_draw_size_is_clamped_and_distinct() {
        let mut rng = StdRng::seed_from_u64(7);

        for (pool_size, target) in [(1, 20), (5, 3), (20, 20), (30, 20), (8, 0)] {
            let drawn = select_session(pool(pool_size), target, &mut rng);
            assert_eq!(drawn.len(), pool_size.min(target));

            let ids: HashSet<Uuid> = drawn.iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), drawn.len());
        }
    }

    #[test]
    fn test_full_draw_contains_every_card() {
        let cards = vec![card_with_misses(0), card_with_misses(0), card_with_misses(5)];
        let expected: HashSet<Uuid> = cards.iter().map(|c| c.id).collect();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let drawn = select_session(cards.clone(), 3, &mut rng);
            let ids: HashSet<Uuid> = drawn.iter().map(|c| c.id).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_duplicate_ids_in_pool_are_drawn_once() {
        let card = card_with_misses(2);
        let mut rng = StdRng::seed_from_u64(1);

        let drawn = select_session(vec![card.clone(), card.clone(), card_with_misses(0)], 3, &mut rng);
        assert_eq!(drawn.len(), 2);
    }

    #[test]
    fn test_empty_pool_yields_empty_draw() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(select_session(Vec::new(), 20, &mut rng).is_empty());
    }

    #[test]
    fn test_missed_cards_are_drawn_first_more_often() {
        let easy = card_with_misses(0);
        let hard = card_with_misses(4);
        let mut rng = StdRng::seed_from_u64(2024);

        let trials = 4000;
        let mut hard_first = 0;
        for _ in 0..trials {
            let drawn = select_session(vec![easy.clone(), hard.clone()], 1, &mut rng);
            if drawn[0].id == hard.id {
                hard_first += 1;
            }
        }

        // Expected share is 9 / 10
        let share = hard_first as f64 / trials as f64;
        assert!(share > 0.85 && share < 0.95, "share was {}", share);
    }

    #[test]
    fn test_pick_index_boundaries() {
        let cards = vec![card_with_misses(0), card_with_misses(1), card_with_misses(0)];
        // weights 1, 3, 1 -> cumulative 1, 4, 5
        assert_eq!(pick_index(&cards, 0.0), 0);
        assert_eq!(pick_index(&cards, 0.999), 0);
        assert_eq!(pick_index(&cards, 1.0), 1);
        assert_eq!(pick_index(&cards, 3.999), 1);
        assert_eq!(pick_index(&cards, 4.0), 2);
        assert_eq!(pick_index(&cards, 5.0), 2);
    }
}
