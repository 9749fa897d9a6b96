//! How a judgement changes a card's mistake count

use chrono::{DateTime, Utc};

use crate::flashcards::{Card, CardUpdate};

/// New mistake count after answering `card`.
///
/// A correct answer pays back one mistake (never below zero); a wrong answer
/// adds one.
pub fn apply_outcome(card: &Card, is_correct: bool) -> u32 {
    if is_correct {
        card.wrong_count.saturating_sub(1)
    } else {
        card.wrong_count.saturating_add(1)
    }
}

/// Store update recording the outcome and when it happened
pub fn outcome_update(card: &Card, is_correct: bool, answered_at: DateTime<Utc>) -> CardUpdate {
    CardUpdate::outcome(apply_outcome(card, is_correct), answered_at)
}
