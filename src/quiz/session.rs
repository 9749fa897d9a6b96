//! Quiz session lifecycle
//!
//! A session is drawn once from a candidate pool and then walked card by
//! card: each card starts unrevealed, may show a hint, is revealed, and is
//! finally judged right or wrong. Judging the last card completes the
//! session and makes the summary available.
//!
//! Operations called in the wrong state fail with
//! [`QuizError::InvalidTransition`] and leave the session untouched.

use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::flashcards::{Card, CardStore, CardUpdate, StoreError};

use super::clock::Clock;
use super::effects::SessionEffect;
use super::errors::{QuizError, QuizResult};
use super::feedback::outcome_update;
use super::filter::{QuizFilter, QuizMode, QuizRequest};
use super::selector::select_session;

/// Micro-state of the card currently being asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Unrevealed { hinted: bool },
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active(CardPhase),
    Complete,
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            Self::Active(CardPhase::Unrevealed { .. }) => "waiting for reveal",
            Self::Active(CardPhase::Revealed) => "waiting for judgement",
            Self::Complete => "complete",
        }
    }
}

/// What to show when a card comes up
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub card_id: Uuid,
    pub text: String,
    /// One-based position of this card in the session
    pub position: usize,
    pub total: usize,
    pub favorite: bool,
    pub effects: Vec<SessionEffect>,
}

/// Hint shown before the answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum Hint {
    /// The answer itself (native-to-target mode)
    Answer(String),
    /// The pronunciation of the prompt (target-to-native mode), if recorded
    Pronunciation(Option<String>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reveal {
    pub answer: String,
    pub pronunciation: Option<String>,
    pub memo: Option<String>,
    /// Empty on repeated reveals of the same card
    pub effects: Vec<SessionEffect>,
}

/// Result of judging one card
#[derive(Debug)]
pub struct Judgement {
    pub card_id: Uuid,
    pub correct: bool,
    /// Mistake count handed to the store
    pub wrong_count: u32,
    pub complete: bool,
    /// Set when the store rejected the update; the session still advanced
    pub persistence_error: Option<StoreError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub correct: usize,
    pub total: usize,
    pub wrong_cards: Vec<Card>,
    pub percent: u32,
}

/// One study run over a fixed, randomly drawn list of cards
#[derive(Debug, Clone)]
pub struct QuizSession {
    request: QuizRequest,
    cards: Vec<Card>,
    current_index: usize,
    correct: usize,
    wrong_cards: Vec<Card>,
    phase: CardPhase,
}

impl QuizSession {
    /// Draw a session from an already filtered pool
    pub fn start<R: Rng + ?Sized>(pool: Vec<Card>, request: QuizRequest, rng: &mut R) -> QuizResult<Self> {
        if pool.is_empty() {
            return Err(QuizError::EmptyPool {
                filter: request.filter.clone(),
            });
        }

        let pool_size = pool.len();
        let cards = select_session(pool, request.size.max(1), rng);

        log::info!(
            "Started quiz: filter={}, mode={}, {} of {} cards",
            request.filter,
            request.mode,
            cards.len(),
            pool_size
        );

        Ok(Self {
            request,
            cards,
            current_index: 0,
            correct: 0,
            wrong_cards: Vec::new(),
            phase: CardPhase::Unrevealed { hinted: false },
        })
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else {
            SessionState::Active(self.phase)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn mode(&self) -> QuizMode {
        self.request.mode
    }

    pub fn filter(&self) -> &QuizFilter {
        &self.request.filter
    }

    /// The cards of this session in the order they are asked
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Request that draws a fresh session over the same selection
    pub fn replay_request(&self) -> QuizRequest {
        self.request.clone()
    }

    /// Cards answered so far and the session length
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index, self.cards.len())
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            operation,
            state: self.state().name(),
        }
    }

    pub fn current_card(&self) -> QuizResult<&Card> {
        self.cards
            .get(self.current_index)
            .ok_or_else(|| self.invalid("show the current card"))
    }

    /// Prompt for the current card. In target-to-native mode the prompt is
    /// the target text, which is also read aloud.
    pub fn prompt(&self) -> QuizResult<Prompt> {
        let card = self.current_card()?;

        let (text, effects) = match self.request.mode {
            QuizMode::NativeToTarget => (card.native_text.clone(), Vec::new()),
            QuizMode::TargetToNative => (
                card.target_text.clone(),
                vec![SessionEffect::speak(&card.target_text)],
            ),
        };

        Ok(Prompt {
            card_id: card.id,
            text,
            position: self.current_index + 1,
            total: self.cards.len(),
            favorite: card.favorite,
            effects,
        })
    }

    /// Show a hint for the current card. Only available before the reveal.
    pub fn hint(&mut self) -> QuizResult<Hint> {
        if !matches!(self.state(), SessionState::Active(CardPhase::Unrevealed { .. })) {
            return Err(self.invalid("show a hint"));
        }

        let card = self.current_card()?;
        let hint = match self.request.mode {
            QuizMode::NativeToTarget => Hint::Answer(card.target_text.clone()),
            QuizMode::TargetToNative => Hint::Pronunciation(card.pronunciation.clone()),
        };

        self.phase = CardPhase::Unrevealed { hinted: true };
        Ok(hint)
    }

    /// Reveal the answer. The first reveal of a card asks for the target
    /// text to be spoken; repeated calls return the same answer with no
    /// effects.
    pub fn reveal(&mut self) -> QuizResult<Reveal> {
        let first = match self.state() {
            SessionState::Complete => return Err(self.invalid("reveal the answer")),
            SessionState::Active(phase) => phase != CardPhase::Revealed,
        };

        let card = self.current_card()?;
        let answer = match self.request.mode {
            QuizMode::NativeToTarget => card.target_text.clone(),
            QuizMode::TargetToNative => card.native_text.clone(),
        };
        let effects = if first {
            vec![SessionEffect::speak(&card.target_text)]
        } else {
            Vec::new()
        };

        let reveal = Reveal {
            answer,
            pronunciation: card.pronunciation.clone(),
            memo: card.memo.clone(),
            effects,
        };

        self.phase = CardPhase::Revealed;
        Ok(reveal)
    }

    /// Judge the revealed card and move on.
    ///
    /// The new mistake count is written to the store before the session
    /// advances. A store failure does not hold the session back: it is
    /// logged and returned in [`Judgement::persistence_error`].
    pub async fn judge<S: CardStore + ?Sized>(
        &mut self,
        store: &S,
        clock: &dyn Clock,
        is_correct: bool,
    ) -> QuizResult<Judgement> {
        if self.state() != SessionState::Active(CardPhase::Revealed) {
            return Err(self.invalid("judge a card"));
        }

        let card = self.current_card()?.clone();
        let update = outcome_update(&card, is_correct, clock.now());
        let wrong_count = update.wrong_count.unwrap_or(card.wrong_count);

        let persistence_error = match store.update_by_id(card.id, update).await {
            Ok(_) => None,
            Err(e) => {
                log::warn!("Failed to record answer for card {}: {}", card.id, e);
                Some(e)
            }
        };

        if is_correct {
            self.correct += 1;
        } else {
            self.wrong_cards.push(card.clone());
        }
        self.current_index += 1;
        self.phase = CardPhase::Unrevealed { hinted: false };

        log::debug!(
            "Judged card {} as {} ({}/{})",
            card.id,
            if is_correct { "correct" } else { "wrong" },
            self.current_index,
            self.cards.len()
        );

        Ok(Judgement {
            card_id: card.id,
            correct: is_correct,
            wrong_count,
            complete: self.is_complete(),
            persistence_error,
        })
    }

    /// Flip the favourite flag of the current card, returning the new value
    pub async fn toggle_favorite<S: CardStore + ?Sized>(&mut self, store: &S) -> QuizResult<bool> {
        let card = self.current_card()?;
        let id = card.id;
        let favorite = !card.favorite;

        let updated = store.update_by_id(id, CardUpdate::favorite(favorite)).await?;
        if let Some(card) = self.cards.get_mut(self.current_index) {
            card.favorite = updated.favorite;
        }
        Ok(updated.favorite)
    }

    /// Final score. Only available once every card has been judged.
    pub fn summary(&self) -> QuizResult<SessionSummary> {
        if !self.is_complete() {
            return Err(self.invalid("summarize the session"));
        }

        let total = self.cards.len();
        let percent = (self.correct as f64 * 100.0 / total as f64).round() as u32;

        Ok(SessionSummary {
            correct: self.correct,
            total,
            wrong_cards: self.wrong_cards.clone(),
            percent,
        })
    }
}

/// Load the collection, apply the request's filter and draw a session
pub async fn start_session<S, R>(store: &S, request: QuizRequest, rng: &mut R) -> QuizResult<QuizSession>
where
    S: CardStore + ?Sized,
    R: Rng + ?Sized,
{
    let cards = store.get_all().await?;
    let pool = request.filter.pool(&cards);
    QuizSession::start(pool, request, rng)
}
