//! Tango: vocabulary flashcards with an adaptive quiz
//!
//! Cards live in a [`flashcards::CardStore`]. A quiz draws a weighted random
//! session from a filtered pool, walks it card by card, and writes each
//! outcome back as the card's mistake count so missed cards come up more
//! often next time.

pub mod config;
pub mod flashcards;
pub mod quiz;
pub mod speech;

pub use config::Settings;
pub use flashcards::{Card, CardStore, JsonCardStore, MemoryCardStore};
pub use quiz::{QuizError, QuizFilter, QuizMode, QuizRequest, QuizSession};
