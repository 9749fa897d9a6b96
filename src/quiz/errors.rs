//! Quiz engine error types

use thiserror::Error;

use crate::flashcards::StoreError;

use super::filter::QuizFilter;

/// Errors raised by the quiz engine
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("No cards match the selection '{filter}'")]
    EmptyPool { filter: QuizFilter },

    /// A lifecycle operation was called in a state that does not allow it.
    /// The session is left exactly as it was before the call.
    #[error("Cannot {operation} while the session is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Card store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for quiz operations
pub type QuizResult<T> = Result<T, QuizError>;
