//! Adaptive quiz engine
//!
//! This module provides:
//! - Pool filters and quiz direction (`filter`)
//! - Weighted sampling biased toward missed cards (`selector`)
//! - The per-card reveal/judge session state machine (`session`)
//! - Mistake-count feedback written back to the card store (`feedback`)

pub mod clock;
pub mod effects;
pub mod errors;
pub mod feedback;
pub mod filter;
pub mod selector;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use effects::SessionEffect;
pub use errors::{QuizError, QuizResult};
pub use feedback::apply_outcome;
pub use filter::{QuizFilter, QuizMode, QuizRequest};
pub use selector::{select_session, DEFAULT_SESSION_SIZE};
pub use session::{
    start_session, CardPhase, Hint, Judgement, Prompt, QuizSession, Reveal, SessionState,
    SessionSummary,
};
