//! Side effects requested by the quiz engine.
//!
//! The engine never plays audio itself; it hands these back to the caller,
//! which runs them with whatever backend it has (see `crate::speech`).

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEffect {
    /// Read the text aloud
    Speak { text: String },
}

impl SessionEffect {
    pub fn speak(text: impl Into<String>) -> Self {
        Self::Speak { text: text.into() }
    }
}
