//! The core models for keeping track of a conversation with a
//! customer.
use chrono::NaiveDateTime;
use serde::Serialize;

/// Hidden context appended to a customer's message for the model
/// starts with this marker. Everything after it is never shown back.
pub const CONTEXT_MARKER: &str = "[SISTEMA";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    /// How the role is written in order transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            TurnRole::User => "Cliente",
            TurnRole::Assistant => "Bot",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
    pub timestamp: NaiveDateTime,
}

impl Turn {
    pub fn new(role: TurnRole, text: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            role,
            text: text.to_string(),
            timestamp,
        }
    }

    pub fn visible_text(&self) -> &str {
        strip_context(&self.text)
    }
}

/// Drops any hidden context fragment from `text`.
pub fn strip_context(text: &str) -> &str {
    match text.find(CONTEXT_MARKER) {
        Some(idx) => text[..idx].trim(),
        None => text,
    }
}

/// Ordered turns of one conversation, capped at `max_turns` with the
/// oldest turns dropped first.
#[derive(Debug)]
pub struct Transcript {
    turns: Vec<Turn>,
    max_turns: usize,
}

impl Transcript {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns: max_turns.max(1),
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        if self.turns.len() > self.max_turns {
            let excess = self.turns.len() - self.max_turns;
            self.turns.drain(..excess);
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_assistant_text(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == TurnRole::Assistant)
            .map(|t| t.text.as_str())
    }
}
