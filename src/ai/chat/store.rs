use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;

use super::models::Transcript;

pub type SharedTranscript = Arc<Mutex<Transcript>>;

/// Conversation histories keyed by conversation id. The map lock is
/// only held to look up or insert an entry; each transcript has its
/// own lock so unrelated conversations never wait on each other.
pub struct ConversationStore {
    conversations: RwLock<HashMap<String, SharedTranscript>>,
    max_turns: usize,
}

impl ConversationStore {
    pub fn new(max_turns: usize) -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            max_turns,
        }
    }

    pub fn get(&self, conversation_id: &str) -> Option<SharedTranscript> {
        self.conversations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(conversation_id)
            .cloned()
    }

    pub fn get_or_create(&self, conversation_id: &str) -> SharedTranscript {
        if let Some(existing) = self.get(conversation_id) {
            return existing;
        }
        let mut conversations = self
            .conversations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        conversations
            .entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Transcript::new(self.max_turns))))
            .clone()
    }

    /// Returns `false` if there was no such conversation.
    pub fn clear(&self, conversation_id: &str) -> bool {
        self.conversations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(conversation_id)
            .is_some()
    }

    /// Returns the number of conversations dropped.
    pub fn clear_all(&self) -> usize {
        let mut conversations = self
            .conversations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let count = conversations.len();
        conversations.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.conversations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
