use std::collections::VecDeque;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::ai::chat::Assistant;
use crate::core::AppConfig;
use crate::orders::OrderLedger;
use crate::transport::BridgeClient;

/// Counters reported by `/api/stats`.
#[derive(Clone, Debug, Serialize)]
pub struct Stats {
    pub messages_received: u64,
    pub messages_sent: u64,
    pub errors: u64,
    pub started_at: NaiveDateTime,
}

impl Stats {
    pub fn new(started_at: NaiveDateTime) -> Self {
        Self {
            messages_received: 0,
            messages_sent: 0,
            errors: 0,
            started_at,
        }
    }
}

const MAX_RECENT_MESSAGES: usize = 100;
const MAX_OUTGOING_PREVIEW: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

#[derive(Clone, Debug, Serialize)]
pub struct RecentMessage {
    pub timestamp: NaiveDateTime,
    pub sender: String,
    pub chat_id: String,
    pub message: String,
    pub direction: Direction,
}

/// Rolling log of the last messages exchanged with customers, oldest
/// first.
#[derive(Debug, Default)]
pub struct RecentMessages {
    messages: VecDeque<RecentMessage>,
}

impl RecentMessages {
    pub fn incoming(&mut self, timestamp: NaiveDateTime, sender: &str, chat_id: &str, text: &str) {
        self.push(RecentMessage {
            timestamp,
            sender: sender.to_string(),
            chat_id: chat_id.to_string(),
            message: text.to_string(),
            direction: Direction::Incoming,
        });
    }

    /// Long replies are cut to a preview.
    pub fn outgoing(&mut self, timestamp: NaiveDateTime, chat_id: &str, text: &str) {
        let message = if text.chars().count() > MAX_OUTGOING_PREVIEW {
            format!(
                "{}...",
                text.chars().take(MAX_OUTGOING_PREVIEW).collect::<String>()
            )
        } else {
            text.to_string()
        };
        self.push(RecentMessage {
            timestamp,
            sender: String::from("🤖 Bot"),
            chat_id: chat_id.to_string(),
            message,
            direction: Direction::Outgoing,
        });
    }

    fn push(&mut self, message: RecentMessage) {
        if self.messages.len() == MAX_RECENT_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn to_vec(&self) -> Vec<RecentMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub assistant: Arc<Assistant>,
    pub bridge: BridgeClient,
    pub stats: Stats,
    pub recent_messages: RecentMessages,
}

impl AppState {
    pub fn new(config: AppConfig, assistant: Arc<Assistant>) -> Self {
        let bridge = BridgeClient::new(&config.bridge_url);
        let stats = Stats::new(assistant.now());
        Self {
            config,
            assistant,
            bridge,
            stats,
            recent_messages: RecentMessages::default(),
        }
    }

    /// Builds the assistant and its ledger, loading stored orders when
    /// a database path is configured.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let ledger = match &config.db_path {
            Some(path) => OrderLedger::open(path).await?,
            None => OrderLedger::in_memory(),
        };
        let assistant = Assistant::from_config(&config, Arc::new(ledger));
        Ok(Self::new(config, Arc::new(assistant)))
    }
}

pub fn read_state(state: &RwLock<AppState>) -> Result<RwLockReadGuard<'_, AppState>> {
    state
        .read()
        .map_err(|_| anyhow!("Unable to read shared state"))
}

pub fn write_state(state: &RwLock<AppState>) -> Result<RwLockWriteGuard<'_, AppState>> {
    state
        .write()
        .map_err(|_| anyhow!("Unable to write shared state"))
}
