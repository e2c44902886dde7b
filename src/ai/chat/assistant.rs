//! Turns an inbound customer message into a reply. Conversation state
//! is updated as a side effect and confirmed orders are recorded in
//! the ledger. Nothing in here fails outward: every error ends in a
//! retry, a fallback reply or a placeholder field.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use handlebars::Handlebars;

use crate::ai::llm::{CompletionOptions, LanguageModel, LlmError};
use crate::ai::prompt;
use crate::core::AppConfig;
use crate::core::config::DeliveryConfig;
use crate::delivery::{DeliveryPricing, DistanceMatrixClient, NoDelivery};
use crate::openai::OpenAiClient;
use crate::orders::{
    ConfirmedOrder, NewOrder, OrderLedger, OrderStatus, extract_order, is_order_confirmed,
};
use crate::restaurant::{RestaurantInfo, WeeklySchedule, local_now};

use super::context;
use super::fallback::fallback_reply;
use super::models::{Turn, TurnRole};
use super::store::ConversationStore;

/// Source of the restaurant's local wall-clock time.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// How rate limited completions are retried. A rate limit on attempt
/// `n` waits `base_delay * n`, the last attempt included.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

pub struct Assistant {
    llm: Option<Arc<dyn LanguageModel>>,
    delivery: Arc<dyn DeliveryPricing>,
    conversations: ConversationStore,
    ledger: Arc<OrderLedger>,
    restaurant: RestaurantInfo,
    schedule: WeeklySchedule,
    delivery_config: DeliveryConfig,
    options: CompletionOptions,
    retry: RetryPolicy,
    templates: Handlebars<'static>,
    clock: Clock,
}

impl Assistant {
    /// An assistant with default restaurant data, no language model
    /// and no delivery pricing.
    pub fn new(ledger: Arc<OrderLedger>) -> Self {
        Self {
            llm: None,
            delivery: Arc::new(NoDelivery),
            conversations: ConversationStore::new(20),
            ledger,
            restaurant: RestaurantInfo::default(),
            schedule: WeeklySchedule::default(),
            delivery_config: DeliveryConfig::default(),
            options: CompletionOptions::default(),
            retry: RetryPolicy::default(),
            templates: prompt::templates(),
            clock: Arc::new(|| local_now(-6)),
        }
    }

    pub fn from_config(config: &AppConfig, ledger: Arc<OrderLedger>) -> Self {
        let llm: Option<Arc<dyn LanguageModel>> = match &config.llm_api_key {
            Some(key) => {
                tracing::info!("Using language model {}", config.llm_model);
                Some(Arc::new(OpenAiClient::new(
                    &config.llm_api_hostname,
                    key,
                    &config.llm_model,
                )))
            }
            None => {
                tracing::warn!("No language model API key configured, replies will use keywords only");
                None
            }
        };

        let delivery: Arc<dyn DeliveryPricing> = match &config.maps_api_key {
            Some(key) => Arc::new(DistanceMatrixClient::new(
                &config.maps_api_hostname,
                key,
                &config.restaurant.origin(&config.delivery.region),
                config.delivery.clone(),
            )),
            None => {
                tracing::warn!("No maps API key configured, delivery fees won't be calculated");
                Arc::new(NoDelivery)
            }
        };

        let utc_offset_hours = config.utc_offset_hours;
        Self {
            llm,
            delivery,
            conversations: ConversationStore::new(config.max_history_per_chat),
            ledger,
            restaurant: config.restaurant.clone(),
            schedule: config.schedule.clone(),
            delivery_config: config.delivery.clone(),
            options: CompletionOptions {
                temperature: config.llm_temperature,
                max_tokens: config.llm_max_tokens,
            },
            retry: RetryPolicy {
                max_attempts: 3,
                base_delay: config.llm_retry_base,
            },
            templates: prompt::templates(),
            clock: Arc::new(move || local_now(utc_offset_hours)),
        }
    }

    pub fn with_llm(mut self, llm: Arc<dyn LanguageModel>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn with_delivery(mut self, delivery: Arc<dyn DeliveryPricing>) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_history(mut self, max_turns: usize) -> Self {
        self.conversations = ConversationStore::new(max_turns);
        self
    }

    pub fn restaurant(&self) -> &RestaurantInfo {
        &self.restaurant
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    pub fn ledger(&self) -> &Arc<OrderLedger> {
        &self.ledger
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    fn fallback(&self, text: &str) -> String {
        fallback_reply(text, self.now(), &self.restaurant, &self.schedule)
    }

    /// Reply to one inbound message. Always produces a reply.
    pub async fn handle_inbound_message(
        &self,
        conversation_id: &str,
        text: &str,
        sender_id: &str,
        display_name: &str,
    ) -> String {
        let Some(llm) = self.llm.as_ref() else {
            return self.fallback(text);
        };

        tracing::debug!("Message from {} in {}", sender_id, conversation_id);

        let transcript = self.conversations.get_or_create(conversation_id);
        let last_assistant_text = transcript
            .lock()
            .await
            .last_assistant_text()
            .map(str::to_string);

        // Gateway calls happen without holding the conversation lock
        let mut enriched = text.to_string();
        if context::looks_like_address(text, last_assistant_text.as_deref()) {
            let quote = self.delivery.quote(text).await;
            if let Err(e) = &quote {
                tracing::warn!("Delivery quote for {} failed: {}", conversation_id, e);
            }
            if let Some(fragment) = context::delivery_fragment(text, &quote) {
                enriched.push_str(&fragment);
            }
        }

        let now = self.now();
        let status = self.schedule.status_at(now);
        if let Some(fragment) = context::closed_fragment(now, &status) {
            enriched.push_str(&fragment);
        }

        let turns = {
            let mut transcript = transcript.lock().await;
            transcript.push(Turn::new(TurnRole::User, &enriched, now));
            transcript.turns().to_vec()
        };

        let reply = match self.complete_with_retry(llm.as_ref(), &turns).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Falling back to keyword reply for {}: {}", conversation_id, e);
                return self.fallback(text);
            }
        };

        let confirmed_turns = {
            let mut transcript = transcript.lock().await;
            transcript.push(Turn::new(TurnRole::Assistant, &reply, self.now()));
            is_order_confirmed(&reply).then(|| transcript.turns().to_vec())
        };

        if let Some(turns) = confirmed_turns {
            self.record_order(conversation_id, display_name, &reply, &turns)
                .await;
        }

        reply
    }

    async fn complete_with_retry(
        &self,
        llm: &dyn LanguageModel,
        turns: &[Turn],
    ) -> Result<String, LlmError> {
        for attempt in 1..=self.retry.max_attempts {
            // Rebuilt each attempt since it embeds the current time
            let instruction = prompt::system_instruction(
                &self.templates,
                &self.restaurant,
                &self.schedule,
                &self.delivery_config,
                self.now(),
            )
            .map_err(|e| LlmError::Instruction(e.to_string()))?;

            match llm.complete(turns, &instruction, &self.options).await {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_rate_limited() => {
                    let delay = self.retry.delay_after(attempt);
                    tracing::warn!(
                        "Rate limited, waiting {}s (attempt {}/{})",
                        delay.as_secs(),
                        attempt,
                        self.retry.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
        tracing::error!("Rate limit retries exhausted");
        Err(LlmError::RateLimited)
    }

    async fn record_order(
        &self,
        conversation_id: &str,
        display_name: &str,
        confirmation_text: &str,
        turns: &[Turn],
    ) -> ConfirmedOrder {
        let details = extract_order(turns);
        if details.items_breakdown.is_empty() {
            tracing::warn!(
                "Order for {} confirmed without an itemized breakdown",
                conversation_id
            );
        }
        let customer_name = match display_name.trim() {
            "" => String::from("Cliente"),
            name => name.to_string(),
        };
        self.ledger
            .record(NewOrder {
                conversation_id: conversation_id.to_string(),
                customer_name,
                created_at: self.now(),
                confirmation_text: confirmation_text.to_string(),
                details,
            })
            .await
    }

    /// Returns `false` if the conversation didn't exist.
    pub fn clear_conversation(&self, conversation_id: &str) -> bool {
        let cleared = self.conversations.clear(conversation_id);
        tracing::info!("Cleared history for {}", conversation_id);
        cleared
    }

    pub fn clear_all_conversations(&self) -> usize {
        let count = self.conversations.clear_all();
        tracing::info!("Cleared {} conversations", count);
        count
    }

    pub fn list_confirmed_orders(&self) -> Vec<ConfirmedOrder> {
        self.ledger.list_all()
    }

    pub fn list_new_orders_since(&self, since: u64) -> Vec<ConfirmedOrder> {
        self.ledger.list_since(since)
    }

    pub async fn update_order_status(&self, order_id: u64, status: OrderStatus) -> bool {
        self.ledger.update_status(order_id, status).await
    }
}
