//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{Router, body::Body, response::Response};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use orderbot::ai::chat::{Assistant, Clock, RetryPolicy};
use orderbot::api::AppState;
use orderbot::api::app;
use orderbot::core::AppConfig;
use orderbot::core::config::DeliveryConfig;
use orderbot::openai::OpenAiClient;
use orderbot::orders::{
    DeliveryType, ExtractedOrder, NewOrder, OrderLedger, PaymentMethod,
};
use orderbot::restaurant::{RestaurantInfo, WeeklySchedule};

pub const IGNORED_CONTACT: &str = "5219220000000";

/// A Tuesday at 7pm, inside opening hours.
pub fn tuesday_evening() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 20)
        .unwrap()
        .and_hms_opt(19, 0, 0)
        .unwrap()
}

pub fn fixed_clock(now: NaiveDateTime) -> Clock {
    Arc::new(move || now)
}

/// Configuration that never reaches the network: no model, no maps
/// and auto reply turned off.
pub fn test_config() -> AppConfig {
    AppConfig {
        restaurant: RestaurantInfo::default(),
        schedule: WeeklySchedule::default(),
        utc_offset_hours: -6,
        llm_api_hostname: String::from("http://localhost:1"),
        llm_api_key: None,
        llm_model: String::from("gpt-4.1-mini"),
        llm_temperature: 0.7,
        llm_max_tokens: 1000,
        llm_retry_base: Duration::from_millis(1),
        maps_api_hostname: String::from("http://localhost:1"),
        maps_api_key: None,
        delivery: DeliveryConfig::default(),
        max_history_per_chat: 20,
        bridge_url: String::from("http://localhost:1"),
        auto_reply: false,
        ignored_contacts: vec![String::from(IGNORED_CONTACT)],
        db_path: None,
    }
}

/// Keyword only assistant with a fixed clock.
pub fn test_assistant() -> Arc<Assistant> {
    Arc::new(
        Assistant::new(Arc::new(OrderLedger::in_memory())).with_clock(fixed_clock(tuesday_evening())),
    )
}

/// Assistant whose language model is served from `llm_url`.
pub fn test_assistant_with_llm(llm_url: &str) -> Arc<Assistant> {
    Arc::new(
        Assistant::new(Arc::new(OrderLedger::in_memory()))
            .with_clock(fixed_clock(tuesday_evening()))
            .with_llm(Arc::new(OpenAiClient::new(llm_url, "test-api-key", "gpt-4.1-mini")))
            .with_retry(RetryPolicy {
                max_attempts: 3,
                base_delay: Duration::from_millis(1),
            }),
    )
}

pub fn test_app_with(config: AppConfig, assistant: Arc<Assistant>) -> Router {
    let app_state = AppState::new(config, assistant);
    app(Arc::new(RwLock::new(app_state)))
}

/// Creates a test application router that only uses the keyword
/// responder.
pub fn test_app() -> Router {
    test_app_with(test_config(), test_assistant())
}

pub async fn body_to_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn sample_order(conversation_id: &str) -> NewOrder {
    NewOrder {
        conversation_id: conversation_id.to_string(),
        customer_name: String::from("Ana"),
        created_at: tuesday_evening(),
        confirmation_text: String::from("¡Listo, *Ana*, tu pedido queda confirmado! ✅"),
        details: ExtractedOrder {
            items_breakdown: String::from("• 1 Sencilla — $90\n──────\nTotal: $90"),
            transcript: vec![
                String::from("Cliente: una sencilla"),
                String::from("Bot: ¡Listo, *Ana*, tu pedido queda confirmado! ✅"),
            ],
            payment_method: PaymentMethod::Cash,
            delivery_type: DeliveryType::Pickup,
            delivery_address: String::new(),
        },
    }
}

pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
