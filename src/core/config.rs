use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::restaurant::{RestaurantInfo, WeeklySchedule};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub restaurant: RestaurantInfo,
    pub schedule: WeeklySchedule,
    pub utc_offset_hours: i32,
    pub llm_api_hostname: String,
    // No key means no language model, only the keyword responder
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub llm_retry_base: Duration,
    pub maps_api_hostname: String,
    pub maps_api_key: Option<String>,
    pub delivery: DeliveryConfig,
    pub max_history_per_chat: usize,
    pub bridge_url: String,
    pub auto_reply: bool,
    pub ignored_contacts: Vec<String>,
    pub db_path: Option<String>,
}

/// Pricing and coverage rules for home delivery.
#[derive(Clone, Debug)]
pub struct DeliveryConfig {
    pub price_per_km: f64,
    pub min_fee: f64,
    pub max_km: f64,
    pub region: String,
    pub region_markers: Vec<String>,
    pub timeout: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            price_per_km: 9.0,
            min_fee: 15.0,
            max_km: 15.0,
            region: String::from("Minatitlán, Veracruz, México"),
            region_markers: vec![
                String::from("minatitlán"),
                String::from("minatitlan"),
                String::from("veracruz"),
            ],
            timeout: Duration::from_secs(10),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(val) => val.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid value for {}: {}", name, val);
            default
        }),
        Err(_) => default,
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn list_var(name: &str) -> Option<Vec<String>> {
    non_empty_var(name).map(|v| {
        v.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

impl Default for AppConfig {
    fn default() -> Self {
        let defaults = DeliveryConfig::default();
        let delivery = DeliveryConfig {
            price_per_km: parse_var("ORDERBOT_DELIVERY_PRICE_PER_KM", defaults.price_per_km),
            min_fee: parse_var("ORDERBOT_DELIVERY_MIN_FEE", defaults.min_fee),
            max_km: parse_var("ORDERBOT_DELIVERY_MAX_KM", defaults.max_km),
            region: non_empty_var("ORDERBOT_DELIVERY_REGION").unwrap_or(defaults.region),
            region_markers: list_var("ORDERBOT_DELIVERY_REGION_MARKERS")
                .map(|markers| markers.iter().map(|m| m.to_lowercase()).collect())
                .unwrap_or(defaults.region_markers),
            timeout: Duration::from_secs(parse_var("ORDERBOT_DELIVERY_TIMEOUT_SECS", 10)),
        };

        let llm_api_hostname = env::var("ORDERBOT_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let llm_api_key =
            non_empty_var("ORDERBOT_LLM_API_KEY").or_else(|| non_empty_var("OPENAI_API_KEY"));
        let llm_model =
            env::var("ORDERBOT_LLM_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());
        let maps_api_hostname = env::var("ORDERBOT_MAPS_HOST")
            .unwrap_or_else(|_| "https://maps.googleapis.com".to_string());
        let bridge_url =
            env::var("ORDERBOT_BRIDGE_URL").unwrap_or_else(|_| "http://127.0.0.1:3001".to_string());

        Self {
            restaurant: RestaurantInfo::default(),
            schedule: WeeklySchedule::default(),
            utc_offset_hours: parse_var("ORDERBOT_UTC_OFFSET_HOURS", -6),
            llm_api_hostname,
            llm_api_key,
            llm_model,
            llm_temperature: parse_var("ORDERBOT_LLM_TEMPERATURE", 0.7),
            llm_max_tokens: parse_var("ORDERBOT_LLM_MAX_TOKENS", 1000),
            llm_retry_base: Duration::from_secs(parse_var("ORDERBOT_LLM_RETRY_BASE_SECS", 30)),
            maps_api_hostname,
            maps_api_key: non_empty_var("ORDERBOT_MAPS_API_KEY"),
            delivery,
            max_history_per_chat: parse_var("ORDERBOT_MAX_HISTORY", 20),
            bridge_url,
            auto_reply: parse_var("ORDERBOT_AUTO_REPLY", true),
            ignored_contacts: list_var("ORDERBOT_IGNORED_CONTACTS").unwrap_or_default(),
            db_path: non_empty_var("ORDERBOT_DB_PATH"),
        }
    }
}
