use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Unspecified,
    Transfer,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Unspecified => "unspecified",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Cash => "cash",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Unspecified => "No especificado",
            PaymentMethod::Transfer => "Transferencia",
            PaymentMethod::Cash => "Efectivo",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unspecified" => Ok(PaymentMethod::Unspecified),
            "transfer" => Ok(PaymentMethod::Transfer),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(anyhow!("Unknown payment method: {}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Unspecified,
    Pickup,
    Delivery,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Unspecified => "unspecified",
            DeliveryType::Pickup => "pickup",
            DeliveryType::Delivery => "delivery",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryType::Unspecified => "No especificado",
            DeliveryType::Pickup => "Recoger en tienda",
            DeliveryType::Delivery => "Envío a domicilio",
        }
    }
}

impl FromStr for DeliveryType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unspecified" => Ok(DeliveryType::Unspecified),
            "pickup" => Ok(DeliveryType::Pickup),
            "delivery" => Ok(DeliveryType::Delivery),
            other => Err(anyhow!("Unknown delivery type: {}", other)),
        }
    }
}

/// Orders only move between states when staff update them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "nuevo")]
    New,
    #[serde(alias = "preparando")]
    Preparing,
    #[serde(alias = "listo")]
    Ready,
    #[serde(alias = "entregado")]
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" | "nuevo" => Ok(OrderStatus::New),
            "preparing" | "preparando" => Ok(OrderStatus::Preparing),
            "ready" | "listo" => Ok(OrderStatus::Ready),
            "delivered" | "entregado" => Ok(OrderStatus::Delivered),
            other => Err(anyhow!("Unknown order status: {}", other)),
        }
    }
}

/// Fields reconstructed from a conversation once the bot confirms an
/// order. Anything that couldn't be found is left at its default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedOrder {
    pub items_breakdown: String,
    pub transcript: Vec<String>,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    pub delivery_address: String,
}

/// Everything needed to record an order except its id and status,
/// which the ledger assigns.
#[derive(Clone, Debug)]
pub struct NewOrder {
    pub conversation_id: String,
    pub customer_name: String,
    pub created_at: NaiveDateTime,
    pub confirmation_text: String,
    pub details: ExtractedOrder,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedOrder {
    pub id: u64,
    pub conversation_id: String,
    pub customer_name: String,
    pub created_at: NaiveDateTime,
    pub items_breakdown: String,
    pub confirmation_text: String,
    pub transcript: Vec<String>,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    pub delivery_address: String,
    pub status: OrderStatus,
}

impl ConfirmedOrder {
    pub fn from_new(id: u64, order: NewOrder) -> Self {
        let NewOrder {
            conversation_id,
            customer_name,
            created_at,
            confirmation_text,
            details,
        } = order;
        Self {
            id,
            conversation_id,
            customer_name,
            created_at,
            items_breakdown: details.items_breakdown,
            confirmation_text,
            transcript: details.transcript,
            payment_method: details.payment_method,
            delivery_type: details.delivery_type,
            delivery_address: details.delivery_address,
            status: OrderStatus::New,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_status_in_english_and_spanish() {
        assert_eq!("preparing".parse::<OrderStatus>().unwrap(), OrderStatus::Preparing);
        assert_eq!("Listo".parse::<OrderStatus>().unwrap(), OrderStatus::Ready);
        assert_eq!("entregado".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert!("cancelado".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn it_serializes_enums_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::New).unwrap(), "\"new\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Transfer).unwrap(),
            "\"transfer\""
        );
        let status: OrderStatus = serde_json::from_str("\"nuevo\"").unwrap();
        assert_eq!(status, OrderStatus::New);
    }
}
