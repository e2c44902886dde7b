//! Rule based reconstruction of an order from a conversation. The bot
//! never builds a structured order while talking, so once it confirms
//! one the details are recovered from the transcript. Rules are
//! checked in order and the first match wins.

use crate::ai::chat::{Turn, TurnRole};

use super::models::{DeliveryType, ExtractedOrder, PaymentMethod};

/// Phrases the bot uses when it finalizes an order.
pub const CONFIRMATION_PHRASES: &[&str] = &[
    "pedido queda confirmado",
    "pedido confirmado",
    "queda confirmado",
    "pedido está confirmado",
    "pedido esta confirmado",
    "orden confirmada",
    "orden queda confirmada",
    "confirmado tu pedido",
    "confirmamos tu pedido",
];

const PAYMENT_QUESTIONS: &[&str] = &["cuánto pagas", "como vas a pagar", "cómo vas a pagar"];

const BREAKDOWN_WINDOW: usize = 20;
const PAYMENT_WINDOW: usize = 15;
const DELIVERY_WINDOW: usize = 15;

const TRANSFER_WORDS: &[&str] = &["transferencia", "transf", "transfiero"];
const CASH_WORDS: &[&str] = &["efectivo", "cash", "en efectivo"];
const PICKUP_WORDS: &[&str] = &["recoger", "paso por", "recojo", "voy por", "en tienda"];
const DELIVERY_WORDS: &[&str] = &[
    "envío",
    "envio",
    "domicilio",
    "envíame",
    "envíen",
    "mándame",
    "mandame",
    "manden",
];
const ADDRESS_WORDS: &[&str] = &[
    "col ", "col.", "colonia", "calle ", "av ", "avenida", "fracc", "#", "núm", "num",
];

const BULLET: &str = "•";
const RULE: &str = "─";

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn recent(turns: &[Turn], window: usize) -> &[Turn] {
    &turns[turns.len().saturating_sub(window)..]
}

/// Case-insensitive check for any confirmation phrase in `reply`.
pub fn is_order_confirmed(reply: &str) -> bool {
    contains_any(&reply.to_lowercase(), CONFIRMATION_PHRASES)
}

/// Most recent bot message that looks like the itemized order with
/// its total, skipping the confirmation itself and bare payment
/// questions. Empty when nothing qualifies.
pub fn find_breakdown(turns: &[Turn]) -> String {
    let candidates: Vec<&Turn> = recent(turns, BREAKDOWN_WINDOW)
        .iter()
        .rev()
        .filter(|t| t.role == TurnRole::Assistant)
        .collect();

    let with_total = candidates.iter().find(|turn| {
        let text = &turn.text;
        let lower = text.to_lowercase();
        if is_order_confirmed(text) {
            return false;
        }
        if contains_any(&lower, PAYMENT_QUESTIONS) && !text.contains(BULLET) {
            return false;
        }
        let has_total = lower.contains("total") && text.contains('$');
        has_total && (text.contains(BULLET) || text.contains(RULE))
    });
    if let Some(turn) = with_total {
        return turn.text.clone();
    }

    candidates
        .iter()
        .find(|turn| {
            let text = &turn.text;
            if is_order_confirmed(text) {
                return false;
            }
            if text.to_lowercase().contains("cuánto pagas") && !text.contains(BULLET) {
                return false;
            }
            text.contains(BULLET) && text.contains('$')
        })
        .map(|turn| turn.text.clone())
        .unwrap_or_default()
}

/// What the customer said they'd pay with, or failing that what the
/// bot's payment instructions imply.
pub fn find_payment_method(turns: &[Turn]) -> PaymentMethod {
    for turn in recent(turns, PAYMENT_WINDOW).iter().rev() {
        let lower = turn.text.to_lowercase();
        match turn.role {
            TurnRole::User => {
                if contains_any(&lower, TRANSFER_WORDS) {
                    return PaymentMethod::Transfer;
                }
                if contains_any(&lower, CASH_WORDS) {
                    return PaymentMethod::Cash;
                }
            }
            TurnRole::Assistant => {
                if (lower.contains("clabe") || lower.contains("comprobante"))
                    && lower.contains("transferencia")
                {
                    return PaymentMethod::Transfer;
                }
                if lower.contains("cambio") && lower.contains("efectivo") {
                    return PaymentMethod::Cash;
                }
            }
        }
    }
    PaymentMethod::Unspecified
}

/// Pickup or delivery, plus the address the customer typed if any.
/// The address is captured whichever way the type resolves.
pub fn find_delivery(turns: &[Turn]) -> (DeliveryType, String) {
    let mut delivery_type = DeliveryType::Unspecified;
    let mut address = String::new();

    for turn in recent(turns, DELIVERY_WINDOW).iter().rev() {
        let text = turn.visible_text();
        let lower = text.to_lowercase();

        if delivery_type == DeliveryType::Unspecified {
            if contains_any(&lower, PICKUP_WORDS) {
                delivery_type = DeliveryType::Pickup;
            } else if contains_any(&lower, DELIVERY_WORDS) {
                delivery_type = DeliveryType::Delivery;
            }
        }

        if turn.role == TurnRole::User
            && address.is_empty()
            && contains_any(&lower, ADDRESS_WORDS)
            && text.chars().count() > 5
        {
            address = text.to_string();
        }
    }

    (delivery_type, address)
}

/// `Cliente: ...` and `Bot: ...` lines for the recent window, with
/// hidden context removed and empty turns skipped.
pub fn transcript_excerpt(turns: &[Turn]) -> Vec<String> {
    recent(turns, BREAKDOWN_WINDOW)
        .iter()
        .filter_map(|turn| {
            let text = turn.visible_text();
            if text.is_empty() {
                None
            } else {
                Some(format!("{}: {}", turn.role.label(), text))
            }
        })
        .collect()
}

/// Never fails; missing details stay at their defaults.
pub fn extract_order(turns: &[Turn]) -> ExtractedOrder {
    let (delivery_type, delivery_address) = find_delivery(turns);
    ExtractedOrder {
        items_breakdown: find_breakdown(turns),
        transcript: transcript_excerpt(turns),
        payment_method: find_payment_method(turns),
        delivery_type,
        delivery_address,
    }
}
