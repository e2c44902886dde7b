//! Delivery pricing. A destination typed by the customer is turned
//! into a driving distance by the distance matrix API and priced per
//! kilometer.

mod distance_matrix;
pub use distance_matrix::DistanceMatrixClient;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::core::config::DeliveryConfig;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeliveryQuote {
    pub distance_km: f64,
    pub distance_text: String,
    pub duration_text: String,
    pub fee: f64,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Delivery pricing is not configured")]
    Unavailable,

    #[error("Address could not be resolved")]
    Unresolvable,

    #[error("Destination is {distance_text} away, outside the {max_km} km delivery radius")]
    OutOfRange {
        distance_km: f64,
        distance_text: String,
        max_km: f64,
    },

    #[error("Distance service error: {0}")]
    Gateway(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Gateway(err.to_string())
    }
}

#[async_trait]
pub trait DeliveryPricing: Send + Sync {
    async fn quote(&self, destination: &str) -> Result<DeliveryQuote, DeliveryError>;
}

/// Used when no maps credentials are configured.
pub struct NoDelivery;

#[async_trait]
impl DeliveryPricing for NoDelivery {
    async fn quote(&self, _destination: &str) -> Result<DeliveryQuote, DeliveryError> {
        Err(DeliveryError::Unavailable)
    }
}

/// Fee for a trip of `distance_km`: the per-kilometer price with a
/// floor of `min_fee`, rounded to the nearest multiple of 5.
pub fn compute_fee(distance_km: f64, price_per_km: f64, min_fee: f64) -> f64 {
    let raw = (distance_km * price_per_km).max(min_fee);
    let rounded = (raw / 5.0).round_ties_even() * 5.0;
    rounded.max(min_fee)
}

/// Appends the delivery region to destinations that don't already
/// name it so that bare neighborhood names resolve locally.
pub fn qualify_destination(destination: &str, config: &DeliveryConfig) -> String {
    let dest = destination.trim();
    let lower = dest.to_lowercase();
    if config.region_markers.iter().any(|m| lower.contains(m.as_str())) {
        dest.to_string()
    } else {
        format!("{}, {}", dest, config.region)
    }
}

/// Pricing rules as they are explained to the language model.
pub fn describe_for_prompt(config: &DeliveryConfig, origin: &str) -> String {
    let example_raw = 3.2 * config.price_per_km;
    let example_fee = compute_fee(3.2, config.price_per_km, config.min_fee);
    format!(
        "SERVICIO DE ENVÍO A DOMICILIO 🛵:
- Tarifa: ${rate:.0} MXN por kilómetro
- Costo mínimo de envío: ${min:.0} MXN
- Zona de cobertura: hasta {max:.0} km desde el restaurante
- Ubicación del restaurante: {origin}
- El costo se redondea al múltiplo de $5 más cercano

CÓMO FUNCIONA EL CÁLCULO:
- Cuando el cliente quiera envío a domicilio, PRIMERO pregunta la colonia o dirección
- El sistema calculará automáticamente la distancia y el costo
- Ejemplo: si la distancia es 3.2 km → 3.2 × ${rate:.0} = ${example_raw:.0} → Se redondea a ${example_fee:.0} MXN de envío
- Ejemplo: si la distancia es 1 km → 1 × ${rate:.0} = ${rate:.0} → Como es menor al mínimo, se cobra ${min:.0} MXN

IMPORTANTE SOBRE DELIVERY:
- Muestra el costo de envío separado del pedido
- El TOTAL FINAL = Total del pedido + Costo de envío
- Si la distancia excede {max:.0} km, indica que está fuera de la zona de entrega",
        rate = config.price_per_km,
        min = config.min_fee,
        max = config.max_km,
        origin = origin,
        example_raw = example_raw,
        example_fee = example_fee,
    )
}
