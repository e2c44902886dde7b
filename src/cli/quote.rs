use anyhow::{Result, anyhow};

use crate::core::AppConfig;
use crate::delivery::{DeliveryPricing, DistanceMatrixClient};

pub async fn run(destination: &str) -> Result<()> {
    super::init_tracing(&format!("{}=info", env!("CARGO_CRATE_NAME")));

    let config = AppConfig::default();
    let api_key = config
        .maps_api_key
        .as_deref()
        .ok_or_else(|| anyhow!("ORDERBOT_MAPS_API_KEY is not set"))?;
    let client = DistanceMatrixClient::new(
        &config.maps_api_hostname,
        api_key,
        &config.restaurant.origin(&config.delivery.region),
        config.delivery.clone(),
    );

    let quote = client.quote(destination).await?;
    println!(
        "{}: {} ({} km), {}, envío ${:.0} MXN",
        destination, quote.distance_text, quote.distance_km, quote.duration_text, quote.fee
    );
    Ok(())
}
