use async_trait::async_trait;
use serde::Deserialize;

use super::{DeliveryError, DeliveryPricing, DeliveryQuote, compute_fee, qualify_destination};
use crate::core::config::DeliveryConfig;

// {
//   "status": "OK",
//   "rows": [{
//     "elements": [{
//       "status": "OK",
//       "distance": {"text": "3,2 km", "value": 3200},
//       "duration": {"text": "9 min", "value": 540}
//     }]
//   }]
// }
#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
    value: f64,
}

/// Driving distance from the restaurant using the Google Distance
/// Matrix API.
pub struct DistanceMatrixClient {
    api_hostname: String,
    api_key: String,
    origin: String,
    config: DeliveryConfig,
    client: reqwest::Client,
}

impl DistanceMatrixClient {
    pub fn new(api_hostname: &str, api_key: &str, origin: &str, config: DeliveryConfig) -> Self {
        Self {
            api_hostname: api_hostname.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            origin: origin.to_string(),
            config,
            client: reqwest::Client::new(),
        }
    }

    fn quote_from_element(&self, element: MatrixElement) -> Result<DeliveryQuote, DeliveryError> {
        if element.status != "OK" {
            return Err(DeliveryError::Unresolvable);
        }
        let (Some(distance), Some(duration)) = (element.distance, element.duration) else {
            return Err(DeliveryError::Unresolvable);
        };

        let distance_km = distance.value / 1000.0;
        let rounded_km = (distance_km * 10.0).round() / 10.0;

        if distance_km > self.config.max_km {
            return Err(DeliveryError::OutOfRange {
                distance_km: rounded_km,
                distance_text: distance.text,
                max_km: self.config.max_km,
            });
        }

        Ok(DeliveryQuote {
            distance_km: rounded_km,
            distance_text: distance.text,
            duration_text: duration.text,
            fee: compute_fee(distance_km, self.config.price_per_km, self.config.min_fee),
        })
    }
}

#[async_trait]
impl DeliveryPricing for DistanceMatrixClient {
    async fn quote(&self, destination: &str) -> Result<DeliveryQuote, DeliveryError> {
        let destination = qualify_destination(destination, &self.config);

        let mut url = reqwest::Url::parse(&format!(
            "{}/maps/api/distancematrix/json",
            self.api_hostname
        ))
        .map_err(|e| DeliveryError::Gateway(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("origins", &self.origin)
            .append_pair("destinations", &destination)
            .append_pair("mode", "driving")
            .append_pair("language", "es")
            .append_pair("units", "metric")
            .append_pair("key", &self.api_key);

        let resp: MatrixResponse = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if resp.status != "OK" {
            return Err(DeliveryError::Gateway(format!(
                "distance matrix status {}",
                resp.status
            )));
        }

        let element = resp
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or(DeliveryError::Unresolvable)?;

        self.quote_from_element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PATH: &str = "/maps/api/distancematrix/json";

    fn client(url: &str) -> DistanceMatrixClient {
        DistanceMatrixClient::new(
            url,
            "test-key",
            "Coahuila #36, Colonia Emiliano Zapata, Minatitlán, Veracruz, México",
            DeliveryConfig::default(),
        )
    }

    fn element_body(meters: u32, text: &str) -> String {
        serde_json::json!({
            "status": "OK",
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "distance": {"text": text, "value": meters},
                    "duration": {"text": "9 min", "value": 540}
                }]
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn it_quotes_a_qualified_destination() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "destinations".into(),
                    "Col. Insurgentes, Minatitlán, Veracruz, México".into(),
                ),
                Matcher::UrlEncoded("key".into(), "test-key".into()),
                Matcher::UrlEncoded("mode".into(), "driving".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(element_body(3200, "3.2 km"))
            .create_async()
            .await;

        let quote = client(&server.url()).quote("Col. Insurgentes").await.unwrap();

        mock.assert_async().await;
        assert_eq!(quote.distance_km, 3.2);
        assert_eq!(quote.distance_text, "3.2 km");
        assert_eq!(quote.duration_text, "9 min");
        assert_eq!(quote.fee, 30.0);
    }

    #[tokio::test]
    async fn it_rejects_destinations_beyond_the_radius() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(element_body(23_460, "23.5 km"))
            .create_async()
            .await;

        let err = client(&server.url()).quote("Cosoleacaque").await.unwrap_err();
        match err {
            DeliveryError::OutOfRange {
                distance_km,
                distance_text,
                max_km,
            } => {
                assert_eq!(distance_km, 23.5);
                assert_eq!(distance_text, "23.5 km");
                assert_eq!(max_km, 15.0);
            }
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn it_reports_unresolvable_addresses() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"OK","rows":[{"elements":[{"status":"NOT_FOUND"}]}]}"#)
            .create_async()
            .await;

        let err = client(&server.url()).quote("asdfgh").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Unresolvable));
    }

    #[tokio::test]
    async fn it_reports_gateway_status_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"REQUEST_DENIED","rows":[]}"#)
            .create_async()
            .await;

        let err = client(&server.url()).quote("Col. Centro").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Gateway(_)));
    }

    #[tokio::test]
    async fn it_reports_http_failures_as_gateway_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = client(&server.url()).quote("Col. Centro").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Gateway(_)));
    }
}
