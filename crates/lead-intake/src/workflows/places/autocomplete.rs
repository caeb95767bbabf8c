use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::loader::CapabilityLoader;
use crate::config::PlacesConfig;

pub const GOOGLE_AUTOCOMPLETE_URL: &str =
    "https://maps.googleapis.com/maps/api/place/autocomplete/json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacesError {
    #[error("places request failed: {0}")]
    Http(String),
    #[error("places api returned {status}: {message}")]
    Api { status: String, message: String },
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
}

/// Connected places client. Built once per process through the capability loader.
#[derive(Debug)]
pub struct PlacesClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl PlacesClient {
    fn connect(api_key: &str, endpoint: &str) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|err| PlacesError::Http(err.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
        })
    }

    async fn autocomplete(&self, input: &str) -> Result<Vec<String>, PlacesError> {
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("input", input),
                ("types", "address"),
                ("components", "country:us"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| PlacesError::Http(err.to_string()))?
            .text()
            .await
            .map_err(|err| PlacesError::Http(err.to_string()))?;

        parse_predictions(&body)
    }
}

fn parse_predictions(body: &str) -> Result<Vec<String>, PlacesError> {
    let response: AutocompleteResponse =
        serde_json::from_str(body).map_err(|err| PlacesError::Http(err.to_string()))?;

    match response.status.as_str() {
        "OK" => Ok(response
            .predictions
            .into_iter()
            .map(|prediction| prediction.description)
            .collect()),
        "ZERO_RESULTS" => Ok(Vec::new()),
        _ => Err(PlacesError::Api {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        }),
    }
}

/// Address suggestions for the funnel's first step. Without an API key the field stays
/// plain free text and no suggestions are offered.
#[derive(Debug)]
pub struct AddressSuggestions {
    api_key: Option<String>,
    endpoint: String,
    loader: CapabilityLoader<PlacesClient>,
}

impl AddressSuggestions {
    pub fn new(config: &PlacesConfig) -> Self {
        Self::with_endpoint(config, GOOGLE_AUTOCOMPLETE_URL)
    }

    pub fn with_endpoint(config: &PlacesConfig, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: config.api_key.clone(),
            endpoint: endpoint.into(),
            loader: CapabilityLoader::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn suggest(&self, input: &str) -> Result<Vec<String>, PlacesError> {
        let input = input.trim();
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = self.endpoint.as_str();
        let client = self
            .loader
            .get_or_load(|| async move { PlacesClient::connect(api_key, endpoint) })
            .await?;
        client.autocomplete(input).await
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestionQuery {
    #[serde(default)]
    input: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SuggestionResponse {
    suggestions: Vec<String>,
}

pub fn address_router(suggestions: Arc<AddressSuggestions>) -> Router {
    Router::new()
        .route("/api/address/suggestions", get(suggestions_handler))
        .with_state(suggestions)
}

/// Lookup failures degrade to an empty list; the visitor can always type the address.
pub(crate) async fn suggestions_handler(
    State(suggestions): State<Arc<AddressSuggestions>>,
    Query(query): Query<SuggestionQuery>,
) -> Json<SuggestionResponse> {
    let suggestions = match suggestions.suggest(&query.input).await {
        Ok(list) => list,
        Err(error) => {
            warn!(%error, "address autocomplete unavailable");
            Vec::new()
        }
    };
    Json(SuggestionResponse { suggestions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn parses_prediction_descriptions() {
        let body = r#"{
            "status": "OK",
            "predictions": [
                {"description": "123 Main St, Tampa, FL, USA", "place_id": "a"},
                {"description": "123 Main St, Brandon, FL, USA", "place_id": "b"}
            ]
        }"#;
        assert_eq!(
            parse_predictions(body).expect("parses"),
            vec![
                "123 Main St, Tampa, FL, USA".to_string(),
                "123 Main St, Brandon, FL, USA".to_string()
            ]
        );
    }

    #[test]
    fn zero_results_is_empty_and_denied_is_error() {
        assert_eq!(
            parse_predictions(r#"{"status":"ZERO_RESULTS","predictions":[]}"#),
            Ok(Vec::new())
        );
        assert!(matches!(
            parse_predictions(r#"{"status":"REQUEST_DENIED","error_message":"bad key"}"#),
            Err(PlacesError::Api { ref status, .. }) if status == "REQUEST_DENIED"
        ));
    }

    #[tokio::test]
    async fn disabled_autocomplete_offers_nothing() {
        let suggestions = AddressSuggestions::new(&PlacesConfig::default());
        assert!(!suggestions.is_enabled());
        assert_eq!(suggestions.suggest("123 Main").await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn suggestion_route_degrades_to_empty_list() {
        let router = address_router(Arc::new(AddressSuggestions::new(&PlacesConfig::default())));

        let response = router
            .oneshot(
                Request::get("/api/address/suggestions?input=123%20Main")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body, serde_json::json!({ "suggestions": [] }));
    }
}
