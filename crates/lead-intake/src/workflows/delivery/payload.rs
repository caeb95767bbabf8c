use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Source tag applied when a caller does not identify its funnel.
pub const DEFAULT_SOURCE: &str = "multi-step-form";

/// Every key accepted by the lead submission endpoint, in wire order.
pub const RECOGNIZED_FIELDS: [&str; 19] = [
    "name",
    "email",
    "phone",
    "address",
    "reason",
    "condition",
    "timeline",
    "message",
    "source",
    "page_url",
    "bedrooms",
    "bathrooms",
    "sqft",
    "year_built",
    "garage",
    "occupied",
    "mortgage_balance",
    "asking_price",
    "additional_notes",
];

/// Flat lead body posted by the intake forms.
///
/// Every field is a string. Missing, `null`, or non-string JSON values are accepted and
/// coerced so the shape stays stable for the receiving CRM; serialization always emits
/// every key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadSubmission {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reason: String,
    #[serde(deserialize_with = "lenient_string")]
    pub condition: String,
    #[serde(deserialize_with = "lenient_string")]
    pub timeline: String,
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(deserialize_with = "lenient_string")]
    pub source: String,
    #[serde(deserialize_with = "lenient_string")]
    pub page_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bedrooms: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bathrooms: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sqft: String,
    #[serde(deserialize_with = "lenient_string")]
    pub year_built: String,
    #[serde(deserialize_with = "lenient_string")]
    pub garage: String,
    #[serde(deserialize_with = "lenient_string")]
    pub occupied: String,
    #[serde(deserialize_with = "lenient_string")]
    pub mortgage_balance: String,
    #[serde(deserialize_with = "lenient_string")]
    pub asking_price: String,
    #[serde(deserialize_with = "lenient_string")]
    pub additional_notes: String,
}

impl LeadSubmission {
    /// Build the webhook body, defaulting the source tag and stamping receipt time.
    pub fn normalize(self, received_at: DateTime<Utc>) -> WebhookPayload {
        let source = if self.source.trim().is_empty() {
            DEFAULT_SOURCE.to_string()
        } else {
            self.source
        };

        WebhookPayload {
            lead: LeadSubmission { source, ..self },
            received_at: received_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Normalized body forwarded to the CRM webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(flatten)]
    pub lead: LeadSubmission,
    pub received_at: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
    })
}
