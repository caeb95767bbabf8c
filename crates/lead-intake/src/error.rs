use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::delivery::DeliveryError;
use crate::workflows::funnel::{FunnelError, PropertyDetailError};
use crate::workflows::handoff::HandoffError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Delivery(DeliveryError),
    Handoff(HandoffError),
    Funnel(FunnelError),
    PropertyDetails(PropertyDetailError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid lead json: {}", err),
            AppError::Delivery(err) => write!(f, "delivery error: {}", err),
            AppError::Handoff(err) => write!(f, "draft handoff error: {}", err),
            AppError::Funnel(err) => write!(f, "funnel refused: {}", err),
            AppError::PropertyDetails(err) => write!(f, "property details refused: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Delivery(err) => Some(err),
            AppError::Handoff(err) => Some(err),
            AppError::Funnel(err) => Some(err),
            AppError::PropertyDetails(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Delivery(_) => StatusCode::BAD_GATEWAY,
            AppError::Funnel(_) | AppError::PropertyDetails(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Handoff(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DeliveryError> for AppError {
    fn from(value: DeliveryError) -> Self {
        Self::Delivery(value)
    }
}

impl From<HandoffError> for AppError {
    fn from(value: HandoffError) -> Self {
        Self::Handoff(value)
    }
}

impl From<FunnelError> for AppError {
    fn from(value: FunnelError) -> Self {
        Self::Funnel(value)
    }
}

impl From<PropertyDetailError> for AppError {
    fn from(value: PropertyDetailError) -> Self {
        Self::PropertyDetails(value)
    }
}
