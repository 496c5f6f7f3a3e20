use serde::Deserialize;

use super::text::{TransportText, text};
use crate::domain::{ApiResponse, ReceiptNum, UnitCost};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("response contains invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// `skip_serializing_if` predicate: absent and empty strings are left out.
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Like [`is_blank`] for borrowed fields.
pub fn is_blank_ref(value: &Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

#[derive(Debug, Clone, Deserialize)]
struct ApiResponseJson {
    code: i64,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct UrlJson {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnitCostJson {
    #[serde(default)]
    unit_cost: Option<TransportText>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptJson {
    #[serde(default)]
    receipt_num: Option<TransportText>,
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBodyJson {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

pub fn decode_api_response(json: &str) -> Result<ApiResponse, TransportError> {
    let parsed: ApiResponseJson = serde_json::from_str(json)?;
    Ok(ApiResponse {
        code: parsed.code,
        message: parsed.message,
    })
}

pub fn decode_url(json: &str) -> Result<String, TransportError> {
    let parsed: UrlJson = serde_json::from_str(json)?;
    parsed
        .url
        .filter(|url| !url.is_empty())
        .ok_or(TransportError::MissingField { field: "url" })
}

pub fn decode_unit_cost(json: &str) -> Result<UnitCost, TransportError> {
    let parsed: UnitCostJson = serde_json::from_str(json)?;
    text(parsed.unit_cost)
        .map(UnitCost::from_raw)
        .ok_or(TransportError::MissingField { field: "unitCost" })
}

pub fn decode_receipt_num(json: &str) -> Result<ReceiptNum, TransportError> {
    let parsed: ReceiptJson = serde_json::from_str(json)?;
    let raw = text(parsed.receipt_num).ok_or(TransportError::MissingField {
        field: ReceiptNum::FIELD,
    })?;
    ReceiptNum::new(raw.clone()).map_err(|_| TransportError::InvalidField {
        field: ReceiptNum::FIELD,
        value: raw,
    })
}

/// Best-effort decode of an error body; anything unparsable yields an empty [`ErrorBody`].
pub fn decode_error_body(body: &str) -> ErrorBody {
    match serde_json::from_str::<ErrorBodyJson>(body) {
        Ok(parsed) => ErrorBody {
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => ErrorBody::default(),
    }
}
