// src/api/parser.rs
//! Turns raw API bodies into typed envelopes.
//!
//! Classification happens here and only here: a non-2xx status is an HTTP
//! error, an `error` object is an API error whatever else the body holds,
//! and a body that is none of query/parse/compare is malformed.

use super::client::ApiResponse;
use super::responses::{Envelope, MwCompare, MwError, MwParse, MwQuery};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{ApiErrorCode, WikiError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes one API response into its envelope.
pub fn decode_envelope(response: ApiResponse<String>) -> Result<Envelope, WikiError> {
    if !response.status.is_success() {
        return Err(WikiError::HttpStatus {
            status: response.status.as_u16(),
            body: response.data,
        });
    }

    let mut json: Value = serde_json::from_str(&response.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", response.url, e);
        WikiError::MalformedResponse(format!(
            "{} (body: {})",
            e,
            preview(&response.data)
        ))
    })?;

    if let Some(error) = take_field::<MwError>(&mut json, "error", &response.url)? {
        return Err(WikiError::Api {
            code: ApiErrorCode::from_api_code(&error.code),
            message: error.info,
        });
    }
    if let Some(parse) = take_field::<MwParse>(&mut json, "parse", &response.url)? {
        return Ok(Envelope::Parse(parse));
    }
    if let Some(compare) = take_field::<MwCompare>(&mut json, "compare", &response.url)? {
        return Ok(Envelope::Compare(compare));
    }
    if let Some(query) = take_field::<MwQuery>(&mut json, "query", &response.url)? {
        return Ok(Envelope::Query(query));
    }

    log::error!("Response from {} has no known envelope", response.url);
    Err(WikiError::MalformedResponse(format!(
        "response has no error, parse, compare or query object (body: {})",
        preview(&response.data)
    )))
}

fn take_field<T>(json: &mut Value, key: &str, url: &str) -> Result<Option<T>, WikiError>
where
    T: DeserializeOwned,
{
    let Some(raw) = json.get_mut(key).map(Value::take) else {
        return Ok(None);
    };
    serde_json::from_value(raw).map(Some).map_err(|e| {
        log::error!("Failed to decode {} envelope from {}: {}", key, url, e);
        WikiError::MalformedResponse(format!("invalid {} object: {}", key, e))
    })
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
