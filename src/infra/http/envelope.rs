use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::usecase::ports::api::{FetchError, GENERIC_ERROR_MESSAGE};

/// Turns a raw HTTP status and body into the JSON envelope, mapping failed
/// statuses and `status: false` envelopes to errors.
pub fn interpret_response(code: u16, text: &str) -> Result<Value, FetchError> {
    let parsed = serde_json::from_str::<Value>(text);

    if !(200..300).contains(&code) {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(envelope_message)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        return Err(FetchError::Status { code, message });
    }

    let body = parsed.map_err(|err| FetchError::Decode(err.to_string()))?;
    ensure_accepted(&body)?;
    Ok(body)
}

pub fn envelope_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

pub fn ensure_accepted(body: &Value) -> Result<(), FetchError> {
    if body.get("status").and_then(Value::as_bool) == Some(false) {
        let message =
            envelope_message(body).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        return Err(FetchError::Rejected(message));
    }
    Ok(())
}

/// Strict form used by record listings: `data` must be present and an array.
pub fn records_from_envelope<R: DeserializeOwned>(body: &Value) -> Result<Vec<R>, FetchError> {
    match body.get("data") {
        Some(Value::Array(items)) => decode_items(items),
        Some(other) => Err(FetchError::Shape(format!(
            "expected `data` to be an array, found {}",
            describe(other)
        ))),
        None => Err(FetchError::Shape("missing `data` field".to_string())),
    }
}

/// Lookup form: a missing or null `data` means nothing matched.
pub fn optional_records_from_envelope<R: DeserializeOwned>(
    body: &Value,
) -> Result<Vec<R>, FetchError> {
    match body.get("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(_) => records_from_envelope(body),
    }
}

pub fn object_from_envelope<T: DeserializeOwned>(body: &Value) -> Result<T, FetchError> {
    match body.get("data") {
        Some(data) if data.is_object() => {
            T::deserialize(data).map_err(|err| FetchError::Decode(err.to_string()))
        }
        Some(other) => Err(FetchError::Shape(format!(
            "expected `data` to be an object, found {}",
            describe(other)
        ))),
        None => Err(FetchError::Shape("missing `data` field".to_string())),
    }
}

fn decode_items<R: DeserializeOwned>(items: &[Value]) -> Result<Vec<R>, FetchError> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            R::deserialize(item).map_err(|err| FetchError::Decode(format!("record {idx}: {err}")))
        })
        .collect()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
