use serde_json::Value;

use crate::{FailureKind, FetchError};

pub const FORMAT_ERROR_MESSAGE: &str = "Invalid data format received from API.";

/// Extracts the raw `results` sequence from a jobs response body.
///
/// The items are returned unfiltered; a body that is not JSON, is not an
/// object, or whose `results` is missing or not an array is a format error.
pub fn decode_results(body: &[u8]) -> Result<Vec<Value>, FetchError> {
    let payload: Value = serde_json::from_slice(body).map_err(|err| {
        FetchError::new(FailureKind::Format, format!("{FORMAT_ERROR_MESSAGE} ({err})"))
    })?;

    match payload {
        Value::Object(mut object) => match object.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(FetchError::new(FailureKind::Format, FORMAT_ERROR_MESSAGE)),
        },
        _ => Err(FetchError::new(FailureKind::Format, FORMAT_ERROR_MESSAGE)),
    }
}
