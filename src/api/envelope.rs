use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiFailure, ClientError, GENERIC_FAILURE_MESSAGE};

/// Normalized outcome of one API call.
///
/// The backend wraps responses as `{ success, data, error: { message } }`.
/// Decoding folds that into two cases so `Success` always carries data and
/// `Failure` always carries a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure(ApiFailure),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success(data) => Some(data),
            Envelope::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiFailure> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(failure) => Some(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Envelope::Success(data) => Envelope::Success(f(data)),
            Envelope::Failure(failure) => Envelope::Failure(failure),
        }
    }

    pub fn into_result(self) -> Result<T, ClientError> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Failure(failure) => Err(ClientError::Api(failure)),
        }
    }
}

impl Envelope<Value> {
    /// Folds an HTTP status and raw body into an envelope.
    ///
    /// A 2xx body that is not an envelope (some search endpoints answer with a
    /// bare array) is taken as the data itself. Only an unparseable 2xx body is
    /// an error; failed statuses always produce `Failure`.
    pub fn from_http(status: u16, body: &[u8]) -> Result<Self, ClientError> {
        let ok = (200..300).contains(&status);
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            match serde_json::from_slice::<Value>(body) {
                Ok(value) => value,
                Err(e) if ok => return Err(ClientError::Decode(e.to_string())),
                Err(_) => Value::Null,
            }
        };

        if !ok {
            let message = failure_message(&value).unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            return Ok(Envelope::Failure(ApiFailure::new(status, message)));
        }

        match value.get("success").and_then(Value::as_bool) {
            Some(true) => Ok(Envelope::Success(value.get("data").cloned().unwrap_or(Value::Null))),
            Some(false) => {
                let message = failure_message(&value).unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                Ok(Envelope::Failure(ApiFailure::new(status, message)))
            }
            None => Ok(Envelope::Success(value)),
        }
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<Envelope<T>, ClientError> {
        match self {
            Envelope::Success(value) => Ok(Envelope::Success(serde_json::from_value(value)?)),
            Envelope::Failure(failure) => Ok(Envelope::Failure(failure)),
        }
    }
}

fn failure_message(value: &Value) -> Option<String> {
    let candidate = match value.get("error") {
        Some(Value::Object(error)) => error.get("message").and_then(Value::as_str),
        Some(Value::String(message)) => Some(message.as_str()),
        _ => None,
    }
    .or_else(|| value.get("message").and_then(Value::as_str))?;

    let trimmed = candidate.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// Backend sent a bare `T[]`
    Array,
    /// Backend sent a `{ content: T[] }` page wrapper
    Page,
}

/// A list payload after shape normalization.
///
/// Built once at the API boundary; everything downstream reads `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    pub shape: ListShape,
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: DeserializeOwned> ListResponse<T> {
    /// `null`, a missing payload and `{ content: null }` all yield an empty list.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(items) => Ok(Self {
                shape: ListShape::Array,
                items: serde_json::from_value(Value::Array(items))?,
            }),
            Value::Object(mut page) => {
                let items = match page.remove("content") {
                    Some(content @ Value::Array(_)) => serde_json::from_value(content)?,
                    _ => Vec::new(),
                };
                Ok(Self { shape: ListShape::Page, items })
            }
            _ => Ok(Self {
                shape: ListShape::Array,
                items: Vec::new(),
            }),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ListResponse::from_value(value).map_err(serde::de::Error::custom)
    }
}
