//! Structured error details from the remote service

use std::collections::HashMap;

use serde_json::Value;

/// Detailed error information from service error responses.
///
/// The service returns structured error bodies that can include a code,
/// nested inner errors and additional metadata. Parsing is best-effort:
/// bodies that don't match the structure surface as a plain HTTP error.
#[derive(Debug, Clone)]
pub struct ServiceErrorDetail {
    /// The service error code, if supplied.
    pub code: Option<String>,
    /// Human-readable error message.
    pub message: String,
    /// Nested inner error, if any.
    pub inner_error: Option<Box<ServiceErrorDetail>>,
    /// Additional error metadata.
    pub additional_info: HashMap<String, Value>,
}

impl ServiceErrorDetail {
    /// Creates a new error detail with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            inner_error: None,
            additional_info: HashMap::new(),
        }
    }

    /// Parses an error detail from a raw response body.
    ///
    /// Accepts both `{"error": {...}}` envelopes and flat
    /// `{"code", "message"}` objects. Returns `None` when the body is not
    /// a recognizable error object.
    pub fn from_body(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let object = match value.get("error") {
            Some(Value::Object(inner)) => inner,
            _ => value.as_object()?,
        };
        Self::from_object(object)
    }

    fn from_object(object: &serde_json::Map<String, Value>) -> Option<Self> {
        let message = match object.get("message") {
            Some(Value::String(s)) => s.clone(),
            // Some endpoints nest the text one level down
            Some(Value::Object(m)) => m.get("value")?.as_str()?.to_string(),
            _ => return None,
        };

        let code = match object.get("code") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let inner_error = object
            .get("innererror")
            .and_then(Value::as_object)
            .and_then(Self::from_object)
            .map(Box::new);

        let additional_info = object
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "code" | "message" | "innererror"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self {
            code,
            message,
            inner_error,
            additional_info,
        })
    }

    /// Returns the innermost error in the chain.
    pub fn innermost(&self) -> &ServiceErrorDetail {
        let mut current = self;
        while let Some(inner) = &current.inner_error {
            current = inner;
        }
        current
    }

    /// Checks if this error or any inner error has the given code.
    pub fn has_code(&self, code: &str) -> bool {
        if self.code.as_deref() == Some(code) {
            return true;
        }
        if let Some(inner) = &self.inner_error {
            return inner.has_code(code);
        }
        false
    }
}

impl std::fmt::Display for ServiceErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
