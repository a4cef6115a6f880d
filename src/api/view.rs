//! Rendered views
//!
//! Templates live outside this service, so a view is returned as JSON:
//! `{ "view": "<name>", ...model attributes }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::domain::FieldErrors;
use crate::infrastructure::Session;

/// Attribute carrying a message flashed by the previous request
pub const ALERT_SUCCESS: &str = "alert_success";

pub struct View {
    name: &'static str,
    status: StatusCode,
    model: Map<String, Value>,
}

impl View {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            status: StatusCode::OK,
            model: Map::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add a model attribute
    pub fn with<T: Serialize>(mut self, key: &str, value: T) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize view attribute '{}': {}", key, e);
            Value::Null
        });
        self.model.insert(key.to_string(), value);
        self
    }

    /// Expose the session's one-time message, if any
    pub fn with_alert(self, session: &Session) -> Self {
        match session.alert() {
            Some(message) => self.with(ALERT_SUCCESS, message),
            None => self,
        }
    }

    /// Add a `<field>_error: true` flag per invalid field plus the messages
    pub fn with_errors(mut self, errors: &FieldErrors) -> Self {
        let mut messages = Map::new();
        for e in errors.iter() {
            tracing::debug!("FieldError: {} - {}", e.field, e.message);
            self.model
                .insert(format!("{}_error", e.field), Value::Bool(true));
            if let Value::Array(list) = messages
                .entry(e.field.clone())
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                list.push(Value::String(e.message.clone()));
            }
        }
        self.model.insert("errors".to_string(), Value::Object(messages));
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("view".to_string(), Value::String(self.name.to_string()));
        body.extend(self.model);
        (self.status, Json(Value::Object(body))).into_response()
    }
}

/// JSON error body used for everything that is not a form re-render
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}
