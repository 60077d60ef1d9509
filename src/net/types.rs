//! Wire types for the authentication backend.
//!
//! DESIGN
//! ======
//! The backend returns a loosely shaped user document (the display name may
//! arrive as `name` or `nome`). Fields this crate does not read are kept in
//! `extra` so the cached copy round-trips without loss.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SessionError;

/// A signed-in user as returned by `GET /auth/user`.
///
/// Only constructed through [`User::from_json`], so `name` is never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct User {
    /// Display name shown in the header.
    pub name: String,
    /// Avatar image URL, if the account has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Opaque fields preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawUser {
    #[serde(default, alias = "nome")]
    name: Option<Value>,
    #[serde(default)]
    avatar_url: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl User {
    /// Validate a decoded response body.
    ///
    /// # Errors
    ///
    /// [`SessionError::MalformedBody`] for anything but a JSON object, and
    /// [`SessionError::MissingName`] when the object has no non-empty name.
    pub fn from_json(value: Value) -> Result<Self, SessionError> {
        if !value.is_object() {
            return Err(SessionError::MalformedBody(format!("expected object, got {}", json_kind(&value))));
        }
        let raw: RawUser = serde_json::from_value(value).map_err(|e| SessionError::MalformedBody(e.to_string()))?;
        let name = raw
            .name
            .and_then(|v| v.as_str().map(str::trim).map(str::to_owned))
            .filter(|n| !n.is_empty())
            .ok_or(SessionError::MissingName)?;
        let avatar_url = raw
            .avatar_url
            .and_then(|v| v.as_str().map(str::to_owned))
            .filter(|url| !url.trim().is_empty());
        Ok(Self { name, avatar_url, extra: raw.extra })
    }

    /// Parse a cached or received JSON string.
    ///
    /// # Errors
    ///
    /// See [`User::from_json`]; invalid JSON is reported as `MalformedBody`.
    pub fn from_json_str(raw: &str) -> Result<Self, SessionError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| SessionError::MalformedBody(e.to_string()))?;
        Self::from_json(value)
    }

    /// Avatar to render, falling back to `default` when the record has none.
    pub fn avatar_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.avatar_url.as_deref().unwrap_or(default)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
