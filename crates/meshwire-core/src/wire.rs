//! Typed reading/writing surface over a decoded JSON value tree.
//!
//! Decoders never touch `serde_json::Value` directly; they go through
//! [`WireObject`], whose getters are total over the declared field set:
//! absent and JSON-null fields read as `None`, present-but-mistyped fields
//! fail with `InvalidFormat`, and required fields compose with the guards.

use crate::{error::WireError, guard};
use serde_json::Value;

/// JSON object shape shared by the whole wire surface.
pub type JsonMap = serde_json::Map<String, Value>;

/// Stable label for a JSON value's type, used in format diagnostics.
#[must_use]
pub const fn type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a string-encoded 64-bit integer wire field.
///
/// Several server contracts carry int64 values as JSON strings to survive
/// lossy intermediaries; this is the single parse point for them.
pub fn parse_i64_text(raw: &str, field: &'static str) -> Result<i64, WireError> {
    raw.parse::<i64>()
        .map_err(|_| WireError::invalid_format(field, format!("'{raw}' is not an int64 string")))
}

///
/// WireObject
///
/// Borrowed view of one JSON object from a decoded payload.
///

#[derive(Clone, Copy, Debug)]
pub struct WireObject<'a> {
    fields: &'a JsonMap,
}

impl<'a> WireObject<'a> {
    #[must_use]
    pub const fn new(fields: &'a JsonMap) -> Self {
        Self { fields }
    }

    /// View a JSON value as an object, or fail with `InvalidFormat`.
    pub fn from_value(value: &'a Value) -> Result<Self, WireError> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(WireError::invalid_format(
                "$",
                format!("expected object, found {}", type_label(other)),
            )),
        }
    }

    /// Raw field access; JSON null reads the same as absent.
    fn raw(&self, name: &str) -> Option<&'a Value> {
        match self.fields.get(name) {
            None | Some(Value::Null) => None,
            some => some,
        }
    }

    fn mistyped(name: &'static str, expected: &str, found: &Value) -> WireError {
        WireError::invalid_format(
            name,
            format!("expected {expected}, found {}", type_label(found)),
        )
    }

    ///
    /// OPTIONAL GETTERS
    ///

    pub fn str_field(&self, name: &'static str) -> Result<Option<&'a str>, WireError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(Self::mistyped(name, "string", other)),
        }
    }

    pub fn string_field(&self, name: &'static str) -> Result<Option<String>, WireError> {
        Ok(self.str_field(name)?.map(ToOwned::to_owned))
    }

    pub fn i64_field(&self, name: &'static str) -> Result<Option<i64>, WireError> {
        match self.raw(name) {
            None => Ok(None),
            Some(value @ Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| Self::mistyped(name, "int64", value)),
            Some(other) => Err(Self::mistyped(name, "int64", other)),
        }
    }

    pub fn f64_field(&self, name: &'static str) -> Result<Option<f64>, WireError> {
        match self.raw(name) {
            None => Ok(None),
            Some(value @ Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| Self::mistyped(name, "double", value)),
            Some(other) => Err(Self::mistyped(name, "double", other)),
        }
    }

    pub fn bool_field(&self, name: &'static str) -> Result<Option<bool>, WireError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(Self::mistyped(name, "bool", other)),
        }
    }

    /// String-encoded int64 field (see [`parse_i64_text`]).
    pub fn i64_text_field(&self, name: &'static str) -> Result<Option<i64>, WireError> {
        match self.str_field(name)? {
            None => Ok(None),
            Some(raw) => parse_i64_text(raw, name).map(Some),
        }
    }

    pub fn object_field(&self, name: &'static str) -> Result<Option<Self>, WireError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(Self::new(fields))),
            Some(other) => Err(Self::mistyped(name, "object", other)),
        }
    }

    pub fn array_field(&self, name: &'static str) -> Result<Option<&'a [Value]>, WireError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.as_slice())),
            Some(other) => Err(Self::mistyped(name, "array", other)),
        }
    }

    pub fn string_array_field(
        &self,
        name: &'static str,
    ) -> Result<Option<Vec<String>>, WireError> {
        let Some(items) = self.array_field(name)? else {
            return Ok(None);
        };

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => return Err(Self::mistyped(name, "array of strings", other)),
            }
        }

        Ok(Some(out))
    }

    /// Byte payload carried as a JSON array of numbers in `[0, 255]`.
    pub fn byte_array_field(&self, name: &'static str) -> Result<Option<Vec<u8>>, WireError> {
        let Some(items) = self.array_field(name)? else {
            return Ok(None);
        };

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let byte = item
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| Self::mistyped(name, "array of bytes", item))?;
            out.push(byte);
        }

        Ok(Some(out))
    }

    ///
    /// REQUIRED GETTERS
    ///

    pub fn require_str(&self, name: &'static str) -> Result<&'a str, WireError> {
        guard::require(self.str_field(name)?, name)
    }

    pub fn require_string(&self, name: &'static str) -> Result<String, WireError> {
        guard::require(self.string_field(name)?, name)
    }

    pub fn require_i64(&self, name: &'static str) -> Result<i64, WireError> {
        guard::require(self.i64_field(name)?, name)
    }

    pub fn require_f64(&self, name: &'static str) -> Result<f64, WireError> {
        guard::require(self.f64_field(name)?, name)
    }

    pub fn require_bool(&self, name: &'static str) -> Result<bool, WireError> {
        guard::require(self.bool_field(name)?, name)
    }

    pub fn require_i64_text(&self, name: &'static str) -> Result<i64, WireError> {
        guard::require(self.i64_text_field(name)?, name)
    }

    pub fn require_object(&self, name: &'static str) -> Result<Self, WireError> {
        guard::require(self.object_field(name)?, name)
    }

    pub fn require_array(&self, name: &'static str) -> Result<&'a [Value], WireError> {
        guard::require(self.array_field(name)?, name)
    }
}

///
/// WireBuilder
///
/// Ordered field writer producing the JSON tree the transport serializes.
/// `push_opt` drops absent optionals instead of writing nulls.
///

#[derive(Clone, Debug, Default)]
pub struct WireBuilder {
    fields: JsonMap,
}

impl WireBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn push_opt<V: Into<Value>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(name, value),
            None => self,
        }
    }

    #[must_use]
    pub fn into_map(self) -> JsonMap {
        self.fields
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

///
/// TESTS
///
