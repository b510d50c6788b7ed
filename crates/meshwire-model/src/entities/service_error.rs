use meshwire_core::{
    error::WireError,
    guard,
    wire::{WireBuilder, WireObject},
};
use serde_json::Value;
use std::fmt;

///
/// ErrorEnvelope
///
/// The nested `Error` object of a failed API response:
/// `{ "Error": { "Code": ..., "Message": ... } }`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ErrorEnvelope {
    code: String,
    message: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: String, message: Option<String>) -> Result<Self, WireError> {
        Ok(Self {
            code: guard::require_nonempty(code, "Code")?,
            message,
        })
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn decode(obj: &WireObject<'_>) -> Result<Self, WireError> {
        Self::new(obj.require_string("Code")?, obj.string_field("Message")?)
    }
}

///
/// ServiceError
///
/// A failed API response body. The envelope is required: a response that
/// claims failure but carries no `Error` object is itself malformed.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceError {
    error: ErrorEnvelope,
}

impl ServiceError {
    #[must_use]
    pub const fn new(error: ErrorEnvelope) -> Self {
        Self { error }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        self.error.code()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error.message()
    }

    #[must_use]
    pub const fn envelope(&self) -> &ErrorEnvelope {
        &self.error
    }

    pub fn decode(obj: &WireObject<'_>) -> Result<Self, WireError> {
        Ok(Self::new(ErrorEnvelope::decode(
            &obj.require_object("Error")?,
        )?))
    }

    #[must_use]
    pub fn to_wire(&self) -> Value {
        let envelope = WireBuilder::new()
            .push("Code", self.code())
            .push_opt("Message", self.message())
            .into_value();

        WireBuilder::new().push("Error", envelope).into_value()
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {message}", self.code()),
            None => f.write_str(self.code()),
        }
    }
}

impl std::error::Error for ServiceError {}

///
/// TESTS
///
