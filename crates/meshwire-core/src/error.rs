use std::fmt;
use thiserror::Error as ThisError;

///
/// WireError
///
/// Construction/decoding failure raised at the wire boundary.
/// Always local and synchronous; retries belong to the transport layer.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum WireError {
    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("field {field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("invalid format for field {field}: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    #[error("missing discriminator field: {field}")]
    MissingDiscriminator { field: &'static str },

    #[error("unknown variant tag in {field}: '{tag}'")]
    UnknownVariant { field: &'static str, tag: String },
}

impl WireError {
    /// Construct an invalid-format error for one field.
    pub fn invalid_format(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }

    /// Construct an unknown-variant error preserving the raw wire tag.
    pub fn unknown_variant(field: &'static str, tag: impl Into<String>) -> Self {
        Self::UnknownVariant {
            field,
            tag: tag.into(),
        }
    }

    /// Re-attribute this error to the named wire field.
    ///
    /// Scalar wrappers validate without knowing which field they decode;
    /// decoders use this to restore the field name for diagnostics.
    #[must_use]
    pub fn with_field(self, field: &'static str) -> Self {
        match self {
            Self::MissingRequiredField { .. } => Self::MissingRequiredField { field },
            Self::OutOfRange {
                value, min, max, ..
            } => Self::OutOfRange {
                field,
                value,
                min,
                max,
            },
            Self::InvalidFormat { reason, .. } => Self::InvalidFormat { field, reason },
            Self::MissingDiscriminator { .. } => Self::MissingDiscriminator { field },
            Self::UnknownVariant { tag, .. } => Self::UnknownVariant { field, tag },
        }
    }

    /// The wire field this error is attributed to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::MissingDiscriminator { field }
            | Self::UnknownVariant { field, .. } => field,
        }
    }

    /// Stable classification for callers that route on error class.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingRequiredField { .. } => ErrorClass::MissingRequiredField,
            Self::OutOfRange { .. } => ErrorClass::OutOfRange,
            Self::InvalidFormat { .. } => ErrorClass::InvalidFormat,
            Self::MissingDiscriminator { .. } => ErrorClass::MissingDiscriminator,
            Self::UnknownVariant { .. } => ErrorClass::UnknownVariant,
        }
    }
}

///
/// ErrorClass
///
/// Stable error taxonomy for log/metric routing by callers.
/// Labels are part of stable behavior and must remain fixed.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    MissingRequiredField,
    OutOfRange,
    InvalidFormat,
    MissingDiscriminator,
    UnknownVariant,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::OutOfRange => "out_of_range",
            Self::InvalidFormat => "invalid_format",
            Self::MissingDiscriminator => "missing_discriminator",
            Self::UnknownVariant => "unknown_variant",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_field() {
        let err = WireError::MissingRequiredField { field: "Name" };
        assert_eq!(err.to_string(), "missing required field: Name");

        let err = WireError::OutOfRange {
            field: "Interval",
            value: 0,
            min: 1,
            max: 2_147_483_647,
        };
        assert_eq!(
            err.to_string(),
            "field Interval out of range: 0 not in [1, 2147483647]"
        );
    }

    #[test]
    fn unknown_variant_preserves_raw_tag() {
        let err = WireError::unknown_variant("Kind", "SomethingNewer");
        assert_eq!(
            err.to_string(),
            "unknown variant tag in Kind: 'SomethingNewer'"
        );
        assert_eq!(err.class(), ErrorClass::UnknownVariant);
    }

    #[test]
    fn with_field_reattributes_every_class() {
        let err = WireError::invalid_format("ResourceName", "no scheme").with_field("Name");
        assert_eq!(err.field(), "Name");
        assert_eq!(err.class(), ErrorClass::InvalidFormat);
    }

    #[test]
    fn class_labels_are_stable() {
        assert_eq!(
            ErrorClass::MissingDiscriminator.to_string(),
            "missing_discriminator"
        );
        assert_eq!(ErrorClass::OutOfRange.to_string(), "out_of_range");
    }
}
