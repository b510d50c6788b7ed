use crate::kind::{parse_wire_enum_tolerant, wire_kind};
use chrono::{DateTime, SecondsFormat, Utc};
use meshwire_core::{
    error::WireError,
    guard,
    wire::{WireBuilder, WireObject},
};
use serde_json::Value;

wire_kind! {
    /// Aggregated health verdict. The wire contract legitimately reports
    /// `"Invalid"` for entities the health store has not evaluated yet, so
    /// this set decodes tolerantly.
    pub enum HealthState {
        Ok => "Ok",
        Warning => "Warning",
        Error => "Error",
        Unknown => "Unknown",
    }
}

impl HealthState {
    pub(crate) fn decode_field(
        obj: &WireObject<'_>,
        field: &'static str,
    ) -> Result<Self, WireError> {
        parse_wire_enum_tolerant(obj.require_str(field)?, field)
    }
}

///
/// HealthEvent
///
/// One health report raised against an entity by a watchdog source.
/// Sequence numbers are string-encoded int64 on the wire; timestamps are
/// RFC 3339 UTC.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthEvent {
    source_id: String,
    property: String,
    health_state: HealthState,
    description: Option<String>,
    sequence_number: i64,
    source_utc_timestamp: DateTime<Utc>,
    last_modified_utc_timestamp: Option<DateTime<Utc>>,
    is_expired: bool,
}

impl HealthEvent {
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        source_id: String,
        property: String,
        health_state: HealthState,
        description: Option<String>,
        sequence_number: i64,
        source_utc_timestamp: DateTime<Utc>,
        last_modified_utc_timestamp: Option<DateTime<Utc>>,
        is_expired: bool,
    ) -> Result<Self, WireError> {
        Ok(Self {
            source_id: guard::require_nonempty(source_id, "SourceId")?,
            property: guard::require_nonempty(property, "Property")?,
            health_state,
            description,
            sequence_number,
            source_utc_timestamp,
            last_modified_utc_timestamp,
            is_expired,
        })
    }

    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[must_use]
    pub const fn health_state(&self) -> HealthState {
        self.health_state
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    #[must_use]
    pub const fn source_utc_timestamp(&self) -> DateTime<Utc> {
        self.source_utc_timestamp
    }

    #[must_use]
    pub const fn last_modified_utc_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_modified_utc_timestamp
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.is_expired
    }

    pub fn decode(obj: &WireObject<'_>) -> Result<Self, WireError> {
        Self::new(
            obj.require_string("SourceId")?,
            obj.require_string("Property")?,
            HealthState::decode_field(obj, "HealthState")?,
            obj.string_field("Description")?,
            obj.require_i64_text("SequenceNumber")?,
            decode_timestamp(obj, "SourceUtcTimestamp")?
                .ok_or(WireError::MissingRequiredField {
                    field: "SourceUtcTimestamp",
                })?,
            decode_timestamp(obj, "LastModifiedUtcTimestamp")?,
            obj.bool_field("IsExpired")?.unwrap_or(false),
        )
    }

    #[must_use]
    pub fn to_wire(&self) -> Value {
        WireBuilder::new()
            .push("SourceId", self.source_id())
            .push("Property", self.property())
            .push("HealthState", self.health_state.to_string())
            .push_opt("Description", self.description())
            .push("SequenceNumber", self.sequence_number.to_string())
            .push(
                "SourceUtcTimestamp",
                encode_timestamp(self.source_utc_timestamp),
            )
            .push_opt(
                "LastModifiedUtcTimestamp",
                self.last_modified_utc_timestamp.map(encode_timestamp),
            )
            .push("IsExpired", self.is_expired)
            .into_value()
    }
}

pub(crate) fn decode_timestamp(
    obj: &WireObject<'_>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, WireError> {
    match obj.str_field(field)? {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                WireError::invalid_format(field, format!("'{raw}' is not an RFC 3339 timestamp"))
            }),
    }
}

pub(crate) fn encode_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_value() -> Value {
        json!({
            "SourceId": "System.FM",
            "Property": "State",
            "HealthState": "Warning",
            "Description": "replica count below target",
            "SequenceNumber": "130",
            "SourceUtcTimestamp": "2024-03-01T08:30:00.000000Z",
            "IsExpired": false,
        })
    }

    #[test]
    fn events_decode_and_round_trip() {
        let value = event_value();
        let event = HealthEvent::decode(&WireObject::from_value(&value).unwrap()).unwrap();
        assert_eq!(event.health_state(), HealthState::Warning);
        assert_eq!(event.sequence_number(), 130);
        assert_eq!(event.last_modified_utc_timestamp(), None);

        let encoded = event.to_wire();
        let again = HealthEvent::decode(&WireObject::from_value(&encoded).unwrap()).unwrap();
        assert_eq!(again, event);
    }

    #[test]
    fn sequence_numbers_are_string_encoded() {
        let mut value = event_value();
        value["SequenceNumber"] = json!(130);
        let err = HealthEvent::decode(&WireObject::from_value(&value).unwrap()).unwrap_err();
        assert_eq!(
            err,
            WireError::invalid_format("SequenceNumber", "expected string, found number")
        );
    }

    #[test]
    fn invalid_health_state_is_tolerated() {
        let mut value = event_value();
        value["HealthState"] = json!("Invalid");
        let event = HealthEvent::decode(&WireObject::from_value(&value).unwrap()).unwrap();
        assert_eq!(event.health_state(), HealthState::Invalid);
    }

    #[test]
    fn unknown_health_state_spelling_still_fails() {
        let mut value = event_value();
        value["HealthState"] = json!("Okay");
        let err = HealthEvent::decode(&WireObject::from_value(&value).unwrap()).unwrap_err();
        assert_eq!(err, WireError::unknown_variant("HealthState", "Okay"));
    }

    #[test]
    fn malformed_timestamps_name_the_field() {
        let mut value = event_value();
        value["SourceUtcTimestamp"] = json!("yesterday");
        let err = HealthEvent::decode(&WireObject::from_value(&value).unwrap()).unwrap_err();
        assert_eq!(
            err,
            WireError::invalid_format(
                "SourceUtcTimestamp",
                "'yesterday' is not an RFC 3339 timestamp"
            )
        );
    }
}
