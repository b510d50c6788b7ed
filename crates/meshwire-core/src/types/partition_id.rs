use crate::error::WireError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use uuid::Uuid;

///
/// PartitionId
///
/// GUID-format partition identifier. The wire form is the canonical
/// hyphenated lowercase text; alternate GUID spellings (braced, simple,
/// uppercase) normalize to it at construction.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct PartitionId(Uuid);

impl PartitionId {
    /// The all-zero GUID.
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse a GUID-format string.
    pub fn parse(raw: &str) -> Result<Self, WireError> {
        let id = Uuid::parse_str(raw).map_err(|_| {
            WireError::invalid_format("PartitionId", format!("'{raw}' is not a GUID"))
        })?;

        Ok(Self(id))
    }

    #[must_use]
    pub const fn get(self) -> Uuid {
        self.0
    }

    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PartitionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for PartitionId {
    type Err = WireError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for PartitionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PartitionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "c150d0e4-9bf8-4ec8-9c44-b58f06b6cf66";

    #[test]
    fn alternate_spellings_normalize_to_hyphenated_lowercase() {
        let canonical = PartitionId::parse(RAW).unwrap();
        let upper = PartitionId::parse(&RAW.to_ascii_uppercase()).unwrap();
        let braced = PartitionId::parse(&format!("{{{RAW}}}")).unwrap();
        assert_eq!(canonical, upper);
        assert_eq!(canonical, braced);
        assert_eq!(canonical.to_string(), RAW);
    }

    #[test]
    fn non_guid_text_fails_with_invalid_format() {
        let err = PartitionId::parse("not-a-guid").unwrap_err();
        assert_eq!(err.class(), crate::error::ErrorClass::InvalidFormat);
    }

    #[test]
    fn nil_is_the_all_zero_guid() {
        assert!(PartitionId::nil().is_nil());
        assert_eq!(
            PartitionId::nil().to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
