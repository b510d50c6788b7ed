use crate::{
    kind::wire_kind,
    registry::{TaggedFamily, VariantRegistry},
};
use meshwire_core::{
    error::WireError,
    guard,
    wire::{WireBuilder, WireObject},
};
use std::sync::LazyLock;

const COUNT_MIN: i64 = 1;
const COUNT_MAX: i64 = i32::MAX as i64;

wire_kind! {
    /// Discriminator for service partition schemes.
    pub enum PartitionSchemeKind {
        Singleton => "Singleton",
        UniformInt64Range => "UniformInt64Range",
        Named => "Named",
    }
}

///
/// PartitionScheme
///
/// How a service's state is partitioned: not at all, by a uniform int64
/// key range, or by explicit partition names.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PartitionScheme {
    Singleton,
    UniformInt64Range(UniformInt64RangePartitionScheme),
    Named(NamedPartitionScheme),
}

impl PartitionScheme {
    fn encode_fields(&self, builder: WireBuilder) -> WireBuilder {
        match self {
            Self::Singleton => builder,
            Self::UniformInt64Range(v) => builder
                .push("Count", v.count())
                .push("LowKey", v.low_key().to_string())
                .push("HighKey", v.high_key().to_string()),
            Self::Named(v) => builder
                .push("Count", v.count())
                .push("Names", v.names().to_vec()),
        }
    }

    fn decode_singleton(_obj: &WireObject<'_>) -> Result<Self, WireError> {
        Ok(Self::Singleton)
    }
}

static REGISTRY: LazyLock<VariantRegistry<PartitionScheme>> = LazyLock::new(|| {
    VariantRegistry::builder()
        .register(
            PartitionSchemeKind::Singleton,
            PartitionScheme::decode_singleton,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            PartitionSchemeKind::UniformInt64Range,
            UniformInt64RangePartitionScheme::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            PartitionSchemeKind::Named,
            NamedPartitionScheme::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .build()
});

impl TaggedFamily for PartitionScheme {
    type Kind = PartitionSchemeKind;
    const KIND_FIELD: &'static str = "PartitionScheme";

    fn kind(&self) -> PartitionSchemeKind {
        match self {
            Self::Singleton => PartitionSchemeKind::Singleton,
            Self::UniformInt64Range(_) => PartitionSchemeKind::UniformInt64Range,
            Self::Named(_) => PartitionSchemeKind::Named,
        }
    }

    fn registry() -> &'static VariantRegistry<Self> {
        &REGISTRY
    }
}

///
/// UniformInt64RangePartitionScheme
///
/// `count` partitions spread evenly over the inclusive key range
/// [`low_key`, `high_key`]. Keys are string-encoded int64 on the wire.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UniformInt64RangePartitionScheme {
    count: i64,
    low_key: i64,
    high_key: i64,
}

impl UniformInt64RangePartitionScheme {
    pub fn new(count: i64, low_key: i64, high_key: i64) -> Result<Self, WireError> {
        let count = guard::require_in_range(count, "Count", COUNT_MIN, COUNT_MAX)?;
        if low_key > high_key {
            return Err(WireError::invalid_format(
                "HighKey",
                format!("high key {high_key} is below low key {low_key}"),
            ));
        }

        Ok(Self {
            count,
            low_key,
            high_key,
        })
    }

    #[must_use]
    pub const fn count(&self) -> i64 {
        self.count
    }

    #[must_use]
    pub const fn low_key(&self) -> i64 {
        self.low_key
    }

    #[must_use]
    pub const fn high_key(&self) -> i64 {
        self.high_key
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<PartitionScheme, WireError> {
        Ok(PartitionScheme::UniformInt64Range(Self::new(
            obj.require_i64("Count")?,
            obj.require_i64_text("LowKey")?,
            obj.require_i64_text("HighKey")?,
        )?))
    }
}

///
/// NamedPartitionScheme
///
/// Explicitly named partitions; `count` must equal the number of names.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamedPartitionScheme {
    count: i64,
    names: Vec<String>,
}

impl NamedPartitionScheme {
    pub fn new(count: i64, names: Vec<String>) -> Result<Self, WireError> {
        let count = guard::require_in_range(count, "Count", COUNT_MIN, COUNT_MAX)?;
        if names.is_empty() {
            return Err(WireError::MissingRequiredField { field: "Names" });
        }
        if !usize::try_from(count).is_ok_and(|c| c == names.len()) {
            return Err(WireError::invalid_format(
                "Count",
                format!("count {count} does not match {} partition names", names.len()),
            ));
        }

        Ok(Self { count, names })
    }

    #[must_use]
    pub const fn count(&self) -> i64 {
        self.count
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<PartitionScheme, WireError> {
        Ok(PartitionScheme::Named(Self::new(
            obj.require_i64("Count")?,
            guard::require(obj.string_array_field("Names")?, "Names")?,
        )?))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_tagged, encode_tagged};
    use serde_json::json;

    #[test]
    fn singleton_round_trips_with_no_extra_fields() {
        let encoded = encode_tagged(&PartitionScheme::Singleton).unwrap();
        assert_eq!(encoded, json!({ "PartitionScheme": "Singleton" }));
        assert_eq!(
            decode_tagged::<PartitionScheme>(&encoded).unwrap(),
            PartitionScheme::Singleton
        );
    }

    #[test]
    fn uniform_range_round_trips_with_string_keys() {
        let scheme = PartitionScheme::UniformInt64Range(
            UniformInt64RangePartitionScheme::new(10, i64::MIN, i64::MAX).unwrap(),
        );
        let encoded = encode_tagged(&scheme).unwrap();
        assert_eq!(encoded["LowKey"], json!("-9223372036854775808"));
        assert_eq!(encoded["HighKey"], json!("9223372036854775807"));
        assert_eq!(decode_tagged::<PartitionScheme>(&encoded).unwrap(), scheme);
    }

    #[test]
    fn inverted_key_ranges_are_rejected() {
        let err = UniformInt64RangePartitionScheme::new(1, 5, -5).unwrap_err();
        assert_eq!(
            err,
            WireError::invalid_format("HighKey", "high key -5 is below low key 5")
        );
    }

    #[test]
    fn named_scheme_count_must_match_names() {
        let names = vec!["hot".to_string(), "cold".to_string()];
        assert!(NamedPartitionScheme::new(2, names.clone()).is_ok());

        let err = NamedPartitionScheme::new(3, names).unwrap_err();
        assert_eq!(
            err,
            WireError::invalid_format("Count", "count 3 does not match 2 partition names")
        );
    }

    #[test]
    fn count_bounds_are_inclusive() {
        assert!(UniformInt64RangePartitionScheme::new(0, 0, 1).is_err());
        assert!(UniformInt64RangePartitionScheme::new(i64::from(i32::MAX), 0, 1).is_ok());
        assert!(UniformInt64RangePartitionScheme::new(i64::from(i32::MAX) + 1, 0, 1).is_err());
    }

    #[test]
    fn named_round_trips() {
        let scheme = PartitionScheme::Named(
            NamedPartitionScheme::new(2, vec!["hot".to_string(), "cold".to_string()]).unwrap(),
        );
        let encoded = encode_tagged(&scheme).unwrap();
        assert_eq!(encoded["Names"], json!(["hot", "cold"]));
        assert_eq!(decode_tagged::<PartitionScheme>(&encoded).unwrap(), scheme);
    }
}
