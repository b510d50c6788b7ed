use crate::{
    kind::wire_kind,
    registry::{TaggedFamily, VariantRegistry},
};
use meshwire_core::{
    error::WireError,
    guard,
    types::PartitionId,
    wire::{WireBuilder, WireObject},
};
use std::sync::LazyLock;

wire_kind! {
    /// Discriminator for typed property values in the naming store.
    pub enum PropertyValueKind {
        Binary => "Binary",
        Int64 => "Int64",
        Double => "Double",
        String => "String",
        Guid => "Guid",
    }
}

///
/// PropertyValue
///
/// One typed value stored under a property name. Every variant carries its
/// payload in the `Data` wire field; `Int64` data is string-encoded on the
/// wire to survive lossy JSON intermediaries.
///

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Binary(Vec<u8>),
    Int64(i64),
    Double(f64),
    String(String),
    Guid(PartitionId),
}

impl PropertyValue {
    /// Construct a double value; non-finite payloads have no wire form.
    pub fn double(value: f64) -> Result<Self, WireError> {
        if !value.is_finite() {
            return Err(WireError::invalid_format(
                "Data",
                format!("{value} has no JSON double representation"),
            ));
        }

        Ok(Self::Double(value))
    }

    fn encode_fields(&self, builder: WireBuilder) -> WireBuilder {
        match self {
            Self::Binary(bytes) => {
                let data: Vec<u64> = bytes.iter().map(|byte| u64::from(*byte)).collect();
                builder.push("Data", data)
            }
            Self::Int64(value) => builder.push("Data", value.to_string()),
            Self::Double(value) => builder.push("Data", *value),
            Self::String(value) => builder.push("Data", value.as_str()),
            Self::Guid(value) => builder.push("Data", value.to_string()),
        }
    }

    fn decode_binary(obj: &WireObject<'_>) -> Result<Self, WireError> {
        Ok(Self::Binary(guard::require(
            obj.byte_array_field("Data")?,
            "Data",
        )?))
    }

    fn decode_int64(obj: &WireObject<'_>) -> Result<Self, WireError> {
        Ok(Self::Int64(obj.require_i64_text("Data")?))
    }

    fn decode_double(obj: &WireObject<'_>) -> Result<Self, WireError> {
        Self::double(obj.require_f64("Data")?)
    }

    fn decode_string(obj: &WireObject<'_>) -> Result<Self, WireError> {
        Ok(Self::String(obj.require_string("Data")?))
    }

    fn decode_guid(obj: &WireObject<'_>) -> Result<Self, WireError> {
        let guid = PartitionId::parse(obj.require_str("Data")?)
            .map_err(|err| err.with_field("Data"))?;

        Ok(Self::Guid(guid))
    }
}

static REGISTRY: LazyLock<VariantRegistry<PropertyValue>> = LazyLock::new(|| {
    VariantRegistry::builder()
        .register(
            PropertyValueKind::Binary,
            PropertyValue::decode_binary,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            PropertyValueKind::Int64,
            PropertyValue::decode_int64,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            PropertyValueKind::Double,
            PropertyValue::decode_double,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            PropertyValueKind::String,
            PropertyValue::decode_string,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            PropertyValueKind::Guid,
            PropertyValue::decode_guid,
            |family, builder| family.encode_fields(builder),
        )
        .build()
});

impl TaggedFamily for PropertyValue {
    type Kind = PropertyValueKind;
    const KIND_FIELD: &'static str = "Kind";

    fn kind(&self) -> PropertyValueKind {
        match self {
            Self::Binary(_) => PropertyValueKind::Binary,
            Self::Int64(_) => PropertyValueKind::Int64,
            Self::Double(_) => PropertyValueKind::Double,
            Self::String(_) => PropertyValueKind::String,
            Self::Guid(_) => PropertyValueKind::Guid,
        }
    }

    fn registry() -> &'static VariantRegistry<Self> {
        &REGISTRY
    }
}

///
/// TESTS
///
