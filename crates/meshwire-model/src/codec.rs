//! The polymorphic codec: discriminator-driven decode/encode over decoded
//! JSON value trees.
//!
//! Decoding funnels through each variant's guarded constructor, so
//! field-level validation applies transitively; encoding writes the
//! discriminator from the value's own kind. Both directions are pure.

use crate::{kind::KindTag, registry::TaggedFamily};
use meshwire_core::{
    error::WireError,
    paging::PagedData,
    wire::{WireBuilder, WireObject},
};
use serde_json::Value;

/// Decode one family value from a JSON object.
///
/// Absent discriminator → `MissingDiscriminator`; a tag this build does not
/// know (or the `Invalid` sentinel) → `UnknownVariant` carrying the raw tag.
/// Never silently defaults to a guessed shape.
pub fn decode_tagged<F: TaggedFamily>(value: &Value) -> Result<F, WireError> {
    decode_tagged_object(&WireObject::from_value(value)?)
}

/// Decode one family value from an already-viewed wire object.
///
/// Used directly when the family payload is a field of an enclosing entity.
pub fn decode_tagged_object<F: TaggedFamily>(obj: &WireObject<'_>) -> Result<F, WireError> {
    let tag = obj
        .str_field(F::KIND_FIELD)?
        .ok_or(WireError::MissingDiscriminator {
            field: F::KIND_FIELD,
        })?;

    let codec = F::Kind::from_wire(tag)
        .and_then(|kind| F::registry().resolve(kind))
        .ok_or_else(|| WireError::unknown_variant(F::KIND_FIELD, tag))?;

    (codec.decode)(obj)
}

/// Encode one family value to a JSON object, discriminator first.
pub fn encode_tagged<F: TaggedFamily>(value: &F) -> Result<Value, WireError> {
    let kind = value.kind();
    let codec = F::registry()
        .resolve(kind)
        .ok_or_else(|| WireError::unknown_variant(F::KIND_FIELD, kind.to_wire()))?;

    let builder = WireBuilder::new().push(F::KIND_FIELD, kind.to_wire());

    Ok((codec.encode)(value, builder).into_value())
}

/// Decode one fetched page: continuation token plus per-item decoding.
///
/// An absent token decodes to the empty (terminal) token; an absent item
/// array decodes to an empty page.
pub fn decode_page<T>(
    value: &Value,
    decode_item: fn(&WireObject<'_>) -> Result<T, WireError>,
) -> Result<PagedData<T>, WireError> {
    let obj = WireObject::from_value(value)?;
    let token = obj.string_field("ContinuationToken")?.unwrap_or_default();

    let mut items = Vec::new();
    if let Some(raw_items) = obj.array_field("Items")? {
        items.reserve(raw_items.len());
        for raw in raw_items {
            items.push(decode_item(&WireObject::from_value(raw)?)?);
        }
    }

    Ok(PagedData::new(token.into(), items))
}

///
/// TESTS
///
