//! Per-family variant registries: the immutable map from discriminator kind
//! to the decode/encode pair responsible for that shape.
//!
//! Each family builds its registry exactly once at first use (behind a
//! `LazyLock`); the map is read-only afterwards, so concurrent decodes need
//! no further synchronization.

use crate::kind::KindTag;
use meshwire_core::{
    error::WireError,
    wire::{WireBuilder, WireObject},
};
use std::collections::BTreeMap;

///
/// VariantCodec
///
/// Decode/encode function pair registered for one kind. Plain function
/// pointers keep the variants themselves plain data.
///

pub struct VariantCodec<F: TaggedFamily> {
    pub decode: fn(&WireObject<'_>) -> Result<F, WireError>,
    pub encode: fn(&F, WireBuilder) -> WireBuilder,
}

// fn pointers are Copy regardless of F.
impl<F: TaggedFamily> Clone for VariantCodec<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: TaggedFamily> Copy for VariantCodec<F> {}

///
/// VariantRegistry
///
/// Read-only kind-to-codec map for one family. Unknown kinds and the
/// `Invalid` sentinel resolve to `None`; callers decide whether that is
/// fatal.
///

pub struct VariantRegistry<F: TaggedFamily> {
    entries: BTreeMap<F::Kind, VariantCodec<F>>,
}

impl<F: TaggedFamily> VariantRegistry<F> {
    #[must_use]
    pub fn builder() -> RegistryBuilder<F> {
        RegistryBuilder {
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn resolve(&self, kind: F::Kind) -> Option<&VariantCodec<F>> {
        self.entries.get(&kind)
    }

    /// Registered kinds, in tag order.
    pub fn kinds(&self) -> impl Iterator<Item = F::Kind> + '_ {
        self.entries.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// RegistryBuilder
///
/// One-shot builder used during family initialization. Each tag maps to at
/// most one codec within a family; re-registration is a programming error.
///

pub struct RegistryBuilder<F: TaggedFamily> {
    entries: BTreeMap<F::Kind, VariantCodec<F>>,
}

impl<F: TaggedFamily> RegistryBuilder<F> {
    #[must_use]
    pub fn register(
        mut self,
        kind: F::Kind,
        decode: fn(&WireObject<'_>) -> Result<F, WireError>,
        encode: fn(&F, WireBuilder) -> WireBuilder,
    ) -> Self {
        let previous = self.entries.insert(kind, VariantCodec { decode, encode });
        debug_assert!(previous.is_none(), "duplicate registration for {kind}");
        self
    }

    #[must_use]
    pub fn build(self) -> VariantRegistry<F> {
        VariantRegistry {
            entries: self.entries,
        }
    }
}

///
/// TaggedFamily
///
/// One polymorphic family: the discriminator kind type, the wire field that
/// carries it, and the family's registry. The kind of a value is
/// type-determined, never caller-supplied.
///

pub trait TaggedFamily: Clone + Sized + 'static {
    type Kind: KindTag;

    /// Wire field name carrying the discriminator.
    const KIND_FIELD: &'static str;

    fn kind(&self) -> Self::Kind;

    fn registry() -> &'static VariantRegistry<Self>;
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::wire_kind;
    use std::sync::LazyLock;

    wire_kind! {
        enum ToggleKind {
            On => "On",
            Off => "Off",
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Toggle {
        On,
        Off,
    }

    static REGISTRY: LazyLock<VariantRegistry<Toggle>> = LazyLock::new(|| {
        VariantRegistry::builder()
            .register(ToggleKind::On, |_| Ok(Toggle::On), |_, b| b)
            .register(ToggleKind::Off, |_| Ok(Toggle::Off), |_, b| b)
            .build()
    });

    impl TaggedFamily for Toggle {
        type Kind = ToggleKind;
        const KIND_FIELD: &'static str = "Kind";

        fn kind(&self) -> ToggleKind {
            match self {
                Self::On => ToggleKind::On,
                Self::Off => ToggleKind::Off,
            }
        }

        fn registry() -> &'static VariantRegistry<Self> {
            &REGISTRY
        }
    }

    #[test]
    fn registered_kinds_resolve() {
        assert!(Toggle::registry().resolve(ToggleKind::On).is_some());
        assert!(Toggle::registry().resolve(ToggleKind::Off).is_some());
        assert_eq!(Toggle::registry().len(), 2);
    }

    #[test]
    fn sentinel_resolves_to_none_without_panicking() {
        assert!(Toggle::registry().resolve(ToggleKind::Invalid).is_none());
    }

    #[test]
    fn kinds_iterate_in_tag_order() {
        let kinds: Vec<_> = Toggle::registry().kinds().collect();
        assert_eq!(kinds, vec![ToggleKind::On, ToggleKind::Off]);
    }
}
