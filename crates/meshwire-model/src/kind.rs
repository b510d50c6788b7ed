//! Discriminator tags: one closed, versionable kind enum per polymorphic
//! family, plus the plain wire enums that are not discriminators.
//!
//! Every kind enum carries an `Invalid` sentinel for forward compatibility.
//! The sentinel round-trips through `from_wire`/`to_wire` but is never
//! registered with a codec, so resolving it yields "not found" instead of a
//! guessed shape.

use meshwire_core::error::WireError;
use std::fmt;

///
/// KindTag
///
/// Contract for a family's discriminator enum. Wire spellings are exact
/// and case-sensitive; they are part of the server's OpenAPI contract.
///

pub trait KindTag: Copy + Eq + Ord + fmt::Debug + fmt::Display + Sized + 'static {
    /// Every registrable kind, excluding the `Invalid` sentinel.
    const ALL: &'static [Self];

    /// The unknown/future sentinel. Never registered.
    const INVALID: Self;

    /// Resolve an exact wire spelling; `None` for tags this build predates.
    fn from_wire(tag: &str) -> Option<Self>;

    /// The exact wire spelling of this kind.
    fn to_wire(self) -> &'static str;
}

/// Expand one discriminator (or plain wire) enum with its tag table.
///
/// The `Invalid` sentinel and its `"Invalid"` spelling are implicit.
macro_rules! wire_kind {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        $vis enum $name {
            /// Forward-compatibility sentinel; never registered.
            Invalid,
            $( $variant, )*
        }

        impl $crate::kind::KindTag for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant, )* ];
            const INVALID: Self = Self::Invalid;

            fn from_wire(tag: &str) -> Option<Self> {
                match tag {
                    "Invalid" => Some(Self::Invalid),
                    $( $wire => Some(Self::$variant), )*
                    _ => None,
                }
            }

            fn to_wire(self) -> &'static str {
                match self {
                    Self::Invalid => "Invalid",
                    $( Self::$variant => $wire, )*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::kind::KindTag::to_wire(*self))
            }
        }
    };
}

pub(crate) use wire_kind;

/// Resolve a plain (non-discriminator) wire enum field.
///
/// Strict contracts reject the sentinel: a field whose value set never
/// legitimately carries `"Invalid"` fails as an unknown variant.
pub fn parse_wire_enum<K: KindTag>(tag: &str, field: &'static str) -> Result<K, WireError> {
    K::from_wire(tag)
        .filter(|kind| *kind != K::INVALID)
        .ok_or_else(|| WireError::unknown_variant(field, tag))
}

/// Tolerant variant of [`parse_wire_enum`] for value sets whose wire
/// contract includes the sentinel spelling (e.g. health states).
pub fn parse_wire_enum_tolerant<K: KindTag>(tag: &str, field: &'static str) -> Result<K, WireError> {
    K::from_wire(tag).ok_or_else(|| WireError::unknown_variant(field, tag))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    wire_kind! {
        enum SampleKind {
            Alpha => "Alpha",
            BetaStore => "BetaStore",
        }
    }

    #[test]
    fn wire_spellings_are_exact_and_case_sensitive() {
        assert_eq!(SampleKind::from_wire("BetaStore"), Some(SampleKind::BetaStore));
        assert_eq!(SampleKind::from_wire("betastore"), None);
        assert_eq!(SampleKind::from_wire("Gamma"), None);
    }

    #[test]
    fn sentinel_round_trips_but_is_not_listed() {
        assert_eq!(SampleKind::from_wire("Invalid"), Some(SampleKind::Invalid));
        assert_eq!(SampleKind::Invalid.to_wire(), "Invalid");
        assert!(!SampleKind::ALL.contains(&SampleKind::INVALID));
        assert_eq!(SampleKind::ALL.len(), 2);
    }

    #[test]
    fn display_matches_the_wire_spelling() {
        assert_eq!(SampleKind::Alpha.to_string(), "Alpha");
    }

    #[test]
    fn strict_parse_rejects_the_sentinel() {
        let err = parse_wire_enum::<SampleKind>("Invalid", "Status").unwrap_err();
        assert_eq!(err, WireError::unknown_variant("Status", "Invalid"));
        assert_eq!(
            parse_wire_enum::<SampleKind>("Alpha", "Status").unwrap(),
            SampleKind::Alpha
        );
    }

    #[test]
    fn tolerant_parse_admits_the_sentinel() {
        assert_eq!(
            parse_wire_enum_tolerant::<SampleKind>("Invalid", "Status").unwrap(),
            SampleKind::Invalid
        );
        assert!(parse_wire_enum_tolerant::<SampleKind>("Gamma", "Status").is_err());
    }
}
