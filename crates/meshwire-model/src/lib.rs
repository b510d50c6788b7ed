//! Typed data model for the meshwire REST surface: discriminator kinds,
//! per-family variant registries, the polymorphic codec, and the concrete
//! entity/value types.
//!
//! Registries are populated once behind a `LazyLock` and read-only
//! thereafter; decoding and encoding are pure, and every decoded value is
//! independently owned.

pub mod codec;
pub mod entities;
pub mod families;
pub mod kind;
pub mod registry;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        codec::{decode_page, decode_tagged, decode_tagged_object, encode_tagged},
        entities::{ApplicationInfo, HealthEvent, HealthState, NodeInfo, ServiceError},
        families::{
            BackupSchedule, BackupStorage, DiagnosticsSink, PartitionScheme, PropertyValue,
            ScalingMechanism, ScalingTrigger,
        },
        kind::KindTag,
        registry::TaggedFamily,
    };
}
