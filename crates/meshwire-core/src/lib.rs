//! Core leaves of the meshwire data model: construction guards, the wire
//! error taxonomy, validated scalar wrappers, JSON wire-object helpers, and
//! cursor pagination.
//!
//! Everything in this crate is synchronous, pure, and immutable after
//! construction. Transport, retries, and serialization to bytes live in the
//! layers above.

pub mod error;
pub mod guard;
pub mod paging;
pub mod types;
pub mod wire;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No wire helpers or guards are re-exported here.
///

pub mod prelude {
    pub use crate::{
        error::{ErrorClass, WireError},
        paging::{ContinuationToken, PagedData},
        types::{PartitionId, ResourceName},
    };
}
