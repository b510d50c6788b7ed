//! Validated scalar wrappers: typed identifiers that wrap one primitive and
//! enforce its format invariant at construction.

mod partition_id;
mod resource_name;

pub use partition_id::PartitionId;
pub use resource_name::ResourceName;
