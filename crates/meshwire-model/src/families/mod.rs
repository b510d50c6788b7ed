//! Polymorphic families: one tagged union per wire "Kind" hierarchy, each
//! variant an immutable record with a guarded constructor, registered into
//! the family's variant registry.

mod backup_schedule;
mod backup_storage;
mod diagnostics;
mod partition_scheme;
mod property_value;
mod scaling;

pub use backup_schedule::{
    BackupSchedule, BackupScheduleKind, FrequencyBasedBackupSchedule, ScheduleDay,
    ScheduleFrequency, TimeBasedBackupSchedule,
};
pub use backup_storage::{
    AzureBlobStore, BackupStorage, BackupStorageKind, DsmsAzureBlobStore, FileShare,
};
pub use diagnostics::{AzureInternalMonitoringPipeline, DiagnosticsSink, DiagnosticsSinkKind};
pub use partition_scheme::{
    NamedPartitionScheme, PartitionScheme, PartitionSchemeKind, UniformInt64RangePartitionScheme,
};
pub use property_value::{PropertyValue, PropertyValueKind};
pub use scaling::{
    AddRemoveIncrementalNamedPartitionScalingMechanism, AveragePartitionLoadTrigger,
    AverageServiceLoadTrigger, PartitionInstanceCountScaleMechanism, ScalingMechanism,
    ScalingMechanismKind, ScalingTrigger, ScalingTriggerKind,
};
