//! Auto-scaling policy families: the trigger that decides *when* to scale
//! and the mechanism that decides *how*.

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

const BOUND_MIN: i64 = 1;
const BOUND_MAX: i64 = i32::MAX as i64;

/// Non-negative load threshold pair with `lower <= upper`.
fn check_thresholds(lower: f64, upper: f64) -> Result<(), WireError> {
    if !(lower.is_finite() && lower >= 0.0) {
        return Err(WireError::invalid_format(
            "LowerLoadThreshold",
            format!("{lower} is not a non-negative load"),
        ));
    }
    if !(upper.is_finite() && upper >= 0.0) {
        return Err(WireError::invalid_format(
            "UpperLoadThreshold",
            format!("{upper} is not a non-negative load"),
        ));
    }
    if lower > upper {
        return Err(WireError::invalid_format(
            "UpperLoadThreshold",
            format!("upper threshold {upper} is below lower threshold {lower}"),
        ));
    }

    Ok(())
}

wire_kind! {
    /// Discriminator for scaling triggers.
    pub enum ScalingTriggerKind {
        AveragePartitionLoad => "AveragePartitionLoad",
        AverageServiceLoad => "AverageServiceLoad",
    }
}

wire_kind! {
    /// Discriminator for scaling mechanisms.
    pub enum ScalingMechanismKind {
        PartitionInstanceCount => "PartitionInstanceCount",
        AddRemoveIncrementalNamedPartition => "AddRemoveIncrementalNamedPartition",
    }
}

///
/// ScalingTrigger
///

#[derive(Clone, Debug, PartialEq)]
pub enum ScalingTrigger {
    AveragePartitionLoad(AveragePartitionLoadTrigger),
    AverageServiceLoad(AverageServiceLoadTrigger),
}

impl ScalingTrigger {
    fn encode_fields(&self, builder: WireBuilder) -> WireBuilder {
        match self {
            Self::AveragePartitionLoad(v) => builder
                .push("MetricName", v.metric_name())
                .push("LowerLoadThreshold", v.lower_load_threshold())
                .push("UpperLoadThreshold", v.upper_load_threshold())
                .push("ScaleIntervalInSeconds", v.scale_interval_in_seconds()),
            Self::AverageServiceLoad(v) => builder
                .push("MetricName", v.metric_name())
                .push("LowerLoadThreshold", v.lower_load_threshold())
                .push("UpperLoadThreshold", v.upper_load_threshold())
                .push("ScaleIntervalInSeconds", v.scale_interval_in_seconds())
                .push("UseOnlyPrimaryLoad", v.use_only_primary_load()),
        }
    }
}

static TRIGGER_REGISTRY: LazyLock<VariantRegistry<ScalingTrigger>> = LazyLock::new(|| {
    VariantRegistry::builder()
        .register(
            ScalingTriggerKind::AveragePartitionLoad,
            AveragePartitionLoadTrigger::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            ScalingTriggerKind::AverageServiceLoad,
            AverageServiceLoadTrigger::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .build()
});

impl TaggedFamily for ScalingTrigger {
    type Kind = ScalingTriggerKind;
    const KIND_FIELD: &'static str = "Kind";

    fn kind(&self) -> ScalingTriggerKind {
        match self {
            Self::AveragePartitionLoad(_) => ScalingTriggerKind::AveragePartitionLoad,
            Self::AverageServiceLoad(_) => ScalingTriggerKind::AverageServiceLoad,
        }
    }

    fn registry() -> &'static VariantRegistry<Self> {
        &TRIGGER_REGISTRY
    }
}

///
/// AveragePartitionLoadTrigger
///
/// Fires when a partition's average metric load leaves the inclusive
/// [lower, upper] band for a full scale interval.
///

#[derive(Clone, Debug, PartialEq)]
pub struct AveragePartitionLoadTrigger {
    metric_name: String,
    lower_load_threshold: f64,
    upper_load_threshold: f64,
    scale_interval_in_seconds: i64,
}

impl AveragePartitionLoadTrigger {
    pub fn new(
        metric_name: String,
        lower_load_threshold: f64,
        upper_load_threshold: f64,
        scale_interval_in_seconds: i64,
    ) -> Result<Self, WireError> {
        check_thresholds(lower_load_threshold, upper_load_threshold)?;

        Ok(Self {
            metric_name: guard::require_nonempty(metric_name, "MetricName")?,
            lower_load_threshold,
            upper_load_threshold,
            scale_interval_in_seconds: guard::require_in_range(
                scale_interval_in_seconds,
                "ScaleIntervalInSeconds",
                BOUND_MIN,
                BOUND_MAX,
            )?,
        })
    }

    #[must_use]
    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    #[must_use]
    pub const fn lower_load_threshold(&self) -> f64 {
        self.lower_load_threshold
    }

    #[must_use]
    pub const fn upper_load_threshold(&self) -> f64 {
        self.upper_load_threshold
    }

    #[must_use]
    pub const fn scale_interval_in_seconds(&self) -> i64 {
        self.scale_interval_in_seconds
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<ScalingTrigger, WireError> {
        Ok(ScalingTrigger::AveragePartitionLoad(Self::new(
            obj.require_string("MetricName")?,
            obj.require_f64("LowerLoadThreshold")?,
            obj.require_f64("UpperLoadThreshold")?,
            obj.require_i64("ScaleIntervalInSeconds")?,
        )?))
    }
}

///
/// AverageServiceLoadTrigger
///
/// Service-wide variant; `use_only_primary_load` restricts the average to
/// primary replicas and defaults to false when absent.
///

#[derive(Clone, Debug, PartialEq)]
pub struct AverageServiceLoadTrigger {
    metric_name: String,
    lower_load_threshold: f64,
    upper_load_threshold: f64,
    scale_interval_in_seconds: i64,
    use_only_primary_load: bool,
}

impl AverageServiceLoadTrigger {
    pub fn new(
        metric_name: String,
        lower_load_threshold: f64,
        upper_load_threshold: f64,
        scale_interval_in_seconds: i64,
        use_only_primary_load: bool,
    ) -> Result<Self, WireError> {
        check_thresholds(lower_load_threshold, upper_load_threshold)?;

        Ok(Self {
            metric_name: guard::require_nonempty(metric_name, "MetricName")?,
            lower_load_threshold,
            upper_load_threshold,
            scale_interval_in_seconds: guard::require_in_range(
                scale_interval_in_seconds,
                "ScaleIntervalInSeconds",
                BOUND_MIN,
                BOUND_MAX,
            )?,
            use_only_primary_load,
        })
    }

    #[must_use]
    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    #[must_use]
    pub const fn lower_load_threshold(&self) -> f64 {
        self.lower_load_threshold
    }

    #[must_use]
    pub const fn upper_load_threshold(&self) -> f64 {
        self.upper_load_threshold
    }

    #[must_use]
    pub const fn scale_interval_in_seconds(&self) -> i64 {
        self.scale_interval_in_seconds
    }

    #[must_use]
    pub const fn use_only_primary_load(&self) -> bool {
        self.use_only_primary_load
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<ScalingTrigger, WireError> {
        Ok(ScalingTrigger::AverageServiceLoad(Self::new(
            obj.require_string("MetricName")?,
            obj.require_f64("LowerLoadThreshold")?,
            obj.require_f64("UpperLoadThreshold")?,
            obj.require_i64("ScaleIntervalInSeconds")?,
            obj.bool_field("UseOnlyPrimaryLoad")?.unwrap_or(false),
        )?))
    }
}

///
/// ScalingMechanism
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScalingMechanism {
    PartitionInstanceCount(PartitionInstanceCountScaleMechanism),
    AddRemoveIncrementalNamedPartition(AddRemoveIncrementalNamedPartitionScalingMechanism),
}

impl ScalingMechanism {
    fn encode_fields(&self, builder: WireBuilder) -> WireBuilder {
        match self {
            Self::PartitionInstanceCount(v) => builder
                .push("MinInstanceCount", v.min_instance_count())
                .push("MaxInstanceCount", v.max_instance_count())
                .push("ScaleIncrement", v.scale_increment()),
            Self::AddRemoveIncrementalNamedPartition(v) => builder
                .push("MinPartitionCount", v.min_partition_count())
                .push("MaxPartitionCount", v.max_partition_count())
                .push("ScaleIncrement", v.scale_increment()),
        }
    }
}

static MECHANISM_REGISTRY: LazyLock<VariantRegistry<ScalingMechanism>> = LazyLock::new(|| {
    VariantRegistry::builder()
        .register(
            ScalingMechanismKind::PartitionInstanceCount,
            PartitionInstanceCountScaleMechanism::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            ScalingMechanismKind::AddRemoveIncrementalNamedPartition,
            AddRemoveIncrementalNamedPartitionScalingMechanism::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .build()
});

impl TaggedFamily for ScalingMechanism {
    type Kind = ScalingMechanismKind;
    const KIND_FIELD: &'static str = "Kind";

    fn kind(&self) -> ScalingMechanismKind {
        match self {
            Self::PartitionInstanceCount(_) => ScalingMechanismKind::PartitionInstanceCount,
            Self::AddRemoveIncrementalNamedPartition(_) => {
                ScalingMechanismKind::AddRemoveIncrementalNamedPartition
            }
        }
    }

    fn registry() -> &'static VariantRegistry<Self> {
        &MECHANISM_REGISTRY
    }
}

///
/// PartitionInstanceCountScaleMechanism
///
/// Scales by adding/removing stateless instances within one partition.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartitionInstanceCountScaleMechanism {
    min_instance_count: i64,
    max_instance_count: i64,
    scale_increment: i64,
}

impl PartitionInstanceCountScaleMechanism {
    pub fn new(
        min_instance_count: i64,
        max_instance_count: i64,
        scale_increment: i64,
    ) -> Result<Self, WireError> {
        let min_instance_count =
            guard::require_in_range(min_instance_count, "MinInstanceCount", BOUND_MIN, BOUND_MAX)?;
        let max_instance_count =
            guard::require_in_range(max_instance_count, "MaxInstanceCount", BOUND_MIN, BOUND_MAX)?;
        if min_instance_count > max_instance_count {
            return Err(WireError::invalid_format(
                "MaxInstanceCount",
                format!("max {max_instance_count} is below min {min_instance_count}"),
            ));
        }

        Ok(Self {
            min_instance_count,
            max_instance_count,
            scale_increment: guard::require_in_range(
                scale_increment,
                "ScaleIncrement",
                BOUND_MIN,
                BOUND_MAX,
            )?,
        })
    }

    #[must_use]
    pub const fn min_instance_count(&self) -> i64 {
        self.min_instance_count
    }

    #[must_use]
    pub const fn max_instance_count(&self) -> i64 {
        self.max_instance_count
    }

    #[must_use]
    pub const fn scale_increment(&self) -> i64 {
        self.scale_increment
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<ScalingMechanism, WireError> {
        Ok(ScalingMechanism::PartitionInstanceCount(Self::new(
            obj.require_i64("MinInstanceCount")?,
            obj.require_i64("MaxInstanceCount")?,
            obj.require_i64("ScaleIncrement")?,
        )?))
    }
}

///
/// AddRemoveIncrementalNamedPartitionScalingMechanism
///
/// Scales by adding/removing named partitions in increments.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddRemoveIncrementalNamedPartitionScalingMechanism {
    min_partition_count: i64,
    max_partition_count: i64,
    scale_increment: i64,
}

impl AddRemoveIncrementalNamedPartitionScalingMechanism {
    pub fn new(
        min_partition_count: i64,
        max_partition_count: i64,
        scale_increment: i64,
    ) -> Result<Self, WireError> {
        let min_partition_count = guard::require_in_range(
            min_partition_count,
            "MinPartitionCount",
            BOUND_MIN,
            BOUND_MAX,
        )?;
        let max_partition_count = guard::require_in_range(
            max_partition_count,
            "MaxPartitionCount",
            BOUND_MIN,
            BOUND_MAX,
        )?;
        if min_partition_count > max_partition_count {
            return Err(WireError::invalid_format(
                "MaxPartitionCount",
                format!("max {max_partition_count} is below min {min_partition_count}"),
            ));
        }

        Ok(Self {
            min_partition_count,
            max_partition_count,
            scale_increment: guard::require_in_range(
                scale_increment,
                "ScaleIncrement",
                BOUND_MIN,
                BOUND_MAX,
            )?,
        })
    }

    #[must_use]
    pub const fn min_partition_count(&self) -> i64 {
        self.min_partition_count
    }

    #[must_use]
    pub const fn max_partition_count(&self) -> i64 {
        self.max_partition_count
    }

    #[must_use]
    pub const fn scale_increment(&self) -> i64 {
        self.scale_increment
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<ScalingMechanism, WireError> {
        Ok(ScalingMechanism::AddRemoveIncrementalNamedPartition(
            Self::new(
                obj.require_i64("MinPartitionCount")?,
                obj.require_i64("MaxPartitionCount")?,
                obj.require_i64("ScaleIncrement")?,
            )?,
        ))
    }
}

///
/// TESTS
///
