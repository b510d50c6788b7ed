use crate::{
    kind::{parse_wire_enum, wire_kind},
    registry::{TaggedFamily, VariantRegistry},
};
use chrono::{DateTime, NaiveTime};
use meshwire_core::{
    error::WireError,
    guard,
    wire::{WireBuilder, WireObject},
};
use std::sync::LazyLock;

/// Run times travel as RFC 3339 timestamps; only the time-of-day component
/// is meaningful, so encoding pins the date to year one.
fn encode_run_time(time: NaiveTime) -> String {
    format!("0001-01-01T{}Z", time.format("%H:%M:%S"))
}

fn parse_run_time(raw: &str) -> Result<NaiveTime, WireError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.time())
        .map_err(|_| {
            WireError::invalid_format("RunTimes", format!("'{raw}' is not an RFC 3339 time"))
        })
}

wire_kind! {
    /// Discriminator for backup schedule policies.
    pub enum BackupScheduleKind {
        TimeBased => "TimeBased",
        FrequencyBased => "FrequencyBased",
    }
}

wire_kind! {
    /// Day-of-week value set for time-based schedules.
    pub enum ScheduleDay {
        Sunday => "Sunday",
        Monday => "Monday",
        Tuesday => "Tuesday",
        Wednesday => "Wednesday",
        Thursday => "Thursday",
        Friday => "Friday",
        Saturday => "Saturday",
    }
}

wire_kind! {
    /// Recurrence granularity for time-based schedules.
    pub enum ScheduleFrequency {
        Daily => "Daily",
        Weekly => "Weekly",
    }
}

///
/// BackupSchedule
///
/// When backups are taken: at fixed wall-clock times, or every N minutes.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BackupSchedule {
    TimeBased(TimeBasedBackupSchedule),
    FrequencyBased(FrequencyBasedBackupSchedule),
}

impl BackupSchedule {
    fn encode_fields(&self, builder: WireBuilder) -> WireBuilder {
        match self {
            Self::TimeBased(v) => {
                let days: Vec<String> =
                    v.run_days().iter().map(|day| day.to_string()).collect();
                let times: Vec<String> = v
                    .run_times()
                    .iter()
                    .map(|time| encode_run_time(*time))
                    .collect();
                builder
                    .push("ScheduleFrequencyType", v.frequency().to_string())
                    .push("RunDays", days)
                    .push("RunTimes", times)
            }
            Self::FrequencyBased(v) => builder.push("IntervalInMinutes", v.interval_minutes()),
        }
    }
}

static REGISTRY: LazyLock<VariantRegistry<BackupSchedule>> = LazyLock::new(|| {
    VariantRegistry::builder()
        .register(
            BackupScheduleKind::TimeBased,
            TimeBasedBackupSchedule::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            BackupScheduleKind::FrequencyBased,
            FrequencyBasedBackupSchedule::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .build()
});

impl TaggedFamily for BackupSchedule {
    type Kind = BackupScheduleKind;
    const KIND_FIELD: &'static str = "ScheduleKind";

    fn kind(&self) -> BackupScheduleKind {
        match self {
            Self::TimeBased(_) => BackupScheduleKind::TimeBased,
            Self::FrequencyBased(_) => BackupScheduleKind::FrequencyBased,
        }
    }

    fn registry() -> &'static VariantRegistry<Self> {
        &REGISTRY
    }
}

///
/// TimeBasedBackupSchedule
///
/// Runs at listed wall-clock times; weekly schedules additionally name the
/// days they run on.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeBasedBackupSchedule {
    frequency: ScheduleFrequency,
    run_days: Vec<ScheduleDay>,
    run_times: Vec<NaiveTime>,
}

impl TimeBasedBackupSchedule {
    pub fn new(
        frequency: ScheduleFrequency,
        run_days: Vec<ScheduleDay>,
        run_times: Vec<NaiveTime>,
    ) -> Result<Self, WireError> {
        if run_times.is_empty() {
            return Err(WireError::MissingRequiredField { field: "RunTimes" });
        }
        if frequency == ScheduleFrequency::Weekly && run_days.is_empty() {
            return Err(WireError::MissingRequiredField { field: "RunDays" });
        }

        Ok(Self {
            frequency,
            run_days,
            run_times,
        })
    }

    #[must_use]
    pub const fn frequency(&self) -> ScheduleFrequency {
        self.frequency
    }

    #[must_use]
    pub fn run_days(&self) -> &[ScheduleDay] {
        &self.run_days
    }

    #[must_use]
    pub fn run_times(&self) -> &[NaiveTime] {
        &self.run_times
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<BackupSchedule, WireError> {
        let frequency = parse_wire_enum(obj.require_str("ScheduleFrequencyType")?, "ScheduleFrequencyType")?;

        let mut run_days = Vec::new();
        if let Some(raw_days) = obj.string_array_field("RunDays")? {
            run_days.reserve(raw_days.len());
            for raw in &raw_days {
                run_days.push(parse_wire_enum(raw, "RunDays")?);
            }
        }

        let raw_times = guard::require(obj.string_array_field("RunTimes")?, "RunTimes")?;
        let mut run_times = Vec::with_capacity(raw_times.len());
        for raw in &raw_times {
            run_times.push(parse_run_time(raw)?);
        }

        Ok(BackupSchedule::TimeBased(Self::new(
            frequency, run_days, run_times,
        )?))
    }
}

///
/// FrequencyBasedBackupSchedule
///
/// Runs every `interval_minutes`; the interval lies in [1, 2147483647]
/// inclusive, checked once at construction.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrequencyBasedBackupSchedule {
    interval_minutes: i64,
}

impl FrequencyBasedBackupSchedule {
    pub const INTERVAL_MIN: i64 = 1;
    pub const INTERVAL_MAX: i64 = i32::MAX as i64;

    pub fn new(interval_minutes: i64) -> Result<Self, WireError> {
        Ok(Self {
            interval_minutes: guard::require_in_range(
                interval_minutes,
                "IntervalInMinutes",
                Self::INTERVAL_MIN,
                Self::INTERVAL_MAX,
            )?,
        })
    }

    #[must_use]
    pub const fn interval_minutes(&self) -> i64 {
        self.interval_minutes
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<BackupSchedule, WireError> {
        Ok(BackupSchedule::FrequencyBased(Self::new(
            obj.require_i64("IntervalInMinutes")?,
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

    fn nine_am() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn frequency_interval_bounds_are_inclusive() {
        assert!(FrequencyBasedBackupSchedule::new(0).is_err());
        assert!(FrequencyBasedBackupSchedule::new(1).is_ok());
        assert!(FrequencyBasedBackupSchedule::new(2_147_483_647).is_ok());

        let err = FrequencyBasedBackupSchedule::new(2_147_483_648).unwrap_err();
        assert_eq!(
            err,
            WireError::OutOfRange {
                field: "IntervalInMinutes",
                value: 2_147_483_648,
                min: 1,
                max: 2_147_483_647,
            }
        );
    }

    #[test]
    fn frequency_based_round_trips() {
        let schedule =
            BackupSchedule::FrequencyBased(FrequencyBasedBackupSchedule::new(90).unwrap());
        let encoded = encode_tagged(&schedule).unwrap();
        assert_eq!(encoded["ScheduleKind"], json!("FrequencyBased"));
        assert_eq!(encoded["IntervalInMinutes"], json!(90));
        assert_eq!(decode_tagged::<BackupSchedule>(&encoded).unwrap(), schedule);
    }

    #[test]
    fn time_based_round_trips() {
        let schedule = BackupSchedule::TimeBased(
            TimeBasedBackupSchedule::new(
                ScheduleFrequency::Weekly,
                vec![ScheduleDay::Monday, ScheduleDay::Friday],
                vec![nine_am()],
            )
            .unwrap(),
        );
        let encoded = encode_tagged(&schedule).unwrap();
        assert_eq!(encoded["RunDays"], json!(["Monday", "Friday"]));
        assert_eq!(encoded["RunTimes"], json!(["0001-01-01T09:00:00Z"]));
        assert_eq!(decode_tagged::<BackupSchedule>(&encoded).unwrap(), schedule);
    }

    #[test]
    fn run_times_decode_from_rfc3339_timestamps() {
        let value = json!({
            "ScheduleKind": "TimeBased",
            "ScheduleFrequencyType": "Daily",
            "RunTimes": ["0001-01-01T09:00:00Z", "2024-06-01T17:30:00+00:00"],
        });
        let BackupSchedule::TimeBased(schedule) = decode_tagged(&value).unwrap() else {
            panic!("expected TimeBased");
        };
        assert_eq!(
            schedule.run_times(),
            &[nine_am(), NaiveTime::from_hms_opt(17, 30, 0).unwrap()]
        );
    }

    #[test]
    fn weekly_schedules_require_run_days() {
        let err =
            TimeBasedBackupSchedule::new(ScheduleFrequency::Weekly, vec![], vec![nine_am()])
                .unwrap_err();
        assert_eq!(err, WireError::MissingRequiredField { field: "RunDays" });

        // Daily schedules do not.
        assert!(
            TimeBasedBackupSchedule::new(ScheduleFrequency::Daily, vec![], vec![nine_am()])
                .is_ok()
        );
    }

    #[test]
    fn malformed_run_times_fail_with_invalid_format() {
        let value = json!({
            "ScheduleKind": "TimeBased",
            "ScheduleFrequencyType": "Daily",
            "RunTimes": ["9am"],
        });
        let err = decode_tagged::<BackupSchedule>(&value).unwrap_err();
        assert_eq!(
            err,
            WireError::invalid_format("RunTimes", "'9am' is not an RFC 3339 time")
        );

        // A bare time of day is not a full timestamp either.
        let value = json!({
            "ScheduleKind": "TimeBased",
            "ScheduleFrequencyType": "Daily",
            "RunTimes": ["09:00:00"],
        });
        assert!(decode_tagged::<BackupSchedule>(&value).is_err());
    }

    #[test]
    fn unknown_schedule_day_is_an_unknown_variant() {
        let value = json!({
            "ScheduleKind": "TimeBased",
            "ScheduleFrequencyType": "Weekly",
            "RunDays": ["Monday", "Fridag"],
            "RunTimes": ["09:00:00"],
        });
        let err = decode_tagged::<BackupSchedule>(&value).unwrap_err();
        assert_eq!(err, WireError::unknown_variant("RunDays", "Fridag"));
    }
}
