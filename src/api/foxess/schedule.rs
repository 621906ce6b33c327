use chrono::{DateTime, FixedOffset, Timelike};
use serde::Serialize;

use crate::{core::Schedule, prelude::*};

/// Wall-clock time of day, as the `forceChargeTime` endpoint expects it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, derive_more::Display)]
#[display("{hour:02}:{minute:02}")]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl From<DateTime<FixedOffset>> for TimeOfDay {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self { hour: instant.hour(), minute: instant.minute() }
    }
}

/// The `forceChargeTime` payload: two enable flags and two charge windows.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChargeWindows {
    pub enable1: bool,

    pub enable2: bool,

    #[serde(rename = "startTime1")]
    pub start_time_1: TimeOfDay,

    #[serde(rename = "endTime1")]
    pub end_time_1: TimeOfDay,

    #[serde(rename = "startTime2")]
    pub start_time_2: TimeOfDay,

    #[serde(rename = "endTime2")]
    pub end_time_2: TimeOfDay,
}

impl ChargeWindows {
    /// An all-zero payload that turns forced charging off entirely.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable1: false,
            enable2: false,
            start_time_1: TimeOfDay::default(),
            end_time_1: TimeOfDay::default(),
            start_time_2: TimeOfDay::default(),
            end_time_2: TimeOfDay::default(),
        }
    }

    /// Maps the selected AM and PM windows onto the device's two slots,
    /// in each window's own offset.
    #[must_use]
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            enable1: true,
            enable2: true,
            start_time_1: schedule.am.starts_at.into(),
            end_time_1: schedule.am.ends_at.into(),
            start_time_2: schedule.pm.starts_at.into(),
            end_time_2: schedule.pm.ends_at.into(),
        }
    }

    pub fn trace(&self) {
        info!(
            enabled = self.enable1,
            start = %self.start_time_1,
            end = %self.end_time_1,
            "charge window 1",
        );
        info!(
            enabled = self.enable2,
            start = %self.start_time_2,
            end = %self.end_time_2,
            "charge window 2",
        );
    }
}
