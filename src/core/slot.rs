use chrono::{DateTime, FixedOffset, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::quantity::{EuroPerKilowattHour, KronaPerKilowattHour};

/// Width of one pricing interval in the day-ahead feed.
pub const SLOT_WIDTH: TimeDelta = TimeDelta::minutes(15);

/// One 15-minute pricing interval of the day-ahead curve.
///
/// The timestamps carry the feed's own UTC offset, so wall-clock hours are
/// read from the slot itself rather than from the process timezone.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PriceSlot {
    #[serde(rename = "SEK_per_kWh")]
    pub price: KronaPerKilowattHour,

    #[serde(rename = "EUR_per_kWh")]
    pub price_eur: EuroPerKilowattHour,

    /// SEK per EUR exchange rate used by the feed.
    #[serde(rename = "EXR")]
    pub exchange_rate: f64,

    #[serde(rename = "time_start")]
    pub starts_at: DateTime<FixedOffset>,

    #[serde(rename = "time_end")]
    pub ends_at: DateTime<FixedOffset>,
}

impl PriceSlot {
    /// Wall-clock hour of the slot start, in the slot's own offset.
    #[must_use]
    pub fn local_start_hour(&self) -> u32 {
        self.starts_at.hour()
    }
}

/// Half-open range of wall-clock hours: `[start, end)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
#[display("{start:02}:00..{end:02}:00")]
pub struct HourRange {
    pub start: u32,
    pub end: u32,
}

impl HourRange {
    #[must_use]
    pub const fn contains(self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }

    /// Number of 15-minute slots the range can hold.
    #[must_use]
    pub const fn slot_capacity(self) -> usize {
        self.end.saturating_sub(self.start) as usize * 4
    }
}
