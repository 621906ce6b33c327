use std::num::NonZeroUsize;

use chrono::{DateTime, FixedOffset};
use itertools::Itertools;

use crate::{
    core::{
        error::PlanError,
        slot::{HourRange, PriceSlot, SLOT_WIDTH},
    },
    prelude::*,
    quantity::KronaPerKilowattHour,
};

/// One charge period: the hour range to search and the block length to search for.
///
/// The block length is an independent parameter, not derived from the range
/// width. Callers validate at startup that the range can hold the block at
/// all; see [`crate::cli`].
#[derive(Copy, Clone, Debug)]
pub struct ChargePeriod {
    pub hours: HourRange,
    pub block_slots: NonZeroUsize,
}

#[derive(Copy, Clone, Debug)]
pub struct ChargePeriods {
    pub am: ChargePeriod,
    pub pm: ChargePeriod,
}

/// A selected contiguous run of slots. `ends_at` is exclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    pub prices: Vec<KronaPerKilowattHour>,
}

impl Window {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_price(&self) -> Option<KronaPerKilowattHour> {
        if self.prices.is_empty() {
            return None;
        }
        let sum: KronaPerKilowattHour = self.prices.iter().copied().sum();
        Some(KronaPerKilowattHour(sum.0 / self.prices.len() as f64))
    }

    fn trace(&self, label: &str) {
        info!(
            window = label,
            starts_at = %self.starts_at,
            ends_at = %self.ends_at,
            n_slots = self.prices.len(),
            "selected charge window",
        );
    }
}

/// The two charge windows produced by one planning run.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    pub am: Window,
    pub pm: Window,
}

impl Schedule {
    pub fn trace(&self) {
        self.am.trace("AM");
        self.pm.trace("PM");
    }
}

/// Picks the cheapest contiguous charge block within each configured period.
///
/// The input sequence is expected to be chronological; filtering preserves
/// its order and the search runs over the filtered subsequence.
pub fn select_windows(slots: &[PriceSlot], periods: &ChargePeriods) -> Result<Schedule, PlanError> {
    Ok(Schedule {
        am: cheapest_block(slots, &periods.am)?,
        pm: cheapest_block(slots, &periods.pm)?,
    })
}

/// Fixed-size sliding-window minimum-sum search over the filtered pool.
fn cheapest_block(slots: &[PriceSlot], period: &ChargePeriod) -> Result<Window, PlanError> {
    let block_slots = period.block_slots.get();
    let candidates: Vec<&PriceSlot> =
        slots.iter().filter(|slot| period.hours.contains(slot.local_start_hour())).collect();
    if candidates.len() < block_slots {
        return Err(PlanError::InsufficientSlots {
            hours: period.hours,
            required: block_slots,
            available: candidates.len(),
        });
    }

    // `position_min` keeps the first of equally minimal sums, so ties resolve
    // to the earliest block.
    let start_index = candidates
        .windows(block_slots)
        .map(|block| block.iter().map(|slot| slot.price).sum::<KronaPerKilowattHour>())
        .position_min()
        .unwrap_or_default();

    let block = &candidates[start_index..start_index + block_slots];
    Ok(Window {
        starts_at: block[0].starts_at,
        ends_at: block[block_slots - 1].starts_at + SLOT_WIDTH,
        prices: block.iter().map(|slot| slot.price).collect(),
    })
}
