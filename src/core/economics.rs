use crate::{
    core::{error::PlanError, selector::Schedule, slot::{HourRange, PriceSlot}},
    prelude::*,
    quantity::{KilowattHours, KronaPerKilowattHour},
};

#[derive(Copy, Clone, Debug)]
pub struct DischargePeriods {
    pub am: HourRange,
    pub pm: HourRange,
}

impl DischargePeriods {
    fn contains(self, hour: u32) -> bool {
        self.am.contains(hour) || self.pm.contains(hour)
    }
}

/// Immutable battery economics, passed explicitly per planning run.
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct BatteryEconomics {
    /// Total usable capacity.
    pub capacity: KilowattHours,

    /// Replacement cost per kilowatt-hour of capacity.
    pub cost_per_kilowatt_hour: KronaPerKilowattHour,

    /// Fraction of the capacity cycled per full charge-discharge event.
    pub depth_of_discharge: f64,

    /// Rated number of full cycles before replacement.
    pub cycle_life: f64,

    /// Fraction of stored energy retrievable as usable output.
    pub round_trip_efficiency: f64,
}

impl BatteryEconomics {
    pub fn validate(&self) -> Result<(), PlanError> {
        let invalid = |parameter, requirement, value| {
            Err(PlanError::InvalidEconomics { parameter, requirement, value })
        };
        if self.capacity.0 <= 0.0 {
            return invalid("capacity", "positive", self.capacity.0);
        }
        if self.cost_per_kilowatt_hour.0 <= 0.0 {
            return invalid("cost per kWh", "positive", self.cost_per_kilowatt_hour.0);
        }
        if self.depth_of_discharge <= 0.0 || self.depth_of_discharge > 1.0 {
            return invalid("depth of discharge", "within (0, 1]", self.depth_of_discharge);
        }
        if self.cycle_life <= 0.0 {
            return invalid("cycle life", "positive", self.cycle_life);
        }
        if self.round_trip_efficiency <= 0.0 || self.round_trip_efficiency > 1.0 {
            return invalid("round-trip efficiency", "within (0, 1]", self.round_trip_efficiency);
        }
        Ok(())
    }

    /// Battery wear cost per delivered kilowatt-hour.
    ///
    /// Amortises the full replacement cost over the rated lifetime
    /// throughput, then inflates it by the round-trip losses.
    pub fn degradation_cost_per_kilowatt_hour(&self) -> Result<KronaPerKilowattHour, PlanError> {
        self.validate()?;
        let replacement_cost = self.cost_per_kilowatt_hour.0 * self.capacity.0;
        let usable_capacity_per_cycle = self.capacity.0 * self.depth_of_discharge;
        let cost_per_kilowatt_hour = replacement_cost / (self.cycle_life * usable_capacity_per_cycle);
        Ok(KronaPerKilowattHour(cost_per_kilowatt_hour / self.round_trip_efficiency))
    }
}

/// Decides whether executing the charge schedule beats the expected
/// discharge-time value net of battery wear.
///
/// An empty discharge pool, or a schedule with no charge prices, yields a
/// conservative `false`: without a discharge opportunity there is nothing to
/// justify charging.
pub fn is_charging_worth_it(
    slots: &[PriceSlot],
    discharge_periods: &DischargePeriods,
    schedule: &Schedule,
    economics: &BatteryEconomics,
) -> Result<bool, PlanError> {
    let discharge_prices: Vec<KronaPerKilowattHour> = slots
        .iter()
        .filter(|slot| discharge_periods.contains(slot.local_start_hour()))
        .map(|slot| slot.price)
        .collect();
    let Some(expected_discharge_price) = average(&discharge_prices) else {
        info!("no discharge slots within the configured ranges");
        return Ok(false);
    };
    info!(%expected_discharge_price, "expected average discharge price");

    let charge_prices: Vec<KronaPerKilowattHour> = schedule
        .am
        .prices
        .iter()
        .chain(&schedule.pm.prices)
        .copied()
        .collect();
    let Some(average_charge_price) = average(&charge_prices) else {
        info!("the selected charge windows are empty");
        return Ok(false);
    };
    info!(%average_charge_price, "average charge price in the selected windows");

    let degradation_cost = economics.degradation_cost_per_kilowatt_hour()?;
    info!(%degradation_cost, "degradation cost per delivered kWh");

    Ok(expected_discharge_price.0 - average_charge_price.0 - degradation_cost.0 > 0.0)
}

#[allow(clippy::cast_precision_loss)]
fn average(prices: &[KronaPerKilowattHour]) -> Option<KronaPerKilowattHour> {
    if prices.is_empty() {
        return None;
    }
    let sum: KronaPerKilowattHour = prices.iter().copied().sum();
    Some(KronaPerKilowattHour(sum.0 / prices.len() as f64))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::{
        selector::{
            Window, select_windows,
            tests::{default_periods, quarter_slots},
        },
        slot::SLOT_WIDTH,
    };

    fn economics() -> BatteryEconomics {
        BatteryEconomics::builder()
            .capacity(KilowattHours(10.0))
            .cost_per_kilowatt_hour(KronaPerKilowattHour(3000.0))
            .depth_of_discharge(0.8)
            .cycle_life(5000.0)
            .round_trip_efficiency(0.9)
            .build()
    }

    fn discharge_periods() -> DischargePeriods {
        DischargePeriods {
            am: HourRange { start: 7, end: 9 },
            pm: HourRange { start: 17, end: 21 },
        }
    }

    #[test]
    fn test_degradation_cost() -> Result {
        // 30000 SEK replacement over 5000 cycles of 8 kWh, at 90% efficiency.
        let cost = economics().degradation_cost_per_kilowatt_hour()?;
        assert_relative_eq!(cost.0, 0.75 / 0.9);
        Ok(())
    }

    #[test]
    fn test_degradation_cost_grows_as_the_battery_wears_faster() -> Result {
        let base = economics().degradation_cost_per_kilowatt_hour()?;

        let mut short_lived = economics();
        short_lived.cycle_life = 2500.0;
        assert!(short_lived.degradation_cost_per_kilowatt_hour()? > base);

        let mut lossy = economics();
        lossy.round_trip_efficiency = 0.7;
        assert!(lossy.degradation_cost_per_kilowatt_hour()? > base);
        Ok(())
    }

    #[test]
    fn test_invalid_parameters_are_named() {
        let cases = [
            ("capacity", BatteryEconomics { capacity: KilowattHours(0.0), ..economics() }),
            (
                "cost per kWh",
                BatteryEconomics {
                    cost_per_kilowatt_hour: KronaPerKilowattHour(-1.0),
                    ..economics()
                },
            ),
            (
                "depth of discharge",
                BatteryEconomics { depth_of_discharge: 1.5, ..economics() },
            ),
            ("cycle life", BatteryEconomics { cycle_life: 0.0, ..economics() }),
            (
                "round-trip efficiency",
                BatteryEconomics { round_trip_efficiency: 0.0, ..economics() },
            ),
        ];
        for (expected_parameter, economics) in cases {
            match economics.degradation_cost_per_kilowatt_hour() {
                Err(PlanError::InvalidEconomics { parameter, .. }) => {
                    assert_eq!(parameter, expected_parameter);
                }
                other => panic!("expected an economics error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_discharge_pool_is_not_worth_it() -> Result {
        // Prices only within the charge ranges, nothing dischargeable.
        let mut slots = quarter_slots(0, 7, 0.20, 0.0);
        slots.extend(quarter_slots(12, 17, 0.25, 0.0));
        let schedule = select_windows(&slots, &default_periods())?;

        assert!(!is_charging_worth_it(&slots, &discharge_periods(), &schedule, &economics())?);
        Ok(())
    }

    #[test]
    fn test_verdict_flips_at_the_break_even_price() -> Result {
        // Degradation cost of exactly 0.25 SEK/kWh.
        let economics = BatteryEconomics::builder()
            .capacity(KilowattHours(10.0))
            .cost_per_kilowatt_hour(KronaPerKilowattHour(1000.0))
            .depth_of_discharge(1.0)
            .cycle_life(4000.0)
            .round_trip_efficiency(1.0)
            .build();
        assert_relative_eq!(economics.degradation_cost_per_kilowatt_hour()?.0, 0.25);

        // Discharge slots at a flat 1.00 SEK/kWh.
        let slots = quarter_slots(7, 9, 1.0, 0.0);
        let window = |price| {
            let slots = quarter_slots(0, 5, price, 0.0);
            Window {
                starts_at: slots[0].starts_at,
                ends_at: slots[19].starts_at + SLOT_WIDTH,
                prices: slots.iter().map(|slot| slot.price).collect(),
            }
        };
        let schedule_at = |price| Schedule { am: window(price), pm: window(price) };

        let worth_it = |charge_price| {
            is_charging_worth_it(
                &slots,
                &discharge_periods(),
                &schedule_at(charge_price),
                &economics,
            )
        };
        assert!(worth_it(0.74)?);
        // Equality is not worth it, the margin must be strictly positive.
        assert!(!worth_it(0.75)?);
        assert!(!worth_it(0.76)?);
        Ok(())
    }

    #[test]
    fn test_empty_charge_windows_are_not_worth_it() -> Result {
        let slots = quarter_slots(7, 9, 1.0, 0.0);
        let empty = Window {
            starts_at: slots[0].starts_at,
            ends_at: slots[0].starts_at,
            prices: Vec::new(),
        };
        let schedule = Schedule { am: empty.clone(), pm: empty };

        assert!(!is_charging_worth_it(&slots, &discharge_periods(), &schedule, &economics())?);
        Ok(())
    }
}
