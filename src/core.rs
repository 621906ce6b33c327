pub use self::{
    economics::{BatteryEconomics, DischargePeriods, is_charging_worth_it},
    error::PlanError,
    selector::{ChargePeriod, ChargePeriods, Schedule, Window, select_windows},
    slot::{HourRange, PriceSlot, SLOT_WIDTH},
};

mod economics;
mod error;
mod selector;
mod slot;
