use std::num::NonZeroUsize;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::{
    api::elpriset::PriceArea,
    core::{BatteryEconomics, ChargePeriod, ChargePeriods, DischargePeriods, HourRange},
    prelude::*,
    quantity::{KilowattHours, KronaPerKilowattHour},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: fetch the prices, pick the charge windows, and push them to the cloud.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Fetch and print a day's price curve without touching the device.
    #[clap(name = "prices")]
    Prices(PricesArgs),
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Do not push the final schedule to FoxESS Cloud (dry run).
    #[clap(long)]
    pub dry_run: bool,

    /// Bidding area of the day-ahead market.
    #[clap(long = "price-class", default_value = "SE3", env = "PRICE_CLASS")]
    pub price_area: PriceArea,

    #[clap(flatten)]
    pub battery: BatteryArgs,

    #[clap(flatten)]
    pub periods: PeriodArgs,

    #[clap(flatten)]
    pub fox_ess_api: FoxEssApiArgs,
}

#[derive(Parser)]
pub struct PricesArgs {
    /// Date to fetch; defaults to today.
    #[clap(long)]
    pub date: Option<NaiveDate>,

    /// Bidding area of the day-ahead market.
    #[clap(long = "price-class", default_value = "SE3", env = "PRICE_CLASS")]
    pub price_area: PriceArea,
}

#[derive(Copy, Clone, Parser)]
pub struct BatteryArgs {
    /// Total usable battery capacity in kilowatt-hours.
    #[clap(long = "battery-capacity-kwh", default_value = "16.6", env = "BATTERY_CAPACITY_KWH")]
    pub capacity_kwh: f64,

    /// Replacement cost per kilowatt-hour of capacity, in SEK.
    #[clap(long = "battery-cost-per-kwh", default_value = "10000", env = "BATTERY_COST_PER_KWH")]
    pub cost_per_kwh: f64,

    /// Depth-of-discharge fraction per full cycle.
    #[clap(long = "battery-dod", default_value = "0.9", env = "BATTERY_DOD")]
    pub depth_of_discharge: f64,

    /// Rated number of full cycles before replacement.
    #[clap(long = "battery-cycle-life", default_value = "10000", env = "BATTERY_CYCLE_LIFE")]
    pub cycle_life: f64,

    /// Round-trip efficiency fraction.
    #[clap(long = "battery-efficiency", default_value = "0.95", env = "BATTERY_EFFICIENCY")]
    pub round_trip_efficiency: f64,
}

impl BatteryArgs {
    /// Validated battery economics; fails before any network call.
    pub fn economics(&self) -> Result<BatteryEconomics> {
        let economics = BatteryEconomics::builder()
            .capacity(KilowattHours(self.capacity_kwh))
            .cost_per_kilowatt_hour(KronaPerKilowattHour(self.cost_per_kwh))
            .depth_of_discharge(self.depth_of_discharge)
            .cycle_life(self.cycle_life)
            .round_trip_efficiency(self.round_trip_efficiency)
            .build();
        economics.validate()?;
        Ok(economics)
    }
}

#[derive(Copy, Clone, Parser)]
pub struct PeriodArgs {
    #[clap(
        long,
        default_value = "0",
        env = "AM_CHARGE_START_HOUR",
        value_parser = clap::value_parser!(u32).range(0..=12),
    )]
    pub am_charge_start_hour: u32,

    #[clap(
        long,
        default_value = "7",
        env = "AM_CHARGE_END_HOUR",
        value_parser = clap::value_parser!(u32).range(0..=12),
    )]
    pub am_charge_end_hour: u32,

    #[clap(
        long,
        default_value = "12",
        env = "PM_CHARGE_START_HOUR",
        value_parser = clap::value_parser!(u32).range(12..=23),
    )]
    pub pm_charge_start_hour: u32,

    #[clap(
        long,
        default_value = "17",
        env = "PM_CHARGE_END_HOUR",
        value_parser = clap::value_parser!(u32).range(12..=23),
    )]
    pub pm_charge_end_hour: u32,

    #[clap(
        long,
        default_value = "7",
        env = "AM_DISCHARGE_START_HOUR",
        value_parser = clap::value_parser!(u32).range(0..=12),
    )]
    pub am_discharge_start_hour: u32,

    #[clap(
        long,
        default_value = "9",
        env = "AM_DISCHARGE_END_HOUR",
        value_parser = clap::value_parser!(u32).range(0..=12),
    )]
    pub am_discharge_end_hour: u32,

    #[clap(
        long,
        default_value = "17",
        env = "PM_DISCHARGE_START_HOUR",
        value_parser = clap::value_parser!(u32).range(13..=23),
    )]
    pub pm_discharge_start_hour: u32,

    #[clap(
        long,
        default_value = "21",
        env = "PM_DISCHARGE_END_HOUR",
        value_parser = clap::value_parser!(u32).range(13..=23),
    )]
    pub pm_discharge_end_hour: u32,

    /// Number of 15-minute slots in the AM charge block.
    #[clap(long, default_value = "20", env = "AM_BLOCK_SLOTS")]
    pub am_block_slots: usize,

    /// Number of 15-minute slots in the PM charge block.
    #[clap(long, default_value = "8", env = "PM_BLOCK_SLOTS")]
    pub pm_block_slots: usize,
}

impl PeriodArgs {
    pub fn charge_periods(&self) -> Result<ChargePeriods> {
        Ok(ChargePeriods {
            am: charge_period(
                "AM",
                self.am_charge_start_hour,
                self.am_charge_end_hour,
                self.am_block_slots,
            )?,
            pm: charge_period(
                "PM",
                self.pm_charge_start_hour,
                self.pm_charge_end_hour,
                self.pm_block_slots,
            )?,
        })
    }

    pub fn discharge_periods(&self) -> Result<DischargePeriods> {
        Ok(DischargePeriods {
            am: hour_range(
                "AM discharge",
                self.am_discharge_start_hour,
                self.am_discharge_end_hour,
            )?,
            pm: hour_range(
                "PM discharge",
                self.pm_discharge_start_hour,
                self.pm_discharge_end_hour,
            )?,
        })
    }
}

fn hour_range(label: &str, start: u32, end: u32) -> Result<HourRange> {
    ensure!(start < end, "the {label} hour range {start}..{end} is empty");
    Ok(HourRange { start, end })
}

fn charge_period(label: &str, start: u32, end: u32, block_slots: usize) -> Result<ChargePeriod> {
    let hours = hour_range(&format!("{label} charge"), start, end)?;
    let block_slots = NonZeroUsize::new(block_slots)
        .with_context(|| format!("the {label} charge block must be at least one slot long"))?;
    ensure!(
        hours.slot_capacity() >= block_slots.get(),
        "the {label} charge range {hours} holds {capacity} slots, \
         fewer than the {block_slots} the block needs",
        capacity = hours.slot_capacity(),
    );
    Ok(ChargePeriod { hours, block_slots })
}

#[derive(Parser)]
pub struct FoxEssApiArgs {
    /// FoxESS Cloud API key.
    #[clap(long = "foxess-token", env = "FOXESS_TOKEN")]
    pub api_key: String,

    /// Inverter serial number.
    #[clap(long = "device-sn", alias = "serial", env = "DEVICE_SN")]
    pub serial_number: String,
}
