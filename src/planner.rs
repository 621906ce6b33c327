use chrono::{Local, Timelike};

use crate::{
    api::{
        elpriset,
        foxess::{self, ChargeWindows},
    },
    cli::PlanArgs,
    core::{is_charging_worth_it, select_windows},
    prelude::*,
    tables::{build_price_table, build_schedule_table},
};

/// Hour of day after which the next day's auction results are published.
const DAY_AHEAD_PUBLICATION_HOUR: u32 = 14;

/// One planning run: fetch the curve, pick the windows, evaluate the
/// economics, and push exactly one schedule, enabled or disabled.
#[instrument(skip_all)]
pub async fn run(args: &PlanArgs) -> Result {
    let charge_periods = args.periods.charge_periods()?;
    let discharge_periods = args.periods.discharge_periods()?;
    let economics = args.battery.economics()?;

    let now = Local::now();
    let date = if now.hour() < DAY_AHEAD_PUBLICATION_HOUR {
        warn!("tomorrow's prices are unlikely to be published yet, planning for today");
        now.date_naive()
    } else {
        now.date_naive().succ_opt().context("tomorrow is out of range")?
    };

    let slots = elpriset::Api::try_new()?.get_day_prices(date, args.price_area).await?;
    ensure!(!slots.is_empty(), "the price curve for {date} is empty");
    println!("{}", build_price_table(&slots));

    let schedule = select_windows(&slots, &charge_periods)?;
    schedule.trace();
    println!("{}", build_schedule_table(&schedule));

    let fox_ess = foxess::Api::try_new(args.fox_ess_api.api_key.clone())?;
    if !is_charging_worth_it(&slots, &discharge_periods, &schedule, &economics)? {
        info!("charging is not economically worth it, disabling the charge windows");
        if !args.dry_run {
            fox_ess
                .set_charge_windows(&args.fox_ess_api.serial_number, &ChargeWindows::disabled())
                .await?;
        }
        return Ok(());
    }

    let windows = ChargeWindows::from_schedule(&schedule);
    windows.trace();
    if args.dry_run {
        info!("dry run, not pushing the schedule");
        return Ok(());
    }
    fox_ess.set_charge_windows(&args.fox_ess_api.serial_number, &windows).await?;
    info!("updated the charge windows");
    Ok(())
}
