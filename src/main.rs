#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod planner;
mod prelude;
mod quantity;
mod tables;

use chrono::Local;
use clap::{Parser, crate_version};

use crate::{
    api::elpriset,
    cli::{Args, Command},
    prelude::*,
    tables::build_price_table,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Plan(args) => planner::run(&args).await?,
        Command::Prices(args) => {
            let date = args.date.unwrap_or_else(|| Local::now().date_naive());
            let slots = elpriset::Api::try_new()?.get_day_prices(date, args.price_area).await?;
            println!("{}", build_price_table(&slots));
        }
    }

    info!("done!");
    Ok(())
}
