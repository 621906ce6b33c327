//! [Elpriset just nu](https://www.elprisetjustnu.se/elpris-api) day-ahead price client.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;

use crate::{core::PriceSlot, prelude::*};

/// Swedish bidding area of the day-ahead market.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, derive_more::Display)]
pub enum PriceArea {
    #[value(name = "SE1")]
    #[display("SE1")]
    Se1,

    #[value(name = "SE2")]
    #[display("SE2")]
    Se2,

    #[value(name = "SE3")]
    #[display("SE3")]
    Se3,

    #[value(name = "SE4")]
    #[display("SE4")]
    Se4,
}

pub struct Api(Client);

impl Api {
    pub fn try_new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(clap::crate_name!())
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self(client))
    }

    /// Fetches the quarter-hour price curve for one calendar date.
    ///
    /// The feed responds with `404 Not Found` until the day-ahead auction
    /// for that date has cleared; that surfaces here as an error.
    #[instrument(skip_all, fields(%date, %area))]
    pub async fn get_day_prices(&self, date: NaiveDate, area: PriceArea) -> Result<Vec<PriceSlot>> {
        let url = price_url(date, area);
        debug!(%url, "fetching…");
        let slots: Vec<PriceSlot> = self
            .0
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to call `{url}`"))?
            .error_for_status()
            .with_context(|| format!("`{url}` failed"))?
            .json()
            .await
            .context("failed to deserialize the price curve")?;
        info!(n_slots = slots.len(), "fetched the price curve");
        Ok(slots)
    }
}

fn price_url(date: NaiveDate, area: PriceArea) -> String {
    format!(
        "https://www.elprisetjustnu.se/api/v1/prices/{}_{area}.json",
        date.format("%Y/%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;

    #[test]
    fn test_price_url_zero_pads_the_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 2).unwrap();
        assert_eq!(
            price_url(date, PriceArea::Se3),
            "https://www.elprisetjustnu.se/api/v1/prices/2025/08-02_SE3.json",
        );
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_get_day_prices_ok() -> Result {
        let slots =
            Api::try_new()?.get_day_prices(Local::now().date_naive(), PriceArea::Se3).await?;
        assert!(!slots.is_empty());
        Ok(())
    }
}
