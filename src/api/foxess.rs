//! FoxESS Cloud client.

use std::time::Duration;

use chrono::Utc;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue},
};
use serde::Serialize;

pub use self::schedule::{ChargeWindows, TimeOfDay};
use self::response::Response;
use crate::prelude::*;

mod response;
mod schedule;

const SET_CHARGE_WINDOWS_PATH: &str = "op/v0/device/battery/forceChargeTime/set";

pub struct Api {
    client: Client,
    api_key: String,
}

impl Api {
    pub fn try_new(api_key: String) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Lang", HeaderValue::from_static("en"));
        headers.insert("Token", HeaderValue::from_str(&api_key)?);
        let client = Client::builder()
            .user_agent(clap::crate_name!())
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, api_key })
    }

    #[instrument(skip_all, fields(serial_number = serial_number))]
    pub async fn set_charge_windows(
        &self,
        serial_number: &str,
        windows: &ChargeWindows,
    ) -> Result {
        #[derive(Serialize)]
        struct SetChargeWindowsRequest<'a> {
            #[serde(rename = "sn")]
            serial_number: &'a str,

            #[serde(flatten)]
            windows: &'a ChargeWindows,
        }

        info!("setting…");
        self.call(SET_CHARGE_WINDOWS_PATH, &SetChargeWindowsRequest { serial_number, windows })
            .await
            .context("failed to set the charge windows")?;
        Ok(())
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    async fn call<B: Serialize>(&self, path: &str, body: B) -> Result<serde_json::Value> {
        let (timestamp, signature) = self.build_signature(path);
        let response = self
            .client
            .post(format!("https://www.foxesscloud.com/{path}"))
            .header("Timestamp", timestamp)
            .header("Signature", signature)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("failed to call `{path}`"))?
            .error_for_status()
            .with_context(|| format!("`{path}` failed"))?
            .json::<Response>()
            .await
            .with_context(|| format!("failed to deserialize `{path}` response"))?;
        let result = Result::<serde_json::Value>::from(response)?;
        debug!(?result, "call succeeded");
        Ok(result)
    }

    /// The API expects the `\r\n` separators as raw literal characters,
    /// not as actual line breaks.
    fn build_signature(&self, path: &str) -> (String, String) {
        let timestamp = Utc::now().timestamp_millis().to_string();
        let digest =
            md5::compute(format!(r"/{path}\r\n{0}\r\n{timestamp}", self.api_key).as_bytes());
        (timestamp, format!("{digest:x}"))
    }
}
