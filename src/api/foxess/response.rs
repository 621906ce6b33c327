use serde::Deserialize;

use crate::prelude::*;

/// Generic FoxESS Cloud response envelope.
#[derive(Deserialize)]
pub struct Response {
    /// Error code; non-zero means the request failed.
    #[serde(rename = "errno")]
    error_code: i32,

    #[serde(rename = "msg")]
    message: Option<String>,

    #[serde(rename = "result", default)]
    result: serde_json::Value,
}

impl From<Response> for Result<serde_json::Value> {
    fn from(response: Response) -> Self {
        if response.error_code == 0 {
            Ok(response.result)
        } else if let Some(message) = response.message {
            bail!(
                r#"FoxESS Cloud error {error_code} ("{message}")"#,
                error_code = response.error_code,
            )
        } else {
            bail!("FoxESS Cloud error {error_code}", error_code = response.error_code)
        }
    }
}
