//! Shared HTTP client.
//!
//! One `reqwest::Client` is built per run with a browser-identifying
//! `User-Agent` and a per-request timeout. There is no cookie store and no
//! retry: a failed request is reported once and the caller degrades.

use crate::error::StageError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return its body.
    ///
    /// Only `200 OK` counts as success. Network errors, timeouts and every
    /// other status map to [`StageError::SourceUnavailable`]; the status is
    /// kept when the server answered.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_text(&self, url: &str) -> Result<String, StageError> {
        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StageError::SourceUnavailable {
                status: Some(status.as_u16()),
                reason: format!("HTTP {status}"),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

fn transport(e: reqwest::Error) -> StageError {
    let reason = if e.is_timeout() {
        format!("timed out: {e}")
    } else {
        e.to_string()
    };
    StageError::SourceUnavailable {
        status: None,
        reason,
    }
}
