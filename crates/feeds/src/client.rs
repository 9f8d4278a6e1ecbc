//! Resilient JSON fetch client
//!
//! One logical retrieval may take several HTTP attempts: responses that are
//! transiently malformed (wrong content type, unparsable body, or an
//! upstream error envelope) are retried after a fixed delay up to a bounded
//! attempt count. Non-2xx statuses and network failures are hard errors and
//! fail the retrieval immediately.

use crate::error::{FeedError, Result};
use metrics::counter;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy for one logical retrieval
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Maximum number of HTTP attempts per retrieval
    pub attempts: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            retry_delay: Duration::from_millis(400),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client with bounded retries for transiently invalid responses
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    policy: FetchPolicy,
}

/// Outcome of a single attempt: hard errors abort the retrieval, transient
/// ones are retried.
enum AttemptError {
    Hard(FeedError),
    Transient(String),
}

impl FeedClient {
    pub fn new(policy: FetchPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(policy.timeout)
            .build()?;
        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Fetch a URL and return its body as a JSON value.
    ///
    /// Retries transiently invalid responses up to the policy's attempt
    /// count, sleeping `retry_delay` between attempts. Fails immediately on
    /// non-2xx statuses and network errors.
    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        for attempt in 1..=self.policy.attempts {
            match self.attempt(url).await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Hard(err)) => return Err(err),
                Err(AttemptError::Transient(reason)) => {
                    warn!(url, attempt, %reason, "transient upstream response");
                    counter!("pulse_fetch_retries_total").increment(1);
                    if attempt < self.policy.attempts {
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                }
            }
        }
        Err(FeedError::RetryExhausted {
            url: url.to_string(),
            attempts: self.policy.attempts,
        })
    }

    /// Fetch a URL and decode its body into `T`.
    ///
    /// Decoding failures surface as a single [`FeedError::Shape`], so block
    /// code never pokes at untyped JSON.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let value = self.fetch_json(url).await?;
        serde_json::from_value(value).map_err(|e| FeedError::Shape(e.to_string()))
    }

    async fn attempt(&self, url: &str) -> std::result::Result<Value, AttemptError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AttemptError::Hard(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Hard(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_json_compatible(&content_type) {
            return Err(AttemptError::Transient(format!(
                "content type {content_type:?} is not JSON"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Hard(e.into()))?;
        let value: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => return Err(AttemptError::Transient(format!("unparsable body: {e}"))),
        };

        // Some upstreams answer 200 with an error envelope instead of data
        if let Some(code) = value.get("code").and_then(Value::as_i64) {
            if code < 0 {
                return Err(AttemptError::Transient(format!(
                    "upstream error envelope code {code}"
                )));
            }
        }

        debug!(url, "fetched upstream payload");
        Ok(value)
    }
}

fn is_json_compatible(content_type: &str) -> bool {
    content_type.contains("json")
}
