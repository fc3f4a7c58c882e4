//! HTTP client for the Overpass interpreter endpoint.
//!
//! One GET per country with the Overpass QL query in the `data` parameter.
//! Every failure mode (transport, status, decoding, interpreter runtime
//! error) comes back as an [`OverpassError`]; the client keeps no state
//! between calls.

use std::time::Duration;

use moto_core::CountryCode;
use reqwest::{Client, Url};

use crate::error::OverpassError;
use crate::query::build_query;
use crate::types::{OverpassResponse, RawElement};

/// Client for an Overpass API interpreter: the public `overpass-api.de`
/// instance by default, or a mirror or mock server.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client for the interpreter at `endpoint`, normally
    /// `AppConfig::overpass_url`.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OverpassError::InvalidEndpoint`] if
    /// `endpoint` is not a valid URL.
    pub fn with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| OverpassError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    /// Fetches every matching element inside `country`.
    ///
    /// # Errors
    ///
    /// - [`OverpassError::Http`] on network failure or timeout.
    /// - [`OverpassError::UnexpectedStatus`] on a non-2xx response.
    /// - [`OverpassError::Deserialize`] if the body is not the expected JSON.
    /// - [`OverpassError::Runtime`] if the interpreter aborted the query.
    pub async fn fetch_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<RawElement>, OverpassError> {
        let url = self.build_url(&build_query(country));
        tracing::debug!(country = %country, "querying Overpass");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let body = response.text().await?;
        let payload: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Deserialize {
                context: format!("interpreter response for {country}"),
                source: e,
            })?;

        if let Some(remark) = payload.runtime_error() {
            return Err(OverpassError::Runtime(remark.to_owned()));
        }

        tracing::debug!(
            country = %country,
            elements = payload.elements.len(),
            "Overpass query returned"
        );
        Ok(payload.elements)
    }

    /// Appends the query as the percent-encoded `data` parameter.
    fn build_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("data", query);
        url
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let trimmed = s.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_owned(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
