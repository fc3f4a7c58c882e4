//! Supabase (`PostgREST`) table upsert.
//!
//! `POST /rest/v1/<table>?on_conflict=id` with
//! `Prefer: resolution=merge-duplicates` is `PostgREST`'s bulk upsert: rows
//! whose `id` already exists are updated in place, the rest are inserted.

use std::time::Duration;

use moto_core::{ShopRecord, StoreCredentials};
use reqwest::{Client, Url};

use crate::sink::{dedupe_last_wins, ShopSink};
use crate::{StoreError, SHOPS_TABLE};

const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=minimal";

/// Upserts shop records through the Supabase REST API.
pub struct RestSink {
    client: Client,
    endpoint: Url,
    key: String,
}

impl RestSink {
    /// Creates a sink for the `motorcycle_shops` table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`StoreError::InvalidUrl`] if the project URL does not parse.
    pub fn new(
        credentials: &StoreCredentials,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        Self::with_table(credentials, SHOPS_TABLE, timeout_secs, user_agent)
    }

    /// Creates a sink for an arbitrary table in the same project.
    ///
    /// # Errors
    ///
    /// See [`RestSink::new`].
    pub fn with_table(
        credentials: &StoreCredentials,
        table: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let raw = format!(
            "{}/rest/v1/{table}",
            credentials.url.trim_end_matches('/')
        );
        let mut endpoint = Url::parse(&raw).map_err(|e| StoreError::InvalidUrl {
            url: credentials.url.clone(),
            reason: e.to_string(),
        })?;
        endpoint.query_pairs_mut().append_pair("on_conflict", "id");

        Ok(Self {
            client,
            endpoint,
            key: credentials.key.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ShopSink for RestSink {
    async fn upsert(&self, records: &[ShopRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let rows = dedupe_last_wins(records);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", PREFER_UPSERT)
            .json(&rows)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(rows = rows.len(), "upserted batch via REST");
        Ok(())
    }
}
