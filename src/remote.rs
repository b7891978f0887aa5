//! Client for the hosted relational backend.
//!
//! The backend exposes each table as a PostgREST resource under `{url}/rest/v1/{table}`.
//! Every request carries the anonymous key both as `apikey` and as a bearer token.
//! The client only exists when [`RemoteConfig::is_configured`] holds.

use crate::{
    config::RemoteConfig,
    core::repository::Repository,
    errors::{Error, Result},
    models::{Patch, Table},
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

/// HTTP client for one backend project
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RemoteClient {
    /// Builds a client, or `None` when the endpoint or key is missing.
    #[must_use]
    pub fn from_config(config: &RemoteConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let (Some(url), Some(key)) = (&config.url, &config.anon_key) else {
            return None;
        };
        Some(Self::new(url, key))
    }

    /// Builds a client for `base_url` authenticated with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// `{base_url}/rest/v1/{table}`
    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.as_str())
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Maps non-success statuses to [`Error::Remote`] and decodes the body.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }
        resp.json::<R>().await.map_err(Into::into)
    }

    async fn expect_success(resp: reqwest::Response) -> Result<()> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl Repository for RemoteClient {
    fn name(&self) -> &'static str {
        "remote"
    }

    #[instrument(skip(self))]
    async fn select_all(&self, table: Table) -> Result<Vec<Value>> {
        let req = self
            .http
            .get(self.table_url(table))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let resp = self.authed(req).send().await?;
        Self::parse(resp).await
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: Table, row: Value) -> Result<()> {
        let req = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(&[row]);
        let resp = self.authed(req).send().await?;
        Self::expect_success(resp).await
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, table: Table, id: &str, patch: &Patch) -> Result<usize> {
        let req = self
            .http
            .patch(self.table_url(table))
            .query(&[("id", eq_filter(id))])
            .header("Prefer", "return=representation")
            .json(patch);
        let resp = self.authed(req).send().await?;
        let rows: Vec<Value> = Self::parse(resp).await?;
        Ok(rows.len())
    }

    #[instrument(skip(self))]
    async fn delete(&self, table: Table, id: &str) -> Result<usize> {
        let req = self
            .http
            .delete(self.table_url(table))
            .query(&[("id", eq_filter(id))])
            .header("Prefer", "return=representation");
        let resp = self.authed(req).send().await?;
        let rows: Vec<Value> = Self::parse(resp).await?;
        Ok(rows.len())
    }

    #[instrument(skip(self, filter))]
    async fn find_one(&self, table: Table, filter: &[(&str, &str)]) -> Result<Option<Value>> {
        let mut query: Vec<(String, String)> = vec![
            ("select".to_string(), "*".to_string()),
            ("limit".to_string(), "1".to_string()),
        ];
        query.extend(
            filter
                .iter()
                .map(|(field, value)| ((*field).to_string(), eq_filter(value))),
        );
        let req = self.http.get(self.table_url(table)).query(&query);
        let resp = self.authed(req).send().await?;
        let rows: Vec<Value> = Self::parse(resp).await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_client_requires_url_and_key() {
        let mut config = RemoteConfig {
            url: Some("https://abc.supabase.co".to_string()),
            anon_key: None,
        };
        assert!(RemoteClient::from_config(&config).is_none());

        config.anon_key = Some("  ".to_string());
        assert!(RemoteClient::from_config(&config).is_none());

        config.anon_key = Some("anon".to_string());
        assert!(RemoteClient::from_config(&config).is_some());
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let client = RemoteClient::new("https://abc.supabase.co/", "anon");
        assert_eq!(
            client.table_url(Table::SliderImages),
            "https://abc.supabase.co/rest/v1/slider_images"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        // Port 9 (discard) on localhost is closed in any sane test environment
        let client = RemoteClient::new("http://127.0.0.1:9", "anon");
        assert!(client.select_all(Table::Services).await.is_err());
    }
}
