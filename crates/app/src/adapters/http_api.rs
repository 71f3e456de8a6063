use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use tzclock_core::domain::TimezoneEntry;
use tzclock_core::error::SyncError;
use tzclock_core::ports::{ServerTime, TimeApi};

/// reqwest-backed client for the time server
pub struct HttpTimeApi {
    client: reqwest::Client,
    base_url: String,
}

/// Raw `/api/time` body. Fields are loose because older servers send
/// numbers as strings.
#[derive(Debug, Deserialize)]
struct TimeResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default, rename = "gmtOffset")]
    gmt_offset: Option<Value>,
}

impl HttpTimeApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_body(&self, request: reqwest::RequestBuilder) -> Result<String, SyncError> {
        let response = request.send().await.map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        response.text().await.map_err(network_error)
    }
}

#[async_trait]
impl TimeApi for HttpTimeApi {
    async fn fetch_timezones(&self) -> Result<Vec<TimezoneEntry>, SyncError> {
        let body = self.get_body(self.client.get(self.url("/api/timezones"))).await?;

        let entries: Vec<TimezoneEntry> = serde_json::from_str(&body)
            .map_err(|e| SyncError::MalformedPayload(format!("timezone list: {}", e)))?;

        debug!("Server returned {} timezones", entries.len());
        Ok(entries)
    }

    async fn fetch_time(&self, zone: &str) -> Result<ServerTime, SyncError> {
        let request = self
            .client
            .get(self.url("/api/time"))
            .query(&[("zone", zone)]);
        let body = self.get_body(request).await?;

        let raw: TimeResponse = serde_json::from_str(&body)
            .map_err(|e| SyncError::MalformedPayload(format!("time response: {}", e)))?;

        let timestamp = match raw.timestamp.as_ref() {
            Some(value) => parse_seconds(value).ok_or_else(|| {
                SyncError::MalformedPayload(format!("non-numeric timestamp: {}", value))
            })?,
            None => {
                return Err(SyncError::MalformedPayload("missing timestamp".to_string()));
            }
        };

        let gmt_offset = raw.gmt_offset.as_ref().and_then(parse_seconds);
        debug!(
            "Server time for {}: {} (status {:?}, gmtOffset {:?})",
            zone, timestamp, raw.status, gmt_offset
        );

        Ok(ServerTime {
            status: raw.status,
            timestamp,
            gmt_offset,
        })
    }
}

/// Whole seconds from a JSON number or numeric string
fn parse_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.floor() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn network_error(error: reqwest::Error) -> SyncError {
    SyncError::Network(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(url: &str) -> HttpTimeApi {
        HttpTimeApi::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_seconds_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_seconds(&json!(1_700_000_000)), Some(1_700_000_000));
        assert_eq!(parse_seconds(&json!(1_700_000_000.75)), Some(1_700_000_000));
        assert_eq!(parse_seconds(&json!(" 42 ")), Some(42));
        assert_eq!(parse_seconds(&json!("soon")), None);
        assert_eq!(parse_seconds(&json!(null)), None);
        assert_eq!(parse_seconds(&json!([1])), None);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = client("http://example.com/");
        assert_eq!(api.url("/api/time"), "http://example.com/api/time");
    }

    #[tokio::test]
    async fn fetch_time_sends_zone_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/time")
            .match_query(Matcher::UrlEncoded("zone".into(), "America/New_York".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"success","timestamp":1700000000,"gmtOffset":-18000}"#)
            .create_async()
            .await;

        let time = client(&server.url())
            .fetch_time("America/New_York")
            .await
            .expect("time should be fetched");

        mock.assert_async().await;
        assert_eq!(time.timestamp, 1_700_000_000);
        assert_eq!(time.gmt_offset, Some(-18000));
        assert_eq!(time.status.as_deref(), Some("success"));
    }

    #[tokio::test]
    async fn fetch_time_rejects_missing_timestamp() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/time")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"failed","message":"unknown zone"}"#)
            .create_async()
            .await;

        let result = client(&server.url()).fetch_time("Nowhere/Land").await;
        assert!(matches!(result, Err(SyncError::MalformedPayload(_))));
    }

    #[tokio::test]
    async fn fetch_time_rejects_non_numeric_timestamp() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/time")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"success","timestamp":"later"}"#)
            .create_async()
            .await;

        let result = client(&server.url()).fetch_time("Europe/London").await;
        assert!(matches!(result, Err(SyncError::MalformedPayload(_))));
    }

    #[tokio::test]
    async fn fetch_time_maps_http_errors() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/time")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let result = client(&server.url()).fetch_time("Europe/London").await;
        assert_eq!(result, Err(SyncError::Status(503)));
    }

    #[tokio::test]
    async fn fetch_time_reports_unreachable_server() {
        // Nothing listens on port 9 locally
        let result = client("http://127.0.0.1:9").fetch_time("Europe/London").await;
        assert!(matches!(result, Err(SyncError::Network(_))));
    }

    #[tokio::test]
    async fn fetch_timezones_parses_list() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/timezones")
            .with_status(200)
            .with_body(
                r#"[{"zone":"Asia/Kolkata","name":"Kolkata","code":"IN","flag":"🇮🇳"},
                    {"zone":"Africa/Cairo","name":"Cairo","code":"EG"}]"#,
            )
            .create_async()
            .await;

        let zones = client(&server.url()).fetch_timezones().await.unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].flag, "🇮🇳");
        assert_eq!(zones[1].flag, "");
        assert_eq!(zones[1].display_flag(), tzclock_core::domain::flag_glyph("EG"));
    }

    #[tokio::test]
    async fn fetch_timezones_rejects_invalid_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/timezones")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let result = client(&server.url()).fetch_timezones().await;
        assert!(matches!(result, Err(SyncError::MalformedPayload(_))));
    }
}
