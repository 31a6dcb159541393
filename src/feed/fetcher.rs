use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::RawItem;

use super::TimelineSource;

const TIMELINE_PATH: &str = "statuses/user_timeline.json";
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Deserialize)]
struct TimelineEntry {
    id: i64,
    created_at: String,
    text: String,
}

/// HTTP client for a user timeline endpoint.
pub struct TimelineFetcher {
    client: Client,
    endpoint: Url,
    screen_name: String,
    bearer_token: String,
    page_size: Option<u32>,
}

impl TimelineFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let bearer_token = config
            .bearer_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Config("bearer_token is not set".to_string()))?;

        let base = Url::parse(&config.api_base_url).map_err(|e| {
            AppError::Config(format!("invalid api_base_url {:?}: {}", config.api_base_url, e))
        })?;
        let endpoint = base
            .join(TIMELINE_PATH)
            .map_err(|e| AppError::Config(format!("invalid timeline endpoint: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("timeline-ingest/1.0")
            .build()?;

        Ok(Self {
            client,
            endpoint,
            screen_name: config.screen_name.clone(),
            bearer_token,
            page_size: config.page_size,
        })
    }

    fn timeline_url(&self, since_id: i64) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("screen_name", &self.screen_name);
            query.append_pair("since_id", &since_id.to_string());
            if let Some(count) = self.page_size {
                query.append_pair("count", &count.to_string());
            }
        }
        url
    }

    /// Fetch one page of items newer than `since_id`, newest first.
    pub async fn fetch_since(&self, since_id: i64) -> Result<Vec<RawItem>> {
        let url = self.timeline_url(since_id);
        tracing::debug!("Fetching timeline since {}", since_id);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(AppError::TimelineApi(format!("HTTP {}: {}", status, error_text)));
        }

        let body = response.text().await?;
        let mut items = parse_timeline(&body)?;
        items.retain(|item| item.sequence_id > since_id);
        Ok(items)
    }
}

#[async_trait]
impl TimelineSource for TimelineFetcher {
    async fn fetch_since(&self, since_id: i64) -> Result<Vec<RawItem>> {
        TimelineFetcher::fetch_since(self, since_id).await
    }
}

fn parse_timeline(body: &str) -> Result<Vec<RawItem>> {
    let entries: Vec<TimelineEntry> = serde_json::from_str(body)?;

    entries
        .into_iter()
        .map(|entry| {
            let created_at = DateTime::parse_from_str(&entry.created_at, CREATED_AT_FORMAT)
                .map_err(|e| {
                    AppError::TimelineApi(format!(
                        "bad created_at {:?} on item {}: {}",
                        entry.created_at, entry.id, e
                    ))
                })?
                .with_timezone(&Utc);

            Ok(RawItem {
                sequence_id: entry.id,
                created_at,
                text: entry.text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PAGE: &str = r#"[
        {"id": 103, "created_at": "Sun Mar 02 18:32:00 +0000 2014", "text": "saw you at lunch mira costa", "retweeted": false},
        {"id": 102, "created_at": "Sun Mar 02 18:31:00 +0000 2014", "text": "i miss summer - redondo"},
        {"id": 101, "created_at": "Sun Mar 02 18:30:00 +0000 2014", "text": "nobody reads these"}
    ]"#;

    fn config_for(base: &str) -> Config {
        Config {
            api_base_url: base.to_string(),
            bearer_token: Some("test-token".to_string()),
            ..Config::default()
        }
    }

    /// Serve exactly one canned HTTP response and hand back the request line.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/1.1/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            request.lines().next().unwrap_or_default().to_string()
        });

        (base, handle)
    }

    #[test]
    fn test_parse_timeline_keeps_feed_order() {
        let items = parse_timeline(PAGE).unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.sequence_id).collect();
        assert_eq!(ids, vec![103, 102, 101]);
        assert_eq!(
            items[2].created_at,
            Utc.with_ymd_and_hms(2014, 3, 2, 18, 30, 0).unwrap()
        );
        assert_eq!(items[1].text, "i miss summer - redondo");
    }

    #[test]
    fn test_parse_timeline_rejects_bad_timestamp() {
        let body = r#"[{"id": 1, "created_at": "2014-03-02", "text": "x"}]"#;
        assert!(matches!(parse_timeline(body), Err(AppError::TimelineApi(_))));
    }

    #[test]
    fn test_timeline_url_carries_cursor_and_page_size() {
        let mut config = config_for("https://api.example.com/1.1/");
        config.page_size = Some(50);
        let fetcher = TimelineFetcher::new(&config).unwrap();

        let url = fetcher.timeline_url(100);
        assert_eq!(url.path(), "/1.1/statuses/user_timeline.json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("screen_name".to_string(), "Southbayfession".to_string())));
        assert!(pairs.contains(&("since_id".to_string(), "100".to_string())));
        assert!(pairs.contains(&("count".to_string(), "50".to_string())));
    }

    #[test]
    fn test_missing_token_is_a_config_error() {
        let config = Config {
            bearer_token: None,
            ..Config::default()
        };
        assert!(matches!(TimelineFetcher::new(&config), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_since_over_http() {
        let (base, server) = serve_once("200 OK", PAGE).await;
        let fetcher = TimelineFetcher::new(&config_for(&base)).unwrap();

        let items = fetcher.fetch_since(101).await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.sequence_id).collect();
        assert_eq!(ids, vec![103, 102]);

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /1.1/statuses/user_timeline.json?"));
        assert!(request_line.contains("since_id=101"));
    }

    #[tokio::test]
    async fn test_fetch_since_reports_http_failure() {
        let (base, server) = serve_once(
            "401 Unauthorized",
            r#"{"errors":[{"code":89,"message":"Invalid or expired token."}]}"#,
        )
        .await;
        let fetcher = TimelineFetcher::new(&config_for(&base)).unwrap();

        let err = fetcher.fetch_since(1).await.unwrap_err();
        match err {
            AppError::TimelineApi(msg) => assert!(msg.contains("401")),
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }
}
