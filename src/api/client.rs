use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::config::PageConfig;
use crate::errors::PageError;
use crate::models::LoadMoreResponse;
use super::types::PageRequest;

/// Anything that can answer a "load more" request.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<LoadMoreResponse, PageError>;
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// `PageSource` backed by the page's own server.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpPageSource { client, base_url }
    }

    /// Point at the endpoint origin the page was configured with.
    pub fn from_config(client: Client, config: &PageConfig) -> Self {
        Self::new(client, config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<LoadMoreResponse, PageError> {
        let url = format!("{}{}", self.base_url, request.path());
        debug!(%url, "fetching next page");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error);
            warn!(status = status.as_u16(), detail = ?detail, "load more request failed");
            return Err(PageError::Http { status: status.as_u16(), detail });
        }

        let body = resp.text().await?;
        LoadMoreResponse::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use crate::token::PageToken;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn local_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    fn request(channel_id: &str, token: &str) -> PageRequest {
        PageRequest {
            channel_id: channel_id.to_string(),
            page_token: PageToken::normalize(Some(token)),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_sends_query_and_parses_body() {
        let router = Router::new().route(
            "/load_more_channel_videos",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let title = format!("{} / {}", params["channel_id"], params["page_token"]);
                Json(json!({
                    "all_videos": [
                        {"title": title,
                         "video_url": "https://www.youtube.com/watch?v=x1",
                         "thumbnail": "", "video_type": "Shorts"}
                    ],
                    "next_page_token": "NEXT+1"
                }))
            }),
        );
        let base = serve(router).await;
        let source = HttpPageSource::new(local_client(), format!("{base}/"));

        let page = source.fetch_page(&request("UC a&b", "CDIQ/AA=")).await.unwrap();
        assert_eq!(page.videos.len(), 1);
        assert_eq!(page.videos[0].title, "UC a&b / CDIQ/AA=");
        assert_eq!(page.next_page_token.as_str(), "NEXT+1");
    }

    #[tokio::test]
    async fn test_source_from_config_uses_configured_base_url() {
        let router = Router::new().route(
            "/load_more_channel_videos",
            get(|| async { Json(json!({"all_videos": [{"title": "configured"}], "next_page_token": null})) }),
        );
        let config = PageConfig {
            base_url: serve(router).await,
            ..PageConfig::default()
        };
        let source = HttpPageSource::from_config(local_client(), &config);
        assert_eq!(source.base_url(), config.base_url);

        let page = source.fetch_page(&request("UC1", "tok")).await.unwrap();
        assert_eq!(page.videos[0].title, "configured");
        assert!(page.next_page_token.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_page_maps_http_error_with_detail() {
        let router = Router::new().route(
            "/load_more_channel_videos",
            get(|| async {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "quota exceeded"})))
            }),
        );
        let source = HttpPageSource::new(local_client(), serve(router).await);

        match source.fetch_page(&request("UC1", "tok")).await {
            Err(PageError::Http { status, detail }) => {
                assert_eq!(status, 500);
                assert_eq!(detail.as_deref(), Some("quota exceeded"));
            }
            other => panic!("Expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_http_error_without_json_body() {
        let router = Router::new().route(
            "/load_more_channel_videos",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let source = HttpPageSource::new(local_client(), serve(router).await);

        let err = source.fetch_page(&request("UC1", "tok")).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_malformed_json() {
        let router = Router::new().route(
            "/load_more_channel_videos",
            get(|| async { "{\"all_videos\": [" }),
        );
        let source = HttpPageSource::new(local_client(), serve(router).await);

        match source.fetch_page(&request("UC1", "tok")).await {
            Err(PageError::Parse(_)) => {}
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_network_failure() {
        // Bind and drop to get a port nothing is listening on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpPageSource::new(local_client(), format!("http://{}", addr));
        match source.fetch_page(&request("UC1", "tok")).await {
            Err(PageError::Network(_)) => {}
            other => panic!("Expected network error, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let source = HttpPageSource::new(local_client(), "http://localhost:8000///");
        assert_eq!(source.base_url(), "http://localhost:8000");
    }
}
