//! Gateway discovery through the directory web API

use crate::{DirectoryClient, DirectoryClientConfig};
use async_trait::async_trait;
use directory_api::{CmListResponse, GET_CM_LIST_PATH};
use directory_core::{DirectoryError, DirectorySource, Result};
use tracing::debug;

/// WebDirectory fetches the gateway list for a cell over HTTP
pub struct WebDirectory {
    client: DirectoryClient,
}

impl WebDirectory {
    pub fn new(client: DirectoryClient) -> Self {
        Self { client }
    }

    /// Create a web directory from connection settings
    pub fn from_config(config: DirectoryClientConfig) -> anyhow::Result<Self> {
        Ok(Self::new(DirectoryClient::new(config)?))
    }

    pub fn client(&self) -> &DirectoryClient {
        &self.client
    }
}

fn transport(err: reqwest::Error) -> DirectoryError {
    DirectoryError::Transport(err.to_string())
}

#[async_trait]
impl DirectorySource for WebDirectory {
    async fn fetch(&self, cell_id: u32) -> Result<Vec<String>> {
        let url = self.client.url(GET_CM_LIST_PATH);
        debug!("Requesting gateway list from {} for cell {}", url, cell_id);

        let body = self
            .client
            .inner()
            .get(&url)
            .query(&[("cellid", cell_id)])
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .text()
            .await
            .map_err(transport)?;

        let list = serde_json::from_str::<CmListResponse>(&body)?.response;
        if !list.is_ok() {
            return Err(DirectoryError::Protocol {
                result: list.result,
                message: list.message,
            });
        }
        if list.serverlist.is_empty() {
            return Err(DirectoryError::EmptyResult);
        }

        debug!("Directory returned {} gateways", list.serverlist.len());
        Ok(list.serverlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_core::{DirectoryCache, Endpoint};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn directory_for(server: &MockServer) -> WebDirectory {
        WebDirectory::from_config(DirectoryClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    async fn mount(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(GET_CM_LIST_PATH))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_returns_server_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GET_CM_LIST_PATH))
            .and(query_param("cellid", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": {
                    "serverlist": ["10.0.0.1:27017", "10.0.0.2:27018"],
                    "result": 1,
                    "message": ""
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let servers = directory_for(&server).fetch(25).await.unwrap();
        assert_eq!(servers, vec!["10.0.0.1:27017", "10.0.0.2:27018"]);
    }

    #[tokio::test]
    async fn test_non_success_result_is_protocol_error() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "response": {"serverlist": [], "result": 2, "message": "Service unavailable"}
            })),
        )
        .await;

        let err = directory_for(&server).fetch(0).await.unwrap_err();
        match err {
            DirectoryError::Protocol { result, message } => {
                assert_eq!(result, 2);
                assert_eq!(message, "Service unavailable");
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_list_is_empty_result() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "response": {"serverlist": [], "result": 1, "message": ""}
            })),
        )
        .await;

        let err = directory_for(&server).fetch(0).await.unwrap_err();
        assert!(matches!(err, DirectoryError::EmptyResult));
    }

    #[tokio::test]
    async fn test_http_error_status_is_transport_error() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(503)).await;

        let err = directory_for(&server).fetch(0).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Transport(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

        let err = directory_for(&server).fetch(0).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_directory_times_out() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({"response": {"serverlist": ["10.0.0.1:27017"], "result": 1}})),
        )
        .await;

        let directory = WebDirectory::from_config(DirectoryClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_millis(200),
        })
        .unwrap();

        let err = directory.fetch(0).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_directory_is_transport_error() {
        let directory = WebDirectory::from_config(DirectoryClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let err = directory.fetch(0).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Transport(_)));
    }

    #[tokio::test]
    async fn test_cache_initializes_from_web_directory() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "response": {
                    "serverlist": ["10.0.0.1:27017", "not-an-address", "[2001:db8::5]:27019"],
                    "result": 1,
                    "message": ""
                }
            })),
        )
        .await;

        let cache = DirectoryCache::new();
        let count = cache.initialize(&directory_for(&server), 0).await.unwrap();

        assert_eq!(count, 2);
        assert!(cache.is_ready().await);
        assert_eq!(
            cache.endpoints().await,
            vec![Endpoint::new("10.0.0.1", 27017), Endpoint::new("2001:db8::5", 27019)]
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "response": {"result": 8, "message": "Invalid cell"}
            })),
        )
        .await;

        let cache = DirectoryCache::new();
        cache.update(vec![Endpoint::new("10.0.0.9", 27017)]).await;

        let err = cache.initialize(&directory_for(&server), 999).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Protocol { result: 8, .. }));
        assert_eq!(cache.random().await.unwrap(), Endpoint::new("10.0.0.9", 27017));
    }
}
