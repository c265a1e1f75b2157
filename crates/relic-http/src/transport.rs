// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `reqwest` transport for the game API.
//!
//! Each action is a `POST {base_url}/my/{character}/action/{verb}` with a
//! JSON body. Responses are handed back raw, whatever their status; the
//! transport never retries.

use std::time::Duration;

use async_trait::async_trait;
use relic_config::model::ServerConfig;
use relic_core::{RawResponse, RelicError, Transport, TransportError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use tracing::{debug, info};

/// HTTP transport holding the authenticated `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    /// Builds a transport from server configuration.
    pub fn new(config: &ServerConfig) -> Result<Self, RelicError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            RelicError::Config(format!("invalid server.base_url `{}`: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RelicError::Config(format!(
                "server.base_url `{base_url}` cannot be used as a base URL"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                RelicError::Config(format!("invalid server.token header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let timeout = config.request_timeout();
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(timeout)
            .build()
            .map_err(|e| RelicError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(base_url = %base_url, authenticated = config.token.is_some(), "HTTP transport initialized");

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Endpoint for one character's action verb.
    fn action_url(&self, character: &str, verb: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::Http {
                message: format!("base URL `{}` cannot take a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(["my", character, "action", verb]);
        Ok(url)
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                duration: self.timeout,
            }
        } else if err.is_connect() || err.is_request() {
            TransportError::Connect {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(
        &self,
        character: &str,
        verb: &str,
        payload: Vec<u8>,
    ) -> Result<RawResponse, TransportError> {
        let url = self.action_url(character, verb)?;

        let response = self
            .client
            .post(url)
            .body(payload)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    duration: self.timeout,
                }
            } else {
                TransportError::Body {
                    message: e.to_string(),
                }
            }
        })?;

        debug!(character, verb, status, bytes = body.len(), "action response received");
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str, token: Option<&str>) -> ServerConfig {
        ServerConfig {
            base_url: base_url.to_string(),
            token: token.map(str::to_string),
            request_timeout_secs: 5,
            user_agent: "relic-test".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_to_character_action_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/my/Alice/action/move"))
            .and(header("authorization", "Bearer secret"))
            .and(header("content-type", "application/json"))
            .and(header("user-agent", "relic-test"))
            .and(body_json(serde_json::json!({"x": 3, "y": 4})))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\":{}}"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&config(&server.uri(), Some("secret"))).unwrap();
        let response = transport
            .submit("Alice", "move", br#"{"x":3,"y":4}"#.to_vec())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"{\"data\":{}}");
    }

    #[tokio::test]
    async fn error_statuses_are_returned_not_raised() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/my/Bob/action/crafting"))
            .respond_with(ResponseTemplate::new(493).set_body_string("{\"error\":{}}"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&config(&server.uri(), None)).unwrap();
        let response = transport.submit("Bob", "crafting", b"{}".to_vec()).await.unwrap();
        assert_eq!(response.status, 493);
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&config(&server.uri(), None)).unwrap();
        let response = transport.submit("Bob", "rest", b"{}".to_vec()).await.unwrap();
        assert_eq!(response.status, 503);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut cfg = config(&server.uri(), None);
        cfg.request_timeout_secs = 1;
        let transport = HttpTransport::new(&cfg).unwrap();
        let err = transport.submit("Bob", "fight", b"{}".to_vec()).await.unwrap_err();
        assert!(err.is_timeout(), "got: {err:?}");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connect_error() {
        // Reserve a free port, then close it so nothing is listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base_url = format!("http://127.0.0.1:{port}");
        let transport = HttpTransport::new(&config(&base_url, None)).unwrap();
        let err = transport.submit("Bob", "fight", b"{}".to_vec()).await.unwrap_err();
        assert!(matches!(err, TransportError::Connect { .. }), "got: {err:?}");
    }

    #[test]
    fn character_names_are_path_encoded() {
        let transport = HttpTransport::new(&config("https://api.example.com/v1/", None)).unwrap();
        let url = transport.action_url("Sir Bob", "move").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/my/Sir%20Bob/action/move");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = HttpTransport::new(&config("not a url", None)).unwrap_err();
        assert!(matches!(err, RelicError::Config(_)));
    }
}
