//! HTTP client for a real order-creation endpoint.
//!
//! Sends `POST {endpoint}` with an [`OrderRequest`] JSON body and expects
//! `{"success": bool, "orderId": string}` back.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::{OrderApi, OrderError, OrderReceipt, OrderRequest};

/// Default timeout for order requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct HttpOrderClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpOrderClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, OrderError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, OrderError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| OrderError::RequestFailed(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderApi for HttpOrderClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderReceipt, OrderError> {
        debug!(endpoint = %self.endpoint, account = %request.account, "posting order");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OrderError::Timeout(e.to_string())
                } else if e.is_connect() {
                    OrderError::Unreachable(format!("connection failed: {e}"))
                } else {
                    OrderError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(OrderError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        response
            .json::<OrderReceipt>()
            .await
            .map_err(|e| OrderError::InvalidResponse(format!("failed to parse order response: {e}")))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn request() -> OrderRequest {
        OrderRequest {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            country: "UK".into(),
            account: "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM".into(),
        }
    }

    /// Answers one request with `status` and `body`; yields the raw request.
    async fn one_shot_server(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/orders", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !request_complete(&raw) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(raw).unwrap()
        });
        (url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= end + 4 + length
    }

    #[tokio::test]
    async fn posts_camel_case_order_and_parses_receipt() {
        let (url, server) =
            one_shot_server("200 OK", r#"{"success":true,"orderId":"ORD-42"}"#).await;
        let client = HttpOrderClient::new(url).unwrap();

        let receipt = client.create_order(&request()).await.unwrap();
        assert!(receipt.success);
        assert_eq!(receipt.order_id, "ORD-42");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /orders HTTP/1.1"), "{raw}");
        assert!(raw.contains(r#""fullName":"Ada Lovelace""#), "{raw}");
        assert!(raw.contains(r#""email":"ada@example.com""#), "{raw}");
    }

    #[tokio::test]
    async fn error_status_is_request_failure() {
        let (url, server) = one_shot_server("500 Internal Server Error", "{}").await;
        let client = HttpOrderClient::new(url).unwrap();

        let err = client.create_order(&request()).await.unwrap_err();
        assert!(matches!(err, OrderError::RequestFailed(ref m) if m.contains("500")), "{err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_response() {
        let (url, server) = one_shot_server("200 OK", "<html>gateway</html>").await;
        let client = HttpOrderClient::new(url).unwrap();

        let err = client.create_order(&request()).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidResponse(_)), "{err:?}");
        server.await.unwrap();
    }

    #[test]
    fn client_keeps_endpoint() {
        let client = HttpOrderClient::new("https://orders.example.com/kyc").unwrap();
        assert_eq!(client.endpoint(), "https://orders.example.com/kyc");
        assert_eq!(client.name(), "http");
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails() {
        let client =
            HttpOrderClient::with_timeout("http://127.0.0.1:9/orders", Duration::from_secs(2))
                .unwrap();
        let err = client.create_order(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            OrderError::Unreachable(_) | OrderError::Timeout(_) | OrderError::RequestFailed(_)
        ));
    }
}
