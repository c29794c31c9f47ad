use reqwest::Client;
use serde::Deserialize;
use anyhow::{Result, anyhow};

#[derive(Deserialize, Debug)]
struct FactResponse {
    fact: String,
    #[allow(dead_code)]
    #[serde(default)]
    length: usize,
}

/// Client for the public cat-fact API.
#[derive(Clone)]
pub struct FactClient {
    client: Client,
    url: String,
}

impl FactClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }

    /// One plain GET, no parameters. Returns the `fact` field of the body.
    pub async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("Fact request failed with status: {}", response.status()));
        }

        let fact_response: FactResponse = response.json().await?;
        tracing::debug!(fact = %fact_response.fact, "received fact");
        Ok(fact_response.fact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a loopback port.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/fact", addr)
    }

    #[tokio::test]
    async fn fetch_returns_fact_field() {
        let url = serve_once("200 OK", r#"{"fact":"Cats sleep a lot.","length":17}"#).await;
        let fact = FactClient::new(&url).fetch().await.unwrap();
        assert_eq!(fact, "Cats sleep a lot.");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let url = serve_once("503 Service Unavailable", r#"{"fact":"ignored"}"#).await;
        let err = FactClient::new(&url).fetch().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let url = serve_once("200 OK", r#"{"nope":true}"#).await;
        assert!(FactClient::new(&url).fetch().await.is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/fact", addr);
        assert!(FactClient::new(&url).fetch().await.is_err());
    }
}
