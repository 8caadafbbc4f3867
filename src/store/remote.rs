use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::core::plant::Plant;

/// Failure classes for the remote resource. Callers can tell a rejected
/// request (status present) from a request that never got an answer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the body's `message` field when the
    /// body parses as JSON, otherwise the raw body text.
    #[error("{url} returned {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
        body: Value,
        url: String,
    },
    /// Connection or name-resolution failure; no status was received.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 2xx response whose body did not parse as the expected shape.
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Thin client for the `/api/plants` REST resource.
#[derive(Clone)]
pub struct RemoteStore {
    base_url: String,
    http: Client,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder().build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/plants", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/api/plants/{}", self.base_url, id)
    }

    pub async fn list_plants(&self) -> Result<Vec<Plant>, ApiError> {
        let url = self.collection_url();
        log::debug!("GET {}", url);
        let resp = self.http.get(&url).send().await.map_err(|e| transport(&url, e))?;
        decode_body(check_status(resp, &url).await?, &url)
    }

    pub async fn create_plant(&self, plant: &Plant) -> Result<Plant, ApiError> {
        let url = self.collection_url();
        log::debug!("POST {} ({})", url, plant.name);
        let resp = self
            .http
            .post(&url)
            .json(plant)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        decode_body(check_status(resp, &url).await?, &url)
    }

    /// Full-record replace.
    pub async fn update_plant(&self, plant: &Plant) -> Result<Plant, ApiError> {
        let url = self.record_url(&plant.id);
        log::debug!("PUT {} ({})", url, plant.name);
        let resp = self
            .http
            .put(&url)
            .json(plant)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        decode_body(check_status(resp, &url).await?, &url)
    }

    pub async fn delete_plant(&self, id: &str) -> Result<(), ApiError> {
        let url = self.record_url(id);
        log::debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        check_status(resp, &url).await?;
        Ok(())
    }
}

fn transport(url: &str, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        source,
    }
}

/// Turn a non-2xx response into `ApiError::Status`, surfacing the body's
/// optional `message` field; pass the body text through on success.
async fn check_status(resp: reqwest::Response, url: &str) -> Result<String, ApiError> {
    let status = resp.status();
    let text = resp.text().await.map_err(|e| transport(url, e))?;
    if status.is_success() {
        return Ok(text);
    }

    let body: Value = serde_json::from_str(&text).unwrap_or(Value::String(text.clone()));
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("API request failed")
                    .to_string()
            } else {
                text
            }
        });

    Err(ApiError::Status {
        status,
        message,
        body,
        url: url.to_string(),
    })
}

fn decode_body<T: serde::de::DeserializeOwned>(text: String, url: &str) -> Result<T, ApiError> {
    serde_json::from_str(&text).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_at_base() {
        let store = RemoteStore::new("http://localhost:3000/").unwrap();
        assert_eq!(store.collection_url(), "http://localhost:3000/api/plants");
        assert_eq!(store.record_url("p1"), "http://localhost:3000/api/plants/p1");
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        // Nothing listens on this port
        let store = RemoteStore::new("http://127.0.0.1:9").unwrap();
        match store.list_plants().await {
            Err(ApiError::Transport { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:9/api/plants");
            }
            other => panic!("expected transport error, got {:?}", other.map(|_| ())),
        }
    }
}
