//! Seams to the remote search service and their reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::protocol::{RebuildResponse, SearchRequest, SearchResponse};
use url::Url;

use crate::{config::Settings, error::ClientError};

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, ClientError>;
}

#[async_trait]
pub trait RebuildBackend: Send + Sync {
    async fn rebuild(&self) -> Result<RebuildResponse, ClientError>;
}

/// Talks to `POST /search` and `POST /rebuild` under one base URL.
pub struct HttpBackend {
    http: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        Self::with_timeout(settings.base_url()?, settings.request_timeout())
    }

    pub fn with_timeout(base_url: Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(limit) = timeout {
            builder = builder.timeout(limit);
        }
        let http = builder
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Config(format!("invalid endpoint '{path}': {err}")))
    }

    async fn decode<R: DeserializeOwned>(res: reqwest::Response) -> Result<R, ClientError> {
        let res = res.error_for_status()?;
        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, ClientError> {
        let res = self
            .http
            .post(self.endpoint("search")?)
            .json(&request)
            .send()
            .await?;
        Self::decode(res).await
    }
}

#[async_trait]
impl RebuildBackend for HttpBackend {
    async fn rebuild(&self) -> Result<RebuildResponse, ClientError> {
        let res = self.http.post(self.endpoint("rebuild")?).send().await?;
        Self::decode(res).await
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
