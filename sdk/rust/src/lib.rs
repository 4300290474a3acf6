//! Client for the logger-level HTTP API.

use std::collections::BTreeMap;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// One logger as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerDescription {
    pub configured_level: Option<String>,
    pub effective_level: String,
}

/// Body of every query response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerLevels {
    pub levels: Vec<String>,
    pub loggers: BTreeMap<String, LoggerDescription>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelChange<'a> {
    configured_level: Option<&'a str>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("logger API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The base URL cannot carry path segments.
    #[error("{0} cannot be used as a base URL")]
    InvalidBaseUrl(Url),
}

pub struct LoggingClient {
    client: Client,
    base_url: Url,
}

impl LoggingClient {
    /// `base_url` is the full URL of the logger API, base path included.
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Every known logger.
    pub async fn list(&self) -> Result<LoggerLevels, ClientError> {
        let resp = self.client.get(self.base_url.clone()).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// A single logger, created on the service side if it was unknown.
    pub async fn get(&self, logger: &str) -> Result<LoggerLevels, ClientError> {
        let resp = self.client.get(self.logger_url(logger)?).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Set the configured level. The service accepts any case.
    pub async fn set_level(&self, logger: &str, level: &str) -> Result<(), ClientError> {
        self.post(logger, Some(level)).await
    }

    /// Clear the configured level so the logger inherits again.
    pub async fn reset(&self, logger: &str) -> Result<(), ClientError> {
        self.post(logger, None).await
    }

    async fn post(&self, logger: &str, level: Option<&str>) -> Result<(), ClientError> {
        let resp = self
            .client
            .post(self.logger_url(logger)?)
            .json(&LevelChange {
                configured_level: level,
            })
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    fn logger_url(&self, logger: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(logger);
        Ok(url)
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
