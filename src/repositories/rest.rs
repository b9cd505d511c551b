// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! HTTP transport for the remote fitness store

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use url::Url;

use crate::config::ApiConfig;
use crate::errors::{TrackerError, TrackerResult};
use crate::logging::AppLogger;

/// REST client bound to one API root and bearer token
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl RestClient {
    pub fn new(base_url: &str) -> TrackerResult<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_root(base_url)?,
            token: None,
        })
    }

    pub fn from_config(config: &ApiConfig) -> TrackerResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: parse_root(&config.base_url)?,
            token: config.token.clone(),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> TrackerResult<T> {
        let builder = self.request(Method::GET, path)?.query(query);
        let body = self.send("GET", path, builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, payload: &B) -> TrackerResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path)?.json(payload);
        let body = self.send("POST", path, builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// PUT whose response body carries nothing but a confirmation message
    pub(crate) async fn put_json<B>(&self, path: &str, payload: &B) -> TrackerResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let builder = self.request(Method::PUT, path)?.json(payload);
        self.send("PUT", path, builder).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> TrackerResult<()> {
        let builder = self.request(Method::DELETE, path)?;
        self.send("DELETE", path, builder).await?;
        Ok(())
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> TrackerResult<T> {
        let builder = self.request(Method::POST, path)?.multipart(form);
        let body = self.send("POST", path, builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn request(&self, method: Method, path: &str) -> TrackerResult<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let builder = self.client.request(method, url);

        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, method: &str, path: &str, builder: RequestBuilder) -> TrackerResult<String> {
        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status();

        AppLogger::log_api_request(method, path, status.as_u16(), started.elapsed().as_millis() as u64);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(TrackerError::Rejected {
                status: status.as_u16(),
                detail: rejection_detail(status, &body),
            });
        }

        Ok(body)
    }
}

/// Relative paths only resolve under the root when it ends with a slash
fn parse_root(raw: &str) -> TrackerResult<Url> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{}/", trimmed))?)
    }
}

/// Prefer the server's `detail` field, then the raw body, then the status reason
fn rejection_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|detail| detail.as_str()) {
            return detail.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        body.to_string()
    }
}

/// Content type of an uploaded image, from its file extension
pub(crate) fn image_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "image/jpeg",
    }
}
