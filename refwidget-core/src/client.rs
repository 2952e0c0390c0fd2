//! Authenticated HTTP client for the widget upsert endpoint.

use async_trait::async_trait;
use refwidget_commons::{http, redact_secrets};
use refwidget_config::Credentials;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

use crate::auth::basic_authorization;
use crate::error::FetchError;
use crate::request::WidgetRequest;

/// Decoded success body of the upsert call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetResponse {
    /// HTML fragment for the widget, when the API sends one.
    pub template: Option<String>,
}

impl WidgetResponse {
    /// Pick the template out of any JSON body. Only a non-empty string under
    /// `template` in a top-level object counts; every other shape yields none.
    pub fn from_value(value: &Value) -> Self {
        let template = value
            .get("template")
            .and_then(Value::as_str)
            .filter(|template| !template.is_empty())
            .map(str::to_string);
        Self { template }
    }

    /// The markup to display. A missing, null, or empty template falls back
    /// to `fallback`.
    pub fn into_html(self, fallback: &str) -> String {
        match self.template {
            Some(template) if !template.is_empty() => template,
            _ => fallback.to_string(),
        }
    }
}

/// Source of widget responses. [`WidgetClient`] is the production
/// implementation; hosts and tests can substitute their own.
#[async_trait]
pub trait WidgetFetcher: Send + Sync {
    /// Issue exactly one request and decode the response.
    async fn fetch(&self, request: &WidgetRequest) -> Result<WidgetResponse, FetchError>;
}

/// Client that performs the Basic-authenticated `PUT` against the referral API.
#[derive(Clone)]
pub struct WidgetClient {
    http_client: reqwest::Client,
    authorization: String,
}

impl WidgetClient {
    pub fn new(credentials: &Credentials, request_timeout: Option<Duration>) -> Self {
        Self::with_client(http::create_client(request_timeout), credentials)
    }

    pub fn with_client(http_client: reqwest::Client, credentials: &Credentials) -> Self {
        Self {
            http_client,
            authorization: basic_authorization(credentials),
        }
    }
}

impl std::fmt::Debug for WidgetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetClient")
            .field("authorization", &redact_secrets(&self.authorization))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WidgetFetcher for WidgetClient {
    async fn fetch(&self, request: &WidgetRequest) -> Result<WidgetResponse, FetchError> {
        tracing::debug!(
            method = "PUT",
            url = %request.url,
            authorization = %redact_secrets(&self.authorization),
            "requesting referral widget"
        );

        let response = self
            .http_client
            .put(&request.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, &self.authorization)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| {
                let err = FetchError::Network {
                    message: redact_secrets(&e.to_string()),
                };
                tracing::warn!(kind = err.kind(), error = %err, "widget request failed");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = FetchError::HttpStatus {
                status: status.as_u16(),
            };
            tracing::warn!(
                kind = err.kind(),
                status = %status,
                body = %redact_secrets(&body),
                "widget request returned an error status"
            );
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(|e| {
            let err = FetchError::Network {
                message: e.to_string(),
            };
            tracing::warn!(kind = err.kind(), error = %err, "failed to read widget response body");
            err
        })?;

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            let err = FetchError::JsonParse {
                message: e.to_string(),
            };
            tracing::warn!(kind = err.kind(), error = %err, "widget response is not valid JSON");
            err
        })?;
        let parsed = WidgetResponse::from_value(&value);

        tracing::debug!(
            status = %status,
            has_template = parsed.template.is_some(),
            "received referral widget"
        );
        Ok(parsed)
    }
}
