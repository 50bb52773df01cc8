use crate::domain::model::{ApiRequest, ResponseKeys};
use crate::domain::ports::ApiInvoker;
use crate::utils::error::{Result, VenuesError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

/// Connection and credential settings for [`FoursquareInvoker`].
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub version: String,
    pub mode: String,
    pub timeout: Duration,
}

/// [`ApiInvoker`] backed by reqwest.
///
/// Authenticates with the caller's access token when one is given and with the
/// application's client credentials otherwise, then strips the
/// `{ meta, response }` envelope down to the requested keys.
#[derive(Debug, Clone)]
pub struct FoursquareInvoker {
    settings: ApiSettings,
    base: Url,
    client: Client,
}

impl FoursquareInvoker {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let base = Url::parse(&settings.api_url)?;
        if base.cannot_be_a_base() {
            return Err(VenuesError::ConfigError {
                message: format!("API URL cannot carry a path: {}", settings.api_url),
            });
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("venues-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    /// Each segment is pushed whole, so a `/` inside one is percent-encoded.
    fn endpoint(&self, path: &[String]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| VenuesError::ConfigError {
                message: format!("API URL cannot carry a path: {}", self.settings.api_url),
            })?;
            segments.pop_if_empty();
            segments.extend(path);
        }
        Ok(url)
    }

    fn query(&self, request: &ApiRequest) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = request
            .params
            .iter()
            .flatten()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();

        match request.access_token.as_deref() {
            Some(token) if !token.is_empty() => {
                query.push(("oauth_token".to_string(), token.to_string()));
            }
            _ => {
                query.push(("client_id".to_string(), self.settings.client_id.clone()));
                query.push((
                    "client_secret".to_string(),
                    self.settings.client_secret.clone(),
                ));
            }
        }

        query.push(("v".to_string(), self.settings.version.clone()));
        query.push(("m".to_string(), self.settings.mode.clone()));
        query
    }
}

#[async_trait]
impl ApiInvoker for FoursquareInvoker {
    async fn call_api(&self, request: ApiRequest) -> Result<Value> {
        let url = self.endpoint(&request.segments)?;
        tracing::debug!("📡 Making API request to: {}", url);

        let response = self
            .client
            .get(url)
            .query(&self.query(&request))
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        tracing::debug!("📡 API response status: {}", status);

        let body = response.text().await.map_err(redact)?;
        let payload = unwrap_envelope(status, &body).inspect_err(|e| {
            tracing::error!("❌ {} failed: {}", request.path(), e);
        })?;

        select_keys(payload, &request.response_keys)
    }
}

/// The request URL carries credentials in its query string; keep it out of
/// errors that end up in logs.
fn redact(e: reqwest::Error) -> VenuesError {
    VenuesError::ApiError(e.without_url())
}

/// Parses the body and returns its `response` member, turning a non-200
/// `meta.code` into [`VenuesError::RemoteError`].
pub fn unwrap_envelope(status: StatusCode, body: &str) -> Result<Value> {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) if status.is_success() => return Err(e.into()),
        Err(_) => {
            return Err(VenuesError::HttpStatusError {
                status,
                body: body.to_string(),
            })
        }
    };

    match json.get("meta") {
        Some(meta) => {
            let code = meta.get("code").and_then(Value::as_u64).unwrap_or(0);
            if code != 200 {
                return Err(VenuesError::RemoteError {
                    code: u16::try_from(code).unwrap_or(0),
                    error_type: meta
                        .get("errorType")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    detail: meta
                        .get("errorDetail")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                });
            }
        }
        None if !status.is_success() => {
            return Err(VenuesError::HttpStatusError {
                status,
                body: body.to_string(),
            });
        }
        None => {}
    }

    match json {
        Value::Object(mut obj) => {
            obj.remove("response")
                .ok_or_else(|| VenuesError::MissingResponseKey {
                    key: "response".to_string(),
                })
        }
        _ => Err(VenuesError::MissingResponseKey {
            key: "response".to_string(),
        }),
    }
}

/// A single key yields that member; several keys yield an object holding the
/// ones that are present.
pub fn select_keys(response: Value, keys: &ResponseKeys) -> Result<Value> {
    let mut response = match response {
        Value::Object(obj) => obj,
        _ => Map::new(),
    };

    match keys {
        ResponseKeys::Single(key) => {
            response
                .remove(key)
                .ok_or_else(|| VenuesError::MissingResponseKey { key: key.clone() })
        }
        ResponseKeys::Many(keys) => {
            let mut selected = Map::new();
            for key in keys {
                if let Some(value) = response.remove(key) {
                    selected.insert(key.clone(), value);
                }
            }
            Ok(Value::Object(selected))
        }
    }
}
