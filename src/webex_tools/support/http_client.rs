//! HTTP implementation of [`WebexApi`] on top of a pooled `reqwest` client
//!
//! The client is built once at startup from validated configuration and shared
//! by every invocation; `reqwest` reuses connections internally.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::types::{ItemsEnvelope, Membership, Message, Person, Room};
use super::webex_client::{Params, PlatformError, PlatformErrorKind, PlatformResult, WebexApi};
use crate::config::WebexConfig;
use crate::constants::{
    FORMAT_HTML, FORMAT_MARKDOWN, PARAM_FORMAT, PARAM_HTML, PARAM_MARKDOWN, PARAM_MEMBERSHIP_ID,
    PARAM_ROOM_ID, PARAM_TEXT,
};
use crate::error::{Error, Result};

const ROOMS: &str = "rooms";
const MESSAGES: &str = "messages";
const MEMBERSHIPS: &str = "memberships";
const PEOPLE: &str = "people";
const ME: &str = "me";

/// Webex error body, e.g. `{"message": "...", "errors": [...], "trackingId": "..."}`
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ErrorBody {
    message:     Option<String>,
    errors:      Vec<ErrorDetail>,
    tracking_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorDetail {
    description: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or_else(|| self.errors.into_iter().find_map(|detail| detail.description))
    }
}

/// Authenticated handle to the Webex REST API
pub struct WebexHttpClient {
    client:       Client,
    base_url:     Url,
    access_token: String,
}

impl WebexHttpClient {
    pub fn new(config: &WebexConfig) -> Result<Self> {
        Self::with_options(
            config.access_token(),
            &config.api_base_url,
            Duration::from_secs(config.timeout_seconds),
            config.validate_ssl,
        )
    }

    pub fn with_options(
        access_token: &str,
        base_url: &str,
        timeout: Duration,
        validate_ssl: bool,
    ) -> Result<Self> {
        if access_token.trim().is_empty() {
            return Err(Error::AuthConfiguration(
                "the access token is empty".to_string(),
            ));
        }

        let base_url = Url::parse(base_url).map_err(|e| {
            Error::Configuration(format!("invalid API base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .danger_accept_invalid_certs(!validate_ssl)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.trim().to_string(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PlatformResult<T> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            PlatformError::new(
                PlatformErrorKind::InvalidResponse,
                format!("Failed to parse Webex response: {e}"),
            )
            .with_status(status.as_u16())
        })
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &Params,
    ) -> PlatformResult<Vec<T>> {
        let url = self.endpoint(&[resource]);
        debug!(%url, "GET list");
        let request = self.client.get(url).query(&query_pairs(params));
        let envelope: ItemsEnvelope<T> = self.send(request).await?;
        Ok(envelope.items)
    }

    async fn get_one<T: DeserializeOwned>(&self, resource: &str, id: &str) -> PlatformResult<T> {
        let url = self.endpoint(&[resource, id]);
        debug!(%url, "GET");
        self.send(self.client.get(url)).await
    }

    async fn post<T: DeserializeOwned>(&self, resource: &str, body: &Params) -> PlatformResult<T> {
        let url = self.endpoint(&[resource]);
        debug!(%url, "POST");
        self.send(self.client.post(url).json(body)).await
    }

    async fn put<T: DeserializeOwned>(
        &self,
        resource: &str,
        id_param: &str,
        params: &Params,
    ) -> PlatformResult<T> {
        let (id, body) = split_path_param(params, id_param)?;
        let url = self.endpoint(&[resource, &id]);
        debug!(%url, "PUT");
        self.send(self.client.put(url).json(&body)).await
    }
}

#[async_trait]
impl WebexApi for WebexHttpClient {
    async fn list_rooms(&self, params: &Params) -> PlatformResult<Vec<Room>> {
        self.get_list(ROOMS, params).await
    }

    async fn create_room(&self, params: &Params) -> PlatformResult<Room> {
        self.post(ROOMS, params).await
    }

    async fn update_room(&self, params: &Params) -> PlatformResult<Room> {
        self.put(ROOMS, PARAM_ROOM_ID, params).await
    }

    async fn get_room(&self, params: &Params) -> PlatformResult<Room> {
        let (room_id, _) = split_path_param(params, PARAM_ROOM_ID)?;
        self.get_one(ROOMS, &room_id).await
    }

    async fn send_message(&self, params: &Params) -> PlatformResult<Message> {
        self.post(MESSAGES, &message_body(params)).await
    }

    async fn list_messages(&self, params: &Params) -> PlatformResult<Vec<Message>> {
        self.get_list(MESSAGES, params).await
    }

    async fn list_memberships(&self, params: &Params) -> PlatformResult<Vec<Membership>> {
        self.get_list(MEMBERSHIPS, params).await
    }

    async fn add_membership(&self, params: &Params) -> PlatformResult<Membership> {
        self.post(MEMBERSHIPS, params).await
    }

    async fn update_membership(&self, params: &Params) -> PlatformResult<Membership> {
        self.put(MEMBERSHIPS, PARAM_MEMBERSHIP_ID, params).await
    }

    async fn get_me(&self, _params: &Params) -> PlatformResult<Person> {
        self.get_one(PEOPLE, ME).await
    }

    async fn list_people(&self, params: &Params) -> PlatformResult<Vec<Person>> {
        self.get_list(PEOPLE, params).await
    }
}

fn transport_error(err: &reqwest::Error) -> PlatformError {
    let message = if err.is_timeout() {
        format!("Webex request timed out: {err}")
    } else {
        format!("Failed to reach Webex: {err}")
    };
    PlatformError::new(PlatformErrorKind::NetworkError, message)
}

async fn error_from_response(response: Response) -> PlatformError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    let body: ErrorBody = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default();
    let tracking_id = body.tracking_id.clone();
    let message = body.into_message().unwrap_or_else(|| {
        format!(
            "Webex API returned HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        )
    });

    PlatformError::new(PlatformErrorKind::from_status(status.as_u16()), message)
        .with_status(status.as_u16())
        .with_tracking_id(tracking_id)
        .with_retry_after(retry_after)
}

/// Split the path identifier off the parameters; the rest becomes the body
fn split_path_param(params: &Params, name: &str) -> PlatformResult<(String, Params)> {
    let mut body = params.clone();
    match body.remove(name) {
        Some(Value::String(id)) => Ok((id, body)),
        _ => Err(PlatformError::new(
            PlatformErrorKind::BadRequest,
            format!("'{name}' is required to address the resource"),
        )),
    }
}

fn query_pairs(params: &Params) -> Vec<(&str, String)> {
    params
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|value| (key.as_str(), value)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

/// Build the `POST /messages` body
///
/// `format` is not a Webex field: when the content only arrives as `text`, the
/// text is also sent in the requested rich field and `text` stays the plain
/// fallback. Explicit `markdown`/`html` always win.
fn message_body(params: &Params) -> Params {
    let mut body = params.clone();
    let format = body.remove(PARAM_FORMAT);

    let has_rich_content = body.contains_key(PARAM_MARKDOWN) || body.contains_key(PARAM_HTML);
    if !has_rich_content {
        let rich_field = match format.as_ref().and_then(Value::as_str) {
            Some(FORMAT_MARKDOWN) => Some(PARAM_MARKDOWN),
            Some(FORMAT_HTML) => Some(PARAM_HTML),
            _ => None,
        };
        if let (Some(field), Some(text)) = (rich_field, body.get(PARAM_TEXT).cloned()) {
            body.insert(field.to_string(), text);
        }
    }

    body
}
