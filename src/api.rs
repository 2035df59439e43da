// API client module: a small blocking HTTP client for the challenge
// server. Every call logs what it sends and what comes back, which is the
// main way to follow a run.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;

/// Identifiers handed out by a successful `auth` call. Both stay `None`
/// when the server refuses the credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
}

impl Session {
    /// Session described by an `auth` response; empty unless it succeeded.
    /// A successful response must carry both ids.
    pub fn from_auth(resp: &AuthResponse) -> Result<Self, ApiError> {
        if !resp.success {
            return Ok(Session::default());
        }
        let id = resp
            .session_id
            .ok_or(ApiError::IncompleteAuth { field: "sessionId" })?;
        let user_id = resp
            .user_id
            .ok_or(ApiError::IncompleteAuth { field: "userId" })?;
        Ok(Session {
            id: Some(id),
            user_id: Some(user_id),
        })
    }

    pub fn is_authorized(&self) -> bool {
        self.id.is_some()
    }
}

/// Login request payload.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthRequest {
    pub email: String,
    pub phone: String,
}

/// Response of the `auth` endpoint. The ids are only present on success.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Blocking client bound to one server base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        // blocking reqwest gives up after 30 s unless told otherwise
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(ApiError::Client)?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone())
    }

    /// Full URL for `endpoint`, joined to the base URL by a single slash.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// GET `endpoint` and decode the JSON reply as `T`. With a session, its
    /// id travels as the `sessionId` query parameter.
    pub fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        session: Option<&Session>,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        info!("requesting from {url}");

        let mut req = self.client.get(&url);
        if let Some(id) = session.and_then(|s| s.id) {
            req = req.query(&[("sessionId", id)]);
        }
        let res = req.send().map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        decode(endpoint, res)
    }

    /// POST `body` as JSON to `endpoint` and decode the reply as `T`. With a
    /// session, its id is added to the body as `sessionId` (null if unset).
    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        session: Option<&Session>,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        let body = request_body(endpoint, body, session)?;
        info!("sending to {url}:\n{}", pretty(&body));

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        decode(endpoint, res)
    }
}

fn request_body<B: Serialize>(
    endpoint: &str,
    body: &B,
    session: Option<&Session>,
) -> Result<Value, ApiError> {
    let not_object = || ApiError::BodyNotObject {
        endpoint: endpoint.to_string(),
    };
    let mut value = serde_json::to_value(body).map_err(|_| not_object())?;
    let map = value.as_object_mut().ok_or_else(not_object)?;
    if let Some(session) = session {
        map.insert("sessionId".into(), session.id.into());
    }
    Ok(value)
}

// The status is only logged; the body has to be JSON either way.
fn decode<T: DeserializeOwned>(endpoint: &str, res: Response) -> Result<T, ApiError> {
    let status = res.status();
    let text = res.text().map_err(|source| ApiError::Transport {
        endpoint: endpoint.to_string(),
        source,
    })?;
    let json: Value = serde_json::from_str(&text).map_err(|source| ApiError::InvalidJson {
        endpoint: endpoint.to_string(),
        status,
        source,
    })?;
    info!("response: {status}:\n{}", pretty(&json));

    serde_json::from_value(json).map_err(|source| ApiError::UnexpectedShape {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn pretty(json: &Value) -> String {
    serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string())
}

/// Log in with email and phone. A refused login is not an error: the
/// returned session is simply empty and later calls carry no id.
pub fn authorize(api: &ApiClient, email: &str, phone: &str) -> Result<Session, ApiError> {
    let req = AuthRequest {
        email: email.to_string(),
        phone: phone.to_string(),
    };
    let resp: AuthResponse = api.post("auth", &req, None)?;
    let session = Session::from_auth(&resp)?;
    if !resp.success {
        warn!("authorization was rejected, continuing without a session");
    }
    Ok(session)
}
