//! Authenticated access to the schedule backend.
//!
//! `DataClient` owns the auth and recovery rules; the actual HTTP call goes
//! through a [`Transport`] so the browser implementation (gloo-net) lives in
//! the frontend crate and tests can substitute an in-memory one.

use crate::config::{ClientConfig, INIT_DATA_BODY_FIELD, INIT_DATA_HEADERS};
use crate::dates::to_iso;
use crate::models::{
    Group, GroupId, PublicConfig, Schedule, SelectionUpdate, StoredSelection, Teacher, WhoAmI,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No Telegram init data available")]
    Unauthenticated,
    #[error("Backend requires reopening through Telegram (status {status})")]
    ReopenRequired { status: u16 },
    #[error("Server error {0}")]
    Status(u16),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to serialize request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// The user has to reopen the Mini App from the bot
    pub fn needs_reopen(&self) -> bool {
        matches!(self, ApiError::Unauthenticated | ApiError::ReopenRequired { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// The browser followed or stopped at a redirect
    pub redirected: bool,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a prepared request. Errors are network-level failures only; HTTP
/// error statuses come back as responses.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// Source of the host-provided auth token (Telegram `initData`)
pub trait AuthSource {
    fn init_data(&self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReopenReason {
    MissingInitData,
    Unauthorized,
    Redirect,
}

/// Shows the "reopen through the bot" view
pub trait RecoveryNotifier {
    fn reopen_required(&self, reason: ReopenReason);
}

/// Backend endpoints used by the app
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Groups,
    Teachers,
    GroupSchedule { id: GroupId, date: NaiveDate },
    TeacherSchedule { name: String, date: NaiveDate },
    UserSelection,
    WhoAmI,
    PublicConfig,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Groups => "/groups/".to_string(),
            Endpoint::Teachers => "/teachers/".to_string(),
            Endpoint::GroupSchedule { id, date } => {
                format!("/groups/{}/schedule/{}", id, to_iso(*date))
            }
            Endpoint::TeacherSchedule { name, date } => format!(
                "/teachers/{}/schedule/{}",
                urlencoding::encode(name),
                to_iso(*date)
            ),
            Endpoint::UserSelection => "/user/selection".to_string(),
            Endpoint::WhoAmI => "/whoami".to_string(),
            Endpoint::PublicConfig => "/config-public".to_string(),
        }
    }
}

struct ClientInner {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    auth: Box<dyn AuthSource>,
    recovery: Box<dyn RecoveryNotifier>,
    /// Set after a 401/3xx; later authenticated calls never hit the network
    reopen_latch: Cell<Option<u16>>,
}

/// API client for communicating with the schedule backend
#[derive(Clone)]
pub struct DataClient {
    inner: Rc<ClientInner>,
}

impl PartialEq for DataClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl DataClient {
    pub fn new(
        config: ClientConfig,
        transport: impl Transport + 'static,
        auth: impl AuthSource + 'static,
        recovery: impl RecoveryNotifier + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                config,
                transport: Box::new(transport),
                auth: Box::new(auth),
                recovery: Box::new(recovery),
                reopen_latch: Cell::new(None),
            }),
        }
    }

    /// A previous call was rejected with 401/3xx
    pub fn reopen_required(&self) -> bool {
        self.inner.reopen_latch.get().is_some()
    }

    pub async fn groups(&self) -> Result<Vec<Group>, ApiError> {
        self.get_json(&Endpoint::Groups).await
    }

    pub async fn teachers(&self) -> Result<Vec<Teacher>, ApiError> {
        self.get_json(&Endpoint::Teachers).await
    }

    pub async fn schedule(&self, endpoint: &Endpoint) -> Result<Schedule, ApiError> {
        self.get_json(endpoint).await
    }

    pub async fn stored_selection(&self) -> Result<StoredSelection, ApiError> {
        self.get_json(&Endpoint::UserSelection).await
    }

    pub async fn save_selection(&self, update: &SelectionUpdate) -> Result<(), ApiError> {
        self.post_json::<_, IgnoredAny>(&Endpoint::UserSelection, update)
            .await
            .map(|_| ())
    }

    pub async fn whoami(&self) -> Result<WhoAmI, ApiError> {
        self.get_json(&Endpoint::WhoAmI).await
    }

    /// Public endpoint: sent without init data and regardless of the latch
    pub async fn public_config(&self) -> Result<PublicConfig, ApiError> {
        let request = HttpRequest {
            method: Method::Get,
            url: self.inner.config.url(&Endpoint::PublicConfig.path()),
            headers: Vec::new(),
            body: None,
        };
        let response = self
            .inner
            .transport
            .send(request)
            .await
            .map_err(ApiError::Transport)?;
        if !response.ok() {
            return Err(ApiError::Status(response.status));
        }
        decode(&response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let response = self.execute(Method::Get, endpoint, None).await?;
        decode(&response)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;
        let response = self.execute(Method::Post, endpoint, Some(body)).await?;
        decode(&response)
    }

    async fn execute(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<Value>,
    ) -> Result<HttpResponse, ApiError> {
        let inner = &self.inner;

        let Some(init_data) = inner.auth.init_data().filter(|data| !data.is_empty()) else {
            log::warn!("No init data, refusing to call {}", endpoint.path());
            inner.recovery.reopen_required(ReopenReason::MissingInitData);
            return Err(ApiError::Unauthenticated);
        };

        if let Some(status) = inner.reopen_latch.get() {
            log::debug!("Reopen required, skipping {}", endpoint.path());
            inner.recovery.reopen_required(reason_for(status));
            return Err(ApiError::ReopenRequired { status });
        }

        let request = build_request(&inner.config, method, endpoint, body, &init_data)?;
        let response = inner
            .transport
            .send(request)
            .await
            .map_err(ApiError::Transport)?;

        if response.status == 401 || response.redirected || (300..400).contains(&response.status) {
            log::warn!(
                "{} answered {}, the app must be reopened through Telegram",
                endpoint.path(),
                response.status
            );
            inner.reopen_latch.set(Some(response.status));
            inner.recovery.reopen_required(reason_for(response.status));
            return Err(ApiError::ReopenRequired {
                status: response.status,
            });
        }

        if !response.ok() {
            return Err(ApiError::Status(response.status));
        }

        Ok(response)
    }
}

fn reason_for(status: u16) -> ReopenReason {
    if status == 401 {
        ReopenReason::Unauthorized
    } else {
        ReopenReason::Redirect
    }
}

fn build_request(
    config: &ClientConfig,
    method: Method,
    endpoint: &Endpoint,
    body: Option<Value>,
    init_data: &str,
) -> Result<HttpRequest, ApiError> {
    let mut headers: Vec<(&'static str, String)> = INIT_DATA_HEADERS
        .iter()
        .map(|name| (*name, init_data.to_string()))
        .collect();

    let body = match method {
        Method::Get => None,
        Method::Post => {
            let mut body = match body {
                Some(Value::Object(map)) => map,
                _ => serde_json::Map::new(),
            };
            body.insert(
                INIT_DATA_BODY_FIELD.to_string(),
                Value::String(init_data.to_string()),
            );
            headers.push(("Content-Type", "application/json".to_string()));
            Some(serde_json::to_string(&Value::Object(body)).map_err(ApiError::Encode)?)
        }
    };

    Ok(HttpRequest {
        method,
        url: config.url(&endpoint.path()),
        headers,
        body,
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::Decode)
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn test_missing_init_data_never_reaches_transport() {
        let (client, transport, recovery) = client(None);

        let result = client.groups().await;

        assert!(matches!(result, Err(ApiError::Unauthenticated)));
        assert!(transport.sent.borrow().is_empty());
        assert_eq!(*recovery.calls.borrow(), vec![ReopenReason::MissingInitData]);
    }

    #[tokio::test]
    async fn test_empty_init_data_counts_as_missing() {
        let (client, transport, _) = client(Some(""));
        assert!(client.whoami().await.is_err());
        assert!(transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_get_carries_init_data_headers() {
        let (client, transport, recovery) = client(Some("query_id=1&user=2"));
        transport.respond("/groups/", 200, r#"[{"id":42,"name":"IST-101"}]"#);

        let groups = client.groups().await.unwrap();

        assert_eq!(groups, vec![Group { id: 42, name: "IST-101".to_string() }]);
        let sent = transport.sent.borrow();
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].body, None);
        for name in INIT_DATA_HEADERS {
            assert!(sent[0]
                .headers
                .contains(&(name, "query_id=1&user=2".to_string())));
        }
        assert!(recovery.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_post_body_is_extended_with_init_data() {
        let (client, transport, _) = client(Some("token"));
        transport.respond("/user/selection", 200, r#"{"ok":true}"#);

        client
            .save_selection(&SelectionUpdate {
                group_id: None,
                teacher: Some("Иванов И.И.".to_string()),
            })
            .await
            .unwrap();

        let sent = transport.sent.borrow();
        let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["teacher"], "Иванов И.И.");
        assert_eq!(body["initData"], "token");
        assert!(body.get("group_id").is_none());
        assert!(sent[0]
            .headers
            .contains(&("Content-Type", "application/json".to_string())));
    }

    #[tokio::test]
    async fn test_unauthorized_triggers_recovery_once_and_latches() {
        let (client, transport, recovery) = client(Some("stale"));
        transport.respond("/whoami", 401, r#"{"detail":"Invalid Telegram Init Data"}"#);

        let result = client.whoami().await;

        assert!(matches!(result, Err(ApiError::ReopenRequired { status: 401 })));
        assert_eq!(*recovery.calls.borrow(), vec![ReopenReason::Unauthorized]);
        assert!(client.reopen_required());

        // Later calls short-circuit without touching the network
        let result = client.teachers().await;
        assert!(matches!(result, Err(ApiError::ReopenRequired { .. })));
        assert_eq!(transport.sent.borrow().len(), 1);
        assert_eq!(recovery.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_redirect_status_requires_reopen() {
        let (client, transport, recovery) = client(Some("token"));
        transport.respond("/user/selection", 302, "");

        let error = client.stored_selection().await.unwrap_err();

        assert!(error.needs_reopen());
        assert_eq!(*recovery.calls.borrow(), vec![ReopenReason::Redirect]);
    }

    #[tokio::test]
    async fn test_opaque_redirect_requires_reopen_and_latches() {
        let (client, transport, recovery) = client(Some("token"));
        transport.respond_opaque_redirect("/groups/");

        let result = client.groups().await;

        assert!(matches!(result, Err(ApiError::ReopenRequired { status: 0 })));
        assert_eq!(*recovery.calls.borrow(), vec![ReopenReason::Redirect]);
        assert!(client.reopen_required());
    }

    #[tokio::test]
    async fn test_public_config_still_fetched_while_latched() {
        let (client, transport, recovery) = client(Some("stale"));
        transport.respond("/whoami", 401, "");
        transport.respond("/config-public", 200, r#"{"bot_username":"rasp_bot"}"#);
        assert!(client.whoami().await.is_err());
        assert!(client.reopen_required());

        let config = client.public_config().await.unwrap();

        assert_eq!(config.bot_username.as_deref(), Some("rasp_bot"));
        assert_eq!(transport.sent_paths(), vec!["/whoami", "/config-public"]);
        assert_eq!(recovery.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_public_config_needs_no_init_data() {
        let (client, transport, recovery) = client(None);
        transport.respond("/config-public", 200, r#"{"bot_username":"rasp_bot","app_version":"1.2.0"}"#);

        let config = client.public_config().await.unwrap();

        assert_eq!(config.app_version.as_deref(), Some("1.2.0"));
        assert!(transport.sent.borrow()[0].headers.is_empty());
        assert!(recovery.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_error_statuses_and_bad_json() {
        let (client, transport, recovery) = client(Some("token"));
        transport.respond("/teachers/", 500, "oops");
        transport.respond("/groups/", 200, "not json");
        transport.fail("/whoami", "connection refused");

        assert!(matches!(client.teachers().await, Err(ApiError::Status(500))));
        assert!(matches!(client.groups().await, Err(ApiError::Decode(_))));
        assert!(matches!(client.whoami().await, Err(ApiError::Transport(_))));
        assert!(recovery.calls.borrow().is_empty());
        assert!(!client.reopen_required());
    }

    #[test]
    fn test_endpoint_paths() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            Endpoint::GroupSchedule { id: 42, date }.path(),
            "/groups/42/schedule/2024-03-15"
        );
        assert_eq!(
            Endpoint::TeacherSchedule {
                name: "Иванов И.И.".to_string(),
                date
            }
            .path(),
            "/teachers/%D0%98%D0%B2%D0%B0%D0%BD%D0%BE%D0%B2%20%D0%98.%D0%98./schedule/2024-03-15"
        );
        assert_eq!(Endpoint::PublicConfig.path(), "/config-public");
    }
}
