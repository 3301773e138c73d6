use anyhow::{Context, Result};
use async_trait::async_trait;
use gloo::net::http::Request;
use shared::api::{HttpRequest, HttpResponse, Method};
use shared::{ClientConfig, DataClient, RecoveryNotifier, ReopenReason, Transport};
use web_sys::{RequestRedirect, ResponseType};
use yew::Callback;

use super::telegram::TelegramAuth;

/// Browser `fetch` through gloo-net
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        fetch(request).await.map_err(|e| format!("{:#}", e))
    }
}

async fn fetch(request: HttpRequest) -> Result<HttpResponse> {
    let builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
    };
    // Redirects mean the backend wants the user back in Telegram; stop at
    // them instead of following.
    let builder = request
        .headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name, value))
        .redirect(RequestRedirect::Manual);

    let prepared = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .with_context(|| format!("Failed to build request for {}", request.url))?;

    let response = prepared
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", request.url))?;

    let status = response.status();
    let redirected = response.redirected() || response.type_() == ResponseType::Opaqueredirect;
    let body = response.text().await.unwrap_or_default();

    Ok(HttpResponse {
        status,
        redirected,
        body,
    })
}

/// Routes recovery requests into the component tree
pub struct CallbackRecovery(pub Callback<ReopenReason>);

impl RecoveryNotifier for CallbackRecovery {
    fn reopen_required(&self, reason: ReopenReason) {
        self.0.emit(reason);
    }
}

/// Client wired to the browser: gloo-net transport, Telegram init data
pub fn browser_client(config: ClientConfig, on_reopen: Callback<ReopenReason>) -> DataClient {
    DataClient::new(config, GlooTransport, TelegramAuth, CallbackRecovery(on_reopen))
}
