// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! High-level Home Hub client

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE};
use secrecy::ExposeSecret;
use tokio::sync::Mutex;

use super::export::{self, EXPORT_START_DATE, ExportFetched, ExportTriggered};
use super::protocol::{Action, HubResponse, RequestEnvelope, ResponseEnvelope, decode_response};
use super::session::Session;
use super::xpath;
use crate::config::Config;
use crate::error::HubError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
const ACCEPT_VALUE: &str = "application/json, text/javascript, */*; q=0.01";
const ACCEPT_LANGUAGE_VALUE: &str = "en-GB,en-US;q=0.8,en;q=0.6";
const USER_AGENT: &str = concat!("homehub-exporter/", env!("CARGO_PKG_VERSION"));

/// One outbound HTTP call
enum Call {
    /// Batch of actions POSTed to the JSON API
    Actions(RequestEnvelope),
    /// Plain GET of a file below the base URL
    Download(String),
}

/// Home Hub JSON API client
///
/// Owns the HTTP client and the session. Login happens once; afterwards every
/// statistics call advances the request counter under the session lock and
/// signs its requests with the resulting snapshot.
pub struct HubClient {
    http: reqwest::Client,
    session: Mutex<Session>,
}

impl HubClient {
    /// Creates an unauthenticated client from the application configuration
    pub fn new(config: &Config) -> Result<Self, HubError> {
        let session = Session::new(
            config.hub_base_url(),
            config.username.clone(),
            config.password.expose_secret(),
        );
        Self::with_session(session, config.request_timeout)
    }

    /// Creates a client around an existing session
    pub fn with_session(session: Session, timeout: Duration) -> Result<Self, HubError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            session: Mutex::new(session),
        })
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated()
    }

    /// Copy of the current session state
    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// Authenticates the session.
    ///
    /// The session id and nonce are taken from the first callback of the
    /// reply. Any failure leaves the session unauthenticated.
    pub async fn login(&self) -> Result<(), HubError> {
        let mut session = self.session.lock().await;
        if session.is_authenticated() {
            return Err(HubError::AlreadyAuthenticated);
        }

        tracing::debug!("Logging in to {} as '{}'", session.base_url(), session.username());
        let envelope = RequestEnvelope::seal(&session, vec![Action::login(session.username())]);
        let reply = expect_envelope(self.send(&session, Call::Actions(envelope)).await?)?;

        let parameters = &reply
            .first_callback()
            .ok_or_else(|| HubError::Decode("login reply has no callback".to_string()))?
            .parameters;
        let session_id = parameters
            .id
            .ok_or_else(|| HubError::Decode("login reply has no session id".to_string()))?;
        let nonce = parameters
            .nonce
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| HubError::Decode("login reply has no nonce".to_string()))?;

        session.authenticate(session_id, nonce);
        tracing::info!(
            "Logged in to {} as '{}' (session {})",
            session.base_url(),
            session.username(),
            session.session_id()
        );
        Ok(())
    }

    /// Reads every summary path in one batch.
    pub async fn summary_statistics(&self) -> Result<ResponseEnvelope, HubError> {
        let session = self.begin_request().await?;
        let actions = (0u32..)
            .zip(xpath::SUMMARY_XPATHS)
            .map(|(id, path)| Action::get_value(id, path))
            .collect();
        let envelope = RequestEnvelope::seal(&session, actions);
        expect_envelope(self.send(&session, Call::Actions(envelope)).await?)
    }

    /// Triggers the bandwidth export and downloads it.
    ///
    /// Both legs share one request counter value; the download is only
    /// attempted once the trigger succeeded.
    pub async fn bandwidth_statistics(&self) -> Result<ExportFetched, HubError> {
        let session = self.begin_request().await?;
        let triggered = self.trigger_export(&session).await?;
        self.fetch_export(&session, triggered).await
    }

    async fn trigger_export(&self, session: &Session) -> Result<ExportTriggered, HubError> {
        let end_date = export::export_end_date(chrono::Local::now().date_naive());
        let action =
            Action::upload_statistics_file(xpath::BANDWIDTH_MONITORING, EXPORT_START_DATE, end_date);
        let envelope = RequestEnvelope::seal(session, vec![action]);
        let reply = expect_envelope(self.send(session, Call::Actions(envelope)).await?)?;

        let filename = reply
            .first_callback()
            .and_then(|c| c.parameters.data.clone())
            .filter(|f| !f.is_empty())
            .ok_or_else(|| HubError::Decode("export reply names no file".to_string()))?;
        tracing::debug!("Bandwidth export written to '{}'", filename);
        Ok(ExportTriggered { filename })
    }

    async fn fetch_export(
        &self,
        session: &Session,
        export: ExportTriggered,
    ) -> Result<ExportFetched, HubError> {
        let url = export::export_url(session.base_url(), &export.filename);
        match self.send(session, Call::Download(url)).await? {
            HubResponse::Body(body) => {
                tracing::trace!("Downloaded bandwidth export, {} bytes", body.len());
                Ok(ExportFetched::new(body))
            }
            HubResponse::Envelope(_) => Err(HubError::Decode(
                "expected export file, got JSON reply".to_string(),
            )),
        }
    }

    /// Advances the request counter and returns the snapshot to sign with.
    async fn begin_request(&self) -> Result<Session, HubError> {
        let mut session = self.session.lock().await;
        if !session.is_authenticated() {
            return Err(HubError::NotAuthenticated);
        }
        session.next_request();
        Ok(session.clone())
    }

    async fn send(&self, session: &Session, call: Call) -> Result<HubResponse, HubError> {
        let cookie = format!("lang=en; session={}", session.identity_cookie()?);

        let request = match call {
            Call::Actions(envelope) => {
                let payload = envelope.to_form_value()?;
                tracing::debug!(
                    "POST {} (request {}, {} action(s))",
                    session.api_url(),
                    envelope.id,
                    envelope.actions.len()
                );
                tracing::trace!("Request envelope: {}", payload);
                let body = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("req", &payload)
                    .finish();
                self.http
                    .post(session.api_url())
                    .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(body)
            }
            Call::Download(url) => {
                tracing::debug!("GET {} (request {})", url, session.request_counter());
                self.http.get(url)
            }
        };

        let response = request
            .header(ACCEPT, ACCEPT_VALUE)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .header(COOKIE, cookie)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(HubError::Status { status });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        let decoded = decode_response(status, content_type.as_deref(), body)?;
        if let HubResponse::Envelope(reply) = &decoded {
            tracing::debug!(
                "Reply: {} ({} action(s))",
                reply.description().unwrap_or_default(),
                reply.actions().len()
            );
        }
        Ok(decoded)
    }
}

fn expect_envelope(response: HubResponse) -> Result<ResponseEnvelope, HubError> {
    match response {
        HubResponse::Envelope(envelope) => Ok(envelope),
        HubResponse::Body(_) => Err(HubError::Decode(
            "expected JSON reply, got raw body".to_string(),
        )),
    }
}
