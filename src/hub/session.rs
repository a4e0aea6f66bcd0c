// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Hub session state
//!
//! A session starts unauthenticated (session id `"0"`, empty nonce) and
//! becomes authenticated once a login reply is applied. There is no way back
//! short of building a new session.

use serde::Serialize;

use super::digest;
use super::protocol::Namespace;

/// Path of the JSON API below the router base URL
pub const API_PATH: &str = "cgi/json-req";

const UNAUTHENTICATED_SESSION_ID: &str = "0";

/// Mutable per-router session state
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    username: String,
    password_digest: String,
    session_id: String,
    nonce: String,
    request_counter: u32,
}

/// JSON payload of the `session` cookie
#[derive(Debug, Serialize)]
struct IdentityCookie<'a> {
    req_id: u32,
    sess_id: i64,
    basic: bool,
    user: &'a str,
    #[serde(rename = "dataModel")]
    data_model: DataModel,
    ha1: String,
    nonce: &'a str,
}

#[derive(Debug, Serialize)]
struct DataModel {
    name: &'static str,
    nss: [Namespace; 1],
}

impl Session {
    /// Creates an unauthenticated session; only the password digest is retained.
    pub fn new(base_url: impl Into<String>, username: impl Into<String>, password: &str) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.into(),
            password_digest: digest::password_digest(password),
            session_id: UNAUTHENTICATED_SESSION_ID.to_string(),
            nonce: String::new(),
            request_counter: 0,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_url(&self) -> String {
        format!("{}/{API_PATH}", self.base_url)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn request_counter(&self) -> u32 {
        self.request_counter
    }

    pub fn is_authenticated(&self) -> bool {
        !self.nonce.is_empty()
    }

    /// Advances the request counter ahead of a non-login call.
    pub fn next_request(&mut self) -> u32 {
        self.request_counter = self.request_counter.wrapping_add(1);
        self.request_counter
    }

    /// Records the session id and nonce from a successful login reply.
    pub fn authenticate(&mut self, session_id: i64, nonce: impl Into<String>) {
        self.session_id = session_id.to_string();
        self.nonce = nonce.into();
    }

    /// Body `auth-key` for this session snapshot and the given client nonce
    pub fn auth_key(&self, cnonce: u32) -> String {
        digest::request_auth_key(
            &self.username,
            &self.password_digest,
            &self.nonce,
            self.request_counter,
            cnonce,
            API_PATH,
        )
    }

    /// Value of the `session` cookie: form-url-encoded identity JSON.
    pub fn identity_cookie(&self) -> Result<String, serde_json::Error> {
        let cookie = IdentityCookie {
            req_id: self.request_counter,
            sess_id: self.session_id.parse().unwrap_or(0),
            basic: false,
            user: &self.username,
            data_model: DataModel {
                name: "Internal",
                nss: [Namespace::gateway()],
            },
            ha1: digest::cookie_ha1(&self.username, &self.nonce, &self.password_digest),
            nonce: &self.nonce,
        };
        let json = serde_json::to_string(&cookie)?;
        Ok(url::form_urlencoded::byte_serialize(json.as_bytes()).collect())
    }
}
