// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Reply decoding

use serde::Deserialize;

use crate::error::HubError;

/// Reply description the firmware uses for success
pub const SUCCESS_MARKER: &str = "Ok";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Decoded body of one HTTP call
#[derive(Debug, Clone)]
pub enum HubResponse {
    /// JSON reply to a batch of actions
    Envelope(ResponseEnvelope),
    /// Anything else, e.g. a downloaded CSV file
    Body(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub reply: Option<Reply>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Reply {
    pub uid: i64,
    pub id: i64,
    pub error: ReplyError,
    pub actions: Vec<ResponseAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReplyError {
    pub code: i64,
    pub description: String,
}

/// Reply to one issued action
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseAction {
    pub uid: i64,
    pub id: i64,
    pub error: ReplyError,
    pub callbacks: Vec<ResponseCallback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseCallback {
    pub uid: i64,
    pub result: CallbackResult,
    pub xpath: String,
    pub parameters: CallbackParameters,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CallbackResult {
    pub code: i64,
    pub description: String,
}

/// Callback parameters; `value` stays untyped until the issuing call resolves it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CallbackParameters {
    pub id: Option<i64>,
    pub nonce: Option<String>,
    pub value: Option<serde_json::Value>,
    pub data: Option<String>,
}

impl ResponseEnvelope {
    /// Actions of the reply, empty when there is no reply
    pub fn actions(&self) -> &[ResponseAction] {
        match &self.reply {
            Some(reply) => &reply.actions,
            None => &[],
        }
    }

    /// All callbacks of all actions in reply order
    pub fn callbacks(&self) -> impl Iterator<Item = &ResponseCallback> {
        self.actions().iter().flat_map(|a| a.callbacks.iter())
    }

    /// Callback answering the first action of the batch
    pub fn first_callback(&self) -> Option<&ResponseCallback> {
        self.actions().first().and_then(|a| a.callbacks.first())
    }

    pub fn description(&self) -> Option<&str> {
        self.reply.as_ref().map(|r| r.error.description.as_str())
    }
}

/// Turns a raw HTTP reply into a [`HubResponse`].
///
/// HTTP errors are reported before anything is decoded. JSON replies must
/// carry the success marker; other content types are passed through as an
/// opaque body.
pub fn decode_response(
    status: u16,
    content_type: Option<&str>,
    body: String,
) -> Result<HubResponse, HubError> {
    if status >= 400 {
        return Err(HubError::Status { status });
    }

    let is_json = content_type.is_some_and(|ct| ct.trim_start().starts_with(JSON_CONTENT_TYPE));
    if !is_json {
        return Ok(HubResponse::Body(body));
    }

    let envelope: ResponseEnvelope =
        serde_json::from_str(&body).map_err(|e| HubError::Decode(e.to_string()))?;

    match envelope.description() {
        None => Err(HubError::Decode("reply envelope is missing".to_string())),
        Some(SUCCESS_MARKER) => Ok(HubResponse::Envelope(envelope)),
        Some(description) => Err(HubError::Protocol(description.to_string())),
    }
}
