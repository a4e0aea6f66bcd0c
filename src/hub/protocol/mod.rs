// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Home Hub JSON-action wire format
//!
//! A call is a batch of [`Action`]s wrapped in a [`RequestEnvelope`], sent as
//! the `req` field of a form-encoded POST. Replies come back either as a JSON
//! envelope or, for file downloads, as a raw body.

mod response;

use serde::Serialize;

use super::digest;
use super::session::Session;

pub use response::{
    CallbackParameters, CallbackResult, HubResponse, Reply, ReplyError, ResponseAction,
    ResponseCallback, ResponseEnvelope, SUCCESS_MARKER, decode_response,
};

/// Data model namespace advertised at login and in the session cookie
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Namespace {
    pub name: &'static str,
    pub uri: &'static str,
}

impl Namespace {
    pub fn gateway() -> Self {
        Self {
            name: "gtw",
            uri: "http://sagemcom.com/gateway-data",
        }
    }
}

/// Capability flags; unset flags are left out of the JSON
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapabilityFlags {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub name: bool,
    #[serde(rename = "default-value", skip_serializing_if = "std::ops::Not::not")]
    pub default_value: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub restriction: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub description: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub interface: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextFlags {
    #[serde(rename = "get-content-name")]
    pub get_content_name: bool,
    #[serde(rename = "local-time")]
    pub local_time: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionOptions {
    pub nss: Vec<Namespace>,
    pub language: &'static str,
    pub context_flags: ContextFlags,
    pub capability_flags: CapabilityFlags,
    pub capability_depth: u32,
    pub time_format: &'static str,
}

/// Per-action options
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceOptions {
    #[serde(rename = "capability-flags")]
    pub capability_flags: CapabilityFlags,
}

impl InterfaceOptions {
    /// Options attached to every summary `getValue`
    pub fn interface() -> Self {
        Self {
            capability_flags: CapabilityFlags {
                interface: true,
                ..CapabilityFlags::default()
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginParameters {
    pub user: String,
    pub persistent: &'static str,
    #[serde(rename = "session-options")]
    pub session_options: SessionOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateRangeParameters {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

/// Action parameters, shaped by the method they belong to
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ActionParameters {
    Login(LoginParameters),
    DateRange(DateRangeParameters),
}

/// One unit of work inside a batch
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    pub id: u32,
    pub method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpath: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ActionParameters>,
    #[serde(rename = "options", skip_serializing_if = "Option::is_none")]
    pub interface_options: Option<InterfaceOptions>,
}

impl Action {
    /// `logIn` with the session options the firmware expects
    pub fn login(username: &str) -> Self {
        Self {
            id: 0,
            method: "logIn",
            xpath: None,
            parameters: Some(ActionParameters::Login(LoginParameters {
                user: username.to_string(),
                persistent: "true",
                session_options: SessionOptions {
                    nss: vec![Namespace::gateway()],
                    language: "ident",
                    context_flags: ContextFlags {
                        get_content_name: true,
                        local_time: true,
                    },
                    capability_flags: CapabilityFlags {
                        name: true,
                        restriction: true,
                        ..CapabilityFlags::default()
                    },
                    capability_depth: 2,
                    time_format: "ISO_8601",
                },
            })),
            interface_options: None,
        }
    }

    /// `getValue` for a single data model path
    pub fn get_value(id: u32, xpath: &'static str) -> Self {
        Self {
            id,
            method: "getValue",
            xpath: Some(xpath),
            parameters: None,
            interface_options: Some(InterfaceOptions::interface()),
        }
    }

    /// `uploadBMStatisticsFile`: materialize the bandwidth CSV for a date range
    pub fn upload_statistics_file(
        xpath: &'static str,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            method: "uploadBMStatisticsFile",
            xpath: Some(xpath),
            parameters: Some(ActionParameters::DateRange(DateRangeParameters {
                start_date: start_date.into(),
                end_date: end_date.into(),
            })),
            interface_options: None,
        }
    }
}

/// Outer structure of one call
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub id: u32,
    #[serde(rename = "session-id")]
    pub session_id: String,
    pub priority: bool,
    pub actions: Vec<Action>,
    pub cnonce: u32,
    #[serde(rename = "auth-key")]
    pub auth_key: String,
}

#[derive(Serialize)]
struct RequestWrapper<'a> {
    request: &'a RequestEnvelope,
}

impl RequestEnvelope {
    /// Signs a batch against the given session snapshot with a fresh client nonce.
    pub fn seal(session: &Session, actions: Vec<Action>) -> Self {
        Self::seal_with_cnonce(session, actions, digest::generate_cnonce())
    }

    pub fn seal_with_cnonce(session: &Session, actions: Vec<Action>, cnonce: u32) -> Self {
        Self {
            id: session.request_counter(),
            session_id: session.session_id().to_string(),
            priority: false,
            actions,
            cnonce,
            auth_key: session.auth_key(cnonce),
        }
    }

    /// JSON carried in the `req` form field
    pub fn to_form_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&RequestWrapper { request: self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::xpath;
    use serde_json::json;

    #[test]
    fn test_login_action_shape() {
        let value = serde_json::to_value(Action::login("admin")).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 0,
                "method": "logIn",
                "parameters": {
                    "user": "admin",
                    "persistent": "true",
                    "session-options": {
                        "nss": [{"name": "gtw", "uri": "http://sagemcom.com/gateway-data"}],
                        "language": "ident",
                        "context-flags": {"get-content-name": true, "local-time": true},
                        "capability-flags": {"name": true, "restriction": true},
                        "capability-depth": 2,
                        "time-format": "ISO_8601"
                    }
                }
            })
        );
    }

    #[test]
    fn test_get_value_action_shape() {
        let value = serde_json::to_value(Action::get_value(3, xpath::FIRMWARE_VERSION)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "method": "getValue",
                "xpath": "Device/DeviceInfo/ExternalFirmwareVersion",
                "options": {"capability-flags": {"interface": true}}
            })
        );
    }

    #[test]
    fn test_upload_statistics_action_shape() {
        let action =
            Action::upload_statistics_file(xpath::BANDWIDTH_MONITORING, "20000101", "20261015");
        let value = serde_json::to_value(action).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 0,
                "method": "uploadBMStatisticsFile",
                "xpath": "Device/Services/BandwidthMonitoring",
                "parameters": {"startDate": "20000101", "endDate": "20261015"}
            })
        );
    }

    #[test]
    fn test_envelope_uses_session_snapshot() {
        let mut session = Session::new("http://hub", "admin", "secret");
        session.authenticate(77, "abc");
        session.next_request();
        session.next_request();

        let envelope =
            RequestEnvelope::seal_with_cnonce(&session, vec![Action::login("admin")], 1234);

        assert_eq!(envelope.id, 2);
        assert_eq!(envelope.session_id, "77");
        assert!(!envelope.priority);
        assert_eq!(envelope.cnonce, 1234);
        assert_eq!(envelope.auth_key, session.auth_key(1234));
    }

    #[test]
    fn test_form_value_wraps_request() {
        let session = Session::new("http://hub", "admin", "secret");
        let envelope =
            RequestEnvelope::seal_with_cnonce(&session, vec![Action::login("admin")], 9);
        let value: serde_json::Value =
            serde_json::from_str(&envelope.to_form_value().unwrap()).unwrap();

        assert_eq!(value["request"]["id"], 0);
        assert_eq!(value["request"]["session-id"], "0");
        assert_eq!(value["request"]["priority"], false);
        assert_eq!(value["request"]["cnonce"], 9);
        assert_eq!(value["request"]["auth-key"], session.auth_key(9));
        assert_eq!(value["request"]["actions"][0]["method"], "logIn");
    }

    #[test]
    fn test_sealed_envelopes_differ_by_cnonce() {
        let session = Session::new("http://hub", "admin", "secret");
        let a = RequestEnvelope::seal_with_cnonce(&session, Vec::new(), 1);
        let b = RequestEnvelope::seal_with_cnonce(&session, Vec::new(), 2);
        assert_ne!(a.auth_key, b.auth_key);
    }
}
