//! Store protocol types.
//!
//! Defines the JSON protocol spoken between the calgate facade and
//! platform store binaries over stdin/stdout. Any executable that speaks
//! this protocol can serve as the platform calendar store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::EventDraft;

/// Commands that store binaries must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    AuthorizationStatus,
    RequestAccess,
    ListCalendars,
    ListEvents,
    CreateEvent,
}

/// Request sent from the facade to a store binary.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a store binary to the facade.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

/// Parameters for `Command::ListEvents`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEventsParams {
    pub calendar_ids: Vec<String>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Parameters for `Command::CreateEvent`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventParams {
    pub event: EventDraft,
}
