//! Subprocess-backed platform store.
//!
//! Bridges the facade to an external platform-integration binary
//! (e.g. `calgate-store-macos`) using JSON over stdin/stdout. The protocol
//! is language-agnostic: any executable that speaks it can serve as the
//! platform calendar store. Store binaries own the actual platform
//! integration (event database access, consent dialogs); this side only
//! frames requests and decodes responses.

use super::EventStore;
use async_trait::async_trait;
use calgate_core::protocol::{Command as StoreCommand, CreateEventParams, ListEventsParams, Request, Response};
use calgate_core::{
    AuthorizationState, CalGateError, CalGateResult, CalendarRef, DateRange, EventDraft, EventRecord,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

const STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client side of the store protocol, addressing the binary
/// `calgate-store-<name>` found in PATH.
#[derive(Clone)]
pub struct ProviderStore(String);

impl ProviderStore {
    pub fn from_name(name: &str) -> Self {
        ProviderStore(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn binary_path(&self) -> CalGateResult<std::path::PathBuf> {
        let binary_name = format!("calgate-store-{}", self.0);
        let binary_path = which::which(&binary_name).map_err(|_| {
            CalGateError::StoreNotInstalled(format!(
                "Store '{}' not found. Install it with:\n  cargo install {}",
                self.0, binary_name
            ))
        })?;
        Ok(binary_path)
    }

    /// Call a store command and return the result, bounded by the store
    /// timeout.
    async fn call_with_timeout<R: DeserializeOwned>(
        &self,
        command: StoreCommand,
        params: serde_json::Value,
    ) -> CalGateResult<R> {
        timeout(STORE_TIMEOUT, self.call(command, params))
            .await
            .map_err(|_| CalGateError::StoreTimeout(STORE_TIMEOUT.as_secs()))?
    }

    async fn call<R: DeserializeOwned>(
        &self,
        command: StoreCommand,
        params: serde_json::Value,
    ) -> CalGateResult<R> {
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| CalGateError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = Command::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                CalGateError::Store(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        // Wait for process and collect output
        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(CalGateError::Store(format!(
                "Store exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(CalGateError::Store("Store returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| CalGateError::Store(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(CalGateError::Store(error)),
        }
    }
}

#[async_trait]
impl EventStore for ProviderStore {
    async fn authorization_status(&self) -> CalGateResult<AuthorizationState> {
        self.call_with_timeout(StoreCommand::AuthorizationStatus, serde_json::json!({}))
            .await
    }

    async fn request_access(&self) -> CalGateResult<bool> {
        // No timeout here: the call suspends until the user answers the
        // consent prompt.
        self.call(StoreCommand::RequestAccess, serde_json::json!({}))
            .await
    }

    async fn calendars(&self) -> CalGateResult<Vec<CalendarRef>> {
        self.call_with_timeout(StoreCommand::ListCalendars, serde_json::json!({}))
            .await
    }

    async fn events_in_range(
        &self,
        calendars: &[CalendarRef],
        range: &DateRange,
    ) -> CalGateResult<Vec<EventRecord>> {
        let params = ListEventsParams {
            calendar_ids: calendars.iter().map(|c| c.id.clone()).collect(),
            from: range.start(),
            to: range.end(),
        };
        let params =
            serde_json::to_value(params).map_err(|e| CalGateError::Serialization(e.to_string()))?;

        self.call_with_timeout(StoreCommand::ListEvents, params).await
    }

    async fn create_event(&self, draft: &EventDraft) -> CalGateResult<EventRecord> {
        let params = CreateEventParams {
            event: draft.clone(),
        };
        let params =
            serde_json::to_value(params).map_err(|e| CalGateError::Serialization(e.to_string()))?;

        // A store-side rejection of a save is a persistence failure, not a
        // transport one.
        self.call_with_timeout(StoreCommand::CreateEvent, params)
            .await
            .map_err(|e| match e {
                CalGateError::Store(detail) => CalGateError::Persistence(detail),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_store_binary_is_reported() {
        let store = ProviderStore::from_name("no-such-platform-integration");
        let result = store.calendars().await;
        assert!(matches!(result, Err(CalGateError::StoreNotInstalled(_))));
    }
}
