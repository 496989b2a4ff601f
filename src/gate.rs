//! Authorization gate for calendar access.
//!
//! Wraps the platform's consent machinery behind a single async
//! operation. A consent prompt is only ever issued while the platform
//! state is `NotDetermined`; terminal states resolve immediately, and the
//! resolved outcome is cached so repeated and concurrent `authorize` calls
//! share at most one prompt per gate (one per process when the gate is
//! constructed once at the composition root).

use std::sync::Arc;

use log::debug;
use tokio::sync::OnceCell;

use calgate_core::{AuthorizationState, CalGateError, CalGateResult};

use crate::config::CalGateConfig;
use crate::store::EventStore;

pub struct AuthorizationGate {
    store: Arc<dyn EventStore>,
    usage_description: Option<String>,
    outcome: OnceCell<bool>,
}

impl AuthorizationGate {
    pub fn new(store: Arc<dyn EventStore>, config: &CalGateConfig) -> Self {
        AuthorizationGate {
            store,
            usage_description: config.calendars_usage_description.clone(),
            outcome: OnceCell::new(),
        }
    }

    /// Resolve calendar access consent.
    ///
    /// Returns `Ok(true)` when access is granted and `Ok(false)` on denial
    /// or restriction; neither is an error. Fails with a configuration
    /// error, before any platform contact, when no usage description is
    /// configured.
    pub async fn authorize(&self) -> CalGateResult<bool> {
        if self.usage_description().is_none() {
            return Err(CalGateError::Config(
                "calendars_usage_description is not configured; calendar access cannot be requested"
                    .to_string(),
            ));
        }

        self.outcome
            .get_or_try_init(|| self.resolve())
            .await
            .copied()
    }

    /// Current platform authorization state, without prompting.
    pub async fn status(&self) -> CalGateResult<AuthorizationState> {
        self.store.authorization_status().await
    }

    /// Fail unless access is currently authorized. Never prompts; queries
    /// and writes use this so an undetermined or denied state surfaces as
    /// `NotAuthorized` instead of reaching the store.
    pub async fn ensure_authorized(&self) -> CalGateResult<()> {
        match self.outcome.get() {
            Some(true) => Ok(()),
            Some(false) => Err(CalGateError::NotAuthorized),
            None => {
                if self.store.authorization_status().await?.is_granted() {
                    Ok(())
                } else {
                    Err(CalGateError::NotAuthorized)
                }
            }
        }
    }

    async fn resolve(&self) -> CalGateResult<bool> {
        match self.store.authorization_status().await? {
            AuthorizationState::Authorized => {
                debug!("calendar access already authorized");
                Ok(true)
            }
            AuthorizationState::Denied => {
                debug!("calendar access denied");
                Ok(false)
            }
            AuthorizationState::Restricted => {
                debug!("calendar access restricted by policy");
                Ok(false)
            }
            AuthorizationState::NotDetermined => {
                debug!("requesting calendar access consent");
                self.store.request_access().await
            }
        }
    }

    fn usage_description(&self) -> Option<&str> {
        self.usage_description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
