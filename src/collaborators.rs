use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::form::RegistrationPayload;

/// Failure reported by a [`RegistrationService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The service answered and refused the registration.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },
    /// The request never got a usable answer.
    #[error("{0}")]
    Transport(String),
    /// The service failed without saying why.
    #[error("registration failed")]
    Unrecognized,
}

impl ServiceError {
    /// Human-readable reason, if the failure carried a non-blank one.
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            ServiceError::Rejected { message, .. } => message.as_str(),
            ServiceError::Transport(message) => message.as_str(),
            ServiceError::Unrecognized => return None,
        };
        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

/// Creates accounts from normalized registration payloads.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    async fn register(&self, payload: &RegistrationPayload) -> Result<(), ServiceError>;
}

/// Transient user notifications (toasts).
pub trait Notifier: Send + Sync {
    fn success(&self, text: &str);
    fn error(&self, text: &str);
}

/// Client-side routing.
pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}

/// Notifier for headless hosts: notifications end up in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, text: &str) {
        info!(notification = %text, "success notification");
    }

    fn error(&self, text: &str) {
        warn!(notification = %text, "error notification");
    }
}

/// Navigator that records visited paths in order.
#[derive(Debug, Clone, Default)]
pub struct RouteHistory {
    visited: Arc<Mutex<Vec<String>>>,
}

impl RouteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn current(&self) -> Option<String> {
        self.visited().last().cloned()
    }
}

impl Navigator for RouteHistory {
    fn go_to(&self, path: &str) {
        info!(%path, "navigate");
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_messages_count_as_missing() {
        let rejected = ServiceError::Rejected {
            status: Some(409),
            message: "Email already registered".into(),
        };
        assert_eq!(rejected.message(), Some("Email already registered"));
        assert_eq!(rejected.to_string(), "Email already registered");

        let blank = ServiceError::Rejected {
            status: Some(500),
            message: "  ".into(),
        };
        assert_eq!(blank.message(), None);
        assert_eq!(ServiceError::Unrecognized.message(), None);
        assert_eq!(
            ServiceError::Transport("connection refused".into()).message(),
            Some("connection refused")
        );
    }

    #[test]
    fn route_history_shares_state_between_clones() {
        let history = RouteHistory::new();
        let handle = history.clone();
        handle.go_to("/sign-in");
        assert_eq!(history.visited(), vec!["/sign-in".to_string()]);
        assert_eq!(history.current().as_deref(), Some("/sign-in"));
    }
}
