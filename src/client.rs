use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    collaborators::{RegistrationService, ServiceError},
    config::ClientConfig,
    form::RegistrationPayload,
};

/// Information about an unsuccessful response.
#[derive(Debug, Clone)]
pub struct NotSuccessResponseInfo {
    pub status_code: u16,
    pub text: String,
}

#[async_trait]
pub trait ResponseExt {
    async fn check_success(self) -> Result<Self, NotSuccessResponseInfo>
    where
        Self: Sized;
}

#[async_trait]
impl ResponseExt for Response {
    async fn check_success(self) -> Result<Self, NotSuccessResponseInfo> {
        let status = self.status();
        if !status.is_success() {
            return Err(NotSuccessResponseInfo {
                status_code: status.as_u16(),
                text: self.text().await.unwrap_or_default(),
            });
        }
        Ok(self)
    }
}

/// Error body returned by the registration API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    /// `message` is the reason; `error` is only a fallback since some APIs
    /// put the status phrase there.
    fn into_message(self) -> Option<String> {
        let usable = |m: &String| !m.trim().is_empty();
        self.message
            .filter(usable)
            .or_else(|| self.error.filter(usable))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        ServiceError::Transport(error.to_string())
    }
}

impl From<NotSuccessResponseInfo> for ServiceError {
    fn from(info: NotSuccessResponseInfo) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&info.text)
            .ok()
            .and_then(ErrorBody::into_message);
        match message {
            Some(message) => ServiceError::Rejected {
                status: Some(info.status_code),
                message,
            },
            None => ServiceError::Unrecognized,
        }
    }
}

/// Submits registrations to `{base_url}/auth/register`.
///
/// ```no_run
/// use std::sync::Arc;
/// use tokoreg::{
///     config::ClientConfig, Field, HttpRegistrationService, RegistrationFormController, Role,
///     RouteHistory,
/// };
///
/// # async fn run() -> anyhow::Result<()> {
/// let service = HttpRegistrationService::from_config(&ClientConfig::from_env())?;
/// let history = RouteHistory::new();
/// let form = RegistrationFormController::new(
///     Role::Seller,
///     Arc::new(service),
///     Arc::new(history.clone()),
/// );
/// form.set_field(Field::Name, "Siti Rahayu");
/// form.set_field(Field::Email, "siti@example.com");
/// form.set_field(Field::Password, "rahasia123");
/// form.set_field(Field::ShopName, "Toko Siti");
/// form.submit().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpRegistrationService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRegistrationService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn register_url(&self) -> String {
        format!("{}/auth/register", self.base_url)
    }
}

#[async_trait]
impl RegistrationService for HttpRegistrationService {
    #[instrument(skip(self, payload), fields(role = %payload.role()))]
    async fn register(&self, payload: &RegistrationPayload) -> Result<(), ServiceError> {
        let url = self.register_url();
        let result = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await?
            .check_success()
            .await;

        match result {
            Ok(response) => {
                debug!(status = %response.status(), "registration accepted");
                Ok(())
            }
            Err(info) => {
                warn!(status = info.status_code, "registration rejected");
                Err(info.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_becomes_rejection() {
        let err: ServiceError = NotSuccessResponseInfo {
            status_code: 409,
            text: r#"{"message":"Email already registered"}"#.into(),
        }
        .into();
        assert_eq!(
            err,
            ServiceError::Rejected {
                status: Some(409),
                message: "Email already registered".into()
            }
        );
    }

    #[test]
    fn message_wins_over_status_phrase_in_error() {
        let err: ServiceError = NotSuccessResponseInfo {
            status_code: 409,
            text: r#"{"statusCode":409,"message":"Email already registered","error":"Conflict"}"#
                .into(),
        }
        .into();
        assert_eq!(err.message(), Some("Email already registered"));
        assert!(matches!(err, ServiceError::Rejected { status: Some(409), .. }));
    }

    #[test]
    fn error_key_is_used_without_message() {
        let err: ServiceError = NotSuccessResponseInfo {
            status_code: 400,
            text: r#"{"error":"Invalid email"}"#.into(),
        }
        .into();
        assert_eq!(err.message(), Some("Invalid email"));
    }

    #[test]
    fn body_without_message_is_unrecognized() {
        for text in ["", "<html>bad gateway</html>", r#"{"message":null}"#, r#"{"detail":"x"}"#] {
            let err: ServiceError = NotSuccessResponseInfo {
                status_code: 502,
                text: text.into(),
            }
            .into();
            assert_eq!(err, ServiceError::Unrecognized, "body {text:?}");
        }
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let svc = HttpRegistrationService::new("http://localhost:8080/api/v1/");
        assert_eq!(svc.register_url(), "http://localhost:8080/api/v1/auth/register");
    }

    #[test]
    fn from_config_uses_configured_base_url() {
        let config = ClientConfig {
            api_base_url: "https://api.toko.example/v1".into(),
            request_timeout_secs: 3,
        };
        let svc = HttpRegistrationService::from_config(&config).unwrap();
        assert_eq!(svc.register_url(), "https://api.toko.example/v1/auth/register");
    }
}
