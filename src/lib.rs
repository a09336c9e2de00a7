//! Account registration form for the storefront: form state, validation and
//! the submit flow for customer and seller sign-ups, plus an HTTP
//! registration service and a reference `/auth/register` endpoint.

pub mod app;
pub mod auth;
pub mod client;
pub mod collaborators;
pub mod config;
pub mod controller;
pub mod form;
pub mod messages;
pub mod state;
pub mod validation;

pub use client::HttpRegistrationService;
pub use collaborators::{
    Navigator, Notifier, RegistrationService, RouteHistory, ServiceError, TracingNotifier,
};
pub use controller::{FormPhase, RegistrationFormController, SubmissionOutcome, SubmitError};
pub use form::{initialize, Field, RegistrationInput, RegistrationPayload, Role, SIGN_IN_PATH};
pub use validation::{DefaultSchema, RegistrationSchema, ValidationErrors};
