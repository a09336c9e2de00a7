use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};

use tracing::{debug, info, instrument, warn};

use crate::{
    collaborators::{Navigator, Notifier, RegistrationService, TracingNotifier},
    form::{initialize, Field, RegistrationInput, Role, SIGN_IN_PATH},
    messages,
    validation::{DefaultSchema, RegistrationSchema, ValidationErrors},
};

/// Result of the latest submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Loading,
    Success,
    Failure(String),
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    IdleWithError,
    NavigatingAway,
}

/// Reasons a submission was not attempted.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("form has invalid fields: {0}")]
    Invalid(ValidationErrors),
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("form has been disposed")]
    Disposed,
}

#[derive(Debug)]
struct FormState {
    input: RegistrationInput,
    loading: bool,
    error: Option<String>,
    field_errors: ValidationErrors,
    outcome: Option<SubmissionOutcome>,
}

impl FormState {
    fn new(role: Role) -> Self {
        Self {
            input: initialize(role),
            loading: false,
            error: None,
            field_errors: ValidationErrors::default(),
            outcome: None,
        }
    }
}

/// Clears the loading flag when a submission ends, including when the submit
/// future is dropped mid-flight.
struct LoadingGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.loading = false;
        if state.outcome == Some(SubmissionOutcome::Loading) {
            state.outcome = None;
        }
    }
}

/// State and submit flow of one registration form instance.
///
/// Every operation takes `&self`, so a host can share the controller between
/// its event handlers and the task awaiting a submission.
pub struct RegistrationFormController {
    role: Role,
    schema: Arc<dyn RegistrationSchema>,
    service: Arc<dyn RegistrationService>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<FormState>,
    disposed: AtomicBool,
}

impl RegistrationFormController {
    /// Mounts a form for `role` with the storefront schema and log
    /// notifications. `navigator` receives the sign-in redirect after a
    /// successful registration.
    pub fn new(
        role: Role,
        service: Arc<dyn RegistrationService>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            role,
            schema: Arc::new(DefaultSchema),
            service,
            notifier: Arc::new(TracingNotifier),
            navigator,
            state: Mutex::new(FormState::new(role)),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn with_schema(mut self, schema: Arc<dyn RegistrationSchema>) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn input(&self) -> RegistrationInput {
        self.lock().input.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Error banner text from the last failed submission.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn field_errors(&self) -> ValidationErrors {
        self.lock().field_errors.clone()
    }

    pub fn outcome(&self) -> Option<SubmissionOutcome> {
        self.lock().outcome.clone()
    }

    pub fn phase(&self) -> FormPhase {
        let state = self.lock();
        if state.loading {
            FormPhase::Submitting
        } else if state.outcome == Some(SubmissionOutcome::Success) {
            FormPhase::NavigatingAway
        } else if state.error.is_some() {
            FormPhase::IdleWithError
        } else {
            FormPhase::Idle
        }
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_disposed() && !self.is_loading()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Input-change handler. Editing a field clears its pending error.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut state = self.lock();
        state.input.set(field, value);
        state.field_errors.remove(field);
    }

    /// Runs the schema against the current input and keeps the field errors
    /// for display.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut state = self.lock();
        let result = self.schema.validate(&state.input);
        state.field_errors = match &result {
            Ok(()) => ValidationErrors::default(),
            Err(errors) => errors.clone(),
        };
        result
    }

    /// Back to a freshly mounted form for the same role.
    pub fn reset(&self) {
        let mut state = self.lock();
        if state.loading {
            // The in-flight submission owns the loading flag until it ends.
            state.input = initialize(self.role);
            state.field_errors = ValidationErrors::default();
            return;
        }
        *state = FormState::new(self.role);
    }

    /// Marks the form as unmounted. A submission still in flight completes,
    /// but its notification and navigation are suppressed.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            debug!(role = %self.role, "registration form disposed");
        }
    }

    /// Validates, normalizes and submits the form once.
    ///
    /// Service failures are not errors here: they are reported to the user
    /// and returned as [`SubmissionOutcome::Failure`]. `Err` means nothing was
    /// sent.
    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn submit(&self) -> Result<SubmissionOutcome, SubmitError> {
        if self.is_disposed() {
            return Err(SubmitError::Disposed);
        }

        let payload = {
            let mut state = self.lock();
            if state.loading {
                warn!("submit ignored, registration already in flight");
                return Err(SubmitError::AlreadySubmitting);
            }
            if let Err(errors) = self.schema.validate(&state.input) {
                debug!(invalid_fields = errors.len(), "submission blocked by validation");
                state.field_errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
            state.field_errors = ValidationErrors::default();
            state.error = None;
            state.loading = true;
            state.outcome = Some(SubmissionOutcome::Loading);
            state.input.normalize()
        };
        let guard = LoadingGuard { state: &self.state };

        let outcome = match self.service.register(&payload).await {
            Ok(()) => {
                info!(email = %payload.account().email, "account registered");
                SubmissionOutcome::Success
            }
            Err(err) => {
                warn!(error = %err, "registration failed");
                let message = err.message().unwrap_or(messages::REGISTRATION_FAILED);
                SubmissionOutcome::Failure(message.to_string())
            }
        };

        {
            let mut state = self.lock();
            if let SubmissionOutcome::Failure(message) = &outcome {
                state.error = Some(message.clone());
            }
            state.outcome = Some(outcome.clone());
        }
        drop(guard);

        if self.is_disposed() {
            debug!("form disposed during submission, skipping notification");
            return Ok(outcome);
        }

        match &outcome {
            SubmissionOutcome::Success => {
                self.notifier.success(self.role.success_message());
                self.navigator.go_to(SIGN_IN_PATH);
            }
            SubmissionOutcome::Failure(message) => self.notifier.error(message),
            SubmissionOutcome::Loading => {}
        }
        Ok(outcome)
    }
}
