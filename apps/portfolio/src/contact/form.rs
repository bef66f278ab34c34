//! Contact form state and its submission lifecycle.
//!
//! Status moves `Idle -> Submitting -> {Succeeded | Failed}`. A new attempt is
//! accepted from `Idle` or a terminal state, never while `Submitting`.
//! On success the field values are cleared; on failure they are kept for retry.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::contact::transport::{ContactTransport, TransportError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Nume",
            ContactField::Email => "Email",
            ContactField::Message => "Mesaj",
        }
    }
}

/// Payload handed to the transport collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    Required,
    InvalidEmail,
}

impl FieldError {
    pub fn message(self) -> &'static str {
        match self {
            FieldError::Required => "Câmpul este obligatoriu.",
            FieldError::InvalidEmail => "Adresa de email nu este validă.",
        }
    }
}

pub type FieldErrors = BTreeMap<ContactField, FieldError>;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }
}

/// Result of asking the form to start a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    Accepted(ContactMessage),
    Rejected(FieldErrors),
    AlreadySubmitting,
}

/// What a full submit round trip ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Delivered,
    TransportFailed(String),
    Invalid(FieldErrors),
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFormState {
    values: BTreeMap<ContactField, String>,
    errors: FieldErrors,
    status: SubmissionStatus,
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all three field values with what the user typed.
    pub fn fill(&mut self, draft: &ContactMessage) {
        self.set_field(ContactField::Name, draft.name.as_str());
        self.set_field(ContactField::Email, draft.email.as_str());
        self.set_field(ContactField::Message, draft.message.as_str());
    }

    pub fn value(&self, field: ContactField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Editing a field clears its stale validation error.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn error(&self, field: ContactField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn validate(&self) -> Result<ContactMessage, FieldErrors> {
        let mut errors = FieldErrors::new();

        for field in ContactField::ALL {
            if self.value(field).trim().is_empty() {
                errors.insert(field, FieldError::Required);
            }
        }
        if !errors.contains_key(&ContactField::Email)
            && !is_plausible_email(self.value(ContactField::Email))
        {
            errors.insert(ContactField::Email, FieldError::InvalidEmail);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactMessage {
            name: self.value(ContactField::Name).trim().to_string(),
            email: self.value(ContactField::Email).trim().to_string(),
            message: self.value(ContactField::Message).trim().to_string(),
        })
    }

    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.status.is_submitting() {
            return SubmitAttempt::AlreadySubmitting;
        }
        match self.validate() {
            Ok(message) => {
                self.errors.clear();
                self.status = SubmissionStatus::Submitting;
                SubmitAttempt::Accepted(message)
            }
            Err(errors) => {
                self.errors = errors.clone();
                SubmitAttempt::Rejected(errors)
            }
        }
    }

    /// Applies the transport outcome. Ignored unless a submission is in flight.
    pub fn finish_submit(&mut self, result: Result<(), TransportError>) {
        if !self.status.is_submitting() {
            return;
        }
        match result {
            Ok(()) => {
                self.values.clear();
                self.status = SubmissionStatus::Succeeded;
            }
            Err(e) => {
                self.status = SubmissionStatus::Failed(e.to_string());
            }
        }
    }
}

/// Shared handle to one mounted form. The lock is never held across the
/// transport call, so a concurrent submit sees `Submitting` and backs off.
#[derive(Clone, Default)]
pub struct ContactForm {
    state: Arc<Mutex<ContactFormState>>,
}

impl ContactForm {
    pub async fn snapshot(&self) -> ContactFormState {
        self.state.lock().await.clone()
    }

    /// Takes the submitted values and starts a submission in one step.
    /// While another submission is in flight the draft is dropped untouched.
    pub async fn submit(
        &self,
        draft: &ContactMessage,
        transport: &dyn ContactTransport,
    ) -> SubmitOutcome {
        let attempt = {
            let mut state = self.state.lock().await;
            if state.status.is_submitting() {
                SubmitAttempt::AlreadySubmitting
            } else {
                state.fill(draft);
                state.begin_submit()
            }
        };

        let message = match attempt {
            SubmitAttempt::Accepted(message) => message,
            SubmitAttempt::Rejected(errors) => return SubmitOutcome::Invalid(errors),
            SubmitAttempt::AlreadySubmitting => return SubmitOutcome::Ignored,
        };

        let result = transport.deliver(&message).await;
        let outcome = match &result {
            Ok(()) => {
                info!("Contact message accepted by {} transport", transport.name());
                SubmitOutcome::Delivered
            }
            Err(e) => {
                warn!("Contact transport {} failed: {e}", transport.name());
                SubmitOutcome::TransportFailed(e.to_string())
            }
        };

        self.state.lock().await.finish_submit(result);
        outcome
    }
}

/// Syntactic plausibility only: one `@`, a non-empty local part, and a dotted
/// domain. Deliverability is the transport's problem.
pub fn is_plausible_email(raw: &str) -> bool {
    let email = raw.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ContactTransport for CountingTransport {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn deliver(&self, _message: &ContactMessage) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(TransportError::Rejected { status: 500 })
            } else {
                Ok(())
            }
        }
    }

    /// Blocks inside `deliver` until released.
    #[derive(Default)]
    struct GatedTransport {
        calls: AtomicUsize,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ContactTransport for GatedTransport {
        fn name(&self) -> &'static str {
            "gated"
        }

        async fn deliver(&self, _message: &ContactMessage) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    fn draft(name: &str, email: &str, message: &str) -> ContactMessage {
        ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    fn filled(name: &str, email: &str, message: &str) -> ContactFormState {
        let mut state = ContactFormState::new();
        state.fill(&draft(name, email, message));
        state
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("a@b.com"));
        assert!(is_plausible_email("  first.last@sub.example.ro "));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.com"));
        assert!(!is_plausible_email("a@@b.com"));
        assert!(!is_plausible_email("a b@c.com"));
        assert!(!is_plausible_email("a@.com"));
        assert!(!is_plausible_email("a@com."));
        assert!(!is_plausible_email("plain"));
    }

    #[test]
    fn test_empty_name_is_required_error() {
        let state = filled("", "a@b.com", "hi");
        let errors = state.validate().unwrap_err();
        assert_eq!(errors.get(&ContactField::Name), Some(&FieldError::Required));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let state = filled("Ana", "a@b.com", "   ");
        let errors = state.validate().unwrap_err();
        assert_eq!(errors.get(&ContactField::Message), Some(&FieldError::Required));
    }

    #[test]
    fn test_malformed_email_is_reported() {
        let state = filled("Ana", "not-an-email", "hi");
        let errors = state.validate().unwrap_err();
        assert_eq!(errors.get(&ContactField::Email), Some(&FieldError::InvalidEmail));
    }

    #[test]
    fn test_begin_submit_while_submitting_is_noop() {
        let mut state = filled("Ana", "a@b.com", "hi");
        assert!(matches!(state.begin_submit(), SubmitAttempt::Accepted(_)));
        assert_eq!(state.begin_submit(), SubmitAttempt::AlreadySubmitting);
        assert_eq!(state.status(), &SubmissionStatus::Submitting);
    }

    #[test]
    fn test_editing_field_clears_its_error() {
        let mut state = filled("", "a@b.com", "hi");
        state.begin_submit();
        assert!(state.error(ContactField::Name).is_some());
        state.set_field(ContactField::Name, "Ana");
        assert!(state.error(ContactField::Name).is_none());
    }

    #[test]
    fn test_finish_without_submission_is_ignored() {
        let mut state = ContactFormState::new();
        state.finish_submit(Ok(()));
        assert_eq!(state.status(), &SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_invalid_submit_never_calls_transport() {
        let transport = CountingTransport::default();
        let form = ContactForm::default();

        let outcome = form.submit(&draft("", "a@b.com", "hi"), &transport).await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Invalid(ref e) if e.contains_key(&ContactField::Name)
        ));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        let state = form.snapshot().await;
        assert_eq!(state.status(), &SubmissionStatus::Idle);
        assert_eq!(state.value(ContactField::Email), "a@b.com");
    }

    #[tokio::test]
    async fn test_success_clears_fields() {
        let transport = CountingTransport::default();
        let form = ContactForm::default();

        assert_eq!(
            form.submit(&draft("Ana", "a@b.com", "hi"), &transport).await,
            SubmitOutcome::Delivered
        );

        let state = form.snapshot().await;
        assert_eq!(state.status(), &SubmissionStatus::Succeeded);
        assert_eq!(state.value(ContactField::Name), "");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_fields_and_allows_retry() {
        let failing = CountingTransport {
            fail: true,
            ..Default::default()
        };
        let form = ContactForm::default();
        let message = draft("Ana", "a@b.com", "hi");

        let outcome = form.submit(&message, &failing).await;
        assert!(matches!(outcome, SubmitOutcome::TransportFailed(ref r) if r.contains("500")));

        let state = form.snapshot().await;
        assert!(matches!(state.status(), SubmissionStatus::Failed(_)));
        assert_eq!(state.value(ContactField::Message), "hi");

        let ok = CountingTransport::default();
        assert_eq!(form.submit(&message, &ok).await, SubmitOutcome::Delivered);
        assert_eq!(ok.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_ignored_while_in_flight() {
        let transport = Arc::new(GatedTransport::default());
        let form = ContactForm::default();

        let first = {
            let form = form.clone();
            let transport = transport.clone();
            tokio::spawn(async move {
                form.submit(&draft("Ana", "a@b.com", "hi"), transport.as_ref())
                    .await
            })
        };

        transport.entered.notified().await;
        assert_eq!(form.snapshot().await.status(), &SubmissionStatus::Submitting);

        let second = draft("Ana", "a@b.com", "edited");
        assert_eq!(
            form.submit(&second, transport.as_ref()).await,
            SubmitOutcome::Ignored
        );
        // The in-flight draft is not overwritten by the rejected one.
        assert_eq!(form.snapshot().await.value(ContactField::Message), "hi");

        transport.release.notify_one();
        let outcome = tokio::time::timeout(Duration::from_secs(5), first)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Delivered);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }
}
