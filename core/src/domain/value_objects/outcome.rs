//! Flow outcome value object returned by the authentication controller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an operation ended, from the user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// The operation did what the user asked
    Success,
    /// The operation was rejected; the message says why
    Failure,
    /// Nothing failed, but the user should read the message
    Info,
}

/// Where the caller should send the user next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    Login,
    Home,
    RegisterIndividual,
    RegisterOrganization,
    PetRegistration,
    OrgDashboard,
    ResetRequest,
    ResetVerify,
    ResetNewPassword,
}

impl RedirectTarget {
    /// Stable route name for the transport layer
    pub fn route_name(&self) -> &'static str {
        match self {
            RedirectTarget::Login => "login",
            RedirectTarget::Home => "home",
            RedirectTarget::RegisterIndividual => "register_individual",
            RedirectTarget::RegisterOrganization => "register_organization",
            RedirectTarget::PetRegistration => "pet_registration",
            RedirectTarget::OrgDashboard => "org_dashboard",
            RedirectTarget::ResetRequest => "reset_request",
            RedirectTarget::ResetVerify => "reset_verify",
            RedirectTarget::ResetNewPassword => "reset_new_password",
        }
    }
}

/// Session granted by a successful login
///
/// `ttl_seconds` of `None` means a browser-session login; the transport
/// keeps the session only until the browser closes. "Remember me" logins
/// carry an explicit lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    /// Authenticated account
    pub account_id: Uuid,

    /// Session lifetime in seconds, None for browser-session
    pub ttl_seconds: Option<u64>,
}

/// Result of a controller operation
///
/// The message is bilingual (English | Portuguese) like every user-facing
/// string in the domain layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Overall status
    pub status: OutcomeStatus,

    /// User-facing message
    pub message: String,

    /// Where to send the user next
    pub redirect: RedirectTarget,

    /// Session granted by a successful login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionGrant>,

    /// Recovery token handed to the requesting browser after a reset
    /// request. Never sent anywhere else.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_token: Option<String>,
}

impl Outcome {
    /// Creates a success outcome
    pub fn success(message: impl Into<String>, redirect: RedirectTarget) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: message.into(),
            redirect,
            session: None,
            recovery_token: None,
        }
    }

    /// Creates a failure outcome
    pub fn failure(message: impl Into<String>, redirect: RedirectTarget) -> Self {
        Self {
            status: OutcomeStatus::Failure,
            message: message.into(),
            redirect,
            session: None,
            recovery_token: None,
        }
    }

    /// Creates an informational outcome
    pub fn info(message: impl Into<String>, redirect: RedirectTarget) -> Self {
        Self {
            status: OutcomeStatus::Info,
            message: message.into(),
            redirect,
            session: None,
            recovery_token: None,
        }
    }

    /// Attaches a session grant
    pub fn with_session(mut self, session: SessionGrant) -> Self {
        self.session = Some(session);
        self
    }

    /// Attaches a recovery token
    pub fn with_recovery_token(mut self, token: impl Into<String>) -> Self {
        self.recovery_token = Some(token.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    pub fn is_failure(&self) -> bool {
        self.status == OutcomeStatus::Failure
    }
}
