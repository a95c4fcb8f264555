// Name availability protocol.
//
// Renaming an exchange or a participant is a two-step affair. The browser intercepts the form
// submission, asks the server whether the new name is free, and only then submits the form for
// real. The server answers
//
//     GET /check_name?name=<name>
//     GET /check_participant_name?exchangeslug=<slug>&newname=<name>&oldname=<name>
//
// with `{"nameAvailable": bool}`.
//
// Some names are rejected locally without asking the server: empty names, names equal to the
// current one and names starting with "/" (these would clash with routes).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{self, Either};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ClientConfig;
use crate::validity::ValidityError;


pub const RESERVED_NAME_PREFIX: char = '/';
pub const CHECK_NAME_PATH: &str = "/check_name";
pub const CHECK_PARTICIPANT_NAME_PATH: &str = "/check_participant_name";

// Who is being renamed. Supplied by the page that hosts the rename form.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RenameContext {
    pub exchange_slug: String,
    pub old_name: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RenameTarget {
    Exchange { current_name: Option<String> },
    Participant(RenameContext),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NameCheckRequest {
    Exchange { name: String, current_name: Option<String> },
    Participant { context: RenameContext, new_name: String },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameCheckResponse {
    pub name_available: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NameCheckError {
    InvalidUrl(String),
    Transport(String),
    Timeout(Duration),
}

impl fmt::Display for NameCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameCheckError::InvalidUrl(err) => write!(f, "invalid check URL: {err}"),
            NameCheckError::Transport(err) => write!(f, "name check request failed: {err}"),
            NameCheckError::Timeout(timeout) => {
                write!(f, "name check timed out after {}ms", timeout.as_millis())
            }
        }
    }
}

impl std::error::Error for NameCheckError {}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NameCheckOutcome {
    Available,
    Rejected(ValidityError),
    Failed(NameCheckError),
}

impl NameCheckOutcome {
    // The error to show to the user, if any.
    pub fn validity_error(&self) -> Option<ValidityError> {
        match self {
            NameCheckOutcome::Available => None,
            NameCheckOutcome::Rejected(err) => Some(*err),
            NameCheckOutcome::Failed(_) => Some(ValidityError::CheckFailed),
        }
    }
}

impl RenameTarget {
    pub fn request(&self, candidate: impl Into<String>) -> NameCheckRequest {
        match self {
            RenameTarget::Exchange { current_name } => NameCheckRequest::Exchange {
                name: candidate.into(),
                current_name: current_name.clone(),
            },
            RenameTarget::Participant(context) => NameCheckRequest::Participant {
                context: context.clone(),
                new_name: candidate.into(),
            },
        }
    }
}

impl NameCheckRequest {
    pub fn candidate(&self) -> &str {
        match self {
            NameCheckRequest::Exchange { name, .. } => name,
            NameCheckRequest::Participant { new_name, .. } => new_name,
        }
    }

    pub fn current_name(&self) -> Option<&str> {
        match self {
            NameCheckRequest::Exchange { current_name, .. } => current_name.as_deref(),
            NameCheckRequest::Participant { context, .. } => Some(&context.old_name),
        }
    }

    // Checks that don't need the server.
    pub fn precheck(&self) -> Result<(), ValidityError> {
        let candidate = self.candidate();
        if candidate.is_empty() {
            Err(ValidityError::EmptyName)
        } else if candidate.starts_with(RESERVED_NAME_PREFIX) {
            Err(ValidityError::ReservedPrefix)
        } else if self.current_name() == Some(candidate) {
            Err(ValidityError::NameUnchanged)
        } else {
            Ok(())
        }
    }

    pub fn endpoint_url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = match self {
            NameCheckRequest::Exchange { .. } => base.join(CHECK_NAME_PATH)?,
            NameCheckRequest::Participant { .. } => base.join(CHECK_PARTICIPANT_NAME_PATH)?,
        };
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            match self {
                NameCheckRequest::Exchange { name, .. } => {
                    query.append_pair("name", name);
                }
                NameCheckRequest::Participant { context, new_name } => {
                    query
                        .append_pair("exchangeslug", &context.exchange_slug)
                        .append_pair("newname", new_name)
                        .append_pair("oldname", &context.old_name);
                }
            }
        }
        Ok(url)
    }
}

// The HTTP client and the timer. Implemented on top of browser fetch in the web client, on top of
// a native HTTP client in the console and mocked in tests.
//
// Futures are not `Send`: the web client is single-threaded.
#[async_trait(?Send)]
pub trait NameCheckTransport {
    async fn fetch_availability(&self, url: &Url) -> Result<NameCheckResponse, NameCheckError>;
    async fn sleep(&self, duration: Duration);
}

pub struct NameChecker<T> {
    transport: T,
    base_url: Url,
    timeout: Duration,
}

impl<T: NameCheckTransport> NameChecker<T> {
    pub fn new(transport: T, base_url: Url, timeout: Duration) -> Self {
        NameChecker { transport, base_url, timeout }
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Result<Self, NameCheckError> {
        let base_url =
            config.server_url().map_err(|err| NameCheckError::InvalidUrl(err.to_string()))?;
        Ok(Self::new(transport, base_url, config.name_check_timeout))
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    // Asks the server. Does not apply local checks.
    pub async fn query(&self, request: &NameCheckRequest) -> Result<bool, NameCheckError> {
        let url = request
            .endpoint_url(&self.base_url)
            .map_err(|err| NameCheckError::InvalidUrl(err.to_string()))?;
        log::debug!("Checking name availability: {url}");
        let fetch = self.transport.fetch_availability(&url);
        let deadline = self.transport.sleep(self.timeout);
        match future::select(fetch, deadline).await {
            Either::Left((response, _)) => response.map(|response| response.name_available),
            Either::Right(((), _)) => Err(NameCheckError::Timeout(self.timeout)),
        }
    }

    pub async fn check(&self, request: &NameCheckRequest) -> NameCheckOutcome {
        if let Err(err) = request.precheck() {
            return NameCheckOutcome::Rejected(err);
        }
        match self.query(request).await {
            Ok(true) => NameCheckOutcome::Available,
            Ok(false) => NameCheckOutcome::Rejected(ValidityError::NameTaken),
            Err(err) => {
                log::warn!("Cannot check name \"{}\": {}", request.candidate(), err);
                NameCheckOutcome::Failed(err)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitDecision {
    // Submit the form for real, without going through the check again.
    Submit,
    // Set the custom validity on the name input and report it. Don't submit.
    Report(ValidityError),
}

// State of one rename form between the intercepted submission and the server's answer.
#[derive(Clone, Debug)]
pub struct RenameForm {
    target: RenameTarget,
    value: String,
    validity: Option<ValidityError>,
    pending: bool,
}

impl RenameForm {
    pub fn new(target: RenameTarget) -> Self {
        RenameForm {
            target,
            value: String::new(),
            validity: None,
            pending: false,
        }
    }

    pub fn value(&self) -> &str { &self.value }
    pub fn validity(&self) -> Option<ValidityError> { self.validity }
    pub fn is_pending(&self) -> bool { self.pending }

    // Any change to the input invalidates the previous verdict.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.validity = None;
    }

    // Returns the request to send, or `None` if a check for this form is already in flight.
    pub fn begin_submit(&mut self) -> Option<NameCheckRequest> {
        if self.pending {
            log::debug!("Name check already in progress, ignoring submission");
            return None;
        }
        self.pending = true;
        Some(self.target.request(self.value.clone()))
    }

    pub fn finish_submit(&mut self, outcome: &NameCheckOutcome) -> SubmitDecision {
        self.pending = false;
        let error = outcome.validity_error();
        self.validity = error.filter(|err| !err.is_transient());
        match error {
            None => SubmitDecision::Submit,
            Some(err) => SubmitDecision::Report(err),
        }
    }
}
