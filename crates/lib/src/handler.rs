//! # Generation Request Handler
//!
//! Owns the three pieces of UI-facing state (busy flag, result payload and
//! selected version) and drives a single generation request per invocation.
//!
//! State is published through a `tokio::sync::watch` channel. Every transition
//! is applied inside one `send_modify`/`send_if_modified` call, so observers
//! never see a half-applied outcome.

use crate::client::GenerationBackend;
use crate::errors::{GenerateError, SelectError};
use crate::notify::{Notifier, GENERATION_FAILED_MESSAGE};
use crate::types::{RequestPayload, ResultPayload};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// A snapshot of the handler's UI-facing state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationState {
    /// `true` only while a request is in flight.
    pub busy: bool,
    /// The last successful result. Failures never overwrite it.
    pub result: Option<ResultPayload>,
    /// Index into `result.versions()`. Reset to 0 on every success.
    pub selected_version: usize,
}

impl GenerationState {
    /// The number of versions the current result offers.
    pub fn version_count(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.versions().len())
    }

    /// The currently selected version, if the result has one at that index.
    pub fn selected(&self) -> Option<&Value> {
        self.result
            .as_ref()
            .and_then(|r| r.versions().get(self.selected_version))
    }

    fn check_index(&self, index: usize) -> Result<(), SelectError> {
        if self.result.is_none() {
            return Err(SelectError::NoResult);
        }
        let len = self.version_count();
        if index >= len {
            return Err(SelectError::OutOfRange { index, len });
        }
        Ok(())
    }
}

/// The result of one completed generation request.
#[derive(Debug)]
pub enum Outcome {
    Success(ResultPayload),
    Failure(GenerateError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Why an invocation did not reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The input was empty after trimming.
    EmptyInput,
    /// Another request was already in flight.
    Busy,
}

/// What happened to a call to [`GenerationRequestHandler::generate`].
#[derive(Debug)]
pub enum Invocation {
    Skipped(SkipReason),
    Completed(Outcome),
}

impl Invocation {
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Invocation::Completed(outcome) => Some(outcome),
            Invocation::Skipped(_) => None,
        }
    }
}

/// Clears the busy flag when dropped, so a cancelled or panicking request
/// still returns the handler to idle.
struct BusyGuard<'a> {
    state: &'a watch::Sender<GenerationState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.busy, false));
    }
}

/// Sends user text to the generation service and tracks the resulting UI state.
#[derive(Debug)]
pub struct GenerationRequestHandler {
    backend: Box<dyn GenerationBackend>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<GenerationState>,
}

impl GenerationRequestHandler {
    pub fn new(backend: Box<dyn GenerationBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(GenerationState::default());
        Self {
            backend,
            notifier,
            state,
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> GenerationState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().busy
    }

    /// Generates content for `input`.
    ///
    /// Empty or whitespace-only input is ignored, as is any call made while a
    /// previous request is still in flight. Otherwise exactly one request is
    /// sent. On failure the previous result is kept, the error is logged and
    /// the notifier shows a single alert.
    pub async fn generate(&self, input: &str) -> Invocation {
        self.generate_payload(RequestPayload::new(input)).await
    }

    /// Like [`generate`](Self::generate), with a fully built payload.
    pub async fn generate_payload(&self, payload: RequestPayload) -> Invocation {
        if payload.user_input.trim().is_empty() {
            return Invocation::Skipped(SkipReason::EmptyInput);
        }

        let started = self.state.send_if_modified(|s| {
            if s.busy {
                false
            } else {
                s.busy = true;
                true
            }
        });
        if !started {
            warn!("Generation already in progress; ignoring new request.");
            return Invocation::Skipped(SkipReason::Busy);
        }
        let _guard = BusyGuard { state: &self.state };

        let outcome = match self.backend.generate(&payload).await {
            Ok(result) => Outcome::Success(result),
            Err(e) => Outcome::Failure(e),
        };

        match &outcome {
            Outcome::Success(result) => {
                info!(
                    "Generation succeeded with {} version(s).",
                    result.versions().len()
                );
                self.state.send_modify(|s| {
                    s.result = Some(result.clone());
                    s.selected_version = 0;
                    s.busy = false;
                });
            }
            Outcome::Failure(e) => {
                error!("Generation failed: {e}");
                self.notifier.alert(GENERATION_FAILED_MESSAGE);
                self.state.send_modify(|s| s.busy = false);
            }
        }

        Invocation::Completed(outcome)
    }

    /// Selects the version at `index`, checked against the current result.
    pub fn select_version(&self, index: usize) -> Result<usize, SelectError> {
        let mut checked = Ok(index);
        self.state.send_if_modified(|s| {
            if let Err(e) = s.check_index(index) {
                checked = Err(e);
                return false;
            }
            let changed = s.selected_version != index;
            s.selected_version = index;
            changed
        });
        checked
    }

    /// Moves the selection forward by one, stopping at the last version.
    pub fn next_version(&self) -> Result<usize, SelectError> {
        let (current, len) = {
            let state = self.state.borrow();
            (state.selected_version, state.version_count())
        };
        self.select_version((current + 1).min(len.saturating_sub(1)))
    }

    /// Moves the selection back by one, stopping at the first version.
    pub fn previous_version(&self) -> Result<usize, SelectError> {
        let current = self.state.borrow().selected_version;
        self.select_version(current.saturating_sub(1))
    }
}
