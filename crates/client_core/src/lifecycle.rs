//! Generic tracker for one logically independent asynchronous request.
//!
//! A [`RequestLifecycle`] moves through `Idle -> Pending -> Succeeded|Failed`
//! and back to `Pending` on every new [`RequestLifecycle::run`]. Each call is
//! tagged with a monotonically increasing sequence number; a settlement is
//! applied only while its number is still the most recently issued one, so a
//! slow superseded response can never overwrite a newer state.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum LifecyclePhase<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(ClientError),
}

impl<T> LifecyclePhase<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Succeeded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Phase plus the sequence number of the most recently issued call.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleState<T> {
    pub issued: u64,
    pub phase: LifecyclePhase<T>,
}

/// Proof of issuance handed out by [`RequestLifecycle::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

pub struct RequestLifecycle<T> {
    name: &'static str,
    state: Arc<watch::Sender<LifecycleState<T>>>,
    runtime: Handle,
    timeout: Option<Duration>,
}

impl<T> RequestLifecycle<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, runtime: Handle) -> Self {
        let (state, _) = watch::channel(LifecycleState {
            issued: 0,
            phase: LifecyclePhase::Idle,
        });
        Self {
            name,
            state: Arc::new(state),
            runtime,
            timeout: None,
        }
    }

    /// Bounds every operation; expiry settles the call as `Failed(Timeout)`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn current_phase(&self) -> LifecyclePhase<T> {
        self.state.borrow().phase.clone()
    }

    /// Reads the phase in place without cloning the payload.
    pub fn with_phase<R>(&self, read: impl FnOnce(&LifecyclePhase<T>) -> R) -> R {
        read(&self.state.borrow().phase)
    }

    pub fn is_pending(&self) -> bool {
        self.with_phase(LifecyclePhase::is_pending)
    }

    /// Sequence number of the latest issued call; zero before the first one.
    pub fn generation(&self) -> u64 {
        self.state.borrow().issued
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState<T>> {
        self.state.subscribe()
    }

    /// Enters `Pending` and issues a fresh sequence number, superseding any
    /// call still in flight.
    pub fn begin(&self) -> Ticket {
        let mut issued = 0;
        self.state.send_modify(|state| {
            state.issued += 1;
            state.phase = LifecyclePhase::Pending;
            issued = state.issued;
        });
        Ticket(issued)
    }

    /// Applies `outcome` if `ticket` is still current. Returns whether it was applied.
    pub fn settle(&self, ticket: Ticket, outcome: Result<T, ClientError>) -> bool {
        apply_settlement(&self.state, self.name, ticket, outcome)
    }

    /// Starts `operation` on the runtime. The lifecycle is `Pending` when this
    /// returns; the handle resolves once the outcome has been applied or dropped.
    pub fn run<F>(&self, operation: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let ticket = self.begin();
        let state = Arc::clone(&self.state);
        let name = self.name;
        let timeout = self.timeout;

        self.runtime.spawn(async move {
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, operation)
                    .await
                    .unwrap_or_else(|_| {
                        Err(ClientError::Timeout(format!(
                            "{name} did not settle within {}ms",
                            limit.as_millis()
                        )))
                    }),
                None => operation.await,
            };
            apply_settlement(&state, name, ticket, outcome);
        })
    }
}

fn apply_settlement<T>(
    state: &watch::Sender<LifecycleState<T>>,
    name: &'static str,
    ticket: Ticket,
    outcome: Result<T, ClientError>,
) -> bool {
    let failure = outcome.as_ref().err().cloned();
    let mut latest = 0;
    let applied = state.send_if_modified(|current| {
        latest = current.issued;
        if current.issued != ticket.0 || !current.phase.is_pending() {
            return false;
        }
        current.phase = match outcome {
            Ok(payload) => LifecyclePhase::Succeeded(payload),
            Err(err) => LifecyclePhase::Failed(err),
        };
        true
    });

    if !applied {
        debug!(
            lifecycle = name,
            seq = ticket.0,
            latest,
            "discarding stale settlement"
        );
    } else if let Some(err) = failure {
        warn!(lifecycle = name, seq = ticket.0, "request failed: {err}");
    } else {
        debug!(lifecycle = name, seq = ticket.0, "request succeeded");
    }
    applied
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;
