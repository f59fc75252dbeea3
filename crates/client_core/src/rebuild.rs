use std::{sync::Arc, time::Duration};

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::info;

use crate::{
    backend::RebuildBackend,
    error::ClientError,
    lifecycle::{LifecyclePhase, LifecycleState, RequestLifecycle},
};

/// Triggers the backend pipeline rebuild on a lifecycle of its own.
pub struct RebuildController {
    backend: Arc<dyn RebuildBackend>,
    lifecycle: RequestLifecycle<String>,
}

impl RebuildController {
    pub fn new(backend: Arc<dyn RebuildBackend>, runtime: Handle) -> Self {
        Self {
            backend,
            lifecycle: RequestLifecycle::new("rebuild", runtime),
        }
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.lifecycle = self.lifecycle.with_timeout(limit);
        self
    }

    pub fn trigger(&self) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        info!("triggering pipeline rebuild");
        self.lifecycle
            .run(async move { Ok(backend.rebuild().await?.status) })
    }

    /// Backend status text, present only after a successful rebuild call.
    pub fn status(&self) -> Option<String> {
        self.lifecycle.with_phase(|phase| phase.payload().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_pending()
    }

    pub fn last_error(&self) -> Option<ClientError> {
        self.lifecycle.with_phase(|phase| phase.failure().cloned())
    }

    pub fn phase(&self) -> LifecyclePhase<String> {
        self.lifecycle.current_phase()
    }

    pub fn generation(&self) -> u64 {
        self.lifecycle.generation()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState<String>> {
        self.lifecycle.subscribe()
    }
}
