use std::{sync::Arc, time::Duration};

use shared::{
    domain::{check_rank_order, ResultEntity},
    protocol::SearchRequest,
};
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::{info, warn};

use crate::{
    backend::SearchBackend,
    error::ClientError,
    lifecycle::{LifecyclePhase, LifecycleState, RequestLifecycle},
};

/// Owns the query text and the search request lifecycle.
pub struct SearchController {
    backend: Arc<dyn SearchBackend>,
    query: String,
    lifecycle: RequestLifecycle<Vec<ResultEntity>>,
}

impl SearchController {
    pub fn new(backend: Arc<dyn SearchBackend>, runtime: Handle) -> Self {
        Self {
            backend,
            query: String::new(),
            lifecycle: RequestLifecycle::new("search", runtime),
        }
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.lifecycle = self.lifecycle.with_timeout(limit);
        self
    }

    /// Stores the text verbatim. Never touches an in-flight request.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Searches for the query as it is right now, superseding any pending search.
    pub fn submit(&self) -> JoinHandle<()> {
        let request = SearchRequest {
            query: self.query.clone(),
        };
        let backend = Arc::clone(&self.backend);
        info!(query_len = request.query.len(), "submitting search");

        self.lifecycle.run(async move {
            let response = backend.search(request).await?;
            if let Some(violation) = check_rank_order(&response.results) {
                warn!(?violation, "search results are not strictly ordered by rank");
            }
            Ok(response.results)
        })
    }

    /// Results of the last settled search, in backend order; empty otherwise.
    pub fn results(&self) -> Vec<ResultEntity> {
        self.lifecycle
            .with_phase(|phase| phase.payload().cloned().unwrap_or_default())
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_pending()
    }

    pub fn last_error(&self) -> Option<ClientError> {
        self.lifecycle.with_phase(|phase| phase.failure().cloned())
    }

    pub fn phase(&self) -> LifecyclePhase<Vec<ResultEntity>> {
        self.lifecycle.current_phase()
    }

    pub fn with_phase<R>(&self, read: impl FnOnce(&LifecyclePhase<Vec<ResultEntity>>) -> R) -> R {
        self.lifecycle.with_phase(read)
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState<Vec<ResultEntity>>> {
        self.lifecycle.subscribe()
    }
}
