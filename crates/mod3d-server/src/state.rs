use std::sync::Arc;

use mod3d_gate::{GateConfig, RequestGate};
use mod3d_lifecycle::LifecycleOrchestrator;
use mod3d_store::{InMemoryAuthorDirectory, InMemoryMetadataStore, InMemoryObjectStore};

use crate::auth::{AuthProvider, BearerUserAuth};

/// Everything a handler needs, assembled once at startup.
///
/// Cloning is cheap and shares the same orchestrator and auth provider.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<LifecycleOrchestrator>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(orchestrator: LifecycleOrchestrator, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            auth,
        }
    }

    /// State backed entirely by in-memory stores.
    pub fn in_memory(gate: GateConfig) -> Self {
        let orchestrator = LifecycleOrchestrator::with_gate(
            Arc::new(InMemoryMetadataStore::new()),
            Arc::new(InMemoryObjectStore::new()),
            Arc::new(InMemoryAuthorDirectory::new()),
            RequestGate::with_default_stages(gate),
        );
        Self::new(orchestrator, Arc::new(BearerUserAuth))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}
