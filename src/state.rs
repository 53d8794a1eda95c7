use std::sync::Arc;

use crate::identity::IdentityService;
use crate::store::DocumentStore;

/// Shared handles to the two external collaborators, injected at router
/// construction so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityService>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(identity: Arc<dyn IdentityService>, store: Arc<dyn DocumentStore>) -> Self {
        Self { identity, store }
    }
}
