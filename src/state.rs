use std::sync::Arc;

use ssc_backend::{ProvisioningClient, SessionClient};
use ssc_core::Grammar;

/// Application state shared across handlers.
pub struct AppState<P, S> {
    pub grammar: Arc<Grammar>,
    pub provisioning: Arc<P>,
    pub sessions: Arc<S>,
    pub default_operator: Arc<str>,
}

impl<P, S> AppState<P, S>
where
    P: ProvisioningClient,
    S: SessionClient,
{
    pub fn new(grammar: Grammar, provisioning: P, sessions: S, default_operator: &str) -> Self {
        Self {
            grammar: Arc::new(grammar),
            provisioning: Arc::new(provisioning),
            sessions: Arc::new(sessions),
            default_operator: Arc::from(default_operator),
        }
    }
}

// Manual impl: the clients themselves need not be Clone.
impl<P, S> Clone for AppState<P, S> {
    fn clone(&self) -> Self {
        Self {
            grammar: self.grammar.clone(),
            provisioning: self.provisioning.clone(),
            sessions: self.sessions.clone(),
            default_operator: self.default_operator.clone(),
        }
    }
}
