//! Process-wide cache of the client collection.
//!
//! State only changes by dispatching a [`ClientAction`] through [`reduce`].
//! Every action carries a complete snapshot, so the cache never merges.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::client::Client;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientAction {
    /// Replace the cached collection with a freshly fetched one.
    FetchAllClients(Vec<Client>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientState {
    pub clients: Vec<Client>,
    /// Number of actions applied so far.
    pub revision: u64,
}

pub fn reduce(state: ClientState, action: ClientAction) -> ClientState {
    match action {
        ClientAction::FetchAllClients(clients) => ClientState {
            clients,
            revision: state.revision + 1,
        },
    }
}

/// Shared handle to the cache. Clones point at the same state.
#[derive(Clone, Debug, Default)]
pub struct ClientStore {
    state: Arc<RwLock<ClientState>>,
}

impl ClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, action: ClientAction) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let current = std::mem::take(&mut *state);
        *state = reduce(current, action);
        log::debug!(
            "Client store at revision {} with {} client(s)",
            state.revision,
            state.clients.len()
        );
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ClientState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clients(&self) -> Vec<Client> {
        self.snapshot().clients
    }
}
