use crate::registration::Registration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Store handle shared between a double and its request handlers.
pub type SharedStore = Arc<Mutex<ServiceStore>>;

/// In-memory table of registrations keyed by service id.
///
/// Keys are unique and the latest insert for a key replaces the previous
/// record. Iteration order is unspecified.
#[derive(Debug, Default)]
pub struct ServiceStore {
    records: HashMap<String, Registration>,
}

impl ServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Store `registration` under `service_id`, returning the record it replaced.
    pub fn insert(
        &mut self,
        service_id: impl Into<String>,
        registration: Registration,
    ) -> Option<Registration> {
        let service_id = service_id.into();
        debug!("Storing registration for service {:?}", service_id);
        self.records.insert(service_id, registration)
    }

    pub fn get(&self, service_id: &str) -> Option<&Registration> {
        self.records.get(service_id)
    }

    /// Remove the record for `service_id`; a missing key is not an error.
    pub fn remove(&mut self, service_id: &str) -> Option<Registration> {
        let removed = self.records.remove(service_id);
        if removed.is_some() {
            debug!("Removed registration for service {:?}", service_id);
        }
        removed
    }

    /// Copy every stored record into a fresh list.
    pub fn snapshot(&self) -> Vec<Registration> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
