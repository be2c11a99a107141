//! Parameter store implementation
//!
//! The authoritative in-memory key→value map. Thread-safe via `RwLock`;
//! read-heavy workloads (lookups, listing snapshots) benefit from the
//! concurrent read access. The store knows nothing about change
//! notification; that lives in [`super::broadcaster::ChangeBroadcaster`].

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::parameter::Parameter;

/// Baseline entries loaded at process start
///
/// Defaults for notification templates and business-rule limits of the
/// residential-complex management process.
const BASELINE_PARAMETERS: &[(&str, &str)] = &[
    // Notifications and contact
    (
        "notification.conjunto.administrator.email",
        "admin-conjuntos@uco.edu.co",
    ),
    (
        "notification.conjunto.creacion.template",
        "Hola %s, el conjunto residencial %s ha sido creado en la ciudad %s.",
    ),
    // Business rules
    ("gestion.conjunto.nombre.longitudMaxima", "80"),
    ("gestion.conjunto.listado.limite", "50"),
    ("conjunto.max.limit", "500"),
];

/// In-memory store of named configuration values
///
/// Invariant: at most one entry per key, and a stored parameter's key always
/// equals its map key. Absent keys are a normal result, never an error.
pub struct ParameterStore {
    /// Map of key to parameter
    parameters: RwLock<HashMap<String, Parameter>>,
}

impl ParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            parameters: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-loaded with the baseline entries
    pub fn with_defaults() -> Self {
        let mut parameters = HashMap::new();
        for (key, value) in BASELINE_PARAMETERS {
            parameters.insert((*key).to_string(), Parameter::new(*key, *value));
        }

        Self {
            parameters: RwLock::new(parameters),
        }
    }

    /// Look up a parameter by key
    pub async fn get(&self, key: &str) -> Option<Parameter> {
        self.parameters.read().await.get(key).cloned()
    }

    /// Insert or overwrite a parameter
    ///
    /// Returns the stored parameter and whether this write created the key
    /// (`true`) or replaced an existing value (`false`). The flag is computed
    /// in the same critical section as the write, so two concurrent upserts
    /// of one key can never both observe a creation.
    pub async fn upsert(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> (Parameter, bool) {
        let key = key.into();
        let stored = Parameter::new(key.clone(), value);

        let mut parameters = self.parameters.write().await;
        let prior = parameters.insert(key, stored.clone());
        (stored, prior.is_none())
    }

    /// Remove a parameter, returning the prior value if the key existed
    pub async fn remove(&self, key: &str) -> Option<Parameter> {
        self.parameters.write().await.remove(key)
    }

    /// Snapshot of all current entries
    pub async fn list_all(&self) -> Vec<Parameter> {
        self.parameters.read().await.values().cloned().collect()
    }

    /// Number of stored parameters
    pub async fn len(&self) -> usize {
        self.parameters.read().await.len()
    }

    /// Whether the store holds no parameters
    pub async fn is_empty(&self) -> bool {
        self.parameters.read().await.is_empty()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
