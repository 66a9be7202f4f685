//! Shared runtime state for cf-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum. The only mutable state
//! lives behind the injected store; the daemon itself holds nothing but the
//! handle and static build metadata.

use std::sync::Arc;

use cf_store::Store;
use serde::{Deserialize, Serialize};

/// Static build metadata included in the health response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

/// Cloneable (Arc) handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Injected store: Postgres in production, in-memory in tests.
    pub store: Arc<dyn Store>,
    /// Static build metadata.
    pub build: BuildInfo,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            build: BuildInfo {
                service: "cf-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}
