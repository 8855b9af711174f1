//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! into middleware via `from_fn_with_state`. It holds the typed config, the
//! backend client behind its trait, the single access policy shared by the
//! gate and the page guard, and the preloaded dictionaries.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::i18n::Dictionaries;
use crate::policy::AccessPolicy;
use crate::services::backend::StorefrontApi;

/// Shared application state. Clone is required by Axum; all fields are `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn StorefrontApi>,
    pub policy: Arc<AccessPolicy>,
    pub dictionaries: Arc<Dictionaries>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, api: Arc<dyn StorefrontApi>, dictionaries: Dictionaries) -> Self {
        Self {
            config: Arc::new(config),
            api,
            policy: Arc::new(AccessPolicy::default()),
            dictionaries: Arc::new(dictionaries),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
