//! Test doubles for wiring handlers without real providers.

use std::sync::{Arc, Mutex};

use crate::adapters::ai::MockAIProvider;
use crate::ports::{AIError, AIProvider, ProviderFactory, ProviderSelection};

/// Factory that always hands out the same mock provider.
#[derive(Debug, Clone)]
pub struct StaticProviderFactory {
    provider: Option<MockAIProvider>,
    selections: Arc<Mutex<Vec<ProviderSelection>>>,
}

impl StaticProviderFactory {
    pub fn new(provider: MockAIProvider) -> Self {
        Self {
            provider: Some(provider),
            selections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A factory for which every provider lacks a key.
    pub fn without_credentials() -> Self {
        Self {
            provider: None,
            selections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every selection passed to `create`, oldest first.
    pub fn selections(&self) -> Vec<ProviderSelection> {
        self.selections
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl ProviderFactory for StaticProviderFactory {
    fn create(&self, selection: &ProviderSelection) -> Result<Arc<dyn AIProvider>, AIError> {
        if let Ok(mut selections) = self.selections.lock() {
            selections.push(selection.clone());
        }
        match &self.provider {
            Some(provider) => Ok(Arc::new(provider.clone())),
            None => Err(AIError::MissingCredential {
                provider: selection.provider,
            }),
        }
    }
}
