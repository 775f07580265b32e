//! ListModels query handler.
//!
//! Building the provider doubles as a credential check: a missing or rejected
//! key surfaces here, before any drafting is attempted.

use std::sync::Arc;

use super::ProposalError;
use crate::ports::{ProviderFactory, ProviderSelection};

/// Query for the models a provider offers to this credential.
#[derive(Debug, Clone)]
pub struct ListModelsQuery {
    pub selection: ProviderSelection,
}

impl ListModelsQuery {
    pub fn new(selection: ProviderSelection) -> Self {
        Self { selection }
    }
}

/// Handler for ListModels queries.
pub struct ListModelsHandler {
    factory: Arc<dyn ProviderFactory>,
}

impl ListModelsHandler {
    pub fn new(factory: Arc<dyn ProviderFactory>) -> Self {
        Self { factory }
    }

    pub async fn handle(&self, query: ListModelsQuery) -> Result<Vec<String>, ProposalError> {
        let provider = query.selection.provider;
        let models = self.factory.create(&query.selection)?.list_models().await;

        match &models {
            Ok(models) => tracing::info!(provider = %provider, count = models.len(), "Listed models"),
            Err(err) => tracing::warn!(provider = %provider, error = %err, "Model listing failed"),
        }

        Ok(models?)
    }
}
