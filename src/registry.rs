use std::sync::Arc;

use ahash::RandomState;
use dashmap::DashMap;
use tracing::debug;

use crate::{config::DetectorConfig, error::Result, vectorizer::TrainedModel};

/// Identity of an active model: where the rows came from, which column, and
/// the vocabulary cap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub source: String,
    pub column: String,
    pub max_features: usize,
}

impl ModelKey {
    pub fn new(source: impl Into<String>, column: impl Into<String>, max_features: usize) -> Self {
        Self {
            source: source.into(),
            column: column.into(),
            max_features,
        }
    }
}

/// Session-scoped holder of the active model per [`ModelKey`].
///
/// Retraining swaps the whole `Arc` in one map insert; readers that already
/// hold the previous `Arc` keep a consistent model until they drop it.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: DashMap<ModelKey, Arc<TrainedModel>, RandomState>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Train on `rows` and make the result the active model for `key`.
    ///
    /// Training runs outside the map lock. On failure the previously active
    /// model, if any, stays in place.
    pub fn train<S>(&self, key: ModelKey, rows: &[S], config: &DetectorConfig) -> Result<Arc<TrainedModel>>
    where
        S: AsRef<str> + Sync,
    {
        let config = DetectorConfig {
            max_features: key.max_features,
            ..*config
        };
        let model = Arc::new(TrainedModel::train_with(rows, &config)?);
        let replaced = self.models.insert(key.clone(), Arc::clone(&model)).is_some();
        debug!(source = %key.source, column = %key.column, replaced, "activated model");
        Ok(model)
    }

    /// Active model for `key`
    pub fn get(&self, key: &ModelKey) -> Option<Arc<TrainedModel>> {
        self.models.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, key: &ModelKey) -> Option<Arc<TrainedModel>> {
        self.models.remove(key).map(|(_, model)| model)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
