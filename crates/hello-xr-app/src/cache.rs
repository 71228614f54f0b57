//! Single-slot, session-scoped model cache

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use hello_xr_scene::{ResourceSource, SceneError, XrSession};

/// Holds at most one loaded model.
///
/// Owned by whoever owns the session; clearing it drops this cache's
/// reference to the model. Cold concurrent callers may each load; the
/// first handle stored wins and every caller gets it back. A load that
/// started before a [`clear`](ModelCache::clear) is handed to its caller
/// but never stored.
pub struct ModelCache<M> {
    model_name: String,
    slot: Mutex<Option<Arc<M>>>,
    /// Bumped under the slot lock on every clear
    generation: AtomicU64,
    loads: AtomicUsize,
}

impl<M: Send + Sync + 'static> ModelCache<M> {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            slot: Mutex::new(None),
            generation: AtomicU64::new(0),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Cached handle, if warm
    pub fn cached(&self) -> Option<Arc<M>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_warm(&self) -> bool {
        self.cached().is_some()
    }

    /// Number of successful model constructions
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Return the cached model or load it from `source`.
    ///
    /// Returns `None` without touching `source` when there is no session,
    /// and `None` when reading or constructing the model fails. Failures
    /// leave the cache cold so a later call retries.
    pub async fn get_or_load<S>(
        &self,
        session: Option<&S>,
        source: &dyn ResourceSource,
    ) -> Option<Arc<M>>
    where
        S: XrSession<Model = M>,
    {
        let Some(session) = session else {
            tracing::warn!("Cannot load model '{}', session is absent", self.model_name);
            return None;
        };

        if let Some(model) = self.cached() {
            return Some(model);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        match self.load(session, source).await {
            Ok(model) => {
                self.loads.fetch_add(1, Ordering::SeqCst);
                let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
                if self.generation.load(Ordering::SeqCst) != generation {
                    tracing::debug!("Cache for '{}' cleared during load, not storing", self.model_name);
                    return Some(model);
                }
                Some(Arc::clone(slot.get_or_insert(model)))
            }
            Err(e) => {
                tracing::error!(
                    "Error loading glTF model '{}' from {}: {}",
                    self.model_name,
                    source.describe(),
                    e
                );
                None
            }
        }
    }

    async fn load<S>(&self, session: &S, source: &dyn ResourceSource) -> Result<Arc<M>, SceneError>
    where
        S: XrSession<Model = M>,
    {
        let bytes = source.read().await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), source.describe());
        session.create_gltf_model(bytes, &self.model_name).await
    }

    /// Drop the cached handle
    pub fn clear(&self) {
        let previous = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            self.generation.fetch_add(1, Ordering::SeqCst);
            slot.take()
        };
        if previous.is_some() {
            tracing::debug!("Cleared cached model '{}'", self.model_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hello_xr_scene::sim::{SimModel, SimSession};
    use hello_xr_scene::GltfModel;

    const DOC: &str = r#"{
        "asset": {"version": "2.0"},
        "accessors": [{"componentType": 5126, "count": 1, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [0.0, 0.0, 0.0]}],
        "meshes": [{"name": "Bugdroid", "primitives": [{"attributes": {"POSITION": 0}}]}],
        "animations": [{"name": "Wave", "channels": [], "samplers": []}]
    }"#;

    struct CountingSource {
        bytes: Vec<u8>,
        reads: AtomicUsize,
    }

    impl CountingSource {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                reads: AtomicUsize::new(0),
            }
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResourceSource for CountingSource {
        fn describe(&self) -> String {
            "counting".to_string()
        }

        async fn read(&self) -> Result<Vec<u8>, SceneError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(self.bytes.clone())
        }
    }

    #[tokio::test]
    async fn test_warm_cache_skips_loading() {
        let session = SimSession::new();
        let source = CountingSource::new(DOC.as_bytes());
        let cache: ModelCache<SimModel> = ModelCache::new("BUGDROID");

        let first = cache.get_or_load(Some(&session), &source).await.unwrap();
        let second = cache.get_or_load(Some(&session), &source).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "BUGDROID");
        assert_eq!(source.reads(), 1);
        assert_eq!(session.models_created(), 1);
        assert_eq!(cache.load_count(), 1);
    }

    #[tokio::test]
    async fn test_absent_session_never_reads() {
        let source = CountingSource::new(DOC.as_bytes());
        let cache: ModelCache<SimModel> = ModelCache::new("BUGDROID");

        assert!(cache.get_or_load::<SimSession>(None, &source).await.is_none());
        assert_eq!(source.reads(), 0);
        assert!(!cache.is_warm());
    }

    #[tokio::test]
    async fn test_failure_leaves_cache_cold() {
        let session = SimSession::new();
        let broken = CountingSource::new(b"not a model");
        let cache: ModelCache<SimModel> = ModelCache::new("BUGDROID");

        assert!(cache.get_or_load(Some(&session), &broken).await.is_none());
        assert!(!cache.is_warm());

        let good = CountingSource::new(DOC.as_bytes());
        assert!(cache.get_or_load(Some(&session), &good).await.is_some());
        assert!(cache.is_warm());
    }

    #[tokio::test]
    async fn test_clear_forces_reload() {
        let session = SimSession::new();
        let source = CountingSource::new(DOC.as_bytes());
        let cache: ModelCache<SimModel> = ModelCache::new("BUGDROID");

        let first = cache.get_or_load(Some(&session), &source).await.unwrap();
        cache.clear();
        assert!(!cache.is_warm());

        let second = cache.get_or_load(Some(&session), &source).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(source.reads(), 2);
    }

    struct GatedSource {
        gate: tokio::sync::Notify,
    }

    #[async_trait]
    impl ResourceSource for GatedSource {
        fn describe(&self) -> String {
            "gated".to_string()
        }

        async fn read(&self) -> Result<Vec<u8>, SceneError> {
            self.gate.notified().await;
            Ok(DOC.as_bytes().to_vec())
        }
    }

    #[tokio::test]
    async fn test_clear_during_load_is_not_undone() {
        let session = SimSession::new();
        let source = GatedSource { gate: tokio::sync::Notify::new() };
        let cache: ModelCache<SimModel> = ModelCache::new("BUGDROID");

        let (model, ()) = tokio::join!(cache.get_or_load(Some(&session), &source), async {
            tokio::task::yield_now().await;
            cache.clear();
            source.gate.notify_one();
        });

        assert!(model.is_some());
        assert!(!cache.is_warm());
        assert_eq!(cache.load_count(), 1);
    }

    #[tokio::test]
    async fn test_racing_loads_keep_first_handle() {
        let session = SimSession::new();
        let source = CountingSource::new(DOC.as_bytes());
        let cache: ModelCache<SimModel> = ModelCache::new("BUGDROID");

        let (a, b) = tokio::join!(
            cache.get_or_load(Some(&session), &source),
            cache.get_or_load(Some(&session), &source),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(source.reads(), 2);
        assert_eq!(cache.load_count(), 2);
        assert!(Arc::ptr_eq(&cache.cached().unwrap(), &a));
    }
}
