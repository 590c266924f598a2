//! Copier registry: compute-once cache of generated copiers.
//!
//! Lookups for an already generated key take a shared read lock and a
//! `OnceLock` read. Generation happens under a per-key init mutex, so
//! concurrent first requests for one key generate exactly once while other
//! keys proceed independently.

mod key;


pub use key::CopierKey;

use crate::{
    config::RegistryConfig,
    convert::Converter,
    copier::{self, Copier, CopyFlags, PlanReport},
    error::{Error, GenerationError},
    obs::{CopierMetrics, MetricsEvent, MetricsSink, MetricsSnapshot},
    traits::{Bean, CopySource},
};
use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, OnceLock, PoisonError, RwLock},
};
use tracing::{debug, info, trace, warn};

type ErasedCopier = Arc<dyn Any + Send + Sync>;

///
/// Slot
///
/// Per-key cell. Empty until a generation succeeds; a failure leaves it
/// empty so the next request retries, and the registry drops it once no
/// other request holds it.
///

#[derive(Default)]
struct Slot {
    copier: OnceLock<ErasedCopier>,
    init: Mutex<()>,
}

///
/// CacheStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub generations: u64,
    pub failures: u64,
    pub size: usize,
}

///
/// CopierRegistry
///
/// Shared cache of copiers keyed by `CopierKey`. Cheap to share behind an
/// `Arc`; every method takes `&self`.
///

pub struct CopierRegistry {
    slots: RwLock<HashMap<CopierKey, Arc<Slot>>>,
    config: RegistryConfig,
    metrics: CopierMetrics,
    sink: Option<Arc<dyn MetricsSink>>,
}

impl CopierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            config,
            metrics: CopierMetrics::new(),
            sink: None,
        }
    }

    /// Forward every metrics event to `sink` in addition to the built-in
    /// counters.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Return the copier for `S -> T` with the given flags, generating it on
    /// first use.
    pub fn create<S, T>(
        &self,
        use_converter: bool,
        skip_null: bool,
    ) -> Result<Arc<Copier<S, T>>, GenerationError>
    where
        S: CopySource,
        T: Bean,
    {
        let key = CopierKey::of::<S, T>(use_converter, skip_null);
        let source_path = <S as CopySource>::PATH;
        let target_path = <T as Bean>::PATH;

        let erased = self.get_or_generate(key, source_path, target_path, || {
            let copier = copier::generate::<S, T>(key, self.config.diagnostics)?;

            self.record(MetricsEvent::Generated {
                source_path,
                target_path,
                steps: copier.len() as u64,
                skipped: copier.skipped() as u64,
            });

            let erased: ErasedCopier = Arc::new(copier);
            Ok(erased)
        })?;

        erased
            .downcast::<Copier<S, T>>()
            .map_err(|_| GenerationError::SlotMismatch {
                source_path,
                target_path,
            })
    }

    fn get_or_generate<F>(
        &self,
        key: CopierKey,
        source_path: &'static str,
        target_path: &'static str,
        generate: F,
    ) -> Result<ErasedCopier, GenerationError>
    where
        F: FnOnce() -> Result<ErasedCopier, GenerationError>,
    {
        let slot = self.slot(key);

        if let Some(copier) = slot.copier.get() {
            self.record(MetricsEvent::CacheHit {
                source_path,
                target_path,
            });
            trace!(source = source_path, target = target_path, "copier cache hit");
            return Ok(Arc::clone(copier));
        }

        let _guard = slot.init.lock().unwrap_or_else(PoisonError::into_inner);

        // another thread may have finished while we waited
        if let Some(copier) = slot.copier.get() {
            self.record(MetricsEvent::CacheHit {
                source_path,
                target_path,
            });
            return Ok(Arc::clone(copier));
        }

        self.record(MetricsEvent::CacheMiss {
            source_path,
            target_path,
        });

        match generate() {
            Ok(copier) => {
                let copier = Arc::clone(slot.copier.get_or_init(|| copier));
                if self.config.diagnostics.log_generation {
                    info!(
                        source = source_path,
                        target = target_path,
                        flags = ?key.flags(),
                        "copier generated"
                    );
                } else {
                    debug!(
                        source = source_path,
                        target = target_path,
                        flags = ?key.flags(),
                        "copier generated"
                    );
                }

                Ok(copier)
            }
            Err(err) => {
                self.discard_if_unused(key, &slot);
                self.record(MetricsEvent::GenerationFailed {
                    source_path,
                    target_path,
                });
                warn!(
                    source = source_path,
                    target = target_path,
                    error = %err,
                    "copier generation failed"
                );

                Err(err)
            }
        }
    }

    fn slot(&self, key: CopierKey) -> Arc<Slot> {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(slot);
        }

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key).or_default())
    }

    // Drop an empty slot left by a failed generation. A slot someone else
    // still holds stays, so a waiting thread retries on the mapped slot.
    // Clones are only taken under the map lock, so the count is stable here.
    fn discard_if_unused(&self, key: CopierKey, slot: &Arc<Slot>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);

        let unused = slots.get(&key).is_some_and(|mapped| {
            Arc::ptr_eq(mapped, slot)
                && Arc::strong_count(slot) == 2
                && slot.copier.get().is_none()
        });
        if unused {
            slots.remove(&key);
        }
    }

    /// Describe how `S -> T` would be copied, without generating or caching.
    pub fn explain<S, T>(&self, use_converter: bool) -> Result<PlanReport, GenerationError>
    where
        S: CopySource,
        T: Bean,
    {
        copier::explain::<S, T>(CopyFlags::new(use_converter, self.config.defaults.skip_null))
    }

    // ------------------------------------------------------------------
    // Convenience copies
    // ------------------------------------------------------------------

    /// Copy without a converter; incompatible properties are skipped.
    pub fn copy<S, T>(&self, source: &S, target: &mut T) -> Result<(), Error>
    where
        S: CopySource,
        T: Bean,
    {
        let copier = self.create::<S, T>(false, self.config.defaults.skip_null)?;

        Ok(copier.copy(source, target, None)?)
    }

    /// Copy routing every incompatible property through `converter`.
    pub fn copy_with_converter<S, T>(
        &self,
        source: &S,
        target: &mut T,
        converter: &dyn Converter,
    ) -> Result<(), Error>
    where
        S: CopySource,
        T: Bean,
    {
        let copier = self.create::<S, T>(true, self.config.defaults.skip_null)?;

        Ok(copier.copy(source, target, Some(converter))?)
    }

    /// Copy leaving target properties untouched wherever the source is null.
    pub fn copy_non_null<S, T>(&self, source: &S, target: &mut T) -> Result<(), Error>
    where
        S: CopySource,
        T: Bean,
    {
        let copier = self.create::<S, T>(false, true)?;

        Ok(copier.copy(source, target, None)?)
    }

    /// Copy into a freshly defaulted `T`.
    pub fn copy_new<S, T>(&self, source: &S) -> Result<T, Error>
    where
        S: CopySource,
        T: Bean + Default,
    {
        let mut target = T::default();
        self.copy(source, &mut target)?;

        Ok(target)
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Number of generated copiers currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.copier.get().is_some())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let snapshot = self.metrics.snapshot();

        CacheStats {
            hits: snapshot.hits,
            misses: snapshot.misses,
            generations: snapshot.generations,
            failures: snapshot.failures,
            size: self.len(),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Drop every cached copier. Copiers already handed out stay usable.
    pub fn clear(&self) {
        let evicted = {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            let evicted = slots
                .values()
                .filter(|slot| slot.copier.get().is_some())
                .count();
            slots.clear();
            evicted
        };

        self.record(MetricsEvent::Cleared {
            evicted: evicted as u64,
        });
        debug!(evicted, "copier registry cleared");
    }

    fn record(&self, event: MetricsEvent) {
        self.metrics.record(event);
        if let Some(sink) = &self.sink {
            sink.record(event);
        }
    }
}

impl Default for CopierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CopierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopierRegistry")
            .field("config", &self.config)
            .field("len", &self.len())
            .field("stats", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}
