//! Mark-sweep garbage collector
//!
//! Tracing is delegated to representations: the collector only keeps the
//! mark sets and worklists, and calls back into each object's strategy.

use super::heap::Heap;
use super::roots::RootSet;
use crate::options::HeapOptions;
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};
use strata_sdk::{ContextId, GcMarker, ObjectId, TypeRecordId};

/// Garbage collector statistics
#[derive(Debug, Clone, Default)]
pub struct GcStats {
    /// Total number of collections
    pub collections: usize,

    /// Total objects freed
    pub objects_freed: usize,

    /// Total type records freed
    pub type_records_freed: usize,

    /// Total serialization contexts freed
    pub contexts_freed: usize,

    /// Objects marked in last collection
    pub last_marked_count: usize,

    /// Objects freed in last collection
    pub last_freed_count: usize,

    /// Last collection duration
    pub last_pause_time: Duration,

    /// Total pause time across all collections
    pub total_pause_time: Duration,
}

/// Mark state shared with representations through `GcMarker`
#[derive(Default)]
struct MarkState {
    objects: FxHashSet<ObjectId>,
    type_records: FxHashSet<TypeRecordId>,
    contexts: FxHashSet<ContextId>,
    object_worklist: Vec<ObjectId>,
    record_worklist: Vec<TypeRecordId>,
}

impl GcMarker for MarkState {
    fn mark_object(&mut self, obj: ObjectId) {
        if self.objects.insert(obj) {
            self.object_worklist.push(obj);
        }
    }

    fn mark_type_record(&mut self, record: TypeRecordId) {
        if self.type_records.insert(record) {
            self.record_worklist.push(record);
        }
    }

    fn mark_context(&mut self, ctx: ContextId) {
        self.contexts.insert(ctx);
    }
}

/// Mark-sweep garbage collector
pub struct GarbageCollector {
    /// Live object count that triggers a collection
    threshold: usize,

    /// Statistics
    stats: GcStats,
}

impl GarbageCollector {
    /// Create a collector with the given threshold
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            stats: GcStats::default(),
        }
    }

    /// Create a collector from heap options
    pub fn with_options(options: &HeapOptions) -> Self {
        Self::new(options.gc_threshold)
    }

    /// Set GC threshold
    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold;
    }

    /// Get GC threshold
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Check whether the heap has grown past the threshold
    pub fn should_collect(&self, heap: &Heap) -> bool {
        heap.stats().objects >= self.threshold
    }

    /// Run a full collection, returning the number of objects freed
    pub fn collect(&mut self, heap: &mut Heap, roots: &RootSet) -> usize {
        let start = Instant::now();

        let state = self.mark(heap, roots);
        let marked = state.objects.len();
        let (objects, records, contexts) = self.sweep(heap, &state);

        let pause = start.elapsed();
        self.stats.collections += 1;
        self.stats.objects_freed += objects;
        self.stats.type_records_freed += records;
        self.stats.contexts_freed += contexts;
        self.stats.last_marked_count = marked;
        self.stats.last_freed_count = objects;
        self.stats.last_pause_time = pause;
        self.stats.total_pause_time += pause;

        log::debug!(
            "[gc] collection #{}: marked {}, freed {} objects, {} type records, {} contexts in {:?}",
            self.stats.collections,
            marked,
            objects,
            records,
            contexts,
            pause
        );

        objects
    }

    /// Mark phase: trace from roots through representation callbacks
    fn mark(&self, heap: &Heap, roots: &RootSet) -> MarkState {
        let mut state = MarkState::default();
        for root in roots.iter() {
            state.mark_object(root);
        }

        loop {
            if let Some(obj) = state.object_worklist.pop() {
                match heap.repr_of(obj) {
                    Ok(repr) => repr.gc_mark(heap, obj, &mut state),
                    Err(err) => log::warn!("[gc] skipping {} during mark: {}", obj, err),
                }
                continue;
            }

            if let Some(record) = state.record_worklist.pop() {
                if let Some(entry) = heap.type_record(record) {
                    if let Some(how) = entry.how() {
                        state.mark_object(how);
                    }
                    if let Some(what) = entry.what() {
                        state.mark_object(what);
                    }
                    if let Some(ctx) = entry.context() {
                        state.mark_context(ctx);
                    }
                    entry.repr().gc_mark_repr(heap, record, &mut state);
                }
                continue;
            }

            break;
        }

        state
    }

    /// Sweep phase: free unmarked objects, then unmarked type records and contexts
    fn sweep(&self, heap: &mut Heap, state: &MarkState) -> (usize, usize, usize) {
        let dead_objects: Vec<ObjectId> = heap
            .object_ids()
            .into_iter()
            .filter(|obj| !state.objects.contains(obj))
            .collect();

        // Objects go first so their type records are still resolvable.
        for &obj in &dead_objects {
            match heap.repr_of(obj) {
                Ok(repr) => repr.gc_free(heap, obj),
                Err(err) => log::warn!("[gc] freeing {} without its representation: {}", obj, err),
            }
            if let Some(object) = heap.reclaim_object(obj) {
                if object.has_body() {
                    log::warn!("[gc] {} reclaimed with strategy storage still attached", obj);
                }
            }
        }

        let dead_records: Vec<TypeRecordId> = heap
            .type_record_ids()
            .into_iter()
            .filter(|record| !state.type_records.contains(record))
            .collect();

        for &record in &dead_records {
            if let Ok(repr) = heap.repr_of_type(record) {
                repr.gc_free_repr(heap, record);
            }
            heap.reclaim_type_record(record);
        }

        let dead_contexts: Vec<ContextId> = heap
            .context_ids()
            .into_iter()
            .filter(|ctx| !state.contexts.contains(ctx))
            .collect();

        for &ctx in &dead_contexts {
            heap.reclaim_context(ctx);
        }

        (dead_objects.len(), dead_records.len(), dead_contexts.len())
    }

    /// Get GC statistics
    pub fn stats(&self) -> &GcStats {
        &self.stats
    }
}

impl Default for GarbageCollector {
    fn default() -> Self {
        Self::with_options(&HeapOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_GC_THRESHOLD;
    use crate::repr::UNINSTANTIABLE;
    use strata_sdk::{ObjectSpace, Representation};

    #[test]
    fn test_collector_defaults() {
        let gc = GarbageCollector::default();
        assert_eq!(gc.threshold(), DEFAULT_GC_THRESHOLD);
        assert_eq!(gc.stats().collections, 0);
    }

    #[test]
    fn test_should_collect() {
        let mut heap = Heap::new();
        let mut gc = GarbageCollector::new(2);
        UNINSTANTIABLE.type_object_for(&mut heap, None);
        assert!(!gc.should_collect(&heap));

        UNINSTANTIABLE.type_object_for(&mut heap, None);
        assert!(gc.should_collect(&heap));

        gc.set_threshold(10);
        assert!(!gc.should_collect(&heap));
    }

    #[test]
    fn test_mark_state_dedups() {
        let mut state = MarkState::default();
        state.mark_object(ObjectId::from_index(1));
        state.mark_object(ObjectId::from_index(1));
        state.mark_type_record(TypeRecordId::from_index(0));
        state.mark_type_record(TypeRecordId::from_index(0));

        assert_eq!(state.object_worklist.len(), 1);
        assert_eq!(state.record_worklist.len(), 1);
    }

    #[test]
    fn test_collect_empty_roots_frees_everything() {
        let mut heap = Heap::new();
        let mut gc = GarbageCollector::default();
        let what = UNINSTANTIABLE.type_object_for(&mut heap, None);
        let record = heap.type_record_of(what).unwrap();

        let freed = gc.collect(&mut heap, &RootSet::new());
        assert_eq!(freed, 1);
        assert!(!heap.contains_object(what));
        assert!(!heap.contains_type_record(record));
        assert_eq!(gc.stats().collections, 1);
        assert_eq!(gc.stats().type_records_freed, 1);
    }
}
