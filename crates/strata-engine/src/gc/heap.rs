//! Heap of GC-managed objects
//!
//! Objects, type records and serialization contexts each live in their own
//! slot arena. Reclaimed slots are reused by later allocations. The heap is
//! the engine's `ObjectSpace`: representations allocate and inspect objects
//! only through it.

use crate::error::{EngineError, EngineResult};
use crate::object::{HeapObject, SerializationContext, TypeRecord};
use crate::options::HeapOptions;
use std::any::Any;
use strata_sdk::{ContextId, ObjectId, ObjectSpace, ReprBody, ReprHandle, TypeRecordId};

/// Slot arena with free-slot reuse
struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Arena<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    fn insert(&mut self, value: T) -> u32 {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(value);
            index
        } else {
            self.slots.push(Some(value));
            (self.slots.len() - 1) as u32
        }
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        let value = self.slots.get_mut(index)?.take()?;
        self.live -= 1;
        self.free.push(index as u32);
        Some(value)
    }

    fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| index as u32)
    }

    fn len(&self) -> usize {
        self.live
    }
}

/// Heap statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapStats {
    /// Live objects (type objects and instances)
    pub objects: usize,
    /// Objects whose strategy storage is still attached
    pub bodies: usize,
    /// Live type records
    pub type_records: usize,
    /// Live serialization contexts
    pub contexts: usize,
}

/// Object heap
pub struct Heap {
    objects: Arena<HeapObject>,
    type_records: Arena<TypeRecord>,
    contexts: Arena<SerializationContext>,
}

impl Heap {
    /// Create an empty heap with default options
    pub fn new() -> Self {
        Self::with_options(HeapOptions::default())
    }

    /// Create an empty heap with the given options
    pub fn with_options(options: HeapOptions) -> Self {
        Self {
            objects: Arena::with_capacity(options.initial_capacity),
            type_records: Arena::with_capacity(0),
            contexts: Arena::with_capacity(0),
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Get an object by handle
    pub fn object(&self, obj: ObjectId) -> Option<&HeapObject> {
        self.objects.get(obj.index())
    }

    /// Get a type record by handle
    pub fn type_record(&self, record: TypeRecordId) -> Option<&TypeRecord> {
        self.type_records.get(record.index())
    }

    /// Get a serialization context by handle
    pub fn context(&self, ctx: ContextId) -> Option<&SerializationContext> {
        self.contexts.get(ctx.index())
    }

    /// Check if an object handle is live
    pub fn contains_object(&self, obj: ObjectId) -> bool {
        self.object(obj).is_some()
    }

    /// Check if a type record handle is live
    pub fn contains_type_record(&self, record: TypeRecordId) -> bool {
        self.type_record(record).is_some()
    }

    /// Check if a context handle is live
    pub fn contains_context(&self, ctx: ContextId) -> bool {
        self.context(ctx).is_some()
    }

    /// Representation governing an object, resolved through its type record
    pub fn repr_of(&self, obj: ObjectId) -> EngineResult<ReprHandle> {
        let object = self
            .object(obj)
            .ok_or_else(|| EngineError::StaleHandle(obj.to_string()))?;
        let record = self
            .type_record(object.record())
            .ok_or_else(|| EngineError::StaleHandle(object.record().to_string()))?;
        Ok(record.repr())
    }

    /// Representation bound to a type record
    pub fn repr_of_type(&self, record: TypeRecordId) -> EngineResult<ReprHandle> {
        self.type_record(record)
            .map(TypeRecord::repr)
            .ok_or_else(|| EngineError::StaleHandle(record.to_string()))
    }

    // ========================================================================
    // Serialization contexts
    // ========================================================================

    /// Create a serialization context
    pub fn create_context(&mut self, handle: impl Into<String>) -> ContextId {
        ContextId::from_index(self.contexts.insert(SerializationContext::new(handle)))
    }

    /// Attach an object to its owning serialization context
    pub fn set_context(&mut self, obj: ObjectId, ctx: ContextId) -> EngineResult<()> {
        if !self.contains_context(ctx) {
            return Err(EngineError::StaleHandle(ctx.to_string()));
        }
        let object = self
            .objects
            .get_mut(obj.index())
            .ok_or_else(|| EngineError::StaleHandle(obj.to_string()))?;
        object.set_context(ctx);
        Ok(())
    }

    /// Attach a type record to its owning serialization context
    pub fn set_type_context(&mut self, record: TypeRecordId, ctx: ContextId) -> EngineResult<()> {
        if !self.contains_context(ctx) {
            return Err(EngineError::StaleHandle(ctx.to_string()));
        }
        let entry = self
            .type_records
            .get_mut(record.index())
            .ok_or_else(|| EngineError::StaleHandle(record.to_string()))?;
        entry.set_context(ctx);
        Ok(())
    }

    // ========================================================================
    // Collector support
    // ========================================================================

    /// Handles of all live objects
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.indices().map(ObjectId::from_index).collect()
    }

    /// Handles of all live type records
    pub fn type_record_ids(&self) -> Vec<TypeRecordId> {
        self.type_records
            .indices()
            .map(TypeRecordId::from_index)
            .collect()
    }

    /// Handles of all live contexts
    pub fn context_ids(&self) -> Vec<ContextId> {
        self.contexts.indices().map(ContextId::from_index).collect()
    }

    /// Reclaim an object slot
    pub(crate) fn reclaim_object(&mut self, obj: ObjectId) -> Option<HeapObject> {
        self.objects.remove(obj.index())
    }

    /// Drop a type record
    pub(crate) fn reclaim_type_record(&mut self, record: TypeRecordId) -> Option<TypeRecord> {
        self.type_records.remove(record.index())
    }

    /// Drop a serialization context
    pub(crate) fn reclaim_context(&mut self, ctx: ContextId) -> Option<SerializationContext> {
        self.contexts.remove(ctx.index())
    }

    /// Get heap statistics
    pub fn stats(&self) -> HeapStats {
        HeapStats {
            objects: self.objects.len(),
            bodies: self
                .objects
                .slots
                .iter()
                .flatten()
                .filter(|object| object.has_body())
                .count(),
            type_records: self.type_records.len(),
            contexts: self.contexts.len(),
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectSpace for Heap {
    fn create_type_record(&mut self, repr: ReprHandle, how: Option<ObjectId>) -> TypeRecordId {
        TypeRecordId::from_index(self.type_records.insert(TypeRecord::new(repr, how)))
    }

    fn set_type_object(&mut self, record: TypeRecordId, obj: ObjectId) {
        match self.type_records.get_mut(record.index()) {
            Some(entry) => entry.set_what(obj),
            None => log::warn!("[heap] set_type_object on stale {}", record),
        }
    }

    fn type_object_of(&self, record: TypeRecordId) -> Option<ObjectId> {
        self.type_record(record).and_then(TypeRecord::what)
    }

    fn alloc_object(&mut self, record: TypeRecordId, body: ReprBody) -> ObjectId {
        ObjectId::from_index(self.objects.insert(HeapObject::new(record, body)))
    }

    fn type_record_of(&self, obj: ObjectId) -> Option<TypeRecordId> {
        self.object(obj).map(HeapObject::record)
    }

    fn context_of(&self, obj: ObjectId) -> Option<ContextId> {
        self.object(obj).and_then(HeapObject::context)
    }

    fn body(&self, obj: ObjectId) -> Option<&(dyn Any + Send)> {
        self.object(obj)?.body().map(|body| &**body)
    }

    fn body_mut(&mut self, obj: ObjectId) -> Option<&mut (dyn Any + Send)> {
        self.objects
            .get_mut(obj.index())?
            .body_mut()
            .map(|body| &mut **body)
    }

    fn release_body(&mut self, obj: ObjectId) -> Option<ReprBody> {
        self.objects.get_mut(obj.index())?.take_body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::UNINSTANTIABLE;

    #[test]
    fn test_heap_creation() {
        let heap = Heap::default();
        assert_eq!(heap.stats(), HeapStats::default());
    }

    #[test]
    fn test_alloc_and_lookup() {
        let mut heap = Heap::new();
        let record = heap.create_type_record(&UNINSTANTIABLE, None);
        let obj = heap.alloc_object(record, Box::new(17u32));

        assert_eq!(heap.type_record_of(obj), Some(record));
        assert_eq!(heap.context_of(obj), None);
        assert_eq!(heap.body(obj).and_then(|b| b.downcast_ref::<u32>()), Some(&17));
        assert_eq!(heap.repr_of(obj).unwrap().name(), "Uninstantiable");

        let stats = heap.stats();
        assert_eq!(stats.objects, 1);
        assert_eq!(stats.bodies, 1);
        assert_eq!(stats.type_records, 1);
    }

    #[test]
    fn test_body_mut() {
        let mut heap = Heap::new();
        let record = heap.create_type_record(&UNINSTANTIABLE, None);
        let obj = heap.alloc_object(record, Box::new(1i64));

        if let Some(value) = heap.body_mut(obj).and_then(|b| b.downcast_mut::<i64>()) {
            *value = 99;
        }
        assert_eq!(heap.body(obj).and_then(|b| b.downcast_ref::<i64>()), Some(&99));
    }

    #[test]
    fn test_release_body_keeps_header() {
        let mut heap = Heap::new();
        let record = heap.create_type_record(&UNINSTANTIABLE, None);
        let obj = heap.alloc_object(record, Box::new(()));

        assert!(heap.release_body(obj).is_some());
        assert!(heap.release_body(obj).is_none());
        assert!(heap.contains_object(obj));
        assert!(heap.contains_type_record(record));
        assert_eq!(heap.stats().bodies, 0);
    }

    #[test]
    fn test_slot_reuse() {
        let mut heap = Heap::new();
        let record = heap.create_type_record(&UNINSTANTIABLE, None);
        let a = heap.alloc_object(record, Box::new(()));
        let _b = heap.alloc_object(record, Box::new(()));

        assert!(heap.reclaim_object(a).is_some());
        assert!(heap.reclaim_object(a).is_none());
        let c = heap.alloc_object(record, Box::new(()));
        assert_eq!(c, a);
        assert_eq!(heap.stats().objects, 2);
    }

    #[test]
    fn test_set_context() {
        let mut heap = Heap::new();
        let record = heap.create_type_record(&UNINSTANTIABLE, None);
        let obj = heap.alloc_object(record, Box::new(()));
        let sc = heap.create_context("unit-1");

        heap.set_context(obj, sc).unwrap();
        heap.set_type_context(record, sc).unwrap();
        assert_eq!(heap.context_of(obj), Some(sc));
        assert_eq!(heap.type_record(record).unwrap().context(), Some(sc));
        assert_eq!(heap.context(sc).unwrap().handle(), "unit-1");
    }

    #[test]
    fn test_stale_handles() {
        let mut heap = Heap::new();
        let missing = ObjectId::from_index(12);
        let sc = heap.create_context("unit");

        assert!(matches!(heap.repr_of(missing), Err(EngineError::StaleHandle(_))));
        assert!(matches!(heap.set_context(missing, sc), Err(EngineError::StaleHandle(_))));
        assert!(matches!(
            heap.repr_of_type(TypeRecordId::from_index(3)),
            Err(EngineError::StaleHandle(_))
        ));
    }
}
