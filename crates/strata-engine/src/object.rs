//! Object model: type records, heap objects and serialization contexts

use std::fmt;
use strata_sdk::{ContextId, ObjectId, ReprBody, ReprHandle, TypeRecordId};

/// Metadata shared by every instance of a type
///
/// The representation is fixed at creation. The type object back-link is
/// set once, right after the type object is allocated.
pub struct TypeRecord {
    repr: ReprHandle,
    how: Option<ObjectId>,
    what: Option<ObjectId>,
    context: Option<ContextId>,
}

impl TypeRecord {
    /// Create a type record bound to `repr` and meta-object `how`
    pub fn new(repr: ReprHandle, how: Option<ObjectId>) -> Self {
        Self {
            repr,
            how,
            what: None,
            context: None,
        }
    }

    /// Representation governing instances of this type
    #[inline]
    pub fn repr(&self) -> ReprHandle {
        self.repr
    }

    /// Meta-object that defines the type
    #[inline]
    pub fn how(&self) -> Option<ObjectId> {
        self.how
    }

    /// Type object of this type
    #[inline]
    pub fn what(&self) -> Option<ObjectId> {
        self.what
    }

    /// Owning serialization context
    #[inline]
    pub fn context(&self) -> Option<ContextId> {
        self.context
    }

    pub(crate) fn set_what(&mut self, obj: ObjectId) {
        self.what = Some(obj);
    }

    pub(crate) fn set_context(&mut self, ctx: ContextId) {
        self.context = Some(ctx);
    }
}

impl fmt::Debug for TypeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRecord")
            .field("repr", &self.repr.name())
            .field("how", &self.how)
            .field("what", &self.what)
            .field("context", &self.context)
            .finish()
    }
}

/// A heap object: header owned by the object model plus strategy storage
pub struct HeapObject {
    record: TypeRecordId,
    context: Option<ContextId>,
    body: Option<ReprBody>,
}

impl HeapObject {
    /// Create an object of type `record` holding `body`
    pub fn new(record: TypeRecordId, body: ReprBody) -> Self {
        Self {
            record,
            context: None,
            body: Some(body),
        }
    }

    /// Type record of this object
    #[inline]
    pub fn record(&self) -> TypeRecordId {
        self.record
    }

    /// Owning serialization context
    #[inline]
    pub fn context(&self) -> Option<ContextId> {
        self.context
    }

    /// Whether the strategy storage is still attached
    #[inline]
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub(crate) fn set_context(&mut self, ctx: ContextId) {
        self.context = Some(ctx);
    }

    pub(crate) fn body(&self) -> Option<&ReprBody> {
        self.body.as_ref()
    }

    pub(crate) fn body_mut(&mut self) -> Option<&mut ReprBody> {
        self.body.as_mut()
    }

    pub(crate) fn take_body(&mut self) -> Option<ReprBody> {
        self.body.take()
    }
}

impl fmt::Debug for HeapObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapObject")
            .field("record", &self.record)
            .field("context", &self.context)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Serialization context: the compilation unit that owns a set of objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationContext {
    handle: String,
}

impl SerializationContext {
    /// Create a context identified by `handle`
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
        }
    }

    /// Unique handle of the context
    pub fn handle(&self) -> &str {
        &self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::UNINSTANTIABLE;

    #[test]
    fn test_type_record_creation() {
        let how = ObjectId::from_index(4);
        let record = TypeRecord::new(&UNINSTANTIABLE, Some(how));
        assert_eq!(record.repr().name(), "Uninstantiable");
        assert_eq!(record.how(), Some(how));
        assert_eq!(record.what(), None);
        assert_eq!(record.context(), None);
    }

    #[test]
    fn test_heap_object_body() {
        let mut obj = HeapObject::new(TypeRecordId::from_index(0), Box::new(1u8));
        assert!(obj.has_body());
        assert!(obj.take_body().is_some());
        assert!(!obj.has_body());
        assert!(obj.take_body().is_none());
    }

    #[test]
    fn test_context_handle() {
        let sc = SerializationContext::new("CORE.setting");
        assert_eq!(sc.handle(), "CORE.setting");
    }
}
