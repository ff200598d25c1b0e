//! Representation trait: the per-type operation table
//!
//! Every type is bound to exactly one `Representation`, which answers every
//! primitive operation the runtime needs on instances of that type. The
//! contract is total: a strategy that cannot support an operation must
//! refuse it with a `ReprError` or treat it as a deliberate no-op, never
//! leave it out.
//!
//! Strategies never own the object model. They reach it through
//! `ObjectSpace`, which the engine implements, and report reachability
//! through `GcMarker`, which the collector implements.

use crate::error::ReprResult;
use crate::handle::{ContextId, ObjectId, TypeRecordId};
use crate::storage::{AttrHint, StorageSpec};
use std::any::Any;

/// Strategy-private instance storage
///
/// Allocated zeroed by the strategy, owned by the heap, released only
/// through the strategy's `gc_free`.
pub type ReprBody = Box<dyn Any + Send>;

/// Shared reference to a registered representation
pub type ReprHandle = &'static dyn Representation;

/// Host object model operations available to a representation.
///
/// The engine's heap is the concrete implementation. A strategy only ever
/// touches objects, type records and contexts through this trait.
pub trait ObjectSpace {
    // ========================================================================
    // Type records
    // ========================================================================

    /// Create a type record bound to `repr` and the meta-object `how`
    fn create_type_record(&mut self, repr: ReprHandle, how: Option<ObjectId>) -> TypeRecordId;

    /// Link a type record to its type object
    fn set_type_object(&mut self, record: TypeRecordId, obj: ObjectId);

    /// Type object of a type record
    fn type_object_of(&self, record: TypeRecordId) -> Option<ObjectId>;

    // ========================================================================
    // Objects
    // ========================================================================

    /// Allocate an object of type `record` holding the given storage
    fn alloc_object(&mut self, record: TypeRecordId, body: ReprBody) -> ObjectId;

    /// Type record an object belongs to
    fn type_record_of(&self, obj: ObjectId) -> Option<TypeRecordId>;

    /// Serialization context that owns an object
    fn context_of(&self, obj: ObjectId) -> Option<ContextId>;

    /// Borrow an object's strategy storage
    fn body(&self, obj: ObjectId) -> Option<&(dyn Any + Send)>;

    /// Mutably borrow an object's strategy storage
    fn body_mut(&mut self, obj: ObjectId) -> Option<&mut (dyn Any + Send)>;

    /// Detach an object's strategy storage, leaving the object header intact
    fn release_body(&mut self, obj: ObjectId) -> Option<ReprBody>;
}

/// Mark callback issued by a representation during collection
pub trait GcMarker {
    /// Report an object as reachable
    fn mark_object(&mut self, obj: ObjectId);

    /// Report a type record as reachable
    fn mark_type_record(&mut self, record: TypeRecordId);

    /// Report a serialization context as reachable
    fn mark_context(&mut self, ctx: ContextId);
}

/// A representation strategy
///
/// Implementations are stateless and registered once for the whole process;
/// they must be shareable across threads.
pub trait Representation: Send + Sync + 'static {
    /// Registered name of this representation
    fn name(&self) -> &'static str;

    // ========================================================================
    // Type objects and instances
    // ========================================================================

    /// Create a new type object of this representation, associated with `how`
    fn type_object_for(&'static self, ctx: &mut dyn ObjectSpace, how: Option<ObjectId>) -> ObjectId;

    /// Allocate a new, uninitialized instance of `record`
    fn allocate(&self, ctx: &mut dyn ObjectSpace, record: TypeRecordId) -> ReprResult<ObjectId>;

    /// Initialize freshly allocated instance storage
    fn initialize(&self, ctx: &mut dyn ObjectSpace, record: TypeRecordId, obj: ObjectId);

    /// Whether the object holds a value, from this representation's view
    fn defined(&self, ctx: &dyn ObjectSpace, obj: ObjectId) -> bool;

    /// Produce an independent copy of `obj` sharing its type record
    fn clone_object(&self, ctx: &mut dyn ObjectSpace, obj: ObjectId) -> ReprResult<ObjectId>;

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Read an object-valued attribute
    fn get_attribute(
        &self,
        ctx: &dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
    ) -> ReprResult<ObjectId>;

    /// Read a native int attribute
    fn get_attribute_int(
        &self,
        ctx: &dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
    ) -> ReprResult<i64>;

    /// Read a native num attribute
    fn get_attribute_num(
        &self,
        ctx: &dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
    ) -> ReprResult<f64>;

    /// Read a native string attribute
    fn get_attribute_str(
        &self,
        ctx: &dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
    ) -> ReprResult<String>;

    /// Bind an object-valued attribute
    fn bind_attribute(
        &self,
        ctx: &mut dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
        value: ObjectId,
    ) -> ReprResult<()>;

    /// Bind a native int attribute
    fn bind_attribute_int(
        &self,
        ctx: &mut dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
        value: i64,
    ) -> ReprResult<()>;

    /// Bind a native num attribute
    fn bind_attribute_num(
        &self,
        ctx: &mut dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
        value: f64,
    ) -> ReprResult<()>;

    /// Bind a native string attribute
    fn bind_attribute_str(
        &self,
        ctx: &mut dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
        value: &str,
    ) -> ReprResult<()>;

    /// Resolve an attribute name to a fast-path hint, if one exists
    fn hint_for(
        &self,
        ctx: &dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
    ) -> Option<AttrHint>;

    /// Whether a named attribute has ever been bound
    fn is_attribute_initialized(
        &self,
        ctx: &dyn ObjectSpace,
        obj: ObjectId,
        class_handle: ObjectId,
        name: &str,
        hint: Option<AttrHint>,
    ) -> ReprResult<bool>;

    // ========================================================================
    // Boxing
    // ========================================================================

    /// Box a native int into the object
    fn set_int(&self, ctx: &mut dyn ObjectSpace, obj: ObjectId, value: i64) -> ReprResult<()>;

    /// Unbox a native int from the object
    fn get_int(&self, ctx: &dyn ObjectSpace, obj: ObjectId) -> ReprResult<i64>;

    /// Box a native num into the object
    fn set_num(&self, ctx: &mut dyn ObjectSpace, obj: ObjectId, value: f64) -> ReprResult<()>;

    /// Unbox a native num from the object
    fn get_num(&self, ctx: &dyn ObjectSpace, obj: ObjectId) -> ReprResult<f64>;

    /// Box a native string into the object
    fn set_str(&self, ctx: &mut dyn ObjectSpace, obj: ObjectId, value: &str) -> ReprResult<()>;

    /// Unbox a native string from the object
    fn get_str(&self, ctx: &dyn ObjectSpace, obj: ObjectId) -> ReprResult<String>;

    /// Boxing and inlining capability of values of `record`
    fn get_storage_spec(&self, ctx: &dyn ObjectSpace, record: TypeRecordId) -> StorageSpec;

    // ========================================================================
    // Garbage collection
    // ========================================================================

    /// Report every reference reachable from `obj`
    fn gc_mark(&self, ctx: &dyn ObjectSpace, obj: ObjectId, marker: &mut dyn GcMarker);

    /// Release the strategy-owned storage of a dead object
    ///
    /// Never frees the type record; that belongs to the object model.
    fn gc_free(&self, ctx: &mut dyn ObjectSpace, obj: ObjectId);

    /// Report references held by per-type strategy data
    fn gc_mark_repr(&self, _ctx: &dyn ObjectSpace, _record: TypeRecordId, _marker: &mut dyn GcMarker) {}

    /// Release per-type strategy data of a dead type record
    fn gc_free_repr(&self, _ctx: &mut dyn ObjectSpace, _record: TypeRecordId) {}
}
