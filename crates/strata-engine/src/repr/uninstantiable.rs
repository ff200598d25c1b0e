//! Uninstantiable representation
//!
//! A representation for types that can never have instances: roles,
//! packages, modules and the like. It still answers every operation of the
//! contract; anything that would need instance storage is refused with an
//! invalid-operation error. Its type objects are always undefined.

use log::{debug, trace};
use strata_sdk::{
    AttrHint, GcMarker, ObjectId, ObjectSpace, ReprError, ReprResult, Representation, StorageSpec,
    TypeRecordId,
};

/// Name the representation is registered under
pub const UNINSTANTIABLE_NAME: &str = "Uninstantiable";

const NO_INSTANCES: &str = "You cannot create an instance of this type";
const NO_ATTRIBUTES: &str = "Uninstantiable representation does not support attribute storage";

/// The Uninstantiable representation
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninstantiable;

/// Process-wide instance of the representation
pub static UNINSTANTIABLE: Uninstantiable = Uninstantiable;

/// Instance storage of an Uninstantiable object
///
/// Type objects carry no data beyond the object header the heap keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UninstantiableBody;

fn no_attributes<T>(action: &str, name: &str) -> ReprResult<T> {
    debug!("[repr] Uninstantiable: rejected {} of attribute '{}'", action, name);
    Err(ReprError::invalid_operation(NO_ATTRIBUTES))
}

fn no_boxing<T>(msg: &'static str) -> ReprResult<T> {
    debug!("[repr] Uninstantiable: {}", msg);
    Err(ReprError::invalid_operation(msg))
}

impl Representation for Uninstantiable {
    fn name(&self) -> &'static str {
        UNINSTANTIABLE_NAME
    }

    fn type_object_for(&'static self, ctx: &mut dyn ObjectSpace, how: Option<ObjectId>) -> ObjectId {
        let record = ctx.create_type_record(self, how);
        let obj = ctx.alloc_object(record, Box::new(UninstantiableBody));
        ctx.set_type_object(record, obj);
        trace!("[repr] Uninstantiable: type object {} for {}", obj, record);
        obj
    }

    fn allocate(&self, _ctx: &mut dyn ObjectSpace, record: TypeRecordId) -> ReprResult<ObjectId> {
        debug!("[repr] Uninstantiable: rejected allocation of {}", record);
        Err(ReprError::invalid_operation(NO_INSTANCES))
    }

    fn initialize(&self, _ctx: &mut dyn ObjectSpace, _record: TypeRecordId, _obj: ObjectId) {}

    fn defined(&self, _ctx: &dyn ObjectSpace, _obj: ObjectId) -> bool {
        false
    }

    fn clone_object(&self, ctx: &mut dyn ObjectSpace, obj: ObjectId) -> ReprResult<ObjectId> {
        let record = ctx.type_record_of(obj).ok_or_else(|| {
            ReprError::invalid_operation(format!("Cannot clone {}: object has been reclaimed", obj))
        })?;
        let copy = ctx.alloc_object(record, Box::new(UninstantiableBody));
        trace!("[repr] Uninstantiable: cloned {} into {}", obj, copy);
        Ok(copy)
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    fn get_attribute(
        &self,
        _ctx: &dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
    ) -> ReprResult<ObjectId> {
        no_attributes("read", name)
    }

    fn get_attribute_int(
        &self,
        _ctx: &dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
    ) -> ReprResult<i64> {
        no_attributes("int read", name)
    }

    fn get_attribute_num(
        &self,
        _ctx: &dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
    ) -> ReprResult<f64> {
        no_attributes("num read", name)
    }

    fn get_attribute_str(
        &self,
        _ctx: &dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
    ) -> ReprResult<String> {
        no_attributes("str read", name)
    }

    fn bind_attribute(
        &self,
        _ctx: &mut dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
        _value: ObjectId,
    ) -> ReprResult<()> {
        no_attributes("bind", name)
    }

    fn bind_attribute_int(
        &self,
        _ctx: &mut dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
        _value: i64,
    ) -> ReprResult<()> {
        no_attributes("int bind", name)
    }

    fn bind_attribute_num(
        &self,
        _ctx: &mut dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
        _value: f64,
    ) -> ReprResult<()> {
        no_attributes("num bind", name)
    }

    fn bind_attribute_str(
        &self,
        _ctx: &mut dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
        _value: &str,
    ) -> ReprResult<()> {
        no_attributes("str bind", name)
    }

    fn hint_for(
        &self,
        _ctx: &dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        _name: &str,
    ) -> Option<AttrHint> {
        None
    }

    fn is_attribute_initialized(
        &self,
        _ctx: &dyn ObjectSpace,
        _obj: ObjectId,
        _class_handle: ObjectId,
        name: &str,
        _hint: Option<AttrHint>,
    ) -> ReprResult<bool> {
        no_attributes("initialization check", name)
    }

    // ------------------------------------------------------------------------
    // Boxing
    // ------------------------------------------------------------------------

    fn set_int(&self, _ctx: &mut dyn ObjectSpace, _obj: ObjectId, _value: i64) -> ReprResult<()> {
        no_boxing("Uninstantiable object cannot box a native int")
    }

    fn get_int(&self, _ctx: &dyn ObjectSpace, _obj: ObjectId) -> ReprResult<i64> {
        no_boxing("Uninstantiable object cannot unbox to a native int")
    }

    fn set_num(&self, _ctx: &mut dyn ObjectSpace, _obj: ObjectId, _value: f64) -> ReprResult<()> {
        no_boxing("Uninstantiable object cannot box a native num")
    }

    fn get_num(&self, _ctx: &dyn ObjectSpace, _obj: ObjectId) -> ReprResult<f64> {
        no_boxing("Uninstantiable object cannot unbox to a native num")
    }

    fn set_str(&self, _ctx: &mut dyn ObjectSpace, _obj: ObjectId, _value: &str) -> ReprResult<()> {
        no_boxing("Uninstantiable object cannot box a native string")
    }

    fn get_str(&self, _ctx: &dyn ObjectSpace, _obj: ObjectId) -> ReprResult<String> {
        no_boxing("Uninstantiable object cannot unbox to a native string")
    }

    fn get_storage_spec(&self, _ctx: &dyn ObjectSpace, _record: TypeRecordId) -> StorageSpec {
        StorageSpec::REFERENCE
    }

    // ------------------------------------------------------------------------
    // Garbage collection
    // ------------------------------------------------------------------------

    fn gc_mark(&self, ctx: &dyn ObjectSpace, obj: ObjectId, marker: &mut dyn GcMarker) {
        if let Some(record) = ctx.type_record_of(obj) {
            marker.mark_type_record(record);
        }
        if let Some(sc) = ctx.context_of(obj) {
            marker.mark_context(sc);
        }
    }

    fn gc_free(&self, ctx: &mut dyn ObjectSpace, obj: ObjectId) {
        drop(ctx.release_body(obj));
    }
}
