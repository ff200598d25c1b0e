//! Representation registry
//!
//! Built-in representations are registered once, the first time the
//! process-wide registry is touched. After that the registry is immutable,
//! so lookups from any thread need no lock.

mod uninstantiable;

pub use uninstantiable::{Uninstantiable, UninstantiableBody, UNINSTANTIABLE, UNINSTANTIABLE_NAME};

use crate::error::{EngineError, EngineResult};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;
use strata_sdk::ReprHandle;

/// Representations every runtime starts with
static BUILTIN_REPRS: &[ReprHandle] = &[&UNINSTANTIABLE];

static REGISTRY: Lazy<ReprRegistry> = Lazy::new(|| {
    let registry = ReprRegistry::with_builtins();
    log::info!("[registry] {} representations registered", registry.len());
    registry
});

/// The process-wide representation registry
pub fn registry() -> &'static ReprRegistry {
    &REGISTRY
}

/// Index of a representation in its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReprId(u32);

impl ReprId {
    /// Registry index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Registry of representations, indexed by id and by name
#[derive(Default)]
pub struct ReprRegistry {
    reprs: Vec<ReprHandle>,
    by_name: FxHashMap<&'static str, ReprId>,
}

impl ReprRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in representations
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for &repr in BUILTIN_REPRS {
            if let Err(err) = registry.register(repr) {
                log::error!("[registry] {}", err);
            }
        }
        registry
    }

    /// Register a representation under its own name
    pub fn register(&mut self, repr: ReprHandle) -> EngineResult<ReprId> {
        let name = repr.name();
        if self.by_name.contains_key(name) {
            return Err(EngineError::DuplicateRepr(name.to_string()));
        }
        let id = ReprId(self.reprs.len() as u32);
        self.reprs.push(repr);
        self.by_name.insert(name, id);
        log::debug!("[registry] registered {} as {}", name, id.0);
        Ok(id)
    }

    /// Look up a representation by name
    pub fn get(&self, name: &str) -> Option<ReprHandle> {
        self.id_of(name).and_then(|id| self.by_id(id))
    }

    /// Look up a representation by name, failing if it is not registered
    pub fn lookup(&self, name: &str) -> EngineResult<ReprHandle> {
        self.get(name)
            .ok_or_else(|| EngineError::UnknownRepr(name.to_string()))
    }

    /// Look up a representation by id
    pub fn by_id(&self, id: ReprId) -> Option<ReprHandle> {
        self.reprs.get(id.index()).copied()
    }

    /// Id of a registered name
    pub fn id_of(&self, name: &str) -> Option<ReprId> {
        self.by_name.get(name).copied()
    }

    /// Iterate over registered representations in registration order
    pub fn iter(&self) -> impl Iterator<Item = (ReprId, ReprHandle)> + '_ {
        self.reprs
            .iter()
            .enumerate()
            .map(|(index, &repr)| (ReprId(index as u32), repr))
    }

    /// Number of registered representations
    pub fn len(&self) -> usize {
        self.reprs.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.reprs.is_empty()
    }
}

impl fmt::Debug for ReprRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.reprs.iter().map(|repr| repr.name()))
            .finish()
    }
}
