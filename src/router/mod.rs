mod captures;
mod core;
mod imp;
mod spec;

pub use self::captures::{Match, Params};
pub use self::spec::{Spec, SpecId};

use crate::node::{Arena, NodeFactory, NodeRef};

use std::collections::{HashMap, HashSet};

/// How a compiled spec subtree is attached under a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountMode {
    /// Every mount point links the same nodes. Extending the subtree below
    /// one mount point is visible under all of them.
    Shared,
    /// Every mount point gets a private copy of the compiled subtree.
    Copied,
}

impl Default for MountMode {
    fn default() -> Self {
        Self::Shared
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    pub factory: NodeFactory,
    pub mount_mode: MountMode,
}

/// A lookup graph built from mounted specs.
///
/// Mounting takes `&mut self` and lookups take `&self`, so all mounting has
/// to finish (or be externally serialized) before the router is shared
/// between lookup threads.
#[derive(Debug)]
pub struct Router<T> {
    arena: Arena<T>,
    root: NodeRef,
    specs: HashMap<SpecId, NodeRef>,
    mounted: HashSet<(SpecId, NodeRef)>,
    mount_mode: MountMode,
}
