use super::Node;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Diagnostic identifier of a trie node. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Hands out node ids from a shared counter.
///
/// Clones share the counter, so routers built from clones of one factory
/// report a combined lifetime total from [`NodeFactory::count`].
#[derive(Debug, Clone, Default)]
pub struct NodeFactory {
    next: Arc<AtomicUsize>,
}

impl NodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes created so far.
    pub fn count(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }

    pub(crate) fn create<T>(&self) -> Node<T> {
        let id = NodeId(self.next.fetch_add(1, Ordering::Relaxed));
        Node::new(id)
    }
}
