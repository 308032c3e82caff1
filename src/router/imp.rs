use super::captures::{Match, Params};
use super::{MountMode, Router, RouterConfig, Spec};

use crate::error::RouterError;
use crate::node::{Arena, NodeFactory};
use crate::pattern::{self, PathInput};

use std::collections::{HashMap, HashSet};

use tracing::warn;

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// A router taking its node ids from `factory`.
    pub fn with_factory(factory: NodeFactory) -> Self {
        Self::with_config(RouterConfig {
            factory,
            ..RouterConfig::default()
        })
    }

    pub fn with_config(config: RouterConfig) -> Self {
        let mut arena = Arena::new(config.factory);
        let root = arena.alloc();
        Self {
            arena,
            root,
            specs: HashMap::new(),
            mounted: HashSet::new(),
            mount_mode: config.mount_mode,
        }
    }

    pub fn mount_mode(&self) -> MountMode {
        self.mount_mode
    }

    /// Mounts the paths of `spec` under `prefix`.
    ///
    /// # Panics
    /// Panics if the spec can not be mounted. See [`Router::try_add_spec`].
    pub fn add_spec<'p>(&mut self, spec: &Spec<T>, prefix: impl Into<PathInput<'p>>) -> &mut Self
    where
        T: Clone,
    {
        let prefix = prefix.into();
        if let Err(e) = self.mount_spec(spec, prefix) {
            panic!("{}: spec = {}, prefix = {:?}", e, spec.id(), prefix);
        }
        self
    }

    /// Mounts the paths of `spec` under `prefix`.
    ///
    /// The spec is compiled once per [`SpecId`](super::SpecId); mounting it
    /// again, under the same or another prefix, links the compiled subtree
    /// into the new position. An empty prefix mounts at the root.
    pub fn try_add_spec<'p>(
        &mut self,
        spec: &Spec<T>,
        prefix: impl Into<PathInput<'p>>,
    ) -> Result<&mut Self, RouterError>
    where
        T: Clone,
    {
        let prefix = prefix.into();
        match self.mount_spec(spec, prefix) {
            Ok(()) => Ok(self),
            Err(e) => {
                warn!(spec = %spec.id(), prefix = ?prefix, error = %e, "failed to mount spec");
                Err(e)
            }
        }
    }

    /// Removing a spec is not supported. Rebuild the router instead.
    ///
    /// # Panics
    /// Always panics.
    pub fn del_spec<'p>(&mut self, spec: &Spec<T>, prefix: impl Into<PathInput<'p>>) -> &mut Self {
        let prefix = prefix.into();
        if let Err(e) = self.try_del_spec(spec, prefix) {
            panic!("{}: spec = {}, prefix = {:?}", e, spec.id(), prefix);
        }
        self
    }

    /// Always fails with [`RouterError::NotImplemented`].
    pub fn try_del_spec<'p>(
        &mut self,
        _spec: &Spec<T>,
        _prefix: impl Into<PathInput<'p>>,
    ) -> Result<&mut Self, RouterError> {
        Err(RouterError::NotImplemented)
    }

    /// Looks up a request path.
    ///
    /// When the path ends with an empty segment, the match carries a listing
    /// of the literal segments next to it.
    pub fn lookup<'a>(&'a self, path: impl Into<PathInput<'a>>) -> Option<Match<'a, T>> {
        let parts = pattern::normalize(path.into()).ok()?;
        let mut params = Params::new();
        let (node, prev) = self.walk(&parts, &mut params)?;
        let value = self.arena[node].value.as_ref()?;
        if parts.last() == Some(&"") {
            if let Some(prev) = prev {
                params.set_listing(self.arena[prev].keys(&self.arena));
            }
        }
        Some(Match { value, params })
    }

    pub fn lookup_mut<'a>(&mut self, path: impl Into<PathInput<'a>>) -> Option<&mut T> {
        let parts = pattern::normalize(path.into()).ok()?;
        let node = {
            let mut params = Params::new();
            self.walk(&parts, &mut params)?.0
        };
        self.arena[node].value.as_mut()
    }

    /// Total number of nodes ever created through this router's factory.
    pub fn node_count(&self) -> usize {
        self.arena.factory().count()
    }

    /// Number of compiled specs.
    pub fn spec_count(&self) -> usize {
        self.specs.len()
    }
}
