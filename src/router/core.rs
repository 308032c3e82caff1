use super::captures::Params;
use super::{MountMode, Router, Spec};

use crate::error::RouterError;
use crate::node::{Links, NodeRef};
use crate::pattern::{self, PathInput, Segment};

use tracing::{debug, trace};

impl<T> Router<T> {
    /// Creates a chain of fresh nodes for `segments`, returning its head and tail.
    fn build_tree(
        &mut self,
        segments: &[Segment],
        value: Option<T>,
    ) -> Result<(NodeRef, NodeRef), RouterError> {
        let tail = self.arena.alloc();
        self.arena[tail].value = value;
        let mut head = tail;
        for segment in segments.iter().rev() {
            let node = self.arena.alloc();
            self.arena[node].set(segment, head)?;
            head = node;
        }
        Ok((head, tail))
    }

    /// Walks `path` from `start`, creating the missing part of it.
    ///
    /// Returns the node the path ends on. A `None` value leaves an existing
    /// value untouched.
    fn extend(
        &mut self,
        start: NodeRef,
        path: &[Segment],
        value: Option<T>,
    ) -> Result<NodeRef, RouterError> {
        let mut node = start;
        for (i, segment) in path.iter().enumerate() {
            match self.arena[node].find(segment) {
                Some(next) => {
                    self.arena[node].claim(segment)?;
                    node = next;
                }
                None => {
                    self.arena[node].check(segment)?;
                    let (head, tail) = self.build_tree(&path[i + 1..], value)?;
                    self.arena[node].link(segment, head);
                    return Ok(tail);
                }
            }
        }
        if value.is_some() {
            self.arena[node].value = value;
        }
        Ok(node)
    }

    /// Validates `path` from `start` without changing the trie.
    ///
    /// Returns the node the path ends on if it already exists.
    fn check_path(
        &self,
        start: NodeRef,
        path: &[Segment],
    ) -> Result<Option<NodeRef>, RouterError> {
        let mut node = start;
        for segment in path {
            match self.arena[node].find(segment) {
                Some(next) => {
                    self.arena[node].check_claim(segment)?;
                    node = next;
                }
                None => {
                    self.arena[node].check(segment)?;
                    return Ok(None);
                }
            }
        }
        Ok(Some(node))
    }

    fn compile(&mut self, paths: &[(String, T)]) -> Result<NodeRef, RouterError>
    where
        T: Clone,
    {
        let root = self.arena.alloc();
        for (path, value) in paths {
            let segments = pattern::parse(path.as_str())?;
            self.extend(root, &segments, Some(value.clone()))?;
        }
        Ok(root)
    }

    fn copy_subtree(&mut self, src: NodeRef) -> NodeRef
    where
        T: Clone,
    {
        let value = self.arena[src].value.clone();
        let links = self.arena[src].links();
        let links = self.copy_links(links);
        let node = self.arena.alloc();
        self.arena[node].value = value;
        self.arena[node].splice(links);
        node
    }

    fn copy_links(&mut self, links: Links) -> Links
    where
        T: Clone,
    {
        let children = links
            .children
            .into_iter()
            .map(|(key, mut edge)| {
                edge.node = self.copy_subtree(edge.node);
                (key, edge)
            })
            .collect();
        let wildcard = links.wildcard.map(|w| self.copy_subtree(w));
        Links {
            children,
            wildcard,
            name: links.name,
        }
    }

    pub(super) fn mount_spec(
        &mut self,
        spec: &Spec<T>,
        prefix: PathInput<'_>,
    ) -> Result<(), RouterError>
    where
        T: Clone,
    {
        let id = spec.id();
        let paths = spec.paths().ok_or(RouterError::MissingSpec(id))?;

        let prefix = if prefix.is_empty() {
            Vec::new()
        } else {
            pattern::parse(prefix)?
        };

        let spec_root = match self.specs.get(&id) {
            Some(&root) => {
                trace!(spec = %id, "reusing compiled spec");
                root
            }
            None => {
                let root = self.compile(paths)?;
                self.specs.insert(id, root);
                debug!(
                    spec = %id,
                    root = %self.arena[root].id(),
                    paths = paths.len(),
                    "compiled spec"
                );
                root
            }
        };

        let links = self.arena[spec_root].links();
        if let Some(instance) = self.check_path(self.root, &prefix)? {
            self.arena[instance].check_links(&links)?;
            if self.mount_mode == MountMode::Copied && self.mounted.contains(&(id, instance)) {
                trace!(spec = %id, prefix = %DisplayPath(&prefix), "spec already mounted");
                return Ok(());
            }
        }

        let instance = self.extend(self.root, &prefix, None)?;
        let links = match self.mount_mode {
            MountMode::Shared => links,
            MountMode::Copied => self.copy_links(links),
        };
        self.arena[instance].splice(links);
        self.mounted.insert((id, instance));

        debug!(
            spec = %id,
            prefix = %DisplayPath(&prefix),
            nodes = self.arena.factory().count(),
            "mounted spec"
        );
        Ok(())
    }

    /// Follows `parts` from the root.
    ///
    /// Returns the final node and the node before it.
    pub(super) fn walk<'a>(
        &'a self,
        parts: &[&'a str],
        params: &mut Params<'a>,
    ) -> Option<(NodeRef, Option<NodeRef>)> {
        let mut node = self.root;
        let mut prev = None;
        for &part in parts {
            prev = Some(node);
            node = self.arena[node].get(part, params)?;
        }
        Some((node, prev))
    }
}

struct DisplayPath<'a>(&'a [Segment]);

impl std::fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
