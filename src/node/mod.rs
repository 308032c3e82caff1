mod factory;

pub use self::factory::{NodeFactory, NodeId};

use crate::error::RouterError;
use crate::pattern::{Param, Segment};
use crate::router::Params;
use crate::strmap::StrMap;

use std::ops::{Index, IndexMut};

/// Position of a node in its [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef(usize);

/// A literal edge. `captured` marks keys registered as `{name:value}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub(crate) node: NodeRef,
    captured: bool,
}

/// A vertex of the lookup graph.
///
/// A node either dispatches on literal segment text, or holds a single
/// wildcard child. The empty segment is the only literal allowed next to a
/// wildcard, so `/a//` stays distinguishable from `/a/{x}`.
#[derive(Debug)]
pub(crate) struct Node<T> {
    id: NodeId,
    pub(crate) value: Option<T>,
    children: StrMap<Edge>,
    wildcard: Option<NodeRef>,
    name: Option<Box<str>>,
}

/// The outgoing edges of a node, detached so they can be spliced elsewhere.
#[derive(Debug, Clone)]
pub(crate) struct Links {
    pub(crate) children: Vec<(Box<str>, Edge)>,
    pub(crate) wildcard: Option<NodeRef>,
    pub(crate) name: Option<Box<str>>,
}

impl<T> Node<T> {
    pub(super) fn new(id: NodeId) -> Self {
        Self {
            id,
            value: None,
            children: StrMap::new(),
            wildcard: None,
            name: None,
        }
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn has_children(&self) -> bool {
        !self.children.is_empty() || self.wildcard.is_some()
    }

    fn has_long_keys(&self) -> Option<&str> {
        self.children.keys().find(|k| !k.is_empty())
    }

    fn check_name(&self, name: &str) -> Result<(), RouterError> {
        match self.name.as_deref() {
            Some(existing) if existing != name => Err(RouterError::name_conflict(name, existing)),
            _ => Ok(()),
        }
    }

    /// Checks that `segment` may get a new child at this node.
    pub(crate) fn check(&self, segment: &Segment) -> Result<(), RouterError> {
        match segment {
            Segment::Literal(text) => {
                if self.wildcard.is_some() && !text.is_empty() {
                    return Err(RouterError::wildcard_conflict(&**text));
                }
                Ok(())
            }
            Segment::Named(param) => {
                if param.modifier.is_some() {
                    return Err(RouterError::unsupported_modifier(segment.to_string()));
                }
                match param.pattern {
                    Some(_) => {
                        self.check_name(&param.name)?;
                        if self.wildcard.is_some() {
                            return Err(RouterError::wildcard_conflict(segment.to_string()));
                        }
                    }
                    None => {
                        if self.has_long_keys().is_some() {
                            return Err(RouterError::wildcard_conflict(segment.to_string()));
                        }
                        self.check_name(&param.name)?;
                    }
                }
                Ok(())
            }
        }
    }

    pub(crate) fn link(&mut self, segment: &Segment, child: NodeRef) {
        match segment {
            Segment::Literal(text) => {
                let edge = Edge {
                    node: child,
                    captured: false,
                };
                self.children.insert(text, edge);
            }
            Segment::Named(Param {
                name,
                pattern: Some(pattern),
                ..
            }) => {
                self.name = Some(name.clone());
                let edge = Edge {
                    node: child,
                    captured: true,
                };
                self.children.insert(pattern, edge);
            }
            Segment::Named(Param {
                name,
                pattern: None,
                ..
            }) => {
                self.name = Some(name.clone());
                self.wildcard = Some(child);
            }
        }
    }

    pub(crate) fn set(&mut self, segment: &Segment, child: NodeRef) -> Result<(), RouterError> {
        self.check(segment)?;
        self.link(segment, child);
        Ok(())
    }

    /// Checks that `segment` may walk through an existing child.
    pub(crate) fn check_claim(&self, segment: &Segment) -> Result<(), RouterError> {
        if let Segment::Named(param) = segment {
            if param.modifier.is_some() {
                return Err(RouterError::unsupported_modifier(segment.to_string()));
            }
            self.check_name(&param.name)?;
        }
        Ok(())
    }

    /// Records the name of a named segment walking through an existing child.
    pub(crate) fn claim(&mut self, segment: &Segment) -> Result<(), RouterError> {
        self.check_claim(segment)?;
        if let Segment::Named(param) = segment {
            if self.name.is_none() {
                self.name = Some(param.name.clone());
            }
            if let Some(ref pattern) = param.pattern {
                if let Some(edge) = self.children.find_mut(pattern) {
                    edge.captured = true;
                }
            }
        }
        Ok(())
    }

    /// Finds the existing child for a segment descriptor.
    ///
    /// Used during tree construction only: a literal never falls back to the wildcard.
    pub(crate) fn find(&self, segment: &Segment) -> Option<NodeRef> {
        match segment {
            Segment::Literal(text) => self.children.find(text).map(|e| e.node),
            Segment::Named(Param {
                pattern: Some(pattern),
                ..
            }) => self.children.find(pattern).map(|e| e.node),
            Segment::Named(Param { pattern: None, .. }) => self.wildcard,
        }
    }

    /// Matches one request path segment.
    #[inline]
    pub(crate) fn get<'a>(&'a self, segment: &'a str, params: &mut Params<'a>) -> Option<NodeRef> {
        if segment.is_empty() {
            // the wildcard never matches an empty segment
            return self.children.find(segment).map(|e| e.node);
        }
        let (found, captured) = match self.children.find(segment) {
            Some(edge) => (edge.node, edge.captured),
            None => (self.wildcard?, true),
        };
        if captured {
            if let Some(ref name) = self.name {
                params.insert(name, segment);
            }
        }
        Some(found)
    }

    /// Sorted literal keys, for directory listings.
    pub(crate) fn keys<'a>(&'a self, arena: &'a Arena<T>) -> Vec<&'a str> {
        if self.wildcard.is_some() {
            return Vec::new();
        }
        self.children
            .iter()
            .filter(|&(key, edge)| !key.is_empty() || arena[edge.node].has_children())
            .map(|(key, _)| key)
            .collect()
    }

    pub(crate) fn links(&self) -> Links {
        Links {
            children: self.children.iter().map(|(k, &e)| (k.into(), e)).collect(),
            wildcard: self.wildcard,
            name: self.name.clone(),
        }
    }

    pub(crate) fn check_links(&self, links: &Links) -> Result<(), RouterError> {
        if let Some(ref name) = links.name {
            self.check_name(name)?;
        }
        if links.wildcard.is_some() {
            if let Some(key) = self.has_long_keys() {
                return Err(RouterError::wildcard_conflict(key));
            }
        }
        if self.wildcard.is_some() {
            if let Some((key, _)) = links.children.iter().find(|(k, _)| !k.is_empty()) {
                return Err(RouterError::wildcard_conflict(&**key));
            }
        }
        Ok(())
    }

    pub(crate) fn splice(&mut self, links: Links) {
        if links.wildcard.is_some() {
            self.wildcard = links.wildcard;
        }
        if links.name.is_some() {
            self.name = links.name;
        }
        for (key, edge) in links.children {
            self.children.insert(&key, edge);
        }
    }
}

/// Owner of every node of a router.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
    factory: NodeFactory,
}

impl<T> Arena<T> {
    pub(crate) fn new(factory: NodeFactory) -> Self {
        Self {
            nodes: Vec::new(),
            factory,
        }
    }

    pub(crate) fn alloc(&mut self) -> NodeRef {
        let r = NodeRef(self.nodes.len());
        self.nodes.push(self.factory.create());
        r
    }

    pub(crate) fn factory(&self) -> &NodeFactory {
        &self.factory
    }
}

impl<T> Index<NodeRef> for Arena<T> {
    type Output = Node<T>;
    fn index(&self, r: NodeRef) -> &Node<T> {
        &self.nodes[r.0]
    }
}

impl<T> IndexMut<NodeRef> for Arena<T> {
    fn index_mut(&mut self, r: NodeRef) -> &mut Node<T> {
        &mut self.nodes[r.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Modifier;

    fn arena_with(n: usize) -> (Arena<&'static str>, Vec<NodeRef>) {
        let mut arena = Arena::new(NodeFactory::new());
        let refs = (0..n).map(|_| arena.alloc()).collect();
        (arena, refs)
    }

    #[test]
    fn literal_and_wildcard() {
        let (mut arena, r) = arena_with(4);
        arena[r[0]].set(&Segment::literal("a"), r[1]).unwrap();
        arena[r[0]].set(&Segment::literal(""), r[2]).unwrap();

        let err = arena[r[0]].set(&Segment::named("x"), r[3]).unwrap_err();
        assert_eq!(err, RouterError::wildcard_conflict("{x}"));

        let (mut arena, r) = arena_with(4);
        arena[r[0]].set(&Segment::literal(""), r[2]).unwrap();
        arena[r[0]].set(&Segment::named("x"), r[1]).unwrap();
        let err = arena[r[0]].set(&Segment::literal("b"), r[3]).unwrap_err();
        assert_eq!(err, RouterError::wildcard_conflict("b"));
    }

    #[test]
    fn named_fixed_value() {
        let (mut arena, r) = arena_with(4);
        let en = Segment::Named(Param::new("lang").with_pattern("en"));
        let de = Segment::Named(Param::new("lang").with_pattern("de"));
        let fr = Segment::Named(Param::new("locale").with_pattern("fr"));

        arena[r[0]].set(&en, r[1]).unwrap();
        arena[r[0]].set(&de, r[2]).unwrap();
        let err = arena[r[0]].set(&fr, r[3]).unwrap_err();
        assert_eq!(err, RouterError::name_conflict("locale", "lang"));

        assert_eq!(arena[r[0]].find(&de), Some(r[2]));
        assert_eq!(arena[r[0]].find(&Segment::literal("en")), Some(r[1]));
    }

    #[test]
    fn modifier_rejected() {
        let (mut arena, r) = arena_with(2);
        let seg = Segment::Named(Param::new("p").with_modifier(Modifier::Reserved));
        let err = arena[r[0]].set(&seg, r[1]).unwrap_err();
        assert_eq!(err, RouterError::unsupported_modifier("{+p}"));
    }

    #[test]
    fn get_captures() {
        let (mut arena, r) = arena_with(3);
        arena[r[0]].set(&Segment::named("title"), r[1]).unwrap();
        arena[r[0]].set(&Segment::literal(""), r[2]).unwrap();

        let node = &arena[r[0]];
        let mut params = Params::new();
        assert_eq!(node.get("Einstein", &mut params), Some(r[1]));
        assert_eq!(params.get("title"), Some("Einstein"));

        let mut params = Params::new();
        assert_eq!(node.get("", &mut params), Some(r[2]));
        assert!(params.is_empty());
    }

    #[test]
    fn plain_literal_does_not_capture() {
        let (mut arena, r) = arena_with(3);
        let en = Segment::Named(Param::new("lang").with_pattern("en"));
        arena[r[0]].set(&en, r[1]).unwrap();
        arena[r[0]].set(&Segment::literal("static"), r[2]).unwrap();

        let mut params = Params::new();
        assert_eq!(arena[r[0]].get("static", &mut params), Some(r[2]));
        assert!(params.is_empty());
        assert_eq!(arena[r[0]].get("en", &mut params), Some(r[1]));
        assert_eq!(&*params, &[("lang", "en")]);
    }

    #[test]
    fn claim_marks_existing_literal() {
        let (mut arena, r) = arena_with(2);
        arena[r[0]].set(&Segment::literal("en"), r[1]).unwrap();
        let en = Segment::Named(Param::new("lang").with_pattern("en"));
        assert_eq!(arena[r[0]].find(&en), Some(r[1]));
        arena[r[0]].claim(&en).unwrap();

        let mut params = Params::new();
        arena[r[0]].get("en", &mut params);
        assert_eq!(params.get("lang"), Some("en"));
    }

    #[test]
    fn wildcard_skips_empty_segment() {
        let (mut arena, r) = arena_with(2);
        arena[r[0]].set(&Segment::named("x"), r[1]).unwrap();
        let mut params = Params::new();
        assert_eq!(arena[r[0]].get("", &mut params), None);
    }

    #[test]
    fn keys_listing() {
        let (mut arena, r) = arena_with(6);
        arena[r[0]].set(&Segment::literal("b"), r[1]).unwrap();
        arena[r[0]].set(&Segment::literal("a"), r[2]).unwrap();
        arena[r[0]].set(&Segment::literal(""), r[3]).unwrap();
        assert_eq!(arena[r[0]].keys(&arena), ["a", "b"]);

        arena[r[3]].set(&Segment::literal("deep"), r[4]).unwrap();
        assert_eq!(arena[r[0]].keys(&arena), ["", "a", "b"]);

        arena[r[5]].set(&Segment::named("x"), r[4]).unwrap();
        assert!(arena[r[5]].keys(&arena).is_empty());
        assert!(arena[r[5]].has_children());
        assert!(!arena[r[4]].has_children());
    }
}
