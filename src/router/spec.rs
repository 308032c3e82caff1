use std::fmt;

/// Caller-assigned handle of a spec.
///
/// Compiled spec subtrees are memoized by this id: mounting a second spec
/// with an id that was already compiled reuses the first one's subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecId(u64);

impl SpecId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SpecId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of path templates mapped to handler values.
#[derive(Debug, Clone)]
pub struct Spec<T> {
    id: SpecId,
    paths: Option<Vec<(String, T)>>,
}

impl<T> Spec<T> {
    /// A spec with no paths mapping yet.
    pub fn new(id: u64) -> Self {
        Self {
            id: SpecId(id),
            paths: None,
        }
    }

    pub fn with_paths<I, S>(id: u64, paths: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        Self {
            id: SpecId(id),
            paths: Some(paths.into_iter().map(|(p, v)| (p.into(), v)).collect()),
        }
    }

    pub fn path(mut self, template: &str, value: T) -> Self {
        self.insert(template, value);
        self
    }

    pub fn insert(&mut self, template: &str, value: T) -> &mut Self {
        self.paths
            .get_or_insert_with(Vec::new)
            .push((template.to_owned(), value));
        self
    }

    pub fn id(&self) -> SpecId {
        self.id
    }

    pub fn paths(&self) -> Option<&[(String, T)]> {
        self.paths.as_deref()
    }
}
