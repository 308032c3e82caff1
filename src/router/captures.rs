use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Parameters captured by a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    buf: SmallVec<[(&'a str, &'a str); 8]>,
    listing: Option<Vec<&'a str>>,
}

impl<'a> Params<'a> {
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.buf
            .iter()
            .find_map(|&(k, v)| if name == k { Some(v) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    /// Child segments of the directory a trailing-slash path matched.
    pub fn listing(&self) -> Option<&[&'a str]> {
        self.listing.as_deref()
    }
}

impl<'a> Deref for Params<'a> {
    type Target = [(&'a str, &'a str)];
    fn deref(&self) -> &Self::Target {
        &*self.buf
    }
}

impl<'a> Params<'a> {
    pub(crate) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
            listing: None,
        }
    }

    pub(crate) fn insert(&mut self, name: &'a str, value: &'a str) {
        match self.buf.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.buf.push((name, value)),
        }
    }

    pub(super) fn set_listing(&mut self, keys: Vec<&'a str>) {
        self.listing = Some(keys);
    }
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a, T> {
    pub value: &'a T,
    pub params: Params<'a>,
}
