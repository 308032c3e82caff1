//! Path normalization and template segment parsing.
//!
//! A template such as `/{domain:en.wikipedia.org}/pages/{title}` parses into
//! one [`Segment`] per slash-delimited component. `{name}` is a wildcard
//! capture, `{name:value}` a named but fixed literal. Modifier forms such as
//! `{+name}` and `{/name}` are recognized and rejected.

use crate::error::RouterError;

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

const SLASH: char = '/';
const OPEN: char = '{';
const CLOSE: char = '}';
const COLON: char = ':';

pub type Parts<'a> = SmallVec<[&'a str; 8]>;

/// A path given either as a slash-delimited string or as already split segments.
#[derive(Debug, Clone, Copy)]
pub enum PathInput<'a> {
    Str(&'a str),
    Segments(&'a [&'a str]),
}

impl<'a> From<&'a str> for PathInput<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for PathInput<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(s.as_str())
    }
}

impl<'a> From<&'a [&'a str]> for PathInput<'a> {
    fn from(s: &'a [&'a str]) -> Self {
        Self::Segments(s)
    }
}

impl<'a> From<&'a Vec<&'a str>> for PathInput<'a> {
    fn from(s: &'a Vec<&'a str>) -> Self {
        Self::Segments(s.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for PathInput<'a> {
    fn from(s: &'a [&'a str; N]) -> Self {
        Self::Segments(&s[..])
    }
}

impl PathInput<'_> {
    pub(crate) fn is_empty(&self) -> bool {
        match *self {
            Self::Str(s) => s.is_empty(),
            Self::Segments(s) => s.is_empty(),
        }
    }
}

/// Expansion modifiers of the URI template syntax. None of them is supported yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `{+name}`
    Reserved,
    /// `{/name}`
    PathSegment,
}

impl Modifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Reserved),
            '/' => Some(Self::PathSegment),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Reserved => '+',
            Self::PathSegment => '/',
        }
    }
}

/// A named template segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: Box<str>,
    /// Fixed literal value, as in `{domain:en.wikipedia.org}`.
    pub pattern: Option<Box<str>>,
    pub modifier: Option<Modifier>,
}

impl Param {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            pattern: None,
            modifier: None,
        }
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(Box<str>),
    Named(Param),
}

impl Segment {
    pub fn literal(s: &str) -> Self {
        Self::Literal(s.into())
    }

    pub fn named(name: &str) -> Self {
        Self::Named(Param::new(name))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::Named(p) => {
                f.write_str("{")?;
                if let Some(m) = p.modifier {
                    write!(f, "{}", m.as_char())?;
                }
                f.write_str(&p.name)?;
                if let Some(ref pattern) = p.pattern {
                    write!(f, ":{}", pattern)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Splits a path into segments, dropping one leading slash.
///
/// A pre-split list is taken as is, but none of its elements may contain a slash.
pub fn normalize(path: PathInput<'_>) -> Result<Parts<'_>, RouterError> {
    match path {
        PathInput::Str(s) => Ok(trim_first_slash(s).split(SLASH).collect()),
        PathInput::Segments(segs) => {
            if let Some(bad) = segs.iter().find(|s| s.contains(SLASH)) {
                return Err(RouterError::invalid_path(*bad));
            }
            Ok(segs.iter().copied().collect())
        }
    }
}

/// Parses a path template into segment descriptors.
pub fn parse<'a>(path: impl Into<PathInput<'a>>) -> Result<Vec<Segment>, RouterError> {
    let parts = normalize(path.into())?;
    rejoin(&parts)
        .into_iter()
        .map(|part| parse_segment(&part))
        .collect()
}

/// Glues `{/name}` back together after the split on `/` tore it apart.
fn rejoin<'a>(parts: &[&'a str]) -> Vec<Cow<'a, str>> {
    let mut out: Vec<Cow<'a, str>> = parts.iter().map(|&p| Cow::Borrowed(p)).collect();
    let mut i = 0;
    while i + 1 < out.len() {
        if out[i].ends_with(OPEN) && out[i + 1].ends_with(CLOSE) {
            let rest = out[i][..out[i].len() - 1].to_owned();
            let joined = Cow::Owned(format!("{{/{}", out[i + 1]));
            if rest.is_empty() {
                out[i] = joined;
                out.remove(i + 1);
            } else {
                out[i] = Cow::Owned(rest);
                out[i + 1] = joined;
            }
        }
        i += 1;
    }
    out
}

fn parse_segment(part: &str) -> Result<Segment, RouterError> {
    let inner = match part
        .strip_prefix(OPEN)
        .and_then(|s| s.strip_suffix(CLOSE))
    {
        Some(inner) => inner,
        None => return Ok(Segment::literal(part)),
    };

    let modifier = inner.chars().next().and_then(Modifier::from_char);
    let body = if modifier.is_some() { &inner[1..] } else { inner };

    let (name, pattern) = match body.find(COLON) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let valid_name = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    let valid_pattern = pattern.map_or(true, |p| !p.is_empty() && !p.contains(CLOSE));

    if !(valid_name && valid_pattern) {
        return Ok(Segment::literal(part));
    }

    if modifier.is_some() {
        return Err(RouterError::unsupported_modifier(part));
    }

    Ok(Segment::Named(Param {
        name: name.into(),
        pattern: pattern.map(Into::into),
        modifier: None,
    }))
}

#[inline]
pub(crate) fn trim_first_slash(s: &str) -> &str {
    s.strip_prefix(SLASH).unwrap_or(s)
}
