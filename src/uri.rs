//! Reverse routing: building concrete paths from templates.

use crate::error::RouterError;
use crate::pattern::{self, Modifier, PathInput, Segment};

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// The characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriPart {
    Literal(Arc<str>),
    Named {
        name: Arc<str>,
        value: Option<String>,
        modifier: Option<Modifier>,
    },
}

/// A path template whose named segments can be bound to values.
///
/// Cloning copies the bound values and shares the literal text.
///
/// ```
/// use uri_trie::UriTemplate;
///
/// let mut uri = UriTemplate::new("/{domain:en.wikipedia.org}/page/{title}").unwrap();
/// assert_eq!(uri.to_string(), "/en.wikipedia.org/page/{title}");
///
/// uri.bind([("title", "Albert Einstein")]);
/// assert_eq!(uri.to_string(), "/en.wikipedia.org/page/Albert%20Einstein");
/// ```
#[derive(Debug, Clone)]
pub struct UriTemplate {
    parts: Vec<UriPart>,
    cache: OnceCell<String>,
}

impl UriTemplate {
    pub fn new<'a>(template: impl Into<PathInput<'a>>) -> Result<Self, RouterError> {
        let segments = pattern::parse(template)?;
        Ok(Self::from(segments))
    }

    pub fn with_params<'a, I, K, V>(
        template: impl Into<PathInput<'a>>,
        params: I,
    ) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut uri = Self::new(template)?;
        uri.bind(params);
        Ok(uri)
    }

    pub fn parts(&self) -> &[UriPart] {
        &self.parts
    }

    /// Binds values to the named segments with matching names.
    ///
    /// Names that are not in the template and empty values are ignored.
    pub fn bind<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (k, v) in params {
            let (k, v) = (k.as_ref(), v.as_ref());
            if v.is_empty() {
                continue;
            }
            for part in self.parts.iter_mut() {
                if let UriPart::Named { name, value, .. } = part {
                    if &**name == k {
                        *value = Some(v.to_owned());
                        self.cache.take();
                    }
                }
            }
        }
        self
    }

    fn render(&self) -> String {
        let mut s = String::new();
        for part in &self.parts {
            match part {
                UriPart::Literal(text) => {
                    s.push('/');
                    s.extend(utf8_percent_encode(text, COMPONENT));
                }
                UriPart::Named {
                    value: Some(value), ..
                } => {
                    s.push('/');
                    s.extend(utf8_percent_encode(value, COMPONENT));
                }
                UriPart::Named {
                    modifier: Some(_), ..
                } => {}
                UriPart::Named { name, .. } => {
                    s.push_str("/{");
                    s.push_str(name);
                    s.push('}');
                }
            }
        }
        s
    }

    pub fn as_str(&self) -> &str {
        self.cache.get_or_init(|| self.render())
    }
}

impl From<Vec<Segment>> for UriTemplate {
    fn from(segments: Vec<Segment>) -> Self {
        let parts = segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => UriPart::Literal(text.into()),
                Segment::Named(param) => UriPart::Named {
                    name: param.name.into(),
                    value: param.pattern.map(String::from),
                    modifier: param.modifier,
                },
            })
            .collect();
        Self {
            parts,
            cache: OnceCell::new(),
        }
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
