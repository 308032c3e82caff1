//! A URI template router.
//!
//! Specs map path templates like `/pages/{title}` to handler values. A
//! [`Router`] compiles every spec once and mounts it under any number of
//! prefixes; lookups walk the merged trie once per request path and collect
//! the named captures on the way. [`UriTemplate`] goes the other direction
//! and builds concrete paths from templates.
//!
//! ```
//! use uri_trie::{Router, Spec};
//!
//! let spec = Spec::new(1).path("/a/{x}", "H1").path("/b", "H2");
//!
//! let mut router = Router::new();
//! router.add_spec(&spec, "/api");
//!
//! let m = router.lookup("/api/a/42").unwrap();
//! assert_eq!(*m.value, "H1");
//! assert_eq!(m.params.get("x"), Some("42"));
//!
//! assert!(router.lookup("/api/a").is_none());
//! ```

#![deny(unsafe_code)]

mod error;
mod node;
mod router;
mod strmap;
mod uri;

pub mod pattern;

pub use crate::error::RouterError;
pub use crate::node::{NodeFactory, NodeId};
pub use crate::pattern::{Modifier, Param, PathInput, Segment};
pub use crate::router::{Match, MountMode, Params, Router, RouterConfig, Spec, SpecId};
pub use crate::uri::{UriPart, UriTemplate};
