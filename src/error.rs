use crate::router::SpecId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("invalid path: {path:?}")]
    InvalidPath { path: String },

    #[error("modifiers are not yet implemented: {segment:?}")]
    UnsupportedModifier { segment: String },

    #[error("captured pattern parameter {name:?} does not match existing name {existing:?}")]
    ParameterNameConflict { name: String, existing: String },

    #[error("can not register {segment:?} in a wildcard path segment")]
    WildcardConflict { segment: String },

    #[error("no paths defined in spec {0}")]
    MissingSpec(SpecId),

    #[error("spec removal is not implemented")]
    NotImplemented,
}

impl RouterError {
    pub(crate) fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    pub(crate) fn unsupported_modifier(segment: impl Into<String>) -> Self {
        Self::UnsupportedModifier {
            segment: segment.into(),
        }
    }

    pub(crate) fn wildcard_conflict(segment: impl Into<String>) -> Self {
        Self::WildcardConflict {
            segment: segment.into(),
        }
    }

    pub(crate) fn name_conflict(name: &str, existing: &str) -> Self {
        Self::ParameterNameConflict {
            name: name.to_owned(),
            existing: existing.to_owned(),
        }
    }
}
