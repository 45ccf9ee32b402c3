use super::Error;

/// A configuration problem found while resolving a model.
///
/// Every variant names the entity, attribute, relation or type at fault.
/// Resolution collects these across the whole model before failing, see
/// [`Error::model_errors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An entity lists an operation outside `create`, `update`, `delete`,
    /// `find`.
    InvalidOperation { entity: String, operation: String },

    /// A hook key is not a mutating operation, or its lifecycle is not
    /// `before` / `after`.
    InvalidHook {
        entity: String,
        operation: String,
        lifecycle: String,
    },

    /// A relation points at an entity the model does not declare.
    UnknownTarget {
        entity: String,
        relation: String,
        target: String,
    },

    /// An attribute type is neither built in nor a declared user type.
    UnknownType {
        entity: String,
        attribute: String,
        ty: String,
    },

    /// A modifier that does not exist, or does not apply to the field kind.
    UnknownModifier {
        entity: String,
        field: String,
        modifier: String,
    },

    /// A trait name with no expansion. Only reported in strict mode.
    UnknownTrait { entity: String, name: String },

    /// A relation must assert exactly one of `hasOne`, `belongsTo`, `hasMany`.
    InvalidCardinality { entity: String, relation: String },

    /// A union references another union.
    NestedUnion { ty: String, value: String },

    /// Two members of an entity resolve to the same name.
    NamingCollision { entity: String, name: String },

    DuplicateEntity { name: String },

    DuplicateType { name: String },

    /// The entity has no `ID` attribute to key storage on.
    MissingPrimaryKey { entity: String },
}

impl std::error::Error for ModelError {}

impl core::fmt::Display for ModelError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use ModelError::*;

        match self {
            InvalidOperation { entity, operation } => {
                write!(f, "invalid operation `{operation}` on entity `{entity}`")
            }
            InvalidHook {
                entity,
                operation,
                lifecycle,
            } => write!(
                f,
                "invalid hook `{operation}: {lifecycle}` on entity `{entity}`"
            ),
            UnknownTarget {
                entity,
                relation,
                target,
            } => write!(
                f,
                "relation `{entity}.{relation}` targets unknown entity `{target}`"
            ),
            UnknownType {
                entity,
                attribute,
                ty,
            } => write!(f, "attribute `{entity}.{attribute}` has unknown type `{ty}`"),
            UnknownModifier {
                entity,
                field,
                modifier,
            } => write!(f, "`{entity}.{field}` has invalid modifier `{modifier}`"),
            UnknownTrait { entity, name } => {
                write!(f, "entity `{entity}` uses unknown trait `{name}`")
            }
            InvalidCardinality { entity, relation } => write!(
                f,
                "relation `{entity}.{relation}` must be exactly one of hasOne, belongsTo or hasMany"
            ),
            NestedUnion { ty, value } => {
                write!(f, "union `{ty}` references union `{value}`")
            }
            NamingCollision { entity, name } => {
                write!(f, "entity `{entity}` declares `{name}` more than once")
            }
            DuplicateEntity { name } => write!(f, "duplicate entity `{name}`"),
            DuplicateType { name } => write!(f, "duplicate type `{name}`"),
            MissingPrimaryKey { entity } => {
                write!(f, "entity `{entity}` has no `ID` attribute")
            }
        }
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn model(err: ModelError) -> Error {
        Error::from(super::ErrorKind::Model(err))
    }

    /// Returns `true` if this error is a single configuration error.
    pub fn is_model(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Model(_))
    }

    /// Returns the configuration error, if this is one.
    pub fn as_model(&self) -> Option<&ModelError> {
        match self.kind() {
            super::ErrorKind::Model(err) => Some(err),
            _ => None,
        }
    }
}
