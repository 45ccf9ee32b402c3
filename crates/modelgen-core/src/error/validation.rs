use super::Error;

/// Error when a runtime value does not fit the attribute it is assigned to.
#[derive(Debug)]
pub(super) struct ValidationError {
    field: Box<str>,
    message: Box<str>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid value for `{}`: {}", self.field, self.message)
    }
}

impl Error {
    /// Creates a validation error for the given `Entity.Field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            field: field.into().into(),
            message: message.into().into(),
        }))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }
}
