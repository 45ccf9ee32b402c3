use super::Error;

#[derive(Debug)]
pub(super) struct UnsupportedOperationError {
    entity: Box<str>,
    operation: Box<str>,
}

impl std::error::Error for UnsupportedOperationError {}

impl core::fmt::Display for UnsupportedOperationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "entity `{}` does not support `{}`",
            self.entity, self.operation
        )
    }
}

impl Error {
    /// Creates an error for an operation the entity does not expose.
    pub fn unsupported_operation(entity: impl Into<String>, operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedOperation(
            UnsupportedOperationError {
                entity: entity.into().into(),
                operation: operation.into().into(),
            },
        ))
    }

    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedOperation(_))
    }
}
