use super::Error;

/// Error when the artifact list references a generator or hook that was never
/// registered with the runtime.
#[derive(Debug)]
pub(super) struct MissingFunctionError {
    name: Box<str>,
}

impl std::error::Error for MissingFunctionError {}

impl core::fmt::Display for MissingFunctionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "function `{}` is not registered", self.name)
    }
}

impl Error {
    pub fn missing_function(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingFunction(MissingFunctionError {
            name: name.into().into(),
        }))
    }

    pub fn is_missing_function(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingFunction(_))
    }
}
