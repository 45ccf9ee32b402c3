mod adhoc;
mod driver;
mod missing_function;
mod model;
mod model_errors;
mod record_not_found;
mod unsupported_operation;
mod validation;

pub use model::ModelError;

use adhoc::AdhocError;
use driver::DriverError;
use missing_function::MissingFunctionError;
use model_errors::ModelErrors;
use record_not_found::RecordNotFoundError;
use std::sync::Arc;
use unsupported_operation::UnsupportedOperationError;
use validation::ValidationError;

/// Returns early with an ad-hoc error built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while loading, resolving, rendering or executing a
/// model.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, mut consequent: Error) -> Error {
        let detached = match Arc::get_mut(&mut consequent.inner) {
            Some(inner) if inner.cause.is_none() => {
                inner.cause = Some(self);
                None
            }
            _ => Some(self),
        };

        match detached {
            None => consequent,
            // The consequent is shared or already caused; flatten its message
            // into a fresh link so the chain stays intact.
            Some(cause) => Error {
                inner: Arc::new(ErrorInner {
                    kind: ErrorKind::Adhoc(AdhocError::new(consequent.to_string())),
                    cause: Some(cause),
                }),
            },
        }
    }

    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(args)))
    }

    /// Returns the root cause of the chain.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = &err.inner.cause {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let err = next?;
            next = err.inner.cause.as_ref();
            Some(err)
        })
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Model(ModelError),
    ModelErrors(ModelErrors),
    Driver(DriverError),
    RecordNotFound(RecordNotFoundError),
    MissingFunction(MissingFunctionError),
    UnsupportedOperation(UnsupportedOperationError),
    Validation(ValidationError),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Model(err) => core::fmt::Display::fmt(err, f),
            ModelErrors(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            RecordNotFound(err) => core::fmt::Display::fmt(err, f),
            MissingFunction(err) => core::fmt::Display::fmt(err, f),
            UnsupportedOperation(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for ModelError {
    fn into_error(self) -> Error {
        Error::model(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = err!("root cause");
        let mid = err!("middle context");
        let top = err!("top context");

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
        assert_eq!(chained.root().to_string(), "root cause");
    }

    #[test]
    fn context_on_shared_consequent() {
        let shared = err!("shared");
        let _keep = shared.clone();

        let chained = err!("root").context(shared);
        assert_eq!(chained.to_string(), "shared: root");
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn io_error_bridge() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let our_err: Error = io_err.into();
        assert!(our_err.to_string().contains("file not found"));
    }

    #[test]
    fn record_not_found_with_context_chain() {
        let err = Error::record_not_found("table=users key=7")
            .context(err!("calling FindUserByID"));

        assert_eq!(
            err.to_string(),
            "calling FindUserByID: record not found: table=users key=7"
        );
        assert!(err.root().is_record_not_found());
    }

    #[test]
    fn model_error_names_offender() {
        let err = Error::model(ModelError::InvalidOperation {
            entity: "User".into(),
            operation: "upsert".into(),
        });

        assert!(err.is_model());
        assert_eq!(
            err.to_string(),
            "invalid operation `upsert` on entity `User`"
        );
    }

    #[test]
    fn collected_model_errors() {
        let err = Error::model_errors(vec![
            Error::model(ModelError::DuplicateEntity {
                name: "User".into(),
            }),
            Error::model(ModelError::UnknownTarget {
                entity: "Poi".into(),
                relation: "Owner".into(),
                target: "Person".into(),
            }),
        ]);

        assert_eq!(err.model_error_list().len(), 2);
        assert_eq!(
            err.to_string(),
            "2 model errors:\n  - duplicate entity `User`\n  - relation `Poi.Owner` targets unknown entity `Person`"
        );
    }
}
