use super::{Error, ModelError};

/// Every configuration error found during one resolution run.
#[derive(Debug)]
pub(super) struct ModelErrors {
    errors: Vec<Error>,
}

impl std::error::Error for ModelErrors {}

impl core::fmt::Display for ModelErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.errors.len() {
            1 => f.write_str("1 model error:")?,
            n => write!(f, "{n} model errors:")?,
        }

        for err in &self.errors {
            write!(f, "\n  - {err}")?;
        }

        Ok(())
    }
}

impl Error {
    /// Bundles the configuration errors collected across a model.
    pub fn model_errors(errors: Vec<Error>) -> Error {
        Error::from(super::ErrorKind::ModelErrors(ModelErrors { errors }))
    }

    /// Returns the bundled configuration errors, or the error itself when it
    /// is a single one.
    pub fn model_error_list(&self) -> Vec<&ModelError> {
        match self.kind() {
            super::ErrorKind::ModelErrors(bundle) => {
                bundle.errors.iter().filter_map(Error::as_model).collect()
            }
            super::ErrorKind::Model(err) => vec![err],
            _ => vec![],
        }
    }

    /// Returns `true` if this error bundles configuration errors.
    pub fn is_model_errors(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ModelErrors(_))
    }
}
