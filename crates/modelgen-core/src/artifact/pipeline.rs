use crate::schema::FieldId;

/// One step of a mutation resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Compute a generated field from the storage handle and the partially
    /// built record.
    Generate { field: FieldId, function: String },

    /// Hook run with the built record, or the bare id for deletes.
    Before { function: String },

    /// The persistence call.
    Persist,

    /// Hook run with the persisted result.
    After { function: String },
}

impl Step {
    pub fn function(&self) -> Option<&str> {
        match self {
            Step::Generate { function, .. }
            | Step::Before { function }
            | Step::After { function } => Some(function.as_str()),
            Step::Persist => None,
        }
    }
}
