use crate::schema::FieldId;

/// A query or mutation on the wire schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireOperation {
    pub name: String,
    pub kind: WireKind,
    pub args: Vec<WireArg>,
    pub returns: WireType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Query,
    Mutation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireArg {
    pub name: String,

    /// Wire scalar or type name
    pub ty: String,

    /// The attribute or relation the argument fills. `None` for pagination.
    pub field: Option<FieldId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireType {
    pub name: String,
    pub required: bool,
    pub many: bool,
}

impl WireOperation {
    pub fn is_mutation(&self) -> bool {
        self.kind == WireKind::Mutation
    }

    /// `name(arg: T!, ...): R`
    pub fn signature(&self) -> String {
        let args = self
            .args
            .iter()
            .map(|arg| format!("{}: {}!", arg.name, arg.ty))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{}({args}): {}", self.name, self.returns)
    }
}

impl WireType {
    pub fn one(name: impl Into<String>) -> WireType {
        WireType {
            name: name.into(),
            required: true,
            many: false,
        }
    }

    pub fn many(name: impl Into<String>) -> WireType {
        WireType {
            name: name.into(),
            required: false,
            many: true,
        }
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.many, self.required) {
            (true, true) => write!(f, "[{}!]!", self.name),
            (true, false) => write!(f, "[{}!]", self.name),
            (false, true) => write!(f, "{}!", self.name),
            (false, false) => f.write_str(&self.name),
        }
    }
}
