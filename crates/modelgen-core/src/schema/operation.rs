use std::fmt;

/// An entity operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Find,
}

/// When a hook runs relative to the persistence call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Before,
    After,
}

/// Lifecycle hooks declared per mutating operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hooks {
    entries: Vec<(Operation, Lifecycle)>,
}

impl Operation {
    /// Used when an entity does not list any operation.
    pub const DEFAULT: [Operation; 4] = [
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Find,
    ];

    pub fn from_name(name: &str) -> Option<Operation> {
        Some(match name {
            "create" => Operation::Create,
            "update" => Operation::Update,
            "delete" => Operation::Delete,
            "find" => Operation::Find,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Find => "find",
        }
    }

    /// `Create`, `Update`, ...
    pub fn camel(self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::Find => "Find",
        }
    }

    pub fn is_mutation(self) -> bool {
        !matches!(self, Operation::Find)
    }
}

impl Lifecycle {
    pub fn from_name(name: &str) -> Option<Lifecycle> {
        match name {
            "before" => Some(Lifecycle::Before),
            "after" => Some(Lifecycle::After),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lifecycle::Before => "before",
            Lifecycle::After => "after",
        }
    }

    pub fn camel(self) -> &'static str {
        match self {
            Lifecycle::Before => "Before",
            Lifecycle::After => "After",
        }
    }
}

impl Hooks {
    pub fn has(&self, operation: Operation, lifecycle: Lifecycle) -> bool {
        self.entries.contains(&(operation, lifecycle))
    }

    pub fn insert(&mut self, operation: Operation, lifecycle: Lifecycle) {
        if !self.has(operation, lifecycle) {
            self.entries.push((operation, lifecycle));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operation, Lifecycle)> + '_ {
        self.entries.iter().copied()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
