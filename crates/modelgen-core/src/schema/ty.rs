use super::StorageType;

/// Abstract attribute type as written in the model document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrType {
    Id,
    String,
    Int,
    Float,
    Boolean,
    Time,

    /// Name of a user-defined enum or union
    UserDefined(String),
}

/// Native (in-memory) representation of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    I32,
    F64,
    Bool,
    String,
}

/// The one mapping from an abstract type to every target representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping<'a> {
    pub native: NativeType,
    pub storage: StorageType,
    pub wire: &'a str,
}

/// Map an abstract type to its native, storage and wire representations.
///
/// Every renderer goes through this function; none of them special-case a
/// type on their own.
pub fn map_type(ty: &AttrType) -> TypeMapping<'_> {
    use NativeType as N;
    use StorageType as S;

    let (native, storage, wire) = match ty {
        AttrType::Id => (N::String, S::Varchar, "ID"),
        AttrType::String => (N::String, S::Varchar, "String"),
        AttrType::Int => (N::I32, S::Integer, "Int"),
        AttrType::Float => (N::F64, S::Real, "Float"),
        AttrType::Boolean => (N::Bool, S::Boolean, "Boolean"),
        AttrType::Time => (N::String, S::Varchar, "String"),
        AttrType::UserDefined(name) => (N::String, S::Varchar, &name[..]),
    };

    TypeMapping {
        native,
        storage,
        wire,
    }
}

impl AttrType {
    /// Parse a built-in type name. User-defined names are not checked here.
    pub fn from_name(name: &str) -> AttrType {
        match name {
            "ID" => AttrType::Id,
            "String" => AttrType::String,
            "Int" => AttrType::Int,
            "Float" => AttrType::Float,
            "Boolean" => AttrType::Boolean,
            "Time" => AttrType::Time,
            other => AttrType::UserDefined(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AttrType::Id => "ID",
            AttrType::String => "String",
            AttrType::Int => "Int",
            AttrType::Float => "Float",
            AttrType::Boolean => "Boolean",
            AttrType::Time => "Time",
            AttrType::UserDefined(name) => name,
        }
    }

    pub fn is_user_defined(&self) -> bool {
        matches!(self, AttrType::UserDefined(_))
    }

    pub fn mapping(&self) -> TypeMapping<'_> {
        map_type(self)
    }
}

impl core::fmt::Display for AttrType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_is_a_32_bit_integer_everywhere() {
        let binding = AttrType::from_name("Int");
        let mapping = map_type(&binding);
        assert_eq!(mapping.native, NativeType::I32);
        assert_eq!(mapping.storage.as_sql(), "integer");
        assert_eq!(mapping.wire, "Int");
    }

    #[test]
    fn id_is_string_like_but_wire_id() {
        let mapping = map_type(&AttrType::Id);
        assert_eq!(mapping.native, NativeType::String);
        assert_eq!(mapping.storage, StorageType::Varchar);
        assert_eq!(mapping.wire, "ID");
    }

    #[test]
    fn user_defined_keeps_its_name_on_the_wire() {
        let ty = AttrType::from_name("Color");
        let mapping = map_type(&ty);
        assert_eq!(mapping.native, NativeType::String);
        assert_eq!(mapping.storage, StorageType::Varchar);
        assert_eq!(mapping.wire, "Color");
    }

    #[test]
    fn mapping_is_order_independent() {
        let names = ["Time", "Int", "ID", "Boolean", "String", "Float"];
        let forward: Vec<_> = names
            .iter()
            .map(|name| map_type(&AttrType::from_name(name)).storage)
            .collect();
        let backward: Vec<_> = names
            .iter()
            .rev()
            .map(|name| map_type(&AttrType::from_name(name)).storage)
            .collect();

        assert_eq!(
            forward,
            backward.into_iter().rev().collect::<Vec<_>>()
        );
        assert_eq!(map_type(&AttrType::Time).wire, "String");
    }
}
