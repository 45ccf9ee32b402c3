use crate::{Error, Record, Result, Value};

/// Native field types a stored [`Value`] converts back into.
pub trait Load: Sized {
    /// `field` names the attribute in the error when the value has the
    /// wrong shape.
    fn load(value: &Value, field: &str) -> Result<Self>;
}

impl Load for String {
    fn load(value: &Value, field: &str) -> Result<Self> {
        match value {
            Value::String(value) => Ok(value.clone()),
            other => Err(unexpected(field, "string", other)),
        }
    }
}

impl Load for i32 {
    fn load(value: &Value, field: &str) -> Result<Self> {
        value
            .as_i32()
            .ok_or_else(|| unexpected(field, "i32", value))
    }
}

impl Load for f64 {
    fn load(value: &Value, field: &str) -> Result<Self> {
        match value {
            Value::F64(value) => Ok(*value),
            Value::I32(value) => Ok(f64::from(*value)),
            other => Err(unexpected(field, "f64", other)),
        }
    }
}

impl Load for bool {
    fn load(value: &Value, field: &str) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| unexpected(field, "bool", value))
    }
}

impl<T: Load> Load for Option<T> {
    fn load(value: &Value, field: &str) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::load(value, field).map(Some),
        }
    }
}

impl Record {
    /// Read an attribute as a native type.
    pub fn load<T: Load>(&self, name: &str) -> Result<T> {
        T::load(self.get(name), name)
    }
}

fn unexpected(field: &str, expected: &str, value: &Value) -> Error {
    Error::validation(field, format!("expected {expected}, got {}", value.type_name()))
}
