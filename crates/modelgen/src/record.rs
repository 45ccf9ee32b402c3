use indexmap::IndexMap;
use modelgen_core::Value;

static NULL: Value = Value::Null;

/// A dynamically typed entity instance.
///
/// Attribute values are keyed by attribute name (`ID`, `CreatedAt`) and
/// related records by relation display name (`Organization`, `Users`). A
/// field that was never set reads as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: IndexMap<String, Value>,
    related: IndexMap<String, Related>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Related {
    /// A singular relation. Loaded records only hold the target's `ID`.
    One(Box<Record>),

    /// A hasMany relation
    Many(Vec<Record>),
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// A record holding only an `ID`, used to point a relation at a target.
    pub fn reference(id: impl Into<String>) -> Record {
        let id: String = id.into();
        Record::new().with("ID", id)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Record {
        self.set(name, value);
        self
    }

    pub fn with_one(mut self, name: impl Into<String>, record: Record) -> Record {
        self.set_one(name, record);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("ID").as_str()
    }

    pub fn set_one(&mut self, name: impl Into<String>, record: Record) {
        self.related
            .insert(name.into(), Related::One(Box::new(record)));
    }

    pub fn set_many(&mut self, name: impl Into<String>, records: Vec<Record>) {
        self.related.insert(name.into(), Related::Many(records));
    }

    pub fn remove_related(&mut self, name: &str) -> Option<Related> {
        self.related.shift_remove(name)
    }

    pub fn related(&self, name: &str) -> Option<&Related> {
        self.related.get(name)
    }

    pub fn one(&self, name: &str) -> Option<&Record> {
        match self.related.get(name)? {
            Related::One(record) => Some(record),
            Related::Many(_) => None,
        }
    }

    pub fn many(&self, name: &str) -> Option<&[Record]> {
        match self.related.get(name)? {
            Related::Many(records) => Some(records),
            Related::One(_) => None,
        }
    }

    /// The `ID` of the record a singular relation points at
    pub fn related_id(&self, name: &str) -> Option<&str> {
        self.one(name).and_then(Record::id)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}
