#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod flavor;
pub use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::Placeholder;

// Fragment serializers
mod column_def;
mod statement;

use crate::stmt::Statement;

use modelgen_core::{
    schema::{ColumnId, Entity, EntityId},
    Model,
};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Model against which the statement is to be serialized
    model: &'a Model,

    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Number of placeholders written so far
    params: usize,
}

impl<'a> Serializer<'a> {
    pub fn new(model: &'a Model, flavor: Flavor) -> Serializer<'a> {
        Serializer { model, flavor }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Serializes one statement. No trailing `;` is written.
    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params: 0,
        };

        stmt.to_sql(&mut fmt);

        log::trace!("serialized statement; flavor={:?}; sql={ret}", self.flavor);
        ret
    }

    /// Serializes the full schema script of the model, one statement per
    /// entry.
    pub fn serialize_schema(&self) -> Vec<String> {
        Statement::schema(self.model, self.flavor)
            .iter()
            .map(|stmt| self.serialize(stmt))
            .collect()
    }

    /// The schema script as a single text, one statement per line.
    pub fn schema_script(&self) -> String {
        let mut script = String::new();

        for stmt in self.serialize_schema() {
            script.push_str(&stmt);
            script.push_str(";\n");
        }

        script
    }

    fn entity(&self, id: impl Into<EntityId>) -> &'a Entity {
        self.model.entity(id)
    }

    fn table_name(&self, id: impl Into<EntityId>) -> Ident<&'a str> {
        Ident(&self.model.entity(id).table)
    }

    fn column_name(&self, id: ColumnId) -> Ident<&'a str> {
        Ident(&self.model.column(id).name)
    }
}
