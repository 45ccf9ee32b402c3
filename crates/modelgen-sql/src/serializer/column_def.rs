use super::{Formatter, Ident, ToSql};

use modelgen_core::schema::Column;

impl ToSql for &Column {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = Ident(&self.name);
        let not_null = if self.nullable { "" } else { " NOT NULL" };
        let primary_key = if self.primary_key { " PRIMARY KEY" } else { "" };

        fmt!(f, name " " self.storage_ty.as_sql() not_null primary_key);
    }
}
