use super::{Comma, Formatter, Ident, Placeholder, ToSql};

use crate::stmt::{self, Statement};

use modelgen_core::artifact::{Select, StorageOp};

/// `FOREIGN KEY (<column>) REFERENCES <table>(id)`
struct ForeignKey<'a> {
    column: Ident<&'a str>,
    table: Ident<&'a str>,
}

/// `<column> = <placeholder>`
struct Assignment<'a> {
    column: Ident<&'a str>,
    value: Placeholder,
}

enum TableElement<'a> {
    Column(&'a modelgen_core::schema::Column),
    ForeignKey(ForeignKey<'a>),
}

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::AddForeignKey(stmt) => stmt.to_sql(f),
            Statement::CreateIndex(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::Pragma(stmt) => stmt.to_sql(f),
            Statement::Storage(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let serializer = f.serializer;
        let entity = serializer.entity(self.entity);
        let table_name = serializer.table_name(self.entity);

        let mut elements: Vec<_> = entity.columns.iter().map(TableElement::Column).collect();

        if self.inline_foreign_keys {
            elements.extend(entity.columns.iter().filter_map(|column| {
                let target = column.references?;
                Some(TableElement::ForeignKey(ForeignKey {
                    column: Ident(column.name.as_str()),
                    table: serializer.table_name(target),
                }))
            }));
        }

        fmt!(f, "CREATE TABLE " table_name " (" Comma(elements) ")");
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table_name = Ident(&self.name);
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let cascade = if self.cascade { " CASCADE" } else { "" };

        fmt!(f, "DROP TABLE " if_exists table_name cascade);
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let index_name = Ident(&self.name);
        let table_name = f.serializer.table_name(self.on);
        let column_name = f.serializer.column_name(self.column);
        let unique = if self.unique { "UNIQUE " } else { "" };

        fmt!(f, "CREATE " unique "INDEX " index_name " ON " table_name " (" column_name ")");
    }
}

impl ToSql for &stmt::AddForeignKey {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table_name = f.serializer.table_name(self.on);
        let constraint_name = Ident(&self.name);
        let foreign_key = ForeignKey {
            column: f.serializer.column_name(self.column),
            table: f.serializer.table_name(self.references),
        };

        fmt!(f, "ALTER TABLE " table_name " ADD CONSTRAINT " constraint_name " " foreign_key);
    }
}

impl ToSql for &stmt::Pragma {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "PRAGMA " Ident(&self.name) " = " Ident(&self.value));
    }
}

impl ToSql for &StorageOp {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let serializer = f.serializer;
        let table_name = serializer.table_name(self.entity());

        match self {
            StorageOp::Insert { columns, .. } => {
                let names = columns.iter().map(|column| serializer.column_name(*column));
                let values: Vec<_> = columns.iter().map(|_| f.placeholder()).collect();

                fmt!(f, "INSERT INTO " table_name " (" Comma(names) ") VALUES (" Comma(values) ")");
            }
            StorageOp::Update { columns, key, .. } => {
                let assignments: Vec<_> = columns
                    .iter()
                    .map(|column| Assignment {
                        column: serializer.column_name(*column),
                        value: f.placeholder(),
                    })
                    .collect();
                let key = Assignment {
                    column: serializer.column_name(*key),
                    value: f.placeholder(),
                };

                fmt!(f, "UPDATE " table_name " SET " Comma(assignments) " WHERE " key);
            }
            StorageOp::Delete { key, .. } => {
                let key = Assignment {
                    column: serializer.column_name(*key),
                    value: f.placeholder(),
                };

                fmt!(f, "DELETE FROM " table_name " WHERE " key);
            }
            StorageOp::Select(select) => select.to_sql(f),
        }
    }
}

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let serializer = f.serializer;
        let table_name = serializer.table_name(self.entity);
        let columns = Comma(
            self.columns
                .iter()
                .map(|column| serializer.column_name(*column)),
        );

        fmt!(f, "SELECT " columns " FROM " table_name);

        if let Some(filter) = self.filter {
            let filter = Assignment {
                column: serializer.column_name(filter),
                value: f.placeholder(),
            };
            fmt!(f, " WHERE " filter);
        }

        if let Some(order_by) = self.order_by {
            fmt!(f, " ORDER BY " serializer.column_name(order_by));
        }

        if self.paginate {
            let limit = f.placeholder();
            let offset = f.placeholder();
            fmt!(f, " LIMIT " limit " OFFSET " offset);
        }
    }
}

impl ToSql for ForeignKey<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "FOREIGN KEY (" self.column ") REFERENCES " self.table "(id)");
    }
}

impl ToSql for Assignment<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, self.column " = " self.value);
    }
}

impl ToSql for TableElement<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            TableElement::Column(column) => column.to_sql(f),
            TableElement::ForeignKey(foreign_key) => foreign_key.to_sql(f),
        }
    }
}
