use super::{Db, Transaction};
use crate::{validate::validate, Page, Record, Result, Value};

use modelgen_core::{
    artifact::{ArtifactGroup, ArtifactKind, Select, StorageOp},
    driver::operation::Storage,
    err,
    schema::{ColumnId, Entity, Named},
    Error, Model,
};

/// Storage access per artifact group. Mutations run in their own
/// transaction; finders read directly.
#[derive(Debug, Clone, Copy)]
pub struct Persistence<'a> {
    pub(super) db: &'a Db,
}

impl Persistence<'_> {
    /// `Insert<Entity>`
    pub async fn insert(&self, entity: &str, record: &Record) -> Result<()> {
        let entity = self.db.entity(entity)?;
        let group = self.db.group(entity, ArtifactKind::Create)?;
        self.insert_record(entity, group, record).await
    }

    /// `Update<Entity>`. Every non-key column is overwritten.
    pub async fn update(&self, entity: &str, record: &Record) -> Result<()> {
        let entity = self.db.entity(entity)?;
        let group = self.db.group(entity, ArtifactKind::Update)?;
        self.update_record(entity, group, record).await
    }

    /// `Delete<Entity>`, returning the deleted record.
    pub async fn delete(&self, entity: &str, id: &str) -> Result<Record> {
        let entity = self.db.entity(entity)?;
        let group = self.db.group(entity, ArtifactKind::Delete)?;
        self.delete_record(entity, group, id).await
    }

    /// `Find<Entity>By<Attribute>`
    pub async fn find_by(
        &self,
        entity: &str,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<Record> {
        let entity = self.db.entity(entity)?;
        let attribute = entity
            .attribute_by_name(attribute)
            .ok_or_else(|| err!("entity `{}` has no attribute `{attribute}`", entity.name))?;
        let group = self.db.group(
            entity,
            ArtifactKind::FindBy {
                attribute: attribute.id,
            },
        )?;
        self.find_one(group, value.into()).await
    }

    /// `Find<Plural>By<Relation>`, keyed by the related record's `ID`.
    pub async fn find_many_by(
        &self,
        entity: &str,
        relation: &str,
        id: &str,
        page: Page,
    ) -> Result<Vec<Record>> {
        let entity = self.db.entity(entity)?;
        let relation = entity
            .relation_by_name(relation)
            .ok_or_else(|| err!("entity `{}` has no relation `{relation}`", entity.name))?;
        let group = self.db.group(
            entity,
            ArtifactKind::FindManyBy {
                relation: relation.id,
            },
        )?;
        self.find_many(group, vec![Value::from(id)], page).await
    }

    /// `FindAll<Plural>`
    pub async fn find_all(&self, entity: &str, page: Page) -> Result<Vec<Record>> {
        let entity = self.db.entity(entity)?;
        let group = self.db.group(entity, ArtifactKind::FindAll)?;
        self.find_many(group, vec![], page).await
    }

    pub(super) async fn insert_record(
        &self,
        entity: &Entity,
        group: &ArtifactGroup,
        record: &Record,
    ) -> Result<()> {
        let model = self.db.model();
        validate(model, entity, record)?;

        let StorageOp::Insert { columns, .. } = &group.storage else {
            return Err(mismatch(group));
        };
        let params = column_values(model, columns, record);

        let mut tx = self.begin().await?;
        let result = tx
            .exec(Storage {
                op: group.storage.clone(),
                params,
            })
            .await
            .map(|_| ());
        tx.finish(result).await
    }

    pub(super) async fn update_record(
        &self,
        entity: &Entity,
        group: &ArtifactGroup,
        record: &Record,
    ) -> Result<()> {
        let model = self.db.model();
        validate(model, entity, record)?;

        let StorageOp::Update { columns, key, .. } = &group.storage else {
            return Err(mismatch(group));
        };
        let mut params = column_values(model, columns, record);
        params.push(column_value(model, *key, record));

        let mut tx = self.begin().await?;
        let result: Result<()> = async {
            let count = tx
                .exec(Storage {
                    op: group.storage.clone(),
                    params,
                })
                .await?
                .rows
                .into_count()?;

            if count == 0 {
                return Err(not_found(entity, record.get("ID")));
            }

            Ok(())
        }
        .await;
        tx.finish(result).await
    }

    pub(super) async fn delete_record(
        &self,
        entity: &Entity,
        group: &ArtifactGroup,
        id: &str,
    ) -> Result<Record> {
        let StorageOp::Delete { key, .. } = &group.storage else {
            return Err(mismatch(group));
        };
        let key = *key;
        let select = by_key(entity, key);

        let mut tx = self.begin().await?;
        let result: Result<Record> = async {
            let rows = tx
                .exec(Storage {
                    op: StorageOp::Select(select.clone()),
                    params: vec![Value::from(id)],
                })
                .await?
                .rows
                .into_values()?;

            let Some(row) = rows.into_iter().next() else {
                return Err(not_found(entity, &Value::from(id)));
            };

            tx.exec(Storage {
                op: group.storage.clone(),
                params: vec![Value::from(id)],
            })
            .await?;

            Ok(record_from_row(self.db.model(), &select.columns, row))
        }
        .await;
        tx.finish(result).await
    }

    pub(super) async fn find_one(&self, group: &ArtifactGroup, value: Value) -> Result<Record> {
        let StorageOp::Select(select) = &group.storage else {
            return Err(mismatch(group));
        };

        let rows = self.select(select, vec![value.clone()]).await?;
        let model = self.db.model();

        match rows.into_iter().next() {
            Some(row) => Ok(record_from_row(model, &select.columns, row)),
            None => {
                let entity = model.entity(select.entity);
                let column = select.filter.map(|column| model.column(column).name.as_str());
                Err(Error::record_not_found(format!(
                    "table={} {}={value}",
                    entity.table,
                    column.unwrap_or("key")
                )))
            }
        }
    }

    pub(super) async fn find_many(
        &self,
        group: &ArtifactGroup,
        mut params: Vec<Value>,
        page: Page,
    ) -> Result<Vec<Record>> {
        let StorageOp::Select(select) = &group.storage else {
            return Err(mismatch(group));
        };

        params.push(Value::from(page.limit));
        params.push(Value::from(page.offset));

        let model = self.db.model();
        let rows = self.select(select, params).await?;

        Ok(rows
            .into_iter()
            .map(|row| record_from_row(model, &select.columns, row))
            .collect())
    }

    async fn select(&self, select: &Select, params: Vec<Value>) -> Result<Vec<Vec<Value>>> {
        let mut conn = self.db.shared.connection.lock().await;
        let response = conn
            .exec(
                self.db.model(),
                Storage {
                    op: StorageOp::Select(select.clone()),
                    params,
                }
                .into(),
            )
            .await?;
        response.rows.into_values()
    }

    async fn begin(&self) -> Result<Transaction<'_>> {
        let conn = self.db.shared.connection.lock().await;
        Transaction::begin(conn, self.db.model()).await
    }
}

/// `SELECT <every column> WHERE <key> = ?`
fn by_key(entity: &Entity, key: ColumnId) -> Select {
    Select {
        entity: entity.id,
        columns: entity.columns.iter().map(|column| column.id).collect(),
        filter: Some(key),
        order_by: None,
        paginate: false,
    }
}

fn column_values(model: &Model, columns: &[ColumnId], record: &Record) -> Vec<Value> {
    columns
        .iter()
        .map(|column| column_value(model, *column, record))
        .collect()
}

/// Attribute columns read the attribute value, foreign key columns the
/// related record's `ID`.
fn column_value(model: &Model, column: ColumnId, record: &Record) -> Value {
    match model.field(model.column(column).field) {
        Named::Attribute(attribute) => record.get(&attribute.name).clone(),
        Named::Relation(relation) => record.related_id(&relation.name).into(),
    }
}

fn record_from_row(model: &Model, columns: &[ColumnId], row: Vec<Value>) -> Record {
    let mut record = Record::new();

    for (column, value) in columns.iter().zip(row) {
        match model.field(model.column(*column).field) {
            Named::Attribute(attribute) => record.set(attribute.name.as_str(), value),
            Named::Relation(relation) => {
                if let Value::String(id) = value {
                    record.set_one(relation.name.as_str(), Record::reference(id));
                }
            }
        }
    }

    record
}

fn not_found(entity: &Entity, key: &Value) -> Error {
    Error::record_not_found(format!("table={} id={key}", entity.table))
}

fn mismatch(group: &ArtifactGroup) -> Error {
    err!(
        "`{}` does not have a {:?} storage statement",
        group.persistence,
        group.kind
    )
}
