//! Resolvers: one per wire operation. Mutations run the artifact group's
//! pipeline; every resolver observes the group's latency histogram and
//! counts its failures.

use super::Db;
use crate::{Page, Record, Result, Value};

use modelgen_core::{
    artifact::{ArtifactGroup, ArtifactKind, Step},
    bail, err,
    schema::{Entity, FieldId, Named},
    Error, Model,
};

impl Db {
    /// `create<Entity>`
    pub async fn create(&self, entity: &str, record: Record) -> Result<Record> {
        let entity = self.entity(entity)?;
        let group = self.group(entity, ArtifactKind::Create)?;
        self.instrument(group, self.run_pipeline(entity, group, record))
            .await
    }

    /// `update<Entity>`. The record must carry its `ID`.
    pub async fn update(&self, entity: &str, record: Record) -> Result<Record> {
        let entity = self.entity(entity)?;
        let group = self.group(entity, ArtifactKind::Update)?;
        self.instrument(group, self.run_pipeline(entity, group, record))
            .await
    }

    /// `delete<Entity>`. Before hooks see a copy of a record holding only
    /// the `ID`; after hooks see the deleted record.
    pub async fn delete(&self, entity: &str, id: &str) -> Result<Record> {
        let entity = self.entity(entity)?;
        let group = self.group(entity, ArtifactKind::Delete)?;
        self.instrument(
            group,
            self.run_pipeline(entity, group, Record::reference(id)),
        )
        .await
    }

    /// `find<Entity>By<Attribute>`
    pub async fn find_by(
        &self,
        entity: &str,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<Record> {
        let entity = self.entity(entity)?;
        let Some(attribute) = entity.attribute_by_name(attribute) else {
            bail!("entity `{}` has no attribute `{attribute}`", entity.name);
        };
        let group = self.group(
            entity,
            ArtifactKind::FindBy {
                attribute: attribute.id,
            },
        )?;

        let persistence = self.persistence();
        let find = persistence.find_one(group, value.into());
        self.instrument(group, async { find.await.map_err(|e| called(e, group)) })
            .await
    }

    /// `find<Plural>By<Relation>`
    pub async fn find_many_by(
        &self,
        entity: &str,
        relation: &str,
        id: &str,
        page: Page,
    ) -> Result<Vec<Record>> {
        let entity = self.entity(entity)?;
        let Some(relation) = entity.relation_by_name(relation) else {
            bail!("entity `{}` has no relation `{relation}`", entity.name);
        };
        let group = self.group(
            entity,
            ArtifactKind::FindManyBy {
                relation: relation.id,
            },
        )?;

        let persistence = self.persistence();
        let find = persistence.find_many(group, vec![Value::from(id)], page);
        self.instrument(group, async { find.await.map_err(|e| called(e, group)) })
            .await
    }

    /// `findAll<Plural>`
    pub async fn find_all(&self, entity: &str, page: Page) -> Result<Vec<Record>> {
        let entity = self.entity(entity)?;
        let group = self.group(entity, ArtifactKind::FindAll)?;

        let persistence = self.persistence();
        let find = persistence.find_many(group, vec![], page);
        self.instrument(group, async { find.await.map_err(|e| called(e, group)) })
            .await
    }

    /// Load a hasMany relation of `record` through the singular relation on
    /// the target entity that points back at it.
    pub async fn find_related(
        &self,
        entity: &str,
        record: &Record,
        relation: &str,
        page: Page,
    ) -> Result<Vec<Record>> {
        let entity = self.entity(entity)?;
        let Some(relation) = entity.relation_by_name(relation) else {
            bail!("entity `{}` has no relation `{relation}`", entity.name);
        };

        if !relation.is_many() {
            bail!(
                "relation `{}.{}` is not a hasMany relation",
                entity.name,
                relation.name
            );
        }

        let Some(pair) = relation.pair else {
            bail!(
                "relation `{}.{}` has no back-reference on `{}`",
                entity.name,
                relation.name,
                relation.target_name
            );
        };

        let Some(id) = record.id() else {
            return Err(Error::validation(
                format!("{}.ID", entity.name),
                "a value is required",
            ));
        };

        let model = self.model();
        let target = model.entity(relation.target);
        self.find_many_by(&target.name, &model.relation(pair).name, id, page)
            .await
    }

    async fn run_pipeline(
        &self,
        entity: &Entity,
        group: &ArtifactGroup,
        mut record: Record,
    ) -> Result<Record> {
        let functions = &self.shared.functions;

        for step in &group.pipeline {
            match step {
                Step::Generate { field, function } => {
                    let generator = functions.generator(function)?;
                    let value = generator(self.clone(), record.clone())
                        .await
                        .map_err(|e| calling(e, function))?;
                    assign(self.model(), &mut record, *field, value)
                        .map_err(|e| calling(e, function))?;
                }
                Step::Before { function } if group.kind == ArtifactKind::Delete => {
                    let hook = functions.hook(function)?;
                    hook(&mut record.clone()).map_err(|e| calling(e, function))?;
                }
                Step::Before { function } | Step::After { function } => {
                    let hook = functions.hook(function)?;
                    hook(&mut record).map_err(|e| calling(e, function))?;
                }
                Step::Persist => {
                    record = self
                        .persist(entity, group, record)
                        .await
                        .map_err(|e| called(e, group))?;
                }
            }
        }

        Ok(record)
    }

    async fn persist(
        &self,
        entity: &Entity,
        group: &ArtifactGroup,
        record: Record,
    ) -> Result<Record> {
        let persistence = self.persistence();

        match group.kind {
            ArtifactKind::Create => {
                persistence.insert_record(entity, group, &record).await?;
                Ok(record)
            }
            ArtifactKind::Update => {
                persistence.update_record(entity, group, &record).await?;
                Ok(record)
            }
            ArtifactKind::Delete => {
                let Some(id) = record.id() else {
                    return Err(Error::validation(
                        format!("{}.ID", entity.name),
                        "a value is required",
                    ));
                };
                persistence.delete_record(entity, group, id).await
            }
            _ => bail!("`{}` is not a mutation", group.resolver),
        }
    }
}

/// Store a generated value on its field. Relation generators produce the
/// target's `ID`.
fn assign(model: &Model, record: &mut Record, field: FieldId, value: Value) -> Result<()> {
    match model.field(field) {
        Named::Attribute(attribute) => record.set(attribute.name.as_str(), value),
        Named::Relation(relation) => match value {
            Value::Null => {
                record.remove_related(&relation.name);
            }
            Value::String(id) => record.set_one(relation.name.as_str(), Record::reference(id)),
            value => {
                return Err(Error::validation(
                    relation.name.as_str(),
                    format!("expected an ID, got {}", value.type_name()),
                ))
            }
        },
    }

    Ok(())
}

fn calling(err: Error, function: &str) -> Error {
    err.context(err!("calling {function}"))
}

fn called(err: Error, group: &ArtifactGroup) -> Error {
    calling(err, &group.persistence)
}
