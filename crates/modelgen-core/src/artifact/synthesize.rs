use super::{
    ArtifactGroup, ArtifactId, ArtifactKind, Metrics, OperationSet, OperationSets, Select, Step,
    StorageOp, WireArg, WireKind, WireOperation, WireType,
};
use crate::{
    metrics::LATENCY_BUCKETS,
    schema::{ColumnId, Entity, FieldId, Lifecycle, Named, Operation},
    Error, MetricsRegistry, Model, ModelError, Result,
};

use heck::ToSnakeCase;

/// Enumerate the artifact groups of every entity and register their metrics.
///
/// Per entity the order is: create, update, delete, then one single-row
/// finder per unique and indexed attribute, one paginated finder per
/// singular relation, and the paginated find-all. Operations the entity does
/// not support produce nothing.
pub fn synthesize(model: &Model, registry: &mut MetricsRegistry) -> Result<OperationSets> {
    let mut errors = vec![];
    let mut sets = vec![];

    for entity in &model.entities {
        let mut cx = EntitySynth {
            entity,
            groups: vec![],
        };

        cx.synthesize();

        for group in &cx.groups {
            if let Err(err) = register_metrics(registry, entity, &group.metrics) {
                errors.push(err);
            }
        }

        log::debug!(
            "synthesized operation set; entity={} groups={}",
            entity.name,
            cx.groups.len()
        );

        sets.push(OperationSet {
            entity: entity.id,
            groups: cx.groups,
        });
    }

    if !errors.is_empty() {
        return Err(Error::model_errors(errors));
    }

    Ok(OperationSets::new(sets))
}

fn register_metrics(
    registry: &mut MetricsRegistry,
    entity: &Entity,
    metrics: &Metrics,
) -> Result<()> {
    for name in [&metrics.histogram, &metrics.counter] {
        if registry.contains(name) {
            return Err(Error::model(ModelError::NamingCollision {
                entity: entity.name.clone(),
                name: name.clone(),
            }));
        }
    }

    registry.register_histogram(
        &metrics.histogram,
        &metrics.histogram_help,
        &LATENCY_BUCKETS,
    )?;
    registry.register_counter(&metrics.counter, &metrics.counter_help)?;
    Ok(())
}

struct EntitySynth<'a> {
    entity: &'a Entity,
    groups: Vec<ArtifactGroup>,
}

impl EntitySynth<'_> {
    fn synthesize(&mut self) {
        let entity = self.entity;

        for operation in [Operation::Create, Operation::Update, Operation::Delete] {
            if entity.supports(operation) {
                self.mutation(operation);
            }
        }

        if !entity.supports(Operation::Find) {
            return;
        }

        for attribute in entity.attributes.iter().filter(|a| a.is_finder_key()) {
            self.push(
                ArtifactKind::FindBy {
                    attribute: attribute.id,
                },
                Operation::Find,
                StorageOp::Select(Select {
                    entity: entity.id,
                    columns: self.all_columns(),
                    filter: Some(attribute.column_id),
                    order_by: None,
                    paginate: false,
                }),
                WireOperation {
                    name: format!("find{}By{}", entity.name, attribute.name),
                    kind: WireKind::Query,
                    args: vec![WireArg {
                        name: attribute.wire_name.clone(),
                        ty: attribute.ty.mapping().wire.to_string(),
                        field: Some(FieldId::Attribute(attribute.id)),
                    }],
                    returns: WireType::one(&entity.name),
                },
                format!("Find{}By{}", entity.name, attribute.name),
                &format!("find entities of type {} by {}", entity.name, attribute.name),
                &format!("finding entities of type {} by {}", entity.name, attribute.name),
                vec![Step::Persist],
            );
        }

        let sort = entity.preferred_sort().column_id;

        for relation in entity.singular_relations() {
            let Some(column) = relation.column_id else {
                continue;
            };

            let mut args = vec![WireArg {
                name: relation.wire_name.clone(),
                ty: "ID".to_string(),
                field: Some(FieldId::Relation(relation.id)),
            }];
            args.extend(pagination());

            self.push(
                ArtifactKind::FindManyBy {
                    relation: relation.id,
                },
                Operation::Find,
                StorageOp::Select(Select {
                    entity: entity.id,
                    columns: self.all_columns(),
                    filter: Some(column),
                    order_by: Some(sort),
                    paginate: true,
                }),
                WireOperation {
                    name: format!("find{}By{}", entity.plural, relation.name),
                    kind: WireKind::Query,
                    args,
                    returns: WireType::many(&entity.name),
                },
                format!("Find{}By{}", entity.plural, relation.name),
                &format!("find entities of type {} by {}", entity.name, relation.name),
                &format!("finding entities of type {} by {}", entity.name, relation.name),
                vec![Step::Persist],
            );
        }

        self.push(
            ArtifactKind::FindAll,
            Operation::Find,
            StorageOp::Select(Select {
                entity: entity.id,
                columns: self.all_columns(),
                filter: None,
                order_by: Some(sort),
                paginate: true,
            }),
            WireOperation {
                name: format!("findAll{}", entity.plural),
                kind: WireKind::Query,
                args: pagination().collect(),
                returns: WireType::many(&entity.name),
            },
            format!("FindAll{}", entity.plural),
            &format!("find entities of type {} by all", entity.name),
            &format!("finding entities of type {} by all", entity.name),
            vec![Step::Persist],
        );
    }

    fn mutation(&mut self, operation: Operation) {
        let entity = self.entity;
        let key = entity.primary_key_column().id;

        let (kind, storage, args, persistence, verb, gerund) = match operation {
            Operation::Create => (
                ArtifactKind::Create,
                StorageOp::Insert {
                    entity: entity.id,
                    columns: self.all_columns(),
                },
                self.input_args(),
                format!("Insert{}", entity.name),
                "create",
                "creating",
            ),
            Operation::Update => (
                ArtifactKind::Update,
                StorageOp::Update {
                    entity: entity.id,
                    columns: entity
                        .columns
                        .iter()
                        .filter(|column| !column.primary_key)
                        .map(|column| column.id)
                        .collect(),
                    key,
                },
                self.input_args(),
                format!("Update{}", entity.name),
                "update",
                "updating",
            ),
            Operation::Delete => {
                let id = entity.primary_key();
                (
                    ArtifactKind::Delete,
                    StorageOp::Delete {
                        entity: entity.id,
                        key,
                    },
                    vec![WireArg {
                        name: id.wire_name.clone(),
                        ty: id.ty.mapping().wire.to_string(),
                        field: Some(FieldId::Attribute(id.id)),
                    }],
                    format!("Delete{}", entity.name),
                    "delete",
                    "deleting",
                )
            }
            Operation::Find => return,
        };

        let pipeline = self.pipeline(operation);

        self.push(
            kind,
            operation,
            storage,
            WireOperation {
                name: format!("{}{}", operation.as_str(), entity.name),
                kind: WireKind::Mutation,
                args,
                returns: WireType::one(&entity.name),
            },
            persistence,
            &format!("{verb} entities of type {}", entity.name),
            &format!("{gerund} entities of type {}", entity.name),
            pipeline,
        );
    }

    /// Generators (create and update only), then the before hook, the
    /// persistence call and the after hook.
    fn pipeline(&self, operation: Operation) -> Vec<Step> {
        let entity = self.entity;
        let mut steps = vec![];

        if operation != Operation::Delete {
            let fields = entity
                .attributes
                .iter()
                .map(Named::Attribute)
                .chain(entity.relations.iter().map(Named::Relation));

            for field in fields.filter(|field| field.is_generated()) {
                steps.push(Step::Generate {
                    field: field.id(),
                    function: format!(
                        "Generate{}{}On{}",
                        entity.name,
                        field.canonical_name(),
                        operation.camel()
                    ),
                });
            }
        }

        let hook = |lifecycle: Lifecycle| {
            format!("{}{}{}", lifecycle.camel(), operation.camel(), entity.name)
        };

        if entity.hooks.has(operation, Lifecycle::Before) {
            steps.push(Step::Before {
                function: hook(Lifecycle::Before),
            });
        }

        steps.push(Step::Persist);

        if entity.hooks.has(operation, Lifecycle::After) {
            steps.push(Step::After {
                function: hook(Lifecycle::After),
            });
        }

        steps
    }

    /// Non-generated attributes, then non-generated singular relations as
    /// foreign keys.
    fn input_args(&self) -> Vec<WireArg> {
        let entity = self.entity;

        let attributes = entity
            .attributes
            .iter()
            .filter(|attribute| !attribute.is_generated())
            .map(|attribute| WireArg {
                name: attribute.wire_name.clone(),
                ty: attribute.ty.mapping().wire.to_string(),
                field: Some(FieldId::Attribute(attribute.id)),
            });

        let relations = entity
            .singular_relations()
            .filter(|relation| !relation.is_generated())
            .map(|relation| WireArg {
                name: relation.wire_name.clone(),
                ty: "ID".to_string(),
                field: Some(FieldId::Relation(relation.id)),
            });

        attributes.chain(relations).collect()
    }

    fn all_columns(&self) -> Vec<ColumnId> {
        self.entity.columns.iter().map(|column| column.id).collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        kind: ArtifactKind,
        operation: Operation,
        storage: StorageOp,
        wire: WireOperation,
        persistence: String,
        latency_subject: &str,
        error_subject: &str,
        pipeline: Vec<Step>,
    ) {
        let metrics = Metrics {
            histogram: format!("{}Latencies", wire.name).to_snake_case(),
            histogram_help: format!("Elapsed time in milliseconds to {latency_subject}"),
            counter: format!("{}Errors", wire.name).to_snake_case(),
            counter_help: format!("Errors when {error_subject}"),
        };

        let id = ArtifactId {
            entity: self.entity.id,
            index: self.groups.len(),
        };

        self.groups.push(ArtifactGroup {
            id,
            kind,
            operation,
            storage,
            resolver: wire.name.clone(),
            wire,
            persistence,
            metrics,
            pipeline,
        });
    }
}

fn pagination() -> impl Iterator<Item = WireArg> {
    ["limit", "offset"].into_iter().map(|name| WireArg {
        name: name.to_string(),
        ty: "Int".to_string(),
        field: None,
    })
}
