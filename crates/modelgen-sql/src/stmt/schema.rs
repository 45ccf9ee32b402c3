use super::Statement;
use crate::Flavor;

use modelgen_core::Model;

impl Statement {
    /// Every statement needed to (re)create the model's storage, in execution
    /// order: tables, then indices and constraints, then connection setup.
    pub fn schema(model: &Model, flavor: Flavor) -> Vec<Statement> {
        let mut stmts = vec![];

        for entity in &model.entities {
            stmts.push(Statement::drop_table_if_exists(
                entity,
                flavor.is_postgresql(),
            ));
            stmts.push(Statement::create_table(entity, flavor.is_sqlite()));
        }

        for entity in &model.entities {
            for attribute in &entity.attributes {
                if !attribute.is_id() && attribute.wants_index() {
                    stmts.push(Statement::create_index(entity, attribute));
                }
            }

            // SQLite cannot add constraints to an existing table; they are
            // inlined in `CREATE TABLE` instead.
            if !flavor.is_sqlite() {
                stmts.extend(
                    entity
                        .columns
                        .iter()
                        .filter_map(|column| Statement::add_foreign_key(entity, column)),
                );
            }
        }

        if flavor.is_sqlite() {
            stmts.push(Statement::pragma_enable_foreign_keys());
        }

        stmts
    }
}
