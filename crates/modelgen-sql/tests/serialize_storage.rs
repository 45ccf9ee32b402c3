use modelgen_core::{schema::ResolveOptions, Plan};
use modelgen_sql::{Serializer, Statement};
use pretty_assertions::assert_eq;
use std_util::assert_ok;

fn make_plan() -> Plan {
    assert_ok!(Plan::from_yaml(
        r#"
entities:
  - name: Organization
    traits: [keys]
  - name: User
    traits: [keys]
    relations:
      - alias: Organization
        entity: Organization
        modifiers: [hasOne]
"#,
        &ResolveOptions::default()
    ))
}

fn serialize(serializer: &Serializer<'_>, plan: &Plan, operation: &str) -> String {
    let group = plan.operations.by_name(operation).unwrap();
    serializer.serialize(&Statement::from(group.storage.clone()))
}

#[test]
fn sqlite_statements() {
    let plan = make_plan();
    let serializer = Serializer::sqlite(&plan.model);
    let sql = |operation: &str| serialize(&serializer, &plan, operation);

    assert_eq!(
        sql("createUser"),
        "INSERT INTO users (id, name, organization_id) VALUES (?1, ?2, ?3)"
    );
    assert_eq!(
        sql("updateUser"),
        "UPDATE users SET name = ?1, organization_id = ?2 WHERE id = ?3"
    );
    assert_eq!(sql("deleteUser"), "DELETE FROM users WHERE id = ?1");
    assert_eq!(
        sql("findUserByName"),
        "SELECT id, name, organization_id FROM users WHERE name = ?1"
    );
    assert_eq!(
        sql("findUsersByOrganization"),
        "SELECT id, name, organization_id FROM users WHERE organization_id = ?1 ORDER BY name LIMIT ?2 OFFSET ?3"
    );
    assert_eq!(
        sql("findAllUsers"),
        "SELECT id, name, organization_id FROM users ORDER BY name LIMIT ?1 OFFSET ?2"
    );
}

#[test]
fn postgresql_placeholders() {
    let plan = make_plan();
    let serializer = Serializer::postgresql(&plan.model);

    assert_eq!(
        serialize(&serializer, &plan, "updateOrganization"),
        "UPDATE organizations SET name = $1 WHERE id = $2"
    );
    assert_eq!(
        serialize(&serializer, &plan, "findAllOrganizations"),
        "SELECT id, name FROM organizations ORDER BY name LIMIT $1 OFFSET $2"
    );
}

#[test]
fn placeholder_count_matches_params() {
    let plan = make_plan();
    let serializer = Serializer::sqlite(&plan.model);

    for group in plan.operations.groups() {
        let sql = serializer.serialize(&Statement::from(group.storage.clone()));
        let count = sql.matches('?').count();
        assert_eq!(count, group.storage.param_count(), "{sql}");
    }
}
