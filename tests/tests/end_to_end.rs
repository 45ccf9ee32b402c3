use modelgen::{Page, Record, Value};
use modelgen_codegen::{generate, Options};
use modelgen_sql::{Serializer, Statement};
use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, assert_some, plan, setup};

const ORGS: &str = r#"
entities:
  - name: Organization
    traits: [keys]
  - name: User
    traits: [keys]
    relations:
      - alias: Organization
        entity: Organization
        modifiers: [hasOne]
"#;

fn columns(plan: &modelgen::Plan, entity: &str) -> Vec<String> {
    let entity = plan.model.entity_by_name(entity).unwrap();
    entity.columns.iter().map(|c| c.name.clone()).collect()
}

#[test]
fn resolution_produces_consistent_artifacts() {
    let plan = plan(ORGS);

    assert_eq!(columns(&plan, "Organization"), ["id", "name"]);
    assert_eq!(columns(&plan, "User"), ["id", "name", "organization_id"]);

    let create = plan.operations.by_name("createUser").unwrap();
    assert_eq!(
        create.wire.signature(),
        "createUser(id: ID!, name: String!, organization: ID!): User!"
    );

    let user = plan.model.entity_by_name("User").unwrap();
    let persistence: Vec<_> = plan
        .operations
        .for_entity(user)
        .groups
        .iter()
        .map(|group| group.persistence.as_str())
        .collect();
    for name in ["InsertUser", "FindUserByID", "FindUserByName"] {
        assert!(persistence.contains(&name), "missing {name}");
    }

    let serializer = Serializer::sqlite(&plan.model);
    assert_eq!(
        serializer.serialize(&Statement::from(create.storage.clone())),
        "INSERT INTO users (id, name, organization_id) VALUES (?1, ?2, ?3)"
    );

    // Renderers reuse the same names
    let output = generate(&plan, &Options::default());
    let sdl = &output.file("schema.graphql").unwrap().contents;
    assert!(sdl.contains("  createUser(id: ID!, name: String!, organization: ID!): User!\n"));
    let native = &output.file("models/user.rs").unwrap().contents;
    assert!(native.contains("fn insert_user "));
    assert!(native.contains("fn find_user_by_name "));
}

#[tokio::test]
async fn insert_then_find_by_id() {
    let (db, _) = assert_ok!(setup(plan(ORGS), |_| {}).await);

    assert_ok!(
        db.persistence()
            .insert(
                "Organization",
                &Record::new().with("ID", "1").with("Name", "acme")
            )
            .await
    );
    assert_ok!(
        db.persistence()
            .insert(
                "User",
                &Record::new()
                    .with("ID", "1")
                    .with("Name", "ann")
                    .with_one("Organization", Record::reference("1"))
            )
            .await
    );

    let user = assert_ok!(db.persistence().find_by("User", "ID", "1").await);
    let organization = assert_some!(user.one("Organization"));
    assert_eq!(organization.id(), Some("1"));

    let err = assert_err!(db.persistence().find_by("User", "ID", "2").await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn users_of_an_organization() {
    let (db, _) = assert_ok!(setup(plan(ORGS), |_| {}).await);

    assert_ok!(
        db.create(
            "Organization",
            Record::new().with("ID", "1").with("Name", "acme")
        )
        .await
    );
    for (id, name) in [("1", "bob"), ("2", "ann")] {
        let user = Record::new()
            .with("ID", id)
            .with("Name", name)
            .with_one("Organization", Record::reference("1"));
        assert_ok!(db.create("User", user).await);
    }

    let users = assert_ok!(
        db.find_many_by("User", "Organization", "1", Page::first(10))
            .await
    );
    let names: Vec<_> = users.iter().map(|user| user.get("Name").clone()).collect();
    assert_eq!(names, [Value::from("ann"), Value::from("bob")]);
}
