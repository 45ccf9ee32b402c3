use modelgen_core::schema::{self, AttrType, Modifier, Model, ResolveOptions};
use std_util::{assert_err, assert_ok};

fn make_model(yaml: &str) -> Model {
    assert_ok!(schema::from_str(yaml, &ResolveOptions::default()))
}

fn attribute_summary(model: &Model, entity: &str) -> Vec<(String, AttrType, Vec<Modifier>)> {
    let entity = model.entity_by_name(entity).unwrap();
    entity
        .attributes
        .iter()
        .map(|a| (a.name.clone(), a.ty.clone(), a.modifiers.iter().collect()))
        .collect()
}

#[test]
fn keys_expands_to_id_then_name() {
    let model = make_model(
        r#"
entities:
  - name: Organization
    traits: [keys]
"#,
    );

    use Modifier::*;
    assert_eq!(
        attribute_summary(&model, "Organization"),
        [
            ("ID".to_string(), AttrType::Id, vec![Required, Unique, Indexed]),
            ("Name".to_string(), AttrType::String, vec![Required, Unique, Indexed]),
        ]
    );
}

#[test]
fn declared_members_come_before_trait_members() {
    let model = make_model(
        r#"
entities:
  - name: Poi
    traits: [id, timestamps]
    attributes:
      - name: Title
        type: String
"#,
    );

    let names: Vec<_> = model.entity_by_name("Poi").unwrap().attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Title", "ID", "CreatedAt", "UpdatedAt"]);

    let created = model.entity_by_name("Poi").unwrap().attribute_by_name("CreatedAt").unwrap();
    assert!(created.is_generated());
    assert!(created.is_required());
    assert_eq!(created.column, "created_at");
}

#[test]
fn authors_and_owner_add_user_relations() {
    let model = make_model(
        r#"
entities:
  - name: User
    traits: [id]
  - name: Document
    traits: [id, authors, owner]
"#,
    );

    let user = model.entity_by_name("User").unwrap();
    let document = model.entity_by_name("Document").unwrap();

    let relations: Vec<_> = document
        .relations
        .iter()
        .map(|r| (r.name.as_str(), r.column.as_deref(), r.is_generated(), r.target))
        .collect();

    assert_eq!(
        relations,
        [
            ("CreatedBy", Some("created_by_id"), true, user.id),
            ("UpdatedBy", Some("updated_by_id"), true, user.id),
            ("Owner", Some("owner_id"), false, user.id),
        ]
    );
}

#[test]
fn unknown_traits_are_ignored_by_default() {
    let model = make_model(
        r#"
entities:
  - name: Tag
    traits: [id, sparkles]
"#,
    );

    assert_eq!(model.entity_by_name("Tag").unwrap().attributes.len(), 1);
}

#[test]
fn unknown_traits_fail_in_strict_mode() {
    let options = ResolveOptions::default().strict_traits(true);
    let err = assert_err!(schema::from_str(
        "entities:\n  - name: Tag\n    traits: [id, sparkles]\n",
        &options
    ));

    assert_eq!(
        err.to_string(),
        "1 model error:\n  - entity `Tag` uses unknown trait `sparkles`"
    );
}

#[test]
fn duplicated_traits_append_twice() {
    let err = assert_err!(schema::from_str(
        "entities:\n  - name: Tag\n    traits: [id, id]\n",
        &ResolveOptions::default()
    ));

    // The second `ID` lands on the same column
    assert!(err.to_string().contains("entity `Tag` declares `id` more than once"));
}
