use modelgen::{db::Builder, err, schema::ResolveOptions, Db, Page, Plan, Record, Value};
use pretty_assertions::assert_eq;
use std_util::{assert_err, assert_ok};

const NOW: &str = "2024-05-01T12:00:00Z";

const ORGS: &str = r#"
types:
  - name: Role
    type: enum
    values: [Admin, Member]
entities:
  - name: Organization
    traits: [keys]
    relations:
      - entity: User
        modifiers: [hasMany]
  - name: User
    traits: [keys, timestamps]
    attributes:
      - name: Role
        type: Role
    relations:
      - alias: Organization
        entity: Organization
        modifiers: [hasOne]
"#;

fn make_plan(yaml: &str) -> Plan {
    assert_ok!(Plan::from_yaml(yaml, &ResolveOptions::default()))
}

fn with_timestamps(builder: &mut Builder) -> &mut Builder {
    for operation in ["Create", "Update"] {
        for field in ["CreatedAt", "UpdatedAt"] {
            builder.generator(format!("GenerateUser{field}On{operation}"), |_, _| async {
                Ok(Value::from(NOW))
            });
        }
    }
    builder
}

async fn make_db() -> Db {
    let db = assert_ok!(
        with_timestamps(Db::builder().plan(make_plan(ORGS)))
            .connect("sqlite::memory:")
            .await
    );
    assert_ok!(db.push_schema().await);
    db
}

fn user(id: &str, name: &str) -> Record {
    Record::new()
        .with("ID", id)
        .with("Name", name)
        .with("Role", "Member")
        .with_one("Organization", Record::reference("1"))
}

async fn create_org(db: &Db, id: &str, name: &str) {
    assert_ok!(
        db.create("Organization", Record::new().with("ID", id).with("Name", name))
            .await
    );
}

#[tokio::test]
async fn create_then_find_by_id() {
    let db = make_db().await;
    create_org(&db, "1", "acme").await;

    let created = assert_ok!(db.create("User", user("1", "ann")).await);
    assert_eq!(created.get("CreatedAt"), &Value::from(NOW));

    let found = assert_ok!(db.find_by("User", "ID", "1").await);
    assert_eq!(found.get("Name"), &Value::from("ann"));
    assert_eq!(found.get("Role"), &Value::from("Member"));
    assert_eq!(found.get("UpdatedAt"), &Value::from(NOW));
    assert_eq!(found.related_id("Organization"), Some("1"));

    let by_name = assert_ok!(db.find_by("User", "Name", "ann").await);
    assert_eq!(by_name, found);
}

#[tokio::test]
async fn missing_records_are_not_found_errors() {
    let db = make_db().await;

    let err = assert_err!(db.find_by("User", "ID", "404").await);
    assert!(err.root().is_record_not_found());
    assert_eq!(
        err.to_string(),
        "calling FindUserByID: record not found: table=users id=\"404\""
    );

    let err = assert_err!(db.update("User", user("404", "nobody")).await);
    assert!(err.root().is_record_not_found());

    let err = assert_err!(db.delete("User", "404").await);
    assert!(err.root().is_record_not_found());
    assert_eq!(
        db.metrics().counter("delete_user_errors").unwrap().get(),
        1
    );
}

#[tokio::test]
async fn update_overwrites_columns() {
    let db = make_db().await;
    create_org(&db, "1", "acme").await;
    create_org(&db, "2", "globex").await;
    assert_ok!(db.create("User", user("1", "ann")).await);

    let moved = user("1", "ann")
        .with("Role", "Admin")
        .with_one("Organization", Record::reference("2"));
    assert_ok!(db.update("User", moved).await);

    let found = assert_ok!(db.find_by("User", "ID", "1").await);
    assert_eq!(found.get("Role"), &Value::from("Admin"));
    assert_eq!(found.related_id("Organization"), Some("2"));
}

#[tokio::test]
async fn delete_returns_the_deleted_record() {
    let db = make_db().await;
    create_org(&db, "1", "acme").await;
    assert_ok!(db.create("User", user("1", "ann")).await);

    let deleted = assert_ok!(db.delete("User", "1").await);
    assert_eq!(deleted.get("Name"), &Value::from("ann"));
    assert_eq!(deleted.related_id("Organization"), Some("1"));

    assert_err!(db.find_by("User", "ID", "1").await);
}

#[tokio::test]
async fn values_are_validated_before_persistence() {
    let db = make_db().await;
    create_org(&db, "1", "acme").await;

    let err = assert_err!(db.create("User", user("1", "ann").with("Role", "Owner")).await);
    assert!(err.root().is_validation());
    assert_eq!(
        err.to_string(),
        "calling InsertUser: invalid value for `User.Role`: `Owner` is not a value of `Role`"
    );

    let err = assert_err!(db.create("User", user("1", "ann").with("Name", Value::Null)).await);
    assert!(err.root().is_validation());

    let err = assert_err!(db.create("User", user("1", "ann").with("Name", 7)).await);
    assert_eq!(
        err.root().to_string(),
        "invalid value for `User.Name`: expected string, got i32"
    );

    assert_eq!(db.metrics().counter("create_user_errors").unwrap().get(), 3);
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
    let db = make_db().await;

    let err = assert_err!(db.create("User", user("1", "ann")).await);
    assert!(err.root().is_driver());

    let users = assert_ok!(db.find_all("User", Page::first(10)).await);
    assert!(users.is_empty());
}

#[tokio::test]
async fn pipelines_run_hooks_around_persistence() {
    use std::sync::{Arc, Mutex};

    let plan = make_plan(
        r#"
entities:
  - name: Note
    traits: [id]
    attributes:
      - name: Title
        type: String
    hooks:
      create: [before, after]
      delete: [before]
"#,
    );

    let calls = Arc::new(Mutex::new(vec![]));
    let mut builder = Db::builder();
    builder.plan(plan);

    let log = calls.clone();
    builder.hook("BeforeCreateNote", move |record| {
        log.lock().unwrap().push(format!("before {:?}", record.id()));
        record.set("Title", "set by hook");
        Ok(())
    });
    let log = calls.clone();
    builder.hook("AfterCreateNote", move |record| {
        log.lock().unwrap().push(format!("after {}", record.get("Title")));
        Ok(())
    });
    builder.hook("BeforeDeleteNote", |record| {
        if record.id() == Some("locked") {
            return Err(err!("note is locked"));
        }
        Ok(())
    });

    let db = assert_ok!(builder.connect("sqlite::memory:").await);
    assert_ok!(db.push_schema().await);

    assert_ok!(db.create("Note", Record::new().with("ID", "n1")).await);
    assert_eq!(
        *calls.lock().unwrap(),
        ["before Some(\"n1\")", "after \"set by hook\""]
    );

    let note = assert_ok!(db.find_by("Note", "ID", "n1").await);
    assert_eq!(note.get("Title"), &Value::from("set by hook"));

    assert_ok!(db.create("Note", Record::new().with("ID", "locked")).await);
    let err = assert_err!(db.delete("Note", "locked").await);
    assert_eq!(err.to_string(), "calling BeforeDeleteNote: note is locked");
    assert_ok!(db.find_by("Note", "ID", "locked").await);

    let latencies = db.metrics().histogram("delete_note_latencies").unwrap();
    assert_eq!(latencies.count(), 1);
    assert_eq!(db.metrics().counter("delete_note_errors").unwrap().get(), 1);
}

#[tokio::test]
async fn unregistered_functions_fail_the_build() {
    let plan = make_plan(
        "entities:\n  - name: Note\n    traits: [id]\n    hooks:\n      create: [after]\n",
    );

    let err = assert_err!(
        Db::builder()
            .plan(plan)
            .connect("sqlite::memory:")
            .await
    );
    assert!(err.is_missing_function());
    assert_eq!(err.to_string(), "function `AfterCreateNote` is not registered");
}

#[tokio::test]
async fn unsupported_operations_are_rejected() {
    let plan = make_plan(
        "entities:\n  - name: Log\n    traits: [id]\n    operations: [create, find]\n",
    );
    let db = assert_ok!(Db::builder().plan(plan).connect("sqlite::memory:").await);
    assert_ok!(db.push_schema().await);

    assert_ok!(db.create("Log", Record::new().with("ID", "l1")).await);
    let err = assert_err!(db.delete("Log", "l1").await);
    assert!(err.is_unsupported_operation());
}

#[tokio::test]
async fn failing_generators_stop_the_pipeline() {
    let mut builder = Db::builder();
    builder.plan(make_plan(
        "entities:\n  - name: Note\n    traits: [id, timestamps]\n",
    ));
    for operation in ["Create", "Update"] {
        builder.generator(format!("GenerateNoteCreatedAtOn{operation}"), |_, _| async {
            Err(err!("clock broken"))
        });
        builder.generator(format!("GenerateNoteUpdatedAtOn{operation}"), |_, _| async {
            Ok(Value::from(NOW))
        });
    }
    let db = assert_ok!(builder.connect("sqlite::memory:").await);
    assert_ok!(db.push_schema().await);

    let err = assert_err!(db.create("Note", Record::new().with("ID", "n1")).await);
    assert_eq!(
        err.to_string(),
        "calling GenerateNoteCreatedAtOnCreate: clock broken"
    );
    assert_eq!(db.metrics().counter("create_note_errors").unwrap().get(), 1);

    let notes = assert_ok!(db.find_all("Note", Page::first(10)).await);
    assert!(notes.is_empty());
}

#[tokio::test]
async fn generators_read_through_the_storage_handle() {
    let mut builder = Db::builder();
    builder.plan(make_plan(
        r#"
entities:
  - name: User
    traits: [keys]
  - name: Doc
    traits: [id, authors]
"#,
    ));
    for operation in ["Create", "Update"] {
        for field in ["CreatedBy", "UpdatedBy"] {
            builder.generator(
                format!("GenerateDoc{field}On{operation}"),
                |db: Db, _| async move {
                    let system = db.find_by("User", "Name", "system").await?;
                    Ok::<_, modelgen::Error>(Value::from(system.id().unwrap_or_default()))
                },
            );
        }
    }
    let db = assert_ok!(builder.connect("sqlite::memory:").await);
    assert_ok!(db.push_schema().await);

    assert_ok!(
        db.create("User", Record::new().with("ID", "u7").with("Name", "system"))
            .await
    );
    let doc = assert_ok!(db.create("Doc", Record::new().with("ID", "d1")).await);
    assert_eq!(doc.related_id("CreatedBy"), Some("u7"));

    let found = assert_ok!(db.find_by("Doc", "ID", "d1").await);
    assert_eq!(found.related_id("UpdatedBy"), Some("u7"));
}

#[tokio::test]
async fn after_hook_failures_follow_the_commit() {
    let mut builder = Db::builder();
    builder.plan(make_plan(
        "entities:\n  - name: Note\n    traits: [id]\n    hooks:\n      create: [after]\n",
    ));
    builder.hook("AfterCreateNote", |_| Err(err!("notify failed")));
    let db = assert_ok!(builder.connect("sqlite::memory:").await);
    assert_ok!(db.push_schema().await);

    let err = assert_err!(db.create("Note", Record::new().with("ID", "n1")).await);
    assert_eq!(err.to_string(), "calling AfterCreateNote: notify failed");
    assert_eq!(db.metrics().counter("create_note_errors").unwrap().get(), 1);

    // The insert committed before the hook ran
    let note = assert_ok!(db.find_by("Note", "ID", "n1").await);
    assert_eq!(note.id(), Some("n1"));
}

#[tokio::test]
async fn delete_before_hooks_cannot_change_the_id() {
    let mut builder = Db::builder();
    builder.plan(make_plan(
        "entities:\n  - name: Note\n    traits: [id]\n    hooks:\n      delete: [before]\n",
    ));
    builder.hook("BeforeDeleteNote", |record| {
        record.set("ID", "n2");
        Ok(())
    });
    let db = assert_ok!(builder.connect("sqlite::memory:").await);
    assert_ok!(db.push_schema().await);

    for id in ["n1", "n2"] {
        assert_ok!(db.create("Note", Record::new().with("ID", id)).await);
    }

    let deleted = assert_ok!(db.delete("Note", "n1").await);
    assert_eq!(deleted.id(), Some("n1"));
    assert_err!(db.find_by("Note", "ID", "n1").await);
    assert_ok!(db.find_by("Note", "ID", "n2").await);
}
