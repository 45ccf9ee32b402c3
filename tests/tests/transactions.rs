use modelgen::{err, Record};
use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, drain, plan, setup};

const NOTES: &str = r#"
entities:
  - name: Note
    traits: [id]
    attributes:
      - name: Title
        type: String
        modifiers: [required, unique, indexed]
    hooks:
      delete: [before]
"#;

fn note(id: &str, title: &str) -> Record {
    Record::new().with("ID", id).with("Title", title)
}

#[tokio::test]
async fn mutations_commit_in_their_own_transaction() {
    let (db, ops) = assert_ok!(
        setup(plan(NOTES), |builder| {
            builder.hook("BeforeDeleteNote", |_| Ok(()));
        })
        .await
    );

    assert_ok!(db.create("Note", note("n1", "first")).await);
    assert_eq!(drain(&ops), ["BEGIN", "INSERT", "COMMIT"]);

    assert_ok!(db.update("Note", note("n1", "renamed")).await);
    assert_eq!(drain(&ops), ["BEGIN", "UPDATE", "COMMIT"]);

    assert_ok!(db.delete("Note", "n1").await);
    assert_eq!(drain(&ops), ["BEGIN", "SELECT", "DELETE", "COMMIT"]);
}

#[tokio::test]
async fn failures_roll_back() {
    let (db, ops) = assert_ok!(
        setup(plan(NOTES), |builder| {
            builder.hook("BeforeDeleteNote", |_| Ok(()));
        })
        .await
    );

    assert_ok!(db.create("Note", note("n1", "first")).await);
    drain(&ops);

    // Unique title
    assert_err!(db.create("Note", note("n2", "first")).await);
    assert_eq!(drain(&ops), ["BEGIN", "INSERT!", "ROLLBACK"]);

    let err = assert_err!(db.update("Note", note("n9", "missing")).await);
    assert!(err.root().is_record_not_found());
    assert_eq!(drain(&ops), ["BEGIN", "UPDATE", "ROLLBACK"]);

    assert_err!(db.delete("Note", "n9").await);
    assert_eq!(drain(&ops), ["BEGIN", "SELECT", "ROLLBACK"]);
}

#[tokio::test]
async fn hook_failures_never_reach_storage() {
    let (db, ops) = assert_ok!(
        setup(plan(NOTES), |builder| {
            builder.hook("BeforeDeleteNote", |_| Err(err!("denied")));
        })
        .await
    );

    assert_ok!(db.create("Note", note("n1", "first")).await);
    drain(&ops);

    let err = assert_err!(db.delete("Note", "n1").await);
    assert_eq!(err.to_string(), "calling BeforeDeleteNote: denied");
    assert!(drain(&ops).is_empty());
    assert_eq!(db.metrics().counter("delete_note_errors").unwrap().get(), 1);
}

#[tokio::test]
async fn validation_happens_before_the_transaction() {
    let (db, ops) = assert_ok!(
        setup(plan(NOTES), |builder| {
            builder.hook("BeforeDeleteNote", |_| Ok(()));
        })
        .await
    );

    let err = assert_err!(db.create("Note", Record::new().with("ID", "n1")).await);
    assert!(err.root().is_validation());
    assert!(drain(&ops).is_empty());
}
