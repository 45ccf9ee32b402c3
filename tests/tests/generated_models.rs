//! Runs the modules rendered from `models/orgs.yaml` by the build script.

use modelgen::{Page, Value};
use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, assert_some, plan, setup};

#[allow(dead_code)]
mod models {
    pub mod organization {
        include!(concat!(env!("OUT_DIR"), "/models/organization.rs"));
    }

    pub mod user {
        include!(concat!(env!("OUT_DIR"), "/models/user.rs"));
    }

    pub use organization::Organization;
    pub use user::User;
}

use models::{organization, user, Organization, User};

const NOW: &str = "2024-05-01T12:00:00Z";

async fn make_db() -> modelgen::Db {
    let (db, _) = assert_ok!(
        setup(plan(include_str!("../models/orgs.yaml")), |builder| {
            for operation in ["Create", "Update"] {
                for field in ["CreatedAt", "UpdatedAt"] {
                    builder.generator(format!("GenerateUser{field}On{operation}"), |_, _| async {
                        Ok(Value::from(NOW))
                    });
                }
            }
        })
        .await
    );
    db
}

fn acme() -> Organization {
    Organization {
        id: "1".to_string(),
        name: "acme".to_string(),
        ..Default::default()
    }
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        created_at: NOW.to_string(),
        updated_at: NOW.to_string(),
        organization: Some(Box::new(Organization::reference("1"))),
        ..Default::default()
    }
}

#[tokio::test]
async fn insert_then_find_by_id() {
    let db = make_db().await;

    assert_ok!(organization::persist::insert_organization(&db, acme()).await);
    assert_ok!(user::persist::insert_user(&db, user("1", "ann")).await);

    let found = assert_ok!(user::persist::find_user_by_id(&db, "1").await);
    assert_eq!(found.name, "ann");
    assert_eq!(found.age, None);
    let organization = assert_some!(found.organization);
    assert_eq!(organization.id, "1");
    assert_eq!(*organization, Organization::reference("1"));

    let err = assert_err!(user::persist::find_user_by_id(&db, "2").await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn resolvers_run_generators() {
    let db = make_db().await;
    assert_ok!(organization::resolve::create_organization(&db, acme()).await);

    let mut ann = user("1", "ann");
    ann.created_at = String::new();
    ann.age = Some(41);

    let created = assert_ok!(user::resolve::create_user(&db, ann).await);
    assert_eq!(created.created_at, NOW);

    let found = assert_ok!(user::resolve::find_user_by_name(&db, "ann").await);
    assert_eq!(found.age, Some(41));
    assert_eq!(found.updated_at, NOW);
    assert_eq!(
        db.metrics().histogram("find_user_by_name_latencies").unwrap().count(),
        1
    );
}

#[tokio::test]
async fn finders_page_through_related_records() {
    let db = make_db().await;
    assert_ok!(organization::persist::insert_organization(&db, acme()).await);
    for (id, name) in [("1", "cat"), ("2", "ann"), ("3", "bob")] {
        assert_ok!(user::persist::insert_user(&db, user(id, name)).await);
    }

    let page = Page::first(2);
    let first = assert_ok!(user::persist::find_users_by_organization(&db, "1", page).await);
    let rest = assert_ok!(user::persist::find_users_by_organization(&db, "1", page.next()).await);

    let names: Vec<_> = first.iter().chain(&rest).map(|user| user.name.as_str()).collect();
    assert_eq!(names, ["ann", "bob", "cat"]);

    let deleted = assert_ok!(user::resolve::delete_user(&db, "3").await);
    assert_eq!(deleted.name, "bob");
    let all = assert_ok!(user::persist::find_all_users(&db, Page::first(10)).await);
    assert_eq!(all.len(), 2);
}
