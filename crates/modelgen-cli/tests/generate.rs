use modelgen_cli::{generate, Config, Database};
use pretty_assertions::assert_eq;
use std::path::Path;
use std_util::{assert_err, assert_ok};

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

fn make_model(dir: &Path, name: &str, contents: &str) -> Config {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();

    Config::new()
        .model(path)
        .output(dir.join("out"))
        .rustfmt(false)
}

fn read(dir: &Path, file: &str) -> String {
    std::fs::read_to_string(dir.join("out").join(file)).unwrap()
}

#[test]
fn writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = make_model(dir.path(), "model.yaml", ORGS).metrics(true);

    assert_ok!(generate(&config));

    for file in [
        "models/mod.rs",
        "models/organization.rs",
        "models/user.rs",
        "schema.sql",
        "schema.graphql",
        "metrics.prom",
        "model.dot",
    ] {
        assert!(dir.path().join("out").join(file).exists(), "missing {file}");
    }

    let sql = read(dir.path(), "schema.sql");
    assert!(sql.starts_with("DROP TABLE IF EXISTS organizations;\n"));
}

#[test]
fn json_models_and_postgres() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{"entities": [{"name": "Tag", "traits": ["id"]}]}"#;
    let config = make_model(dir.path(), "model.json", json).db(Database::Postgres);

    assert_ok!(generate(&config));

    assert_eq!(
        read(dir.path(), "schema.sql"),
        "DROP TABLE IF EXISTS tags CASCADE;\n\
         CREATE TABLE tags (id varchar NOT NULL PRIMARY KEY);\n"
    );
    assert!(!dir.path().join("out/metrics.prom").exists());
}

#[test]
fn resolution_errors_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = make_model(
        dir.path(),
        "model.yaml",
        "entities:\n  - name: Tag\n    traits: [id]\n    operations: [upsert]\n",
    );

    let err = assert_err!(generate(&config));
    let message = format!("{err:#}");
    assert!(message.starts_with("failed to resolve model"), "{message}");
    assert!(message.contains("upsert"), "{message}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn strict_traits_reject_unknown_traits() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = "entities:\n  - name: Tag\n    traits: [id, sparkles]\n";

    let lenient = make_model(dir.path(), "model.yaml", yaml);
    assert_ok!(generate(&lenient));

    let strict = lenient.strict_traits(true);
    let err = assert_err!(generate(&strict));
    assert!(format!("{err:#}").contains("unknown trait `sparkles`"));
}

#[test]
fn missing_model_is_reported() {
    let err = assert_err!(generate(&Config::new()));
    assert_eq!(
        err.to_string(),
        "no model file given; pass --model or set `model` in Modelgen.toml"
    );
}

#[test]
fn config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Modelgen.toml");
    std::fs::write(
        &path,
        "model = \"model.yaml\"\noutput = \"gen\"\ndb = \"postgresql\"\nrustfmt = false\n",
    )
    .unwrap();

    let config = assert_ok!(Config::load(&path));
    assert_eq!(
        config,
        Config::new()
            .model("model.yaml")
            .output("gen")
            .db(Database::Postgres)
            .rustfmt(false)
    );

    std::fs::write(&path, "modle = \"typo.yaml\"\n").unwrap();
    let err = assert_err!(Config::load(&path));
    assert!(format!("{err:#}").contains("unknown field `modle`"));
}
