use modelgen_codegen::{generate, FileKind, Options};
use modelgen_core::{schema::ResolveOptions, Plan};
use modelgen_sql::Flavor;
use pretty_assertions::assert_eq;
use std_util::{assert_none, assert_ok, assert_some};

fn make_plan(yaml: &str) -> Plan {
    assert_ok!(Plan::from_yaml(yaml, &ResolveOptions::default()))
}

fn contents(plan: &Plan, options: &Options, path: &str) -> String {
    let output = generate(plan, options);
    output.file(path).unwrap().contents.clone()
}

const DIRECTORY: &str = r#"
types:
  - name: Role
    type: enum
    values: [Admin, Member]
  - name: Pet
    type: union
    values: [Cat, Dog]
entities:
  - name: Organization
    traits: [keys]
    operations: [find]
    relations:
      - entity: User
        modifiers: [hasMany]
  - name: User
    traits: [id]
    operations: [create, find]
    attributes:
      - name: Role
        type: Role
        modifiers: [required]
    relations:
      - alias: Organization
        entity: Organization
        modifiers: [belongsTo]
"#;

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

#[test]
fn graphql_schema() {
    let plan = make_plan(DIRECTORY);

    assert_eq!(
        contents(&plan, &Options::default(), "schema.graphql"),
        "\
schema {
  query: Query
  mutation: Mutation
}

enum Role {
  Admin
  Member
}

union Pet = Cat | Dog

type Organization {
  id: ID!
  name: String!
  users: [User!]
}

type User {
  role: Role!
  id: ID!
  organization: Organization!
}

type Mutation {
  createUser(role: Role!, id: ID!, organization: ID!): User!
}

type Query {
  findOrganizationByID(id: ID!): Organization!
  findOrganizationByName(name: String!): Organization!
  findAllOrganizations(limit: Int!, offset: Int!): [Organization!]
  findUserByID(id: ID!): User!
  findUsersByOrganization(organization: ID!, limit: Int!, offset: Int!): [User!]
  findAllUsers(limit: Int!, offset: Int!): [User!]
}
"
    );
}

#[test]
fn graphviz_diagram() {
    let plan = make_plan(ORGS);

    assert_eq!(
        contents(&plan, &Options::default(), "model.dot"),
        r#"digraph G {
  organization [label="Organization", shape=box];
  organization_name [label="Name", shape=ellipse];
  organization -> organization_name [style=dotted];
  user [label="User", shape=box];
  user_name [label="Name", shape=ellipse];
  user -> user_name [style=dotted];
  user -> organization [label="Organization", style=bold];
}
"#
    );
}

#[test]
fn schema_script_follows_the_flavor() {
    let plan = make_plan(ORGS);

    let sqlite = contents(&plan, &Options::default(), "schema.sql");
    assert!(sqlite.ends_with("PRAGMA foreign_keys = ON;\n"));

    let options = Options::default().flavor(Flavor::Postgresql);
    let postgres = contents(&plan, &options, "schema.sql");
    assert!(postgres.starts_with("DROP TABLE IF EXISTS organizations CASCADE;\n"));
    assert!(postgres.contains(
        "ALTER TABLE users ADD CONSTRAINT users_organization_id FOREIGN KEY (organization_id) REFERENCES organizations(id);\n"
    ));
}

#[test]
fn metrics_are_rendered_on_request() {
    let plan = make_plan(ORGS);

    let output = generate(&plan, &Options::default());
    assert_none!(output.file("metrics.prom"));

    let metrics = contents(&plan, &Options::default().metrics(true), "metrics.prom");
    assert!(metrics.starts_with(
        "# HELP create_organization_latencies Elapsed time in milliseconds to create entities of type Organization\n\
         # TYPE create_organization_latencies histogram\n"
    ));
    assert!(metrics.contains("# TYPE find_all_users_errors counter\nfind_all_users_errors 0\n"));
}

#[test]
fn output_layout() {
    let plan = make_plan(ORGS);
    let output = generate(&plan, &Options::default().metrics(true));

    let files: Vec<_> = output
        .files
        .iter()
        .map(|file| (file.path.to_str().unwrap(), file.kind))
        .collect();

    assert_eq!(
        files,
        [
            ("models/organization.rs", FileKind::Rust),
            ("models/user.rs", FileKind::Rust),
            ("models/mod.rs", FileKind::Rust),
            ("schema.sql", FileKind::Sql),
            ("schema.graphql", FileKind::Graphql),
            ("metrics.prom", FileKind::Metrics),
            ("model.dot", FileKind::Dot),
        ]
    );

    let user = &assert_some!(output.file("models/user.rs")).contents;
    assert!(user.starts_with("// Code generated by modelgen. DO NOT EDIT.\n"));
}
