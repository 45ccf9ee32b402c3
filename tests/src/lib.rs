mod logging_driver;
pub use logging_driver::{drain, DriverOp, LoggingDriver, OpsLog};

use modelgen::{db::Builder, schema::ResolveOptions, Db, Plan, Result};
use modelgen_driver_sqlite::Sqlite;

pub use std_util::*;

/// Resolve a YAML model, panicking on model errors.
pub fn plan(yaml: &str) -> Plan {
    assert_ok!(Plan::from_yaml(yaml, &ResolveOptions::default()))
}

/// Build a `Db` over an in-memory SQLite database with a pushed schema. Every
/// driver operation is recorded in the returned log.
pub async fn setup(plan: Plan, configure: impl FnOnce(&mut Builder)) -> Result<(Db, OpsLog)> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut builder = Db::builder();
    builder.plan(plan);
    configure(&mut builder);

    let driver = LoggingDriver::new(Box::new(Sqlite::in_memory()));
    let ops_log = driver.ops_log_handle();

    let db = builder.build(driver).await?;
    db.push_schema().await?;

    Ok((db, ops_log))
}
