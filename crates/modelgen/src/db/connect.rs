use crate::Result;

use modelgen_core::{bail, Driver, Error};
use url::Url;

/// Pick a driver from the connection URL's scheme.
pub(super) fn driver(url: &str) -> Result<Box<dyn Driver>> {
    let parsed = Url::parse(url).map_err(Error::driver)?;

    match parsed.scheme() {
        #[cfg(feature = "sqlite")]
        "sqlite" => Ok(Box::new(modelgen_driver_sqlite::Sqlite::new(url)?)),
        #[cfg(not(feature = "sqlite"))]
        "sqlite" => bail!("`sqlite` feature not enabled"),

        scheme => bail!("unsupported database; scheme={scheme}; url={url}"),
    }
}
