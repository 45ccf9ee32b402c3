pub mod artifact;
pub use artifact::OperationSets;

pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError, ModelError};

pub mod metrics;
pub use metrics::MetricsRegistry;

mod plan;
pub use plan::Plan;

pub mod schema;
pub use schema::Model;

mod value;
pub use value::Value;

pub use async_trait::async_trait;

/// A Result type alias that uses modelgen's [`Error`] type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
