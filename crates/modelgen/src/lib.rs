pub mod db;
pub use db::Db;

mod load;
pub use load::Load;

mod page;
pub use page::Page;

mod record;
pub use record::{Record, Related};

mod validate;

pub use modelgen_core::{artifact, bail, err, schema, Error, MetricsRegistry, Plan, Result, Value};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{Db, Error, Load, Page, Record, Related, Result, Value};
    pub use std::{boxed::Box, convert::Into, default::Default, option::Option, string::String, vec::Vec};
}
