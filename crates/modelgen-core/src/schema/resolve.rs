//! Resolution passes, run in order by the builder:
//!
//! 1. `traits`: append trait-derived attributes and relations
//! 2. `types`: flatten unions, check attribute types
//! 3. `operations`: default or validate the operation set
//! 4. `names`: variables, plurals, tables, columns, relation targets and pairs
//! 5. `verify`: collisions and primary keys
//!
//! Passes look entities up by id, never by position in a linear walk, so a
//! relation may point at an entity declared later, or at its own entity.

pub(super) mod names;
pub(super) mod operations;
pub(super) mod traits;
pub(super) mod types;
pub(super) mod verify;
