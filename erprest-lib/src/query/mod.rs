//! Query construction: search criteria, query options, field mapping
//! and path building.
//!
//! Everything in this module is a pure function of its input. The pieces
//! compose in one direction: a [`Criteria`] compiles (through a
//! [`FieldMapping`]) into the `q` filter expression, [`QueryOptions`]
//! serializes the full parameter envelope into a query string, and
//! [`build_path`] assembles the final request path.

mod criteria;
mod mapping;
mod options;
mod path;

pub use criteria::Criteria;
pub use criteria::FieldOps;
pub use criteria::FieldValue;
pub use criteria::Scalar;
pub use mapping::FieldMapping;
pub use options::Direction;
pub use options::QueryOptions;
pub use options::Sort;
pub use path::PathSegment;
pub use path::build_path;
