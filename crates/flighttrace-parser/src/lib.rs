pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::{LoaderError, ReaderAttempt};
pub use model::RawTable;
pub use registry::{load_table, parse_table, parse_with_readers, SourceKind, TableReader};
