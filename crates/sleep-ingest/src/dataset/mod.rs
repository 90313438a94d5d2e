//! Dataset reading utilities.

mod infer;
mod reader;

pub use infer::{ColumnKind, infer_column, infer_kind};
pub use reader::{MAX_COLUMNS_WARNING, load_dataset, validate_table_shape};
