pub mod parse;
pub mod types;
pub mod value;

pub use parse::parse_matrix;
pub use types::{DimensionDef, Exclusion, MatrixDef, Mode};
pub use value::{value_to_literal, value_to_string, Value};
