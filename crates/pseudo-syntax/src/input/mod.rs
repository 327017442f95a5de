//! Input readers - parse text into a pseudocode tree.
//!
//! Natural language and canonical pseudocode have a parser. Every other
//! source tag is read by [`AliasReader`], which hands the text to the same
//! natural-language rules.

pub mod alias;
pub mod natural;
mod value;

pub use alias::{
    AliasReader, GO_READER, JAVA_READER, JAVASCRIPT_READER, PYTHON_READER, RUST_READER,
    SCALA_READER, TYPESCRIPT_READER,
};
pub use natural::{NATURAL_READER, NaturalReader, PSEUDOCODE_READER, parse_natural};
pub use value::{parse_condition, parse_value};
