//! Natural-language pseudocode to source code, via a common tree.
//!
//! `pseudo-syntax` reads loosely worded instructions ("set x to 5",
//! "if x is greater than 3 ... end if") into a small pseudocode tree and
//! renders that tree in one of several target languages. It maps wording
//! and syntax, not semantics: the output is a faithful draft, not a
//! checked program.
//!
//! # Architecture
//!
//! ```text
//! Source text          Tree                 Target languages
//! ────────────    ─────────────    ─────────────────────────────
//! natural     ─┐                ┌─> pseudocode, javascript,
//! pseudocode  ─┼─> Vec<Node> ───┼─> typescript, python,
//! (detected)  ─┘    (ir.rs)     └─> java, scala, go
//! ```
//!
//! Programming-language source tags are recognized by [`detect_language`]
//! but read with the natural-language rules; [`Reader::implemented`]
//! reports which tags have a parser of their own.
//!
//! # Example
//!
//! ```
//! use pseudo_syntax::{GenerateOptions, TargetTag, generate, parse};
//!
//! let tree = parse("set total to 0\nrepeat 3 times\nadd 2 to total\nend repeat", None);
//! let python = generate(&tree, TargetTag::Python, &GenerateOptions::default()).unwrap();
//! assert_eq!(python, "total = 0\nfor i in range(3):\n  total = total + 2");
//! ```
//!
//! # Failure model
//!
//! Parsing never fails: a line no rule recognizes is kept as a comment.
//! Generation never fails for a tree: a node a target cannot express
//! becomes an `unsupported node` comment line. The only errors are unknown
//! language names and targets without a compiled-in writer.

pub mod detect;
pub mod dispatch;
pub mod input;
pub mod ir;
pub mod options;
pub mod output;
pub mod registry;
pub mod tags;
pub mod traits;

// Re-exports: tree types
pub use ir::{BinaryOp, DataKind, Literal, Node, UnaryOp};

// Re-exports: tags and options
pub use options::{GenerateOptions, IndentChar};
pub use tags::{SourceTag, TargetTag};

// Re-exports: traits and errors
pub use traits::{Error, ReadError, Reader, Writer};

// Re-exports: entry points
pub use detect::detect_language;
pub use dispatch::{generate, parse, translate};
pub use input::parse_natural;

// Re-exports: registry
pub use registry::{
    reader_for_extension, reader_for_language, readers, writer_for_language, writers,
};
