//! Traits for readers and writers, and the errors they surface.

use crate::ir::Node;
use crate::options::GenerateOptions;
use crate::tags::{SourceTag, TargetTag};

/// Caller errors: a language or target name nothing here handles.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("unsupported target: {0}")]
    UnsupportedTarget(String),
}

/// Error that can occur when reading text into a tree.
///
/// Parse dispatch never surfaces this; a failing reader degrades to the
/// natural-language parser.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported syntax: {0}")]
    Unsupported(String),
}

/// A reader turns text into a pseudocode tree.
pub trait Reader: Send + Sync {
    /// The source tag this reader handles.
    fn language(&self) -> SourceTag;

    /// Whether the text is parsed by rules of its own, rather than aliased
    /// to the natural-language parser.
    fn implemented(&self) -> bool {
        self.language().is_implemented()
    }

    /// File extensions this reader handles (e.g., &["py"]).
    fn extensions(&self) -> &'static [&'static str] {
        self.language().extensions()
    }

    /// Parse text into a statement sequence.
    fn read(&self, source: &str) -> Result<Vec<Node>, ReadError>;
}

/// A writer renders a tree as source code in a target language.
pub trait Writer: Send + Sync {
    /// The target tag this writer renders.
    fn language(&self) -> TargetTag;

    /// File extension for output (e.g., "py").
    fn extension(&self) -> &'static str;

    /// Render the tree. Never fails; nodes with no rendering become a
    /// placeholder comment line.
    fn write(&self, tree: &[Node], options: &GenerateOptions) -> String;
}
