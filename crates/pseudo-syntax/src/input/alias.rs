//! Readers for source tags with no parser of their own.

use super::natural::parse_natural;
use crate::ir::Node;
use crate::tags::SourceTag;
use crate::traits::{ReadError, Reader};

/// Reads text under a programming-language tag with the natural-language
/// rules. Lines the rules do not recognize survive as comments.
pub struct AliasReader {
    tag: SourceTag,
}

impl AliasReader {
    pub const fn new(tag: SourceTag) -> Self {
        Self { tag }
    }
}

impl Reader for AliasReader {
    fn language(&self) -> SourceTag {
        self.tag
    }

    fn read(&self, source: &str) -> Result<Vec<Node>, ReadError> {
        tracing::debug!(language = %self.tag, "no dedicated parser; reading as natural language");
        Ok(parse_natural(source))
    }
}

pub static JAVASCRIPT_READER: AliasReader = AliasReader::new(SourceTag::JavaScript);
pub static TYPESCRIPT_READER: AliasReader = AliasReader::new(SourceTag::TypeScript);
pub static PYTHON_READER: AliasReader = AliasReader::new(SourceTag::Python);
pub static JAVA_READER: AliasReader = AliasReader::new(SourceTag::Java);
pub static SCALA_READER: AliasReader = AliasReader::new(SourceTag::Scala);
pub static RUST_READER: AliasReader = AliasReader::new(SourceTag::Rust);
pub static GO_READER: AliasReader = AliasReader::new(SourceTag::Go);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Node;

    #[test]
    fn test_alias_reads_as_natural_language() {
        let tree = PYTHON_READER.read("set x to 1\nx += 1").unwrap();
        assert_eq!(
            tree,
            [
                Node::var("x", Some(Node::number(1))),
                Node::comment("x += 1"),
            ]
        );
        assert!(!PYTHON_READER.implemented());
        assert_eq!(PYTHON_READER.extensions(), ["py"]);
    }
}
