//! Parse and generate dispatch.

use crate::detect::detect_language;
use crate::input::parse_natural;
use crate::ir::Node;
use crate::options::GenerateOptions;
use crate::registry::{reader_for_language, writer_for_language};
use crate::tags::{SourceTag, TargetTag};
use crate::traits::{Error, Reader};

/// Parse text into a tree. When `source` is `None` the tag is detected.
///
/// Never fails: a reader error degrades to the natural-language parser.
pub fn parse(text: &str, source: Option<SourceTag>) -> Vec<Node> {
    let tag = source.unwrap_or_else(|| detect_language(text));
    match reader_for_language(tag) {
        Some(reader) => read_with(reader, text),
        None => parse_natural(text),
    }
}

/// Run one reader, degrading to the natural-language parser on error.
fn read_with(reader: &dyn Reader, text: &str) -> Vec<Node> {
    reader.read(text).unwrap_or_else(|err| {
        let tag = reader.language();
        tracing::warn!(%tag, %err, "reader failed; falling back to natural language");
        parse_natural(text)
    })
}

/// Render a tree in the target language.
///
/// Fails only when no writer for `target` is compiled in.
pub fn generate(tree: &[Node], target: TargetTag, options: &GenerateOptions) -> Result<String, Error> {
    let writer =
        writer_for_language(target).ok_or_else(|| Error::UnsupportedTarget(target.to_string()))?;
    Ok(writer.write(tree, options))
}

/// Parse then generate.
pub fn translate(
    text: &str,
    source: Option<SourceTag>,
    target: TargetTag,
    options: &GenerateOptions,
) -> Result<String, Error> {
    generate(&parse(text, source), target, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ReadError;

    #[test]
    fn test_parse_detects_when_untagged() {
        assert_eq!(
            parse("SET x TO 5", None),
            [Node::var("x", Some(Node::number(5)))]
        );
    }

    struct Failing(ReadError);

    impl Reader for Failing {
        fn language(&self) -> SourceTag {
            SourceTag::Python
        }

        fn read(&self, _source: &str) -> Result<Vec<Node>, ReadError> {
            Err(match &self.0 {
                ReadError::Parse(msg) => ReadError::Parse(msg.clone()),
                ReadError::Unsupported(msg) => ReadError::Unsupported(msg.clone()),
            })
        }
    }

    #[test]
    fn test_failing_reader_falls_back_to_natural() {
        let text = "set x to 1\nprint x";
        for err in [
            ReadError::Parse("unexpected token".into()),
            ReadError::Unsupported("decorators".into()),
        ] {
            assert_eq!(read_with(&Failing(err), text), parse_natural(text));
        }
        assert_eq!(read_with(&Failing(ReadError::Parse(String::new())), text).len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("", None).is_empty());
    }

    #[test]
    #[cfg(feature = "write-pseudocode")]
    fn test_translate() {
        let out = translate(
            "Set x to 5",
            Some(SourceTag::Natural),
            TargetTag::Pseudocode,
            &GenerateOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "SET x TO 5");
    }
}
