//! Source and target language tags.

use crate::traits::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input conventions a text can be parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Natural,
    Pseudocode,
    JavaScript,
    TypeScript,
    Python,
    Java,
    Scala,
    Rust,
    Go,
}

impl SourceTag {
    pub const ALL: [SourceTag; 9] = [
        SourceTag::Natural,
        SourceTag::Pseudocode,
        SourceTag::JavaScript,
        SourceTag::TypeScript,
        SourceTag::Python,
        SourceTag::Java,
        SourceTag::Scala,
        SourceTag::Rust,
        SourceTag::Go,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SourceTag::Natural => "natural",
            SourceTag::Pseudocode => "pseudocode",
            SourceTag::JavaScript => "javascript",
            SourceTag::TypeScript => "typescript",
            SourceTag::Python => "python",
            SourceTag::Java => "java",
            SourceTag::Scala => "scala",
            SourceTag::Rust => "rust",
            SourceTag::Go => "go",
        }
    }

    /// Whether text under this tag is really parsed by its own rules.
    ///
    /// Only the natural-language form and the canonical pseudocode form are.
    /// Every other tag is read by the natural-language parser, heuristically.
    pub fn is_implemented(self) -> bool {
        matches!(self, SourceTag::Natural | SourceTag::Pseudocode)
    }

    /// File extensions conventionally holding text under this tag.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            SourceTag::Natural => &["txt", "md"],
            SourceTag::Pseudocode => &["pseudo", "pseudocode"],
            SourceTag::JavaScript => &["js", "mjs", "cjs"],
            SourceTag::TypeScript => &["ts", "mts"],
            SourceTag::Python => &["py"],
            SourceTag::Java => &["java"],
            SourceTag::Scala => &["scala", "sc"],
            SourceTag::Rust => &["rs"],
            SourceTag::Go => &["go"],
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim().to_ascii_lowercase().as_str() {
            "natural" | "natural-language" | "nl" | "english" => SourceTag::Natural,
            "pseudocode" | "pseudo" => SourceTag::Pseudocode,
            "javascript" | "js" => SourceTag::JavaScript,
            "typescript" | "ts" => SourceTag::TypeScript,
            "python" | "py" => SourceTag::Python,
            "java" => SourceTag::Java,
            "scala" => SourceTag::Scala,
            "rust" | "rs" => SourceTag::Rust,
            "go" | "golang" => SourceTag::Go,
            _ => return Err(Error::UnsupportedLanguage(s.to_string())),
        };
        Ok(tag)
    }
}

/// Output languages a tree can be rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetTag {
    Pseudocode,
    JavaScript,
    TypeScript,
    Python,
    Java,
    Scala,
    Go,
}

impl TargetTag {
    pub const ALL: [TargetTag; 7] = [
        TargetTag::Pseudocode,
        TargetTag::JavaScript,
        TargetTag::TypeScript,
        TargetTag::Python,
        TargetTag::Java,
        TargetTag::Scala,
        TargetTag::Go,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TargetTag::Pseudocode => "pseudocode",
            TargetTag::JavaScript => "javascript",
            TargetTag::TypeScript => "typescript",
            TargetTag::Python => "python",
            TargetTag::Java => "java",
            TargetTag::Scala => "scala",
            TargetTag::Go => "go",
        }
    }
}

impl fmt::Display for TargetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim().to_ascii_lowercase().as_str() {
            "pseudocode" | "pseudo" => TargetTag::Pseudocode,
            "javascript" | "js" => TargetTag::JavaScript,
            "typescript" | "ts" => TargetTag::TypeScript,
            "python" | "py" => TargetTag::Python,
            "java" => TargetTag::Java,
            "scala" => TargetTag::Scala,
            "go" | "golang" => TargetTag::Go,
            _ => return Err(Error::UnsupportedTarget(s.to_string())),
        };
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_aliases() {
        assert_eq!("JS".parse::<SourceTag>().unwrap(), SourceTag::JavaScript);
        assert_eq!("nl".parse::<SourceTag>().unwrap(), SourceTag::Natural);
        assert_eq!(" Pseudo ".parse::<SourceTag>().unwrap(), SourceTag::Pseudocode);
    }

    #[test]
    fn test_unknown_source_is_an_error() {
        let err = "cobol".parse::<SourceTag>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage(ref name) if name == "cobol"));
    }

    #[test]
    fn test_rust_is_a_source_but_not_a_target() {
        assert!("rust".parse::<SourceTag>().is_ok());
        let err = "rust".parse::<TargetTag>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedTarget(_)));
    }

    #[test]
    fn test_names_parse_back() {
        for tag in SourceTag::ALL {
            assert_eq!(tag.name().parse::<SourceTag>().unwrap(), tag);
        }
        for tag in TargetTag::ALL {
            assert_eq!(tag.to_string().parse::<TargetTag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_only_natural_and_pseudocode_are_implemented() {
        let implemented: Vec<_> = SourceTag::ALL
            .into_iter()
            .filter(|t| t.is_implemented())
            .collect();
        assert_eq!(implemented, [SourceTag::Natural, SourceTag::Pseudocode]);
    }
}
