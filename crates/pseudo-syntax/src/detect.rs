//! Heuristic language detection.
//!
//! An ordered rule table over the whole text; the first rule whose patterns
//! all match decides. Tiers, in order:
//!
//! 1. canonical pseudocode keywords (uppercase)
//! 2. print idioms specific to one language
//! 3. generic keyword and punctuation heuristics
//!
//! Anything else, including empty text, is natural language.

use crate::tags::SourceTag;
use regex::Regex;
use std::sync::LazyLock;

struct Rule {
    tag: SourceTag,
    /// All must match.
    patterns: Vec<Regex>,
}

fn rule(tag: SourceTag, patterns: &[&str]) -> Rule {
    Rule {
        tag,
        patterns: patterns
            .iter()
            .map(|p| Regex::new(p).expect("detector pattern"))
            .collect(),
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Tier 1: pseudocode control keywords
        rule(
            SourceTag::Pseudocode,
            &[
                r"(?m)^\s*(SET\s+\w+\s+TO\b|DECLARE\s+\w+|CONSTANT\s+\w+\s+IS\b|IF\s.+\sTHEN\s*$|ELSE\s+IF\b|WHILE\s.+\sDO\s*$|FOR\s+EACH\b|FOR\s+\w+\s+FROM\b|FUNCTION\s+\w+|END\s+(IF|WHILE|FOR|FUNCTION)\b|PRINT\s)",
            ],
        ),
        // Tier 2: print idioms
        rule(SourceTag::Java, &[r"\bSystem\.out\.print"]),
        rule(SourceTag::Rust, &[r"\bprintln!\s*\("]),
        rule(SourceTag::Go, &[r"\bfmt\.Print"]),
        rule(
            SourceTag::TypeScript,
            &[
                r"\bconsole\.log\s*\(",
                r"(?m)(^\s*(interface\s+\w+|type\s+\w+\s*=)|\b(const|let|var)\s+\w+\s*:\s*\w+|\)\s*:\s*(string|number|boolean|void|any)\b)",
            ],
        ),
        rule(SourceTag::JavaScript, &[r"\bconsole\.(log|error|warn)\s*\("]),
        rule(SourceTag::Python, &[r"(?m)^\s*print\("]),
        rule(SourceTag::Scala, &[r"\bprintln\s*\("]),
        // Tier 3: generic heuristics
        rule(
            SourceTag::Python,
            &[
                r"(?m)^\s*(def\s+\w+\s*\(.*\)\s*:|class\s+\w+.*:\s*$|import\s+\w+\s*$|from\s+[\w.]+\s+import\b|(if|elif|while|for)\s.+:\s*$)",
            ],
        ),
        rule(
            SourceTag::Java,
            &[r"\b(public|private|protected|static)\b", r"\bclass\s+\w+"],
        ),
        rule(SourceTag::Rust, &[r"\bfn\s+\w+\s*\(|\blet\s+mut\b|\bimpl\b.*\{"]),
        rule(SourceTag::Go, &[r"(?m)\bfunc\s+\w+\s*\(|^\s*package\s+\w+"]),
        rule(
            SourceTag::Scala,
            &[r"(?m)^\s*(val\s+\w+\s*(:\s*\w+)?\s*=|def\s+\w+.*=|object\s+\w+)"],
        ),
        rule(
            SourceTag::TypeScript,
            &[
                r"(?m)(^\s*(interface\s+\w+|type\s+\w+\s*=)|\b(const|let|var)\s+\w+\s*:\s*\w+|\)\s*:\s*(string|number|boolean|void|any)\b)",
            ],
        ),
        rule(
            SourceTag::JavaScript,
            &[r"\b(const|let|var)\s+\w+\s*=.*;|=>|\bfunction\s*\w*\s*\("],
        ),
    ]
});

/// Guess which source conventions `text` follows. Never fails.
pub fn detect_language(text: &str) -> SourceTag {
    let text = text.trim();
    let tag = RULES
        .iter()
        .find(|rule| rule.patterns.iter().all(|p| p.is_match(text)))
        .map_or(SourceTag::Natural, |rule| rule.tag);
    tracing::debug!(%tag, "detected source language");
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_natural() {
        assert_eq!(detect_language(""), SourceTag::Natural);
        assert_eq!(detect_language("   \n  "), SourceTag::Natural);
    }

    #[test]
    fn test_plain_english_is_natural() {
        assert_eq!(
            detect_language("set x to 5\nif x is greater than 3\nprint x\nend if"),
            SourceTag::Natural
        );
    }

    #[test]
    fn test_canonical_pseudocode() {
        assert_eq!(
            detect_language("SET x TO 5\nIF x > 3 THEN\n  PRINT x\nEND IF"),
            SourceTag::Pseudocode
        );
    }

    #[test]
    fn test_pseudocode_beats_print_idioms() {
        assert_eq!(
            detect_language("SET x TO 1\nprintln(x)"),
            SourceTag::Pseudocode
        );
    }

    #[test]
    fn test_print_idioms() {
        assert_eq!(
            detect_language("System.out.println(\"hi\");"),
            SourceTag::Java
        );
        assert_eq!(detect_language("println!(\"{}\", x);"), SourceTag::Rust);
        assert_eq!(detect_language("fmt.Println(x)"), SourceTag::Go);
        assert_eq!(detect_language("console.log(x);"), SourceTag::JavaScript);
        assert_eq!(
            detect_language("const x: number = 1;\nconsole.log(x);"),
            SourceTag::TypeScript
        );
        assert_eq!(detect_language("print(\"hi\")"), SourceTag::Python);
        assert_eq!(detect_language("println(\"hi\")"), SourceTag::Scala);
    }

    #[test]
    fn test_generic_heuristics() {
        assert_eq!(
            detect_language("def add(a, b):\n    return a + b"),
            SourceTag::Python
        );
        assert_eq!(
            detect_language("public class Main {\n}"),
            SourceTag::Java
        );
        assert_eq!(
            detect_language("fn main() {\n    let mut x = 1;\n}"),
            SourceTag::Rust
        );
        assert_eq!(
            detect_language("package main\n\nfunc main() {\n}"),
            SourceTag::Go
        );
        assert_eq!(detect_language("val x = 5"), SourceTag::Scala);
        assert_eq!(
            detect_language("interface User {\n  name: string\n}"),
            SourceTag::TypeScript
        );
        assert_eq!(detect_language("let total = 0;"), SourceTag::JavaScript);
        assert_eq!(detect_language("const add = (a, b) => a + b"), SourceTag::JavaScript);
    }

    #[test]
    fn test_natural_let_is_not_javascript() {
        assert_eq!(detect_language("let x be 5"), SourceTag::Natural);
    }
}
