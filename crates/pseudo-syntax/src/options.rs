//! Options controlling generated output.
//!
//! Example config.toml section:
//! ```toml
//! [generate]
//! indent_size = 4          # > 0; 0 is treated as 1
//! indent_char = "space"    # "space" or "tab"
//! include_comments = true
//! strict_mode = false
//! ```

use serde::{Deserialize, Serialize};

/// Character repeated to build one indentation unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentChar {
    #[default]
    Space,
    Tab,
}

impl IndentChar {
    pub fn as_char(self) -> char {
        match self {
            IndentChar::Space => ' ',
            IndentChar::Tab => '\t',
        }
    }
}

/// Generation options shared by every writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Characters per indentation level.
    pub indent_size: usize,
    /// Character used for indentation.
    pub indent_char: IndentChar,
    /// Render `Comment` nodes. Placeholder lines are rendered regardless.
    pub include_comments: bool,
    /// JavaScript and TypeScript only: `'use strict';` and strict equality.
    pub strict_mode: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            indent_char: IndentChar::Space,
            include_comments: true,
            strict_mode: false,
        }
    }
}

impl GenerateOptions {
    /// One level of indentation.
    pub fn indent_unit(&self) -> String {
        self.indent_char
            .as_char()
            .to_string()
            .repeat(self.indent_size.max(1))
    }

    pub fn with_indent(mut self, size: usize, indent_char: IndentChar) -> Self {
        self.indent_size = size;
        self.indent_char = indent_char;
        self
    }

    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = include;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }
}
