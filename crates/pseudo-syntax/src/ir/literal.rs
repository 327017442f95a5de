//! Literal values.

use serde::{Deserialize, Serialize};

/// A literal value. The data kind is derived from the variant, so a literal
/// can never claim a kind its value does not have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// Runtime kind of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    String,
    Number,
    Boolean,
    Null,
}

impl Literal {
    pub fn data_kind(&self) -> DataKind {
        match self {
            Literal::String(_) => DataKind::String,
            Literal::Number(_) => DataKind::Number,
            Literal::Boolean(_) => DataKind::Boolean,
            Literal::Null => DataKind::Null,
        }
    }

    /// Whether this is a number with no fractional part.
    pub fn is_integer(&self) -> bool {
        matches!(self, Literal::Number(n) if n.fract() == 0.0)
    }
}
