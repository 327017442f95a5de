//! Value and condition sub-parsing.
//!
//! Both are ordered rule lists evaluated first-match-wins. For comparisons
//! the order is a correctness property: a longer phrase must be tried before
//! any shorter phrase that is a prefix or suffix of it, otherwise
//! "greater than or equal to" would be read as `>` with a remainder of
//! "or equal to 5".

use crate::ir::{BinaryOp, Literal, Node, UnaryOp};
use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("value pattern")
}

/// Comparison phrasings, most specific first.
static COMPARISONS: LazyLock<Vec<(Regex, BinaryOp)>> = LazyLock::new(|| {
    [
        (
            r"is\s+not\s+greater\s+than\s+or\s+equal\s+to",
            BinaryOp::Lt,
        ),
        (r"is\s+not\s+less\s+than\s+or\s+equal\s+to", BinaryOp::Gt),
        (r"is\s+not\s+at\s+least", BinaryOp::Lt),
        (r"is\s+not\s+at\s+most", BinaryOp::Gt),
        (r"is\s+not\s+(?:greater|more)\s+than", BinaryOp::Le),
        (r"is\s+not\s+(?:less|fewer)\s+than", BinaryOp::Ge),
        (r"(?:is\s+)?greater\s+than\s+or\s+equal\s+to", BinaryOp::Ge),
        (r"(?:is\s+)?less\s+than\s+or\s+equal\s+to", BinaryOp::Le),
        (r"is\s+at\s+least", BinaryOp::Ge),
        (r"is\s+at\s+most", BinaryOp::Le),
        (r"(?:is\s+)?(?:greater|more)\s+than", BinaryOp::Gt),
        (r"(?:is\s+)?(?:less|fewer)\s+than", BinaryOp::Lt),
        (
            r"(?:is\s+not\s+equal\s+to|does\s+not\s+equal|is\s+not)",
            BinaryOp::Ne,
        ),
        (r"(?:is\s+equal\s+to|equals|is)", BinaryOp::Eq),
    ]
    .into_iter()
    .map(|(phrase, op)| (compile(&format!(r"(?i)^(.+?)\s+{phrase}\s+(.+)$")), op))
    .chain(
        [
            (">=", BinaryOp::Ge),
            ("<=", BinaryOp::Le),
            ("!==|!=|<>", BinaryOp::Ne),
            ("===|==", BinaryOp::Eq),
            (">", BinaryOp::Gt),
            ("<", BinaryOp::Lt),
            ("=", BinaryOp::Eq),
        ]
        .into_iter()
        .map(|(symbol, op)| (compile(&format!(r"^(.+?)\s*(?:{symbol})\s*(.+)$")), op)),
    )
    .collect()
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"^-?\d+(\.\d+)?$"));
static CALL: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\w+)\s*\((.*)\)$"));
static INDEX: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\w+)\[(.+)\]$"));
static PROPERTY: LazyLock<Regex> = LazyLock::new(|| compile(r"^([A-Za-z_]\w*)\.(\w+)$"));
static NEGATED_NAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^-([A-Za-z_]\w*)$"));

/// Separators for logical conditions, lowest precedence first.
const LOGICAL: &[&[(&str, BinaryOp)]] = &[
    &[(" or ", BinaryOp::Or), (" || ", BinaryOp::Or)],
    &[(" and ", BinaryOp::And), (" && ", BinaryOp::And)],
];

/// Arithmetic separators, lowest precedence first. Symbols must be
/// surrounded by whitespace so hyphenated words stay intact.
const ARITHMETIC: &[&[(&str, BinaryOp)]] = &[
    &[
        (" + ", BinaryOp::Add),
        (" plus ", BinaryOp::Add),
        (" - ", BinaryOp::Sub),
        (" minus ", BinaryOp::Sub),
    ],
    &[
        (" * ", BinaryOp::Mul),
        (" times ", BinaryOp::Mul),
        (" multiplied by ", BinaryOp::Mul),
        (" / ", BinaryOp::Div),
        (" divided by ", BinaryOp::Div),
        (" % ", BinaryOp::Mod),
        (" mod ", BinaryOp::Mod),
        (" modulo ", BinaryOp::Mod),
    ],
];

/// Parse a condition: logical connectives, negation, then the ordered
/// comparison list. A clause matching no comparison is a truthiness test
/// on the clause read as a value.
pub fn parse_condition(text: &str) -> Node {
    let text = text.trim();

    if let Some(inner) = strip_parens(text) {
        return parse_condition(inner);
    }

    for level in LOGICAL {
        if let Some((left, op, right)) = split_last(text, level) {
            return Node::binary(parse_condition(left), op, parse_condition(right));
        }
    }

    if let Some(rest) = strip_word(text, "not") {
        return Node::unary(UnaryOp::Not, parse_condition(rest));
    }

    // Match on the top-level text only; operands are cut from the original.
    let visible = mask_nested(text);
    for (pattern, op) in COMPARISONS.iter() {
        let Some(caps) = pattern.captures(&visible) else {
            continue;
        };
        let left = caps.get(1).and_then(|m| text.get(m.range()));
        let right = caps.get(2).and_then(|m| text.get(m.range()));
        if let (Some(left), Some(right)) = (left, right) {
            return Node::binary(parse_value(left), *op, parse_value(right));
        }
    }

    parse_value(text)
}

/// Parse a value: quoted string, number, boolean, null, then compound
/// expressions, then an identifier carrying the text as written.
pub fn parse_value(text: &str) -> Node {
    let text = text.trim();

    if let Some(s) = unquote(text) {
        return Node::string(s);
    }
    if NUMBER.is_match(text) {
        if let Ok(n) = text.parse::<f64>() {
            return Node::number(n);
        }
    }
    match text.to_ascii_lowercase().as_str() {
        "true" => return Node::boolean(true),
        "false" => return Node::boolean(false),
        "null" | "none" | "nil" => return Node::literal(Literal::Null),
        _ => {}
    }

    if let Some(inner) = strip_parens(text) {
        return parse_value(inner);
    }
    for level in ARITHMETIC {
        if let Some((left, op, right)) = split_last(text, level) {
            return Node::binary(parse_value(left), op, parse_value(right));
        }
    }
    if let Some(rest) = strip_word(text, "not") {
        return Node::unary(UnaryOp::Not, parse_value(rest));
    }
    if let Some(caps) = NEGATED_NAME.captures(text) {
        return Node::unary(UnaryOp::Neg, Node::ident(&caps[1]));
    }
    if let Some(caps) = CALL.captures(text) {
        return Node::call(&caps[1], parse_arguments(&caps[2]));
    }
    if let Some(caps) = INDEX.captures(text) {
        return Node::array_access(&caps[1], parse_value(&caps[2]));
    }
    if let Some(caps) = PROPERTY.captures(text) {
        return Node::property(&caps[1], &caps[2]);
    }

    Node::ident(text)
}

/// Parse a comma-separated argument list.
pub fn parse_arguments(text: &str) -> Vec<Node> {
    split_all(text, ',')
        .into_iter()
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(parse_value)
        .collect()
}

/// Contents of a string quoted with `"` or `'`, with backslash escapes
/// resolved. `None` when an unescaped quote occurs inside.
fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                escaped @ ('\\' | '"' | '\'') => out.push(escaped),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            c if c == quote => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

/// Text after a leading keyword and whitespace, matched case-insensitively.
fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let head = text.get(..word.len())?;
    let rest = &text[word.len()..];
    (head.eq_ignore_ascii_case(word) && rest.starts_with(char::is_whitespace))
        .then(|| rest.trim_start())
}

/// Inner text when the whole of `text` is one parenthesised group.
fn strip_parens(text: &str) -> Option<&str> {
    if !text.starts_with('(') || !text.ends_with(')') {
        return None;
    }
    let close = scan(text).find(|&(_, c, depth)| c == ')' && depth == 0)?.0;
    (close == text.len() - 1).then(|| &text[1..close])
}

/// Walk `text` yielding `(byte index, char, bracket depth after the char)`
/// for characters outside quotes. Brackets inside quotes are ignored, and a
/// backslash inside quotes escapes the next character.
fn scan(text: &str) -> impl Iterator<Item = (usize, char, usize)> + '_ {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    text.char_indices().filter_map(move |(i, c)| {
        let before = prev.replace(c);
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                None
            }
            None => {
                match c {
                    // An apostrophe inside a word ("don't") is not a quote.
                    '"' | '\'' if !before.is_some_and(char::is_alphanumeric) => {
                        quote = Some(c);
                        return None;
                    }
                    '(' | '[' | '{' => depth += 1,
                    ')' | ']' | '}' => depth = depth.saturating_sub(1),
                    _ => {}
                }
                Some((i, c, depth))
            }
        }
    })
}

/// Byte offsets of top-level (depth 0, unquoted) positions.
fn top_level(text: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut depth_before = 0usize;
    for (i, c, depth) in scan(text) {
        if depth_before == 0 && !matches!(c, '(' | '[' | '{') {
            positions.push(i);
        }
        depth_before = depth;
    }
    positions
}

/// `text` with every byte outside a top-level position replaced by `_`.
/// Offsets into the result index the same characters in `text`.
fn mask_nested(text: &str) -> String {
    let mut masked = vec![b'_'; text.len()];
    for i in top_level(text) {
        let len = text[i..].chars().next().map_or(1, char::len_utf8);
        masked[i..i + len].copy_from_slice(&text.as_bytes()[i..i + len]);
    }
    String::from_utf8(masked).unwrap_or_default()
}

/// Split at the last top-level occurrence of any separator in `level`.
/// The last occurrence makes chains left-associative.
fn split_last<'a>(text: &'a str, level: &[(&str, BinaryOp)]) -> Option<(&'a str, BinaryOp, &'a str)> {
    let mut best: Option<(usize, usize, BinaryOp)> = None;
    for i in top_level(text) {
        for &(sep, op) in level {
            let Some(candidate) = text.get(i..i + sep.len()) else {
                continue;
            };
            if !candidate.eq_ignore_ascii_case(sep) {
                continue;
            }
            // "greater than or equal to" is one comparison, not a disjunction.
            if op == BinaryOp::Or && starts_with_ignore_case(&text[i + sep.len()..], "equal") {
                continue;
            }
            if i == 0 || i + sep.len() >= text.len() {
                continue;
            }
            best = Some((i, sep.len(), op));
        }
    }
    let (i, len, op) = best?;
    Some((&text[..i], op, &text[i + len..]))
}

/// Split at every top-level occurrence of `sep`.
fn split_all(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for i in top_level(text) {
        if text[i..].starts_with(sep) {
            parts.push(&text[start..i]);
            start = i + sep.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
