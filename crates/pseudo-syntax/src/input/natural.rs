//! Natural-language reader.
//!
//! Line oriented: each non-blank line is trimmed and classified by an
//! ordered list of line rules, first match wins. Block constructs (if,
//! loops, functions) recursively consume following lines until their own
//! terminator. A line no rule claims becomes a `Comment` carrying the line
//! verbatim, so no input is ever rejected.
//!
//! The same rules read canonical pseudocode (`SET x TO 5`, `IF .. THEN`,
//! `END IF`), since every keyword is matched case-insensitively.

use super::value::{parse_arguments, parse_condition, parse_value};
use crate::ir::{BinaryOp, Literal, Node, UnaryOp};
use crate::tags::SourceTag;
use crate::traits::{ReadError, Reader};
use regex::Regex;
use std::sync::LazyLock;

/// Static instance of the natural-language reader for registry.
pub static NATURAL_READER: NaturalReader = NaturalReader {
    tag: SourceTag::Natural,
};

/// Static instance of the pseudocode reader for registry.
pub static PSEUDOCODE_READER: NaturalReader = NaturalReader {
    tag: SourceTag::Pseudocode,
};

/// Reader for natural language and canonical pseudocode.
pub struct NaturalReader {
    tag: SourceTag,
}

impl Reader for NaturalReader {
    fn language(&self) -> SourceTag {
        self.tag
    }

    fn read(&self, source: &str) -> Result<Vec<Node>, ReadError> {
        Ok(parse_natural(source))
    }
}

/// Parse natural-language text into a statement sequence. Never fails.
pub fn parse_natural(text: &str) -> Vec<Node> {
    let lines: Vec<&str> = text.lines().collect();
    let mut cursor = Cursor {
        lines: &lines,
        pos: 0,
    };
    let (body, _) = cursor.parse_block(Block::Program, Scope::default());
    body
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("line pattern")
}

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| compile($re));
    };
}

// Declarations
pattern!(
    DECL_KEYWORD,
    r"(?i)^(?:set|create|make|declare|define|let|var|constant|const)\b"
);
pattern!(
    DECL_TYPED,
    r"(?i)^declare\s+(\w+)\s+as\s+\w+\s+with\s+(?:value\s+)?(.+)$"
);
pattern!(
    DECL,
    r"(?i)^(set|create|make|declare|define|let|var|constant|const)\s+(?:(?:a|an|the)\s+)?(?:new\s+)?(?:(variable|var|constant)\s+)?(?:(?:called|named)\s+)?(\w+)\s*(?:=|\bto\b|\bequal\s+to\b|\bequals?\b|\bis\b|\bas\b|\bbe\b)\s*(.+)$"
);
pattern!(
    DECL_BARE,
    r"(?i)^(declare|create|define|let|var)\s+(?:(?:a|an|the)\s+)?(?:new\s+)?(?:(variable|var|constant)\s+)?(?:(?:called|named)\s+)?(\w+)\s*;?$"
);

// Conditionals
pattern!(IF, r"(?i)^if\s+(.+?)(?:\s*,?\s+then)?\s*:?$");
pattern!(
    ELSE_IF,
    r"(?i)^(?:else\s*if|otherwise\s+if|elif|elsif)\s+(.+?)(?:\s*,?\s+then)?\s*:?$"
);
pattern!(ELSE, r"(?i)^(?:else|otherwise)\s*[:,]?$");
pattern!(END, r"(?i)^end\s*(.*?)\s*[.;:]?$");

// Loops
pattern!(LOOP_KEYWORD, r"(?i)^(?:while|loop|repeat|for)\b");
pattern!(WHILE, r"(?i)^while\s+(.+?)(?:\s+do)?\s*:?$");
pattern!(REPEAT_TIMES, r"(?i)^(?:repeat|loop)\s+(\w+)\s+times?\s*:?$");
pattern!(
    REPEAT_CONDITION,
    r"(?i)^(?:repeat|loop)\s+(while|until)\s+(.+?)(?:\s+do)?\s*:?$"
);
pattern!(
    FOR_EACH,
    r"(?i)^for\s+(?:each|every)\s+(\w+)\s+in\s+(.+?)(?:\s+do)?\s*:?$"
);
pattern!(
    FOR_RANGE,
    r"(?i)^for\s+(\w+)\s+from\s+(.+?)\s+to\s+(.+?)(?:\s+step\s+(.+?))?(?:\s+do)?\s*:?$"
);

// Output
pattern!(
    PRINT_CALL,
    r"(?i)^(?:print|display|output|show|log)\s*\((.*)\)\s*;?$"
);
pattern!(
    PRINT,
    r"(?i)^(?:print|display|output|show|log)(?:\s*:\s*|\s+)(.+?)\s*;?$"
);
pattern!(ASSIGN_VERB, r"(?i)^(?:is|becomes|equals|=)(?:\s|$)");

// Functions
pattern!(
    FUNCTION,
    r"(?i)^(?:define\s+)?(?:(?:a|the)\s+)?(?:function|procedure|func)\s+(\w+)\s*(?:\((.*?)\))?(?:\s+(?:with|taking)\s+(?:(?:parameters?|params|arguments?|inputs?)\s+)?(.+?))?(?:\s+returns?\s+\w+)?\s*:?$"
);
pattern!(RETURN, r"(?i)^return(?:\s+(.+?))?\s*;?$");
pattern!(CALL, r"(?i)^(?:call\s+)?(\w+)\s*\((.*)\)\s*;?$");
pattern!(CALL_WORDS, r"(?i)^call\s+(\w+)(?:\s+with\s+(.+?))?\s*;?$");

// Assignments
pattern!(ASSIGN_SYMBOL, r"^(\w+)\s*=\s*([^=].*?)\s*;?$");
pattern!(
    ASSIGN_WORDS,
    r"(?i)^(\w+)\s+(?:is\s+now|is|becomes|equals)\s+(.+)$"
);
pattern!(
    STEP_BY_ONE,
    r"(?i)^(increment|decrement)\s+(\w+)(?:\s+by\s+(.+))?$"
);
pattern!(STEP_BY, r"(?i)^(increase|decrease)\s+(\w+)\s+by\s+(.+)$");
pattern!(ADD_TO, r"(?i)^add\s+(.+?)\s+to\s+(\w+)$");
pattern!(SUBTRACT_FROM, r"(?i)^subtract\s+(.+?)\s+from\s+(\w+)$");
pattern!(SCALE_BY, r"(?i)^(multiply|divide)\s+(\w+)\s+by\s+(.+)$");
pattern!(POSTFIX_STEP, r"^(\w+)\s*(\+\+|--)\s*;?$");

/// Induction variable names for synthesized counting loops, by nesting.
const INDUCTION_NAMES: [&str; 3] = ["i", "j", "k"];

fn induction_name(depth: usize) -> String {
    INDUCTION_NAMES
        .get(depth)
        .map_or_else(|| format!("i{depth}"), |name| name.to_string())
}

/// Parse state threaded into nested blocks.
#[derive(Debug, Clone, Copy, Default)]
struct Scope {
    /// Counting loops enclosing the current line.
    counting_loops: usize,
}

impl Scope {
    fn enter_counting_loop(self) -> Self {
        Self {
            counting_loops: self.counting_loops + 1,
        }
    }
}

/// The construct whose body is being read; decides which lines close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Program,
    If,
    Else,
    While,
    Repeat,
    For,
    Function,
}

/// How a block ended.
#[derive(Debug, PartialEq, Eq)]
enum Closer {
    End,
    Else,
    ElseIf(String),
}

impl Block {
    fn name(self) -> &'static str {
        match self {
            Block::Program => "program",
            Block::If => "if",
            Block::Else => "else",
            Block::While => "while",
            Block::Repeat => "repeat",
            Block::For => "for",
            Block::Function => "function",
        }
    }

    /// Words accepted after `end` to close this block. A bare `end`
    /// closes any block.
    fn end_words(self) -> &'static [&'static str] {
        match self {
            Block::Program => &[],
            Block::If | Block::Else => &["if"],
            Block::While => &["while"],
            Block::Repeat => &["repeat", "loop"],
            Block::For => &["for", "for each", "foreach"],
            Block::Function => &["function", "procedure", "func"],
        }
    }

    fn closer(self, line: &str) -> Option<Closer> {
        if self == Block::Program {
            return None;
        }
        if self == Block::If {
            if let Some(caps) = ELSE_IF.captures(line) {
                return Some(Closer::ElseIf(caps[1].to_string()));
            }
            if ELSE.is_match(line) {
                return Some(Closer::Else);
            }
        }
        let caps = END.captures(line)?;
        let rest = caps[1]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        (rest.is_empty() || self.end_words().contains(&rest.as_str())).then_some(Closer::End)
    }
}

struct Cursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl Cursor<'_> {
    /// Read statements until this block's terminator or end of input.
    fn parse_block(&mut self, block: Block, scope: Scope) -> (Vec<Node>, Option<Closer>) {
        let lines = self.lines;
        let mut body = Vec::new();
        while let Some(raw) = lines.get(self.pos) {
            let line = raw.trim();
            self.pos += 1;
            if line.is_empty() {
                continue;
            }
            if let Some(closer) = block.closer(line) {
                return (body, Some(closer));
            }
            body.extend(self.parse_line(line, scope));
        }
        if block != Block::Program {
            tracing::debug!(
                block = block.name(),
                "input ended before the block's terminator"
            );
        }
        (body, None)
    }

    fn parse_line(&mut self, line: &str, scope: Scope) -> Vec<Node> {
        for (name, rule) in LINE_RULES {
            if let Some(nodes) = rule(self, line, scope) {
                tracing::trace!(rule = name, line, "classified line");
                return nodes;
            }
        }
        tracing::trace!(line, "unrecognized line kept as comment");
        vec![Node::comment(line)]
    }
}

type LineRule = fn(&mut Cursor<'_>, &str, Scope) -> Option<Vec<Node>>;

/// Line rules in priority order. A rule returns `None` without consuming
/// anything when its pattern does not apply, so a line whose leading
/// keyword looks right but whose shape does not falls through to later
/// rules.
const LINE_RULES: &[(&str, LineRule)] = &[
    ("declaration", declaration),
    ("if", conditional),
    ("loop", loop_statement),
    ("print", print),
    ("comment", comment),
    ("function", function),
    ("return", return_statement),
    ("call", call),
    ("assignment", assignment),
];

fn declaration(_: &mut Cursor<'_>, line: &str, _: Scope) -> Option<Vec<Node>> {
    if !DECL_KEYWORD.is_match(line) {
        return None;
    }
    if let Some(caps) = DECL_TYPED.captures(line) {
        return Some(vec![Node::var(&caps[1], Some(parse_value(&caps[2])))]);
    }
    if let Some(caps) = DECL.captures(line) {
        let constant = is_constant(&caps[1]) || caps.get(2).is_some_and(|m| is_constant(m.as_str()));
        let name = &caps[3];
        let value = parse_value(&caps[4]);
        return Some(vec![if constant {
            Node::constant(name, value)
        } else {
            Node::var(name, Some(value))
        }]);
    }
    if let Some(caps) = DECL_BARE.captures(line) {
        return Some(vec![Node::var(&caps[3], None)]);
    }
    None
}

fn is_constant(word: &str) -> bool {
    word.eq_ignore_ascii_case("constant") || word.eq_ignore_ascii_case("const")
}

/// An `if` and the `else if` / `else` branches chained to it. Each branch
/// becomes a sibling statement, in source order.
fn conditional(cursor: &mut Cursor<'_>, line: &str, scope: Scope) -> Option<Vec<Node>> {
    let caps = IF.captures(line)?;
    let mut condition = parse_condition(&caps[1]);
    let mut first = true;
    let mut nodes = Vec::new();
    loop {
        let (body, closer) = cursor.parse_block(Block::If, scope);
        nodes.push(if first {
            Node::if_stmt(condition, body)
        } else {
            Node::else_if(condition, body)
        });
        match closer {
            Some(Closer::ElseIf(text)) => {
                condition = parse_condition(&text);
                first = false;
            }
            Some(Closer::Else) => {
                let (body, _) = cursor.parse_block(Block::Else, scope);
                nodes.push(Node::else_stmt(body));
                break;
            }
            Some(Closer::End) | None => break,
        }
    }
    Some(nodes)
}

fn loop_statement(cursor: &mut Cursor<'_>, line: &str, scope: Scope) -> Option<Vec<Node>> {
    if !LOOP_KEYWORD.is_match(line) {
        return None;
    }

    if let Some(caps) = WHILE.captures(line) {
        let condition = parse_condition(&caps[1]);
        let (body, _) = cursor.parse_block(Block::While, scope);
        return Some(vec![Node::while_loop(condition, body)]);
    }

    if let Some(caps) = REPEAT_TIMES.captures(line) {
        let var = induction_name(scope.counting_loops);
        let bound = parse_value(&caps[1]);
        let (body, _) = cursor.parse_block(Block::Repeat, scope.enter_counting_loop());
        return Some(vec![counting_loop(
            &var,
            Node::number(0),
            BinaryOp::Lt,
            bound,
            None,
            body,
        )]);
    }

    if let Some(caps) = REPEAT_CONDITION.captures(line) {
        let condition = parse_condition(&caps[2]);
        let condition = if caps[1].eq_ignore_ascii_case("until") {
            Node::unary(UnaryOp::Not, condition)
        } else {
            condition
        };
        let (body, _) = cursor.parse_block(Block::Repeat, scope);
        return Some(vec![Node::while_loop(condition, body)]);
    }

    if let Some(caps) = FOR_EACH.captures(line) {
        let iterable = parse_value(&caps[2]);
        let (body, _) = cursor.parse_block(Block::For, scope);
        return Some(vec![Node::for_each(&caps[1], iterable, body)]);
    }

    if let Some(caps) = FOR_RANGE.captures(line) {
        let start = parse_value(&caps[2]);
        let end = parse_value(&caps[3]);
        let step = caps.get(4).map(|m| parse_value(m.as_str()));
        // A negative literal step counts down to the bound.
        let op = match &step {
            Some(Node::Literal {
                value: Literal::Number(n),
            }) if *n < 0.0 => BinaryOp::Ge,
            _ => BinaryOp::Le,
        };
        let (body, _) = cursor.parse_block(Block::For, scope.enter_counting_loop());
        return Some(vec![counting_loop(&caps[1], start, op, end, step, body)]);
    }

    None
}

/// `for (var = start; var <op> bound; var++ | var-- | var = var ± step)`.
fn counting_loop(
    var: &str,
    start: Node,
    op: BinaryOp,
    bound: Node,
    step: Option<Node>,
    body: Vec<Node>,
) -> Node {
    let literal = step.as_ref().and_then(|step| match step {
        Node::Literal {
            value: Literal::Number(n),
        } => Some(*n),
        _ => None,
    });
    let increment = match (step, literal) {
        (None, _) => Node::unary(UnaryOp::Increment, Node::ident(var)),
        (_, Some(n)) if n == 1.0 => Node::unary(UnaryOp::Increment, Node::ident(var)),
        (_, Some(n)) if n == -1.0 => Node::unary(UnaryOp::Decrement, Node::ident(var)),
        (_, Some(n)) if n < 0.0 => Node::assign(
            var,
            Node::binary(Node::ident(var), BinaryOp::Sub, Node::number(-n)),
        ),
        (Some(step), _) => Node::assign(var, Node::binary(Node::ident(var), BinaryOp::Add, step)),
    };
    Node::for_loop(
        Node::var(var, Some(start)),
        Node::binary(Node::ident(var), op, bound),
        increment,
        body,
    )
}

fn print(_: &mut Cursor<'_>, line: &str, _: Scope) -> Option<Vec<Node>> {
    if let Some(caps) = PRINT_CALL.captures(line) {
        return Some(vec![Node::print(parse_value(&caps[1]))]);
    }
    let caps = PRINT.captures(line)?;
    // "output is 5" assigns to a variable named output.
    if ASSIGN_VERB.is_match(&caps[1]) {
        return None;
    }
    Some(vec![Node::print(parse_value(&caps[1]))])
}

fn comment(_: &mut Cursor<'_>, line: &str, _: Scope) -> Option<Vec<Node>> {
    let text = line
        .strip_prefix("//")
        .or_else(|| line.strip_prefix('#'))?;
    Some(vec![Node::comment(text.trim_start())])
}

fn function(cursor: &mut Cursor<'_>, line: &str, _: Scope) -> Option<Vec<Node>> {
    let caps = FUNCTION.captures(line)?;
    let parameters = match (caps.get(2), caps.get(3)) {
        (Some(list), _) => split_parameters(list.as_str()),
        (None, Some(list)) => split_parameters(list.as_str()),
        (None, None) => Vec::new(),
    };
    // A function body starts a fresh counting-loop scope.
    let (body, _) = cursor.parse_block(Block::Function, Scope::default());
    Some(vec![Node::function(&caps[1], parameters, body)])
}

/// Parameter names from "a, b", "a and b", or "a: int, b: str".
fn split_parameters(list: &str) -> Vec<String> {
    list.split(',')
        .flat_map(|part| part.split(" and "))
        .filter_map(|param| {
            let name = param.split(':').next()?.trim();
            let name = name.split_whitespace().last()?;
            Some(name.to_string())
        })
        .collect()
}

fn return_statement(_: &mut Cursor<'_>, line: &str, _: Scope) -> Option<Vec<Node>> {
    let caps = RETURN.captures(line)?;
    let value = caps.get(1).map(|m| parse_value(m.as_str()));
    Some(vec![Node::return_stmt(value)])
}

fn call(_: &mut Cursor<'_>, line: &str, _: Scope) -> Option<Vec<Node>> {
    if let Some(caps) = CALL.captures(line) {
        return Some(vec![Node::call(&caps[1], parse_arguments(&caps[2]))]);
    }
    let caps = CALL_WORDS.captures(line)?;
    let arguments = caps
        .get(2)
        .map(|m| {
            m.as_str()
                .split(',')
                .flat_map(|part| part.split(" and "))
                .map(str::trim)
                .filter(|arg| !arg.is_empty())
                .map(parse_value)
                .collect()
        })
        .unwrap_or_default();
    Some(vec![Node::call(&caps[1], arguments)])
}

fn assignment(_: &mut Cursor<'_>, line: &str, _: Scope) -> Option<Vec<Node>> {
    let step = |target: &str, op: BinaryOp, amount: Node| {
        Some(vec![Node::assign(
            target,
            Node::binary(Node::ident(target), op, amount),
        )])
    };

    if let Some(caps) = POSTFIX_STEP.captures(line) {
        let op = if &caps[2] == "++" {
            BinaryOp::Add
        } else {
            BinaryOp::Sub
        };
        return step(&caps[1], op, Node::number(1));
    }
    if let Some(caps) = STEP_BY_ONE.captures(line) {
        let op = if caps[1].eq_ignore_ascii_case("increment") {
            BinaryOp::Add
        } else {
            BinaryOp::Sub
        };
        let amount = caps
            .get(3)
            .map_or_else(|| Node::number(1), |m| parse_value(m.as_str()));
        return step(&caps[2], op, amount);
    }
    if let Some(caps) = STEP_BY.captures(line) {
        let op = if caps[1].eq_ignore_ascii_case("increase") {
            BinaryOp::Add
        } else {
            BinaryOp::Sub
        };
        return step(&caps[2], op, parse_value(&caps[3]));
    }
    if let Some(caps) = SCALE_BY.captures(line) {
        let op = if caps[1].eq_ignore_ascii_case("multiply") {
            BinaryOp::Mul
        } else {
            BinaryOp::Div
        };
        return step(&caps[2], op, parse_value(&caps[3]));
    }
    if let Some(caps) = ADD_TO.captures(line) {
        return step(&caps[2], BinaryOp::Add, parse_value(&caps[1]));
    }
    if let Some(caps) = SUBTRACT_FROM.captures(line) {
        return step(&caps[2], BinaryOp::Sub, parse_value(&caps[1]));
    }
    if let Some(caps) = ASSIGN_SYMBOL.captures(line) {
        return Some(vec![Node::assign(&caps[1], parse_value(&caps[2]))]);
    }
    if let Some(caps) = ASSIGN_WORDS.captures(line) {
        return Some(vec![Node::assign(&caps[1], parse_value(&caps[2]))]);
    }
    None
}
