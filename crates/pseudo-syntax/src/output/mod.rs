//! Output writers - emit a pseudocode tree as source code.
//!
//! Every writer walks statements into a line list with the nesting depth
//! passed down by value, and renders expressions through [`Syntax`], whose
//! per-target tables (operators, literals, quoting) fall back to the
//! canonical tokens.

#[cfg(feature = "write-go")]
pub mod go;
#[cfg(feature = "write-java")]
pub mod java;
#[cfg(feature = "write-javascript")]
pub mod javascript;
#[cfg(feature = "write-pseudocode")]
pub mod pseudocode;
#[cfg(feature = "write-python")]
pub mod python;
#[cfg(feature = "write-scala")]
pub mod scala;
#[cfg(feature = "write-typescript")]
pub mod typescript;

#[cfg(feature = "write-go")]
pub use go::{GO_WRITER, GoWriter, GoWriterImpl};
#[cfg(feature = "write-java")]
pub use java::{JAVA_WRITER, JavaWriter, JavaWriterImpl};
#[cfg(feature = "write-javascript")]
pub use javascript::{JAVASCRIPT_WRITER, JavaScriptWriter, JavaScriptWriterImpl};
#[cfg(feature = "write-pseudocode")]
pub use pseudocode::{PSEUDOCODE_WRITER, PseudocodeWriter, PseudocodeWriterImpl};
#[cfg(feature = "write-python")]
pub use python::{PYTHON_WRITER, PythonWriter, PythonWriterImpl};
#[cfg(feature = "write-scala")]
pub use scala::{SCALA_WRITER, ScalaWriter, ScalaWriterImpl};
#[cfg(feature = "write-typescript")]
pub use typescript::{TYPESCRIPT_WRITER, TypeScriptWriter, TypeScriptWriterImpl};

use crate::ir::{BinaryOp, DataKind, Literal, Node, UnaryOp};
use crate::options::GenerateOptions;

/// Line buffer. Lines are joined with `\n`; there is no trailing newline.
pub(crate) struct Code<'o> {
    lines: Vec<String>,
    unit: String,
    options: &'o GenerateOptions,
}

impl<'o> Code<'o> {
    pub(crate) fn new(options: &'o GenerateOptions) -> Self {
        Self {
            lines: Vec::new(),
            unit: options.indent_unit(),
            options,
        }
    }

    pub(crate) fn options(&self) -> &'o GenerateOptions {
        self.options
    }

    pub(crate) fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        let mut line = self.unit.repeat(depth);
        line.push_str(text.as_ref());
        self.lines.push(line);
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Text of the placeholder emitted for a node with no rendering.
pub(crate) fn unsupported(node: &Node) -> String {
    format!("unsupported node: {}", node.kind())
}

/// One branch of an if chain; `condition` is `None` for the final else.
pub(crate) struct Branch<'n> {
    pub condition: Option<&'n Node>,
    pub body: &'n [Node],
}

/// A statement, or an if statement joined with its else-if/else siblings.
pub(crate) enum Item<'n> {
    Chain(Vec<Branch<'n>>),
    Stmt(&'n Node),
}

/// Group each `IfStatement` with the `ElseIfStatement`s and optional
/// `ElseStatement` directly following it. Else siblings with no preceding
/// if stay as single statements.
pub(crate) fn group(body: &[Node]) -> Vec<Item<'_>> {
    let mut items = Vec::new();
    let mut iter = body.iter().peekable();
    while let Some(node) = iter.next() {
        let Node::IfStatement { condition, body } = node else {
            items.push(Item::Stmt(node));
            continue;
        };
        let mut branches = vec![Branch {
            condition: Some(condition),
            body,
        }];
        while let Some(Node::ElseIfStatement { condition, body }) = iter.peek() {
            branches.push(Branch {
                condition: Some(condition),
                body,
            });
            iter.next();
        }
        if let Some(Node::ElseStatement { body }) = iter.peek() {
            branches.push(Branch {
                condition: None,
                body,
            });
            iter.next();
        }
        items.push(Item::Chain(branches));
    }
    items
}

/// A `ForLoop` shaped `v = start; v <op> end; v += step` whose step is a
/// number literal. Ascending loops compare with `<`/`<=`, descending loops
/// with `>`/`>=`; a loop whose step sign disagrees with its comparison, or
/// whose step is not a literal, is not a counting loop.
pub(crate) struct CountingLoop<'n> {
    pub var: &'n str,
    pub start: &'n Node,
    pub end: &'n Node,
    pub inclusive: bool,
    /// Signed step; `1.0` for `v++`, `-1.0` for `v--`.
    pub step: f64,
}

impl<'n> CountingLoop<'n> {
    pub(crate) fn recognize(init: &'n Node, condition: &'n Node, increment: &'n Node) -> Option<Self> {
        let (var, start) = match init {
            Node::VariableDeclaration {
                name,
                value: Some(value),
                ..
            } => (name.as_str(), value.as_ref()),
            Node::Assignment { target, value } => (target.as_str(), value.as_ref()),
            _ => return None,
        };

        let Node::BinaryExpression {
            operator,
            left,
            right,
        } = condition
        else {
            return None;
        };
        if !is_ident(left, var) {
            return None;
        }

        let step = match increment {
            Node::UnaryExpression { operator, operand } if is_ident(operand, var) => match operator {
                UnaryOp::Increment => 1.0,
                UnaryOp::Decrement => -1.0,
                _ => return None,
            },
            Node::Assignment { target, value } if target == var => match value.as_ref() {
                Node::BinaryExpression {
                    operator: op @ (BinaryOp::Add | BinaryOp::Sub),
                    left,
                    right,
                } if is_ident(left, var) => {
                    let amount = number(right)?;
                    if *op == BinaryOp::Add { amount } else { -amount }
                }
                _ => return None,
            },
            _ => return None,
        };

        let inclusive = match (operator, step > 0.0, step < 0.0) {
            (BinaryOp::Lt, true, _) | (BinaryOp::Gt, _, true) => false,
            (BinaryOp::Le, true, _) | (BinaryOp::Ge, _, true) => true,
            _ => return None,
        };

        Some(Self {
            var,
            start,
            end: right,
            inclusive,
            step,
        })
    }

    /// The step as a node, when it is not the unit step.
    pub(crate) fn explicit_step(&self) -> Option<Node> {
        (self.step != 1.0).then(|| Node::number(self.step))
    }

    fn direction(&self) -> f64 {
        self.step.signum()
    }

    /// Bound of the values taken, for targets whose ranges are inclusive.
    pub(crate) fn last(&self) -> Node {
        if self.inclusive {
            self.end.clone()
        } else {
            offset(self.end, -self.direction())
        }
    }

    /// First value past the range, for targets whose ranges are exclusive.
    pub(crate) fn stop(&self) -> Node {
        if self.inclusive {
            offset(self.end, self.direction())
        } else {
            self.end.clone()
        }
    }
}

/// `node + delta`, folded when `node` is a number literal.
fn offset(node: &Node, delta: f64) -> Node {
    match node {
        Node::Literal {
            value: Literal::Number(n),
        } => Node::number(n + delta),
        _ if delta < 0.0 => Node::binary(node.clone(), BinaryOp::Sub, Node::number(-delta)),
        _ => Node::binary(node.clone(), BinaryOp::Add, Node::number(delta)),
    }
}

fn number(node: &Node) -> Option<f64> {
    match node {
        Node::Literal {
            value: Literal::Number(n),
        } => Some(*n),
        _ => None,
    }
}

fn is_ident(node: &Node, name: &str) -> bool {
    matches!(node, Node::Identifier { name: n } if n == name)
}

pub(crate) fn is_number(node: &Node, expected: f64) -> bool {
    matches!(node, Node::Literal { value: Literal::Number(n) } if *n == expected)
}

/// Recast a unary `++`/`--` as `v = v + 1`/`v = v - 1`, for targets
/// without increment operators. Other nodes are returned as-is.
pub(crate) fn as_assignment(node: &Node) -> Node {
    match node {
        Node::UnaryExpression { operator, operand } => match (operator, operand.as_ref()) {
            (UnaryOp::Increment | UnaryOp::Decrement, Node::Identifier { name }) => {
                let op = if *operator == UnaryOp::Increment {
                    BinaryOp::Add
                } else {
                    BinaryOp::Sub
                };
                Node::assign(name, Node::binary(Node::ident(name), op, Node::number(1)))
            }
            _ => node.clone(),
        },
        _ => node.clone(),
    }
}

/// `v = v op e` as `(v, op, e)`, for compound-assignment rendering.
pub(crate) fn compound(node: &Node) -> Option<(&str, BinaryOp, &Node)> {
    let Node::Assignment { target, value } = node else {
        return None;
    };
    let Node::BinaryExpression {
        operator,
        left,
        right,
    } = value.as_ref()
    else {
        return None;
    };
    let arithmetic = matches!(
        operator,
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
    );
    (arithmetic && is_ident(left, target)).then_some((target.as_str(), *operator, right.as_ref()))
}

/// Whether any `ReturnStatement` in `body` carries a value. Nested
/// function bodies are not searched.
pub(crate) fn returns_value(body: &[Node]) -> bool {
    body.iter().any(|node| match node {
        Node::ReturnStatement { value } => value.is_some(),
        Node::FunctionDeclaration { .. } => false,
        other => other.body().is_some_and(returns_value),
    })
}

/// Whether the tree contains a print statement anywhere.
pub(crate) fn prints(tree: &[Node]) -> bool {
    tree.iter()
        .any(|node| node.any(&|n| matches!(n, Node::PrintStatement { .. })))
}

/// Static type guessed from an expression, for typed targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inferred {
    Int,
    Float,
    Str,
    Bool,
    Unknown,
}

pub(crate) fn infer(node: &Node) -> Inferred {
    match node {
        Node::Literal { value } => match value.data_kind() {
            DataKind::Number if value.is_integer() => Inferred::Int,
            DataKind::Number => Inferred::Float,
            DataKind::String => Inferred::Str,
            DataKind::Boolean => Inferred::Bool,
            DataKind::Null => Inferred::Unknown,
        },
        Node::BinaryExpression {
            operator,
            left,
            right,
        } => match operator {
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::Le
            | BinaryOp::Ge
            | BinaryOp::And
            | BinaryOp::Or => Inferred::Bool,
            _ => match (infer(left), infer(right)) {
                (Inferred::Str, _) | (_, Inferred::Str) if *operator == BinaryOp::Add => {
                    Inferred::Str
                }
                (Inferred::Int, Inferred::Int) => Inferred::Int,
                (Inferred::Int | Inferred::Float, Inferred::Int | Inferred::Float) => {
                    Inferred::Float
                }
                _ => Inferred::Unknown,
            },
        },
        Node::UnaryExpression { operator, operand } => match operator {
            UnaryOp::Not => Inferred::Bool,
            _ => infer(operand),
        },
        _ => Inferred::Unknown,
    }
}

/// Render an `f64` the way source code writes it: integral values without
/// a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Quote and escape a string literal.
pub(crate) fn quote(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Per-target expression syntax. The defaults are the canonical C-like
/// tokens; writers override the entries that differ.
pub(crate) trait Syntax {
    fn binary_op(&self, op: BinaryOp) -> &'static str {
        op.symbol()
    }

    fn unary_op(&self, op: UnaryOp) -> &'static str {
        op.symbol()
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn boolean(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn null(&self) -> &'static str {
        "null"
    }

    /// Inline stand-in for a statement kind in expression position.
    fn inline_unsupported(&self, node: &Node) -> String {
        format!("/* {} */", unsupported(node))
    }

    fn literal(&self, value: &Literal) -> String {
        match value {
            Literal::String(s) => quote(s, self.quote_char()),
            Literal::Number(n) => format_number(*n),
            Literal::Boolean(b) => self.boolean(*b).to_string(),
            Literal::Null => self.null().to_string(),
        }
    }

    fn expr(&self, node: &Node) -> String {
        match node {
            Node::Literal { value } => self.literal(value),
            Node::Identifier { name } => name.clone(),
            Node::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let left = self.operand(*operator, left, false);
                let right = self.operand(*operator, right, true);
                format!("{left} {} {right}", self.binary_op(*operator))
            }
            Node::UnaryExpression { operator, operand } => {
                let inner = match operand.as_ref() {
                    Node::BinaryExpression { .. } => format!("({})", self.expr(operand)),
                    _ => self.expr(operand),
                };
                if operator.is_postfix() {
                    format!("{inner}{}", self.unary_op(*operator))
                } else {
                    format!("{}{inner}", self.unary_op(*operator))
                }
            }
            Node::FunctionCall { name, arguments } => {
                format!("{name}({})", self.args(arguments))
            }
            Node::ArrayAccess { array, index } => format!("{array}[{}]", self.expr(index)),
            Node::PropertyAccess { object, property } => format!("{object}.{property}"),
            Node::VariableDeclaration { .. }
            | Node::Assignment { .. }
            | Node::IfStatement { .. }
            | Node::ElseIfStatement { .. }
            | Node::ElseStatement { .. }
            | Node::WhileLoop { .. }
            | Node::ForLoop { .. }
            | Node::ForEachLoop { .. }
            | Node::FunctionDeclaration { .. }
            | Node::ReturnStatement { .. }
            | Node::PrintStatement { .. }
            | Node::Comment { .. } => self.inline_unsupported(node),
        }
    }

    fn args(&self, arguments: &[Node]) -> String {
        arguments
            .iter()
            .map(|arg| self.expr(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render an operand of `parent`, parenthesised when it binds looser,
    /// or equally loose on the right.
    fn operand(&self, parent: BinaryOp, child: &Node, right: bool) -> String {
        let text = self.expr(child);
        match child {
            Node::BinaryExpression { operator, .. }
                if operator.precedence() < parent.precedence()
                    || (right && operator.precedence() == parent.precedence()) =>
            {
                format!("({text})")
            }
            // Word operators bind looser than comparison and arithmetic.
            Node::UnaryExpression { operator, .. }
                if parent.precedence() > BinaryOp::And.precedence()
                    && self.unary_op(*operator).ends_with(' ') =>
            {
                format!("({text})")
            }
            _ => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canonical;
    impl Syntax for Canonical {}

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("it's", '\''), r"'it\'s'");
        assert_eq!(quote("a\"b\\c\n", '"'), r#""a\"b\\c\n""#);
    }

    #[test]
    fn test_minimal_parentheses() {
        let sum = Node::binary(Node::ident("a"), BinaryOp::Add, Node::ident("b"));
        let product = Node::binary(sum.clone(), BinaryOp::Mul, Node::number(2));
        assert_eq!(Canonical.expr(&product), "(a + b) * 2");

        let nested = Node::binary(
            Node::ident("a"),
            BinaryOp::Add,
            Node::binary(Node::ident("b"), BinaryOp::Mul, Node::number(2)),
        );
        assert_eq!(Canonical.expr(&nested), "a + b * 2");

        let right_sub = Node::binary(Node::ident("a"), BinaryOp::Sub, sum);
        assert_eq!(Canonical.expr(&right_sub), "a - (a + b)");
    }

    struct Wordy;
    impl Syntax for Wordy {
        fn unary_op(&self, op: UnaryOp) -> &'static str {
            match op {
                UnaryOp::Not => "not ",
                _ => op.symbol(),
            }
        }
    }

    #[test]
    fn test_word_unary_operand_is_parenthesised() {
        let not_a = Node::unary(UnaryOp::Not, Node::ident("a"));
        let sum = Node::binary(not_a.clone(), BinaryOp::Add, Node::number(1));
        assert_eq!(Wordy.expr(&sum), "(not a) + 1");
        assert_eq!(Canonical.expr(&sum), "!a + 1");

        let neg = Node::binary(
            Node::unary(UnaryOp::Neg, Node::ident("b")),
            BinaryOp::Mul,
            Node::number(2),
        );
        assert_eq!(Wordy.expr(&neg), "-b * 2");

        let either = Node::binary(not_a, BinaryOp::Or, Node::ident("c"));
        assert_eq!(Wordy.expr(&either), "not a or c");
    }

    #[test]
    fn test_statement_in_expression_position() {
        let node = Node::print(Node::ident("x"));
        assert_eq!(
            Canonical.expr(&node),
            "/* unsupported node: PrintStatement */"
        );
    }

    #[test]
    fn test_group_joins_else_chain() {
        let body = vec![
            Node::if_stmt(Node::ident("a"), vec![]),
            Node::else_if(Node::ident("b"), vec![]),
            Node::else_stmt(vec![]),
            Node::else_stmt(vec![]),
        ];
        let items = group(&body);
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], Item::Chain(branches) if branches.len() == 3));
        assert!(matches!(items[1], Item::Stmt(Node::ElseStatement { .. })));
    }

    #[test]
    fn test_counting_loop_recognition() {
        let init = Node::var("i", Some(Node::number(0)));
        let cond = Node::binary(Node::ident("i"), BinaryOp::Lt, Node::number(5));
        let incr = Node::unary(UnaryOp::Increment, Node::ident("i"));
        let counting = CountingLoop::recognize(&init, &cond, &incr).unwrap();
        assert_eq!(counting.var, "i");
        assert!(!counting.inclusive);
        assert!(counting.explicit_step().is_none());
        assert_eq!(counting.last(), Node::number(4));
        assert_eq!(counting.stop(), Node::number(5));

        let other = Node::binary(Node::ident("j"), BinaryOp::Lt, Node::number(5));
        assert!(CountingLoop::recognize(&init, &other, &incr).is_none());
    }

    #[test]
    fn test_unit_step_is_not_a_step() {
        let init = Node::var("n", Some(Node::number(1)));
        let cond = Node::binary(Node::ident("n"), BinaryOp::Le, Node::ident("max"));
        let incr = Node::assign(
            "n",
            Node::binary(Node::ident("n"), BinaryOp::Add, Node::number(1)),
        );
        let counting = CountingLoop::recognize(&init, &cond, &incr).unwrap();
        assert!(counting.explicit_step().is_none());
        assert_eq!(
            counting.stop(),
            Node::binary(Node::ident("max"), BinaryOp::Add, Node::number(1))
        );
    }

    #[test]
    fn test_descending_loop_bounds_follow_the_step_sign() {
        let init = Node::var("n", Some(Node::number(10)));
        let incr = Node::unary(UnaryOp::Decrement, Node::ident("n"));

        let inclusive = Node::binary(Node::ident("n"), BinaryOp::Ge, Node::number(1));
        let counting = CountingLoop::recognize(&init, &inclusive, &incr).unwrap();
        assert_eq!(counting.step, -1.0);
        assert_eq!(counting.last(), Node::number(1));
        assert_eq!(counting.stop(), Node::number(0));

        let exclusive = Node::binary(Node::ident("n"), BinaryOp::Gt, Node::ident("low"));
        let counting = CountingLoop::recognize(&init, &exclusive, &incr).unwrap();
        assert_eq!(
            counting.last(),
            Node::binary(Node::ident("low"), BinaryOp::Add, Node::number(1))
        );
        assert_eq!(counting.stop(), Node::ident("low"));
    }

    #[test]
    fn test_step_sign_must_agree_with_comparison() {
        let init = Node::var("n", Some(Node::number(10)));
        let down = Node::unary(UnaryOp::Decrement, Node::ident("n"));
        let up = Node::unary(UnaryOp::Increment, Node::ident("n"));
        let le = Node::binary(Node::ident("n"), BinaryOp::Le, Node::number(1));
        let ge = Node::binary(Node::ident("n"), BinaryOp::Ge, Node::number(1));
        assert!(CountingLoop::recognize(&init, &le, &down).is_none());
        assert!(CountingLoop::recognize(&init, &ge, &up).is_none());

        let by_name = Node::assign(
            "n",
            Node::binary(Node::ident("n"), BinaryOp::Add, Node::ident("k")),
        );
        assert!(CountingLoop::recognize(&init, &le, &by_name).is_none());

        let by_zero = Node::assign(
            "n",
            Node::binary(Node::ident("n"), BinaryOp::Add, Node::number(0)),
        );
        assert!(CountingLoop::recognize(&init, &le, &by_zero).is_none());
    }

    #[test]
    fn test_subtracted_step_is_negative() {
        let init = Node::var("n", Some(Node::number(20)));
        let cond = Node::binary(Node::ident("n"), BinaryOp::Gt, Node::number(0));
        let incr = Node::assign(
            "n",
            Node::binary(Node::ident("n"), BinaryOp::Sub, Node::number(5)),
        );
        let counting = CountingLoop::recognize(&init, &cond, &incr).unwrap();
        assert_eq!(counting.explicit_step(), Some(Node::number(-5)));
    }

    #[test]
    fn test_infer() {
        assert_eq!(infer(&Node::number(1)), Inferred::Int);
        assert_eq!(infer(&Node::number(1.5)), Inferred::Float);
        assert_eq!(
            infer(&Node::binary(Node::string("a"), BinaryOp::Add, Node::number(1))),
            Inferred::Str
        );
        assert_eq!(
            infer(&Node::binary(Node::ident("x"), BinaryOp::Gt, Node::number(1))),
            Inferred::Bool
        );
        assert_eq!(infer(&Node::ident("x")), Inferred::Unknown);
        assert_eq!(infer(&Node::boolean(true)), Inferred::Bool);
        assert_eq!(infer(&Node::null()), Inferred::Unknown);
    }

    #[test]
    fn test_returns_value_skips_nested_functions() {
        let body = vec![Node::function(
            "inner",
            vec![],
            vec![Node::return_stmt(Some(Node::number(1)))],
        )];
        assert!(!returns_value(&body));
        let body = vec![Node::if_stmt(
            Node::ident("x"),
            vec![Node::return_stmt(Some(Node::number(1)))],
        )];
        assert!(returns_value(&body));
    }
}
