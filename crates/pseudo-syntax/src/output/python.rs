//! Python writer.
//!
//! Colon-and-indent blocks; a body that renders no lines gets `pass`.
//! Counting loops become `range(..)`, other `for` loops a `while`.

use super::{Code, CountingLoop, Item, Syntax, as_assignment, compound, group, is_number, unsupported};
use crate::ir::{BinaryOp, Node, UnaryOp};
use crate::options::GenerateOptions;
use crate::tags::TargetTag;
use crate::traits::Writer;

/// Static instance of the Python writer for registry.
pub static PYTHON_WRITER: PythonWriterImpl = PythonWriterImpl;

/// Python writer implementing the Writer trait.
pub struct PythonWriterImpl;

impl Writer for PythonWriterImpl {
    fn language(&self) -> TargetTag {
        TargetTag::Python
    }

    fn extension(&self) -> &'static str {
        "py"
    }

    fn write(&self, tree: &[Node], options: &GenerateOptions) -> String {
        PythonWriter::emit(tree, options)
    }
}

/// Emits a tree as Python source code.
pub struct PythonWriter<'o> {
    code: Code<'o>,
}

impl Syntax for PythonWriter<'_> {
    fn binary_op(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            _ => op.symbol(),
        }
    }

    fn unary_op(&self, op: UnaryOp) -> &'static str {
        match op {
            UnaryOp::Not => "not ",
            UnaryOp::Increment => " += 1",
            UnaryOp::Decrement => " -= 1",
            UnaryOp::Neg => "-",
        }
    }

    fn boolean(&self, value: bool) -> &'static str {
        if value { "True" } else { "False" }
    }

    fn null(&self) -> &'static str {
        "None"
    }

    fn inline_unsupported(&self, _node: &Node) -> String {
        "...".to_string()
    }
}

impl<'o> PythonWriter<'o> {
    /// Emit a tree as Python source.
    pub fn emit(tree: &[Node], options: &'o GenerateOptions) -> String {
        let mut writer = Self {
            code: Code::new(options),
        };
        writer.write_body(tree, 0);
        writer.code.finish()
    }

    /// Write an indented block body, or `pass` if it renders nothing.
    fn write_block(&mut self, body: &[Node], depth: usize) {
        let before = self.code.len();
        self.write_body(body, depth);
        if self.code.len() == before {
            self.code.line(depth, "pass");
        }
    }

    fn write_body(&mut self, body: &[Node], depth: usize) {
        for item in group(body) {
            match item {
                Item::Stmt(node) => self.write_stmt(node, depth),
                Item::Chain(branches) => {
                    for (i, branch) in branches.iter().enumerate() {
                        let head = match (i, branch.condition) {
                            (0, Some(cond)) => format!("if {}:", self.expr(cond)),
                            (_, Some(cond)) => format!("elif {}:", self.expr(cond)),
                            (_, None) => "else:".to_string(),
                        };
                        self.code.line(depth, head);
                        self.write_block(branch.body, depth + 1);
                    }
                }
            }
        }
    }

    fn range(&self, counting: &CountingLoop<'_>) -> String {
        let stop = self.expr(&counting.stop());
        let starts_at_zero = is_number(counting.start, 0.0);
        match counting.explicit_step() {
            Some(step) => format!(
                "range({}, {stop}, {})",
                self.expr(counting.start),
                self.expr(&step)
            ),
            None if starts_at_zero => format!("range({stop})"),
            None => format!("range({}, {stop})", self.expr(counting.start)),
        }
    }

    fn write_stmt(&mut self, node: &Node, depth: usize) {
        match node {
            // Python binds by assignment; a value-less declaration binds None.
            Node::VariableDeclaration { name, value, .. } => {
                let line = match value {
                    Some(value) => format!("{name} = {}", self.expr(value)),
                    None => format!("{name} = None"),
                };
                self.code.line(depth, line);
            }

            Node::Assignment { target, value } => {
                let line = match compound(node) {
                    Some((_, op, amount)) if is_number(amount, 1.0) => {
                        format!("{target} {}= 1", self.binary_op(op))
                    }
                    _ => format!("{target} = {}", self.expr(value)),
                };
                self.code.line(depth, line);
            }

            Node::WhileLoop { condition, body } => {
                let line = format!("while {}:", self.expr(condition));
                self.code.line(depth, line);
                self.write_block(body, depth + 1);
            }

            Node::ForLoop {
                init,
                condition,
                increment,
                body,
            } => match CountingLoop::recognize(init, condition, increment) {
                Some(counting) => {
                    let line = format!("for {} in {}:", counting.var, self.range(&counting));
                    self.code.line(depth, line);
                    self.write_block(body, depth + 1);
                }
                None => {
                    self.write_stmt(init, depth);
                    let line = format!("while {}:", self.expr(condition));
                    self.code.line(depth, line);
                    self.write_body(body, depth + 1);
                    self.write_stmt(&as_assignment(increment), depth + 1);
                }
            },

            Node::ForEachLoop {
                variable,
                iterable,
                body,
            } => {
                let line = format!("for {variable} in {}:", self.expr(iterable));
                self.code.line(depth, line);
                self.write_block(body, depth + 1);
            }

            Node::FunctionDeclaration {
                name,
                parameters,
                body,
            } => {
                self.code
                    .line(depth, format!("def {name}({}):", parameters.join(", ")));
                self.write_block(body, depth + 1);
            }

            Node::FunctionCall { .. } => {
                let line = self.expr(node);
                self.code.line(depth, line);
            }

            Node::ReturnStatement { value } => {
                let line = match value {
                    Some(value) => format!("return {}", self.expr(value)),
                    None => "return".to_string(),
                };
                self.code.line(depth, line);
            }

            Node::PrintStatement { value } => {
                let line = format!("print({})", self.expr(value));
                self.code.line(depth, line);
            }

            Node::Comment { text } => {
                if self.code.options().include_comments {
                    self.code.line(depth, format!("# {text}"));
                }
            }

            Node::UnaryExpression {
                operator: UnaryOp::Increment | UnaryOp::Decrement,
                ..
            } => self.write_stmt(&as_assignment(node), depth),

            Node::IfStatement { .. }
            | Node::ElseIfStatement { .. }
            | Node::ElseStatement { .. }
            | Node::BinaryExpression { .. }
            | Node::UnaryExpression { .. }
            | Node::Literal { .. }
            | Node::Identifier { .. }
            | Node::ArrayAccess { .. }
            | Node::PropertyAccess { .. } => {
                self.code.line(depth, format!("# {}", unsupported(node)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(tree: &[Node]) -> String {
        PythonWriter::emit(tree, &GenerateOptions::default())
    }

    fn count_to(end: i32, op: BinaryOp, start: i32) -> [Node; 1] {
        [Node::for_loop(
            Node::var("i", Some(Node::number(start))),
            Node::binary(Node::ident("i"), op, Node::number(end)),
            Node::unary(UnaryOp::Increment, Node::ident("i")),
            vec![Node::print(Node::ident("i"))],
        )]
    }

    #[test]
    fn test_empty_body_gets_pass() {
        let tree = [Node::while_loop(Node::boolean(true), vec![])];
        assert_eq!(emit(&tree), "while True:\n  pass");
    }

    #[test]
    fn test_body_of_suppressed_comments_gets_pass() {
        let tree = [Node::function("f", vec![], vec![Node::comment("todo")])];
        let options = GenerateOptions::default().with_comments(false);
        assert_eq!(PythonWriter::emit(&tree, &options), "def f():\n  pass");
    }

    #[test]
    fn test_range_forms() {
        assert_eq!(
            emit(&count_to(5, BinaryOp::Lt, 0)),
            "for i in range(5):\n  print(i)"
        );
        assert_eq!(
            emit(&count_to(10, BinaryOp::Le, 1)),
            "for i in range(1, 11):\n  print(i)"
        );
    }

    #[test]
    fn test_elif_chain() {
        let tree = [
            Node::if_stmt(
                Node::binary(Node::ident("x"), BinaryOp::Gt, Node::number(10)),
                vec![Node::print(Node::string("big"))],
            ),
            Node::else_if(
                Node::binary(Node::ident("x"), BinaryOp::Gt, Node::number(5)),
                vec![],
            ),
            Node::else_stmt(vec![Node::print(Node::string("small"))]),
        ];
        assert_eq!(
            emit(&tree),
            "if x > 10:\n  print(\"big\")\nelif x > 5:\n  pass\nelse:\n  print(\"small\")"
        );
    }

    #[test]
    fn test_keyword_operators_and_literals() {
        let tree = [Node::var(
            "ok",
            Some(Node::binary(
                Node::unary(UnaryOp::Not, Node::ident("done")),
                BinaryOp::Or,
                Node::binary(Node::null(), BinaryOp::Eq, Node::boolean(false)),
            )),
        )];
        assert_eq!(emit(&tree), "ok = not done or None == False");
    }

    #[test]
    fn test_not_under_arithmetic_is_parenthesised() {
        let tree = [Node::print(Node::binary(
            Node::unary(UnaryOp::Not, Node::ident("a")),
            BinaryOp::Add,
            Node::number(1),
        ))];
        assert_eq!(emit(&tree), "print((not a) + 1)");
    }

    #[test]
    fn test_increment_statement() {
        let tree = [Node::assign(
            "count",
            Node::binary(Node::ident("count"), BinaryOp::Add, Node::number(1)),
        )];
        assert_eq!(emit(&tree), "count += 1");
    }
}
