//! Scala writer.
//!
//! Output is wrapped in `object Main extends App`; definitions stay in
//! place since Scala allows them anywhere in a block.

use super::{Code, CountingLoop, Item, Syntax, as_assignment, compound, group, returns_value, unsupported};
use crate::ir::{Node, UnaryOp};
use crate::options::GenerateOptions;
use crate::tags::TargetTag;
use crate::traits::Writer;

/// Static instance of the Scala writer for registry.
pub static SCALA_WRITER: ScalaWriterImpl = ScalaWriterImpl;

/// Scala writer implementing the Writer trait.
pub struct ScalaWriterImpl;

impl Writer for ScalaWriterImpl {
    fn language(&self) -> TargetTag {
        TargetTag::Scala
    }

    fn extension(&self) -> &'static str {
        "scala"
    }

    fn write(&self, tree: &[Node], options: &GenerateOptions) -> String {
        ScalaWriter::emit(tree, options)
    }
}

/// Emits a tree as a Scala application object.
pub struct ScalaWriter<'o> {
    code: Code<'o>,
}

impl Syntax for ScalaWriter<'_> {}

impl<'o> ScalaWriter<'o> {
    /// Emit a tree as Scala source.
    pub fn emit(tree: &[Node], options: &'o GenerateOptions) -> String {
        let mut writer = Self {
            code: Code::new(options),
        };
        writer.code.line(0, "object Main extends App {");
        writer.write_body(tree, 1);
        writer.code.line(0, "}");
        writer.code.finish()
    }

    fn write_body(&mut self, body: &[Node], depth: usize) {
        for item in group(body) {
            match item {
                Item::Stmt(node) => self.write_stmt(node, depth),
                Item::Chain(branches) => {
                    for (i, branch) in branches.iter().enumerate() {
                        let head = match (i, branch.condition) {
                            (0, Some(cond)) => format!("if ({}) {{", self.expr(cond)),
                            (_, Some(cond)) => format!("}} else if ({}) {{", self.expr(cond)),
                            (_, None) => "} else {".to_string(),
                        };
                        self.code.line(depth, head);
                        self.write_body(branch.body, depth + 1);
                    }
                    self.code.line(depth, "}");
                }
            }
        }
    }

    fn range(&self, counting: &CountingLoop<'_>) -> String {
        let word = if counting.inclusive { "to" } else { "until" };
        let mut range = format!(
            "{} {word} {}",
            self.expr(counting.start),
            self.expr(counting.end)
        );
        if let Some(step) = counting.explicit_step() {
            range.push_str(&format!(" by {}", self.expr(&step)));
        }
        range
    }

    fn write_stmt(&mut self, node: &Node, depth: usize) {
        match node {
            Node::VariableDeclaration {
                name,
                value,
                constant,
            } => {
                let keyword = if *constant { "val" } else { "var" };
                let line = match value {
                    Some(value) => format!("{keyword} {name} = {}", self.expr(value)),
                    None => format!("{keyword} {name}: Any = null"),
                };
                self.code.line(depth, line);
            }

            Node::Assignment { target, value } => {
                let line = match compound(node) {
                    Some((_, op, amount)) => {
                        format!("{target} {}= {}", self.binary_op(op), self.expr(amount))
                    }
                    None => format!("{target} = {}", self.expr(value)),
                };
                self.code.line(depth, line);
            }

            Node::WhileLoop { condition, body } => {
                let line = format!("while ({}) {{", self.expr(condition));
                self.code.line(depth, line);
                self.write_body(body, depth + 1);
                self.code.line(depth, "}");
            }

            Node::ForLoop {
                init,
                condition,
                increment,
                body,
            } => match CountingLoop::recognize(init, condition, increment) {
                Some(counting) => {
                    let line = format!("for ({} <- {}) {{", counting.var, self.range(&counting));
                    self.code.line(depth, line);
                    self.write_body(body, depth + 1);
                    self.code.line(depth, "}");
                }
                None => {
                    self.write_stmt(init, depth);
                    let line = format!("while ({}) {{", self.expr(condition));
                    self.code.line(depth, line);
                    self.write_body(body, depth + 1);
                    self.write_stmt(&as_assignment(increment), depth + 1);
                    self.code.line(depth, "}");
                }
            },

            Node::ForEachLoop {
                variable,
                iterable,
                body,
            } => {
                let line = format!("for ({variable} <- {}) {{", self.expr(iterable));
                self.code.line(depth, line);
                self.write_body(body, depth + 1);
                self.code.line(depth, "}");
            }

            Node::FunctionDeclaration {
                name,
                parameters,
                body,
            } => {
                let ret = if returns_value(body) { "Any" } else { "Unit" };
                let params: Vec<_> = parameters.iter().map(|p| format!("{p}: Any")).collect();
                self.code.line(
                    depth,
                    format!("def {name}({}): {ret} = {{", params.join(", ")),
                );
                self.write_body(body, depth + 1);
                self.code.line(depth, "}");
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
                let line = format!("println({})", self.expr(value));
                self.code.line(depth, line);
            }

            Node::Comment { text } => {
                if self.code.options().include_comments {
                    self.code.line(depth, format!("// {text}"));
                }
            }

            // Scala has no ++ or --.
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
                self.code.line(depth, format!("// {}", unsupported(node)));
            }
        }
    }
}
