//! Java writer.
//!
//! Output is a complete `Main` class: top-level statements go in `main`,
//! top-level functions become static methods after it. Java has no nested
//! methods, so a function declared inside a body is a placeholder.

use super::{Code, Inferred, Item, Syntax, compound, group, infer, returns_value, unsupported};
use crate::ir::{Node, UnaryOp};
use crate::options::GenerateOptions;
use crate::tags::TargetTag;
use crate::traits::Writer;

/// Static instance of the Java writer for registry.
pub static JAVA_WRITER: JavaWriterImpl = JavaWriterImpl;

/// Java writer implementing the Writer trait.
pub struct JavaWriterImpl;

impl Writer for JavaWriterImpl {
    fn language(&self) -> TargetTag {
        TargetTag::Java
    }

    fn extension(&self) -> &'static str {
        "java"
    }

    fn write(&self, tree: &[Node], options: &GenerateOptions) -> String {
        JavaWriter::emit(tree, options)
    }
}

/// Emits a tree as a Java class.
pub struct JavaWriter<'o> {
    code: Code<'o>,
}

impl Syntax for JavaWriter<'_> {}

fn java_type(value: Option<&Node>) -> &'static str {
    match value.map(infer) {
        Some(Inferred::Int) => "int",
        Some(Inferred::Float) => "double",
        Some(Inferred::Str) => "String",
        Some(Inferred::Bool) => "boolean",
        Some(Inferred::Unknown) | None => "Object",
    }
}

impl<'o> JavaWriter<'o> {
    /// Emit a tree as a Java `Main` class.
    pub fn emit(tree: &[Node], options: &'o GenerateOptions) -> String {
        let mut writer = Self {
            code: Code::new(options),
        };
        let (functions, statements): (Vec<Node>, Vec<Node>) = tree
            .iter()
            .cloned()
            .partition(|node| matches!(node, Node::FunctionDeclaration { .. }));

        writer.code.line(0, "public class Main {");
        writer
            .code
            .line(1, "public static void main(String[] args) {");
        writer.write_body(&statements, 2);
        writer.code.line(1, "}");
        for function in &functions {
            writer.code.blank();
            writer.write_method(function, 1);
        }
        writer.code.line(0, "}");
        writer.code.finish()
    }

    fn write_method(&mut self, node: &Node, depth: usize) {
        let Node::FunctionDeclaration {
            name,
            parameters,
            body,
        } = node
        else {
            return;
        };
        let ret = if returns_value(body) { "Object" } else { "void" };
        let params: Vec<_> = parameters.iter().map(|p| format!("Object {p}")).collect();
        self.code.line(
            depth,
            format!("public static {ret} {name}({}) {{", params.join(", ")),
        );
        self.write_body(body, depth + 1);
        self.code.line(depth, "}");
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

    fn inline_stmt(&self, node: &Node) -> String {
        match node {
            Node::VariableDeclaration {
                name,
                value: Some(value),
                ..
            } => format!(
                "{} {name} = {}",
                java_type(Some(value)),
                self.expr(value)
            ),
            Node::Assignment { target, value } => match compound(node) {
                Some((_, op, amount)) => {
                    format!("{target} {}= {}", self.binary_op(op), self.expr(amount))
                }
                None => format!("{target} = {}", self.expr(value)),
            },
            _ => self.expr(node),
        }
    }

    fn write_stmt(&mut self, node: &Node, depth: usize) {
        match node {
            Node::VariableDeclaration {
                name,
                value,
                constant,
            } => {
                let ty = java_type(value.as_deref());
                let modifier = if *constant { "final " } else { "" };
                let line = match value {
                    Some(value) => format!("{modifier}{ty} {name} = {};", self.expr(value)),
                    None => format!("{modifier}{ty} {name} = null;"),
                };
                self.code.line(depth, line);
            }

            Node::Assignment { target, value } => {
                let line = format!("{target} = {};", self.expr(value));
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
            } => {
                let line = format!(
                    "for ({}; {}; {}) {{",
                    self.inline_stmt(init),
                    self.expr(condition),
                    self.inline_stmt(increment)
                );
                self.code.line(depth, line);
                self.write_body(body, depth + 1);
                self.code.line(depth, "}");
            }

            Node::ForEachLoop {
                variable,
                iterable,
                body,
            } => {
                let line = format!("for (var {variable} : {}) {{", self.expr(iterable));
                self.code.line(depth, line);
                self.write_body(body, depth + 1);
                self.code.line(depth, "}");
            }

            Node::FunctionCall { .. } => {
                let line = format!("{};", self.expr(node));
                self.code.line(depth, line);
            }

            Node::ReturnStatement { value } => {
                let line = match value {
                    Some(value) => format!("return {};", self.expr(value)),
                    None => "return;".to_string(),
                };
                self.code.line(depth, line);
            }

            Node::PrintStatement { value } => {
                let line = format!("System.out.println({});", self.expr(value));
                self.code.line(depth, line);
            }

            Node::Comment { text } => {
                if self.code.options().include_comments {
                    self.code.line(depth, format!("// {text}"));
                }
            }

            Node::UnaryExpression {
                operator: UnaryOp::Increment | UnaryOp::Decrement,
                ..
            } => {
                let line = format!("{};", self.expr(node));
                self.code.line(depth, line);
            }

            Node::FunctionDeclaration { .. }
            | Node::IfStatement { .. }
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
