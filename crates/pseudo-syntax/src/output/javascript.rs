//! JavaScript writer.
//!
//! Also drives the TypeScript writer, which differs only in type
//! annotations on declarations, parameters and return types.

use super::{Code, Inferred, Item, Syntax, compound, group, infer, returns_value, unsupported};
use crate::ir::{BinaryOp, Node, UnaryOp};
use crate::options::GenerateOptions;
use crate::tags::TargetTag;
use crate::traits::Writer;

/// Static instance of the JavaScript writer for registry.
pub static JAVASCRIPT_WRITER: JavaScriptWriterImpl = JavaScriptWriterImpl;

/// JavaScript writer implementing the Writer trait.
pub struct JavaScriptWriterImpl;

impl Writer for JavaScriptWriterImpl {
    fn language(&self) -> TargetTag {
        TargetTag::JavaScript
    }

    fn extension(&self) -> &'static str {
        "js"
    }

    fn write(&self, tree: &[Node], options: &GenerateOptions) -> String {
        JavaScriptWriter::emit(tree, options)
    }
}

/// Emits a tree as JavaScript, or TypeScript when `typed`.
pub struct JavaScriptWriter<'o> {
    code: Code<'o>,
    typed: bool,
}

impl Syntax for JavaScriptWriter<'_> {
    fn binary_op(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::Eq if self.code.options().strict_mode => "===",
            BinaryOp::Ne if self.code.options().strict_mode => "!==",
            _ => op.symbol(),
        }
    }

    fn quote_char(&self) -> char {
        '\''
    }
}

impl<'o> JavaScriptWriter<'o> {
    /// Emit a tree as JavaScript.
    pub fn emit(tree: &[Node], options: &'o GenerateOptions) -> String {
        Self::emit_with(tree, options, false)
    }

    pub(crate) fn emit_with(tree: &[Node], options: &'o GenerateOptions, typed: bool) -> String {
        let mut writer = Self {
            code: Code::new(options),
            typed,
        };
        if options.strict_mode {
            writer.code.line(0, "'use strict';");
            if !tree.is_empty() {
                writer.code.blank();
            }
        }
        writer.write_body(tree, 0);
        writer.code.finish()
    }

    /// `: type` suffix for a declaration, empty when untyped.
    fn annotation(&self, value: Option<&Node>) -> String {
        if !self.typed {
            return String::new();
        }
        let ty = match value.map(infer) {
            Some(Inferred::Int | Inferred::Float) => "number",
            Some(Inferred::Str) => "string",
            Some(Inferred::Bool) => "boolean",
            Some(Inferred::Unknown) | None => "any",
        };
        format!(": {ty}")
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

    /// A statement as it appears in a `for (..; ..; ..)` header.
    fn inline_stmt(&self, node: &Node) -> String {
        match node {
            Node::VariableDeclaration {
                name,
                value: Some(value),
                ..
            } => format!("let {name} = {}", self.expr(value)),
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
                let keyword = if *constant { "const" } else { "let" };
                let ty = self.annotation(value.as_deref());
                let line = match value {
                    Some(value) => format!("{keyword} {name}{ty} = {};", self.expr(value)),
                    None => format!("{keyword} {name}{ty};"),
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
                let line = format!("for (const {variable} of {}) {{", self.expr(iterable));
                self.code.line(depth, line);
                self.write_body(body, depth + 1);
                self.code.line(depth, "}");
            }

            Node::FunctionDeclaration {
                name,
                parameters,
                body,
            } => {
                let line = if self.typed {
                    let params: Vec<_> = parameters.iter().map(|p| format!("{p}: any")).collect();
                    let ret = if returns_value(body) { "any" } else { "void" };
                    format!("function {name}({}): {ret} {{", params.join(", "))
                } else {
                    format!("function {name}({}) {{", parameters.join(", "))
                };
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
                let line = format!("console.log({});", self.expr(value));
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

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(tree: &[Node]) -> String {
        JavaScriptWriter::emit(tree, &GenerateOptions::default())
    }

    #[test]
    fn test_declarations() {
        let tree = [
            Node::var("name", Some(Node::string("it's"))),
            Node::constant("MAX", Node::number(3)),
            Node::var("x", None),
        ];
        assert_eq!(emit(&tree), "let name = 'it\\'s';\nconst MAX = 3;\nlet x;");
    }

    #[test]
    fn test_counting_for_loop() {
        let tree = [Node::for_loop(
            Node::var("i", Some(Node::number(0))),
            Node::binary(Node::ident("i"), BinaryOp::Lt, Node::number(5)),
            Node::unary(UnaryOp::Increment, Node::ident("i")),
            vec![Node::print(Node::ident("i"))],
        )];
        assert_eq!(
            emit(&tree),
            "for (let i = 0; i < 5; i++) {\n  console.log(i);\n}"
        );
    }

    #[test]
    fn test_stepped_for_loop_uses_compound_assignment() {
        let tree = [Node::for_loop(
            Node::var("n", Some(Node::number(1))),
            Node::binary(Node::ident("n"), BinaryOp::Le, Node::number(9)),
            Node::assign(
                "n",
                Node::binary(Node::ident("n"), BinaryOp::Add, Node::number(2)),
            ),
            vec![],
        )];
        assert_eq!(emit(&tree), "for (let n = 1; n <= 9; n += 2) {\n}");
    }

    #[test]
    fn test_strict_mode() {
        let tree = [Node::if_stmt(
            Node::binary(Node::ident("a"), BinaryOp::Eq, Node::ident("b")),
            vec![],
        )];
        let options = GenerateOptions::default().with_strict(true);
        assert_eq!(
            JavaScriptWriter::emit(&tree, &options),
            "'use strict';\n\nif (a === b) {\n}"
        );
        assert_eq!(emit(&tree), "if (a == b) {\n}");
    }

    #[test]
    fn test_for_each_and_function() {
        let tree = [Node::function(
            "total",
            vec!["items".into()],
            vec![
                Node::var("sum", Some(Node::number(0))),
                Node::for_each(
                    "item",
                    Node::ident("items"),
                    vec![Node::assign(
                        "sum",
                        Node::binary(Node::ident("sum"), BinaryOp::Add, Node::ident("item")),
                    )],
                ),
                Node::return_stmt(Some(Node::ident("sum"))),
            ],
        )];
        assert_eq!(
            emit(&tree),
            "function total(items) {\n  let sum = 0;\n  for (const item of items) {\n    sum = sum + item;\n  }\n  return sum;\n}"
        );
    }
}
