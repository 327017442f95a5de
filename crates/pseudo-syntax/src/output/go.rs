//! Go writer.
//!
//! Output is a `main` package. `fmt` is imported only when the tree
//! prints. Top-level functions are hoisted above `main`; functions nested
//! in a body become closures.

use super::{Code, Item, Syntax, compound, group, prints, returns_value, unsupported};
use crate::ir::{Node, UnaryOp};
use crate::options::GenerateOptions;
use crate::tags::TargetTag;
use crate::traits::Writer;

/// Static instance of the Go writer for registry.
pub static GO_WRITER: GoWriterImpl = GoWriterImpl;

/// Go writer implementing the Writer trait.
pub struct GoWriterImpl;

impl Writer for GoWriterImpl {
    fn language(&self) -> TargetTag {
        TargetTag::Go
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    fn write(&self, tree: &[Node], options: &GenerateOptions) -> String {
        GoWriter::emit(tree, options)
    }
}

/// Emits a tree as a Go program.
pub struct GoWriter<'o> {
    code: Code<'o>,
}

impl Syntax for GoWriter<'_> {
    fn null(&self) -> &'static str {
        "nil"
    }
}

const ANY: &str = "interface{}";

impl<'o> GoWriter<'o> {
    /// Emit a tree as a Go `main` package.
    pub fn emit(tree: &[Node], options: &'o GenerateOptions) -> String {
        let mut writer = Self {
            code: Code::new(options),
        };
        let (functions, statements): (Vec<&Node>, Vec<&Node>) = tree
            .iter()
            .partition(|node| matches!(node, Node::FunctionDeclaration { .. }));

        writer.code.line(0, "package main");
        if prints(tree) {
            writer.code.blank();
            writer.code.line(0, "import \"fmt\"");
        }
        for function in functions {
            writer.code.blank();
            writer.write_func(function);
        }
        writer.code.blank();
        writer.code.line(0, "func main() {");
        let statements: Vec<Node> = statements.into_iter().cloned().collect();
        writer.write_body(&statements, 1);
        writer.code.line(0, "}");
        writer.code.finish()
    }

    /// `(a interface{}, b interface{}) interface{}`
    fn signature(parameters: &[String], body: &[Node]) -> String {
        let params: Vec<_> = parameters.iter().map(|p| format!("{p} {ANY}")).collect();
        let ret = if returns_value(body) {
            format!(" {ANY}")
        } else {
            String::new()
        };
        format!("({}){ret}", params.join(", "))
    }

    fn write_func(&mut self, node: &Node) {
        let Node::FunctionDeclaration {
            name,
            parameters,
            body,
        } = node
        else {
            return;
        };
        self.code.line(
            0,
            format!("func {name}{} {{", Self::signature(parameters, body)),
        );
        self.write_body(body, 1);
        self.code.line(0, "}");
    }

    fn write_body(&mut self, body: &[Node], depth: usize) {
        for item in group(body) {
            match item {
                Item::Stmt(node) => self.write_stmt(node, depth),
                Item::Chain(branches) => {
                    for (i, branch) in branches.iter().enumerate() {
                        let head = match (i, branch.condition) {
                            (0, Some(cond)) => format!("if {} {{", self.expr(cond)),
                            (_, Some(cond)) => format!("}} else if {} {{", self.expr(cond)),
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
            } => format!("{name} := {}", self.expr(value)),
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
                let line = match (value, constant) {
                    (Some(value), true) => format!("const {name} = {}", self.expr(value)),
                    (Some(value), false) => format!("{name} := {}", self.expr(value)),
                    (None, _) => format!("var {name} {ANY}"),
                };
                self.code.line(depth, line);
            }

            Node::Assignment { target, value } => {
                let line = format!("{target} = {}", self.expr(value));
                self.code.line(depth, line);
            }

            Node::WhileLoop { condition, body } => {
                let line = format!("for {} {{", self.expr(condition));
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
                    "for {}; {}; {} {{",
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
                let line = format!("for _, {variable} := range {} {{", self.expr(iterable));
                self.code.line(depth, line);
                self.write_body(body, depth + 1);
                self.code.line(depth, "}");
            }

            Node::FunctionDeclaration {
                name,
                parameters,
                body,
            } => {
                let line = format!("{name} := func{} {{", Self::signature(parameters, body));
                self.code.line(depth, line);
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
                let line = format!("fmt.Println({})", self.expr(value));
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
                let line = self.expr(node);
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
    use crate::ir::BinaryOp;

    fn emit(tree: &[Node]) -> String {
        GoWriter::emit(tree, &GenerateOptions::default())
    }

    #[test]
    fn test_empty_tree_is_shell_only() {
        assert_eq!(emit(&[]), "package main\n\nfunc main() {\n}");
    }

    #[test]
    fn test_fmt_imported_only_when_printing() {
        let quiet = [Node::var("x", Some(Node::number(1)))];
        assert!(!emit(&quiet).contains("import"));

        let loud = [Node::if_stmt(
            Node::boolean(true),
            vec![Node::print(Node::ident("x"))],
        )];
        assert_eq!(
            emit(&loud),
            "package main\n\nimport \"fmt\"\n\nfunc main() {\n  if true {\n    fmt.Println(x)\n  }\n}"
        );
    }

    #[test]
    fn test_else_shares_the_closing_brace_line() {
        let tree = [
            Node::if_stmt(Node::ident("a"), vec![Node::call("f", vec![])]),
            Node::else_stmt(vec![Node::call("g", vec![])]),
        ];
        assert_eq!(
            emit(&tree),
            "package main\n\nfunc main() {\n  if a {\n    f()\n  } else {\n    g()\n  }\n}"
        );
    }

    #[test]
    fn test_hoisted_and_nested_functions() {
        let tree = [
            Node::function(
                "outer",
                vec!["n".into()],
                vec![
                    Node::function("inner", vec![], vec![]),
                    Node::return_stmt(Some(Node::ident("n"))),
                ],
            ),
            Node::call("outer", vec![Node::number(1)]),
        ];
        assert_eq!(
            emit(&tree),
            "package main\n\nfunc outer(n interface{}) interface{} {\n  inner := func() {\n  }\n  return n\n}\n\nfunc main() {\n  outer(1)\n}"
        );
    }

    #[test]
    fn test_loops() {
        let tree = [
            Node::while_loop(
                Node::binary(Node::ident("x"), BinaryOp::Lt, Node::number(3)),
                vec![Node::unary(UnaryOp::Increment, Node::ident("x"))],
            ),
            Node::for_each("v", Node::ident("xs"), vec![]),
            Node::var("none", None),
        ];
        assert_eq!(
            emit(&tree),
            "package main\n\nfunc main() {\n  for x < 3 {\n    x++\n  }\n  for _, v := range xs {\n  }\n  var none interface{}\n}"
        );
    }
}
