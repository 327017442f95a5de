//! Canonical pseudocode writer.
//!
//! Keyword-terminated blocks (`IF .. THEN` / `END IF`), uppercase keywords.
//! The output reads back through the natural-language parser.

use super::{Code, CountingLoop, Item, Syntax, as_assignment, group, unsupported};
use crate::ir::{BinaryOp, Node, UnaryOp};
use crate::options::GenerateOptions;
use crate::tags::TargetTag;
use crate::traits::Writer;

/// Static instance of the pseudocode writer for registry.
pub static PSEUDOCODE_WRITER: PseudocodeWriterImpl = PseudocodeWriterImpl;

/// Pseudocode writer implementing the Writer trait.
pub struct PseudocodeWriterImpl;

impl Writer for PseudocodeWriterImpl {
    fn language(&self) -> TargetTag {
        TargetTag::Pseudocode
    }

    fn extension(&self) -> &'static str {
        "pseudo"
    }

    fn write(&self, tree: &[Node], options: &GenerateOptions) -> String {
        PseudocodeWriter::emit(tree, options)
    }
}

/// Emits a tree as canonical pseudocode.
pub struct PseudocodeWriter<'o> {
    code: Code<'o>,
}

impl Syntax for PseudocodeWriter<'_> {
    fn binary_op(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::Mod => "MOD",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            _ => op.symbol(),
        }
    }

    fn unary_op(&self, op: UnaryOp) -> &'static str {
        match op {
            UnaryOp::Not => "NOT ",
            _ => op.symbol(),
        }
    }

    fn boolean(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn null(&self) -> &'static str {
        "NULL"
    }

    fn inline_unsupported(&self, node: &Node) -> String {
        format!("<{}>", unsupported(node))
    }
}

impl<'o> PseudocodeWriter<'o> {
    /// Emit a tree as pseudocode.
    pub fn emit(tree: &[Node], options: &'o GenerateOptions) -> String {
        let mut writer = Self {
            code: Code::new(options),
        };
        writer.write_body(tree, 0);
        writer.code.finish()
    }

    fn write_body(&mut self, body: &[Node], depth: usize) {
        for item in group(body) {
            match item {
                Item::Stmt(node) => self.write_stmt(node, depth),
                Item::Chain(branches) => {
                    for (i, branch) in branches.iter().enumerate() {
                        let head = match (i, branch.condition) {
                            (0, Some(cond)) => format!("IF {} THEN", self.expr(cond)),
                            (_, Some(cond)) => format!("ELSE IF {} THEN", self.expr(cond)),
                            (_, None) => "ELSE".to_string(),
                        };
                        self.code.line(depth, head);
                        self.write_body(branch.body, depth + 1);
                    }
                    self.code.line(depth, "END IF");
                }
            }
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
                    (Some(value), true) => format!("CONSTANT {name} IS {}", self.expr(value)),
                    (Some(value), false) => format!("SET {name} TO {}", self.expr(value)),
                    (None, _) => format!("DECLARE {name}"),
                };
                self.code.line(depth, line);
            }

            // SET is reserved for declarations.
            Node::Assignment { target, value } => {
                let line = format!("{target} = {}", self.expr(value));
                self.code.line(depth, line);
            }

            Node::WhileLoop { condition, body } => {
                let line = format!("WHILE {} DO", self.expr(condition));
                self.code.line(depth, line);
                self.write_body(body, depth + 1);
                self.code.line(depth, "END WHILE");
            }

            Node::ForLoop {
                init,
                condition,
                increment,
                body,
            } => match CountingLoop::recognize(init, condition, increment) {
                Some(counting) => {
                    let mut line = format!(
                        "FOR {} FROM {} TO {}",
                        counting.var,
                        self.expr(counting.start),
                        self.expr(&counting.last())
                    );
                    if let Some(step) = counting.explicit_step() {
                        line.push_str(&format!(" STEP {}", self.expr(&step)));
                    }
                    line.push_str(" DO");
                    self.code.line(depth, line);
                    self.write_body(body, depth + 1);
                    self.code.line(depth, "END FOR");
                }
                None => {
                    // Lowered: init, then a while loop stepping at the end.
                    self.write_stmt(init, depth);
                    let line = format!("WHILE {} DO", self.expr(condition));
                    self.code.line(depth, line);
                    self.write_body(body, depth + 1);
                    self.write_stmt(&as_assignment(increment), depth + 1);
                    self.code.line(depth, "END WHILE");
                }
            },

            Node::ForEachLoop {
                variable,
                iterable,
                body,
            } => {
                let line = format!("FOR EACH {variable} IN {} DO", self.expr(iterable));
                self.code.line(depth, line);
                self.write_body(body, depth + 1);
                self.code.line(depth, "END FOR EACH");
            }

            Node::FunctionDeclaration {
                name,
                parameters,
                body,
            } => {
                self.code
                    .line(depth, format!("FUNCTION {name}({})", parameters.join(", ")));
                self.write_body(body, depth + 1);
                self.code.line(depth, "END FUNCTION");
            }

            Node::FunctionCall { .. } => {
                let line = format!("CALL {}", self.expr(node));
                self.code.line(depth, line);
            }

            Node::ReturnStatement { value } => {
                let line = match value {
                    Some(value) => format!("RETURN {}", self.expr(value)),
                    None => "RETURN".to_string(),
                };
                self.code.line(depth, line);
            }

            Node::PrintStatement { value } => {
                let line = format!("PRINT {}", self.expr(value));
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

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(tree: &[Node]) -> String {
        PseudocodeWriter::emit(tree, &GenerateOptions::default())
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            emit(&[Node::var("x", Some(Node::number(5)))]),
            "SET x TO 5"
        );
        assert_eq!(
            emit(&[Node::constant("MAX", Node::number(10))]),
            "CONSTANT MAX IS 10"
        );
        assert_eq!(emit(&[Node::var("y", None)]), "DECLARE y");
    }

    #[test]
    fn test_operator_table() {
        let cond = Node::binary(
            Node::binary(Node::ident("n"), BinaryOp::Mod, Node::number(2)),
            BinaryOp::Eq,
            Node::number(0),
        );
        let tree = [Node::if_stmt(
            Node::binary(cond, BinaryOp::And, Node::unary(UnaryOp::Not, Node::ident("done"))),
            vec![Node::print(Node::boolean(true))],
        )];
        assert_eq!(
            emit(&tree),
            "IF n MOD 2 == 0 AND NOT done THEN\n  PRINT TRUE\nEND IF"
        );
    }

    #[test]
    fn test_not_under_comparison_is_parenthesised() {
        let tree = [Node::print(Node::binary(
            Node::unary(UnaryOp::Not, Node::ident("a")),
            BinaryOp::Eq,
            Node::boolean(false),
        ))];
        assert_eq!(emit(&tree), "PRINT (NOT a) == FALSE");
    }

    #[test]
    fn test_counting_loop() {
        let tree = [Node::for_loop(
            Node::var("i", Some(Node::number(0))),
            Node::binary(Node::ident("i"), BinaryOp::Lt, Node::number(5)),
            Node::unary(UnaryOp::Increment, Node::ident("i")),
            vec![Node::print(Node::ident("i"))],
        )];
        assert_eq!(emit(&tree), "FOR i FROM 0 TO 4 DO\n  PRINT i\nEND FOR");
    }

    #[test]
    fn test_descending_counting_loop() {
        let tree = [Node::for_loop(
            Node::var("i", Some(Node::number(10))),
            Node::binary(Node::ident("i"), BinaryOp::Gt, Node::number(0)),
            Node::unary(UnaryOp::Decrement, Node::ident("i")),
            vec![Node::print(Node::ident("i"))],
        )];
        assert_eq!(
            emit(&tree),
            "FOR i FROM 10 TO 1 STEP -1 DO\n  PRINT i\nEND FOR"
        );
    }

    #[test]
    fn test_step_of_unknown_sign_is_lowered() {
        let tree = [Node::for_loop(
            Node::var("i", Some(Node::number(0))),
            Node::binary(Node::ident("i"), BinaryOp::Le, Node::ident("n")),
            Node::assign(
                "i",
                Node::binary(Node::ident("i"), BinaryOp::Add, Node::ident("k")),
            ),
            vec![Node::print(Node::ident("i"))],
        )];
        assert_eq!(
            emit(&tree),
            "SET i TO 0\nWHILE i <= n DO\n  PRINT i\n  i = i + k\nEND WHILE"
        );
    }

    #[test]
    fn test_comments_can_be_suppressed() {
        let tree = [Node::comment("note"), Node::ident("x")];
        let options = GenerateOptions::default().with_comments(false);
        assert_eq!(
            PseudocodeWriter::emit(&tree, &options),
            "// unsupported node: Identifier"
        );
    }
}
