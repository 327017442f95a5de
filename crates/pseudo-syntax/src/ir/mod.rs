//! The pseudocode tree.
//!
//! A closed tagged union of statement and expression kinds. Trees are built
//! fresh by the parser, handed to exactly one writer, then dropped. Nodes
//! compare by value only.
//!
//! Serialized as an internally tagged union: every node is an object with a
//! `"type"` field naming its kind.

mod literal;
mod ops;

pub use literal::{DataKind, Literal};
pub use ops::{BinaryOp, UnaryOp};

use serde::{Deserialize, Serialize};

/// A node of the pseudocode tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    // Statements
    VariableDeclaration {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<Node>>,
        #[serde(default, skip_serializing_if = "is_false")]
        constant: bool,
    },
    Assignment {
        target: String,
        value: Box<Node>,
    },
    IfStatement {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    ElseIfStatement {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    ElseStatement {
        body: Vec<Node>,
    },
    WhileLoop {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    ForLoop {
        init: Box<Node>,
        condition: Box<Node>,
        increment: Box<Node>,
        body: Vec<Node>,
    },
    ForEachLoop {
        variable: String,
        iterable: Box<Node>,
        body: Vec<Node>,
    },
    FunctionDeclaration {
        name: String,
        parameters: Vec<String>,
        body: Vec<Node>,
    },
    FunctionCall {
        name: String,
        arguments: Vec<Node>,
    },
    ReturnStatement {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<Node>>,
    },
    PrintStatement {
        value: Box<Node>,
    },
    Comment {
        text: String,
    },

    // Expressions
    BinaryExpression {
        operator: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryExpression {
        operator: UnaryOp,
        operand: Box<Node>,
    },
    Literal {
        value: Literal,
    },
    Identifier {
        name: String,
    },
    ArrayAccess {
        array: String,
        index: Box<Node>,
    },
    PropertyAccess {
        object: String,
        property: String,
    },
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Node {
    /// Name of this node's kind, as used in the serialized `"type"` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::Assignment { .. } => "Assignment",
            Node::IfStatement { .. } => "IfStatement",
            Node::ElseIfStatement { .. } => "ElseIfStatement",
            Node::ElseStatement { .. } => "ElseStatement",
            Node::WhileLoop { .. } => "WhileLoop",
            Node::ForLoop { .. } => "ForLoop",
            Node::ForEachLoop { .. } => "ForEachLoop",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::FunctionCall { .. } => "FunctionCall",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::PrintStatement { .. } => "PrintStatement",
            Node::Comment { .. } => "Comment",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::UnaryExpression { .. } => "UnaryExpression",
            Node::Literal { .. } => "Literal",
            Node::Identifier { .. } => "Identifier",
            Node::ArrayAccess { .. } => "ArrayAccess",
            Node::PropertyAccess { .. } => "PropertyAccess",
        }
    }

    /// The nested body, for block statements.
    pub fn body(&self) -> Option<&[Node]> {
        match self {
            Node::IfStatement { body, .. }
            | Node::ElseIfStatement { body, .. }
            | Node::ElseStatement { body }
            | Node::WhileLoop { body, .. }
            | Node::ForLoop { body, .. }
            | Node::ForEachLoop { body, .. }
            | Node::FunctionDeclaration { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether this node or any node beneath it satisfies `pred`.
    pub fn any(&self, pred: &impl Fn(&Node) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        let children: Vec<&Node> = match self {
            Node::VariableDeclaration { value, .. } | Node::ReturnStatement { value } => {
                value.iter().map(|v| v.as_ref()).collect()
            }
            Node::Assignment { value, .. } | Node::PrintStatement { value } => vec![value.as_ref()],
            Node::IfStatement { condition, body }
            | Node::ElseIfStatement { condition, body }
            | Node::WhileLoop { condition, body } => {
                std::iter::once(condition.as_ref()).chain(body).collect()
            }
            Node::ElseStatement { body } | Node::FunctionDeclaration { body, .. } => {
                body.iter().collect()
            }
            Node::ForLoop {
                init,
                condition,
                increment,
                body,
            } => [init.as_ref(), condition.as_ref(), increment.as_ref()]
                .into_iter()
                .chain(body)
                .collect(),
            Node::ForEachLoop { iterable, body, .. } => {
                std::iter::once(iterable.as_ref()).chain(body).collect()
            }
            Node::FunctionCall { arguments, .. } => arguments.iter().collect(),
            Node::BinaryExpression { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Node::UnaryExpression { operand, .. } => vec![operand.as_ref()],
            Node::ArrayAccess { index, .. } => vec![index.as_ref()],
            Node::Comment { .. }
            | Node::Literal { .. }
            | Node::Identifier { .. }
            | Node::PropertyAccess { .. } => Vec::new(),
        };
        children.into_iter().any(|child| child.any(pred))
    }

    // Helper constructors

    pub fn ident(name: impl Into<String>) -> Self {
        Node::Identifier { name: name.into() }
    }

    pub fn literal(value: Literal) -> Self {
        Node::Literal { value }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::literal(Literal::String(s.into()))
    }

    pub fn number(n: impl Into<f64>) -> Self {
        Node::literal(Literal::Number(n.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Node::literal(Literal::Boolean(b))
    }

    pub fn null() -> Self {
        Node::literal(Literal::Null)
    }

    pub fn binary(left: Node, operator: BinaryOp, right: Node) -> Self {
        Node::BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(operator: UnaryOp, operand: Node) -> Self {
        Node::UnaryExpression {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn var(name: impl Into<String>, value: Option<Node>) -> Self {
        Node::VariableDeclaration {
            name: name.into(),
            value: value.map(Box::new),
            constant: false,
        }
    }

    pub fn constant(name: impl Into<String>, value: Node) -> Self {
        Node::VariableDeclaration {
            name: name.into(),
            value: Some(Box::new(value)),
            constant: true,
        }
    }

    pub fn assign(target: impl Into<String>, value: Node) -> Self {
        Node::Assignment {
            target: target.into(),
            value: Box::new(value),
        }
    }

    pub fn if_stmt(condition: Node, body: Vec<Node>) -> Self {
        Node::IfStatement {
            condition: Box::new(condition),
            body,
        }
    }

    pub fn else_if(condition: Node, body: Vec<Node>) -> Self {
        Node::ElseIfStatement {
            condition: Box::new(condition),
            body,
        }
    }

    pub fn else_stmt(body: Vec<Node>) -> Self {
        Node::ElseStatement { body }
    }

    pub fn while_loop(condition: Node, body: Vec<Node>) -> Self {
        Node::WhileLoop {
            condition: Box::new(condition),
            body,
        }
    }

    pub fn for_loop(init: Node, condition: Node, increment: Node, body: Vec<Node>) -> Self {
        Node::ForLoop {
            init: Box::new(init),
            condition: Box::new(condition),
            increment: Box::new(increment),
            body,
        }
    }

    pub fn for_each(variable: impl Into<String>, iterable: Node, body: Vec<Node>) -> Self {
        Node::ForEachLoop {
            variable: variable.into(),
            iterable: Box::new(iterable),
            body,
        }
    }

    pub fn function(name: impl Into<String>, parameters: Vec<String>, body: Vec<Node>) -> Self {
        Node::FunctionDeclaration {
            name: name.into(),
            parameters,
            body,
        }
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Node>) -> Self {
        Node::FunctionCall {
            name: name.into(),
            arguments,
        }
    }

    pub fn return_stmt(value: Option<Node>) -> Self {
        Node::ReturnStatement {
            value: value.map(Box::new),
        }
    }

    pub fn print(value: Node) -> Self {
        Node::PrintStatement {
            value: Box::new(value),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment { text: text.into() }
    }

    pub fn array_access(array: impl Into<String>, index: Node) -> Self {
        Node::ArrayAccess {
            array: array.into(),
            index: Box::new(index),
        }
    }

    pub fn property(object: impl Into<String>, property: impl Into<String>) -> Self {
        Node::PropertyAccess {
            object: object.into(),
            property: property.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_serialized_tag() {
        let nodes = [
            Node::var("x", Some(Node::number(1))),
            Node::if_stmt(Node::boolean(true), vec![]),
            Node::print(Node::ident("x")),
            Node::binary(Node::number(1), BinaryOp::Add, Node::number(2)),
            Node::null(),
        ];
        for node in nodes {
            let json = serde_json::to_value(&node).unwrap();
            assert_eq!(json["type"], node.kind());
        }
    }

    #[test]
    fn test_json_shape() {
        let node = Node::var("x", Some(Node::number(5)));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "VariableDeclaration",
                "name": "x",
                "value": { "type": "Literal", "value": 5.0 }
            })
        );
    }

    #[test]
    fn test_json_roundtrip_preserves_operators() {
        let node = Node::binary(Node::ident("a"), BinaryOp::Ge, Node::string("b"));
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\">=\""));
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_any_descends_into_bodies() {
        let tree = Node::while_loop(
            Node::boolean(true),
            vec![Node::if_stmt(
                Node::ident("x"),
                vec![Node::print(Node::string("deep"))],
            )],
        );
        assert!(tree.any(&|n| matches!(n, Node::PrintStatement { .. })));
        assert!(!tree.any(&|n| matches!(n, Node::ReturnStatement { .. })));
    }

    #[test]
    fn test_body_accessor() {
        let stmt = Node::for_each("item", Node::ident("items"), vec![Node::comment("c")]);
        assert_eq!(stmt.body().map(<[Node]>::len), Some(1));
        assert!(Node::ident("x").body().is_none());
    }
}
