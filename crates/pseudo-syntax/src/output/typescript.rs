//! TypeScript writer: the JavaScript writer with type annotations.

use super::javascript::JavaScriptWriter;
use crate::ir::Node;
use crate::options::GenerateOptions;
use crate::tags::TargetTag;
use crate::traits::Writer;

/// Static instance of the TypeScript writer for registry.
pub static TYPESCRIPT_WRITER: TypeScriptWriterImpl = TypeScriptWriterImpl;

/// TypeScript writer implementing the Writer trait.
pub struct TypeScriptWriterImpl;

impl Writer for TypeScriptWriterImpl {
    fn language(&self) -> TargetTag {
        TargetTag::TypeScript
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn write(&self, tree: &[Node], options: &GenerateOptions) -> String {
        TypeScriptWriter::emit(tree, options)
    }
}

/// Emits a tree as TypeScript.
pub struct TypeScriptWriter;

impl TypeScriptWriter {
    /// Emit a tree as TypeScript. Declarations are annotated with the type
    /// inferred from their value, `any` when nothing can be inferred.
    pub fn emit(tree: &[Node], options: &GenerateOptions) -> String {
        JavaScriptWriter::emit_with(tree, options, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BinaryOp;

    fn emit(tree: &[Node]) -> String {
        TypeScriptWriter::emit(tree, &GenerateOptions::default())
    }

    #[test]
    fn test_annotations() {
        let tree = [
            Node::var("count", Some(Node::number(5))),
            Node::var("name", Some(Node::string("Ada"))),
            Node::constant("READY", Node::boolean(true)),
            Node::var("other", Some(Node::ident("count"))),
            Node::var("empty", None),
        ];
        assert_eq!(
            emit(&tree),
            "let count: number = 5;\nlet name: string = 'Ada';\nconst READY: boolean = true;\nlet other: any = count;\nlet empty: any;"
        );
    }

    #[test]
    fn test_function_signature() {
        let tree = [
            Node::function(
                "add",
                vec!["a".into(), "b".into()],
                vec![Node::return_stmt(Some(Node::binary(
                    Node::ident("a"),
                    BinaryOp::Add,
                    Node::ident("b"),
                )))],
            ),
            Node::function("greet", vec![], vec![Node::print(Node::string("hi"))]),
        ];
        assert_eq!(
            emit(&tree),
            "function add(a: any, b: any): any {\n  return a + b;\n}\nfunction greet(): void {\n  console.log('hi');\n}"
        );
    }
}
