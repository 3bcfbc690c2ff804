mod comments;

pub use comments::group_comments;

use crate::queries::go_definitions::{GO_DEFINITIONS_SCM, GoIndices};
use objgen_core::error::{ObjgenError, Result};
use objgen_core::model::{
    DeclKind, Declaration, ImportDecl, SourceTree, Span, TypeShape, TypeSpec,
};
use objgen_core::parser::SourceParser;
use objgen_core::parser::utils::{first_error, load_query, span_of};
use std::sync::Arc;
use tree_sitter::{Node, Parser, Query, QueryCursor, StreamingIterator, Tree};

pub struct GoParser {
    pub language: tree_sitter::Language,
    pub(crate) definition_query: Arc<Query>,
    pub(crate) indices: GoIndices,
}

impl Clone for GoParser {
    fn clone(&self) -> Self {
        Self {
            language: self.language.clone(),
            definition_query: Arc::clone(&self.definition_query),
            indices: self.indices.clone(),
        }
    }
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        let definition_query = load_query(&language, GO_DEFINITIONS_SCM)?;
        let indices = GoIndices::new(&definition_query)?;

        Ok(Self {
            language,
            definition_query: Arc::new(definition_query),
            indices,
        })
    }

    /// Parses `source` into a tree-sitter tree, failing on any syntax error.
    pub fn parse_tree(&self, source: &str, origin: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ObjgenError::Internal(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ObjgenError::parse(origin, "parser produced no tree"))?;

        if let Some(node) = first_error(tree.root_node()) {
            let pos = node.start_position();
            let what = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            return Err(ObjgenError::parse(
                origin,
                format!("{} at line {}, column {}", what, pos.row + 1, pos.column + 1),
            ));
        }
        check_package_clause(tree.root_node(), origin)?;

        Ok(tree)
    }

    fn extract(&self, tree: &Tree, source: &str) -> SourceTree {
        let mut package = None;
        let mut imports = Vec::new();
        let mut declarations = Vec::new();
        let mut comments = Vec::new();

        let idx = &self.indices;
        let mut cursor = QueryCursor::new();
        let mut matches =
            cursor.matches(&self.definition_query, tree.root_node(), source.as_bytes());

        while let Some(mat) = matches.next() {
            let capture = |index: u32| mat.captures.iter().find(|c| c.index == index).map(|c| c.node);

            if let Some(node) = capture(idx.comment) {
                comments.push(span_of(node));
            } else if let Some(node) = capture(idx.package_name) {
                package = Some(text(node, source).to_string());
            } else if let Some(node) = capture(idx.import_spec) {
                if let Some(import) = import_decl(node, source) {
                    imports.push(import);
                }
            } else if let Some(node) = capture(idx.type_decl) {
                declarations.push(type_declaration(node, source));
            } else if let (Some(node), Some(name)) = (capture(idx.func_decl), capture(idx.func_name)) {
                declarations.push(plain(node, DeclKind::Function(text(name, source).to_string())));
            } else if let (Some(node), Some(name)) =
                (capture(idx.method_decl), capture(idx.method_name))
            {
                declarations.push(plain(node, DeclKind::Method(text(name, source).to_string())));
            } else if let Some(node) = capture(idx.const_decl) {
                declarations.push(grouped_plain(node, DeclKind::Const));
            } else if let Some(node) = capture(idx.var_decl) {
                declarations.push(grouped_plain(node, DeclKind::Var));
            }
        }

        imports.sort_by_key(|i: &ImportDecl| i.span);
        declarations.sort_by_key(|d: &Declaration| d.span);

        SourceTree::new(
            source.to_string(),
            package,
            imports,
            declarations,
            group_comments(source, comments),
        )
    }
}

impl SourceParser for GoParser {
    fn language(&self) -> &'static str {
        "go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn parse(&self, source: &str, origin: &str) -> Result<SourceTree> {
        let tree = self.parse_tree(source, origin)?;
        Ok(self.extract(&tree, source))
    }

    fn line_comment(&self, text: &str) -> String {
        format!("// {}", text)
    }
}

/// A Go file opens with exactly one package clause, only comments before it.
fn check_package_clause(root: Node<'_>, origin: &str) -> Result<()> {
    let mut cursor = root.walk();
    let mut code = root.named_children(&mut cursor).filter(|n| n.kind() != "comment");

    match code.next() {
        Some(node) if node.kind() == "package_clause" => {}
        _ => return Err(ObjgenError::parse(origin, "expected 'package' clause")),
    }
    if let Some(node) = code.find(|n| n.kind() == "package_clause") {
        return Err(ObjgenError::parse(
            origin,
            format!("unexpected 'package' clause at line {}", node.start_position().row + 1),
        ));
    }
    Ok(())
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

fn is_grouped(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let grouped = node.children(&mut cursor).any(|c| c.kind() == "(");
    grouped
}

fn plain(node: Node<'_>, kind: DeclKind) -> Declaration {
    Declaration {
        kind,
        span: span_of(node),
        grouped: false,
    }
}

fn grouped_plain(node: Node<'_>, kind: DeclKind) -> Declaration {
    Declaration {
        kind,
        span: span_of(node),
        grouped: is_grouped(node),
    }
}

fn import_decl(node: Node<'_>, source: &str) -> Option<ImportDecl> {
    let path = node.child_by_field_name("path")?;
    let literal = span_of(path);
    if literal.len() < 2 {
        return None;
    }
    // Drop the surrounding quotes or backticks
    let path_span = Span::new(literal.start + 1, literal.end - 1);
    let alias = node
        .child_by_field_name("name")
        .map(|n| text(n, source).to_string());

    Some(ImportDecl {
        path: source[path_span.start..path_span.end].to_string(),
        alias,
        span: span_of(node),
        path_span,
    })
}

fn type_declaration(node: Node<'_>, source: &str) -> Declaration {
    let mut cursor = node.walk();
    let specs = node
        .named_children(&mut cursor)
        .filter_map(|child| type_spec(child, source))
        .collect();

    Declaration {
        kind: DeclKind::Type(specs),
        span: span_of(node),
        grouped: is_grouped(node),
    }
}

fn type_spec(node: Node<'_>, source: &str) -> Option<TypeSpec> {
    let shape = match node.kind() {
        "type_alias" => TypeShape::Alias,
        "type_spec" => match node.child_by_field_name("type").map(|t| t.kind()) {
            Some("struct_type") => TypeShape::Struct,
            Some("interface_type") => TypeShape::Interface,
            _ => TypeShape::Other,
        },
        _ => return None,
    };
    let name = node.child_by_field_name("name")?;

    Some(TypeSpec {
        name: text(name, source).to_string(),
        shape,
        span: span_of(node),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SourceTree {
        GoParser::new().unwrap().parse(source, "test.go").unwrap()
    }

    #[test]
    fn test_parse_declarations() {
        let tree = parse(
            r#"package v1

import (
	"fmt"
	meta "k8s.io/apimachinery/pkg/apis/meta/v1"
)

// Pod is a pod.
type Pod struct {
	// Name of the pod.
	Name string
}

type Phase string

type Object interface {
	GetName() string
}

type Alias = Pod

const Running Phase = "Running"

var registry = map[string]int{}

func (p *Pod) String() string { return fmt.Sprint(p.Name, meta.Now()) }

func NewPod() *Pod { return &Pod{} }
"#,
        );

        assert_eq!(tree.package.as_deref(), Some("v1"));
        assert_eq!(tree.imports.len(), 2);
        assert_eq!(tree.imports[0].path, "fmt");
        assert_eq!(tree.imports[1].alias.as_deref(), Some("meta"));
        assert_eq!(tree.imports[1].path, "k8s.io/apimachinery/pkg/apis/meta/v1");
        assert_eq!(
            tree.text(tree.imports[1].path_span),
            "k8s.io/apimachinery/pkg/apis/meta/v1"
        );

        assert_eq!(tree.type_names(), vec!["Pod", "Phase", "Object", "Alias"]);
        let shapes: Vec<TypeShape> = tree
            .declarations
            .iter()
            .flat_map(|d| d.type_specs().iter().map(|s| s.shape))
            .collect();
        assert_eq!(
            shapes,
            vec![TypeShape::Struct, TypeShape::Other, TypeShape::Interface, TypeShape::Alias]
        );

        assert_eq!(tree.declarations.len(), 8);
        assert!(matches!(&tree.declarations[6].kind, DeclKind::Method(name) if name == "String"));
        assert!(matches!(&tree.declarations[7].kind, DeclKind::Function(name) if name == "NewPod"));

        let texts: Vec<&str> = tree.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["// Pod is a pod.", "// Name of the pod."]);
    }

    #[test]
    fn test_grouped_type_declaration() {
        let tree = parse("package v1\n\ntype (\n\tA struct{}\n\tB int\n)\n");
        assert_eq!(tree.declarations.len(), 1);
        let decl = &tree.declarations[0];
        assert!(decl.grouped);
        assert_eq!(decl.struct_names().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(decl.type_specs().len(), 2);
    }

    #[test]
    fn test_parse_failure_reports_origin() {
        let parser = GoParser::new().unwrap();
        for source in [
            "package v1\n\ntype Broken struct {\n",
            "",
            "// just a comment\n",
            "type A struct{}\n",
            "type A struct{}\n\npackage v1\n",
            "package a\npackage b\n",
        ] {
            match parser.parse(source, "https://example.com/broken.go") {
                Err(ObjgenError::Parse { url, .. }) => {
                    assert_eq!(url, "https://example.com/broken.go", "source {:?}", source)
                }
                other => panic!("source {:?} gave {:?}", source, other.map(|t| t.package)),
            }
        }
    }

    #[test]
    fn test_comments_may_precede_package_clause() {
        let tree = parse("// Package v1 is v1.\n\n/* more */\npackage v1\n");
        assert_eq!(tree.package.as_deref(), Some("v1"));
    }
}
