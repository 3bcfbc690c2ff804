use crate::error::{ObjgenError, Result};
use crate::model::Span;
use tree_sitter::{Language, Node, Query};

/// Converts a tree-sitter node's byte range into a [`Span`].
pub fn span_of(node: Node<'_>) -> Span {
    Span::from(node.byte_range())
}

/// Loads a Tree-sitter query from an SCM string.
pub fn load_query(language: &Language, scm: &str) -> Result<Query> {
    Query::new(language, scm).map_err(|e| ObjgenError::Internal(format!("Invalid query: {:?}", e)))
}

/// Gets the index of a capture name in a query.
pub fn get_capture_index(query: &Query, name: &str) -> Result<u32> {
    query.capture_index_for_name(name).ok_or_else(|| {
        ObjgenError::Internal(format!("Capture name '{}' not found in SCM", name))
    })
}

/// Finds the first node carrying a syntax error, depth first.
pub fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error)
        .or(Some(node))
}

/// Defines a struct holding capture indices plus a `new` that resolves them from a query.
#[macro_export]
macro_rules! decl_indices {
    ($name:ident, { $($field:ident => $capture:expr),+ $(,)? }) => {
        #[derive(Clone)]
        pub struct $name {
            $(pub $field: u32,)+
        }

        impl $name {
            pub fn new(query: &tree_sitter::Query) -> $crate::error::Result<Self> {
                Ok(Self {
                    $($field: $crate::parser::utils::get_capture_index(query, $capture)?,)+
                })
            }
        }
    };
}
