pub mod gvk;
pub mod source;

pub use gvk::GroupVersionKind;
pub use source::{
    CommentBlock, DeclKind, Declaration, ImportDecl, SourceTree, Span, TypeShape, TypeSpec,
};
