//! Go front end: reads Go sources into the language-agnostic
//! [`SourceTree`](objgen_core::model::SourceTree) using tree-sitter-go.

pub mod parser;
pub mod queries;

pub use parser::GoParser;
