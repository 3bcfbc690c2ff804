use crate::error::Result;
use crate::model::SourceTree;

/// A language front end able to turn source text into a [`SourceTree`].
///
/// Implementations must reject text that does not parse cleanly: the
/// reconciler relies on a successful parse as its proof that the text it
/// produced is still valid source.
pub trait SourceParser: Send + Sync {
    /// Short language name used in log lines ("go").
    fn language(&self) -> &'static str;

    /// File extension, without the dot, of source files in this language.
    fn file_extension(&self) -> &'static str;

    /// Parses `source`. `origin` names where the text came from (URL or path)
    /// and is carried into the error on failure.
    fn parse(&self, source: &str, origin: &str) -> Result<SourceTree>;

    /// Renders `text` as a single line comment, without trailing newline.
    fn line_comment(&self, text: &str) -> String;
}

pub mod utils;
