//! Pass 1: decide what goes, as plain intervals.

use crate::model::{CommentBlock, SourceTree, Span};

/// A declaration (or a single spec of a grouped declaration) to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub names: Vec<String>,
    pub span: Span,
    /// Byte offset at which a doc comment sitting on the line directly above
    /// the declaration ends. `None` when the declaration does not start its line.
    pub doc_anchor: Option<usize>,
    /// Byte offset at which a comment trailing the declaration on its last
    /// line starts.
    pub trailing_anchor: usize,
}

impl Removal {
    pub fn new(source: &str, names: Vec<String>, span: Span) -> Self {
        let line_start = line_start(source, span.start);
        let doc_anchor = if line_start > 0 && is_blank(&source[line_start..span.start]) {
            // the '\n' terminating the previous line
            Some(line_start - 1)
        } else {
            None
        };
        let trailing_anchor = span.end + horizontal_ws_len(&source[span.end..]);
        Self {
            names,
            span,
            doc_anchor,
            trailing_anchor,
        }
    }

    /// Whether `comment` goes away together with this declaration: it lies
    /// inside it, documents it from the line above, or trails its last line.
    pub fn takes_comment(&self, source: &str, comment: &CommentBlock) -> bool {
        if self.span.contains(&comment.span) {
            return true;
        }
        if Some(comment.span.end) == self.doc_anchor && starts_own_line(source, comment.span) {
            return true;
        }
        comment.span.start == self.trailing_anchor
    }
}

/// Plans the removal of every top-level type whose name satisfies
/// `is_duplicate`. Non-type declarations are never selected.
///
/// A grouped declaration whose specs are all duplicates is removed as a
/// whole; otherwise only its duplicate specs are.
pub fn plan_removals<F>(tree: &SourceTree, is_duplicate: F) -> Vec<Removal>
where
    F: Fn(&str) -> bool,
{
    let source = tree.source();
    let mut removals = Vec::new();

    for decl in tree.declarations.iter().filter(|d| d.is_type()) {
        let specs = decl.type_specs();
        let duplicates: Vec<_> = specs.iter().filter(|s| is_duplicate(&s.name)).collect();
        if duplicates.is_empty() {
            continue;
        }

        if duplicates.len() == specs.len() {
            let names = duplicates.iter().map(|s| s.name.clone()).collect();
            removals.push(Removal::new(source, names, decl.span));
        } else {
            for spec in duplicates {
                removals.push(Removal::new(source, vec![spec.name.clone()], spec.span));
            }
        }
    }

    removals
}

/// Comments that must be removed along with `removals`, in source order.
pub fn orphaned_comments<'t>(tree: &'t SourceTree, removals: &[Removal]) -> Vec<&'t CommentBlock> {
    let source = tree.source();
    tree.comments
        .iter()
        .filter(|comment| removals.iter().any(|r| r.takes_comment(source, comment)))
        .collect()
}

pub(crate) fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Offset of the `'\n'` ending the line containing `offset`, or the source length.
pub(crate) fn line_end(source: &str, offset: usize) -> usize {
    source[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(source.len())
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c == ' ' || c == '\t' || c == '\r')
}

fn horizontal_ws_len(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

fn starts_own_line(source: &str, span: Span) -> bool {
    is_blank(&source[line_start(source, span.start)..span.start])
}
