//! Pass 2: filter and splice the source text against the planned removals.

use super::removal::{Removal, is_blank, line_end, line_start, orphaned_comments};
use crate::config::ModuleSubstitution;
use crate::model::{SourceTree, Span};

/// A replacement of an import path, text between the quotes only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRewrite {
    pub span: Span,
    pub from: String,
    pub to: String,
}

pub fn plan_import_rewrites(tree: &SourceTree, substitution: &ModuleSubstitution) -> Vec<ImportRewrite> {
    tree.imports
        .iter()
        .filter_map(|import| {
            substitution.apply(&import.path).map(|to| ImportRewrite {
                span: import.path_span,
                from: import.path.clone(),
                to,
            })
        })
        .collect()
}

/// Produces the reconciled text: removed declarations and their comments cut
/// out, import paths rewritten, `provenance` placed first followed by a blank
/// line.
pub fn apply(
    tree: &SourceTree,
    removals: &[Removal],
    rewrites: &[ImportRewrite],
    provenance: &str,
) -> String {
    let source = tree.source();

    let mut cuts: Vec<Span> = removals.iter().map(|r| r.span).collect();
    cuts.extend(orphaned_comments(tree, removals).iter().map(|c| c.span));
    // Cuts sharing a line, such as a declaration and its trailing comment, act as one
    let cuts = join_on_line(source, merge(cuts));
    let cuts = merge(cuts.into_iter().map(|span| widen_to_lines(source, span)).collect());
    let cuts = merge(cuts.into_iter().map(|span| absorb_blank_line(source, span)).collect());

    let mut edits: Vec<(Span, &str)> = cuts.iter().map(|span| (*span, "")).collect();
    edits.extend(
        rewrites
            .iter()
            .filter(|rw| !cuts.iter().any(|cut| cut.overlaps(&rw.span)))
            .map(|rw| (rw.span, rw.to.as_str())),
    );
    edits.sort_by_key(|(span, _)| span.start);

    let mut out = String::with_capacity(provenance.len() + source.len() + 2);
    out.push_str(provenance);
    out.push_str("\n\n");

    let mut cursor = 0;
    for (span, replacement) in edits {
        out.push_str(&source[cursor..span.start]);
        out.push_str(replacement);
        cursor = span.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Grows `span` to cover its lines, newline included, when nothing else
/// shares those lines.
fn widen_to_lines(source: &str, span: Span) -> Span {
    let start = line_start(source, span.start);
    let end = line_end(source, span.end);
    if is_blank(&source[start..span.start]) && is_blank(&source[span.end..end]) {
        Span::new(start, (end + 1).min(source.len()))
    } else {
        span
    }
}

/// A line-aligned cut sitting between two blank lines (or the file edge)
/// takes one of them along, so no double blank line is left behind.
fn absorb_blank_line(source: &str, span: Span) -> Span {
    let aligned_start = span.start == line_start(source, span.start);
    let aligned_end = span.end == source.len() || source[..span.end].ends_with('\n');
    if !aligned_start || !aligned_end {
        return span;
    }

    let blank_before = span.start == 0 || {
        let prev_start = line_start(source, span.start - 1);
        is_blank(&source[prev_start..span.start - 1])
    };
    let next_end = line_end(source, span.end);
    let blank_after = span.end < source.len() && is_blank(&source[span.end..next_end]);

    if blank_before && blank_after {
        Span::new(span.start, (next_end + 1).min(source.len()))
    } else if span.end == source.len() && span.start > 0 && blank_before {
        Span::new(line_start(source, span.start - 1), span.end)
    } else {
        span
    }
}

/// Joins consecutive spans separated only by spaces or tabs.
fn join_on_line(source: &str, spans: Vec<Span>) -> Vec<Span> {
    let mut joined: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match joined.last_mut() {
            Some(last)
                if source[last.end..span.start]
                    .chars()
                    .all(|c| c == ' ' || c == '\t') =>
            {
                last.end = last.end.max(span.end)
            }
            _ => joined.push(span),
        }
    }
    joined
}

fn merge(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort();
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_joins_touching_spans() {
        let merged = merge(vec![Span::new(10, 20), Span::new(0, 5), Span::new(5, 8), Span::new(15, 30)]);
        assert_eq!(merged, vec![Span::new(0, 8), Span::new(10, 30)]);
    }

    #[test]
    fn test_join_on_line() {
        let source = "type X struct{} // note\nnext";
        let decl = Span::new(0, 15);
        let note = Span::new(16, 23);
        assert_eq!(join_on_line(source, vec![decl, note]), vec![Span::new(0, 23)]);
        let next = Span::new(24, 28);
        assert_eq!(join_on_line(source, vec![decl, next]), vec![decl, next]);
    }

    #[test]
    fn test_widen_to_lines() {
        let source = "a\n  type X struct{}\nb\n";
        let start = source.find("type").unwrap();
        let end = start + "type X struct{}".len();
        let widened = widen_to_lines(source, Span::new(start, end));
        assert_eq!(&source[widened.start..widened.end], "  type X struct{}\n");
    }

    #[test]
    fn test_widen_keeps_shared_lines() {
        let source = "x := 1; type X struct{}\n";
        let start = source.find("type").unwrap();
        let span = Span::new(start, source.len() - 1);
        assert_eq!(widen_to_lines(source, span), span);
    }

    #[test]
    fn test_absorb_blank_line_between_blank_lines() {
        let source = "a\n\ncut\n\nb\n";
        let start = source.find("cut").unwrap();
        let span = absorb_blank_line(source, Span::new(start, start + 4));
        let mut out = source.to_string();
        out.replace_range(span.start..span.end, "");
        assert_eq!(out, "a\n\nb\n");
    }

    #[test]
    fn test_absorb_blank_line_at_end_of_file() {
        let source = "a\n\ncut\n";
        let start = source.find("cut").unwrap();
        let span = absorb_blank_line(source, Span::new(start, source.len()));
        let mut out = source.to_string();
        out.replace_range(span.start..span.end, "");
        assert_eq!(out, "a\n");
    }
}
