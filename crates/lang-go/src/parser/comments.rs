//! Grouping of individual `//` and `/* */` comments into blocks.
//!
//! Follows the Go rule for comment groups: comments separated by nothing but
//! whitespace and at most one line break belong together, and a comment that
//! trails code on its line stands alone.

use objgen_core::model::{CommentBlock, Span};

pub fn group_comments(source: &str, mut comments: Vec<Span>) -> Vec<CommentBlock> {
    comments.sort();

    let mut blocks: Vec<CommentBlock> = Vec::new();
    let mut current: Option<(Span, bool)> = None;

    for span in comments {
        if let Some((block, closed)) = current.as_mut() {
            let gap = &source[block.end..span.start];
            if !*closed && is_whitespace(gap) && gap.matches('\n').count() <= 1 {
                block.end = span.end;
                continue;
            }
            blocks.push(to_block(source, *block));
        }
        current = Some((span, trails_code(source, span.start)));
    }

    if let Some((block, _)) = current {
        blocks.push(to_block(source, block));
    }
    blocks
}

fn to_block(source: &str, span: Span) -> CommentBlock {
    CommentBlock {
        span,
        text: source[span.start..span.end].to_string(),
    }
}

fn is_whitespace(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn trails_code(source: &str, offset: usize) -> bool {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    !is_whitespace(&source[line_start..offset])
}
