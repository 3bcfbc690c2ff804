//! Adapts a vendored upstream file to the generated tree it is copied into.
//!
//! Duplicated types are dropped together with the comments that belong to
//! them, imports are moved onto the target module, and a provenance comment
//! is stamped on top. The work happens in two pure passes ([`plan_removals`]
//! then [`apply`]) and the result is parsed again before being handed back.

pub mod removal;
pub mod splice;

pub use removal::{Removal, orphaned_comments, plan_removals};
pub use splice::{ImportRewrite, apply, plan_import_rewrites};

use crate::config::ModuleSubstitution;
use crate::error::{ObjgenError, Result};
use crate::indexing::TypeIndex;
use crate::model::SourceTree;
use crate::parser::SourceParser;
use std::path::Path;
use tracing::debug;

pub fn provenance_text(source_url: &str) -> String {
    format!("Original file location {}", source_url)
}

pub struct Reconciler<'a> {
    parser: &'a dyn SourceParser,
    index: &'a TypeIndex,
    substitution: ModuleSubstitution,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        parser: &'a dyn SourceParser,
        index: &'a TypeIndex,
        substitution: ModuleSubstitution,
    ) -> Self {
        Self {
            parser,
            index,
            substitution,
        }
    }

    /// Reconciles `tree`, fetched from `source_url`, with the types already
    /// present in `destination`.
    pub fn reconcile(
        &self,
        tree: &SourceTree,
        source_url: &str,
        destination: &Path,
    ) -> Result<SourceTree> {
        let rewrites = plan_import_rewrites(tree, &self.substitution);
        let removals = plan_removals(tree, |name| self.index.exists(destination, name));

        for rewrite in &rewrites {
            debug!("{}: import {} -> {}", source_url, rewrite.from, rewrite.to);
        }
        for removal in &removals {
            debug!(
                "{}: dropping {} already declared in {}",
                source_url,
                removal.names.join(", "),
                destination.display()
            );
        }

        let provenance = self.parser.line_comment(&provenance_text(source_url));
        let text = apply(tree, &removals, &rewrites, &provenance);

        self.parser.parse(&text, source_url).map_err(|e| {
            ObjgenError::Internal(format!(
                "reconciled content of {} is no longer valid {}: {}",
                source_url,
                self.parser.language(),
                e
            ))
        })
    }
}
