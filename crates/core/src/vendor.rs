//! Copies upstream apimachinery sources into the generated tree.

use crate::config::GeneratorConfig;
use crate::error::{ObjgenError, Result};
use crate::fetch::Fetcher;
use crate::indexing::TypeIndex;
use crate::parser::SourceParser;
use crate::project::Project;
use crate::reconcile::Reconciler;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

/// One reconciled file waiting to be written.
#[derive(Debug, Clone)]
pub struct VendoredFile {
    pub url: String,
    pub target: PathBuf,
    pub contents: String,
}

#[derive(Debug, Default, Clone)]
pub struct VendorReport {
    pub release: Option<String>,
    pub written: Vec<PathBuf>,
}

pub struct StaticContent<'a> {
    parser: &'a dyn SourceParser,
    fetcher: &'a dyn Fetcher,
    project: &'a Project,
    config: &'a GeneratorConfig,
}

impl<'a> StaticContent<'a> {
    pub fn new(
        parser: &'a dyn SourceParser,
        fetcher: &'a dyn Fetcher,
        project: &'a Project,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            parser,
            fetcher,
            project,
            config,
        }
    }

    /// Builds the index of types already generated next to the vendored files.
    /// Files vendored by an earlier run are left out.
    pub fn type_index(&self) -> TypeIndex {
        let locations = &self.config.static_files;
        let directories = locations.iter().map(|l| self.project.vendored_dir(l));
        let vendored: HashSet<PathBuf> = locations
            .iter()
            .map(|l| self.project.vendored_path(l))
            .collect();
        TypeIndex::build_excluding(self.parser, directories, &vendored)
    }

    /// Fetches, reconciles and writes every configured file.
    ///
    /// Nothing is written unless every file was fetched and reconciled.
    pub fn copy_files(&self) -> Result<VendorReport> {
        let Some(release) = self.project.apimachinery_release()? else {
            info!("No Kubernetes release provided. Skipping static content files generation");
            return Ok(VendorReport::default());
        };

        let files = self.prepare(&release)?;

        let mut report = VendorReport {
            release: Some(release),
            written: Vec::with_capacity(files.len()),
        };
        for file in files {
            write_file(&file.target, &file.contents)?;
            info!("File {} vendored into {}", file.url, file.target.display());
            report.written.push(file.target);
        }
        Ok(report)
    }

    /// Fetches and reconciles every configured file in memory.
    pub fn prepare(&self, release: &str) -> Result<Vec<VendoredFile>> {
        let index = self.type_index();
        let substitution = self.config.module_substitution(&self.project.git_repo);
        let reconciler = Reconciler::new(self.parser, &index, substitution);

        let mut files = Vec::with_capacity(self.config.static_files.len());
        for location in &self.config.static_files {
            let url = self.config.file_url(release, location);
            let bytes = self.fetcher.fetch(&url)?;
            let source = String::from_utf8(bytes).map_err(|e| ObjgenError::parse(&url, e))?;
            let tree = self.parser.parse(&source, &url)?;

            let destination = self.project.vendored_dir(location);
            let reconciled = reconciler.reconcile(&tree, &url, &destination)?;

            files.push(VendoredFile {
                url,
                target: self.project.vendored_path(location),
                contents: reconciled.into_source(),
            });
        }
        Ok(files)
    }
}

/// Creates parent directories and replaces any existing file.
pub fn write_file(path: &std::path::Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ObjgenError::write(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| ObjgenError::write(path, e))
}
