use crate::parser::SourceParser;
use crate::project::is_source_path;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Struct names already declared, per destination directory.
///
/// Built once per run, before anything is written into the directories it
/// covers, and never mutated afterwards.
#[derive(Debug, Default, Clone)]
pub struct TypeIndex {
    entries: HashMap<PathBuf, BTreeSet<String>>,
}

impl TypeIndex {
    /// Scans each directory (not recursively) for source files and records
    /// the struct types they declare. A missing or unreadable directory gets
    /// an empty set; a file that cannot be read or parsed is skipped.
    pub fn build<I, P>(parser: &dyn SourceParser, directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::build_excluding(parser, directories, &HashSet::new())
    }

    /// Like [`TypeIndex::build`], but never reads the files in `excluded`:
    /// the files a previous run wrote are outputs, not declarations to honor.
    pub fn build_excluding<I, P>(
        parser: &dyn SourceParser,
        directories: I,
        excluded: &HashSet<PathBuf>,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut entries: HashMap<PathBuf, BTreeSet<String>> = HashMap::new();

        for directory in directories {
            let directory = directory.as_ref();
            if entries.contains_key(directory) {
                continue;
            }
            let names = Self::scan_directory(parser, directory, excluded);
            debug!(
                "Indexed {} existing types in {}",
                names.len(),
                directory.display()
            );
            entries.insert(directory.to_path_buf(), names);
        }

        Self { entries }
    }

    fn scan_directory(
        parser: &dyn SourceParser,
        directory: &Path,
        excluded: &HashSet<PathBuf>,
    ) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        if !directory.is_dir() {
            return names;
        }

        let mut files: Vec<PathBuf> = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_source_path(path, parser.file_extension()))
            .filter(|path| !excluded.contains(path))
            .collect();
        files.sort();

        for file in files {
            let source = match std::fs::read_to_string(&file) {
                Ok(source) => source,
                Err(e) => {
                    warn!("Skipping unreadable file {}: {}", file.display(), e);
                    continue;
                }
            };
            match parser.parse(&source, &file.to_string_lossy()) {
                Ok(tree) => {
                    for decl in &tree.declarations {
                        names.extend(decl.struct_names().map(str::to_string));
                    }
                }
                Err(e) => warn!("Skipping {} while indexing types: {}", file.display(), e),
            }
        }

        names
    }

    pub fn exists(&self, directory: &Path, name: &str) -> bool {
        self.entries
            .get(directory)
            .is_some_and(|names| names.contains(name))
    }

    pub fn types_in(&self, directory: &Path) -> Option<&BTreeSet<String>> {
        self.entries.get(directory)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PathBuf, BTreeSet<String>)> for TypeIndex {
    fn from_iter<T: IntoIterator<Item = (PathBuf, BTreeSet<String>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
