//! Per-package identity and registration files for resolved kinds.

pub mod template;

pub use template::{Bindings, TemplateSet, render};

use crate::error::Result;
use crate::model::GroupVersionKind;
use crate::plan::RefactoringPlan;
use crate::project::Project;
use crate::resolver::{Resolution, extension_entries, resolve};
use crate::vendor::write_file;
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const GROUP_INFO_FILE: &str = "group_info.go";

/// Package path => resolved identities of the kinds generated into it, in
/// plan order and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageEmissionRecord {
    packages: IndexMap<String, Vec<GroupVersionKind>>,
}

impl PackageEmissionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every definition of `plan`. Ambiguous identities are left out.
    pub fn from_plan(plan: &RefactoringPlan) -> Result<Self> {
        let mut record = Self::new();
        for definition in &plan.definitions {
            let entries = extension_entries(&definition.id, &definition.extensions)?;
            match resolve(&entries) {
                Resolution::Resolved(gvk) => {
                    record.insert(&definition.package, gvk);
                }
                Resolution::Ambiguous => debug!(
                    "Skipping {}: its group/version/kind entries disagree on the group",
                    definition.id
                ),
                Resolution::Absent => {}
            }
        }
        Ok(record)
    }

    /// Returns false when the identity was already recorded for `package`.
    pub fn insert(&mut self, package: &str, gvk: GroupVersionKind) -> bool {
        let kinds = self.packages.entry(package.to_string()).or_default();
        if kinds.contains(&gvk) {
            return false;
        }
        kinds.push(gvk);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GroupVersionKind])> {
        self.packages.iter().map(|(p, k)| (p.as_str(), k.as_slice()))
    }

    pub fn kinds(&self, package: &str) -> Option<&[GroupVersionKind]> {
        self.packages.get(package).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// A rendered file and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

pub fn kind_file_name(kind: &str) -> String {
    format!("{}_gvk.go", kind.to_lowercase())
}

fn package_name(package: &str) -> &str {
    package
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(package)
}

pub struct GroupResource {
    templates: TemplateSet,
}

impl Default for GroupResource {
    fn default() -> Self {
        Self::new(TemplateSet::builtin())
    }
}

impl GroupResource {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    /// Resolves the plan's identities and writes the files for every package.
    pub fn generate(&self, project: &Project, plan: &RefactoringPlan) -> Result<Vec<PathBuf>> {
        let record = PackageEmissionRecord::from_plan(plan)?;
        let artifacts = self.render(project, &record)?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            write_file(&artifact.path, &artifact.contents)?;
            debug!("Wrote {}", artifact.path.display());
            written.push(artifact.path);
        }
        info!(
            "Generated group resources for {} packages ({} files)",
            record.len(),
            written.len()
        );
        Ok(written)
    }

    /// One group info artifact per package, then one kind artifact per identity.
    pub fn render(&self, project: &Project, record: &PackageEmissionRecord) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::new();

        for (package, kinds) in record.iter() {
            let Some(first) = kinds.first() else {
                continue;
            };
            if let Some(other) = kinds
                .iter()
                .find(|gvk| gvk.group != first.group || gvk.version != first.version)
            {
                warn!(
                    "Package {} mixes {} and {}; group info uses {}",
                    package,
                    first.group_version(),
                    other.group_version(),
                    first.group_version()
                );
            }

            let dir = project.package_dir(package);
            let name = package_name(package);

            let group_bindings = Bindings::from([
                ("Group", first.group.as_str()),
                ("Version", first.version.as_str()),
                ("PackagePath", package),
                ("PackageName", name),
            ]);
            artifacts.push(Artifact {
                path: dir.join(GROUP_INFO_FILE),
                contents: render(&self.templates.group_version, &group_bindings)?,
            });

            for gvk in kinds {
                let bindings = Bindings::from([
                    ("Group", gvk.group.as_str()),
                    ("Version", gvk.version.as_str()),
                    ("Kind", gvk.kind.as_str()),
                    ("PackagePath", package),
                    ("PackageName", name),
                ]);
                artifacts.push(Artifact {
                    path: dir.join(kind_file_name(&gvk.kind)),
                    contents: render(&self.templates.object_kind, &bindings)?,
                });
            }
        }

        Ok(artifacts)
    }
}
