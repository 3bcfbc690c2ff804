use crate::error::{ObjgenError, Result};
use std::collections::BTreeMap;
use std::path::Path;

pub const OBJECT_KIND_TEMPLATE: &str = include_str!("../../templates/object_kind.go.tmpl");
pub const GROUP_VERSION_TEMPLATE: &str = include_str!("../../templates/group_version.go.tmpl");

pub const OBJECT_KIND_FILE: &str = "object_kind.go.tmpl";
pub const GROUP_VERSION_FILE: &str = "group_version.go.tmpl";

/// Values for `{{Name}}` placeholders.
pub type Bindings<'a> = BTreeMap<&'static str, &'a str>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub object_kind: String,
    pub group_version: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateSet {
    pub fn builtin() -> Self {
        Self {
            object_kind: OBJECT_KIND_TEMPLATE.to_string(),
            group_version: GROUP_VERSION_TEMPLATE.to_string(),
        }
    }

    /// Loads both templates from `dir`; each must be present.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let load = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| {
                ObjgenError::Template(format!("cannot read {}: {}", path.display(), e))
            })
        };
        Ok(Self {
            object_kind: load(OBJECT_KIND_FILE)?,
            group_version: load(GROUP_VERSION_FILE)?,
        })
    }
}

/// Substitutes every `{{Name}}` in `template`. Unknown names and unclosed
/// placeholders are errors, so a typo never reaches the generated code.
pub fn render(template: &str, bindings: &Bindings<'_>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let close = after
            .find("}}")
            .ok_or_else(|| ObjgenError::Template("unclosed '{{' placeholder".to_string()))?;
        let name = after[..close].trim();
        let value = bindings
            .get(name)
            .ok_or_else(|| ObjgenError::Template(format!("unknown placeholder '{}'", name)))?;
        out.push_str(value);
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    Ok(out)
}
