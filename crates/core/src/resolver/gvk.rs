//! Canonical Group/Version/Kind identity of generated types.

use crate::error::{ObjgenError, Result};
use crate::model::GroupVersionKind;
use serde_json::{Map, Value};

/// Extension key carrying the GVK hints of a definition.
pub const KUBERNETES_GVK_EXTENSION: &str = "x-kubernetes-group-version-kind";

/// Outcome of resolving one definition's extension entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(GroupVersionKind),
    /// No entries: not a Kubernetes kind.
    Absent,
    /// Entries disagree on the group, e.g. a type shared between the core
    /// group and an extension group.
    Ambiguous,
}

impl Resolution {
    pub fn identity(self) -> Option<GroupVersionKind> {
        match self {
            Resolution::Resolved(gvk) => Some(gvk),
            _ => None,
        }
    }
}

/// Resolves the entries of a definition in the order they appear.
///
/// A single entry wins outright. Several entries resolve to the first one
/// only when they all name the same group; otherwise the identity is
/// ambiguous and no guess is made.
pub fn resolve(entries: &[GroupVersionKind]) -> Resolution {
    match entries {
        [] => Resolution::Absent,
        [only] => Resolution::Resolved(only.clone()),
        [first, rest @ ..] => {
            if rest.iter().all(|entry| entry.group == first.group) {
                Resolution::Resolved(first.clone())
            } else {
                Resolution::Ambiguous
            }
        }
    }
}

/// Reads the GVK entries out of a definition's extension block. A missing
/// key yields no entries; a malformed value is an error naming `definition`.
pub fn extension_entries(
    definition: &str,
    extensions: &Map<String, Value>,
) -> Result<Vec<GroupVersionKind>> {
    let Some(value) = extensions.get(KUBERNETES_GVK_EXTENSION) else {
        return Ok(Vec::new());
    };
    serde_json::from_value(value.clone()).map_err(|e| ObjgenError::Extension {
        definition: definition.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(extension: Value) -> Vec<GroupVersionKind> {
        let map = extension.as_object().cloned().unwrap();
        extension_entries("test", &map).unwrap()
    }

    #[test]
    fn test_single_entry() {
        let parsed = entries(json!({
            "x-kubernetes-group-version-kind": [
                { "group": "events.k8s.io", "kind": "Event", "version": "v1" }
            ]
        }));
        assert_eq!(
            resolve(&parsed),
            Resolution::Resolved(GroupVersionKind::new("events.k8s.io", "v1", "Event"))
        );
    }

    #[test]
    fn test_disagreeing_groups_are_ambiguous() {
        let parsed = entries(json!({
            "x-kubernetes-group-version-kind": [
                { "group": "", "kind": "DeleteOptions", "version": "v1" },
                { "group": "admission.k8s.io", "kind": "DeleteOptions", "version": "v1" }
            ]
        }));
        assert_eq!(parsed.len(), 2);
        assert_eq!(resolve(&parsed), Resolution::Ambiguous);
        assert_eq!(resolve(&parsed).identity(), None);
    }

    #[test]
    fn test_same_group_takes_first_entry() {
        let parsed = vec![
            GroupVersionKind::new("apps", "v1", "Deployment"),
            GroupVersionKind::new("apps", "v1beta2", "Deployment"),
        ];
        assert_eq!(
            resolve(&parsed).identity(),
            Some(GroupVersionKind::new("apps", "v1", "Deployment"))
        );
    }

    #[test]
    fn test_no_entries() {
        assert_eq!(resolve(&[]), Resolution::Absent);
        assert!(entries(json!({ "x-kubernetes-patch-strategy": "merge" })).is_empty());
    }

    #[test]
    fn test_missing_group_means_core_group() {
        let parsed = entries(json!({
            "x-kubernetes-group-version-kind": [ { "kind": "Pod", "version": "v1" } ]
        }));
        assert_eq!(parsed[0].group, "");
        assert_eq!(parsed[0].group_version(), "v1");
    }

    #[test]
    fn test_malformed_extension_names_definition() {
        let map = json!({ "x-kubernetes-group-version-kind": "apps/v1" })
            .as_object()
            .cloned()
            .unwrap();
        match extension_entries("io.k8s.api.apps.v1.Deployment", &map) {
            Err(ObjgenError::Extension { definition, .. }) => {
                assert_eq!(definition, "io.k8s.api.apps.v1.Deployment")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
