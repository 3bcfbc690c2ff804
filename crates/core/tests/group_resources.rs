use objgen_core::ObjgenError;
use objgen_core::emit::{GroupResource, PackageEmissionRecord, TemplateSet};
use objgen_core::model::GroupVersionKind;
use objgen_core::plan::RefactoringPlan;
use objgen_core::project::Project;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn plan() -> RefactoringPlan {
    serde_json::from_value(json!({
        "definitions": [
            {
                "id": "io.k8s.api.events.v1.Event",
                "package": "api/events/v1",
                "type_name": "Event",
                "extensions": {
                    "x-kubernetes-group-version-kind": [
                        { "group": "events.k8s.io", "kind": "Event", "version": "v1" }
                    ]
                }
            },
            {
                "id": "io.k8s.api.events.v1.EventSeries",
                "package": "api/events/v1",
                "type_name": "EventSeries"
            },
            {
                "id": "io.k8s.apimachinery.pkg.apis.meta.v1.DeleteOptions",
                "package": "apimachinery/pkg/apis/meta/v1",
                "type_name": "DeleteOptions",
                "extensions": {
                    "x-kubernetes-group-version-kind": [
                        { "group": "", "kind": "DeleteOptions", "version": "v1" },
                        { "group": "admission.k8s.io", "kind": "DeleteOptions", "version": "v1" },
                        { "group": "apps", "kind": "DeleteOptions", "version": "v1" }
                    ]
                }
            },
            {
                "id": "io.k8s.api.core.v1.Pod",
                "package": "api/core/v1",
                "type_name": "Pod",
                "extensions": {
                    "x-kubernetes-group-version-kind": [
                        { "group": "", "kind": "Pod", "version": "v1" },
                        { "group": "", "kind": "Pod", "version": "v1beta1" }
                    ]
                }
            }
        ]
    }))
    .unwrap()
}

#[test]
fn test_record_from_plan() {
    let record = PackageEmissionRecord::from_plan(&plan()).unwrap();

    let packages: Vec<&str> = record.iter().map(|(package, _)| package).collect();
    assert_eq!(packages, vec!["api/events/v1", "api/core/v1"]);
    assert_eq!(
        record.kinds("api/events/v1").unwrap(),
        &[GroupVersionKind::new("events.k8s.io", "v1", "Event")]
    );
    assert_eq!(
        record.kinds("api/core/v1").unwrap(),
        &[GroupVersionKind::new("", "v1", "Pod")]
    );
    assert!(record.kinds("apimachinery/pkg/apis/meta/v1").is_none());
}

#[test]
fn test_generate_writes_group_and_kind_files() {
    let dir = tempdir().unwrap();
    let project = Project::new(dir.path(), "github.com/kubewarden/k8s-objects", None);

    let written = GroupResource::default().generate(&project, &plan()).unwrap();

    let events = dir.path().join("src/api/events/v1");
    let core = dir.path().join("src/api/core/v1");
    assert_eq!(
        written,
        vec![
            events.join("group_info.go"),
            events.join("event_gvk.go"),
            core.join("group_info.go"),
            core.join("pod_gvk.go"),
        ]
    );

    let group_info = fs::read_to_string(events.join("group_info.go")).unwrap();
    assert!(group_info.contains("package v1\n"));
    assert!(group_info.contains("const GroupName = \"events.k8s.io\""));
    assert!(group_info.contains("const GroupVersion = \"v1\""));

    let event = fs::read_to_string(events.join("event_gvk.go")).unwrap();
    assert!(event.contains("const EventKind = \"Event\""));
    assert!(event.contains("func (*Event) GroupVersionKind() (group, version, kind string)"));
    assert!(!event.contains("{{"));

    let core_info = fs::read_to_string(core.join("group_info.go")).unwrap();
    assert!(core_info.contains("const GroupName = \"\""));

    assert!(!dir.path().join("src/apimachinery/pkg/apis/meta/v1").exists());
}

#[test]
fn test_generate_overwrites_existing_files() {
    let dir = tempdir().unwrap();
    let project = Project::new(dir.path(), "github.com/kubewarden/k8s-objects", None);
    let events = dir.path().join("src/api/events/v1");
    fs::create_dir_all(&events).unwrap();
    fs::write(events.join("event_gvk.go"), "// stale\n".repeat(200)).unwrap();

    GroupResource::default().generate(&project, &plan()).unwrap();

    let event = fs::read_to_string(events.join("event_gvk.go")).unwrap();
    assert!(!event.contains("stale"));
}

#[test]
fn test_custom_templates() {
    let dir = tempdir().unwrap();
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("object_kind.go.tmpl"), "{{Kind}} in {{PackagePath}}\n").unwrap();
    fs::write(templates.join("group_version.go.tmpl"), "{{Group}}/{{Version}}\n").unwrap();

    let project = Project::new(dir.path().join("out"), "example.com/objects", None);
    let emitter = GroupResource::new(TemplateSet::from_dir(&templates).unwrap());
    emitter.generate(&project, &plan()).unwrap();

    let events = dir.path().join("out/src/api/events/v1");
    assert_eq!(
        fs::read_to_string(events.join("group_info.go")).unwrap(),
        "events.k8s.io/v1\n"
    );
    assert_eq!(
        fs::read_to_string(events.join("event_gvk.go")).unwrap(),
        "Event in api/events/v1\n"
    );
}

#[test]
fn test_unknown_placeholder_fails() {
    let dir = tempdir().unwrap();
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("object_kind.go.tmpl"), "{{Kind}}\n").unwrap();
    fs::write(templates.join("group_version.go.tmpl"), "{{Grup}}\n").unwrap();

    let project = Project::new(dir.path().join("out"), "example.com/objects", None);
    let emitter = GroupResource::new(TemplateSet::from_dir(&templates).unwrap());

    assert!(matches!(
        emitter.generate(&project, &plan()),
        Err(ObjgenError::Template(_))
    ));
    assert!(!dir.path().join("out").exists());
}
