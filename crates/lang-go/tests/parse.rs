use objgen_core::model::DeclKind;
use objgen_core::parser::SourceParser;
use objgen_go::GoParser;

const SOURCE: &str = r#"// Package v1 holds the meta types.
package v1

import "k8s.io/apimachinery/pkg/types"

// TypeMeta describes an individual object.
//
// +k8s:deepcopy-gen=false
type TypeMeta struct {
	Kind string `json:"kind,omitempty"` // kind of the object
}

var _ = types.UID("") // keep the import

/* ObjectMeta is metadata. */
type ObjectMeta struct{}
"#;

#[test]
fn test_comment_blocks_follow_go_grouping() {
    let tree = GoParser::new().unwrap().parse(SOURCE, "meta.go").unwrap();

    let texts: Vec<&str> = tree.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "// Package v1 holds the meta types.",
            "// TypeMeta describes an individual object.\n//\n// +k8s:deepcopy-gen=false",
            "// kind of the object",
            "// keep the import",
            "/* ObjectMeta is metadata. */",
        ]
    );
}

#[test]
fn test_declarations_in_source_order() {
    let tree = GoParser::new().unwrap().parse(SOURCE, "meta.go").unwrap();

    assert_eq!(tree.package.as_deref(), Some("v1"));
    assert_eq!(tree.imports.len(), 1);
    assert_eq!(tree.imports[0].alias, None);
    assert_eq!(tree.type_names(), vec!["TypeMeta", "ObjectMeta"]);
    assert!(matches!(tree.declarations[1].kind, DeclKind::Var));
    let starts: Vec<usize> = tree.declarations.iter().map(|d| d.span.start).collect();
    assert!(starts.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_line_comment() {
    let parser = GoParser::new().unwrap();
    assert_eq!(parser.line_comment("hello"), "// hello");
    assert_eq!(parser.file_extension(), "go");
}
