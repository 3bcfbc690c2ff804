objgen_core::decl_indices!(GoIndices, {
    package_name => "package_name",
    import_spec => "import_spec",
    type_decl => "type_decl",
    func_decl => "func_decl",
    func_name => "func_name",
    method_decl => "method_decl",
    method_name => "method_name",
    const_decl => "const_decl",
    var_decl => "var_decl",
    comment => "comment",
});

pub const GO_DEFINITIONS_SCM: &str = include_str!("go_definitions.scm");
