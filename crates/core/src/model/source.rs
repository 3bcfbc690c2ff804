//! Language-agnostic view of a parsed source file.
//!
//! Positions are byte offsets into [`SourceTree::source`]. Every relation the
//! reconciler needs (a comment documenting a declaration, a comment living
//! inside one) is expressed as interval arithmetic over [`Span`]s, so nothing
//! here borrows from the underlying syntax tree.

/// Half-open byte interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `other` lies entirely within `self`.
    pub fn contains(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub path: String,
    pub alias: Option<String>,
    /// The whole import spec, alias included.
    pub span: Span,
    /// The path text between its quotes.
    pub path_span: Span,
}

/// The underlying shape of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    Struct,
    Interface,
    /// `type A = B`
    Alias,
    /// Named primitives, maps, slices, function types...
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub shape: TypeShape,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    Type(Vec<TypeSpec>),
    Function(String),
    Method(String),
    Const,
    Var,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub span: Span,
    /// `type ( ... )` style declaration holding its specs in parentheses.
    pub grouped: bool,
}

impl Declaration {
    pub fn type_specs(&self) -> &[TypeSpec] {
        match &self.kind {
            DeclKind::Type(specs) => specs,
            _ => &[],
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self.kind, DeclKind::Type(_))
    }

    /// Names of the struct types this declaration introduces.
    pub fn struct_names(&self) -> impl Iterator<Item = &str> {
        self.type_specs()
            .iter()
            .filter(|spec| spec.shape == TypeShape::Struct)
            .map(|spec| spec.name.as_str())
    }
}

/// A run of adjacent comments that reads as one unit, such as a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub span: Span,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SourceTree {
    source: String,
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub declarations: Vec<Declaration>,
    pub comments: Vec<CommentBlock>,
}

impl SourceTree {
    pub fn new(
        source: String,
        package: Option<String>,
        imports: Vec<ImportDecl>,
        declarations: Vec<Declaration>,
        comments: Vec<CommentBlock>,
    ) -> Self {
        Self {
            source,
            package,
            imports,
            declarations,
            comments,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    pub fn text(&self, span: Span) -> &str {
        &self.source[span.start..span.end]
    }

    /// Names of every top-level type, in declaration order.
    pub fn type_names(&self) -> Vec<&str> {
        self.declarations
            .iter()
            .flat_map(|decl| decl.type_specs().iter().map(|spec| spec.name.as_str()))
            .collect()
    }
}
