//! Declaration model: the entities lowering produces.
//!
//! Ownership is tree-shaped (`Package -> File -> Decl -> Field`). Upward links
//! (`File -> Package`, `Decl -> File`) are plain ids resolved through the
//! [`Ir`](crate::Ir), never shared ownership.

use std::fmt;

use go125_syntax::Diag;

use crate::error::LowerIssue;
use crate::store::OrderedMap;

/// Position of a package in [`Ir::packages`](crate::Ir::packages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageId(pub(crate) u32);

impl PackageId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of a file: owning package plus index within its file map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    pub(crate) package: PackageId,
    pub(crate) index: u32,
}

impl FileId {
    #[inline]
    pub const fn package(self) -> PackageId {
        self.package
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

/// Raw comment lines of one comment group, markers included.
pub type CommentLines = Vec<String>;

// =============================================================================
// Package / File / Import
// =============================================================================

#[derive(Debug, Clone)]
pub struct Package {
    pub(crate) id: PackageId,
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) files: OrderedMap<File>,
    pub(crate) errors: Vec<Diag>,
}

impl Package {
    pub fn id(&self) -> PackageId {
        self.id
    }

    /// Short name from the package clause.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Import path; the package's identity.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn files(&self) -> &OrderedMap<File> {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&File> {
        self.files.get(path)
    }

    /// Errors the loader reported for this package (lenient mode only).
    pub fn errors(&self) -> &[Diag] {
        &self.errors
    }

    /// Every declaration of every file, in file then source order.
    pub fn decls(&self) -> impl Iterator<Item = &Decl> + '_ {
        self.files.values().flat_map(|f| f.decls.values())
    }

    /// First declaration stored under `key` in any file.
    pub fn decl(&self, key: &str) -> Option<&Decl> {
        self.files.values().find_map(|f| f.decls.get(key))
    }
}

#[derive(Debug, Clone)]
pub struct File {
    pub(crate) id: FileId,
    pub(crate) path: String,
    pub(crate) comments: Vec<CommentLines>,
    pub(crate) doc: CommentLines,
    pub(crate) imports: OrderedMap<Import>,
    pub(crate) decls: OrderedMap<Decl>,
    pub(crate) issues: Vec<LowerIssue>,
}

impl File {
    pub(crate) fn new(id: FileId, path: String) -> Self {
        Self {
            id,
            path,
            comments: Vec::new(),
            doc: Vec::new(),
            imports: OrderedMap::new(),
            decls: OrderedMap::new(),
            issues: Vec::new(),
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn package_id(&self) -> PackageId {
        self.id.package
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Every comment group of the file in source order.
    pub fn comments(&self) -> &[CommentLines] {
        &self.comments
    }

    /// Package doc comment attached to this file's package clause.
    pub fn doc(&self) -> &[String] {
        &self.doc
    }

    /// Imports keyed by import path.
    pub fn imports(&self) -> &OrderedMap<Import> {
        &self.imports
    }

    /// Declarations keyed by name (methods by `Recv.Name`).
    pub fn decls(&self) -> &OrderedMap<Decl> {
        &self.decls
    }

    pub fn decl(&self, key: &str) -> Option<&Decl> {
        self.decls.get(key)
    }

    /// Lowering inconsistencies that were skipped while building this file.
    pub fn issues(&self) -> &[LowerIssue] {
        &self.issues
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) doc: CommentLines,
    pub(crate) comment: CommentLines,
}

impl Import {
    /// Local name as written: `""` when absent, `"."` for dot imports, `"_"` for blank imports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicit local alias, if any.
    pub fn alias(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_dot(&self) -> bool {
        self.name == "."
    }

    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }

    pub fn doc(&self) -> &[String] {
        &self.doc
    }

    pub fn comment(&self) -> &[String] {
        &self.comment
    }
}

// =============================================================================
// Fields
// =============================================================================

/// Flattened field: one entry per bound identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) typ: String,
    pub(crate) tag: Option<String>,
    pub(crate) unnamed: bool,
    pub(crate) pointer: bool,
    pub(crate) variadic: bool,
    pub(crate) doc: CommentLines,
    pub(crate) comment: CommentLines,
}

impl Field {
    /// Bound identifier; empty for unnamed entries.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type as source text. Variadic parameters render as `...T`; receivers are bare.
    pub fn typ(&self) -> &str {
        &self.typ
    }

    /// Raw struct tag, backquotes included.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// True when the entry binds no identifier: embedded struct fields,
    /// interface embeds and unnamed parameters.
    pub fn is_unnamed(&self) -> bool {
        self.unnamed
    }

    /// Receiver fields only: the receiver type was written `*T`.
    pub fn is_pointer(&self) -> bool {
        self.pointer
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn doc(&self) -> &[String] {
        &self.doc
    }

    pub fn comment(&self) -> &[String] {
        &self.comment
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// Closed set of declaration variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Var,
    Const,
    Type,
    Func,
    Method,
    Struct,
    Interface,
}

impl DeclKind {
    pub const ALL: [DeclKind; 7] = [
        DeclKind::Var,
        DeclKind::Const,
        DeclKind::Type,
        DeclKind::Func,
        DeclKind::Method,
        DeclKind::Struct,
        DeclKind::Interface,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DeclKind::Var => "var",
            DeclKind::Const => "const",
            DeclKind::Type => "type",
            DeclKind::Func => "func",
            DeclKind::Method => "method",
            DeclKind::Struct => "struct",
            DeclKind::Interface => "interface",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes every declaration variant carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeclHeader {
    pub(crate) name: String,
    pub(crate) file: FileId,
    pub(crate) doc: CommentLines,
}

macro_rules! decl_header_accessors {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                pub fn name(&self) -> &str {
                    &self.header.name
                }

                /// Owning file (non-owning back-reference).
                pub fn file(&self) -> FileId {
                    self.header.file
                }

                pub fn doc(&self) -> &[String] {
                    &self.header.doc
                }
            }
        )*
    };
}

decl_header_accessors!(Var, Const, Type, Func, Struct, Interface);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub(crate) header: DeclHeader,
    pub(crate) typ: String,
    pub(crate) value: String,
}

impl Var {
    /// Declared type; carried over within a group, empty when inferred.
    pub fn typ(&self) -> &str {
        &self.typ
    }

    /// Initializer as source text; empty when omitted.
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Const {
    pub(crate) header: DeclHeader,
    pub(crate) typ: String,
    pub(crate) value: String,
}

impl Const {
    pub fn typ(&self) -> &str {
        &self.typ
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Any type declaration whose right-hand side is neither a struct nor an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub(crate) header: DeclHeader,
    pub(crate) underlying: String,
    pub(crate) alias: bool,
    pub(crate) type_params: OrderedMap<Field>,
}

impl Type {
    /// Right-hand side as source text.
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// True only for `type X = Y`.
    pub fn is_alias(&self) -> bool {
        self.alias
    }

    /// Type parameters; each field's type is its constraint.
    pub fn type_params(&self) -> &OrderedMap<Field> {
        &self.type_params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub(crate) header: DeclHeader,
    pub(crate) fields: OrderedMap<Field>,
    pub(crate) type_params: OrderedMap<Field>,
}

impl Struct {
    pub fn fields(&self) -> &OrderedMap<Field> {
        &self.fields
    }

    pub fn type_params(&self) -> &OrderedMap<Field> {
        &self.type_params
    }

    /// Names of the named fields in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields
            .values()
            .filter(|f| !f.unnamed)
            .map(Field::name)
            .collect()
    }

    /// Embedded fields in declaration order.
    pub fn embedded(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.values().filter(|f| f.unnamed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub(crate) header: DeclHeader,
    pub(crate) methods: OrderedMap<Method>,
    pub(crate) embeds: OrderedMap<Field>,
    pub(crate) type_params: OrderedMap<Field>,
}

impl Interface {
    /// Explicitly declared methods (receiver is always `None`).
    pub fn methods(&self) -> &OrderedMap<Method> {
        &self.methods
    }

    /// Embedded interfaces and type-set elements, keyed by their type text.
    pub fn embeds(&self) -> &OrderedMap<Field> {
        &self.embeds
    }

    pub fn type_params(&self) -> &OrderedMap<Field> {
        &self.type_params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    pub(crate) header: DeclHeader,
    pub(crate) type_params: OrderedMap<Field>,
    pub(crate) params: OrderedMap<Field>,
    pub(crate) results: OrderedMap<Field>,
}

impl Func {
    pub fn type_params(&self) -> &OrderedMap<Field> {
        &self.type_params
    }

    /// Parameters; unnamed ones are keyed `type#index`.
    pub fn params(&self) -> &OrderedMap<Field> {
        &self.params
    }

    /// Results; unnamed ones are keyed `type#index`.
    pub fn results(&self) -> &OrderedMap<Field> {
        &self.results
    }
}

/// A function bound to a receiver, or an interface method when `receiver` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub(crate) func: Func,
    pub(crate) receiver: Option<Field>,
    pub(crate) receiver_type_params: OrderedMap<Field>,
}

impl Method {
    pub fn name(&self) -> &str {
        self.func.name()
    }

    pub fn file(&self) -> FileId {
        self.func.file()
    }

    pub fn doc(&self) -> &[String] {
        self.func.doc()
    }

    pub fn func(&self) -> &Func {
        &self.func
    }

    pub fn params(&self) -> &OrderedMap<Field> {
        &self.func.params
    }

    pub fn results(&self) -> &OrderedMap<Field> {
        &self.func.results
    }

    pub fn receiver(&self) -> Option<&Field> {
        self.receiver.as_ref()
    }

    /// Names bound by the receiver's type parameter list: `(l *List[T])` binds `T`.
    pub fn receiver_type_params(&self) -> &OrderedMap<Field> {
        &self.receiver_type_params
    }

    pub fn is_interface_method(&self) -> bool {
        self.receiver.is_none()
    }

    /// Key in the file's declaration map: `Recv.Name`, or the bare name for
    /// interface methods.
    pub fn key(&self) -> String {
        match &self.receiver {
            Some(r) => format!("{}.{}", r.typ, self.name()),
            None => self.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Var(Var),
    Const(Const),
    Type(Type),
    Func(Func),
    Method(Method),
    Struct(Struct),
    Interface(Interface),
}

macro_rules! decl_projection {
    ($($fn:ident => $variant:ident($ty:ty)),* $(,)?) => {
        $(
            pub fn $fn(&self) -> Option<&$ty> {
                match self {
                    Decl::$variant(d) => Some(d),
                    _ => None,
                }
            }
        )*
    };
}

impl Decl {
    pub fn kind(&self) -> DeclKind {
        match self {
            Decl::Var(_) => DeclKind::Var,
            Decl::Const(_) => DeclKind::Const,
            Decl::Type(_) => DeclKind::Type,
            Decl::Func(_) => DeclKind::Func,
            Decl::Method(_) => DeclKind::Method,
            Decl::Struct(_) => DeclKind::Struct,
            Decl::Interface(_) => DeclKind::Interface,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Decl::Var(d) => d.name(),
            Decl::Const(d) => d.name(),
            Decl::Type(d) => d.name(),
            Decl::Func(d) => d.name(),
            Decl::Method(d) => d.name(),
            Decl::Struct(d) => d.name(),
            Decl::Interface(d) => d.name(),
        }
    }

    pub fn file(&self) -> FileId {
        match self {
            Decl::Var(d) => d.file(),
            Decl::Const(d) => d.file(),
            Decl::Type(d) => d.file(),
            Decl::Func(d) => d.file(),
            Decl::Method(d) => d.file(),
            Decl::Struct(d) => d.file(),
            Decl::Interface(d) => d.file(),
        }
    }

    pub fn doc(&self) -> &[String] {
        match self {
            Decl::Var(d) => d.doc(),
            Decl::Const(d) => d.doc(),
            Decl::Type(d) => d.doc(),
            Decl::Func(d) => d.doc(),
            Decl::Method(d) => d.doc(),
            Decl::Struct(d) => d.doc(),
            Decl::Interface(d) => d.doc(),
        }
    }

    /// Declared type text for the variants that record one.
    pub fn declared_type(&self) -> Option<&str> {
        match self {
            Decl::Var(d) => Some(d.typ()),
            Decl::Const(d) => Some(d.typ()),
            Decl::Type(d) => Some(d.underlying()),
            _ => None,
        }
    }

    decl_projection! {
        as_var => Var(Var),
        as_const => Const(Const),
        as_type => Type(Type),
        as_func => Func(Func),
        as_method => Method(Method),
        as_struct => Struct(Struct),
        as_interface => Interface(Interface),
    }
}
