//! # Go Declaration Syntax Tree
//!
//! Arena-allocated syntax nodes for the declaration layer of a Go source file.
//!
//! ## Architecture
//!
//! - **Nodes**: allocated in typed arenas (`SpannedArena<T>`) and addressed by `Id<T>`
//! - **Lists**: stored in centralized buffers and addressed by `ListRef<T>`
//! - **Spans**: kept in side tables next to the node data
//! - **Symbols**: identifiers are interned once in an `Interner`
//!
//! ## Scope
//!
//! - Top-level declarations, signatures, field lists, type expressions and the
//!   expressions that appear in `const`/`var` initializers are modelled in full.
//! - Function bodies are opaque: a `Block` only records its braces so the text can
//!   be recovered from the source when needed.
//! - Literal and comment text is never copied into the tree; it is sliced from the
//!   owning [`SyntaxTree`]'s source through spans.

use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::{BuildHasher, BuildHasherDefault, Hasher, RandomState};

use crate::error::Diag;

// =============================================================================
// Core Foundation Types
// =============================================================================

/// Byte range into the source text of one file.
///
/// Positions are stored as `u32`, limiting file size to 4GB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Creates a new span from usize positions.
    ///
    /// # Panics
    /// In debug builds, panics if positions exceed `u32::MAX`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= u32::MAX as usize);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Returns the smallest span covering both `self` and `other`.
    #[inline]
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slices `src` with this span, yielding `""` when the span is out of bounds.
    #[inline]
    pub fn text(self, src: &str) -> &str {
        src.get(self.start as usize..self.end as usize).unwrap_or("")
    }
}

/// Type-safe identifier for arena-allocated nodes.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Id<T> {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn to_usize(&self) -> usize {
        self.raw as usize
    }
}

/// Typed reference into a centralized list buffer of [`AstArena`].
#[derive(Debug, PartialEq, Eq)]
pub struct ListRef<T> {
    start: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for ListRef<T> {}

impl<T> Clone for ListRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Default for ListRef<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> ListRef<T> {
    pub const EMPTY: Self = Self {
        start: 0,
        len: 0,
        _marker: PhantomData,
    };

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        Self {
            start,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn start(&self) -> u32 {
        self.start
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Returns the end index (exclusive).
    #[inline]
    pub const fn end(&self) -> u32 {
        self.start + self.len
    }
}

// =============================================================================
// Symbol Interning System
// =============================================================================

/// Interned string symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

/// Type alias for identifier symbols.
pub type Ident = Symbol;

impl Symbol {
    #[inline]
    pub const fn from_raw(v: u32) -> Self {
        Self(v)
    }
}

/// Identifier occurrence (interned symbol + source position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentName {
    pub sym: Ident,
    pub pos: Span,
}

/// Identity hasher for u64 values (used for symbol hash buckets).
#[derive(Default)]
struct U64IdentityHasher(u64);

impl Hasher for U64IdentityHasher {
    fn write(&mut self, _b: &[u8]) {
        unreachable!("U64IdentityHasher only supports write_u64")
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

type U64IdentityBuild = BuildHasherDefault<U64IdentityHasher>;

/// String interner for identifiers.
///
/// Strings are stored once and looked up via hash buckets keyed by a seeded hash.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    buckets: HashMap<u64, SmallVec<[Symbol; 1]>, U64IdentityBuild>,
    state: RandomState,
}

impl Interner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn intern(&mut self, s: &str) -> Symbol {
        let h = self.state.hash_one(s);
        let entry = self.buckets.entry(h).or_default();

        for &sym in entry.iter() {
            if self.strings[sym.0 as usize].as_ref() == s {
                return sym;
            }
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.into());
        entry.push(sym);
        sym
    }

    /// Resolves a symbol back to its string.
    ///
    /// Symbols from a different interner resolve to `""`.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.strings
            .get(sym.0 as usize)
            .map(AsRef::as_ref)
            .unwrap_or("")
    }
}

// =============================================================================
// Arena Allocation
// =============================================================================

/// Arena for nodes with associated spans, stored in parallel vectors.
#[derive(Debug, Clone)]
pub struct SpannedArena<T> {
    data: Vec<T>,
    spans: Vec<Span>,
}

impl<T> Default for SpannedArena<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            spans: Vec::new(),
        }
    }
}

impl<T> SpannedArena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self, node: T, span: Span) -> Id<T> {
        let id = Id::from_raw(self.data.len() as u32);
        self.data.push(node);
        self.spans.push(span);
        id
    }

    #[inline]
    pub fn span(&self, id: Id<T>) -> Span {
        self.spans[id.to_usize()]
    }
}

impl<T> Index<Id<T>> for SpannedArena<T> {
    type Output = T;
    fn index(&self, id: Id<T>) -> &T {
        &self.data[id.to_usize()]
    }
}

impl<T> IndexMut<Id<T>> for SpannedArena<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.data[id.to_usize()]
    }
}

// =============================================================================
// Type Aliases for Node IDs
// =============================================================================

pub type DeclId = Id<Decl>;
pub type ExprId = Id<Expr>;
pub type TypeId = Id<Type>;
pub type FieldId = Id<Field>;
pub type SignatureId = Id<Signature>;
pub type FuncDeclId = Id<FuncDecl>;
pub type TypeParamsId = Id<TypeParams>;
pub type TypeParamDeclId = Id<TypeParamDecl>;
pub type CommentId = Id<Comment>;
pub type CommentGroupId = Id<CommentGroup>;

// =============================================================================
// Centralized List Storage
// =============================================================================

/// Buffers that every `ListRef<T>` points into.
#[derive(Debug, Clone, Default)]
pub struct ExtraData {
    pub ident_names: Vec<IdentName>,
    pub exprs: Vec<ExprId>,
    pub types: Vec<TypeId>,
    pub fields: Vec<FieldId>,
    pub specs: Vec<Spec>,
    pub keyed_elems: Vec<KeyedElement>,
    pub top_decls: Vec<TopLevelDecl>,
    pub type_terms: Vec<TypeTerm>,
    pub interface_elems: Vec<InterfaceElem>,
    pub type_param_decl_ids: Vec<TypeParamDeclId>,
    pub comment_ids: Vec<CommentId>,
    pub comment_group_ids: Vec<CommentGroupId>,
    pub expr_or_types: Vec<ExprOrType>,
}

// =============================================================================
// Main AST Arena
// =============================================================================

/// Central arena holding all nodes and list buffers of one file.
#[derive(Debug, Clone, Default)]
pub struct AstArena {
    pub decls: SpannedArena<Decl>,
    pub exprs: SpannedArena<Expr>,
    pub types: SpannedArena<Type>,
    pub signatures: SpannedArena<Signature>,
    pub funcs: SpannedArena<FuncDecl>,
    pub fields: SpannedArena<Field>,
    pub type_params: SpannedArena<TypeParams>,
    pub type_param_decls: SpannedArena<TypeParamDecl>,
    pub comments: SpannedArena<Comment>,
    pub comment_groups: SpannedArena<CommentGroup>,
    pub extras: ExtraData,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn push_list<T>(buf: &mut Vec<T>, items: impl IntoIterator<Item = T>) -> ListRef<T> {
        let start = buf.len();
        buf.extend(items);
        let len = buf.len() - start;
        debug_assert!(start <= u32::MAX as usize);
        debug_assert!(len <= u32::MAX as usize);
        ListRef::new(start as u32, len as u32)
    }

    #[inline]
    fn slice<T>(buf: &[T], r: ListRef<T>) -> &[T] {
        buf.get(r.start() as usize..r.end() as usize).unwrap_or(&[])
    }

    // List Builders

    pub fn list_ident_names(
        &mut self,
        i: impl IntoIterator<Item = IdentName>,
    ) -> ListRef<IdentName> {
        Self::push_list(&mut self.extras.ident_names, i)
    }

    pub fn list_exprs(&mut self, i: impl IntoIterator<Item = ExprId>) -> ListRef<ExprId> {
        Self::push_list(&mut self.extras.exprs, i)
    }

    pub fn list_types(&mut self, i: impl IntoIterator<Item = TypeId>) -> ListRef<TypeId> {
        Self::push_list(&mut self.extras.types, i)
    }

    pub fn list_fields(&mut self, i: impl IntoIterator<Item = FieldId>) -> ListRef<FieldId> {
        Self::push_list(&mut self.extras.fields, i)
    }

    pub fn list_keyed_elems(
        &mut self,
        i: impl IntoIterator<Item = KeyedElement>,
    ) -> ListRef<KeyedElement> {
        Self::push_list(&mut self.extras.keyed_elems, i)
    }

    pub fn list_specs(&mut self, i: impl IntoIterator<Item = Spec>) -> ListRef<Spec> {
        Self::push_list(&mut self.extras.specs, i)
    }

    pub fn list_top_decls(
        &mut self,
        i: impl IntoIterator<Item = TopLevelDecl>,
    ) -> ListRef<TopLevelDecl> {
        Self::push_list(&mut self.extras.top_decls, i)
    }

    pub fn list_type_terms(&mut self, i: impl IntoIterator<Item = TypeTerm>) -> ListRef<TypeTerm> {
        Self::push_list(&mut self.extras.type_terms, i)
    }

    pub fn list_interface_elems(
        &mut self,
        i: impl IntoIterator<Item = InterfaceElem>,
    ) -> ListRef<InterfaceElem> {
        Self::push_list(&mut self.extras.interface_elems, i)
    }

    pub fn list_type_param_decl_ids(
        &mut self,
        i: impl IntoIterator<Item = TypeParamDeclId>,
    ) -> ListRef<TypeParamDeclId> {
        Self::push_list(&mut self.extras.type_param_decl_ids, i)
    }

    pub fn list_comment_ids(
        &mut self,
        i: impl IntoIterator<Item = CommentId>,
    ) -> ListRef<CommentId> {
        Self::push_list(&mut self.extras.comment_ids, i)
    }

    pub fn list_comment_group_ids(
        &mut self,
        i: impl IntoIterator<Item = CommentGroupId>,
    ) -> ListRef<CommentGroupId> {
        Self::push_list(&mut self.extras.comment_group_ids, i)
    }

    pub fn list_expr_or_types(
        &mut self,
        i: impl IntoIterator<Item = ExprOrType>,
    ) -> ListRef<ExprOrType> {
        Self::push_list(&mut self.extras.expr_or_types, i)
    }

    // List Accessors

    pub fn ident_names(&self, r: ListRef<IdentName>) -> &[IdentName] {
        Self::slice(&self.extras.ident_names, r)
    }

    pub fn exprs_list(&self, r: ListRef<ExprId>) -> &[ExprId] {
        Self::slice(&self.extras.exprs, r)
    }

    pub fn types_list(&self, r: ListRef<TypeId>) -> &[TypeId] {
        Self::slice(&self.extras.types, r)
    }

    pub fn fields_list(&self, r: ListRef<FieldId>) -> &[FieldId] {
        Self::slice(&self.extras.fields, r)
    }

    pub fn keyed_elems_list(&self, r: ListRef<KeyedElement>) -> &[KeyedElement] {
        Self::slice(&self.extras.keyed_elems, r)
    }

    pub fn specs_list(&self, r: ListRef<Spec>) -> &[Spec] {
        Self::slice(&self.extras.specs, r)
    }

    pub fn top_decls(&self, r: ListRef<TopLevelDecl>) -> &[TopLevelDecl] {
        Self::slice(&self.extras.top_decls, r)
    }

    pub fn type_terms(&self, r: ListRef<TypeTerm>) -> &[TypeTerm] {
        Self::slice(&self.extras.type_terms, r)
    }

    pub fn interface_elems(&self, r: ListRef<InterfaceElem>) -> &[InterfaceElem] {
        Self::slice(&self.extras.interface_elems, r)
    }

    pub fn type_param_decl_ids(&self, r: ListRef<TypeParamDeclId>) -> &[TypeParamDeclId] {
        Self::slice(&self.extras.type_param_decl_ids, r)
    }

    pub fn comment_ids(&self, r: ListRef<CommentId>) -> &[CommentId] {
        Self::slice(&self.extras.comment_ids, r)
    }

    pub fn comment_group_ids(&self, r: ListRef<CommentGroupId>) -> &[CommentGroupId] {
        Self::slice(&self.extras.comment_group_ids, r)
    }

    pub fn expr_or_types(&self, r: ListRef<ExprOrType>) -> &[ExprOrType] {
        Self::slice(&self.extras.expr_or_types, r)
    }
}

// =============================================================================
// Parsed File
// =============================================================================

/// One parsed Go file: its path, source text, node arena and root.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub path: String,
    pub source: String,
    pub arena: AstArena,
    pub interner: Interner,
    pub root: SourceFile,
    /// Syntax errors the parser recovered from while producing this tree.
    pub diags: Vec<Diag>,
}

impl SyntaxTree {
    #[inline]
    pub fn sym(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    #[inline]
    pub fn text(&self, span: Span) -> &str {
        span.text(&self.source)
    }

    pub fn package_name(&self) -> &str {
        self.sym(self.root.name)
    }

    /// Raw lines of a comment group, one entry per comment token.
    pub fn comment_lines(&self, group: CommentGroupId) -> Vec<String> {
        let group = &self.arena.comment_groups[group];
        self.arena
            .comment_ids(group.comments)
            .iter()
            .map(|&c| self.text(self.arena.comments.span(c)).to_string())
            .collect()
    }
}

// =============================================================================
// Comments / Directives
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Comment token (text is recovered from source via span).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
}

/// Group of adjacent comments (doc, directives, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentGroup {
    pub comments: ListRef<CommentId>,
}

// =============================================================================
// Source File (Root Node)
// =============================================================================

/// ```text
/// SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFile {
    pub package_pos: Span,
    pub name: Ident,
    /// All top-level declarations in source order (imports included)
    pub decls: ListRef<TopLevelDecl>,
    /// All comment groups in this file
    pub comments: ListRef<CommentGroupId>,
    /// File/package doc comment group
    pub doc: Option<CommentGroupId>,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelDecl {
    Decl(DeclId),
    Func(FuncDeclId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decl {
    Gen(GenDecl),
    /// Declaration the parser could not make sense of.
    Bad,
}

/// `import`, `const`, `type` or `var` declaration, grouped or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenDecl {
    pub doc: Option<CommentGroupId>,
    pub kw_pos: Span,
    pub kind: GenDeclKind,
    /// Opening parenthesis for grouped declarations
    pub l_paren: Option<Span>,
    pub specs: ListRef<Spec>,
    pub r_paren: Option<Span>,
}

impl GenDecl {
    #[inline]
    pub fn is_grouped(&self) -> bool {
        self.l_paren.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GenDeclKind {
    Import,
    Const,
    Type,
    Var,
}

impl GenDeclKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            GenDeclKind::Import => "import",
            GenDeclKind::Const => "const",
            GenDeclKind::Type => "type",
            GenDeclKind::Var => "var",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `ImportSpec = [ "." | PackageName ] ImportPath`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSpec {
    pub doc: Option<CommentGroupId>,
    pub name: Option<ImportName>,
    pub path: StringLit,
    /// Trailing line comment
    pub comment: Option<CommentGroupId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportName {
    /// `import . "pkg"`
    Dot(Span),
    /// `import _ "pkg"`
    Blank(Span),
    /// `import name "pkg"`
    Name(Ident, Span),
}

/// ```text
/// ConstSpec = IdentifierList [ [ Type ] "=" ExpressionList ]
/// VarSpec   = IdentifierList ( Type [ "=" ExpressionList ] | "=" ExpressionList )
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSpec {
    pub doc: Option<CommentGroupId>,
    pub names: ListRef<IdentName>,
    pub typ: Option<TypeId>,
    pub values: ListRef<ExprId>,
}

/// `TypeSpec = AliasDecl | TypeDef`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    pub doc: Option<CommentGroupId>,
    pub name: Ident,
    pub name_pos: Span,
    pub type_params: Option<TypeParamsId>,
    /// Position of '=' for type alias
    pub assign_pos: Option<Span>,
    pub typ: TypeId,
    /// True for `type X = Y`, false for `type X Y`
    pub alias: bool,
}

/// ```text
/// FunctionDecl = "func" FunctionName [ TypeParameters ] Signature [ FunctionBody ]
/// MethodDecl   = "func" Receiver MethodName Signature [ FunctionBody ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncDecl {
    pub doc: Option<CommentGroupId>,
    pub func_pos: Span,
    /// Present only for methods
    pub recv: Option<Receiver>,
    pub name: Ident,
    pub name_pos: Span,
    /// Only for functions, not methods
    pub func_type_params: Option<TypeParamsId>,
    pub signature: SignatureId,
    /// None for declarations without body (assembly stubs)
    pub body: Option<Block>,
}

// =============================================================================
// Generics: Type Parameters and Constraints
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeParams {
    pub l_brack: Span,
    pub params: ListRef<TypeParamDeclId>,
    pub r_brack: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeParamDecl {
    pub names: ListRef<IdentName>,
    pub constraint: TypeConstraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeConstraint {
    Any { any_pos: Span },
    TypeElem(TypeElem),
    Interface(TypeId),
}

/// `TypeTerm { "|" TypeTerm }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeElem {
    pub terms: ListRef<TypeTerm>,
}

/// Method receiver. The bracket list binds type parameter *names* only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receiver {
    pub l_paren: Span,
    pub name: Option<IdentName>,
    pub typ: TypeId,
    pub type_params: Option<ReceiverTypeParams>,
    pub r_paren: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverTypeParams {
    pub l_brack: Span,
    pub names: ListRef<IdentName>,
    pub r_brack: Span,
}

// =============================================================================
// Signatures and Fields
// =============================================================================

/// `Signature = Parameters [ Result ]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub params: FieldList,
    pub results: Option<Results>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Results {
    /// `(x int, y string)` or `(int, error)`
    Params(FieldList),
    /// Single unparenthesized result: `int`
    Type(TypeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldList {
    pub l_paren: Span,
    pub fields: ListRef<FieldId>,
    pub r_paren: Span,
}

/// Field in a parameter list or struct.
///
/// `ParameterDecl = [ IdentifierList ] [ "..." ] Type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Empty for anonymous fields
    pub names: ListRef<IdentName>,
    /// Position of `...` for variadic parameters
    pub ellipsis_pos: Option<Span>,
    pub typ: TypeId,
    /// Struct tag (struct fields only)
    pub tag: Option<StringLit>,
    /// Embedded struct field; binds no names
    pub is_embed: bool,
    pub doc: Option<CommentGroupId>,
    /// Trailing line comment group
    pub comment: Option<CommentGroupId>,
}

/// Function body. Statements are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub l_brace: Span,
    pub r_brace: Span,
}

impl Block {
    #[inline]
    pub fn span(&self) -> Span {
        self.l_brace.to(self.r_brace)
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// `LiteralValue = "{" [ ElementList [ "," ] ] "}"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralValue {
    pub l_brace: Span,
    pub elements: ListRef<KeyedElement>,
    pub r_brace: Span,
}

/// `KeyedElement = [ Key ":" ] Element`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedElement {
    pub key: Option<Key>,
    pub value: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    FieldName { ident: Ident, ident_pos: Span },
    Expr(ExprId),
    Literal(LiteralValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Expr(ExprId),
    Literal(LiteralValue),
}

/// Bracket list item that may be an index expression or a type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprOrType {
    Expr(ExprId),
    Type(TypeId),
}

/// Call callee may be an expression or a type (conversion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallCallee {
    Expr(ExprId),
    Type(TypeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr {
    Ident(Ident, Span),

    BasicLit(BasicLit),

    /// `func(x int) int { return x }`
    FuncLit {
        func_pos: Span,
        sig: SignatureId,
        body: Block,
    },

    /// `T{...}`; the type is elided inside enclosing composite literals.
    CompositeLit {
        typ: Option<TypeId>,
        lit: LiteralValue,
    },

    /// `a[i]` or `F[T]`, disambiguated later.
    IndexOrInstantiate {
        base: ExprId,
        l_brack: Span,
        args: ListRef<ExprOrType>,
        r_brack: Span,
    },

    Paren {
        l_paren: Span,
        expr: ExprId,
        r_paren: Span,
    },

    /// `x.y`
    Selector {
        expr: ExprId,
        dot_pos: Span,
        ident: Ident,
        ident_pos: Span,
    },

    /// `a[lo:hi]` or `a[lo:hi:max]`
    Slice {
        expr: ExprId,
        l_brack: Span,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
        r_brack: Span,
    },

    /// `x.(T)`
    TypeAssert {
        expr: ExprId,
        dot_pos: Span,
        typ: Option<TypeId>,
        r_paren: Span,
    },

    /// `f(args...)` or `T(x)`; `make(T, n)` carries `type_arg`.
    Call {
        callee: CallCallee,
        l_paren: Span,
        type_arg: Option<TypeId>,
        args: ListRef<ExprId>,
        ellipsis: Option<Span>,
        r_paren: Span,
    },

    Unary {
        op: UnaryOp,
        op_pos: Span,
        expr: ExprId,
    },

    Binary {
        left: ExprId,
        op: BinaryOp,
        op_pos: Span,
        right: ExprId,
    },

    Bad(Span),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: BasicLitKind,
    pub raw: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BasicLitKind {
    Int,
    Float,
    Imag,
    Rune,
    String,
}

/// String literal, raw text (quotes included) recovered via span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLit {
    pub raw: Span,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// `pkg.Name` or `Name[T]`
    Named {
        pkg: Option<Ident>,
        pkg_pos: Option<Span>,
        name: Ident,
        name_pos: Span,
        args: ListRef<TypeId>,
    },

    /// `*T`
    Pointer { star_pos: Span, elem: TypeId },

    /// `[N]T`
    Array {
        l_brack: Span,
        len: ArrayLen,
        elem: TypeId,
    },

    /// `[]T`
    Slice { l_brack: Span, elem: TypeId },

    /// `map[K]V`
    Map {
        map_pos: Span,
        key: TypeId,
        val: TypeId,
    },

    /// `chan T`, `<-chan T` or `chan<- T`
    Chan {
        dir: ChanDir,
        chan_pos: Span,
        elem: TypeId,
    },

    /// `struct { ... }`
    Struct {
        struct_pos: Span,
        fields: ListRef<FieldId>,
        r_brace: Span,
    },

    /// `interface { ... }`
    Interface {
        interface_pos: Span,
        elems: ListRef<InterfaceElem>,
        r_brace: Span,
    },

    /// `func(...) ...`
    Func { func_pos: Span, sig: SignatureId },

    /// `(T)`
    Paren {
        l_paren: Span,
        typ: TypeId,
        r_paren: Span,
    },

    Bad(Span),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLen {
    /// `[10]int`
    Expr(ExprId),
    /// `[...]int`
    Ellipsis(Span),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Term of a union: `~T` or `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTerm {
    Tilde { tilde_pos: Span, typ: TypeId },
    Type { typ: TypeId },
}

impl TypeTerm {
    #[inline]
    pub fn typ(&self) -> TypeId {
        match *self {
            TypeTerm::Tilde { typ, .. } | TypeTerm::Type { typ } => typ,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceElem {
    /// `Method(...) ...`
    Method {
        doc: Option<CommentGroupId>,
        name: Ident,
        name_pos: Span,
        sig: SignatureId,
    },

    /// Embedded type (`io.Reader`) or union (`~int | string`)
    TypeElem(TypeElem),
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Add,
    Sub,
    Not,
    Xor,
    Deref,
    Addr,
    Recv,
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Add => "+",
            UnaryOp::Sub => "-",
            UnaryOp::Not => "!",
            UnaryOp::Xor => "^",
            UnaryOp::Deref => "*",
            UnaryOp::Addr => "&",
            UnaryOp::Recv => "<-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    LAnd,
    LOr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::AndNot => "&^",
            BinaryOp::LAnd => "&&",
            BinaryOp::LOr => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}
