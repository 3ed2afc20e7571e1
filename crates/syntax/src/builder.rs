//! Programmatic construction of [`SyntaxTree`]s.
//!
//! Loaders that obtain declarations from somewhere other than a Go parser, as well
//! as tests and benches, use `TreeBuilder` to allocate nodes. Every leaf that
//! carries text (identifiers, literals, comments, import paths, tags) is appended
//! to a synthesized source buffer so spans resolve to the right text.

use crate::ast::*;
use crate::error::Diag;

#[derive(Debug)]
pub struct TreeBuilder {
    path: String,
    source: String,
    arena: AstArena,
    interner: Interner,
    package: IdentName,
    package_pos: Span,
    decls: Vec<TopLevelDecl>,
    comment_groups: Vec<CommentGroupId>,
    doc: Option<CommentGroupId>,
    diags: Vec<Diag>,
}

impl TreeBuilder {
    pub fn new(path: impl Into<String>, package: &str) -> Self {
        let mut b = Self {
            path: path.into(),
            source: String::new(),
            arena: AstArena::new(),
            interner: Interner::new(),
            package: IdentName {
                sym: Symbol::from_raw(0),
                pos: Span::default(),
            },
            package_pos: Span::default(),
            decls: Vec::new(),
            comment_groups: Vec::new(),
            doc: None,
            diags: Vec::new(),
        };
        b.package_pos = b.push_text("package");
        b.package = b.ident(package);
        b
    }

    /// Appends `text` to the source and returns its span.
    fn push_text(&mut self, text: &str) -> Span {
        let start = self.source.len();
        self.source.push_str(text);
        let span = Span::new(start, self.source.len());
        self.source.push('\n');
        span
    }

    fn span_of_type(&self, id: TypeId) -> Span {
        self.arena.types.span(id)
    }

    fn span_of_expr(&self, id: ExprId) -> Span {
        self.arena.exprs.span(id)
    }

    pub fn ident(&mut self, name: &str) -> IdentName {
        let pos = self.push_text(name);
        IdentName {
            sym: self.interner.intern(name),
            pos,
        }
    }

    pub fn idents(&mut self, names: &[&str]) -> ListRef<IdentName> {
        let names: Vec<IdentName> = names.iter().map(|n| self.ident(n)).collect();
        self.arena.list_ident_names(names)
    }

    // -------------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------------

    /// Allocates a comment group and registers it in the file's comment list.
    pub fn comment_group(&mut self, lines: &[&str]) -> CommentGroupId {
        let ids: Vec<CommentId> = lines
            .iter()
            .map(|line| {
                let kind = if line.starts_with("/*") {
                    CommentKind::Block
                } else {
                    CommentKind::Line
                };
                let span = self.push_text(line);
                self.arena.comments.alloc(Comment { kind }, span)
            })
            .collect();
        let span = match (ids.first(), ids.last()) {
            (Some(&first), Some(&last)) => self
                .arena
                .comments
                .span(first)
                .to(self.arena.comments.span(last)),
            _ => Span::default(),
        };
        let comments = self.arena.list_comment_ids(ids);
        let id = self
            .arena
            .comment_groups
            .alloc(CommentGroup { comments }, span);
        self.comment_groups.push(id);
        id
    }

    fn opt_group(&mut self, lines: &[&str]) -> Option<CommentGroupId> {
        (!lines.is_empty()).then(|| self.comment_group(lines))
    }

    pub fn file_doc(&mut self, lines: &[&str]) -> &mut Self {
        self.doc = self.opt_group(lines);
        self
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    /// Named type; `"pkg.Name"` produces a qualified name.
    pub fn named(&mut self, name: &str) -> TypeId {
        self.instantiated(name, &[])
    }

    /// Named type with type arguments: `List[T]`.
    pub fn instantiated(&mut self, name: &str, args: &[TypeId]) -> TypeId {
        let (pkg, pkg_pos, name) = match name.split_once('.') {
            Some((pkg, rest)) => {
                let p = self.ident(pkg);
                (Some(p.sym), Some(p.pos), rest)
            }
            None => (None, None, name),
        };
        let n = self.ident(name);
        let mut span = pkg_pos.map_or(n.pos, |p| p.to(n.pos));
        if let Some(&last) = args.last() {
            span = span.to(self.span_of_type(last));
        }
        let args = self.arena.list_types(args.iter().copied());
        self.arena.types.alloc(
            Type::Named {
                pkg,
                pkg_pos,
                name: n.sym,
                name_pos: n.pos,
                args,
            },
            span,
        )
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        let star_pos = self.push_text("*");
        let span = star_pos.to(self.span_of_type(elem));
        self.arena.types.alloc(Type::Pointer { star_pos, elem }, span)
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        let l_brack = self.push_text("[]");
        let span = l_brack.to(self.span_of_type(elem));
        self.arena.types.alloc(Type::Slice { l_brack, elem }, span)
    }

    /// Array type; `len == "..."` yields an inferred-length array.
    pub fn array(&mut self, len: &str, elem: TypeId) -> TypeId {
        let l_brack = self.push_text("[");
        let len = if len == "..." {
            ArrayLen::Ellipsis(self.push_text("..."))
        } else {
            ArrayLen::Expr(self.int(len))
        };
        let span = l_brack.to(self.span_of_type(elem));
        self.arena.types.alloc(
            Type::Array {
                l_brack,
                len,
                elem,
            },
            span,
        )
    }

    pub fn map(&mut self, key: TypeId, val: TypeId) -> TypeId {
        let map_pos = self.push_text("map");
        let span = map_pos.to(self.span_of_type(val));
        self.arena
            .types
            .alloc(Type::Map { map_pos, key, val }, span)
    }

    pub fn chan(&mut self, dir: ChanDir, elem: TypeId) -> TypeId {
        let chan_pos = self.push_text("chan");
        let span = chan_pos.to(self.span_of_type(elem));
        self.arena.types.alloc(
            Type::Chan {
                dir,
                chan_pos,
                elem,
            },
            span,
        )
    }

    pub fn paren_type(&mut self, typ: TypeId) -> TypeId {
        let l_paren = self.push_text("(");
        let r_paren = self.push_text(")");
        self.arena.types.alloc(
            Type::Paren {
                l_paren,
                typ,
                r_paren,
            },
            l_paren.to(r_paren),
        )
    }

    pub fn func_type(&mut self, sig: SignatureId) -> TypeId {
        let func_pos = self.push_text("func");
        let span = func_pos.to(self.arena.signatures.span(sig));
        self.arena.types.alloc(Type::Func { func_pos, sig }, span)
    }

    pub fn struct_type(&mut self, fields: &[FieldId]) -> TypeId {
        let struct_pos = self.push_text("struct {");
        let fields = self.arena.list_fields(fields.iter().copied());
        let r_brace = self.push_text("}");
        self.arena.types.alloc(
            Type::Struct {
                struct_pos,
                fields,
                r_brace,
            },
            struct_pos.to(r_brace),
        )
    }

    pub fn interface_type(&mut self, elems: &[InterfaceElem]) -> TypeId {
        let interface_pos = self.push_text("interface {");
        let elems = self.arena.list_interface_elems(elems.iter().copied());
        let r_brace = self.push_text("}");
        self.arena.types.alloc(
            Type::Interface {
                interface_pos,
                elems,
                r_brace,
            },
            interface_pos.to(r_brace),
        )
    }

    pub fn bad_type(&mut self) -> TypeId {
        let span = self.push_text("<bad>");
        self.arena.types.alloc(Type::Bad(span), span)
    }

    // -------------------------------------------------------------------------
    // Interface elements and constraints
    // -------------------------------------------------------------------------

    pub fn method_elem(&mut self, name: &str, sig: SignatureId) -> InterfaceElem {
        let n = self.ident(name);
        InterfaceElem::Method {
            doc: None,
            name: n.sym,
            name_pos: n.pos,
            sig,
        }
    }

    pub fn documented_method_elem(
        &mut self,
        doc: &[&str],
        name: &str,
        sig: SignatureId,
    ) -> InterfaceElem {
        let doc = self.opt_group(doc);
        match self.method_elem(name, sig) {
            InterfaceElem::Method {
                name,
                name_pos,
                sig,
                ..
            } => InterfaceElem::Method {
                doc,
                name,
                name_pos,
                sig,
            },
            other => other,
        }
    }

    /// Embedded interface (`io.Reader`) or union (`~int | string`).
    pub fn embed_elem(&mut self, terms: &[TypeTerm]) -> InterfaceElem {
        let terms = self.arena.list_type_terms(terms.iter().copied());
        InterfaceElem::TypeElem(TypeElem { terms })
    }

    pub fn term(&self, typ: TypeId) -> TypeTerm {
        TypeTerm::Type { typ }
    }

    pub fn tilde(&mut self, typ: TypeId) -> TypeTerm {
        let tilde_pos = self.push_text("~");
        TypeTerm::Tilde { tilde_pos, typ }
    }

    pub fn any_constraint(&mut self) -> TypeConstraint {
        let any_pos = self.push_text("any");
        TypeConstraint::Any { any_pos }
    }

    pub fn union_constraint(&mut self, terms: &[TypeTerm]) -> TypeConstraint {
        let terms = self.arena.list_type_terms(terms.iter().copied());
        TypeConstraint::TypeElem(TypeElem { terms })
    }

    pub fn type_params(&mut self, decls: &[(&[&str], TypeConstraint)]) -> TypeParamsId {
        let l_brack = self.push_text("[");
        let ids: Vec<TypeParamDeclId> = decls
            .iter()
            .map(|(names, constraint)| {
                let names = self.idents(names);
                let span = self
                    .arena
                    .ident_names(names)
                    .first()
                    .map_or(l_brack, |n| n.pos);
                self.arena.type_param_decls.alloc(
                    TypeParamDecl {
                        names,
                        constraint: *constraint,
                    },
                    span,
                )
            })
            .collect();
        let params = self.arena.list_type_param_decl_ids(ids);
        let r_brack = self.push_text("]");
        self.arena.type_params.alloc(
            TypeParams {
                l_brack,
                params,
                r_brack,
            },
            l_brack.to(r_brack),
        )
    }

    // -------------------------------------------------------------------------
    // Fields and signatures
    // -------------------------------------------------------------------------

    fn alloc_field(&mut self, names: &[&str], ellipsis: bool, typ: TypeId, embed: bool) -> FieldId {
        let names = self.idents(names);
        let ellipsis_pos = ellipsis.then(|| self.push_text("..."));
        let span = self
            .arena
            .ident_names(names)
            .first()
            .map_or(self.span_of_type(typ), |n| n.pos.to(self.span_of_type(typ)));
        self.arena.fields.alloc(
            Field {
                names,
                ellipsis_pos,
                typ,
                tag: None,
                is_embed: embed,
                doc: None,
                comment: None,
            },
            span,
        )
    }

    /// Field naming zero or more identifiers; zero names is an unnamed parameter.
    pub fn field(&mut self, names: &[&str], typ: TypeId) -> FieldId {
        self.alloc_field(names, false, typ, false)
    }

    /// Embedded struct field.
    pub fn embedded(&mut self, typ: TypeId) -> FieldId {
        self.alloc_field(&[], false, typ, true)
    }

    /// `names ...typ`
    pub fn variadic(&mut self, names: &[&str], typ: TypeId) -> FieldId {
        self.alloc_field(names, true, typ, false)
    }

    /// Attaches a raw struct tag, backquotes included.
    pub fn tag(&mut self, field: FieldId, raw: &str) -> FieldId {
        let raw = self.push_text(raw);
        self.arena.fields[field].tag = Some(StringLit { raw });
        field
    }

    pub fn field_doc(&mut self, field: FieldId, lines: &[&str]) -> FieldId {
        self.arena.fields[field].doc = self.opt_group(lines);
        field
    }

    pub fn field_comment(&mut self, field: FieldId, lines: &[&str]) -> FieldId {
        self.arena.fields[field].comment = self.opt_group(lines);
        field
    }

    fn field_list(&mut self, fields: &[FieldId]) -> FieldList {
        let l_paren = self.push_text("(");
        let fields = self.arena.list_fields(fields.iter().copied());
        let r_paren = self.push_text(")");
        FieldList {
            l_paren,
            fields,
            r_paren,
        }
    }

    /// Signature with a parenthesized result list (omitted when empty).
    pub fn signature(&mut self, params: &[FieldId], results: &[FieldId]) -> SignatureId {
        let params = self.field_list(params);
        let results = (!results.is_empty()).then(|| Results::Params(self.field_list(results)));
        let span = match results {
            Some(Results::Params(r)) => params.l_paren.to(r.r_paren),
            _ => params.l_paren.to(params.r_paren),
        };
        self.arena
            .signatures
            .alloc(Signature { params, results }, span)
    }

    /// Signature with a single unparenthesized result type.
    pub fn signature_returning(&mut self, params: &[FieldId], result: TypeId) -> SignatureId {
        let params = self.field_list(params);
        let span = params.l_paren.to(self.span_of_type(result));
        self.arena.signatures.alloc(
            Signature {
                params,
                results: Some(Results::Type(result)),
            },
            span,
        )
    }

    // -------------------------------------------------------------------------
    // Expressions
    // -------------------------------------------------------------------------

    pub fn ident_expr(&mut self, name: &str) -> ExprId {
        let n = self.ident(name);
        self.arena.exprs.alloc(Expr::Ident(n.sym, n.pos), n.pos)
    }

    pub fn lit(&mut self, kind: BasicLitKind, raw: &str) -> ExprId {
        let raw = self.push_text(raw);
        self.arena
            .exprs
            .alloc(Expr::BasicLit(BasicLit { kind, raw }), raw)
    }

    pub fn int(&mut self, raw: &str) -> ExprId {
        self.lit(BasicLitKind::Int, raw)
    }

    /// String literal; `raw` includes its quotes.
    pub fn string(&mut self, raw: &str) -> ExprId {
        self.lit(BasicLitKind::String, raw)
    }

    pub fn selector(&mut self, expr: ExprId, name: &str) -> ExprId {
        let dot_pos = self.push_text(".");
        let n = self.ident(name);
        let span = self.span_of_expr(expr).to(n.pos);
        self.arena.exprs.alloc(
            Expr::Selector {
                expr,
                dot_pos,
                ident: n.sym,
                ident_pos: n.pos,
            },
            span,
        )
    }

    fn alloc_call(
        &mut self,
        callee: CallCallee,
        type_arg: Option<TypeId>,
        args: &[ExprId],
        spread: bool,
    ) -> ExprId {
        let l_paren = self.push_text("(");
        let args = self.arena.list_exprs(args.iter().copied());
        let ellipsis = spread.then(|| self.push_text("..."));
        let r_paren = self.push_text(")");
        let start = match callee {
            CallCallee::Expr(e) => self.span_of_expr(e),
            CallCallee::Type(t) => self.span_of_type(t),
        };
        self.arena.exprs.alloc(
            Expr::Call {
                callee,
                l_paren,
                type_arg,
                args,
                ellipsis,
                r_paren,
            },
            start.to(r_paren),
        )
    }

    pub fn call(&mut self, callee: ExprId, args: &[ExprId]) -> ExprId {
        self.alloc_call(CallCallee::Expr(callee), None, args, false)
    }

    /// `f(args...)`
    pub fn call_spread(&mut self, callee: ExprId, args: &[ExprId]) -> ExprId {
        self.alloc_call(CallCallee::Expr(callee), None, args, true)
    }

    /// Conversion `T(x)` where `T` is not a plain identifier.
    pub fn conversion(&mut self, typ: TypeId, arg: ExprId) -> ExprId {
        self.alloc_call(CallCallee::Type(typ), None, &[arg], false)
    }

    /// Builtin call with a leading type argument: `make(T, n)`, `new(T)`.
    pub fn builtin(&mut self, name: &str, typ: TypeId, args: &[ExprId]) -> ExprId {
        let callee = self.ident_expr(name);
        self.alloc_call(CallCallee::Expr(callee), Some(typ), args, false)
    }

    pub fn unary(&mut self, op: UnaryOp, expr: ExprId) -> ExprId {
        let op_pos = self.push_text(op.as_str());
        let span = op_pos.to(self.span_of_expr(expr));
        self.arena
            .exprs
            .alloc(Expr::Unary { op, op_pos, expr }, span)
    }

    pub fn binary(&mut self, left: ExprId, op: BinaryOp, right: ExprId) -> ExprId {
        let op_pos = self.push_text(op.as_str());
        let span = self.span_of_expr(left).to(self.span_of_expr(right));
        self.arena.exprs.alloc(
            Expr::Binary {
                left,
                op,
                op_pos,
                right,
            },
            span,
        )
    }

    pub fn paren(&mut self, expr: ExprId) -> ExprId {
        let l_paren = self.push_text("(");
        let r_paren = self.push_text(")");
        self.arena.exprs.alloc(
            Expr::Paren {
                l_paren,
                expr,
                r_paren,
            },
            l_paren.to(r_paren),
        )
    }

    pub fn index(&mut self, base: ExprId, args: &[ExprOrType]) -> ExprId {
        let l_brack = self.push_text("[");
        let args = self.arena.list_expr_or_types(args.iter().copied());
        let r_brack = self.push_text("]");
        let span = self.span_of_expr(base).to(r_brack);
        self.arena.exprs.alloc(
            Expr::IndexOrInstantiate {
                base,
                l_brack,
                args,
                r_brack,
            },
            span,
        )
    }

    pub fn slice_expr(
        &mut self,
        expr: ExprId,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
    ) -> ExprId {
        let l_brack = self.push_text("[");
        let r_brack = self.push_text("]");
        let span = self.span_of_expr(expr).to(r_brack);
        self.arena.exprs.alloc(
            Expr::Slice {
                expr,
                l_brack,
                lo,
                hi,
                max,
                r_brack,
            },
            span,
        )
    }

    pub fn type_assert(&mut self, expr: ExprId, typ: TypeId) -> ExprId {
        let dot_pos = self.push_text(".(");
        let r_paren = self.push_text(")");
        let span = self.span_of_expr(expr).to(r_paren);
        self.arena.exprs.alloc(
            Expr::TypeAssert {
                expr,
                dot_pos,
                typ: Some(typ),
                r_paren,
            },
            span,
        )
    }

    pub fn keyed(&mut self, field: &str, value: ExprId) -> KeyedElement {
        let n = self.ident(field);
        KeyedElement {
            key: Some(Key::FieldName {
                ident: n.sym,
                ident_pos: n.pos,
            }),
            value: Element::Expr(value),
        }
    }

    pub fn keyed_expr(&self, key: ExprId, value: ExprId) -> KeyedElement {
        KeyedElement {
            key: Some(Key::Expr(key)),
            value: Element::Expr(value),
        }
    }

    pub fn element(&self, value: ExprId) -> KeyedElement {
        KeyedElement {
            key: None,
            value: Element::Expr(value),
        }
    }

    pub fn literal_value(&mut self, elems: &[KeyedElement]) -> LiteralValue {
        let l_brace = self.push_text("{");
        let elements = self.arena.list_keyed_elems(elems.iter().copied());
        let r_brace = self.push_text("}");
        LiteralValue {
            l_brace,
            elements,
            r_brace,
        }
    }

    pub fn composite(&mut self, typ: Option<TypeId>, elems: &[KeyedElement]) -> ExprId {
        let lit = self.literal_value(elems);
        let start = typ.map_or(lit.l_brace, |t| self.span_of_type(t));
        self.arena
            .exprs
            .alloc(Expr::CompositeLit { typ, lit }, start.to(lit.r_brace))
    }

    /// Function literal whose body text is `body` (braces included).
    pub fn func_lit(&mut self, sig: SignatureId, body: &str) -> ExprId {
        let func_pos = self.push_text("func");
        let body_span = self.push_text(body);
        let block = Block {
            l_brace: Span::new(body_span.start as usize, body_span.start as usize + 1),
            r_brace: Span::new(body_span.end as usize - 1, body_span.end as usize),
        };
        self.arena.exprs.alloc(
            Expr::FuncLit {
                func_pos,
                sig,
                body: block,
            },
            func_pos.to(body_span),
        )
    }

    pub fn bad_expr(&mut self) -> ExprId {
        let span = self.push_text("<bad>");
        self.arena.exprs.alloc(Expr::Bad(span), span)
    }

    // -------------------------------------------------------------------------
    // Specs and declarations
    // -------------------------------------------------------------------------

    /// Import spec; `alias` may be a name, `"."` or `"_"`. `path` is unquoted.
    pub fn import_spec(&mut self, alias: Option<&str>, path: &str) -> Spec {
        let name = alias.map(|a| {
            let span = self.push_text(a);
            match a {
                "." => ImportName::Dot(span),
                "_" => ImportName::Blank(span),
                _ => ImportName::Name(self.interner.intern(a), span),
            }
        });
        let raw = self.push_text(&format!("\"{path}\""));
        Spec::Import(ImportSpec {
            doc: None,
            name,
            path: StringLit { raw },
            comment: None,
        })
    }

    pub fn value_spec(&mut self, names: &[&str], typ: Option<TypeId>, values: &[ExprId]) -> Spec {
        let names = self.idents(names);
        let values = self.arena.list_exprs(values.iter().copied());
        Spec::Value(ValueSpec {
            doc: None,
            names,
            typ,
            values,
        })
    }

    fn alloc_type_spec(
        &mut self,
        name: &str,
        type_params: Option<TypeParamsId>,
        typ: TypeId,
        alias: bool,
    ) -> Spec {
        let n = self.ident(name);
        let assign_pos = alias.then(|| self.push_text("="));
        Spec::Type(TypeSpec {
            doc: None,
            name: n.sym,
            name_pos: n.pos,
            type_params,
            assign_pos,
            typ,
            alias,
        })
    }

    /// `type name typ`
    pub fn type_spec(&mut self, name: &str, typ: TypeId) -> Spec {
        self.alloc_type_spec(name, None, typ, false)
    }

    /// `type name = typ`
    pub fn alias_spec(&mut self, name: &str, typ: TypeId) -> Spec {
        self.alloc_type_spec(name, None, typ, true)
    }

    /// `type name[params] typ`
    pub fn generic_type_spec(&mut self, name: &str, params: TypeParamsId, typ: TypeId) -> Spec {
        self.alloc_type_spec(name, Some(params), typ, false)
    }

    /// Attaches a doc comment group to a spec.
    pub fn with_doc(&mut self, spec: Spec, lines: &[&str]) -> Spec {
        let doc = self.opt_group(lines);
        match spec {
            Spec::Import(s) => Spec::Import(ImportSpec { doc, ..s }),
            Spec::Value(s) => Spec::Value(ValueSpec { doc, ..s }),
            Spec::Type(s) => Spec::Type(TypeSpec { doc, ..s }),
        }
    }

    /// Attaches a trailing line comment to an import spec.
    pub fn with_comment(&mut self, spec: Spec, lines: &[&str]) -> Spec {
        let comment = self.opt_group(lines);
        match spec {
            Spec::Import(s) => Spec::Import(ImportSpec { comment, ..s }),
            other => other,
        }
    }

    fn alloc_gen_decl(&mut self, kind: GenDeclKind, specs: &[Spec], grouped: bool) -> DeclId {
        let kw_pos = self.push_text(kind.keyword());
        let l_paren = grouped.then(|| self.push_text("("));
        let specs = self.arena.list_specs(specs.iter().copied());
        let r_paren = grouped.then(|| self.push_text(")"));
        let span = r_paren.map_or(kw_pos, |r| kw_pos.to(r));
        let id = self.arena.decls.alloc(
            Decl::Gen(GenDecl {
                doc: None,
                kw_pos,
                kind,
                l_paren,
                specs,
                r_paren,
            }),
            span,
        );
        self.decls.push(TopLevelDecl::Decl(id));
        id
    }

    /// Ungrouped declaration: `const X = 1`.
    pub fn decl(&mut self, kind: GenDeclKind, spec: Spec) -> DeclId {
        self.alloc_gen_decl(kind, &[spec], false)
    }

    /// Parenthesized declaration group: `const ( ... )`.
    pub fn group(&mut self, kind: GenDeclKind, specs: &[Spec]) -> DeclId {
        self.alloc_gen_decl(kind, specs, true)
    }

    pub fn decl_doc(&mut self, id: DeclId, lines: &[&str]) -> DeclId {
        let doc = self.opt_group(lines);
        if let Decl::Gen(g) = &mut self.arena.decls[id] {
            g.doc = doc;
        }
        id
    }

    pub fn bad_decl(&mut self) -> DeclId {
        let span = self.push_text("<bad>");
        let id = self.arena.decls.alloc(Decl::Bad, span);
        self.decls.push(TopLevelDecl::Decl(id));
        id
    }

    pub fn receiver(&mut self, name: Option<&str>, typ: TypeId) -> Receiver {
        let l_paren = self.push_text("(");
        let name = name.map(|n| self.ident(n));
        let r_paren = self.push_text(")");
        Receiver {
            l_paren,
            name,
            typ,
            type_params: None,
            r_paren,
        }
    }

    /// Receiver binding type parameter names: `(l *List[T])`.
    pub fn generic_receiver(&mut self, name: Option<&str>, typ: TypeId, params: &[&str]) -> Receiver {
        let mut recv = self.receiver(name, typ);
        let l_brack = self.push_text("[");
        let names = self.idents(params);
        let r_brack = self.push_text("]");
        recv.type_params = Some(ReceiverTypeParams {
            l_brack,
            names,
            r_brack,
        });
        recv
    }

    fn alloc_func(
        &mut self,
        recv: Option<Receiver>,
        name: &str,
        func_type_params: Option<TypeParamsId>,
        signature: SignatureId,
    ) -> FuncDeclId {
        let func_pos = self.push_text("func");
        let n = self.ident(name);
        let l_brace = self.push_text("{");
        let r_brace = self.push_text("}");
        let id = self.arena.funcs.alloc(
            FuncDecl {
                doc: None,
                func_pos,
                recv,
                name: n.sym,
                name_pos: n.pos,
                func_type_params,
                signature,
                body: Some(Block { l_brace, r_brace }),
            },
            func_pos.to(r_brace),
        );
        self.decls.push(TopLevelDecl::Func(id));
        id
    }

    pub fn func(&mut self, name: &str, sig: SignatureId) -> FuncDeclId {
        self.alloc_func(None, name, None, sig)
    }

    pub fn generic_func(&mut self, name: &str, params: TypeParamsId, sig: SignatureId) -> FuncDeclId {
        self.alloc_func(None, name, Some(params), sig)
    }

    pub fn method(&mut self, recv: Receiver, name: &str, sig: SignatureId) -> FuncDeclId {
        self.alloc_func(Some(recv), name, None, sig)
    }

    pub fn func_doc(&mut self, id: FuncDeclId, lines: &[&str]) -> FuncDeclId {
        self.arena.funcs[id].doc = self.opt_group(lines);
        id
    }

    /// Records a parser diagnostic on the tree being built.
    pub fn diag(&mut self, diag: Diag) -> &mut Self {
        self.diags.push(diag);
        self
    }

    /// Read access to the arena while building (renderers, assertions).
    pub fn arena(&self) -> &AstArena {
        &self.arena
    }

    pub fn finish(mut self) -> SyntaxTree {
        let decls = self.arena.list_top_decls(self.decls);
        let comments = self.arena.list_comment_group_ids(self.comment_groups);
        let root = SourceFile {
            package_pos: self.package_pos,
            name: self.package.sym,
            decls,
            comments,
            doc: self.doc,
        };
        SyntaxTree {
            path: self.path,
            source: self.source,
            arena: self.arena,
            interner: self.interner,
            root,
            diags: self.diags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_point_at_synthesized_text() {
        let mut b = TreeBuilder::new("a.go", "shapes");
        let int = b.named("int");
        let spec = b.type_spec("Meters", int);
        b.decl(GenDeclKind::Type, spec);
        let doc = b.comment_group(&["// Package shapes.", "// More."]);
        let tree = b.finish();

        assert_eq!(tree.package_name(), "shapes");
        assert_eq!(tree.text(tree.arena.types.span(int)), "int");
        assert_eq!(tree.comment_lines(doc), vec!["// Package shapes.", "// More."]);
        assert_eq!(tree.arena.top_decls(tree.root.decls).len(), 1);
        assert_eq!(tree.arena.comment_group_ids(tree.root.comments).len(), 1);
    }

    #[test]
    fn qualified_named_types_split_package() {
        let mut b = TreeBuilder::new("a.go", "p");
        let t = b.named("io.Reader");
        let tree = b.finish();
        match tree.arena.types[t] {
            Type::Named {
                pkg: Some(pkg),
                name,
                ..
            } => {
                assert_eq!(tree.sym(pkg), "io");
                assert_eq!(tree.sym(name), "Reader");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn grouped_decls_record_parens() {
        let mut b = TreeBuilder::new("a.go", "p");
        let one = b.int("1");
        let s = b.value_spec(&["A"], None, &[one]);
        let grouped = b.group(GenDeclKind::Const, &[s]);
        let single = b.decl(GenDeclKind::Const, s);
        let tree = b.finish();
        let is_grouped = |id| match tree.arena.decls[id] {
            Decl::Gen(g) => g.is_grouped(),
            Decl::Bad => false,
        };
        assert!(is_grouped(grouped));
        assert!(!is_grouped(single));
    }
}
