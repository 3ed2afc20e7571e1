//! Canonical Go text for type and expression nodes.
//!
//! Types print on one line with gofmt spacing. Literal text and function
//! bodies are sliced from the source.

use go125_syntax::ast::*;

pub(crate) struct Renderer<'t> {
    tree: &'t SyntaxTree,
}

impl<'t> Renderer<'t> {
    pub(crate) fn new(tree: &'t SyntaxTree) -> Self {
        Self { tree }
    }

    #[inline]
    fn arena(&self) -> &'t AstArena {
        &self.tree.arena
    }

    #[inline]
    fn sym(&self, sym: Symbol) -> &'t str {
        self.tree.sym(sym)
    }

    pub(crate) fn type_(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id);
        out
    }

    pub(crate) fn expr(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, id);
        out
    }

    pub(crate) fn type_elem(&self, elem: &TypeElem) -> String {
        let mut out = String::new();
        self.write_type_elem(&mut out, elem);
        out
    }

    pub(crate) fn constraint(&self, c: &TypeConstraint) -> String {
        match c {
            TypeConstraint::Any { .. } => "any".to_string(),
            TypeConstraint::TypeElem(elem) => self.type_elem(elem),
            TypeConstraint::Interface(t) => self.type_(*t),
        }
    }

    /// Field type text, with the `...` prefix for variadic parameters.
    pub(crate) fn field_type(&self, field: &Field) -> String {
        let mut out = String::new();
        if field.ellipsis_pos.is_some() {
            out.push_str("...");
        }
        self.write_type(&mut out, field.typ);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId) {
        match self.arena().types[id] {
            Type::Named {
                pkg, name, args, ..
            } => {
                if let Some(pkg) = pkg {
                    out.push_str(self.sym(pkg));
                    out.push('.');
                }
                out.push_str(self.sym(name));
                let args = self.arena().types_list(args);
                if !args.is_empty() {
                    out.push('[');
                    self.write_joined(out, args, ", ", |r, o, &t| r.write_type(o, t));
                    out.push(']');
                }
            }
            Type::Pointer { elem, .. } => {
                out.push('*');
                self.write_type(out, elem);
            }
            Type::Array { len, elem, .. } => {
                out.push('[');
                match len {
                    ArrayLen::Expr(e) => self.write_expr(out, e),
                    ArrayLen::Ellipsis(_) => out.push_str("..."),
                }
                out.push(']');
                self.write_type(out, elem);
            }
            Type::Slice { elem, .. } => {
                out.push_str("[]");
                self.write_type(out, elem);
            }
            Type::Map { key, val, .. } => {
                out.push_str("map[");
                self.write_type(out, key);
                out.push(']');
                self.write_type(out, val);
            }
            Type::Chan { dir, elem, .. } => {
                out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.write_type(out, elem);
            }
            Type::Struct { fields, .. } => {
                out.push_str("struct{");
                let fields = self.arena().fields_list(fields);
                self.write_joined(out, fields, "; ", |r, o, &f| r.write_field(o, f, true));
                out.push('}');
            }
            Type::Interface { elems, .. } => {
                out.push_str("interface{");
                let elems = self.arena().interface_elems(elems);
                self.write_joined(out, elems, "; ", |r, o, elem| match elem {
                    InterfaceElem::Method { name, sig, .. } => {
                        o.push_str(r.sym(*name));
                        r.write_signature(o, *sig);
                    }
                    InterfaceElem::TypeElem(te) => r.write_type_elem(o, te),
                });
                out.push('}');
            }
            Type::Func { sig, .. } => {
                out.push_str("func");
                self.write_signature(out, sig);
            }
            Type::Paren { typ, .. } => {
                out.push('(');
                self.write_type(out, typ);
                out.push(')');
            }
            Type::Bad(_) => out.push_str("BadType"),
        }
    }

    fn write_type_elem(&self, out: &mut String, elem: &TypeElem) {
        let terms = self.arena().type_terms(elem.terms);
        self.write_joined(out, terms, " | ", |r, o, term| {
            if let TypeTerm::Tilde { .. } = term {
                o.push('~');
            }
            r.write_type(o, term.typ());
        });
    }

    fn write_field(&self, out: &mut String, id: FieldId, with_tag: bool) {
        let field = &self.arena().fields[id];
        let names = self.arena().ident_names(field.names);
        if !names.is_empty() {
            self.write_joined(out, names, ", ", |r, o, n| o.push_str(r.sym(n.sym)));
            out.push(' ');
        }
        if field.ellipsis_pos.is_some() {
            out.push_str("...");
        }
        self.write_type(out, field.typ);
        if let (true, Some(tag)) = (with_tag, field.tag) {
            out.push(' ');
            out.push_str(self.tree.text(tag.raw));
        }
    }

    fn write_field_list(&self, out: &mut String, list: &FieldList) {
        out.push('(');
        let fields = self.arena().fields_list(list.fields);
        self.write_joined(out, fields, ", ", |r, o, &f| r.write_field(o, f, false));
        out.push(')');
    }

    pub(crate) fn write_signature(&self, out: &mut String, id: SignatureId) {
        let sig = &self.arena().signatures[id];
        self.write_field_list(out, &sig.params);
        match &sig.results {
            None => {}
            Some(Results::Type(t)) => {
                out.push(' ');
                self.write_type(out, *t);
            }
            Some(Results::Params(list)) => {
                let fields = self.arena().fields_list(list.fields);
                match fields {
                    [] => {}
                    // single anonymous result prints without parentheses
                    [only] if self.arena().fields[*only].names.is_empty() => {
                        out.push(' ');
                        self.write_field(out, *only, false);
                    }
                    _ => {
                        out.push(' ');
                        self.write_field_list(out, list);
                    }
                }
            }
        }
    }

    fn write_expr(&self, out: &mut String, id: ExprId) {
        match self.arena().exprs[id] {
            Expr::Ident(sym, _) => out.push_str(self.sym(sym)),
            Expr::BasicLit(lit) => out.push_str(self.tree.text(lit.raw)),
            Expr::FuncLit { sig, body, .. } => {
                out.push_str("func");
                self.write_signature(out, sig);
                out.push(' ');
                out.push_str(self.tree.text(body.span()));
            }
            Expr::CompositeLit { typ, lit } => {
                if let Some(t) = typ {
                    self.write_type(out, t);
                }
                self.write_literal_value(out, &lit);
            }
            Expr::IndexOrInstantiate { base, args, .. } => {
                self.write_expr(out, base);
                out.push('[');
                let args = self.arena().expr_or_types(args);
                self.write_joined(out, args, ", ", |r, o, arg| match *arg {
                    ExprOrType::Expr(e) => r.write_expr(o, e),
                    ExprOrType::Type(t) => r.write_type(o, t),
                });
                out.push(']');
            }
            Expr::Paren { expr, .. } => {
                out.push('(');
                self.write_expr(out, expr);
                out.push(')');
            }
            Expr::Selector { expr, ident, .. } => {
                self.write_expr(out, expr);
                out.push('.');
                out.push_str(self.sym(ident));
            }
            Expr::Slice {
                expr, lo, hi, max, ..
            } => {
                self.write_expr(out, expr);
                out.push('[');
                if let Some(lo) = lo {
                    self.write_expr(out, lo);
                }
                out.push(':');
                if let Some(hi) = hi {
                    self.write_expr(out, hi);
                }
                if let Some(max) = max {
                    out.push(':');
                    self.write_expr(out, max);
                }
                out.push(']');
            }
            Expr::TypeAssert { expr, typ, .. } => {
                self.write_expr(out, expr);
                out.push_str(".(");
                match typ {
                    Some(t) => self.write_type(out, t),
                    None => out.push_str("type"),
                }
                out.push(')');
            }
            Expr::Call {
                callee,
                type_arg,
                args,
                ellipsis,
                ..
            } => {
                match callee {
                    CallCallee::Expr(e) => self.write_expr(out, e),
                    CallCallee::Type(t) => self.write_type(out, t),
                }
                out.push('(');
                let args = self.arena().exprs_list(args);
                if let Some(t) = type_arg {
                    self.write_type(out, t);
                    if !args.is_empty() {
                        out.push_str(", ");
                    }
                }
                self.write_joined(out, args, ", ", |r, o, &e| r.write_expr(o, e));
                if ellipsis.is_some() {
                    out.push_str("...");
                }
                out.push(')');
            }
            Expr::Unary { op, expr, .. } => {
                out.push_str(op.as_str());
                self.write_expr(out, expr);
            }
            Expr::Binary {
                left, op, right, ..
            } => {
                self.write_expr(out, left);
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                self.write_expr(out, right);
            }
            Expr::Bad(_) => out.push_str("BadExpr"),
        }
    }

    fn write_literal_value(&self, out: &mut String, lit: &LiteralValue) {
        out.push('{');
        let elems = self.arena().keyed_elems_list(lit.elements);
        self.write_joined(out, elems, ", ", |r, o, elem| {
            if let Some(key) = &elem.key {
                match key {
                    Key::FieldName { ident, .. } => o.push_str(r.sym(*ident)),
                    Key::Expr(e) => r.write_expr(o, *e),
                    Key::Literal(l) => r.write_literal_value(o, l),
                }
                o.push_str(": ");
            }
            match &elem.value {
                Element::Expr(e) => r.write_expr(o, *e),
                Element::Literal(l) => r.write_literal_value(o, l),
            }
        });
        out.push('}');
    }

    fn write_joined<T>(
        &self,
        out: &mut String,
        items: &[T],
        sep: &str,
        mut write: impl FnMut(&Self, &mut String, &T),
    ) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            write(self, out, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use go125_syntax::TreeBuilder;

    #[test]
    fn renders_composite_types() {
        let mut b = TreeBuilder::new("a.go", "p");
        let string = b.named("string");
        let int = b.named("int");
        let m = b.map(string, int);
        let sl = b.slice(m);
        let ch = b.chan(ChanDir::Recv, sl);
        let arr_elem = b.named("byte");
        let arr = b.array("16", arr_elem);
        let ell_elem = b.named("T");
        let ell = b.array("...", ell_elem);
        let reader = b.named("io.Reader");
        let ptr = b.pointer(reader);
        let tree = b.finish();
        let r = Renderer::new(&tree);

        assert_eq!(r.type_(ch), "<-chan []map[string]int");
        assert_eq!(r.type_(arr), "[16]byte");
        assert_eq!(r.type_(ell), "[...]T");
        assert_eq!(r.type_(ptr), "*io.Reader");
    }

    #[test]
    fn renders_func_types_like_gofmt() {
        let mut b = TreeBuilder::new("a.go", "p");
        let ctx = b.named("context.Context");
        let p_ctx = b.field(&["ctx"], ctx);
        let string = b.named("string");
        let p_args = b.variadic(&["args"], string);
        let int = b.named("int");
        let r_int = b.field(&[], int);
        let error = b.named("error");
        let r_err = b.field(&[], error);
        let sig = b.signature(&[p_ctx, p_args], &[r_int, r_err]);
        let f = b.func_type(sig);

        let int2 = b.named("int");
        let only = b.field(&[], int2);
        let single = b.signature(&[], &[only]);
        let g = b.func_type(single);
        let tree = b.finish();
        let r = Renderer::new(&tree);

        assert_eq!(
            r.type_(f),
            "func(ctx context.Context, args ...string) (int, error)"
        );
        assert_eq!(r.type_(g), "func() int");
    }

    #[test]
    fn renders_inline_struct_and_interface() {
        let mut b = TreeBuilder::new("a.go", "p");
        let int = b.named("int");
        let xy = b.field(&["X", "Y"], int);
        let string = b.named("string");
        let name = b.field(&["Name"], string);
        let name = b.tag(name, "`json:\"name\"`");
        let st = b.struct_type(&[xy, name]);
        let empty = b.interface_type(&[]);
        let tree = b.finish();
        let r = Renderer::new(&tree);

        assert_eq!(
            r.type_(st),
            "struct{X, Y int; Name string `json:\"name\"`}"
        );
        assert_eq!(r.type_(empty), "interface{}");
    }

    #[test]
    fn renders_initializer_expressions() {
        let mut b = TreeBuilder::new("a.go", "p");
        let one = b.int("1");
        let iota = b.ident_expr("iota");
        let shl = b.binary(one, BinaryOp::Shl, iota);

        let errors = b.ident_expr("errors");
        let new = b.selector(errors, "New");
        let msg = b.string("\"boom\"");
        let call = b.call(new, &[msg]);

        let int = b.named("int");
        let key = b.named("string");
        let m = b.map(key, int);
        let made = b.builtin("make", m, &[]);

        let point = b.named("Point");
        let x = b.int("1");
        let kx = b.keyed("X", x);
        let lit = b.composite(Some(point), &[kx]);
        let addr = b.unary(UnaryOp::Addr, lit);
        let tree = b.finish();
        let r = Renderer::new(&tree);

        assert_eq!(r.expr(shl), "1 << iota");
        assert_eq!(r.expr(call), "errors.New(\"boom\")");
        assert_eq!(r.expr(made), "make(map[string]int)");
        assert_eq!(r.expr(addr), "&Point{X: 1}");
    }

    #[test]
    fn renders_constraints() {
        let mut b = TreeBuilder::new("a.go", "p");
        let int = b.named("int");
        let tint = b.tilde(int);
        let string = b.named("string");
        let tstr = b.term(string);
        let c = b.union_constraint(&[tint, tstr]);
        let any = b.any_constraint();
        let tree = b.finish();
        let r = Renderer::new(&tree);

        assert_eq!(r.constraint(&c), "~int | string");
        assert_eq!(r.constraint(&any), "any");
    }
}
