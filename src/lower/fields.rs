//! Field-list flattening shared by structs, signatures, type parameter lists,
//! receivers and interface bodies.

use go125_syntax::ast::{self, FieldId, InterfaceElem, Receiver, SignatureId, Type, TypeId};
use smallvec::SmallVec;
use tracing::trace;

use super::FileLowerer;
use crate::error::LowerIssue;
use crate::model::{DeclHeader, Field, Func, Method};
use crate::store::OrderedMap;

/// Where a field list comes from; decides how entries without a bound name are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldListKind {
    /// Unnamed entries are embedded fields, keyed by their type text.
    Struct,
    /// Unnamed entries are keyed `type#index` so repeated types do not collide.
    Params,
}

impl FieldListKind {
    const fn context(self) -> &'static str {
        match self {
            FieldListKind::Struct => "struct field list",
            FieldListKind::Params => "parameter list",
        }
    }
}

fn positional_key(typ: &str, index: usize) -> String {
    format!("{typ}#{index}")
}

impl FileLowerer<'_> {
    /// Expands each field entry into one `Field` per bound identifier.
    pub(crate) fn flatten_fields(&mut self, ids: &[FieldId], kind: FieldListKind) -> OrderedMap<Field> {
        let tree = self.tree;
        let mut out = OrderedMap::new();
        let mut index = 0usize;

        for &id in ids {
            let node = tree.arena.fields[id];
            let typ = self.render.field_type(&node);
            let tag = node.tag.map(|t| tree.text(t.raw).to_string());
            let doc = self.comment_lines(node.doc);
            let comment = self.comment_lines(node.comment);
            let variadic = node.ellipsis_pos.is_some();

            let names: SmallVec<[&str; 4]> = tree
                .arena
                .ident_names(node.names)
                .iter()
                .map(|n| tree.sym(n.sym))
                .collect();

            // embedding only happens in structs, and an embedded entry binds no name
            let well_formed = match kind {
                FieldListKind::Struct => node.is_embed == names.is_empty(),
                FieldListKind::Params => !node.is_embed,
            };
            if !well_formed {
                let found = if node.is_embed {
                    "embedded field"
                } else {
                    "unnamed field"
                };
                self.issue(LowerIssue::UnexpectedNode {
                    context: kind.context(),
                    found,
                });
                continue;
            }

            if names.is_empty() {
                let key = match kind {
                    FieldListKind::Struct => typ.clone(),
                    FieldListKind::Params => positional_key(&typ, index),
                };
                let field = Field {
                    name: String::new(),
                    typ,
                    tag,
                    unnamed: true,
                    pointer: false,
                    variadic,
                    doc,
                    comment,
                };
                self.insert_field(&mut out, key, field, kind);
                index += 1;
                continue;
            }

            for name in names {
                // blank identifiers may repeat
                let key = if name == "_" {
                    positional_key(name, index)
                } else {
                    name.to_string()
                };
                let field = Field {
                    name: name.to_string(),
                    typ: typ.clone(),
                    tag: tag.clone(),
                    unnamed: false,
                    pointer: false,
                    variadic,
                    doc: doc.clone(),
                    comment: comment.clone(),
                };
                self.insert_field(&mut out, key, field, kind);
                index += 1;
            }
        }
        out
    }

    fn insert_field(&mut self, out: &mut OrderedMap<Field>, key: String, field: Field, kind: FieldListKind) {
        if let Err(dup) = out.insert_new(key, field) {
            trace!(field = dup.name(), context = kind.context(), "duplicate field skipped");
            let name = if dup.name.is_empty() { dup.typ } else { dup.name };
            self.issue(LowerIssue::Redeclared { name });
        }
    }

    /// Type parameters as fields whose type is the constraint text.
    pub(crate) fn flatten_type_params(&mut self, params: Option<ast::TypeParamsId>) -> OrderedMap<Field> {
        let tree = self.tree;
        let mut out = OrderedMap::new();
        let Some(params) = params else {
            return out;
        };
        let list = tree.arena.type_params[params].params;
        for &decl_id in tree.arena.type_param_decl_ids(list) {
            let decl = tree.arena.type_param_decls[decl_id];
            let constraint = self.render.constraint(&decl.constraint);
            for n in tree.arena.ident_names(decl.names) {
                let name = tree.sym(n.sym).to_string();
                let field = Field {
                    name: name.clone(),
                    typ: constraint.clone(),
                    ..Field::default()
                };
                self.insert_field(&mut out, name, field, FieldListKind::Params);
            }
        }
        out
    }

    /// Parameters and results of a signature.
    pub(crate) fn flatten_signature(&mut self, sig: SignatureId) -> (OrderedMap<Field>, OrderedMap<Field>) {
        let tree = self.tree;
        let sig = tree.arena.signatures[sig];
        let params = tree.arena.fields_list(sig.params.fields);
        let params = self.flatten_fields(params, FieldListKind::Params);

        let results = match sig.results {
            None => OrderedMap::new(),
            Some(ast::Results::Params(list)) => {
                let ids = tree.arena.fields_list(list.fields);
                self.flatten_fields(ids, FieldListKind::Params)
            }
            Some(ast::Results::Type(t)) => {
                let typ = self.render.type_(t);
                let mut out = OrderedMap::new();
                let field = Field {
                    typ: typ.clone(),
                    unnamed: true,
                    ..Field::default()
                };
                self.insert_field(&mut out, positional_key(&typ, 0), field, FieldListKind::Params);
                out
            }
        };
        (params, results)
    }

    /// Receiver field (bare type, pointer flag) and the names its type parameter list binds.
    pub(crate) fn lower_receiver(&mut self, recv: &Receiver) -> (Field, OrderedMap<Field>) {
        let tree = self.tree;
        let mut typ = self.strip_parens(recv.typ);
        let mut pointer = false;
        if let Type::Pointer { elem, .. } = tree.arena.types[typ] {
            pointer = true;
            typ = self.strip_parens(elem);
        }

        let mut bound: SmallVec<[String; 2]> = SmallVec::new();
        let bare = match tree.arena.types[typ] {
            Type::Named {
                pkg: None,
                name,
                args,
                ..
            } => {
                // `(l *List[T])` written with the arguments on the named type
                for &arg in tree.arena.types_list(args) {
                    bound.push(self.render.type_(arg));
                }
                tree.sym(name).to_string()
            }
            _ => {
                self.issue(LowerIssue::UnexpectedNode {
                    context: "method receiver",
                    found: "non-identifier receiver type",
                });
                self.render.type_(typ)
            }
        };

        if let Some(tp) = recv.type_params {
            bound.extend(
                tree
                    .arena
                    .ident_names(tp.names)
                    .iter()
                    .map(|n| tree.sym(n.sym).to_string()),
            );
        }

        let mut type_params = OrderedMap::new();
        for name in bound {
            let field = Field {
                name: name.clone(),
                ..Field::default()
            };
            self.insert_field(&mut type_params, name, field, FieldListKind::Params);
        }

        let field = Field {
            name: recv
                .name
                .map(|n| tree.sym(n.sym).to_string())
                .unwrap_or_default(),
            typ: bare,
            pointer,
            ..Field::default()
        };
        (field, type_params)
    }

    fn strip_parens(&self, mut typ: TypeId) -> TypeId {
        let tree = self.tree;
        while let Type::Paren { typ: inner, .. } = tree.arena.types[typ] {
            typ = inner;
        }
        typ
    }

    /// Splits an interface body into named methods and embedded elements.
    pub(crate) fn lower_interface_elems(
        &mut self,
        elems: &[InterfaceElem],
    ) -> (OrderedMap<Method>, OrderedMap<Field>) {
        let tree = self.tree;
        let mut methods = OrderedMap::new();
        let mut embeds = OrderedMap::new();

        for elem in elems {
            match *elem {
                InterfaceElem::Method { doc, name, sig, .. } => {
                    let (params, results) = self.flatten_signature(sig);
                    let name = tree.sym(name).to_string();
                    let method = Method {
                        func: Func {
                            header: DeclHeader {
                                name: name.clone(),
                                file: self.file.id,
                                doc: self.comment_lines(doc),
                            },
                            type_params: OrderedMap::new(),
                            params,
                            results,
                        },
                        receiver: None,
                        receiver_type_params: OrderedMap::new(),
                    };
                    if methods.insert_new(name.clone(), method).is_err() {
                        self.issue(LowerIssue::Redeclared { name });
                    }
                }
                InterfaceElem::TypeElem(te) => {
                    let typ = self.render.type_elem(&te);
                    let field = Field {
                        typ: typ.clone(),
                        unnamed: true,
                        ..Field::default()
                    };
                    if embeds.insert_new(typ.clone(), field).is_err() {
                        self.issue(LowerIssue::Redeclared { name: typ });
                    }
                }
            }
        }
        (methods, embeds)
    }
}
