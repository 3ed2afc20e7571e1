//! Tree lowering: one [`SyntaxTree`] in, one [`File`] of the IR out.
//!
//! Every top-level declaration is visited once in source order. Shapes the
//! lowering does not understand are skipped and recorded as [`LowerIssue`]s on
//! the file; lowering itself never fails.

pub(crate) mod fields;
pub(crate) mod render;

use std::collections::HashMap;

use go125_syntax::ast::{
    CommentGroupId, Decl as SyntaxDecl, FuncDeclId, GenDecl, GenDeclKind, ImportName, ImportSpec,
    Spec, SyntaxTree, TopLevelDecl, Type as SyntaxType, TypeSpec, ValueSpec,
};
use tracing::{debug, debug_span, trace, warn};

use self::fields::FieldListKind;
use self::render::Renderer;
use crate::config::{Config, Redeclaration};
use crate::error::LowerIssue;
use crate::model::{
    Const, Decl, DeclHeader, File, FileId, Func, Import, Interface, Method, Struct, Type, Var,
};
use crate::store::OrderedMap;

pub(crate) struct FileLowerer<'t> {
    tree: &'t SyntaxTree,
    config: &'t Config,
    render: Renderer<'t>,
    file: File,
    /// Occurrences seen so far of names that may legally repeat (`_`, `init`).
    repeats: HashMap<String, usize>,
}

/// Lowers `tree` into a fresh [`File`] with the given id.
pub(crate) fn lower_file(tree: &SyntaxTree, id: FileId, expected_package: &str, config: &Config) -> File {
    let span = debug_span!("lower_file", path = %tree.path);
    let _guard = span.enter();

    let mut lowerer = FileLowerer {
        tree,
        config,
        render: Renderer::new(tree),
        file: File::new(id, tree.path.clone()),
        repeats: HashMap::new(),
    };
    lowerer.run(expected_package);

    debug!(
        imports = lowerer.file.imports.len(),
        decls = lowerer.file.decls.len(),
        issues = lowerer.file.issues.len(),
        "file lowered"
    );
    lowerer.file
}

impl<'t> FileLowerer<'t> {
    fn run(&mut self, expected_package: &str) {
        let tree = self.tree;

        let found = tree.package_name();
        if found != expected_package {
            self.issue(LowerIssue::PackageMismatch {
                expected: expected_package.to_string(),
                found: found.to_string(),
            });
        }

        self.file.doc = self.comment_lines(tree.root.doc);
        self.file.comments = tree
            .arena
            .comment_group_ids(tree.root.comments)
            .iter()
            .map(|&g| tree.comment_lines(g))
            .collect();

        for top in tree.arena.top_decls(tree.root.decls) {
            match *top {
                TopLevelDecl::Decl(id) => match tree.arena.decls[id] {
                    SyntaxDecl::Gen(gd) => self.lower_gen_decl(&gd),
                    SyntaxDecl::Bad => self.issue(LowerIssue::UnexpectedNode {
                        context: "top-level declaration",
                        found: "bad declaration",
                    }),
                },
                TopLevelDecl::Func(id) => self.lower_func(id),
            }
        }
    }

    pub(crate) fn comment_lines(&self, group: Option<CommentGroupId>) -> Vec<String> {
        group.map(|g| self.tree.comment_lines(g)).unwrap_or_default()
    }

    pub(crate) fn issue(&mut self, issue: LowerIssue) {
        warn!(file = %self.file.path, %issue, "skipped during lowering");
        self.file.issues.push(issue);
    }

    fn header(&self, name: String, doc: Vec<String>) -> DeclHeader {
        DeclHeader {
            name,
            file: self.file.id,
            doc,
        }
    }

    /// Spec doc, falling back to the declaration doc when the spec stands alone.
    fn spec_doc(&self, gd: &GenDecl, spec_doc: Option<CommentGroupId>) -> Vec<String> {
        let doc = spec_doc.or(if gd.is_grouped() { None } else { gd.doc });
        self.comment_lines(doc)
    }

    // -------------------------------------------------------------------------
    // General declarations
    // -------------------------------------------------------------------------

    fn lower_gen_decl(&mut self, gd: &GenDecl) {
        let tree = self.tree;
        let specs = tree.arena.specs_list(gd.specs);
        trace!(kind = gd.kind.keyword(), specs = specs.len(), "general declaration");

        match gd.kind {
            GenDeclKind::Import => {
                for spec in specs {
                    match spec {
                        Spec::Import(s) => self.lower_import(gd, s),
                        _ => self.unexpected_spec("import declaration"),
                    }
                }
            }
            GenDeclKind::Const | GenDeclKind::Var => self.lower_value_group(gd, specs),
            GenDeclKind::Type => {
                for spec in specs {
                    match spec {
                        Spec::Type(s) => self.lower_type_spec(gd, s),
                        _ => self.unexpected_spec("type declaration"),
                    }
                }
            }
        }
    }

    fn unexpected_spec(&mut self, context: &'static str) {
        self.issue(LowerIssue::UnexpectedNode {
            context,
            found: "mismatched spec",
        });
    }

    fn lower_import(&mut self, gd: &GenDecl, spec: &ImportSpec) {
        let tree = self.tree;
        let name = match spec.name {
            None => String::new(),
            Some(ImportName::Dot(_)) => ".".to_string(),
            Some(ImportName::Blank(_)) => "_".to_string(),
            Some(ImportName::Name(sym, _)) => tree.sym(sym).to_string(),
        };
        let path = unquote(tree.text(spec.path.raw)).to_string();
        let import = Import {
            name,
            path: path.clone(),
            doc: self.spec_doc(gd, spec.doc),
            comment: self.comment_lines(spec.comment),
        };
        if self.file.imports.insert_new(path.clone(), import).is_err() {
            self.issue(LowerIssue::Redeclared { name: path });
        }
    }

    /// `const`/`var` specs of one declaration. A spec without a type inherits
    /// the last explicit type seen in the same declaration.
    fn lower_value_group(&mut self, gd: &GenDecl, specs: &[Spec]) {
        let mut carried = String::new();
        for spec in specs {
            let Spec::Value(spec) = spec else {
                self.unexpected_spec("value declaration");
                continue;
            };
            if let Some(t) = spec.typ {
                carried = self.render.type_(t);
            }
            let typ = carried.clone();
            self.lower_value_spec(gd, spec, typ);
        }
    }

    fn lower_value_spec(&mut self, gd: &GenDecl, spec: &ValueSpec, typ: String) {
        let tree = self.tree;
        let names = tree.arena.ident_names(spec.names);
        let values: Vec<String> = tree
            .arena
            .exprs_list(spec.values)
            .iter()
            .map(|&e| self.render.expr(e))
            .collect();

        if values.len() > 1 && values.len() != names.len() {
            self.issue(LowerIssue::ValueCount {
                name: names
                    .first()
                    .map(|n| tree.sym(n.sym).to_string())
                    .unwrap_or_default(),
                names: names.len(),
                values: values.len(),
            });
        }

        let doc = self.spec_doc(gd, spec.doc);
        for (i, n) in names.iter().enumerate() {
            let name = tree.sym(n.sym).to_string();
            let value = match values.as_slice() {
                [] => String::new(),
                [only] => only.clone(),
                many => many.get(i).cloned().unwrap_or_default(),
            };
            let header = self.header(name.clone(), doc.clone());
            let decl = match gd.kind {
                GenDeclKind::Const => Decl::Const(Const {
                    header,
                    typ: typ.clone(),
                    value,
                }),
                _ => Decl::Var(Var {
                    header,
                    typ: typ.clone(),
                    value,
                }),
            };
            self.declare(name, decl);
        }
    }

    fn lower_type_spec(&mut self, gd: &GenDecl, spec: &TypeSpec) {
        let tree = self.tree;
        let name = tree.sym(spec.name).to_string();
        let rhs = tree.arena.types[spec.typ];

        if let SyntaxType::Named { args, .. } = rhs {
            if spec.alias && !args.is_empty() {
                debug!(%name, "alias of generic instantiation skipped");
                return;
            }
        }
        if let SyntaxType::Bad(_) = rhs {
            self.issue(LowerIssue::UnexpectedNode {
                context: "type declaration",
                found: "bad type",
            });
            return;
        }

        let header = self.header(name.clone(), self.spec_doc(gd, spec.doc));
        let type_params = self.flatten_type_params(spec.type_params);

        let decl = match rhs {
            SyntaxType::Struct { fields, .. } => {
                let ids = tree.arena.fields_list(fields);
                Decl::Struct(Struct {
                    header,
                    fields: self.flatten_fields(ids, FieldListKind::Struct),
                    type_params,
                })
            }
            SyntaxType::Interface { elems, .. } => {
                let elems = tree.arena.interface_elems(elems);
                let (methods, embeds) = self.lower_interface_elems(elems);
                Decl::Interface(Interface {
                    header,
                    methods,
                    embeds,
                    type_params,
                })
            }
            _ => Decl::Type(Type {
                header,
                underlying: self.render.type_(spec.typ),
                alias: spec.alias,
                type_params,
            }),
        };
        self.declare(name, decl);
    }

    // -------------------------------------------------------------------------
    // Functions and methods
    // -------------------------------------------------------------------------

    fn lower_func(&mut self, id: FuncDeclId) {
        let tree = self.tree;
        let node = tree.arena.funcs[id];
        let name = tree.sym(node.name).to_string();
        let doc = self.comment_lines(node.doc);
        let (params, results) = self.flatten_signature(node.signature);

        match node.recv {
            None => {
                let type_params = self.flatten_type_params(node.func_type_params);
                let func = Func {
                    header: self.header(name.clone(), doc),
                    type_params,
                    params,
                    results,
                };
                self.declare(name, Decl::Func(func));
            }
            Some(recv) => {
                let (receiver, receiver_type_params) = self.lower_receiver(&recv);
                let method = Method {
                    func: Func {
                        header: self.header(name, doc),
                        type_params: OrderedMap::new(),
                        params,
                        results,
                    },
                    receiver: Some(receiver),
                    receiver_type_params,
                };
                self.declare(method.key(), Decl::Method(method));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Declaration map
    // -------------------------------------------------------------------------

    /// Stores `decl` under `key`, applying the configured redeclaration policy.
    /// Blank names and `init` functions may repeat; later occurrences are
    /// keyed `name#n`.
    fn declare(&mut self, key: String, decl: Decl) {
        let key = if may_repeat(&decl) {
            let seen = self.repeats.entry(key.clone()).or_insert(0);
            let n = *seen;
            *seen += 1;
            if n == 0 {
                key
            } else {
                format!("{key}#{n}")
            }
        } else {
            key
        };

        if let Err(decl) = self.file.decls.insert_new(key.clone(), decl) {
            self.issue(LowerIssue::Redeclared { name: key.clone() });
            if self.config.redeclaration == Redeclaration::Replace {
                self.file.decls.replace(key, decl);
            }
        }
    }
}

fn may_repeat(decl: &Decl) -> bool {
    match decl {
        Decl::Func(f) => matches!(f.name(), "init" | "_"),
        other => other.name() == "_",
    }
}

/// Strips the quotes of an interpreted or raw string literal.
fn unquote(raw: &str) -> &str {
    for q in ['"', '`'] {
        if let Some(inner) = raw.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner;
        }
    }
    raw
}
