use go125_ir::types::PREDECLARED_BASIC_TYPES;
use go125_ir::{Config, Ir, Loader, PackageInput, TypeUniverse};
use go125_syntax::ast::GenDeclKind;
use go125_syntax::{SyntaxTree, TreeBuilder};
use proptest::prelude::*;

const PKG: &str = "example.com/p";

fn load(tree: SyntaxTree) -> Ir {
    Loader::new(Config::default())
        .add_package(PackageInput::new("p", PKG).with_file(tree))
        .build()
        .unwrap()
}

fn idents(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Z][a-z]{0,5}", 1..=max).prop_map(|s| s.into_iter().collect())
}

fn type_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["int", "string", "Weekday", "time.Duration", "byte"])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn field_entries_expand_per_name(names in idents(6), typ in type_name(), tagged in any::<bool>()) {
        let mut b = TreeBuilder::new("a.go", "p");
        let t = b.named(typ);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let field = b.field(&refs, t);
        if tagged {
            b.tag(field, "`json:\"x\"`");
        }
        b.field_doc(field, &["// shared"]);
        let st = b.struct_type(&[field]);
        let spec = b.type_spec("S", st);
        b.decl(GenDeclKind::Type, spec);
        let ir = load(b.finish());

        let s = ir.any_struct("S").unwrap();
        prop_assert_eq!(s.fields().len(), names.len());
        prop_assert_eq!(s.field_names(), refs.clone());
        for f in s.fields().values() {
            prop_assert_eq!(f.typ(), typ);
            prop_assert_eq!(f.tag().is_some(), tagged);
            prop_assert_eq!(f.doc(), ["// shared".to_string()]);
            prop_assert!(!f.is_unnamed());
        }
    }

    #[test]
    fn omitted_types_inherit_within_group_only(
        first in prop::collection::vec(prop::option::of(type_name()), 1..8),
        second in prop::collection::vec(prop::option::of(type_name()), 1..8),
        kind in prop::sample::select(vec![GenDeclKind::Const, GenDeclKind::Var]),
    ) {
        let mut b = TreeBuilder::new("a.go", "p");
        let mut expected = Vec::new();
        for (g, group) in [&first, &second].into_iter().enumerate() {
            let mut carried = "";
            let mut specs = Vec::new();
            for (i, typ) in group.iter().enumerate() {
                let name = format!("V{g}_{i}");
                let t = typ.map(|t| b.named(t));
                if let Some(t) = *typ {
                    carried = t;
                }
                expected.push((name.clone(), carried));
                specs.push(b.value_spec(&[name.as_str()], t, &[]));
            }
            b.group(kind, &specs);
        }
        let ir = load(b.finish());

        for (name, typ) in expected {
            let decl = ir.package(PKG).unwrap().decl(&name).unwrap();
            prop_assert_eq!(decl.declared_type(), Some(typ), "{}", name);
        }
    }

    #[test]
    fn receiver_type_never_keeps_pointer_marker(pointer in any::<bool>(), parens in 0usize..3, name in "[A-Z][a-z]{0,5}") {
        let mut b = TreeBuilder::new("a.go", "p");
        let mut t = b.named(&name);
        if pointer {
            t = b.pointer(t);
        }
        for _ in 0..parens {
            t = b.paren_type(t);
        }
        let recv = b.receiver(Some("r"), t);
        let sig = b.signature(&[], &[]);
        b.method(recv, "M", sig);
        let ir = load(b.finish());

        let m = ir.any_method("M").unwrap();
        let r = m.receiver().unwrap();
        prop_assert_eq!(r.is_pointer(), pointer);
        prop_assert_eq!(r.typ(), name.as_str());
        prop_assert!(!r.typ().starts_with('*'));
    }

    #[test]
    fn explicit_alias_wins_over_segment(alias in "[a-z]{1,6}", other in "[a-z]{1,6}") {
        prop_assume!(alias != other);
        let mut b = TreeBuilder::new("a.go", "p");
        let by_segment = b.import_spec(None, &format!("example.com/{other}/{alias}"));
        let by_alias = b.import_spec(Some(alias.as_str()), &format!("example.com/{other}"));
        b.group(GenDeclKind::Import, &[by_segment, by_alias]);
        let ir = load(b.finish());

        let file = ir.package(PKG).unwrap().file("a.go").unwrap();
        let hit = file.resolve_import(&format!("{alias}.Thing")).map(|i| i.path().to_string());
        prop_assert_eq!(hit, Some(format!("example.com/{other}")));
    }

    #[test]
    fn version_suffix_defers_to_previous_segment(
        name in "[a-z]{1,8}",
        letter in "[a-z]",
        major in 2u32..100,
    ) {
        let suffix = format!("{letter}{major}");
        let path = format!("example.com/{name}/{suffix}");
        let mut b = TreeBuilder::new("a.go", "p");
        let spec = b.import_spec(None, &path);
        b.decl(GenDeclKind::Import, spec);
        let ir = load(b.finish());

        let file = ir.package(PKG).unwrap().file("a.go").unwrap();
        let import = file.imports().get(&path).unwrap();
        prop_assert_eq!(import.default_name(), name.as_str());
        let hit = file.resolve_import(&format!("{name}.New")).map(|i| i.path());
        prop_assert_eq!(hit, Some(path.as_str()));
        let suffix_call = format!("{suffix}.New");
        prop_assert!(file.resolve_import(&suffix_call).is_none());
    }

    #[test]
    fn basic_type_resolution_is_idempotent(idx in 0..PREDECLARED_BASIC_TYPES.len(), typed in any::<bool>()) {
        let name = PREDECLARED_BASIC_TYPES[idx];
        let mut loader = Loader::default()
            .add_package(PackageInput::new("p", PKG).with_file(TreeBuilder::new("a.go", "p").finish()));
        if typed {
            let mut u = TypeUniverse::new();
            let basic = u.basic(name);
            u.declare(PKG, name, basic);
            loader = loader.with_types(u);
        }
        let ir = loader.build().unwrap();
        let from = ir.package(PKG).unwrap().file("a.go").unwrap().id();

        let once = ir.resolve_basic_type(from, name);
        prop_assert_eq!(once.as_deref(), Some(name));
        let twice = ir.resolve_basic_type(from, name);
        prop_assert_eq!(twice, once);
    }
}
