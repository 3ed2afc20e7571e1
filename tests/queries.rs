use go125_ir::{Config, Decl, DeclKind, Ir, Loader, LowerIssue, PackageInput, Redeclaration};
use go125_syntax::ast::GenDeclKind;
use go125_syntax::{SyntaxTree, TreeBuilder};

const GEO: &str = "example.com/geo";
const DRAW: &str = "example.com/draw";

fn geo() -> SyntaxTree {
    let mut b = TreeBuilder::new("point.go", "geo");
    let float = b.named("float64");
    let xy = b.field(&["X", "Y"], float);
    let st = b.struct_type(&[xy]);
    let point = b.type_spec("Point", st);
    let sig = b.signature_returning(&[], float);
    let area = b.method_elem("Area", sig);
    let iface = b.interface_type(&[area]);
    let shape = b.type_spec("Shape", iface);
    b.group(GenDeclKind::Type, &[point, shape]);

    let zero = b.int("0");
    let origin = b.value_spec(&["Origin"], None, &[zero]);
    b.decl(GenDeclKind::Var, origin);

    let p = b.named("Point");
    let recv = b.receiver(Some("p"), p);
    let sig = b.signature_returning(&[], float);
    b.method(recv, "Area", sig);
    b.finish()
}

fn draw() -> SyntaxTree {
    let mut b = TreeBuilder::new("draw.go", "draw");
    let string = b.named("string");
    let name = b.field(&["Name"], string);
    let st = b.struct_type(&[name]);
    let spec = b.type_spec("Point", st);
    b.decl(GenDeclKind::Type, spec);
    let pi = b.lit(go125_syntax::ast::BasicLitKind::Float, "3.14");
    let c = b.value_spec(&["Pi"], None, &[pi]);
    b.decl(GenDeclKind::Const, c);
    let sig = b.signature(&[], &[]);
    b.func("Render", sig);
    b.finish()
}

fn load() -> Ir {
    Loader::new(Config::default())
        .add_package(PackageInput::new("geo", GEO).with_file(geo()))
        .add_package(PackageInput::new("draw", DRAW).with_file(draw()))
        .build()
        .unwrap()
}

#[test]
fn any_lookups_follow_package_order() {
    let ir = load();
    let point = ir.any_struct("Point").unwrap();
    assert_eq!(ir.package_of(point.file()).map(|p| p.path()), Some(GEO));
    assert_eq!(point.field_names(), ["X", "Y"]);

    assert!(ir.any_const("Pi").is_some());
    assert!(ir.any_func("Missing").is_none());
    assert_eq!(ir.any(DeclKind::Method, "Area").map(Decl::kind), Some(DeclKind::Method));
    assert_eq!(ir.any_interface("Shape").unwrap().methods().len(), 1);
}

#[test]
fn package_and_global_listings() {
    let ir = load();
    assert_eq!(ir.all_structs().len(), 2);
    assert_eq!(ir.pkg_structs(DRAW).len(), 1);
    assert_eq!(ir.pkg_vars(GEO).iter().map(|v| v.name()).collect::<Vec<_>>(), ["Origin"]);
    assert!(ir.pkg_vars(DRAW).is_empty());
    assert_eq!(ir.all_methods().len(), 1);
    assert_eq!(ir.all_funcs().len(), 1);
    assert_eq!(ir.all_types().len(), 0);
    assert_eq!(ir.all_consts().len(), 1);
    assert_eq!(ir.pkg_interfaces(GEO).len(), 1);
    assert_eq!(ir.pkg_methods(GEO)[0].receiver().map(|r| r.typ()), Some("Point"));
    assert_eq!(ir.pkg_funcs(DRAW)[0].name(), "Render");
    assert!(ir.pkg_types("example.com/missing").is_empty());
    assert!(ir.any_var("Origin").is_some());
    assert!(ir.any_type("Point").is_none());
    assert!(ir.any_method("Area").is_some());
    assert!(ir.any_interface("Point").is_none());
    assert!(ir.pkg_consts(GEO).is_empty());

    let kinds: Vec<DeclKind> = ir.in_package(GEO, DeclKind::Struct).iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DeclKind::Struct]);
    assert_eq!(ir.all(DeclKind::Struct).len(), 2);
}

#[test]
fn predicate_filter_over_every_kind() {
    let ir = load();
    let named_point: Vec<_> = ir
        .decls_where(|d| d.name() == "Point")
        .map(|d| ir.package_of(d.file()).unwrap().name())
        .collect();
    assert_eq!(named_point, ["geo", "draw"]);

    let documented = ir.decls_where(|d| !d.doc().is_empty()).count();
    assert_eq!(documented, 0);
    assert_eq!(ir.decls().count(), 7);

    for kind in DeclKind::ALL {
        let via_filter = ir.decls_where(|d| d.kind() == kind).count();
        assert_eq!(via_filter, ir.all(kind).len(), "{kind}");
    }
}

#[test]
fn field_names_by_package() {
    let ir = load();
    assert_eq!(ir.field_names(GEO, "Point"), ["X", "Y"]);
    assert_eq!(ir.field_names(DRAW, "Point"), ["Name"]);
    assert!(ir.field_names(GEO, "Shape").is_empty());
}

fn redeclaring() -> PackageInput {
    let mut b = TreeBuilder::new("dup.go", "dup");
    let sig = b.signature(&[], &[]);
    b.func("Run", sig);
    let int = b.named("int");
    let spec = b.type_spec("Run", int);
    b.decl(GenDeclKind::Type, spec);
    PackageInput::new("dup", "example.com/dup").with_file(b.finish())
}

#[test]
fn redeclaration_is_reported_under_either_policy() {
    for (policy, kind) in [
        (Redeclaration::KeepFirst, DeclKind::Func),
        (Redeclaration::Replace, DeclKind::Type),
    ] {
        let ir = Loader::new(Config::default().with_redeclaration(policy))
            .add_package(redeclaring())
            .build()
            .unwrap();
        let file = ir.package("example.com/dup").unwrap().file("dup.go").unwrap();
        assert_eq!(file.decls().len(), 1);
        assert_eq!(file.decl("Run").map(Decl::kind), Some(kind), "{policy:?}");
        assert_eq!(file.issues(), [LowerIssue::Redeclared { name: "Run".into() }]);
    }
}

#[test]
fn ir_is_shareable_across_threads() {
    let ir = load();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| assert_eq!(ir.all_structs().len(), 2));
        }
    });
}
