use go125_ir::{Config, Decl, Ir, Loader, PackageInput};
use go125_syntax::ast::{ChanDir, GenDeclKind};
use go125_syntax::{SyntaxTree, TreeBuilder};

const PKG: &str = "example.com/shapes";

fn load(tree: SyntaxTree) -> Ir {
    Loader::new(Config::default())
        .add_package(PackageInput::new("shapes", PKG).with_file(tree))
        .build()
        .expect("lenient load never fails on a single file")
}

fn decl<'a>(ir: &'a Ir, key: &str) -> &'a Decl {
    ir.package(PKG)
        .and_then(|p| p.decl(key))
        .unwrap_or_else(|| panic!("missing declaration {key}"))
}

#[test]
fn alias_and_defined_types_in_one_group() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let int_a = b.named("int");
    let int_b = b.named("int");
    let a = b.alias_spec("A", int_a);
    let bb = b.type_spec("B", int_b);
    b.group(GenDeclKind::Type, &[a, bb]);
    let ir = load(b.finish());

    let a = decl(&ir, "A").as_type().unwrap();
    let bb = decl(&ir, "B").as_type().unwrap();
    assert!(a.is_alias());
    assert!(!bb.is_alias());
    assert_eq!(a.underlying(), "int");
    assert_eq!(bb.underlying(), "int");
}

#[test]
fn interface_embeds_and_methods_stay_apart() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let reader = b.named("io.Reader");
    let t = b.term(reader);
    let embed = b.embed_elem(&[t]);
    let sig = b.signature(&[], &[]);
    let foo = b.method_elem("Foo", sig);
    let iface = b.interface_type(&[embed, foo]);
    let spec = b.type_spec("I", iface);
    b.decl(GenDeclKind::Type, spec);
    let ir = load(b.finish());

    let i = decl(&ir, "I").as_interface().unwrap();
    assert_eq!(i.embeds().keys().collect::<Vec<_>>(), ["io.Reader"]);
    assert!(i.embeds().get("io.Reader").unwrap().is_unnamed());
    assert_eq!(i.methods().keys().collect::<Vec<_>>(), ["Foo"]);
    assert!(i.methods().get("Foo").unwrap().receiver().is_none());
}

#[test]
fn type_set_elements_are_embeds() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let int = b.named("int");
    let string = b.named("string");
    let tilde = b.tilde(int);
    let plain = b.term(string);
    let union = b.embed_elem(&[tilde, plain]);
    let iface = b.interface_type(&[union]);
    let spec = b.type_spec("Ordered", iface);
    b.decl(GenDeclKind::Type, spec);
    let ir = load(b.finish());

    let i = decl(&ir, "Ordered").as_interface().unwrap();
    assert!(i.methods().is_empty());
    assert_eq!(i.embeds().keys().collect::<Vec<_>>(), ["~int | string"]);
}

#[test]
fn named_results_expand_in_order() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let int = b.named("int");
    let results = b.field(&["a", "b", "c"], int);
    let sig = b.signature(&[], &[results]);
    b.func("F", sig);
    let ir = load(b.finish());

    let f = decl(&ir, "F").as_func().unwrap();
    let got: Vec<(&str, &str, &str)> = f
        .results()
        .iter()
        .map(|(k, r)| (k, r.name(), r.typ()))
        .collect();
    assert_eq!(got, [("a", "a", "int"), ("b", "b", "int"), ("c", "c", "int")]);
    assert!(f.params().is_empty());
}

#[test]
fn struct_fields_share_type_tag_and_doc() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let float = b.named("float64");
    let xy = b.field(&["X", "Y"], float);
    b.tag(xy, "`json:\"coord\"`");
    b.field_doc(xy, &["// Coordinates."]);
    let string = b.named("string");
    let name = b.field(&["Name"], string);
    b.field_comment(name, &["// display name"]);
    let stringer = b.named("fmt.Stringer");
    let embed = b.embedded(stringer);
    let st = b.struct_type(&[xy, name, embed]);
    let spec = b.type_spec("Point", st);
    b.decl(GenDeclKind::Type, spec);
    let ir = load(b.finish());

    let s = decl(&ir, "Point").as_struct().unwrap();
    assert_eq!(s.fields().keys().collect::<Vec<_>>(), ["X", "Y", "Name", "fmt.Stringer"]);
    let (x, y) = (s.fields().get("X").unwrap(), s.fields().get("Y").unwrap());
    assert_eq!((x.typ(), x.tag(), x.doc()), (y.typ(), y.tag(), y.doc()));
    assert_eq!(x.tag(), Some("`json:\"coord\"`"));
    assert_eq!(x.doc(), ["// Coordinates."]);
    assert_eq!(s.fields().get("Name").unwrap().comment(), ["// display name"]);

    let embedded: Vec<_> = s.embedded().map(|f| f.typ()).collect();
    assert_eq!(embedded, ["fmt.Stringer"]);
    assert_eq!(s.field_names(), ["X", "Y", "Name"]);
}

#[test]
fn receivers_are_bare_with_pointer_flag() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let point = b.named("Point");
    let value = b.receiver(Some("p"), point);
    let sig = b.signature_returning(&[], point);
    b.method(value, "Clone", sig);

    let point = b.named("Point");
    let ptr = b.pointer(point);
    let paren = b.paren_type(ptr);
    let recv = b.receiver(Some("p"), paren);
    let float = b.named("float64");
    let f = b.field(&["f"], float);
    let sig = b.signature(&[f], &[]);
    b.method(recv, "Scale", sig);
    let ir = load(b.finish());

    let clone = decl(&ir, "Point.Clone").as_method().unwrap();
    let scale = decl(&ir, "Point.Scale").as_method().unwrap();
    let (cr, sr) = (clone.receiver().unwrap(), scale.receiver().unwrap());
    assert_eq!((cr.name(), cr.typ(), cr.is_pointer()), ("p", "Point", false));
    assert_eq!((sr.name(), sr.typ(), sr.is_pointer()), ("p", "Point", true));
    assert_eq!(clone.results().keys().collect::<Vec<_>>(), ["Point#0"]);
    assert_eq!(scale.key(), "Point.Scale");
}

#[test]
fn generic_receiver_binds_type_parameter_names() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let list = b.named("List");
    let ptr = b.pointer(list);
    let recv = b.generic_receiver(Some("l"), ptr, &["T"]);
    let t = b.named("T");
    let v = b.field(&["v"], t);
    let sig = b.signature(&[v], &[]);
    b.method(recv, "Push", sig);
    let ir = load(b.finish());

    let push = decl(&ir, "List.Push").as_method().unwrap();
    let r = push.receiver().unwrap();
    assert_eq!((r.typ(), r.is_pointer()), ("List", true));
    assert_eq!(push.receiver_type_params().keys().collect::<Vec<_>>(), ["T"]);
}

#[test]
fn unnamed_and_variadic_parameters() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let int1 = b.named("int");
    let int2 = b.named("int");
    let a = b.field(&[], int1);
    let c = b.field(&[], int2);
    let string = b.named("string");
    let rest = b.variadic(&["rest"], string);
    let err = b.named("error");
    let sig = b.signature_returning(&[a, c, rest], err);
    b.func("Join", sig);
    let ir = load(b.finish());

    let f = decl(&ir, "Join").as_func().unwrap();
    assert_eq!(f.params().keys().collect::<Vec<_>>(), ["int#0", "int#1", "rest"]);
    assert!(f.params().values().take(2).all(|p| p.is_unnamed() && p.name().is_empty()));
    let rest = f.params().get("rest").unwrap();
    assert!(rest.is_variadic());
    assert_eq!(rest.typ(), "...string");
    assert_eq!(f.results().keys().collect::<Vec<_>>(), ["error#0"]);
}

#[test]
fn generic_declarations_record_type_params() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let any = b.any_constraint();
    let int = b.named("int");
    let float = b.named("float64");
    let (ti, tf) = (b.tilde(int), b.tilde(float));
    let number = b.union_constraint(&[ti, tf]);
    let params = b.type_params(&[(&["K"][..], any), (&["V"][..], number)]);
    let k = b.named("K");
    let v = b.named("V");
    let m = b.map(k, v);
    let spec = b.generic_type_spec("Table", params, m);
    b.decl(GenDeclKind::Type, spec);

    let any = b.any_constraint();
    let params = b.type_params(&[(&["T"][..], any)]);
    let t = b.named("T");
    let x = b.field(&["x"], t);
    let sig = b.signature_returning(&[x], t);
    b.generic_func("Identity", params, sig);
    let ir = load(b.finish());

    let table = decl(&ir, "Table").as_type().unwrap();
    assert_eq!(table.underlying(), "map[K]V");
    let tps: Vec<_> = table.type_params().iter().map(|(k, f)| (k, f.typ())).collect();
    assert_eq!(tps, [("K", "any"), ("V", "~int | ~float64")]);

    let id = decl(&ir, "Identity").as_func().unwrap();
    assert_eq!(id.type_params().keys().collect::<Vec<_>>(), ["T"]);
}

#[test]
fn non_struct_right_hand_sides_render_verbatim() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let byte = b.named("byte");
    let chan = b.chan(ChanDir::Recv, byte);
    let events = b.type_spec("Events", chan);

    let int = b.named("int");
    let arr = b.array("4", int);
    let quad = b.type_spec("Quad", arr);

    let string = b.named("string");
    let p = b.field(&["s"], string);
    let boolean = b.named("bool");
    let sig = b.signature_returning(&[p], boolean);
    let func = b.func_type(sig);
    let pred = b.type_spec("Pred", func);

    let dur = b.named("time.Duration");
    let timeout = b.type_spec("Timeout", dur);
    b.group(GenDeclKind::Type, &[events, quad, pred, timeout]);
    let ir = load(b.finish());

    let got: Vec<(&str, &str)> = ir
        .pkg_types(PKG)
        .into_iter()
        .map(|t| (t.name(), t.underlying()))
        .collect();
    assert_eq!(
        got,
        [
            ("Events", "<-chan byte"),
            ("Quad", "[4]int"),
            ("Pred", "func(s string) bool"),
            ("Timeout", "time.Duration"),
        ]
    );
}

#[test]
fn imports_docs_and_comments() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    b.file_doc(&["// Package shapes draws things."]);
    let fmt = b.import_spec(None, "fmt");
    let fmt = b.with_comment(fmt, &["// printing"]);
    let yaml = b.import_spec(Some("yaml"), "gopkg.in/yaml.v3");
    let yaml = b.with_doc(yaml, &["// config files"]);
    let dot = b.import_spec(Some("."), "math");
    let blank = b.import_spec(Some("_"), "embed");
    b.group(GenDeclKind::Import, &[fmt, yaml, dot, blank]);
    let tree = b.finish();
    let ir = load(tree);

    let file = ir.package(PKG).unwrap().file("a.go").unwrap();
    assert_eq!(file.doc(), ["// Package shapes draws things."]);
    assert_eq!(
        file.imports().keys().collect::<Vec<_>>(),
        ["fmt", "gopkg.in/yaml.v3", "math", "embed"]
    );
    let fmt = file.imports().get("fmt").unwrap();
    assert_eq!((fmt.alias(), fmt.comment()), (None, &["// printing".to_string()][..]));
    assert_eq!(file.imports().get("gopkg.in/yaml.v3").unwrap().doc(), ["// config files"]);
    assert!(file.imports().get("math").unwrap().is_dot());
    assert!(file.imports().get("embed").unwrap().is_blank());
    assert_eq!(file.comments().len(), 3);
}

#[test]
fn declarations_keep_source_order_across_kinds() {
    let mut b = TreeBuilder::new("a.go", "shapes");
    let one = b.int("1");
    let c = b.value_spec(&["Max"], None, &[one]);
    b.decl(GenDeclKind::Const, c);
    let sig = b.signature(&[], &[]);
    b.func("Draw", sig);
    let st = b.struct_type(&[]);
    let t = b.type_spec("Canvas", st);
    b.decl(GenDeclKind::Type, t);
    let canvas = b.named("Canvas");
    let v = b.value_spec(&["Default"], Some(canvas), &[]);
    b.decl(GenDeclKind::Var, v);
    let ir = load(b.finish());

    let file = ir.package(PKG).unwrap().file("a.go").unwrap();
    assert_eq!(
        file.decls().keys().collect::<Vec<_>>(),
        ["Max", "Draw", "Canvas", "Default"]
    );
    let default = file.decl("Default").unwrap();
    assert_eq!(ir.file_of(default).map(|f| f.path()), Some("a.go"));
    assert_eq!(default.declared_type(), Some("Canvas"));
}
