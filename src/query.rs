//! Lookup and filter façade over a built [`Ir`].
//!
//! "Any" lookups return the first match in package then file then source order.

use crate::ir::Ir;
use crate::model::{Const, Decl, DeclKind, Func, Interface, Method, Package, Struct, Type, Var};

impl Ir {
    /// Every declaration of every package.
    pub fn decls(&self) -> impl Iterator<Item = &Decl> + '_ {
        self.packages.values().flat_map(Package::decls)
    }

    /// Declarations accepted by `predicate`.
    pub fn decls_where<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a Decl> + 'a
    where
        P: FnMut(&Decl) -> bool + 'a,
    {
        self.decls().filter(move |d| predicate(d))
    }

    /// First declaration of `kind` named `name` in any package.
    pub fn any(&self, kind: DeclKind, name: &str) -> Option<&Decl> {
        self.decls().find(|d| d.kind() == kind && d.name() == name)
    }

    /// Declarations of `kind` in one package.
    pub fn in_package(&self, package_path: &str, kind: DeclKind) -> Vec<&Decl> {
        self.package(package_path)
            .into_iter()
            .flat_map(Package::decls)
            .filter(|d| d.kind() == kind)
            .collect()
    }

    pub fn all(&self, kind: DeclKind) -> Vec<&Decl> {
        self.decls_where(move |d| d.kind() == kind).collect()
    }

    /// Named fields of struct `struct_name` in one package; empty if there is no such struct.
    pub fn field_names(&self, package_path: &str, struct_name: &str) -> Vec<&str> {
        self.package(package_path)
            .and_then(|p| p.decls().filter_map(Decl::as_struct).find(|s| s.name() == struct_name))
            .map(Struct::field_names)
            .unwrap_or_default()
    }
}

macro_rules! typed_queries {
    ($($ty:ident: $project:ident => $any:ident, $pkg:ident, $all:ident;)*) => {
        impl Ir {
            $(
                pub fn $any(&self, name: &str) -> Option<&$ty> {
                    self.decls().filter_map(Decl::$project).find(|d| d.name() == name)
                }

                pub fn $pkg(&self, package_path: &str) -> Vec<&$ty> {
                    self.package(package_path)
                        .into_iter()
                        .flat_map(Package::decls)
                        .filter_map(Decl::$project)
                        .collect()
                }

                pub fn $all(&self) -> Vec<&$ty> {
                    self.decls().filter_map(Decl::$project).collect()
                }
            )*
        }
    };
}

typed_queries! {
    Var: as_var => any_var, pkg_vars, all_vars;
    Const: as_const => any_const, pkg_consts, all_consts;
    Type: as_type => any_type, pkg_types, all_types;
    Func: as_func => any_func, pkg_funcs, all_funcs;
    Method: as_method => any_method, pkg_methods, all_methods;
    Struct: as_struct => any_struct, pkg_structs, all_structs;
    Interface: as_interface => any_interface, pkg_interfaces, all_interfaces;
}
