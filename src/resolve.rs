//! Reference resolution over a built [`Ir`]: import selectors, underlying basic
//! types and method sets.
//!
//! Every miss is `None` or an empty result, never an error.

use tracing::trace;

use crate::ir::Ir;
use crate::model::{Const, Decl, File, FileId, Import, Method, Type, Var};
use crate::types::{is_predeclared_basic, TypeRef, TypeUniverse};

/// Splits `pkg.Name` at the first dot. Selectors with an empty side are rejected.
pub fn split_selector(selector: &str) -> Option<(&str, &str)> {
    let (pkg, name) = selector.split_once('.')?;
    if pkg.is_empty() || name.is_empty() {
        return None;
    }
    Some((pkg, name))
}

/// `v2`, `v10`: one ASCII letter followed by at least one digit.
fn is_version_suffix(segment: &str) -> bool {
    match segment.as_bytes() {
        [first, rest @ ..] => {
            first.is_ascii_alphabetic() && !rest.is_empty() && rest.iter().all(u8::is_ascii_digit)
        }
        [] => false,
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Second-to-last segment when the last one is a version suffix.
fn versioned_segment(path: &str) -> Option<&str> {
    let mut segments = path.rsplit('/');
    let last = segments.next()?;
    if is_version_suffix(last) {
        segments.next()
    } else {
        None
    }
}

impl Import {
    /// Name an unaliased import is guessed to bind: the last path segment, or the
    /// one before it when the last is a major-version suffix.
    pub fn default_name(&self) -> &str {
        versioned_segment(&self.path).unwrap_or_else(|| last_segment(&self.path))
    }
}

impl File {
    /// Finds the import a qualified selector `pkg.Name` refers to.
    ///
    /// Explicit aliases are matched first, then the last path segment of
    /// unaliased imports, then the segment before a version suffix. A version
    /// suffix never matches on its own. This is a
    /// heuristic: two unaliased imports sharing a last segment resolve to
    /// whichever was imported first.
    pub fn resolve_import(&self, selector: &str) -> Option<&Import> {
        let (pkg, _) = split_selector(selector)?;
        let imports = || self.imports.values();

        imports()
            .find(|i| !i.is_dot() && !i.is_blank() && i.alias() == Some(pkg))
            .or_else(|| {
                imports().find(|i| {
                    i.alias().is_none()
                        && versioned_segment(&i.path).is_none()
                        && last_segment(&i.path) == pkg
                })
            })
            .or_else(|| {
                imports().find(|i| i.alias().is_none() && versioned_segment(&i.path) == Some(pkg))
            })
    }
}

impl Ir {
    /// Chases `name` to its underlying type and returns that type's text.
    ///
    /// Qualified names are resolved through the imports of file `from`;
    /// unqualified names are looked up in every loaded package's scope, first
    /// match winning. Names with no type-checker entry resolve only if they are
    /// predeclared basic types, which also covers loads without type information.
    pub fn resolve_basic_type(&self, from: FileId, name: &str) -> Option<String> {
        if let Some(universe) = self.types() {
            if let Some(t) = self.lookup_type(universe, from, name) {
                let resolved = universe.underlying_fixpoint(t).map(str::to_string);
                trace!(name, resolved = ?resolved, "underlying type");
                return resolved;
            }
        }
        is_predeclared_basic(name).then(|| name.to_string())
    }

    fn lookup_type(&self, universe: &TypeUniverse, from: FileId, name: &str) -> Option<TypeRef> {
        if name.contains('.') {
            let (_, ident) = split_selector(name)?;
            let import = self.file(from)?.resolve_import(name)?;
            return universe.scope(import.path())?.lookup(ident);
        }
        self.packages
            .values()
            .find_map(|p| universe.scope(p.path())?.lookup(name))
    }

    /// Methods of package `package_path` whose receiver is `type_name`.
    /// Value and pointer receivers both match, whichever form is asked for.
    pub fn method_set(&self, package_path: &str, type_name: &str) -> Vec<&Method> {
        let want = type_name.strip_prefix('*').unwrap_or(type_name);
        self.package_decls(package_path)
            .filter_map(Decl::as_method)
            .filter(|m| {
                m.receiver()
                    .is_some_and(|r| r.typ().strip_prefix('*').unwrap_or(r.typ()) == want)
            })
            .collect()
    }

    /// Vars whose declared type text is exactly `type_name`.
    pub fn vars_of_type(&self, package_path: &str, type_name: &str) -> Vec<&Var> {
        self.package_decls(package_path)
            .filter_map(Decl::as_var)
            .filter(|v| v.typ() == type_name)
            .collect()
    }

    /// Consts whose declared type text is exactly `type_name`.
    pub fn consts_of_type(&self, package_path: &str, type_name: &str) -> Vec<&Const> {
        self.package_decls(package_path)
            .filter_map(Decl::as_const)
            .filter(|c| c.typ() == type_name)
            .collect()
    }

    /// Type declarations whose right-hand side text is exactly `type_name`.
    pub fn types_of_type(&self, package_path: &str, type_name: &str) -> Vec<&Type> {
        self.package_decls(package_path)
            .filter_map(Decl::as_type)
            .filter(|t| t.underlying() == type_name)
            .collect()
    }

    fn package_decls<'a>(&'a self, package_path: &str) -> impl Iterator<Item = &'a Decl> + 'a {
        self.package(package_path).into_iter().flat_map(|p| p.decls())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_validation() {
        assert_eq!(split_selector("io.Reader"), Some(("io", "Reader")));
        assert_eq!(split_selector("Reader"), None);
        assert_eq!(split_selector(".Reader"), None);
        assert_eq!(split_selector("io."), None);
    }

    #[test]
    fn version_suffixes() {
        for yes in ["v2", "v10", "x1"] {
            assert!(is_version_suffix(yes), "{yes}");
        }
        for no in ["v", "2", "vv2", "v2a", "yaml.v3", ""] {
            assert!(!is_version_suffix(no), "{no}");
        }
    }

    #[test]
    fn default_names() {
        let import = |path: &str| Import {
            name: String::new(),
            path: path.to_string(),
            doc: Vec::new(),
            comment: Vec::new(),
        };
        assert_eq!(import("fmt").default_name(), "fmt");
        assert_eq!(import("github.com/acme/repo/v2").default_name(), "repo");
        assert_eq!(import("gopkg.in/yaml.v3").default_name(), "yaml.v3");
    }
}
