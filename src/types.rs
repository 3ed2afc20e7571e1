//! Type-checker output consumed for underlying-type lookups.
//!
//! The external loader may supply a [`TypeUniverse`]: an arena of type entries,
//! each with its textual form and its underlying type, plus one [`Scope`] per
//! package import path. Basic and literal types are their own underlying type;
//! named types point at the type they are defined over.

use indexmap::IndexMap;

/// Handle to an entry of a [`TypeUniverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef(u32);

impl TypeRef {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeEntry {
    repr: String,
    underlying: Option<TypeRef>,
}

/// Package-level identifiers that denote types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    objects: IndexMap<String, TypeRef>,
}

impl Scope {
    pub fn lookup(&self, name: &str) -> Option<TypeRef> {
        self.objects.get(name).copied()
    }

    pub fn declare(&mut self, name: impl Into<String>, typ: TypeRef) -> &mut Self {
        self.objects.insert(name.into(), typ);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeUniverse {
    entries: Vec<TypeEntry>,
    scopes: IndexMap<String, Scope>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, repr: String, underlying: Option<TypeRef>) -> TypeRef {
        let t = TypeRef(self.entries.len() as u32);
        self.entries.push(TypeEntry { repr, underlying });
        t
    }

    /// Predeclared basic type such as `int`; its own underlying type.
    pub fn basic(&mut self, name: &str) -> TypeRef {
        self.literal(name)
    }

    /// Type literal such as `struct{X int}` or `[]byte`; its own underlying type.
    pub fn literal(&mut self, repr: impl Into<String>) -> TypeRef {
        let t = self.push(repr.into(), None);
        self.entries[t.index()].underlying = Some(t);
        t
    }

    /// Defined type; `underlying` may be filled in later for recursive definitions.
    pub fn named(&mut self, repr: impl Into<String>, underlying: Option<TypeRef>) -> TypeRef {
        self.push(repr.into(), underlying)
    }

    pub fn set_underlying(&mut self, typ: TypeRef, underlying: TypeRef) {
        if let Some(entry) = self.entries.get_mut(typ.index()) {
            entry.underlying = Some(underlying);
        }
    }

    pub fn repr(&self, typ: TypeRef) -> Option<&str> {
        self.entries.get(typ.index()).map(|e| e.repr.as_str())
    }

    pub fn underlying(&self, typ: TypeRef) -> Option<TypeRef> {
        self.entries.get(typ.index())?.underlying
    }

    pub fn scope(&self, package_path: &str) -> Option<&Scope> {
        self.scopes.get(package_path)
    }

    /// Scope of `package_path`, created empty on first use.
    pub fn scope_mut(&mut self, package_path: impl Into<String>) -> &mut Scope {
        self.scopes.entry(package_path.into()).or_default()
    }

    pub fn declare(&mut self, package_path: impl Into<String>, name: impl Into<String>, typ: TypeRef) {
        self.scope_mut(package_path).declare(name, typ);
    }

    /// Follows underlying types until a fixed point or a missing link and
    /// returns the textual form of the last type reached.
    ///
    /// The walk is bounded by the number of entries, so a malformed cycle
    /// terminates at whichever type the bound lands on.
    pub fn underlying_fixpoint(&self, typ: TypeRef) -> Option<&str> {
        let mut current = typ;
        for _ in 0..=self.entries.len() {
            match self.underlying(current) {
                Some(next) if next != current => current = next,
                _ => break,
            }
        }
        self.repr(current)
    }
}

/// Names of Go's predeclared basic types.
pub const PREDECLARED_BASIC_TYPES: [&str; 19] = [
    "bool",
    "byte",
    "complex64",
    "complex128",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

pub fn is_predeclared_basic(name: &str) -> bool {
    PREDECLARED_BASIC_TYPES.contains(&name)
}
