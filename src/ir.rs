//! The lowered program: every package, read-only once built.

use crate::model::{Decl, File, FileId, Package, PackageId};
use crate::store::OrderedMap;
use crate::types::TypeUniverse;

/// Read-only handle over all lowered packages.
///
/// Built by [`Loader::build`](crate::Loader::build). Nothing in the public API
/// mutates an `Ir`, so it can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Ir {
    pub(crate) packages: OrderedMap<Package>,
    pub(crate) types: Option<TypeUniverse>,
}

impl Ir {
    /// Packages keyed by import path, in load order.
    pub fn packages(&self) -> &OrderedMap<Package> {
        &self.packages
    }

    pub fn package(&self, path: &str) -> Option<&Package> {
        self.packages.get(path)
    }

    pub fn package_by_id(&self, id: PackageId) -> Option<&Package> {
        self.packages.get_index(id.index()).map(|(_, p)| p)
    }

    /// Resolves a file back-reference.
    pub fn file(&self, id: FileId) -> Option<&File> {
        self.package_by_id(id.package())?
            .files
            .get_index(id.index())
            .map(|(_, f)| f)
    }

    /// Package owning the file `id`.
    pub fn package_of(&self, id: FileId) -> Option<&Package> {
        self.package_by_id(id.package())
    }

    /// File a declaration was lowered from.
    pub fn file_of(&self, decl: &Decl) -> Option<&File> {
        self.file(decl.file())
    }

    /// Type-checker output supplied at load time, if any.
    pub fn types(&self) -> Option<&TypeUniverse> {
        self.types.as_ref()
    }
}
