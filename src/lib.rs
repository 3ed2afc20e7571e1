//! Flat declaration IR for Go packages.
//!
//! - `load` takes parsed syntax trees from an external loader and lowers them.
//! - `model` holds the declaration entities; `store` the ordered maps they live in.
//! - `resolve` and `query` answer questions over a built [`Ir`]: import selectors,
//!   underlying basic types, method sets, typed lookups.
//! - `types` models optional type-checker output used for underlying types.

pub mod config;
pub mod error;
pub mod ir;
pub mod load;
mod lower;
pub mod model;
mod query;
pub mod resolve;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::{Config, LoadMode, Redeclaration};
pub use error::{LoadError, LowerIssue};
pub use ir::Ir;
pub use load::{Loader, PackageInput};
pub use model::{
    Const, Decl, DeclKind, Field, File, FileId, Func, Import, Interface, Method, Package, PackageId,
    Struct, Type, Var,
};
pub use store::OrderedMap;
pub use types::{Scope, TypeRef, TypeUniverse};
