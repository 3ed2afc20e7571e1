//! Go declaration syntax tree.
//!
//! - `ast` holds the arena-allocated nodes produced by a Go parser.
//! - `builder` constructs trees programmatically, synthesizing the source text.
//! - `error` carries diagnostics the external parser or type checker reported.

pub mod ast;
pub mod builder;
pub mod error;

pub use ast::SyntaxTree;
pub use builder::TreeBuilder;
pub use error::{Diag, DiagKind};
