use go125_syntax::Diag;
use thiserror::Error;

/// Reasons a load is aborted as a whole.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("package {path} has {} load error(s)", .errors.len())]
    PackageErrors { path: String, errors: Vec<Diag> },

    #[error("package {0} supplied more than once")]
    DuplicatePackage(String),

    #[error("file {file} supplied more than once for package {package}")]
    DuplicateFile { package: String, file: String },
}

/// Inconsistency met while lowering one file. Never fatal: the offending node
/// is skipped and recorded on the file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LowerIssue {
    #[error("unexpected {found} in {context}")]
    UnexpectedNode {
        context: &'static str,
        found: &'static str,
    },

    #[error("{name} redeclared in this file")]
    Redeclared { name: String },

    #[error("{name}: {names} name(s) but {values} value(s)")]
    ValueCount {
        name: String,
        names: usize,
        values: usize,
    },

    #[error("file declares package {found}, expected {expected}")]
    PackageMismatch { expected: String, found: String },
}
