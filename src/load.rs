//! Entry point: turns loader output into an [`Ir`].

use go125_syntax::{Diag, SyntaxTree};
use tracing::{debug, debug_span, warn};

use crate::config::{Config, LoadMode};
use crate::error::LoadError;
use crate::ir::Ir;
use crate::lower::lower_file;
use crate::model::{FileId, Package, PackageId};
use crate::store::OrderedMap;
use crate::types::TypeUniverse;

/// One package as handed over by the external package loader.
#[derive(Debug, Clone)]
pub struct PackageInput {
    /// Name from the package clause.
    pub name: String,
    /// Import path.
    pub path: String,
    pub files: Vec<SyntaxTree>,
    /// Package-level errors (type checking, missing files). Per-file syntax
    /// errors travel on each tree.
    pub errors: Vec<Diag>,
}

impl PackageInput {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            files: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_file(mut self, tree: SyntaxTree) -> Self {
        self.files.push(tree);
        self
    }

    pub fn with_error(mut self, diag: Diag) -> Self {
        self.errors.push(diag);
        self
    }

    /// Package errors followed by every tree's diagnostics.
    fn all_errors(&self) -> Vec<Diag> {
        self.errors
            .iter()
            .chain(self.files.iter().flat_map(|t| t.diags.iter()))
            .cloned()
            .collect()
    }
}

/// Collects package inputs and lowers them in one synchronous pass.
///
/// ```
/// use go125_ir::{Config, Loader, PackageInput};
/// use go125_syntax::TreeBuilder;
///
/// let tree = TreeBuilder::new("main.go", "main").finish();
/// let ir = Loader::new(Config::default())
///     .add_package(PackageInput::new("main", "example.com/cmd").with_file(tree))
///     .build()
///     .unwrap();
/// assert_eq!(ir.packages().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Loader {
    config: Config,
    types: Option<TypeUniverse>,
    inputs: Vec<PackageInput>,
}

impl Loader {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            types: None,
            inputs: Vec::new(),
        }
    }

    /// Supplies type-checker output for [`Ir::resolve_basic_type`].
    pub fn with_types(mut self, universe: TypeUniverse) -> Self {
        self.types = Some(universe);
        self
    }

    pub fn add_package(mut self, input: PackageInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn build(self) -> Result<Ir, LoadError> {
        let Loader {
            config,
            types,
            inputs,
        } = self;

        let mut packages: OrderedMap<Package> = OrderedMap::new();
        for input in inputs {
            let span = debug_span!("load_package", path = %input.path);
            let _guard = span.enter();

            if packages.contains_key(&input.path) {
                return Err(LoadError::DuplicatePackage(input.path));
            }

            let errors = input.all_errors();
            if !errors.is_empty() {
                match config.mode {
                    LoadMode::Strict => {
                        return Err(LoadError::PackageErrors {
                            path: input.path,
                            errors,
                        });
                    }
                    LoadMode::Lenient => {
                        for e in &errors {
                            warn!(error = %e, "package loaded with errors");
                        }
                    }
                }
            }

            let id = PackageId(packages.len() as u32);
            let mut files = OrderedMap::new();
            for tree in &input.files {
                let file_id = FileId {
                    package: id,
                    index: files.len() as u32,
                };
                let file = lower_file(tree, file_id, &input.name, &config);
                if files.insert_new(tree.path.clone(), file).is_err() {
                    return Err(LoadError::DuplicateFile {
                        package: input.path,
                        file: tree.path.clone(),
                    });
                }
            }

            debug!(files = files.len(), errors = errors.len(), "package lowered");
            let package = Package {
                id,
                name: input.name,
                path: input.path.clone(),
                files,
                errors,
            };
            if packages.insert_new(input.path.clone(), package).is_err() {
                return Err(LoadError::DuplicatePackage(input.path));
            }
        }

        debug!(packages = packages.len(), typed = types.is_some(), "load complete");
        Ok(Ir { packages, types })
    }
}
