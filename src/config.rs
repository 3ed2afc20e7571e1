//! Load-time policy knobs.

/// How packages the loader reported errors for are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Any package with errors aborts the whole load.
    Strict,
    /// Packages are lowered anyway; their errors stay visible on [`Package::errors`](crate::Package::errors).
    #[default]
    Lenient,
}

/// What happens when a file declares the same name twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redeclaration {
    /// The first declaration is kept; later ones are reported as issues.
    #[default]
    KeepFirst,
    /// The last declaration wins, keeping the first one's position. Still reported.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub mode: LoadMode,
    pub redeclaration: Redeclaration,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self::default().with_mode(LoadMode::Strict)
    }

    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_redeclaration(mut self, policy: Redeclaration) -> Self {
        self.redeclaration = policy;
        self
    }
}
