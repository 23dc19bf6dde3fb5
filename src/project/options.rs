//! Assembly options

/// Options for building a project
#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    /// Middlewares wrapped around class-like construction, outermost first
    pub middlewares: Vec<String>,
    /// Statically evaluate constant values and attribute arguments
    /// (false = keep the source text as written)
    pub evaluate_constants: bool,
    /// Assemble files on the rayon thread pool
    pub parallel: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            middlewares: vec!["implements".to_string(), "statements".to_string()],
            evaluate_constants: true,
            parallel: true,
        }
    }
}

impl AssemblyOptions {
    /// Options that assemble files one after the other
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}
