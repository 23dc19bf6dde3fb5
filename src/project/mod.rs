//! Project assembly: resolves and builds a batch of files.

mod assembly;
mod options;

pub use assembly::{FileError, Project, ProjectFactory};
pub use options::AssemblyOptions;
