//! Lookup helpers for assembled models.

use reflect::model::{Class, File};
use reflect::{AssemblyOptions, Project, ProjectFactory, SourceFile};

/// Assemble files sequentially with the default configuration.
pub fn assemble(files: Vec<SourceFile>) -> Project {
    ProjectFactory::new(&AssemblyOptions::sequential())
        .expect("default options are valid")
        .create("test", files)
}

/// Assemble a single file, failing the test on any error.
pub fn assemble_file(file: SourceFile) -> File {
    ProjectFactory::new(&AssemblyOptions::sequential())
        .expect("default options are valid")
        .create_file(file)
        .unwrap_or_else(|err| panic!("assembly failed: {err}"))
}

pub fn class<'a>(file: &'a File, fqsen: &str) -> &'a Class {
    file.class(fqsen).unwrap_or_else(|| {
        panic!(
            "no class {fqsen}; have {:?}",
            file.classes.keys().collect::<Vec<_>>()
        )
    })
}

pub fn member_count(class: &Class) -> usize {
    class.constants.len() + class.properties.len() + class.methods.len()
}
