//! Multi-file assembly: isolation, merging and determinism.

use reflect::base::Location;
use reflect::syntax::{ClassDecl, NodeKind, SourceFile, Stmt};
use reflect::{AssemblyOptions, ProjectFactory, ReflectionError};

use crate::helpers::model_assertions::{assemble, class};
use crate::helpers::source_fixtures::{class as class_decl, namespace, pizza_file};

fn calzone_file() -> SourceFile {
    SourceFile::new(
        "src/Calzone.php",
        vec![namespace(
            "Luigi",
            vec![Stmt::Class(class_decl("Calzone", vec![]))],
        )],
    )
}

/// A class whose name is not a valid identifier.
fn broken_file() -> SourceFile {
    SourceFile::new(
        "src/Broken.php",
        vec![namespace(
            "Luigi",
            vec![Stmt::Class(ClassDecl {
                location: Location::new(7, 9),
                ..class_decl("Quattro Formaggi", vec![])
            })],
        )],
    )
}

#[test]
fn test_namespaces_merge_across_files() {
    let project = assemble(vec![pizza_file(), calzone_file()]);

    assert!(!project.has_errors());
    assert_eq!(
        project.files.keys().collect::<Vec<_>>(),
        vec!["src/Pizza.php", "src/Calzone.php"]
    );
    let luigi = project.namespace("\\Luigi").unwrap();
    assert_eq!(
        luigi.classes.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        vec!["\\Luigi\\Pizza", "\\Luigi\\Calzone"]
    );
}

#[test]
fn test_failing_file_is_isolated() {
    let project = assemble(vec![pizza_file(), broken_file(), calzone_file()]);

    assert_eq!(project.files.len(), 2);
    assert_eq!(project.errors.len(), 1);
    assert_eq!(project.errors[0].path, "src/Broken.php");
    let error = &project.errors[0].error;
    assert!(matches!(
        error,
        ReflectionError::AtNode {
            kind: NodeKind::Class,
            line: 7,
            ..
        }
    ));
    assert!(matches!(
        error.root(),
        ReflectionError::MalformedIdentifier { .. }
    ));
    assert!(project.errors[0].to_string().contains("line 7"));
    let calzone = project.file("src/Calzone.php").unwrap();
    assert_eq!(class(calzone, "\\Luigi\\Calzone").fqsen.name(), "Calzone");
}

#[test]
fn test_duplicate_path_keeps_first_file() {
    let mut second = calzone_file();
    second.path = "src/Pizza.php".to_string();
    let project = assemble(vec![pizza_file(), second]);

    assert_eq!(project.files.len(), 1);
    let kept = project.file("src/Pizza.php").unwrap();
    assert!(kept.class("\\Luigi\\Pizza").is_some());
    assert!(kept.class("\\Luigi\\Calzone").is_none());
    let luigi = project.namespace("\\Luigi").unwrap();
    assert_eq!(
        luigi.classes.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        vec!["\\Luigi\\Pizza"]
    );
    assert_eq!(project.errors.len(), 1);
    assert!(matches!(
        &project.errors[0].error,
        ReflectionError::DuplicateFile { path } if path == "src/Pizza.php"
    ));
}

#[test]
fn test_parallel_matches_sequential() {
    let files = || vec![pizza_file(), broken_file(), calzone_file()];
    let sequential = ProjectFactory::new(&AssemblyOptions::sequential())
        .unwrap()
        .create("pizzeria", files());
    let parallel = ProjectFactory::new(&AssemblyOptions::default())
        .unwrap()
        .create("pizzeria", files());

    assert_eq!(
        sequential.files.keys().collect::<Vec<_>>(),
        parallel.files.keys().collect::<Vec<_>>()
    );
    assert_eq!(
        format!("{:?}", sequential.namespaces),
        format!("{:?}", parallel.namespaces)
    );
    assert_eq!(parallel.errors.len(), 1);
}

#[test]
fn test_assembly_is_repeatable() {
    let factory = ProjectFactory::new(&AssemblyOptions::sequential()).unwrap();
    let first = factory.create_file(pizza_file()).unwrap();
    let second = factory.create_file(pizza_file()).unwrap();

    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}

#[test]
fn test_empty_batch() {
    let project = assemble(Vec::new());
    assert_eq!(project.name, "test");
    assert!(project.files.is_empty());
    assert!(project.namespaces.is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn test_project_serializes_to_json() {
    let project = assemble(vec![pizza_file(), broken_file()]);
    let json = project.to_json().unwrap();

    assert!(json.contains("\"\\\\Luigi\\\\Pizza\""));
    assert!(json.contains("src/Broken.php"));
}
