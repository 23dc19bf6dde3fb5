use super::*;
use crate::syntax::{Name, Stmt, UseItem, UseKind, UseStmt};
use rstest::rstest;

fn luigi() -> TypeContext {
    let uses = vec![
        Stmt::Use(UseStmt {
            kind: UseKind::Class,
            items: vec![
                UseItem {
                    name: Name::new("Kitchen\\Appliances\\Oven"),
                    alias: None,
                },
                UseItem {
                    name: Name::new("\\Kitchen\\Staff"),
                    alias: Some("Crew".into()),
                },
            ],
            ..Default::default()
        }),
        Stmt::Use(UseStmt {
            kind: UseKind::Function,
            items: vec![UseItem {
                name: Name::new("Kitchen\\heat"),
                alias: None,
            }],
            ..Default::default()
        }),
        Stmt::Use(UseStmt {
            kind: UseKind::Constant,
            items: vec![UseItem {
                name: Name::new("Kitchen\\MAX_HEAT"),
                alias: None,
            }],
            ..Default::default()
        }),
    ];
    TypeContext::from_statements(Some(&Name::new("Luigi")), &uses)
}

#[rstest]
#[case("Pizza", "\\Luigi\\Pizza")]
#[case("\\Pizza", "\\Pizza")]
#[case("Oven", "\\Kitchen\\Appliances\\Oven")]
#[case("oven", "\\Kitchen\\Appliances\\Oven")]
#[case("Crew\\Chef", "\\Kitchen\\Staff\\Chef")]
#[case("Menu\\Item", "\\Luigi\\Menu\\Item")]
#[case("namespace\\Menu", "\\Luigi\\Menu")]
fn test_resolve_class(#[case] written: &str, #[case] expected: &str) {
    let fqsen = luigi().resolve_class(&Name::new(written)).unwrap();
    assert_eq!(fqsen.as_str(), expected);
}

#[test]
fn test_resolve_function_and_constant() {
    let context = luigi();
    assert_eq!(
        context.resolve_function(&Name::new("heat")).unwrap().as_str(),
        "\\Kitchen\\heat()"
    );
    assert_eq!(
        context.resolve_function(&Name::new("knead")).unwrap().as_str(),
        "\\Luigi\\knead()"
    );
    assert_eq!(
        context.resolve_constant(&Name::new("MAX_HEAT")).unwrap().as_str(),
        "\\Kitchen\\MAX_HEAT"
    );
    assert_eq!(
        context.resolve_constant(&Name::new("max_heat")).unwrap().as_str(),
        "\\Luigi\\max_heat"
    );
}

#[test]
fn test_global_context() {
    let context = TypeContext::global();
    assert_eq!(context.namespace(), "");
    assert!(context.namespace_fqsen().unwrap().is_root());
    assert_eq!(
        context.resolve_class(&Name::new("Pizza")).unwrap().as_str(),
        "\\Pizza"
    );
}

#[test]
fn test_namespace_fqsen() {
    assert_eq!(
        luigi().namespace_fqsen().unwrap().as_str(),
        "\\Luigi"
    );
    assert_eq!(
        TypeContext::new("\\Deep\\Ns\\").namespace(),
        "Deep\\Ns"
    );
}
