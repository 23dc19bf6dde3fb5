//! Top-level declarations and the file docblock.

use reflect::syntax::{
    Arg, BinaryOp, ClassDecl, ClassMember, Comment, ConstDeclarator, ConstGroup, EnumCaseDecl,
    EnumDecl, Expr, ExpressionStmt, FunctionDecl, IfStmt, InterfaceDecl, Name, OtherStmt,
    SourceFile, Stmt, TraitDecl, TraitUse, TypeHint, UnaryOp,
};
use reflect::{AssemblyOptions, ProjectFactory};
use rstest::rstest;

use crate::helpers::model_assertions::{assemble_file, class};
use crate::helpers::source_fixtures::{class as class_decl, constants, doc, namespace};

fn function(name: &str) -> Stmt {
    Stmt::Function(FunctionDecl {
        name: name.into(),
        ..FunctionDecl::default()
    })
}

#[rstest]
#[case::package_tag("/** @package Luigi */", true)]
#[case::plain_declaration_doc("/** The pizza. */", false)]
fn test_file_docblock_on_declaration(#[case] text: &str, #[case] owned_by_file: bool) {
    let decl = ClassDecl {
        docs: doc(text),
        ..class_decl("Pizza", vec![])
    };
    let file = assemble_file(SourceFile::new("a.php", vec![Stmt::Class(decl)]));

    assert_eq!(file.docblock.is_some(), owned_by_file);
    // The class keeps its docblock either way.
    assert!(class(&file, "\\Pizza").docblock.is_some());
}

#[test]
fn test_file_docblock_before_non_declaration() {
    let stmt = Stmt::Other(OtherStmt {
        docs: doc("/** Bootstrap. */"),
        ..OtherStmt::default()
    });
    let file = assemble_file(SourceFile::new("boot.php", vec![stmt, function("boot")]));
    assert_eq!(file.docblock.unwrap().summary, "Bootstrap.");
}

#[test]
fn test_file_docblock_with_two_docblocks() {
    let mut decl = class_decl("Pizza", vec![]);
    decl.docs = vec![
        Comment::new("/** File header. */"),
        Comment::new("/** The pizza. */"),
    ];
    let file = assemble_file(SourceFile::new("a.php", vec![Stmt::Class(decl)]));

    assert_eq!(file.docblock.as_ref().unwrap().summary, "File header.");
    assert_eq!(
        class(&file, "\\Pizza").docblock.as_ref().unwrap().summary,
        "The pizza."
    );
}

#[test]
fn test_namespaces_list_their_elements() {
    let file = assemble_file(SourceFile::new(
        "multi.php",
        vec![
            namespace("Luigi", vec![Stmt::Class(class_decl("Pizza", vec![]))]),
            namespace("Mario", vec![function("bake")]),
        ],
    ));

    let luigi = &file.namespaces["\\Luigi"];
    assert_eq!(luigi.classes[0].as_str(), "\\Luigi\\Pizza");
    let mario = &file.namespaces["\\Mario"];
    assert_eq!(mario.functions[0].as_str(), "\\Mario\\bake()");
    assert!(file.function("\\Mario\\bake()").is_some());
}

#[test]
fn test_enum_cases_and_backing_type() {
    let case = |name: &str, value: &str| {
        ClassMember::EnumCase(EnumCaseDecl {
            name: name.into(),
            value: Some(Expr::string(value)),
            ..EnumCaseDecl::default()
        })
    };
    let size = EnumDecl {
        name: "Size".into(),
        backing_type: Some(TypeHint::named("string")),
        implements: vec![Name::new("HasLabel")],
        members: vec![
            case("Small", "S"),
            case("Large", "L"),
            constants(
                "/** Default size */",
                vec![ConstDeclarator::new(
                    "DEFAULT",
                    Expr::ClassConstFetch {
                        class: Name::new("self"),
                        constant: "Small".into(),
                    },
                )],
            ),
        ],
        ..EnumDecl::default()
    };
    let file = assemble_file(SourceFile::new(
        "size.php",
        vec![namespace("Luigi", vec![Stmt::Enum(size)])],
    ));

    let size = &file.enums["\\Luigi\\Size"];
    assert_eq!(size.backing_type.as_ref().unwrap().to_string(), "string");
    assert_eq!(size.interfaces[0].as_str(), "\\Luigi\\HasLabel");
    assert_eq!(
        size.cases.keys().collect::<Vec<_>>(),
        vec!["\\Luigi\\Size::Small", "\\Luigi\\Size::Large"]
    );
    assert_eq!(
        size.cases["\\Luigi\\Size::Large"].value.as_deref(),
        Some("'L'")
    );
    // Not statically evaluable: kept as written.
    assert_eq!(
        size.constants["\\Luigi\\Size::DEFAULT"].value.as_deref(),
        Some("self::Small")
    );
}

#[test]
fn test_interface_and_trait() {
    let interface = InterfaceDecl {
        name: "Delivery".into(),
        extends: vec![Name::new("\\Countable"), Name::new("Tracked")],
        ..InterfaceDecl::default()
    };
    let cheesy = TraitDecl {
        name: "Cheesy".into(),
        ..TraitDecl::default()
    };
    let pizza = class_decl(
        "Pizza",
        vec![ClassMember::TraitUse(TraitUse {
            traits: vec![Name::new("Cheesy")],
            ..TraitUse::default()
        })],
    );
    let file = assemble_file(SourceFile::new(
        "luigi.php",
        vec![namespace(
            "Luigi",
            vec![
                Stmt::Interface(interface),
                Stmt::Trait(cheesy),
                Stmt::Class(pizza),
            ],
        )],
    ));

    let delivery = &file.interfaces["\\Luigi\\Delivery"];
    assert_eq!(
        delivery.parents.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["\\Countable", "\\Luigi\\Tracked"]
    );
    assert!(file.traits.contains_key("\\Luigi\\Cheesy"));
    assert_eq!(
        class(&file, "\\Luigi\\Pizza").used_traits[0].as_str(),
        "\\Luigi\\Cheesy"
    );
}

#[test]
fn test_define_is_global() {
    let define = Stmt::Expression(ExpressionStmt {
        expr: Expr::call("define", vec![Expr::string("LUIGI_VERSION"), Expr::string("1.0")]),
        ..ExpressionStmt::default()
    });
    let other_call = Stmt::Expression(ExpressionStmt {
        expr: Expr::call("printf", vec![Expr::string("hi")]),
        ..ExpressionStmt::default()
    });
    let file = assemble_file(SourceFile::new(
        "version.php",
        vec![namespace("Luigi", vec![define, other_call])],
    ));

    let constant = file.constant("\\LUIGI_VERSION").unwrap();
    assert_eq!(constant.value.as_deref(), Some("'1.0'"));
    assert_eq!(file.constants.len(), 1);
    assert_eq!(file.namespaces["\\"].constants[0].as_str(), "\\LUIGI_VERSION");
}

#[test]
fn test_conditional_declarations_are_reflected() {
    let guarded = Stmt::If(IfStmt {
        condition: Expr::Unary {
            op: UnaryOp::Not,
            expr: Box::new(Expr::Call {
                name: Name::new("function_exists"),
                args: vec![Arg::positional(Expr::string("bake"))],
            }),
        },
        then_branch: vec![function("bake")],
        otherwise: Some(vec![function("reheat")]),
        ..IfStmt::default()
    });
    let file = assemble_file(SourceFile::new("compat.php", vec![guarded]));

    assert!(file.function("\\bake()").is_some());
    assert!(file.function("\\reheat()").is_some());
}

#[rstest]
#[case::evaluated(true, "8")]
#[case::as_written(false, "4 * 2")]
fn test_constant_evaluation_option(#[case] evaluate: bool, #[case] expected: &str) {
    let slices = Stmt::Const(ConstGroup {
        constants: vec![ConstDeclarator::new(
            "SLICES",
            Expr::Binary {
                op: BinaryOp::Mul,
                left: Box::new(Expr::Int(4)),
                right: Box::new(Expr::Int(2)),
            },
        )],
        ..ConstGroup::default()
    });
    let options = AssemblyOptions {
        evaluate_constants: evaluate,
        ..AssemblyOptions::sequential()
    };
    let file = ProjectFactory::new(&options)
        .unwrap()
        .create_file(SourceFile::new("slices.php", vec![slices]))
        .unwrap();

    assert_eq!(
        file.constant("\\SLICES").unwrap().value.as_deref(),
        Some(expected)
    );
}

#[test]
fn test_members_of_unknown_statements_are_ignored() {
    let file = assemble_file(SourceFile::new(
        "noise.php",
        vec![Stmt::Other(OtherStmt::default()), function("bake")],
    ));
    assert_eq!(file.functions.len(), 1);
    assert!(matches!(
        file.namespaces["\\"].functions.as_slice(),
        [fqsen] if fqsen.as_str() == "\\bake()"
    ));
}
