//! Syntax tree fixtures, shaped the way a parser adapter would hand them over.

use reflect::base::Location;
use reflect::syntax::{
    ClassConstGroup, ClassDecl, ClassMember, Comment, ConstDeclarator, Expr, MethodDecl,
    Modifiers, NamespaceBlock, Name, Param, PropertyDeclarator, PropertyGroup, SourceFile, Stmt,
    TypeHint,
};

pub fn doc(text: &str) -> Vec<Comment> {
    vec![Comment::new(text)]
}

pub fn at(line: usize) -> Location {
    Location::new(line, line)
}

pub fn namespace(name: &str, statements: Vec<Stmt>) -> Stmt {
    Stmt::Namespace(NamespaceBlock {
        name: Some(Name::new(name)),
        statements,
        ..NamespaceBlock::default()
    })
}

pub fn class(name: &str, members: Vec<ClassMember>) -> ClassDecl {
    ClassDecl {
        name: Some(name.into()),
        members,
        ..ClassDecl::default()
    }
}

pub fn method(name: &str, params: Vec<Param>) -> ClassMember {
    ClassMember::Method(MethodDecl {
        name: name.into(),
        modifiers: Modifiers::public(),
        params,
        body: Some(Vec::new()),
        ..MethodDecl::default()
    })
}

pub fn typed_param(name: &str, ty: &str) -> Param {
    Param {
        type_hint: Some(TypeHint::named(ty)),
        ..Param::new(name)
    }
}

pub fn property(modifiers: Modifiers, name: &str, default: Option<Expr>) -> ClassMember {
    ClassMember::Property(PropertyGroup {
        modifiers,
        properties: vec![PropertyDeclarator {
            default,
            ..PropertyDeclarator::new(name)
        }],
        ..PropertyGroup::default()
    })
}

pub fn constants(docs: &str, declarators: Vec<ConstDeclarator>) -> ClassMember {
    ClassMember::Constant(ClassConstGroup {
        modifiers: Modifiers::public(),
        constants: declarators,
        docs: doc(docs),
        ..ClassConstGroup::default()
    })
}

/// ```php
/// <?php
/// namespace Luigi;
///
/// /** A pizza. */
/// class Pizza extends \Pizza implements Delivery
/// {
///     /** The delivery options */
///     const DELIVERY = 'delivery', PICKUP = 'pickup';
///
///     private $size = 'large';
///
///     public function __construct(public string $name, int $slices = 8) {}
///
///     public function bake(?int $minutes = 12) {}
/// }
/// ```
pub fn pizza_file() -> SourceFile {
    let mut constructor = MethodDecl {
        name: "__construct".into(),
        modifiers: Modifiers::public(),
        body: Some(Vec::new()),
        location: at(12),
        ..MethodDecl::default()
    };
    constructor.params = vec![
        Param {
            modifiers: Modifiers::public(),
            ..typed_param("name", "string")
        },
        Param {
            default: Some(Expr::Int(8)),
            ..typed_param("slices", "int")
        },
    ];

    let mut minutes = Param::new("minutes");
    minutes.type_hint = Some(TypeHint::nullable(TypeHint::named("int")));
    minutes.default = Some(Expr::Int(12));

    let pizza = ClassDecl {
        extends: Some(Name::new("\\Pizza")),
        implements: vec![Name::new("Delivery")],
        docs: doc("/** A pizza. */"),
        location: Location::new(5, 15),
        ..class(
            "Pizza",
            vec![
                constants(
                    "/** The delivery options */",
                    vec![
                        ConstDeclarator::new("DELIVERY", Expr::string("delivery")),
                        ConstDeclarator::new("PICKUP", Expr::string("pickup")),
                    ],
                ),
                property(Modifiers::private(), "size", Some(Expr::string("large"))),
                ClassMember::Method(constructor),
                method("bake", vec![minutes]),
            ],
        )
    };

    SourceFile::new(
        "src/Pizza.php",
        vec![namespace("Luigi", vec![Stmt::Class(pizza)])],
    )
}
