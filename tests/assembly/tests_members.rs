//! Class members: constants, properties, methods and promoted properties.

use reflect::model::{Class, DocBlock, Visibility};
use reflect::syntax::{
    ClassDecl, ClassMember, ConstDeclarator, Expr, MethodDecl, Modifiers, Param,
    PropertyDeclarator, PropertyGroup, SourceFile, Stmt,
};

use crate::helpers::model_assertions::{assemble_file, class, member_count};
use crate::helpers::source_fixtures::{
    class as class_decl, constants, doc, namespace, pizza_file, property, typed_param,
};

fn luigi_file(pizza: ClassDecl) -> SourceFile {
    SourceFile::new(
        "src/Pizza.php",
        vec![namespace("Luigi", vec![Stmt::Class(pizza)])],
    )
}

fn summary(docblock: Option<&DocBlock>) -> Option<&str> {
    docblock.map(|doc| doc.summary.as_str())
}

fn pizza_of(file: &reflect::File) -> &Class {
    class(file, "\\Luigi\\Pizza")
}

#[test]
fn test_class_header() {
    let file = assemble_file(pizza_file());
    let pizza = class(&file, "\\Luigi\\Pizza");

    assert_eq!(pizza.parent.as_ref().map(|p| p.as_str()), Some("\\Pizza"));
    assert_eq!(
        pizza.interfaces.iter().map(|i| i.as_str()).collect::<Vec<_>>(),
        vec!["\\Luigi\\Delivery"]
    );
    assert_eq!(pizza.docblock.as_ref().unwrap().summary, "A pizza.");
    assert_eq!(pizza.location.start_line, 5);
    assert_eq!(pizza.location.end_line, 15);
}

#[test]
fn test_constant_group_shares_docblock() {
    let file = assemble_file(pizza_file());
    let pizza = class(&file, "\\Luigi\\Pizza");

    for (fqsen, value) in [
        ("\\Luigi\\Pizza::DELIVERY", "'delivery'"),
        ("\\Luigi\\Pizza::PICKUP", "'pickup'"),
    ] {
        let constant = pizza
            .constant(fqsen)
            .unwrap_or_else(|| panic!("missing {fqsen}"));
        assert_eq!(constant.value.as_deref(), Some(value));
        assert_eq!(constant.visibility, Some(Visibility::Public));
        assert_eq!(
            constant.docblock.as_ref().unwrap().summary,
            "The delivery options"
        );
    }
}

#[test]
fn test_promoted_constructor_adds_property() {
    let file = assemble_file(pizza_file());
    let pizza = class(&file, "\\Luigi\\Pizza");

    let constructor = pizza.method("\\Luigi\\Pizza::__construct()").unwrap();
    let name = constructor.argument("name").unwrap();
    assert_eq!(name.ty.as_ref().unwrap().to_string(), "string");
    assert_eq!(
        constructor.argument("slices").unwrap().default.as_deref(),
        Some("8")
    );

    let promoted = pizza.property("\\Luigi\\Pizza::$name").unwrap();
    assert!(promoted.is_promoted);
    assert_eq!(promoted.visibility, Visibility::Public);
    assert_eq!(promoted.ty.as_ref().unwrap().to_string(), "string");

    // Only parameters with a visibility modifier are promoted.
    assert!(pizza.property("\\Luigi\\Pizza::$slices").is_none());
}

#[test]
fn test_plain_members() {
    let file = assemble_file(pizza_file());
    let pizza = class(&file, "\\Luigi\\Pizza");

    let size = pizza.property("\\Luigi\\Pizza::$size").unwrap();
    assert_eq!(size.visibility, Visibility::Private);
    assert_eq!(size.default.as_deref(), Some("'large'"));
    assert!(!size.is_promoted);

    let bake = pizza.method("\\Luigi\\Pizza::bake()").unwrap();
    let minutes = bake.argument("minutes").unwrap();
    assert_eq!(minutes.ty.as_ref().unwrap().to_string(), "?int");
    assert_eq!(minutes.default.as_deref(), Some("12"));
}

#[test]
fn test_every_declared_member_is_reachable() {
    let file = assemble_file(pizza_file());
    let pizza = class(&file, "\\Luigi\\Pizza");

    // 2 constants, $size, promoted $name, __construct and bake
    assert_eq!(member_count(pizza), 6);
    for key in pizza
        .constants
        .keys()
        .chain(pizza.properties.keys())
        .chain(pizza.methods.keys())
    {
        assert!(key.starts_with("\\Luigi\\Pizza::"), "{key}");
    }
}

#[test]
fn test_declarator_docblock_wins_over_group() {
    let topping = |name: &str, value: &str, own: Option<&str>| ConstDeclarator {
        docs: own.map(doc).unwrap_or_default(),
        ..ConstDeclarator::new(name, Expr::string(value))
    };
    let group = constants(
        "/** Toppings */",
        vec![
            topping("BASIL", "basil", Some("/** Fresh basil */")),
            topping("OLIVES", "olives", None),
        ],
    );
    let file = assemble_file(luigi_file(class_decl("Pizza", vec![group])));
    let pizza = pizza_of(&file);

    let basil = pizza.constant("\\Luigi\\Pizza::BASIL").unwrap();
    assert_eq!(summary(basil.docblock.as_ref()), Some("Fresh basil"));
    let olives = pizza.constant("\\Luigi\\Pizza::OLIVES").unwrap();
    assert_eq!(summary(olives.docblock.as_ref()), Some("Toppings"));
}

#[test]
fn test_property_group_docblock_precedence() {
    let group = ClassMember::Property(PropertyGroup {
        modifiers: Modifiers::protected(),
        properties: vec![
            PropertyDeclarator {
                docs: doc("/** Crust thickness */"),
                ..PropertyDeclarator::new("crust")
            },
            PropertyDeclarator::new("sauce"),
        ],
        docs: doc("/** Recipe */"),
        ..PropertyGroup::default()
    });
    let file = assemble_file(luigi_file(class_decl("Pizza", vec![group])));
    let pizza = pizza_of(&file);

    let crust = pizza.property("\\Luigi\\Pizza::$crust").unwrap();
    assert_eq!(summary(crust.docblock.as_ref()), Some("Crust thickness"));
    let sauce = pizza.property("\\Luigi\\Pizza::$sauce").unwrap();
    assert_eq!(summary(sauce.docblock.as_ref()), Some("Recipe"));
    assert_eq!(sauce.visibility, Visibility::Protected);
}

#[test]
fn test_readonly_class_makes_properties_readonly() {
    let constructor = ClassMember::Method(MethodDecl {
        name: "__construct".into(),
        modifiers: Modifiers::public(),
        params: vec![Param {
            modifiers: Modifiers::public(),
            ..typed_param("name", "string")
        }],
        body: Some(Vec::new()),
        ..MethodDecl::default()
    });
    let build = |readonly: bool| {
        let mut decl = class_decl(
            "Pizza",
            vec![
                property(Modifiers::public(), "size", None),
                constructor.clone(),
            ],
        );
        decl.modifiers.is_readonly = readonly;
        assemble_file(luigi_file(decl))
    };

    let file = build(true);
    let pizza = pizza_of(&file);
    assert!(pizza.is_readonly);
    assert!(pizza.property("\\Luigi\\Pizza::$size").unwrap().is_readonly);
    assert!(pizza.property("\\Luigi\\Pizza::$name").unwrap().is_readonly);

    let file = build(false);
    let pizza = pizza_of(&file);
    assert!(!pizza.property("\\Luigi\\Pizza::$size").unwrap().is_readonly);
    assert!(!pizza.property("\\Luigi\\Pizza::$name").unwrap().is_readonly);
}
