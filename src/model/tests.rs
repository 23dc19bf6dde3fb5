use super::*;
use crate::base::{Fqsen, Location, ReflectionError};

fn fqsen(s: &str) -> Fqsen {
    Fqsen::new(s).unwrap()
}

#[test]
fn test_add_member_keys_by_identifier() {
    let mut pizza = Element::Class(Class::new(fqsen("\\Luigi\\Pizza"), Location::new(3, 20)));
    pizza
        .add_member(Element::Constant(Constant::new(
            fqsen("\\Luigi\\Pizza::DELIVERY"),
            Location::default(),
        )))
        .unwrap();
    pizza
        .add_member(Element::Property(Property::new(
            fqsen("\\Luigi\\Pizza::$name"),
            Location::default(),
        )))
        .unwrap();

    let Element::Class(pizza) = pizza else {
        panic!("expected class");
    };
    assert!(pizza.constant("\\Luigi\\Pizza::DELIVERY").is_some());
    assert!(pizza.property("\\Luigi\\Pizza::$name").is_some());
    assert!(pizza.methods.is_empty());
}

#[test]
fn test_add_member_rejects_wrong_parent() {
    let mut interface = Element::Interface(Interface::new(fqsen("\\Menu"), Location::default()));
    let err = interface
        .add_member(Element::Property(Property::new(
            fqsen("\\Menu::$items"),
            Location::default(),
        )))
        .unwrap_err();
    assert!(matches!(
        err,
        ReflectionError::UnexpectedParent {
            parent: "interface",
            child: "property"
        }
    ));
}

#[test]
fn test_interface_references_land_by_kind() {
    let mut class = Element::Class(Class::new(fqsen("\\Pizza"), Location::default()));
    class.add_interface(fqsen("\\Edible")).unwrap();
    let mut interface = Element::Interface(Interface::new(fqsen("\\Edible"), Location::default()));
    interface.add_interface(fqsen("\\Food")).unwrap();

    let (Element::Class(class), Element::Interface(interface)) = (class, interface) else {
        panic!("unexpected kinds");
    };
    assert_eq!(class.interfaces, vec![fqsen("\\Edible")]);
    assert_eq!(interface.parents, vec![fqsen("\\Food")]);
}

#[test]
fn test_file_lists_elements_under_namespace() {
    let mut file = File::new("src/Pizza.php");
    file.add_element(Element::Class(Class::new(fqsen("\\Luigi\\Pizza"), Location::default())))
        .unwrap();
    file.add_element(Element::Function(Function::new(
        fqsen("\\Luigi\\order()"),
        Location::default(),
    )))
    .unwrap();
    file.add_element(Element::Constant(Constant::new(fqsen("\\VERSION"), Location::default())))
        .unwrap();

    let luigi = &file.namespaces["\\Luigi"];
    assert_eq!(luigi.classes, vec![fqsen("\\Luigi\\Pizza")]);
    assert_eq!(luigi.functions, vec![fqsen("\\Luigi\\order()")]);
    assert_eq!(file.namespaces["\\"].constants, vec![fqsen("\\VERSION")]);
    assert!(file.class("\\Luigi\\Pizza").is_some());
}

#[test]
fn test_file_rejects_members() {
    let mut file = File::new("a.php");
    let err = file
        .add_element(Element::Method(Method::new(
            fqsen("\\A::run()"),
            Location::default(),
        )))
        .unwrap_err();
    assert!(matches!(err, ReflectionError::UnexpectedParent { .. }));
    assert!(file.namespaces.is_empty());
}

#[test]
fn test_namespace_merge_keeps_first_seen_order() {
    let mut left = Namespace::new(fqsen("\\Luigi"));
    left.classes.push(fqsen("\\Luigi\\Pizza"));
    let mut right = Namespace::new(fqsen("\\Luigi"));
    right.classes.push(fqsen("\\Luigi\\Pasta"));
    right.classes.push(fqsen("\\Luigi\\Pizza"));

    left.merge(&right);
    assert_eq!(
        left.classes,
        vec![fqsen("\\Luigi\\Pizza"), fqsen("\\Luigi\\Pasta")]
    );
    assert_eq!(left.len(), 2);
}
