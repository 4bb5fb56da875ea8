use super::*;
use crate::member::{FunctionDecl, Member, MemberTable, Param};

fn decl(names: &[&str]) -> FunctionDecl {
    FunctionDecl::new().with_positional(names.iter().map(|n| Param::required(*n)).collect())
}

#[test]
fn test_plain_function_is_instance_kind() {
    let shape = shape_of(&Member::function(decl(&["a", "b"]))).unwrap();
    assert_eq!(shape.kind, CallKind::Instance);
    assert_eq!(shape.positional.len(), 2);
    assert!(!shape.is_async);
}

#[test]
fn test_static_wrapper_decides_kind() {
    let shape = shape_of(&Member::static_method(decl(&["x"]))).unwrap();
    assert_eq!(shape.kind, CallKind::Static);
}

#[test]
fn test_class_and_property_wrappers() {
    let class = shape_of(&Member::class_method(decl(&["x"]))).unwrap();
    assert_eq!(class.kind, CallKind::Class);

    let prop = shape_of(&Member::property(decl(&[]))).unwrap();
    assert_eq!(prop.kind, CallKind::Property);
}

#[test]
fn test_default_is_shaped_through_its_implementation() {
    let shape = shape_of(&Member::default_method(decl(&["a"]))).unwrap();
    assert_eq!(shape.kind, CallKind::Instance);

    // A default wrapping a static member still yields a static shape.
    let shape = shape_of(&Member::default_of(Member::static_method(decl(&["a"])))).unwrap();
    assert_eq!(shape.kind, CallKind::Static);
}

#[test]
fn test_nested_defaults_unwrap_recursively() {
    let nested = Member::default_of(Member::default_method(decl(&["a", "b"])));
    let shape = shape_of(&nested).unwrap();
    assert_eq!(shape.kind, CallKind::Instance);
    assert_eq!(shape.positional.len(), 2);
}

#[test]
fn test_data_member_is_unshapeable() {
    let err = shape_of(&Member::Data("int".to_string())).unwrap_err();
    match err {
        ShapeError::Unshapeable { actual, .. } => assert_eq!(actual, "int data field"),
        other => panic!("expected Unshapeable, got {other:?}"),
    }
}

#[test]
fn test_wrapper_bottoming_out_in_data_is_unshapeable() {
    let member = Member::Static(Box::new(Member::Data("str".to_string())));
    assert!(matches!(
        shape_of(&member),
        Err(ShapeError::Unshapeable { .. })
    ));
}

#[test]
fn test_alias_resolves_through_table() {
    let mut table = MemberTable::new();
    table.insert("real", Member::static_method(decl(&["x"])));
    table.insert("forward", Member::Alias("real".to_string()));

    let shape = table.shape_of("forward").unwrap();
    assert_eq!(shape.kind, CallKind::Static);
}

#[test]
fn test_alias_chain_resolves() {
    let mut table = MemberTable::new();
    table.insert("real", Member::function(decl(&["x"])));
    table.insert("hop", Member::Alias("real".to_string()));
    table.insert("entry", Member::Alias("hop".to_string()));

    let shape = table.shape_of("entry").unwrap();
    assert_eq!(shape.kind, CallKind::Instance);
    assert_eq!(shape.positional[0].name, "x");
}

#[test]
fn test_alias_cycle_is_detected() {
    let mut table = MemberTable::new();
    table.insert("a", Member::Alias("b".to_string()));
    table.insert("b", Member::Alias("a".to_string()));

    let err = table.shape_of("a").unwrap_err();
    match err {
        ShapeError::CyclicWrapper { name, chain } => {
            assert_eq!(name, "a");
            assert_eq!(chain, vec!["a", "b", "a"]);
        }
        other => panic!("expected CyclicWrapper, got {other:?}"),
    }
}

#[test]
fn test_self_alias_is_a_cycle() {
    let mut table = MemberTable::new();
    table.insert("me", Member::Alias("me".to_string()));
    assert!(matches!(
        table.shape_of("me"),
        Err(ShapeError::CyclicWrapper { .. })
    ));
}

#[test]
fn test_alias_to_unknown_member() {
    let mut table = MemberTable::new();
    table.insert("entry", Member::Alias("ghost".to_string()));
    assert!(matches!(
        table.shape_of("entry"),
        Err(ShapeError::MissingAliasTarget { .. })
    ));
}

#[test]
fn test_standalone_alias_is_unresolvable() {
    assert!(matches!(
        shape_of(&Member::Alias("elsewhere".to_string())),
        Err(ShapeError::UnresolvedAlias { .. })
    ));
}

#[test]
fn test_missing_name_in_table() {
    let table = MemberTable::new();
    assert!(matches!(
        table.shape_of("nope"),
        Err(ShapeError::NotFound(_))
    ));
}

#[test]
fn test_subkind_relation_is_reflexive_only() {
    for kind in [
        CallKind::Instance,
        CallKind::Static,
        CallKind::Class,
        CallKind::Property,
    ] {
        assert!(kind.is_subkind_of(kind));
    }
    assert!(!CallKind::Instance.is_subkind_of(CallKind::Static));
    assert!(!CallKind::Static.is_subkind_of(CallKind::Instance));
    assert!(!CallKind::Class.is_subkind_of(CallKind::Instance));
    assert!(!CallKind::Instance.is_subkind_of(CallKind::Property));
}

#[test]
fn test_display_renders_positional_and_keyword_only() {
    let shape = CallableShape::from_decl(
        CallKind::Instance,
        &FunctionDecl::new()
            .with_positional(vec![
                Param::required("a"),
                Param::defaulted("b"),
                Param::required("c").with_tag("Animal"),
            ])
            .with_keyword_only(vec![Param::defaulted("z"), Param::required("k")])
            .returning("Cat"),
    );
    assert_eq!(shape.to_string(), "(a, b=..., c: Animal, *, k, z=...) -> Cat");
}

#[test]
fn test_display_empty_and_async() {
    let empty = CallableShape::from_decl(CallKind::Instance, &FunctionDecl::new());
    assert_eq!(empty.to_string(), "()");

    let looped = CallableShape::from_decl(
        CallKind::Instance,
        &FunctionDecl::new()
            .with_positional(vec![Param::required("a")])
            .asynchronous(),
    );
    assert_eq!(looped.to_string(), "async (a)");
}

#[test]
fn test_display_keyword_only_without_positionals() {
    let shape = CallableShape::from_decl(
        CallKind::Instance,
        &FunctionDecl::new().with_keyword_only(vec![Param::required("k")]),
    );
    assert_eq!(shape.to_string(), "(*, k)");
}
