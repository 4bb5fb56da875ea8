use super::*;
use tenon_core::member::{FunctionDecl, Param};
use tenon_core::shape::CallableShape;

fn shape(positional: &[Param]) -> CallableShape {
    CallableShape::from_decl(
        CallKind::Instance,
        &FunctionDecl::new().with_positional(positional.to_vec()),
    )
}

fn shape_kw(positional: &[Param], keyword_only: &[Param]) -> CallableShape {
    CallableShape::from_decl(
        CallKind::Instance,
        &FunctionDecl::new()
            .with_positional(positional.to_vec())
            .with_keyword_only(keyword_only.to_vec()),
    )
}

fn req(name: &str) -> Param {
    Param::required(name)
}

fn opt(name: &str) -> Param {
    Param::defaulted(name)
}

fn animal_tags() -> TagHierarchy {
    let mut tags = TagHierarchy::new();
    tags.register("Cat", "Feline").unwrap();
    tags.register("Feline", "Animal").unwrap();
    tags
}

#[test]
fn test_asymmetry_of_added_defaulted_positional() {
    let tags = TagHierarchy::new();
    let iface = shape(&[req("a"), req("b"), req("c")]);
    let imp = shape(&[req("a"), req("b"), req("c"), opt("d")]);
    assert!(compatible(&imp, &iface, &tags));
    assert!(!compatible(&iface, &imp, &tags));
}

#[test]
fn test_reflexivity() {
    let tags = animal_tags();
    let shapes = [
        shape(&[]),
        shape(&[req("a"), opt("b")]),
        shape_kw(&[req("a")], &[req("k"), opt("z")]),
        CallableShape::from_decl(
            CallKind::Static,
            &FunctionDecl::new()
                .with_positional(vec![req("x").with_tag("Cat")])
                .returning("Animal")
                .asynchronous(),
        ),
    ];
    for s in &shapes {
        assert!(compatible(s, s, &tags), "shape {s} must satisfy itself");
    }
}

#[test]
fn test_positional_rigidity_dropped_param() {
    let tags = TagHierarchy::new();
    let iface = shape(&[req("a"), req("b")]);
    let imp = shape(&[req("a")]);
    assert!(!compatible(&imp, &iface, &tags));
    assert!(!compatible(&iface, &imp, &tags));
}

#[test]
fn test_positional_rigidity_reordered() {
    let tags = TagHierarchy::new();
    let iface = shape(&[req("a"), req("b")]);
    let imp = shape(&[req("b"), req("a")]);
    assert!(!compatible(&imp, &iface, &tags));
    assert!(!compatible(&iface, &imp, &tags));
}

#[test]
fn test_keyword_only_reordering_is_free() {
    let tags = TagHierarchy::new();
    let iface = shape_kw(&[req("a"), req("b"), req("c")], &[req("d"), req("e"), req("f")]);
    let imp = shape_kw(&[req("a"), req("b"), req("c")], &[req("f"), req("d"), req("e")]);
    assert!(compatible(&imp, &iface, &tags));
    assert!(compatible(&iface, &imp, &tags));
}

#[test]
fn test_default_widening_only() {
    let tags = TagHierarchy::new();
    // The interface's default-ness is a floor: dropping it is incompatible.
    let iface = shape(&[req("a"), opt("b")]);
    let imp = shape(&[req("a"), req("b")]);
    assert!(!compatible(&imp, &iface, &tags));
    // And an implementation may not invent a default the interface lacks.
    assert!(!compatible(&iface, &imp, &tags));
}

#[test]
fn test_added_keyword_only_must_be_defaulted() {
    let tags = TagHierarchy::new();
    let iface = shape_kw(&[], &[req("k")]);
    let with_defaulted = shape_kw(&[], &[req("k"), opt("extra")]);
    let with_required = shape_kw(&[], &[req("k"), req("extra")]);
    assert!(compatible(&with_defaulted, &iface, &tags));
    assert!(!compatible(&with_required, &iface, &tags));
}

#[test]
fn test_dropped_keyword_only() {
    let tags = TagHierarchy::new();
    let iface = shape_kw(&[], &[req("k"), req("j")]);
    let imp = shape_kw(&[], &[req("k")]);
    assert!(!compatible(&imp, &iface, &tags));
}

#[test]
fn test_kind_mismatch_is_absolute() {
    let tags = TagHierarchy::new();
    let decl = FunctionDecl::new().with_positional(vec![req("x")]);
    let instance = CallableShape::from_decl(CallKind::Instance, &decl);
    let static_ = CallableShape::from_decl(CallKind::Static, &decl);
    let class = CallableShape::from_decl(CallKind::Class, &decl);

    assert!(!compatible(&static_, &instance, &tags));
    assert!(!compatible(&instance, &static_, &tags));
    assert!(!compatible(&class, &instance, &tags));

    let diffs = diff(&static_, &instance, &tags, false);
    assert_eq!(
        diffs,
        vec![SignatureDiff::KindMismatch {
            expected: CallKind::Instance,
            actual: CallKind::Static,
        }]
    );
}

#[test]
fn test_async_never_matches_sync() {
    let tags = TagHierarchy::new();
    let sync = shape(&[req("a")]);
    let asynced = CallableShape::from_decl(
        CallKind::Instance,
        &FunctionDecl::new()
            .with_positional(vec![req("a")])
            .asynchronous(),
    );
    assert!(!compatible(&asynced, &sync, &tags));
    assert!(!compatible(&sync, &asynced, &tags));
}

#[test]
fn test_parameter_contravariance() {
    let tags = animal_tags();
    let iface = shape(&[req("x").with_tag("Feline")]);
    let widened = shape(&[req("x").with_tag("Animal")]);
    let narrowed = shape(&[req("x").with_tag("Cat")]);
    let exact = shape(&[req("x").with_tag("Feline")]);

    assert!(compatible(&widened, &iface, &tags));
    assert!(compatible(&exact, &iface, &tags));
    assert!(!compatible(&narrowed, &iface, &tags));
}

#[test]
fn test_return_covariance() {
    let tags = animal_tags();
    let mk = |ret: &str| {
        CallableShape::from_decl(CallKind::Instance, &FunctionDecl::new().returning(ret))
    };
    let iface = mk("Feline");
    assert!(compatible(&mk("Cat"), &iface, &tags));
    assert!(compatible(&mk("Feline"), &iface, &tags));
    assert!(!compatible(&mk("Animal"), &iface, &tags));
}

#[test]
fn test_keyword_only_contravariance() {
    let tags = animal_tags();
    let iface = shape_kw(&[], &[req("k").with_tag("Feline")]);
    let widened = shape_kw(&[], &[req("k").with_tag("Animal")]);
    let narrowed = shape_kw(&[], &[req("k").with_tag("Cat")]);
    assert!(compatible(&widened, &iface, &tags));
    assert!(!compatible(&narrowed, &iface, &tags));
}

#[test]
fn test_partial_annotations_ignored_by_default() {
    let tags = TagHierarchy::new();
    let iface = shape(&[req("x").with_tag("Animal")]);
    let untagged = shape(&[req("x")]);
    assert!(compatible(&untagged, &iface, &tags));
    assert!(compatible(&iface, &untagged, &tags));

    let half_return = CallableShape::from_decl(CallKind::Instance, &FunctionDecl::new().returning("Animal"));
    let no_return = CallableShape::from_decl(CallKind::Instance, &FunctionDecl::new());
    assert!(compatible(&half_return, &no_return, &tags));
}

#[test]
fn test_partial_annotations_enforced_when_configured() {
    let tags = TagHierarchy::new();
    let iface = shape(&[req("x").with_tag("Animal")]);
    let untagged = shape(&[req("x")]);
    let diffs = diff(&untagged, &iface, &tags, true);
    assert_eq!(
        diffs,
        vec![SignatureDiff::AnnotationAsymmetry {
            slot: "x".to_string()
        }]
    );

    let half_return =
        CallableShape::from_decl(CallKind::Instance, &FunctionDecl::new().returning("Animal"));
    let no_return = CallableShape::from_decl(CallKind::Instance, &FunctionDecl::new());
    let diffs = diff(&half_return, &no_return, &tags, true);
    assert_eq!(
        diffs,
        vec![SignatureDiff::AnnotationAsymmetry {
            slot: "return".to_string()
        }]
    );
}

#[test]
fn test_single_violation_fails_whole_comparison() {
    let tags = TagHierarchy::new();
    // Everything matches except one renamed positional.
    let iface = shape_kw(&[req("a"), req("b")], &[opt("k")]);
    let imp = shape_kw(&[req("a"), req("z")], &[opt("k")]);
    let diffs = diff(&imp, &iface, &tags, false);
    assert_eq!(diffs.len(), 1);
    assert!(!compatible(&imp, &iface, &tags));
}

#[test]
fn test_diff_renders_readable_messages() {
    let tags = TagHierarchy::new();
    let iface = shape(&[req("a"), req("b")]);
    let imp = shape(&[req("a")]);
    let rendered: Vec<String> = diff(&imp, &iface, &tags, false)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        rendered,
        vec!["required parameter `b` is not accepted by the implementation"]
    );
}
