//! Behavioral properties of accessor synthesis
//!
//! Each test drives the public pass API on a small unit and checks one property: accessor shape,
//! naming, ordering, isolation of failures, and the no-op cases.

use datagen::ast::{CompilationUnit, Member, Statement, TypeDecl, Visibility};
use datagen::synth::{ConflictPolicy, MarkerMatcher, SynthConfig, collect_tagged, expand_source, process_round};
use datagen_core::lang::conventions::titlecase;

fn parse(source: &str) -> CompilationUnit {
    datagen_syntax::parse_source(source).unwrap()
}

fn type_named<'u>(unit: &'u CompilationUnit, name: &str) -> &'u TypeDecl {
    unit.types().find(|t| t.name == name).unwrap()
}

fn member_names(decl: &TypeDecl) -> Vec<&str> {
    decl.members.iter().filter_map(|m| m.node.name()).collect()
}

#[test]
fn test_getter_and_setter_shape() {
    let expansion = expand_source("@Data class Person { name: String; }", &SynthConfig::default()).unwrap();
    let person = type_named(&expansion.unit, "Person");

    let getter = person.find_method("getName").unwrap();
    assert_eq!(getter.visibility, Visibility::Public);
    assert!(getter.params.is_empty());
    assert_eq!(getter.return_type.node.to_string(), "String");
    assert!(matches!(getter.body[0].node, Statement::Return(Some(_))));

    let setter = person.find_method("setName").unwrap();
    assert_eq!(setter.visibility, Visibility::Public);
    assert_eq!(setter.params.len(), 1);
    assert_eq!(setter.params[0].node.name, "name");
    assert_eq!(setter.params[0].node.ty.node.to_string(), "String");
    assert!(setter.return_type.node.is_void());
    assert!(matches!(setter.body[0].node, Statement::Assign(_)));
}

#[test]
fn test_titlecase_rule_in_accessor_names() {
    let expansion = expand_source("@Data class A { id: Int; URL: String; _name: String; }", &SynthConfig::default())
        .unwrap();
    let a = type_named(&expansion.unit, "A");
    for name in ["getId", "setId", "getURL", "setURL", "get_name", "set_name"] {
        assert!(a.find_method(name).is_some(), "missing {name}");
    }
    assert_eq!(titlecase("id"), "Id");
    assert_eq!(titlecase("URL"), "URL");
    assert_eq!(titlecase("_name"), "_name");
}

#[test]
fn test_accessors_follow_existing_members_in_field_order() {
    let source = "@Data class T { a: Int; b: Int; fn hello() {} c: Int; }";
    let expansion = expand_source(source, &SynthConfig::default()).unwrap();
    let t = type_named(&expansion.unit, "T");
    assert_eq!(
        member_names(t),
        vec!["a", "b", "hello", "c", "getA", "setA", "getB", "setB", "getC", "setC"]
    );
}

#[test]
fn test_unannotated_unit_is_unchanged() {
    let source = "class Plain { x: Int; fn f(): Int { return this.x; } }\nfn main() {}";
    let original = parse(source);
    let expansion = expand_source(source, &SynthConfig::default()).unwrap();
    assert_eq!(expansion.unit, original);
    assert_eq!(expansion.outcome.rounds, 0);
}

#[test]
fn test_single_round_is_idempotent() {
    let mut unit = parse("@Data class P { name: String; }");
    let config = SynthConfig::default();
    let tagged = collect_tagged(&unit, &MarkerMatcher::new(&config.marker));

    let mut diagnostics = Vec::new();
    let first = process_round(&mut unit, &tagged, &config, &mut diagnostics);
    let second = process_round(&mut unit, &tagged, &config, &mut diagnostics);

    assert_eq!(first.methods_added, 2);
    assert_eq!(second.methods_added, 0);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let p = type_named(&unit, "P");
    assert_eq!(p.methods().filter(|m| m.name == "getName").count(), 1);
    assert_eq!(p.methods().filter(|m| m.name == "setName").count(), 1);
}

#[test]
fn test_malformed_field_does_not_affect_other_types() {
    let source = "@Data class D1 { broken; ok: Int; } @Data class D2 { label: String; }";
    let expansion = expand_source(source, &SynthConfig::default()).unwrap();

    let errors: Vec<_> = expansion.diagnostics.iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].message.contains("broken"), "{}", errors[0].message);

    let d1 = type_named(&expansion.unit, "D1");
    assert!(d1.find_method("getBroken").is_none());
    assert!(d1.find_method("getOk").is_some());

    let d2 = type_named(&expansion.unit, "D2");
    assert!(d2.find_method("getLabel").is_some());
    assert!(d2.find_method("setLabel").is_some());
}

#[test]
fn test_person_example() {
    let source = "@Data class Person { name: String; age: Int; }";
    let expansion = expand_source(source, &SynthConfig::default()).unwrap();
    let person = type_named(&expansion.unit, "Person");

    let added: Vec<String> = person
        .members
        .iter()
        .filter_map(|m| match &m.node {
            Member::Method(method) => Some(format!(
                "{}({}): {}",
                method.name,
                method
                    .params
                    .iter()
                    .map(|p| format!("{} {}", p.node.ty.node, p.node.name))
                    .collect::<Vec<_>>()
                    .join(", "),
                method.return_type.node
            )),
            _ => None,
        })
        .collect();
    insta::assert_debug_snapshot!(added, @r#"
    [
        "getName(): String",
        "setName(String name): void",
        "getAge(): Int",
        "setAge(Int age): void",
    ]
    "#);
}

#[test]
fn test_conflicting_handwritten_accessor_is_an_error_by_default() {
    let source = "@Data class C { value: Int; fn getValue(): Int { return 0; } }";
    let expansion = expand_source(source, &SynthConfig::default()).unwrap();
    assert!(expansion.has_errors());

    let c = type_named(&expansion.unit, "C");
    assert!(c.find_method("setValue").is_none());
    assert_eq!(c.methods().filter(|m| m.name == "getValue").count(), 1);
}

#[test]
fn test_conflicting_handwritten_accessor_skip_policy() {
    let source = "@Data class C { value: Int; fn getValue(): Int { return 0; } }";
    let config = SynthConfig::new().with_conflict_policy(ConflictPolicy::Skip);
    let expansion = expand_source(source, &config).unwrap();
    assert!(!expansion.has_errors(), "{:?}", expansion.diagnostics);
    assert_eq!(expansion.outcome.methods_added, 1);

    let c = type_named(&expansion.unit, "C");
    assert!(c.find_method("setValue").is_some());
}

#[test]
fn test_fixpoint_rerun_is_noop() {
    let config = SynthConfig::default();
    let first = expand_source("@Data class A { x: Int; @Data class B { y: Int; } }", &config).unwrap();

    let mut unit = first.unit.clone();
    let mut diagnostics = Vec::new();
    let rerun = datagen::synth::run_to_fixpoint(&mut unit, &config, &mut diagnostics);
    assert_eq!(rerun.methods_added, 0);
    assert_eq!(unit, first.unit);
}
