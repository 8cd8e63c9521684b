//! Rust lowering tests
//!
//! These expand a source text, emit Rust with [`RustEmitter`] and check the result. Signatures
//! are snapshotted as extracted lines so that the check does not depend on how `prettyplease`
//! spaces items.
//!
//! Review changes: `cargo insta review`

use datagen::backend::{EmitError, RustEmitter};
use datagen::synth::{SynthConfig, expand_source};

fn emit(source: &str) -> String {
    let expansion = expand_source(source, &SynthConfig::default()).expect("parse failed");
    assert!(!expansion.has_errors(), "{:?}", expansion.diagnostics);
    RustEmitter::new()
        .without_header()
        .without_lint_allows()
        .emit(&expansion.unit)
        .expect("emit failed")
}

fn emit_err(source: &str) -> EmitError {
    let expansion = expand_source(source, &SynthConfig::default()).expect("parse failed");
    RustEmitter::new().emit(&expansion.unit).unwrap_err()
}

/// Trimmed lines that start a function.
fn signatures(rust: &str) -> String {
    rust.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("pub fn") || line.starts_with("fn"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_person_accessors() {
    let rust = emit("@Data\nclass Person {\n    name: String;\n    age: Int;\n}\n");

    assert!(rust.contains("pub fn getName(&self) -> String"), "{rust}");
    assert!(rust.contains("pub fn setName(&mut self, name: String)"), "{rust}");
    assert!(rust.contains("self.name.clone()"), "{rust}");
    assert!(!rust.contains("Data"), "marker leaked into output:\n{rust}");
    insta::assert_snapshot!(signatures(&rust), @r"
    pub fn getName(&self) -> String {
    pub fn setName(&mut self, name: String) {
    pub fn getAge(&self) -> i64 {
    pub fn setAge(&mut self, age: i64) {
    ");
}

#[test]
fn test_struct_derives_default_without_field_defaults() {
    let rust = emit("class Point { x: Float; y: Float; }");
    assert!(rust.contains("#[derive(Debug, Clone, Default)]"), "{rust}");
    assert!(rust.contains("struct Point"), "{rust}");
    assert!(rust.contains("x: f64"), "{rust}");
}

#[test]
fn test_field_defaults_write_impl_default() {
    let rust = emit("pub class Counter { pub count: Int = 0; label = \"c\"; }");
    assert!(rust.contains("#[derive(Debug, Clone)]"), "{rust}");
    assert!(rust.contains("pub struct Counter"), "{rust}");
    assert!(rust.contains("pub count: i64"), "{rust}");
    assert!(rust.contains("label: String"), "{rust}");
    assert!(rust.contains("impl Default for Counter"), "{rust}");
}

#[test]
fn test_constructor_and_initializer_fold_into_new() {
    let rust = emit("class User { name: String; new(name: String) { this.name = name; } init { this.name = \"x\"; } }");
    assert!(rust.contains("fn new(name: String) -> Self"), "{rust}");
    assert!(rust.contains("let mut this = Self::default();"), "{rust}");
    let init = rust.find("this.name = String::from(\"x\")").unwrap();
    let ctor = rust.find("this.name = name").unwrap();
    assert!(init < ctor, "initializer must run before the constructor body:\n{rust}");
}

#[test]
fn test_mutating_method_takes_mut_self() {
    let rust = emit("class Bag { items: List<Int>; fn add(x: Int) { this.items.push(x); } fn size(): Int { return 0; } }");
    assert!(rust.contains("fn add(&mut self, x: i64)"), "{rust}");
    assert!(rust.contains("fn size(&self) -> i64"), "{rust}");
    assert!(rust.contains("items: Vec<i64>"), "{rust}");
}

#[test]
fn test_nested_classes_are_flattened() {
    let rust = emit("@Data class Outer { a: Int; @Data class Inner { b: Int; } }");
    assert!(rust.contains("struct Outer"), "{rust}");
    assert!(rust.contains("struct Inner"), "{rust}");
    assert!(rust.contains("pub fn getB(&self) -> i64"), "{rust}");
}

#[test]
fn test_free_function_and_class_construction() {
    let rust = emit("@Data class P { n: Int; }\nfn main() { let p = P(); p.setN(3); }");
    assert!(rust.contains("fn main()"), "{rust}");
    assert!(rust.contains("P::default()"), "{rust}");
    assert!(rust.contains("let mut p"), "{rust}");
}

#[test]
fn test_import_becomes_use() {
    let rust = emit("import app.model.Address;\nclass A { home: Address; }");
    assert!(rust.contains("use app::model::Address;"), "{rust}");
    assert!(rust.contains("home: Address"), "{rust}");
}

#[test]
fn test_rust_keyword_field_is_escaped() {
    let rust = emit("class K { type: Int; }");
    assert!(rust.contains("r#type: i64"), "{rust}");
}

#[test]
fn test_header_and_lint_allows() {
    let expansion = expand_source("class A { x: Int; }", &SynthConfig::default()).unwrap();
    let rust = RustEmitter::new().emit(&expansion.unit).unwrap();
    assert!(rust.starts_with("// Generated by datagen v"), "{rust}");
    assert!(rust.contains("#![allow("), "{rust}");
}

#[test]
fn test_duplicate_class_names_are_unsupported() {
    let err = emit_err("class A { x: Int; } class B { class A { y: Int; } }");
    assert!(matches!(err, EmitError::Unsupported(_)), "{err:?}");
}

#[test]
fn test_untyped_field_without_default_is_unsupported() {
    let err = emit_err("class A { x; }");
    assert!(matches!(err, EmitError::Unsupported(_)), "{err:?}");
}
