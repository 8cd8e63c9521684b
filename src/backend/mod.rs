//! Emit Rust source code from an expanded compilation unit.
//!
//! This module defines [`RustEmitter`] and wires together the focused submodules that implement
//! the lowering. Classes become structs with an `impl` block, `this` becomes `self`, and
//! annotations are dropped, so the marker never reaches the emitted artifact.
//!
//! ## Notes
//! - Emission builds a Rust syntax tree (`syn`) from `quote!` tokens and formats it via `prettyplease`.
//! - Nested classes are flattened into top-level structs; class names must be unique in a unit.
//! - The backend does no type checking. Constructs it cannot express yield [`EmitError::Unsupported`].
//!
//! ## See also
//! - [`decls`]: struct, impl and function emission
//! - [`statements`]: statement emission
//! - [`expressions`]: expression emission
//! - [`types`]: identifiers and types
//! - [`scan`]: write analysis used for `mut` and `&mut self`

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod decls;
mod errors;
mod expressions;
mod scan;
mod statements;
mod types;

pub use errors::EmitError;

use std::collections::{HashMap, HashSet};

use datagen_syntax::ast::{CompilationUnit, Member, Type, TypeDecl};

/// What the emitter knows about a class while lowering bodies.
#[derive(Debug, Default)]
struct ClassInfo {
    /// Declared (or inferred) field types
    fields: HashMap<String, Type>,
    /// Whether a `new` function is emitted (constructor or initializer present)
    has_new: bool,
    /// Methods that take `&mut self`
    mut_methods: HashSet<String>,
}

/// Lower an expanded compilation unit to formatted Rust source.
///
/// Stateful: it records class metadata in a first pass so that method receivers, constructor
/// calls and field clones can be decided while emitting bodies.
pub struct RustEmitter {
    /// Whether to add a crate-level `#![allow(...)]` for lints generated code trips
    add_lint_allows: bool,
    /// Whether to prepend the "Generated by" header comment
    add_header: bool,
    classes: HashMap<String, ClassInfo>,
    /// Every method name that needs `&mut self`, across classes
    mutating_methods: HashSet<String>,
}

impl Default for RustEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl RustEmitter {
    pub fn new() -> Self {
        Self {
            add_lint_allows: true,
            add_header: true,
            classes: HashMap::new(),
            mutating_methods: HashSet::new(),
        }
    }

    /// Disable the crate-level lint allows.
    pub fn without_lint_allows(mut self) -> Self {
        self.add_lint_allows = false;
        self
    }

    /// Disable the header comment (useful for snapshots).
    pub fn without_header(mut self) -> Self {
        self.add_header = false;
        self
    }

    /// Emit a complete unit to formatted Rust code.
    #[tracing::instrument(skip_all, fields(decl_count = unit.declarations.len()))]
    pub fn emit(&mut self, unit: &CompilationUnit) -> Result<String, EmitError> {
        self.collect(unit)?;

        let tokens = self.emit_unit_tokens(unit)?;
        let syntax_tree: syn::File = syn::parse2(tokens).map_err(|e| EmitError::SynParse(e.to_string()))?;
        let formatted = prettyplease::unparse(&syntax_tree);

        if self.add_header {
            Ok(format!(
                "// Generated by datagen v{}\n\n{}",
                env!("CARGO_PKG_VERSION"),
                formatted
            ))
        } else {
            Ok(formatted)
        }
    }

    /// First pass: class table and `&mut self` analysis.
    fn collect(&mut self, unit: &CompilationUnit) -> Result<(), EmitError> {
        self.classes.clear();
        self.mutating_methods.clear();

        let classes = flatten_classes(unit);
        for class in &classes {
            let mut info = ClassInfo::default();
            for (_, field, _) in class.fields() {
                let ty = field
                    .ty
                    .as_ref()
                    .map(|t| t.node.clone())
                    .or_else(|| field.default.as_ref().and_then(|d| types::infer_from_default(&d.node)));
                if let Some(ty) = ty {
                    info.fields.insert(field.name.clone(), ty);
                }
            }
            info.has_new = class
                .members
                .iter()
                .any(|m| matches!(m.node, Member::Constructor(_) | Member::Initializer(_)));
            if self.classes.insert(class.name.clone(), info).is_some() {
                return Err(EmitError::Unsupported(format!(
                    "class name '{}' is declared more than once",
                    class.name
                )));
            }
        }

        // A method needs `&mut self` if it writes through `this`, including by calling another
        // such method. Iterate until the set stops growing.
        loop {
            let mut changed = false;
            for class in &classes {
                for method in class.methods() {
                    let key = (class.name.as_str(), method.name.as_str());
                    if self.class_method_is_mut(key.0, key.1) {
                        continue;
                    }
                    let writes = scan::scan_body(&method.body, &|name: &str| self.is_mutating_method(name));
                    if writes.this_written {
                        if let Some(info) = self.classes.get_mut(key.0) {
                            info.mut_methods.insert(key.1.to_string());
                        }
                        self.mutating_methods.insert(key.1.to_string());
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        Ok(())
    }

    fn class_method_is_mut(&self, class: &str, method: &str) -> bool {
        self.classes
            .get(class)
            .is_some_and(|info| info.mut_methods.contains(method))
    }

    /// Method names that need a mutable receiver: library mutators plus every `&mut self` method.
    fn is_mutating_method(&self, name: &str) -> bool {
        scan::MUTATING_METHODS.contains(&name) || self.mutating_methods.contains(name)
    }
}

/// A class followed by its nested classes, depth first.
fn class_tree(decl: &TypeDecl) -> Vec<&TypeDecl> {
    fn push<'u>(decl: &'u TypeDecl, out: &mut Vec<&'u TypeDecl>) {
        out.push(decl);
        for member in &decl.members {
            if let Member::Type(nested) = &member.node {
                push(nested, out);
            }
        }
    }

    let mut out = Vec::new();
    push(decl, &mut out);
    out
}

/// All classes of the unit in source order, nested classes flattened.
fn flatten_classes(unit: &CompilationUnit) -> Vec<&TypeDecl> {
    unit.types().flat_map(class_tree).collect()
}
