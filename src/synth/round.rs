//! One processing round: walk, synthesize, check for conflicts, apply.

use std::collections::HashMap;

use datagen_syntax::ast::{CompilationUnit, Member, MethodDecl, Spanned, SpanlessEq, TypeDecl};

use super::apply::{TypeEdit, apply_plan};
use super::config::{ConflictPolicy, SynthConfig};
use super::errors::{ConflictSource, SynthError};
use super::host::TaggedElement;
use super::members::synthesize;
use super::report::Reporter;
use super::walker::{TypeFields, walk};

/// Summary of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundOutcome {
    /// Whether the marker is claimed by this pass
    pub claimed: bool,
    pub types_processed: usize,
    pub methods_added: usize,
    /// Number of error diagnostics reported
    pub errors: usize,
}

/// Edits computed for a round, before anything is mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoundPlan {
    pub edits: Vec<TypeEdit>,
    pub types_processed: usize,
    pub errors: usize,
}

/// Run one round over `unit`.
///
/// Every tagged type gets a getter and a setter per direct field, appended after its existing
/// members. Malformed fields and accessor conflicts are reported and skipped; nothing stops the
/// round. Running the round again on its own output adds nothing.
#[tracing::instrument(skip_all, fields(tagged = tagged.len(), marker = %config.marker))]
pub fn process_round(
    unit: &mut CompilationUnit,
    tagged: &[TaggedElement],
    config: &SynthConfig,
    reporter: &mut dyn Reporter,
) -> RoundOutcome {
    let plan = plan_round(unit, tagged, config, reporter);
    let methods_added = apply_plan(unit, plan.edits);

    RoundOutcome {
        claimed: config.claim_marker,
        types_processed: plan.types_processed,
        methods_added,
        errors: plan.errors,
    }
}

/// Compute the edits for a round without touching `unit`.
pub fn plan_round(
    unit: &CompilationUnit,
    tagged: &[TaggedElement],
    config: &SynthConfig,
    reporter: &mut dyn Reporter,
) -> RoundPlan {
    let mut plan = RoundPlan::default();
    for ty in walk(unit, tagged) {
        let (edit, errors) = plan_type(&ty, config.conflict_policy, reporter);
        tracing::debug!(
            ty = %ty.decl.name,
            fields = ty.fields.len(),
            methods = edit.members.len(),
            errors,
            "planned accessors"
        );
        plan.types_processed += 1;
        plan.errors += errors;
        plan.edits.push(edit);
    }
    plan
}

/// Where an accessor name stands against what the type already has.
enum Slot {
    Free,
    /// Same method already present
    Identical,
    Taken(ConflictSource),
}

fn plan_type(ty: &TypeFields<'_>, policy: ConflictPolicy, reporter: &mut dyn Reporter) -> (TypeEdit, usize) {
    let owner = ty.decl.name.as_str();
    let mut members = Vec::new();
    // accessor name -> field it was planned for
    let mut planned: HashMap<String, String> = HashMap::new();
    let mut errors = 0;

    for (_, field, span) in &ty.fields {
        let pair = match synthesize(owner, field, *span) {
            Ok(pair) => pair,
            Err(err) => {
                reporter.report(err.into());
                errors += 1;
                continue;
            }
        };

        let mut accepted: Vec<MethodDecl> = Vec::with_capacity(2);
        let mut conflict = None;
        for method in pair.into_methods() {
            match slot_for(ty.decl, &planned, &method) {
                Slot::Free => accepted.push(method),
                Slot::Identical => {}
                Slot::Taken(existing) => match policy {
                    ConflictPolicy::Error => {
                        conflict = Some(SynthError::AccessorConflict {
                            owner: owner.to_string(),
                            field: field.name.clone(),
                            accessor: method.name,
                            existing,
                            span: *span,
                        });
                        break;
                    }
                    ConflictPolicy::Skip => reporter.note(
                        format!(
                            "Keeping existing '{}' in '{}'; not synthesizing it for field '{}'",
                            method.name, owner, field.name
                        ),
                        *span,
                    ),
                },
            }
        }

        if let Some(err) = conflict {
            reporter.report(err.into());
            errors += 1;
            continue;
        }

        for method in accepted {
            planned.insert(method.name.clone(), field.name.clone());
            members.push(Spanned::new(Member::Method(method), *span));
        }
    }

    (
        TypeEdit {
            path: ty.path.clone(),
            members,
        },
        errors,
    )
}

fn slot_for(decl: &TypeDecl, planned: &HashMap<String, String>, method: &MethodDecl) -> Slot {
    if let Some(field) = planned.get(&method.name) {
        return Slot::Taken(ConflictSource::PlannedAccessor { field: field.clone() });
    }
    let mut same_name = decl.methods().filter(|m| m.name == method.name).peekable();
    if same_name.peek().is_none() {
        return Slot::Free;
    }
    if same_name.any(|m| m.spanless_eq(method)) {
        Slot::Identical
    } else {
        Slot::Taken(ConflictSource::ExistingMethod)
    }
}
