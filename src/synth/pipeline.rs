//! Host round driver.
//!
//! Repeats [`process_round`] until no tagged element is left unprocessed, bounded by
//! [`SynthConfig::max_rounds`]. Elements are remembered by path, so a round only sees what is
//! new since the previous one.

use std::collections::HashSet;

use datagen_syntax::ast::CompilationUnit;
use datagen_syntax::diagnostics::CompileError;

use super::config::SynthConfig;
use super::host::{ElementPath, MarkerMatcher, collect_tagged};
use super::report::Reporter;
use super::round::process_round;

/// Summary of a full pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineOutcome {
    /// Rounds that had something to process
    pub rounds: usize,
    pub types_processed: usize,
    pub methods_added: usize,
    pub errors: usize,
    /// `false` if `max_rounds` ran out while tagged elements were still appearing
    pub converged: bool,
}

/// Run the pass over `unit` until nothing new is tagged.
#[tracing::instrument(skip_all, fields(marker = %config.marker, max_rounds = config.max_rounds))]
pub fn run_to_fixpoint(
    unit: &mut CompilationUnit,
    config: &SynthConfig,
    reporter: &mut dyn Reporter,
) -> PipelineOutcome {
    let matcher = MarkerMatcher::new(&config.marker);
    let mut processed: HashSet<ElementPath> = HashSet::new();
    let mut outcome = PipelineOutcome::default();

    loop {
        let fresh: Vec<_> = collect_tagged(unit, &matcher)
            .into_iter()
            .filter(|element| !processed.contains(&element.path))
            .collect();
        if fresh.is_empty() {
            outcome.converged = true;
            break;
        }
        if outcome.rounds == config.max_rounds {
            reporter.report(CompileError::synthesis(
                format!(
                    "Accessor synthesis did not settle after {} rounds ({} tagged elements pending)",
                    config.max_rounds,
                    fresh.len()
                ),
                fresh.first().map(|e| e.span).unwrap_or_default(),
            ));
            outcome.errors += 1;
            break;
        }

        let round = process_round(unit, &fresh, config, reporter);
        tracing::debug!(
            round = outcome.rounds + 1,
            types = round.types_processed,
            methods = round.methods_added,
            "round finished"
        );
        outcome.rounds += 1;
        outcome.types_processed += round.types_processed;
        outcome.methods_added += round.methods_added;
        outcome.errors += round.errors;
        processed.extend(fresh.into_iter().map(|element| element.path));
    }

    outcome
}

/// Result of expanding a source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub unit: CompilationUnit,
    pub outcome: PipelineOutcome,
    /// Notes and errors reported by the pass
    pub diagnostics: Vec<CompileError>,
}

impl Expansion {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(CompileError::is_error)
    }
}

/// Parse `source` and run the pass to fixpoint.
///
/// ## Errors
/// Returns the lexer or parser errors if the source does not parse. Synthesis problems are not
/// errors here; they are collected in [`Expansion::diagnostics`].
pub fn expand_source(source: &str, config: &SynthConfig) -> Result<Expansion, Vec<CompileError>> {
    let mut unit = datagen_syntax::parse_source(source)?;
    let mut diagnostics = Vec::new();
    let outcome = run_to_fixpoint(&mut unit, config, &mut diagnostics);
    Ok(Expansion {
        unit,
        outcome,
        diagnostics,
    })
}
