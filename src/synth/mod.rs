//! Accessor synthesis.
//!
//! Finds types tagged with the marker annotation (`@Data` by default) and appends a public
//! getter and setter for every direct field. The pass is split so that only one step mutates:
//!
//! - [`host`] finds tagged elements and gives them stable [`ElementPath`]s
//! - [`walker`] resolves tagged types to their direct fields (read-only)
//! - [`members`] builds the accessor methods for a field (pure)
//! - [`round`] plans a round, checking names against existing and planned members
//! - [`apply`] appends the planned members, and is the only code that writes to the unit
//! - [`pipeline`] repeats rounds until nothing new is tagged
//!
//! Diagnostics go through a [`Reporter`]; nothing in a round is fatal.
//!
//! ## Examples
//!
//! ```rust
//! use datagen::synth::{self, SynthConfig};
//!
//! let expansion = synth::expand_source("@Data class Person { name: String; }", &SynthConfig::default()).unwrap();
//! let person = expansion.unit.types().next().unwrap();
//! let names: Vec<_> = person.methods().map(|m| m.name.as_str()).collect();
//! assert_eq!(names, ["getName", "setName"]);
//! ```

pub mod apply;
pub mod config;
pub mod errors;
pub mod host;
pub mod members;
pub mod pipeline;
pub mod report;
pub mod round;
pub mod walker;

pub use config::{ConflictPolicy, SynthConfig};
pub use errors::SynthError;
pub use host::{ElementKind, ElementPath, MarkerMatcher, TaggedElement, collect_tagged};
pub use pipeline::{Expansion, PipelineOutcome, expand_source, run_to_fixpoint};
pub use report::{Reporter, TracingReporter};
pub use round::{RoundOutcome, process_round};
