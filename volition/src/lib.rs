//! Volition classifier for Japanese predicates.
//!
//! Given the parsed analysis of one sentence, decide whether its main
//! predicate expresses volition — an act the subject performs on purpose —
//! rather than a state, an involuntary event, a passive or potential
//! occurrence, or a non-verbal predicate. The decision is a fixed cascade of
//! grammatical checks (subject, modality, voice, suffix morphology,
//! predicate type, lexical semantics) over externally configurable rule
//! sets; the first check that reaches a verdict wins.
//!
//! ```
//! use bunsetsu::{Chunk, Morpheme, PartOfSpeech};
//! use volition::{Input, RuleBook, VolitionClassifier};
//!
//! let classifier = VolitionClassifier::new(RuleBook::bundled());
//! let chunk = Chunk {
//!     morphemes: vec![Morpheme::new("考える", "かんがえる", "考える", PartOfSpeech::Verb, "")],
//!     features: ["用言:動", "モダリティ-意志"].into_iter().collect(),
//!     case_frame: None,
//! };
//! assert!(classifier.classify(Input::Chunk(chunk), None).unwrap());
//! ```

mod cascade;
mod classifier;
mod locate;
pub mod parser;
pub mod rules;

pub use cascade::{Decision, Stage, evaluate, evaluate_traced};
pub use classifier::{ExplicitNominative, Input, VolitionClassifier};
pub use locate::{Nominative, locate_predicate, resolve_nominative};
pub use rules::{ConfigError, RuleBook, RuleCategory};

/// Errors a single classification call can end with.
///
/// Rule-set problems surface earlier, at construction, as [`ConfigError`].
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The sentence has zero chunks.
    #[error("sentence has no chunks")]
    EmptySentence,
    /// Input matched none of the accepted shapes.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    /// Raw text was supplied but no parser collaborator is configured.
    #[error("raw-text input requires a parser; none is configured")]
    NoParser,
    /// The parser collaborator failed; its error is passed through unchanged.
    #[error("parser failed")]
    Parser(#[source] parser::ParserError),
}
