//! Classifier facade.

use bunsetsu::{Chunk, Sentence};

use crate::ClassifyError;
use crate::cascade::{self, Decision};
use crate::locate::{locate_predicate, resolve_nominative};
use crate::parser::SentenceParser;
use crate::rules::RuleBook;

/// The three input shapes a classification call accepts.
#[derive(Clone, Debug)]
pub enum Input {
    /// Raw text, handed to the parser collaborator first.
    Text(String),
    /// A pre-parsed sentence.
    Sentence(Sentence),
    /// A pre-identified predicate chunk; the locator is bypassed.
    Chunk(Chunk),
}

impl Input {
    /// Interpret a JSON value as one of the accepted shapes: a string, a
    /// sentence object, or a chunk object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ClassifyError> {
        match value {
            serde_json::Value::String(text) => Ok(Input::Text(text)),
            value @ serde_json::Value::Object(_) => {
                if let Ok(sentence) = serde_json::from_value::<Sentence>(value.clone()) {
                    return Ok(Input::Sentence(sentence));
                }
                if let Ok(chunk) = serde_json::from_value::<Chunk>(value) {
                    return Ok(Input::Chunk(chunk));
                }
                Err(ClassifyError::UnsupportedInput(
                    "object is neither a sentence nor a chunk".to_string(),
                ))
            }
            other => Err(ClassifyError::UnsupportedInput(format!(
                "unexpected JSON value {other}"
            ))),
        }
    }
}

/// A caller-resolved subject, injected past the case-frame lookup. This is
/// the hook for exophora or anaphora resolution done outside the classifier.
#[derive(Clone, Debug)]
pub enum ExplicitNominative {
    Surface(String),
    Chunk(Chunk),
}

/// The classifier: rule sets plus an optional parser collaborator.
///
/// Holds no mutable state; one instance can serve any number of calls, from
/// any number of threads, with no coordination.
pub struct VolitionClassifier {
    rules: RuleBook,
    parser: Option<Box<dyn SentenceParser>>,
}

impl VolitionClassifier {
    pub fn new(rules: RuleBook) -> Self {
        Self { rules, parser: None }
    }

    /// Attach the parser collaborator used for [`Input::Text`].
    pub fn with_parser(mut self, parser: impl SentenceParser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Classify one predicate: `true` means it expresses volition.
    pub fn classify(
        &self,
        input: Input,
        nominative: Option<ExplicitNominative>,
    ) -> Result<bool, ClassifyError> {
        self.classify_traced(input, nominative)
            .map(|decision| decision.volitional)
    }

    /// Convenience wrapper over [`Input::Text`].
    pub fn classify_text(&self, text: &str) -> Result<bool, ClassifyError> {
        self.classify(Input::Text(text.to_string()), None)
    }

    /// Like [`Self::classify`], but keeps which stage fired and on what.
    pub fn classify_traced(
        &self,
        input: Input,
        nominative: Option<ExplicitNominative>,
    ) -> Result<Decision, ClassifyError> {
        match input {
            Input::Text(text) => {
                let parser = self.parser.as_deref().ok_or(ClassifyError::NoParser)?;
                let sentence = parser.parse(&text).map_err(ClassifyError::Parser)?;
                let predicate = locate_predicate(&sentence)?;
                self.decide(Some(&sentence), predicate, nominative.as_ref())
            }
            Input::Sentence(sentence) => {
                let predicate = locate_predicate(&sentence)?;
                self.decide(Some(&sentence), predicate, nominative.as_ref())
            }
            Input::Chunk(chunk) => self.decide(None, &chunk, nominative.as_ref()),
        }
    }

    fn decide(
        &self,
        sentence: Option<&Sentence>,
        predicate: &Chunk,
        explicit: Option<&ExplicitNominative>,
    ) -> Result<Decision, ClassifyError> {
        let nominative = resolve_nominative(predicate, explicit, sentence);
        Ok(cascade::evaluate_traced(predicate, &nominative, &self.rules))
    }
}
