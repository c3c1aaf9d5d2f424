//! Predicate location and nominative resolution.

use bunsetsu::{Argument, Chunk, Sentence};

use crate::ClassifyError;
use crate::classifier::ExplicitNominative;

/// The subject the cascade judges, as far as it could be pinned down.
///
/// `Unknown` is a recoverable state, not an error: the subject check is
/// skipped and the remaining stages still run.
#[derive(Clone, Copy, Debug)]
pub enum Nominative<'a> {
    /// A bare surface form, explicit or exophoric (「著者」「読者」).
    Surface(&'a str),
    /// A chunk of the parsed sentence.
    Chunk(&'a Chunk),
    /// No nominative could be established.
    Unknown,
}

/// Find the predicate chunk of a sentence: the rightmost chunk carrying a
/// 用言 annotation, or the last chunk if the parser marked none.
pub fn locate_predicate(sentence: &Sentence) -> Result<&Chunk, ClassifyError> {
    let Some(last) = sentence.chunks.last() else {
        return Err(ClassifyError::EmptySentence);
    };
    Ok(sentence
        .chunks
        .iter()
        .rev()
        .find(|chunk| chunk.is_predicate())
        .unwrap_or(last))
}

/// Determine the predicate's subject.
///
/// A caller-supplied nominative wins unchanged; this is where exophora or
/// anaphora resolved outside the classifier is injected. Otherwise the first
/// ガ格 argument of the predicate's case frame is followed. `sentence` is
/// absent when the caller handed in a bare chunk, in which case chunk
/// cross-references cannot be followed.
pub fn resolve_nominative<'a>(
    predicate: &'a Chunk,
    explicit: Option<&'a ExplicitNominative>,
    sentence: Option<&'a Sentence>,
) -> Nominative<'a> {
    if let Some(explicit) = explicit {
        return match explicit {
            ExplicitNominative::Surface(surface) => Nominative::Surface(surface),
            ExplicitNominative::Chunk(chunk) => Nominative::Chunk(chunk),
        };
    }

    let Some(argument) = predicate.case_frame.as_ref().and_then(|f| f.nominative()) else {
        log::warn!(
            "predicate 「{}」 has no nominative argument; subject unverifiable",
            predicate.surface()
        );
        return Nominative::Unknown;
    };

    match argument {
        Argument::Special(surface) => Nominative::Surface(surface),
        Argument::Chunk { sid, index } => match sentence {
            Some(sentence) if *sid == sentence.id => match sentence.chunk(*index) {
                Some(chunk) => Nominative::Chunk(chunk),
                None => {
                    log::warn!(
                        "nominative reference ({sid}, {index}) is out of range; subject unverifiable"
                    );
                    Nominative::Unknown
                }
            },
            _ => {
                log::warn!(
                    "nominative reference ({sid}, {index}) is outside this sentence; subject unverifiable"
                );
                Nominative::Unknown
            }
        },
    }
}
