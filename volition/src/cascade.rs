//! The decision cascade.
//!
//! Seven ordered checks over one predicate chunk; the first that reaches a
//! verdict ends the evaluation, so later annotations never override an
//! earlier decision. The order is load-bearing: a predicate carrying both a
//! volition modality and a passive voice tag is volitional because modality
//! is checked first. Every stage treats a missing or malformed annotation as
//! "no match, keep going" — evaluation always ends in a boolean.

use bunsetsu::{Chunk, Morpheme, PartOfSpeech, SuffixKind};

use crate::locate::Nominative;
use crate::rules::{RuleBook, RuleCategory};

/// Which check decided the verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Nominative,
    Modality,
    Voice,
    Suffix,
    PredicateType,
    Lexical,
    /// No check fired: an unmarked verbal predicate with a valid-or-unknown
    /// subject is presumed volitional.
    Default,
}

/// A verdict plus where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub volitional: bool,
    pub stage: Stage,
    /// The surface, flag, lemma, or label that fired, when one did.
    pub matched: Option<String>,
}

struct Ctx<'a> {
    chunk: &'a Chunk,
    nominative: &'a Nominative<'a>,
    rules: &'a RuleBook,
}

type StageFn = fn(&Ctx<'_>) -> Option<Decision>;

const STAGES: [StageFn; 6] = [
    subject_validity,
    modality,
    voice,
    suffix_morphology,
    predicate_type,
    lexical_semantics,
];

/// Evaluate the cascade to a bare verdict.
pub fn evaluate(chunk: &Chunk, nominative: &Nominative<'_>, rules: &RuleBook) -> bool {
    evaluate_traced(chunk, nominative, rules).volitional
}

/// Evaluate the cascade, keeping the firing stage for diagnostics.
pub fn evaluate_traced(chunk: &Chunk, nominative: &Nominative<'_>, rules: &RuleBook) -> Decision {
    let ctx = Ctx { chunk, nominative, rules };
    for stage_fn in STAGES {
        if let Some(decision) = stage_fn(&ctx) {
            log::debug!(
                "「{}」: {:?} decided volitional={} ({:?})",
                chunk.surface(),
                decision.stage,
                decision.volitional,
                decision.matched
            );
            return decision;
        }
    }
    log::debug!("「{}」: no stage fired, defaulting to volitional", chunk.surface());
    Decision { volitional: true, stage: Stage::Default, matched: None }
}

fn decided(volitional: bool, stage: Stage, matched: impl Into<String>) -> Option<Decision> {
    Some(Decision { volitional, stage, matched: Some(matched.into()) })
}

/// Stage 1: only subjects that can act deliberately may carry volition.
/// An unknown subject does not decide anything.
fn subject_validity(ctx: &Ctx<'_>) -> Option<Decision> {
    match ctx.nominative {
        Nominative::Surface(surface) => {
            if ctx.rules.contains(RuleCategory::ValidNominatives, surface) {
                None
            } else {
                decided(false, Stage::Nominative, *surface)
            }
        }
        Nominative::Chunk(chunk) => {
            let agentive = ctx
                .rules
                .get(RuleCategory::ValidNominativeMarkers)
                .iter()
                .any(|marker| chunk.features.has(marker));
            if agentive {
                None
            } else {
                decided(false, Stage::Nominative, chunk.surface())
            }
        }
        Nominative::Unknown => None,
    }
}

/// Stage 2: intention, imperative, request and desirability modalities
/// assert volition outright.
fn modality(ctx: &Ctx<'_>) -> Option<Decision> {
    let tag = ctx
        .chunk
        .features
        .modalities()
        .find(|tag| ctx.rules.contains(RuleCategory::VolitionModalities, tag))?;
    decided(true, Stage::Modality, tag)
}

/// Stage 3: causative voice asserts volition; passive, potential and their
/// combinations deny it. Combined alternation values (「使役&受動」) are
/// matched verbatim, so they land in the non-volition set rather than on the
/// bare causative entry.
fn voice(ctx: &Ctx<'_>) -> Option<Decision> {
    if let Some(tag) = ctx
        .chunk
        .features
        .voices()
        .find(|tag| ctx.rules.contains(RuleCategory::VolitionVoices, tag))
    {
        return decided(true, Stage::Voice, tag);
    }
    let tag = ctx
        .chunk
        .features
        .voices()
        .find(|tag| ctx.rules.contains(RuleCategory::NonVolitionVoices, tag))?;
    decided(false, Stage::Voice, tag)
}

/// Stage 4: walk the trailing suffix run right to left, so the suffix
/// nearest the sentence end is judged first — that one dominates stacked
/// auxiliaries. The walk crosses non-decisive suffixes and functional
/// morphemes (particles, auxiliaries, the copula) and stops at the first
/// content morpheme.
fn suffix_morphology(ctx: &Ctx<'_>) -> Option<Decision> {
    for morpheme in ctx.chunk.morphemes.iter().rev() {
        match morpheme.suffix_kind() {
            Some(SuffixKind::AdjectivalNominal) => {
                return decided(false, Stage::Suffix, &morpheme.lemma);
            }
            Some(SuffixKind::AdjectivalPredicate) => {
                if !ctx
                    .rules
                    .contains(RuleCategory::ValidAdjectiveSuffixLemmas, &morpheme.lemma)
                {
                    return decided(false, Stage::Suffix, &morpheme.lemma);
                }
            }
            Some(SuffixKind::Verbal) => {
                if let Some(label) = morpheme
                    .semantic_labels
                    .iter()
                    .find(|label| ctx.rules.contains(RuleCategory::NonVolitionSuffixLabels, label))
                {
                    return decided(false, Stage::Suffix, label);
                }
                if ctx
                    .rules
                    .contains(RuleCategory::NonVolitionSuffixLemmas, &morpheme.lemma)
                {
                    return decided(false, Stage::Suffix, &morpheme.lemma);
                }
            }
            None => {
                if !is_trailing_functional(morpheme) {
                    break;
                }
            }
        }
    }
    None
}

fn is_trailing_functional(morpheme: &Morpheme) -> bool {
    matches!(
        morpheme.pos,
        PartOfSpeech::Particle
            | PartOfSpeech::Auxiliary
            | PartOfSpeech::Copula
            | PartOfSpeech::Suffix
            | PartOfSpeech::Special
    )
}

/// Stage 5: adjectival and copular predicates do not carry volition.
fn predicate_type(ctx: &Ctx<'_>) -> Option<Decision> {
    let kind = ctx.chunk.features.predicate_type()?;
    if ctx
        .rules
        .contains(RuleCategory::NonVolitionPredicateTypes, &kind.to_string())
    {
        decided(false, Stage::PredicateType, kind.to_string())
    } else {
        None
    }
}

/// Stage 6: verbs that lexically denote involuntary events — by head
/// repname (prime head first) or by a semantic label anywhere in the chunk,
/// scanned right to left.
fn lexical_semantics(ctx: &Ctx<'_>) -> Option<Decision> {
    if let Some(head) = ctx.chunk.head_repname() {
        if ctx.rules.contains(RuleCategory::NonVolitionHeadLemmas, head) {
            return decided(false, Stage::Lexical, head);
        }
    }
    for morpheme in ctx.chunk.morphemes.iter().rev() {
        if let Some(label) = morpheme
            .semantic_labels
            .iter()
            .find(|label| ctx.rules.contains(RuleCategory::NonVolitionLabels, label))
        {
            return decided(false, Stage::Lexical, label);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use bunsetsu::Features;

    fn rules() -> RuleBook {
        RuleBook::bundled()
    }

    fn features(flags: &[&str]) -> Features {
        flags.iter().copied().collect()
    }

    fn verb(surface: &str, lemma: &str) -> Morpheme {
        Morpheme::new(surface, "", lemma, PartOfSpeech::Verb, "")
    }

    fn suffix(surface: &str, lemma: &str, sub_pos: &str) -> Morpheme {
        Morpheme::new(surface, "", lemma, PartOfSpeech::Suffix, sub_pos)
    }

    fn predicate(morphemes: Vec<Morpheme>, flags: &[&str]) -> Chunk {
        Chunk { morphemes, features: features(flags), case_frame: None }
    }

    fn eval(chunk: &Chunk) -> Decision {
        evaluate_traced(chunk, &Nominative::Unknown, &rules())
    }

    #[test]
    fn test_unmarked_verb_defaults_to_volitional() {
        let chunk = predicate(vec![verb("する", "する")], &["用言:動"]);
        let decision = eval(&chunk);
        assert!(decision.volitional);
        assert_eq!(decision.stage, Stage::Default);
    }

    #[test]
    fn test_invalid_subject_beats_volition_modality() {
        // Stage 1 fires before the modality at stage 2 is ever looked at.
        let chunk = predicate(vec![verb("する", "する")], &["用言:動", "モダリティ-意志"]);
        let subject = predicate(
            vec![Morpheme::new("足音", "あしおと", "足音", PartOfSpeech::Noun, "普通名詞")],
            &[],
        );
        let decision = evaluate_traced(&chunk, &Nominative::Chunk(&subject), &rules());
        assert!(!decision.volitional);
        assert_eq!(decision.stage, Stage::Nominative);
    }

    #[test]
    fn test_valid_surface_subject_continues() {
        let chunk = predicate(vec![verb("する", "する")], &["用言:動"]);
        let decision = evaluate_traced(&chunk, &Nominative::Surface("著者"), &rules());
        assert!(decision.volitional);
        assert_eq!(decision.stage, Stage::Default);

        let decision = evaluate_traced(&chunk, &Nominative::Surface("机"), &rules());
        assert!(!decision.volitional);
        assert_eq!(decision.stage, Stage::Nominative);
    }

    #[test]
    fn test_modality_beats_voice() {
        let chunk = predicate(
            vec![verb("考えられる", "考える")],
            &["用言:動", "モダリティ-意志", "態:受動"],
        );
        let decision = eval(&chunk);
        assert!(decision.volitional);
        assert_eq!(decision.stage, Stage::Modality);
        assert_eq!(decision.matched.as_deref(), Some("意志"));
    }

    #[test]
    fn test_causative_is_volitional() {
        let chunk = predicate(vec![verb("考えさせる", "考える")], &["用言:動", "態:使役"]);
        let decision = eval(&chunk);
        assert!(decision.volitional);
        assert_eq!(decision.stage, Stage::Voice);
    }

    #[test]
    fn test_combined_causative_passive_is_not() {
        let chunk = predicate(vec![verb("考えさせられる", "考える")], &["用言:動", "態:使役&受動"]);
        let decision = eval(&chunk);
        assert!(!decision.volitional);
        assert_eq!(decision.stage, Stage::Voice);
        assert_eq!(decision.matched.as_deref(), Some("使役&受動"));
    }

    #[test]
    fn test_suffix_scan_is_right_to_left() {
        // 考えなくなる: the decisive なる is nearer the sentence end than the
        // non-decisive (valid) ない, so it is judged first.
        let chunk = predicate(
            vec![
                verb("考え", "考える"),
                suffix("なく", "ない", "形容詞性述語接尾辞"),
                suffix("なる", "なる", "動詞性接尾辞"),
            ],
            &["用言:動"],
        );
        let decision = eval(&chunk);
        assert!(!decision.volitional);
        assert_eq!(decision.stage, Stage::Suffix);
        assert_eq!(decision.matched.as_deref(), Some("なる"));
    }

    #[test]
    fn test_scan_continues_past_non_decisive_suffix() {
        // 考えすぎない: ない keeps volitionality and the walk continues
        // inwards to すぎる, which denies it.
        let chunk = predicate(
            vec![
                verb("考え", "考える"),
                suffix("すぎ", "すぎる", "動詞性接尾辞"),
                suffix("ない", "ない", "形容詞性述語接尾辞"),
            ],
            &["用言:形"],
        );
        let decision = eval(&chunk);
        assert!(!decision.volitional);
        assert_eq!(decision.matched.as_deref(), Some("すぎる"));
    }

    #[test]
    fn test_scan_stops_at_content_morpheme() {
        // A suffix left of the verb stem must not fire: the walk ends at the
        // first content morpheme.
        let chunk = predicate(
            vec![
                suffix("すぎ", "すぎる", "動詞性接尾辞"),
                verb("考える", "考える"),
            ],
            &["用言:動"],
        );
        let decision = eval(&chunk);
        assert!(decision.volitional);
        assert_eq!(decision.stage, Stage::Default);
    }

    #[test]
    fn test_potential_suffix_label() {
        // 考えておける: おける is the potential form of the auxiliary おく.
        let chunk = predicate(
            vec![
                verb("考え", "考える"),
                Morpheme::new("て", "て", "て", PartOfSpeech::Particle, "接続助詞"),
                suffix("おける", "おく", "動詞性接尾辞").with_labels(["可能動詞"]),
            ],
            &["用言:動"],
        );
        let decision = eval(&chunk);
        assert!(!decision.volitional);
        assert_eq!(decision.stage, Stage::Suffix);
        assert_eq!(decision.matched.as_deref(), Some("可能動詞"));
    }

    #[test]
    fn test_empty_chunk_is_a_no_op() {
        let chunk = predicate(vec![], &["用言:動"]);
        let decision = eval(&chunk);
        assert!(decision.volitional);
        assert_eq!(decision.stage, Stage::Default);
    }

    #[test]
    fn test_prime_head_takes_precedence() {
        // The prime head is innocuous, so the listed plain head must not fire.
        let chunk = predicate(
            vec![verb("気付く", "気付く")],
            &["用言:動", "主辞代表表記:気付く/きづく", "主辞’代表表記:考える/かんがえる"],
        );
        let decision = eval(&chunk);
        assert!(decision.volitional);

        let chunk = predicate(
            vec![verb("気付く", "気付く")],
            &["用言:動", "主辞代表表記:気付く/きづく"],
        );
        let decision = eval(&chunk);
        assert!(!decision.volitional);
        assert_eq!(decision.stage, Stage::Lexical);
        assert_eq!(decision.matched.as_deref(), Some("気付く/きづく"));
    }
}
