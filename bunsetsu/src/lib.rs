//! Data model for Japanese predicate-argument analyses.
//!
//! A parsed sentence is a sequence of chunks (文節), each a run of morphemes
//! carrying a feature bag and, on predicates, a case frame. The shapes here
//! mirror what a KNP-style dependency parser emits; see [`knp`] for the
//! tab-format ingestion.

pub mod features;
pub mod knp;
pub mod normalize;

use std::collections::BTreeMap;
use std::collections::BTreeSet;

pub use crate::features::{Features, PredicateType};

/// JUMAN major part-of-speech categories.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    parse_display::Display,
    parse_display::FromStr,
)]
pub enum PartOfSpeech {
    #[serde(rename = "特殊")]
    #[display("特殊")]
    Special, // punctuation and symbols
    #[serde(rename = "動詞")]
    #[display("動詞")]
    Verb,
    #[serde(rename = "形容詞")]
    #[display("形容詞")]
    Adjective,
    #[serde(rename = "判定詞")]
    #[display("判定詞")]
    Copula,
    #[serde(rename = "助動詞")]
    #[display("助動詞")]
    Auxiliary,
    #[serde(rename = "名詞")]
    #[display("名詞")]
    Noun,
    #[serde(rename = "指示詞")]
    #[display("指示詞")]
    Demonstrative,
    #[serde(rename = "副詞")]
    #[display("副詞")]
    Adverb,
    #[serde(rename = "助詞")]
    #[display("助詞")]
    Particle,
    #[serde(rename = "接続詞")]
    #[display("接続詞")]
    Conjunction,
    #[serde(rename = "連体詞")]
    #[display("連体詞")]
    Adnominal,
    #[serde(rename = "感動詞")]
    #[display("感動詞")]
    Interjection,
    #[serde(rename = "接頭辞")]
    #[display("接頭辞")]
    Prefix,
    #[serde(rename = "接尾辞")]
    #[display("接尾辞")]
    Suffix,
    #[serde(rename = "未定義語")]
    #[display("未定義語")]
    Undefined,
}

/// The suffix subdivisions that change how a predicate reads.
///
/// These are the three JUMAN suffix subdivisions that can attach to a
/// predicate stem; other subdivisions (nominal suffixes on nouns, counters,
/// honorifics) are irrelevant to predicate structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuffixKind {
    /// 形容詞性名詞接尾辞 — turns the predicate into a na-adjective (〜がち).
    AdjectivalNominal,
    /// 形容詞性述語接尾辞 — i-adjective predicate suffix (〜ない, 〜たい, 〜やすい).
    AdjectivalPredicate,
    /// 動詞性接尾辞 — verbal auxiliary suffix (〜しまう, 〜すぎる, 〜得る).
    Verbal,
}

/// Smallest lexical unit, as segmented by the external parser. Immutable.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Morpheme {
    /// Form as it appears in the sentence.
    pub surface: String,
    /// Hiragana reading of the surface form.
    #[serde(default)]
    pub reading: String,
    /// Dictionary (base) form.
    pub lemma: String,
    pub pos: PartOfSpeech,
    /// JUMAN subdivision (細分類), e.g. 「普通名詞」「動詞性接尾辞」. Open set.
    #[serde(default)]
    pub sub_pos: String,
    #[serde(default)]
    pub conjugation_type: String,
    #[serde(default)]
    pub conjugation_form: String,
    /// Canonical lemma/reading pair (代表表記), e.g. 「考える/かんがえる」.
    #[serde(default)]
    pub repname: Option<String>,
    /// Free-form semantic labels, e.g. 「可能動詞」「自他動詞:他」.
    #[serde(default)]
    pub semantic_labels: BTreeSet<String>,
}

impl Morpheme {
    pub fn new(
        surface: impl Into<String>,
        reading: impl Into<String>,
        lemma: impl Into<String>,
        pos: PartOfSpeech,
        sub_pos: impl Into<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.into(),
            lemma: lemma.into(),
            pos,
            sub_pos: sub_pos.into(),
            conjugation_type: String::new(),
            conjugation_form: String::new(),
            repname: None,
            semantic_labels: BTreeSet::new(),
        }
    }

    pub fn with_repname(mut self, repname: impl Into<String>) -> Self {
        self.repname = Some(repname.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.semantic_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// The suffix subdivision this morpheme belongs to, if it is one of the
    /// predicate-forming suffixes.
    pub fn suffix_kind(&self) -> Option<SuffixKind> {
        if self.pos != PartOfSpeech::Suffix {
            return None;
        }
        match self.sub_pos.as_str() {
            "形容詞性名詞接尾辞" => Some(SuffixKind::AdjectivalNominal),
            "形容詞性述語接尾辞" => Some(SuffixKind::AdjectivalPredicate),
            "動詞性接尾辞" => Some(SuffixKind::Verbal),
            _ => None,
        }
    }

    /// Whether the morpheme carries the given semantic label.
    pub fn has_label(&self, label: &str) -> bool {
        self.semantic_labels.contains(label)
    }
}

/// One filler of a case slot.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Argument {
    /// Reference to a chunk of a parsed sentence.
    Chunk { sid: String, index: usize },
    /// Referent outside the parse, e.g. exophoric 「著者」「読者」「不特定:人」.
    Special(String),
}

/// Predicate-argument structure: case-role label → ordered argument list.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaseFrame {
    slots: BTreeMap<String, Vec<Argument>>,
}

impl CaseFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, case: impl Into<String>, argument: Argument) {
        self.slots.entry(case.into()).or_default().push(argument);
    }

    pub fn arguments(&self, case: &str) -> &[Argument] {
        self.slots.get(case).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First filler of the nominative (ガ格) slot.
    pub fn nominative(&self) -> Option<&Argument> {
        self.arguments("ガ").first()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }
}

/// A chunk (文節): contiguous morphemes forming one phrase unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Chunk {
    /// Morphemes in document order. Always non-empty in parser output.
    pub morphemes: Vec<Morpheme>,
    pub features: Features,
    #[serde(default)]
    pub case_frame: Option<CaseFrame>,
}

impl Chunk {
    /// Concatenated surface form of the chunk.
    pub fn surface(&self) -> String {
        self.morphemes.iter().map(|m| m.surface.as_str()).collect()
    }

    /// Whether the chunk is annotated as a predicate (用言).
    pub fn is_predicate(&self) -> bool {
        self.features.predicate_type().is_some()
    }

    /// Head repname of the chunk; the prime head (主辞’代表表記) wins over
    /// the plain head (主辞代表表記) when both are annotated.
    pub fn head_repname(&self) -> Option<&str> {
        self.features.head_repname()
    }
}

/// A parsed sentence: ordered chunks, addressable by index.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Sentence {
    /// S-ID assigned by the parser; referenced by cross-sentence arguments.
    pub id: String,
    pub chunks: Vec<Chunk>,
}

impl Sentence {
    pub fn chunk(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    pub fn surface(&self) -> String {
        self.chunks.iter().map(|c| c.surface()).collect()
    }
}
