//! Rule-set store.
//!
//! The cascade consults eleven named sets of exact-match strings. Each set is
//! backed by one UTF-8 file (one entry per line, surrounding whitespace
//! stripped, blank lines ignored); the copies under `rules/` are compiled in
//! as defaults. A [`RuleBook`] is built once per classifier and is read-only
//! afterwards, so it can be shared across threads freely.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

/// Unordered set of exact-match rule entries.
pub type RuleSet = FxHashSet<String>;

/// The eleven rule categories the cascade reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    /// Exophoric subject surfaces that can act deliberately (著者, 読者, …).
    ValidNominatives,
    /// Chunk feature flags marking an agentive subject (SM-主体, …).
    ValidNominativeMarkers,
    /// Modality tags that assert volition (意志, 命令, …).
    VolitionModalities,
    /// Voice tags that assert volition (使役).
    VolitionVoices,
    /// Voice tags that deny volition (受動, 可能, combined alternations).
    NonVolitionVoices,
    /// Adjectival-predicate-suffix lemmas that keep volitionality (ない, たい).
    ValidAdjectiveSuffixLemmas,
    /// Semantic labels on verbal suffixes that deny volition.
    NonVolitionSuffixLabels,
    /// Verbal-suffix lemmas that deny volition (しまう, すぎる, …).
    NonVolitionSuffixLemmas,
    /// Predicate types that deny volition (形, 判).
    NonVolitionPredicateTypes,
    /// Head repnames of verbs denoting involuntary events (気付く/きづく, …).
    NonVolitionHeadLemmas,
    /// Semantic labels anywhere in the predicate that deny volition.
    NonVolitionLabels,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 11] = [
        RuleCategory::ValidNominatives,
        RuleCategory::ValidNominativeMarkers,
        RuleCategory::VolitionModalities,
        RuleCategory::VolitionVoices,
        RuleCategory::NonVolitionVoices,
        RuleCategory::ValidAdjectiveSuffixLemmas,
        RuleCategory::NonVolitionSuffixLabels,
        RuleCategory::NonVolitionSuffixLemmas,
        RuleCategory::NonVolitionPredicateTypes,
        RuleCategory::NonVolitionHeadLemmas,
        RuleCategory::NonVolitionLabels,
    ];

    /// File backing this category inside a rule directory.
    pub fn file_name(self) -> &'static str {
        match self {
            RuleCategory::ValidNominatives => "valid_nominatives.txt",
            RuleCategory::ValidNominativeMarkers => "valid_nominative_markers.txt",
            RuleCategory::VolitionModalities => "volition_modalities.txt",
            RuleCategory::VolitionVoices => "volition_voices.txt",
            RuleCategory::NonVolitionVoices => "non_volition_voices.txt",
            RuleCategory::ValidAdjectiveSuffixLemmas => "valid_adjective_suffix_lemmas.txt",
            RuleCategory::NonVolitionSuffixLabels => "non_volition_suffix_labels.txt",
            RuleCategory::NonVolitionSuffixLemmas => "non_volition_suffix_lemmas.txt",
            RuleCategory::NonVolitionPredicateTypes => "non_volition_predicate_types.txt",
            RuleCategory::NonVolitionHeadLemmas => "non_volition_head_lemmas.txt",
            RuleCategory::NonVolitionLabels => "non_volition_labels.txt",
        }
    }

    fn bundled_text(self) -> &'static str {
        match self {
            RuleCategory::ValidNominatives => include_str!("../rules/valid_nominatives.txt"),
            RuleCategory::ValidNominativeMarkers => {
                include_str!("../rules/valid_nominative_markers.txt")
            }
            RuleCategory::VolitionModalities => include_str!("../rules/volition_modalities.txt"),
            RuleCategory::VolitionVoices => include_str!("../rules/volition_voices.txt"),
            RuleCategory::NonVolitionVoices => include_str!("../rules/non_volition_voices.txt"),
            RuleCategory::ValidAdjectiveSuffixLemmas => {
                include_str!("../rules/valid_adjective_suffix_lemmas.txt")
            }
            RuleCategory::NonVolitionSuffixLabels => {
                include_str!("../rules/non_volition_suffix_labels.txt")
            }
            RuleCategory::NonVolitionSuffixLemmas => {
                include_str!("../rules/non_volition_suffix_lemmas.txt")
            }
            RuleCategory::NonVolitionPredicateTypes => {
                include_str!("../rules/non_volition_predicate_types.txt")
            }
            RuleCategory::NonVolitionHeadLemmas => {
                include_str!("../rules/non_volition_head_lemmas.txt")
            }
            RuleCategory::NonVolitionLabels => include_str!("../rules/non_volition_labels.txt"),
        }
    }
}

/// A rule file could not be read at construction time.
#[derive(Debug, thiserror::Error)]
#[error("rule file {}: {source}", .path.display())]
pub struct ConfigError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// The eleven rule sets, loaded once and immutable afterwards.
#[derive(Clone, Debug)]
pub struct RuleBook {
    sets: [RuleSet; 11],
}

impl RuleBook {
    /// The rule sets shipped with the crate.
    pub fn bundled() -> Self {
        Self {
            sets: RuleCategory::ALL.map(|category| parse_entries(category.bundled_text())),
        }
    }

    /// Load every category from `dir`, one file per category.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let mut sets: [RuleSet; 11] = std::array::from_fn(|_| RuleSet::default());
        for category in RuleCategory::ALL {
            let path = dir.join(category.file_name());
            let text = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError { path, source })?;
            sets[category as usize] = parse_entries(&text);
        }
        Ok(Self { sets })
    }

    /// Replace one category wholesale with caller-supplied entries.
    pub fn with_override<I, S>(mut self, category: RuleCategory, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets[category as usize] = entries.into_iter().map(Into::into).collect();
        self
    }

    pub fn get(&self, category: RuleCategory) -> &RuleSet {
        &self.sets[category as usize]
    }

    pub fn contains(&self, category: RuleCategory, entry: &str) -> bool {
        self.get(category).contains(entry)
    }
}

fn parse_entries(text: &str) -> RuleSet {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
