//! Chunk-level feature annotations.
//!
//! KNP attaches a bag of feature flags to every chunk: plain markers
//! (「文末」「SM-主体」), colon-separated key/value pairs (「用言:動」
//! 「態:受動」「主辞代表表記:考える/かんがえる」) and dash-joined modality
//! tags (「モダリティ-意志」). The bag is kept verbatim; accessors below
//! interpret the handful of shapes the rest of the system reads.

use std::collections::BTreeSet;

/// Predicate type (用言) of a chunk.
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
pub enum PredicateType {
    #[serde(rename = "動")]
    #[display("動")]
    Verbal,
    #[serde(rename = "形")]
    #[display("形")]
    Adjectival,
    #[serde(rename = "判")]
    #[display("判")]
    Copular,
}

/// Feature bag of a chunk: an unordered set of flag strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Features {
    flags: BTreeSet<String>,
}

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flag: impl Into<String>) {
        self.flags.insert(flag.into());
    }

    /// Exact-string membership of a flag.
    pub fn has(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    /// Values of every colon-separated flag under `key`, e.g.
    /// `values("態")` yields 「受動」 for a bag containing 「態:受動」.
    pub fn values<'s, 'k>(&'s self, key: &'k str) -> impl Iterator<Item = &'s str> + use<'s, 'k> {
        self.flags
            .iter()
            .filter_map(move |flag| flag.strip_prefix(key).and_then(|rest| rest.strip_prefix(':')))
    }

    /// First value under `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values(key).next()
    }

    /// Modality tags (「モダリティ-意志」 yields 「意志」).
    pub fn modalities(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter_map(|flag| flag.strip_prefix("モダリティ-"))
    }

    /// Voice tags (「態:受動」 yields 「受動」). Combined alternations such
    /// as 「受動|可能」 are kept verbatim as a single value.
    pub fn voices(&self) -> impl Iterator<Item = &str> {
        self.values("態")
    }

    /// The chunk's predicate type (「用言:動」「用言:形」「用言:判」).
    pub fn predicate_type(&self) -> Option<PredicateType> {
        self.value("用言").and_then(|v| v.parse().ok())
    }

    /// Head repname; the prime head annotation wins when present.
    pub fn head_repname(&self) -> Option<&str> {
        self.value("主辞’代表表記").or_else(|| self.value("主辞代表表記"))
    }
}

impl FromIterator<String> for Features {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for Features {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(flags: &[&str]) -> Features {
        flags.iter().copied().collect()
    }

    #[test]
    fn test_flag_membership() {
        let f = features(&["文末", "SM-主体"]);
        assert!(f.has("SM-主体"));
        assert!(!f.has("SM-人"));
        // Membership is exact, not prefix
        assert!(!f.has("SM"));
    }

    #[test]
    fn test_predicate_type() {
        assert_eq!(features(&["用言:動"]).predicate_type(), Some(PredicateType::Verbal));
        assert_eq!(features(&["用言:形"]).predicate_type(), Some(PredicateType::Adjectival));
        assert_eq!(features(&["用言:判"]).predicate_type(), Some(PredicateType::Copular));
        assert_eq!(features(&["体言"]).predicate_type(), None);
        // Malformed value reads as no annotation
        assert_eq!(features(&["用言:謎"]).predicate_type(), None);
    }

    #[test]
    fn test_modalities_and_voices() {
        let f = features(&["モダリティ-意志", "モダリティ-勧誘", "態:受動|可能", "文末"]);
        let modalities: Vec<_> = f.modalities().collect();
        assert!(modalities.contains(&"意志"));
        assert!(modalities.contains(&"勧誘"));
        assert_eq!(modalities.len(), 2);
        assert_eq!(f.voices().collect::<Vec<_>>(), vec!["受動|可能"]);
    }

    #[test]
    fn test_head_repname_prime_precedence() {
        let f = features(&["主辞代表表記:処理/しょり", "主辞’代表表記:言語処理/げんごしょり"]);
        assert_eq!(f.head_repname(), Some("言語処理/げんごしょり"));

        let f = features(&["主辞代表表記:考える/かんがえる"]);
        assert_eq!(f.head_repname(), Some("考える/かんがえる"));

        assert_eq!(features(&["文末"]).head_repname(), None);
    }
}
