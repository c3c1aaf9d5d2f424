//! Ingestion of KNP tab-format output.
//!
//! One analysis is a `# S-ID:` comment, `*` bunsetsu lines and `+`
//! basic-phrase lines (each carrying a `<…>` feature bag), 12-field JUMAN
//! morpheme lines, and an `EOS` terminator. Basic-phrase features are merged
//! into the enclosing bunsetsu: the classifier reasons at chunk granularity,
//! and the predicate's tag is the last one in its bunsetsu.

use crate::{Argument, CaseFrame, Chunk, Morpheme, Sentence};

#[derive(Debug, thiserror::Error)]
pub enum TabParseError {
    #[error("line {line}: morpheme entry outside a bunsetsu")]
    OrphanMorpheme { line: usize },
    #[error("line {line}: malformed morpheme entry")]
    MalformedMorpheme { line: usize },
    #[error("line {line}: unknown part of speech 「{pos}」")]
    UnknownPos { line: usize, pos: String },
    #[error("analysis ended without EOS")]
    MissingEos,
    #[error("empty analysis")]
    Empty,
}

impl Sentence {
    /// Parse one sentence from `knp -tab` output.
    pub fn from_knp_tab(text: &str) -> Result<Sentence, TabParseError> {
        let mut id = String::new();
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut saw_eos = false;

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            let lineno = i + 1;
            if line.is_empty() {
                continue;
            }
            if line == "EOS" {
                saw_eos = true;
                break;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if id.is_empty() {
                    if let Some(sid) = extract_sid(comment) {
                        id = sid.to_string();
                    }
                }
            } else if line.starts_with('*') {
                let mut chunk = Chunk::default();
                apply_features(&mut chunk, line);
                chunks.push(chunk);
            } else if line.starts_with('+') {
                // Basic-phrase line: fold its features into the enclosing
                // bunsetsu (started lazily if the parser omitted the * line).
                if chunks.is_empty() {
                    chunks.push(Chunk::default());
                }
                if let Some(chunk) = chunks.last_mut() {
                    apply_features(chunk, line);
                }
            } else {
                let chunk = chunks
                    .last_mut()
                    .ok_or(TabParseError::OrphanMorpheme { line: lineno })?;
                chunk.morphemes.push(parse_morpheme(line, lineno)?);
            }
        }

        if !saw_eos {
            return Err(TabParseError::MissingEos);
        }
        if chunks.is_empty() {
            return Err(TabParseError::Empty);
        }
        Ok(Sentence { id, chunks })
    }
}

fn extract_sid(comment: &str) -> Option<&str> {
    let rest = comment.trim_start().strip_prefix("S-ID:")?;
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Add every `<…>` flag on a `*`/`+` line to the chunk, lifting a
/// 「格解析結果」 flag into the chunk's case frame as a side effect.
fn apply_features(chunk: &mut Chunk, line: &str) {
    for flag in line.split('<').skip(1).filter_map(|s| s.split('>').next()) {
        if flag.is_empty() {
            continue;
        }
        if let Some(value) = flag.strip_prefix("格解析結果:") {
            // The predicate tag comes last within its bunsetsu, so a later
            // frame replaces an earlier one.
            chunk.case_frame = parse_case_frame(value);
        }
        chunk.features.insert(flag);
    }
}

/// Parse 「格解析結果」: `<repname>:<frame-id>:` then `;`-separated slots,
/// each `case/mark/surface/tag-index/sentence-distance/sid`.
fn parse_case_frame(value: &str) -> Option<CaseFrame> {
    let mut parts = value.splitn(3, ':');
    let _repname = parts.next()?;
    let _frame_id = parts.next()?;
    let slots = parts.next()?;

    let mut frame = CaseFrame::new();
    for slot in slots.split(';') {
        let fields: Vec<&str> = slot.split('/').collect();
        let (Some(case), Some(mark), Some(surface)) =
            (fields.first(), fields.get(1), fields.get(2))
        else {
            log::debug!("skipping malformed case slot 「{slot}」");
            continue;
        };
        if *mark == "U" || *surface == "-" {
            continue; // unfilled slot
        }
        let index = fields.get(3).and_then(|t| t.parse::<usize>().ok());
        let sid = fields.get(5).filter(|s| **s != "-");
        let argument = match (index, sid) {
            (Some(index), Some(sid)) => Argument::Chunk {
                sid: sid.to_string(),
                index,
            },
            _ => Argument::Special(surface.to_string()),
        };
        frame.push(*case, argument);
    }
    Some(frame)
}

/// Parse a 12-field JUMAN morpheme line; the final field is the quoted
/// semantic-information string (`NIL` when absent).
fn parse_morpheme(line: &str, lineno: usize) -> Result<Morpheme, TabParseError> {
    let fields: Vec<&str> = line.splitn(12, ' ').collect();
    if fields.len() < 12 {
        return Err(TabParseError::MalformedMorpheme { line: lineno });
    }
    let pos = fields[3]
        .parse()
        .map_err(|_| TabParseError::UnknownPos {
            line: lineno,
            pos: fields[3].to_string(),
        })?;

    let star = |s: &str| if s == "*" { String::new() } else { s.to_string() };
    let mut morpheme = Morpheme {
        surface: fields[0].to_string(),
        reading: fields[1].to_string(),
        lemma: fields[2].to_string(),
        pos,
        sub_pos: star(fields[5]),
        conjugation_type: star(fields[7]),
        conjugation_form: star(fields[9]),
        repname: None,
        semantic_labels: Default::default(),
    };

    let imis = fields[11].trim().trim_matches('"');
    if imis != "NIL" {
        for label in imis.split_whitespace() {
            if let Some(repname) = label.strip_prefix("代表表記:") {
                morpheme.repname = Some(repname.to_string());
                continue;
            }
            // Parameterized labels (「自他動詞:他:温める」) are also indexed
            // under their category prefix (「自他動詞:他」) so downstream
            // lookups stay exact-match.
            let segments: Vec<&str> = label.split(':').collect();
            if segments.len() >= 3 {
                morpheme
                    .semantic_labels
                    .insert(segments[..2].join(":"));
            }
            morpheme.semantic_labels.insert(label.to_string());
        }
    }
    Ok(morpheme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PartOfSpeech, PredicateType};

    const STUDY_NLP: &str = "\
# S-ID:1 KNP:4.19-CF1.1
* 1D <文頭><体言><係:ノ格>
+ 1D <文頭><体言>
自然 しぜん 自然 名詞 6 普通名詞 1 * 0 * 0 \"代表表記:自然/しぜん カテゴリ:抽象物\"
言語 げんご 言語 名詞 6 普通名詞 1 * 0 * 0 \"代表表記:言語/げんご カテゴリ:抽象物\"
処理 しょり 処理 名詞 6 サ変名詞 2 * 0 * 0 \"代表表記:処理/しょり カテゴリ:抽象物\"
の の の 助詞 9 接続助詞 3 * 0 * 0 NIL
* 2D <体言><係:ヲ格>
+ 2D <体言><主辞代表表記:勉強/べんきょう>
勉強 べんきょう 勉強 名詞 6 サ変名詞 2 * 0 * 0 \"代表表記:勉強/べんきょう カテゴリ:抽象物\"
を を を 助詞 9 格助詞 1 * 0 * 0 NIL
* -1D <文末><用言:動>
+ -1D <文末><用言:動><主辞代表表記:する/する><格解析結果:する/する:動1:ガ/U/-/-/-/-;ヲ/C/勉強/1/0/1>
する する する 動詞 2 * 0 サ変動詞 16 基本形 2 \"代表表記:する/する 自他動詞:自:成る\"
EOS
";

    #[test]
    fn test_parse_study_nlp() {
        let sentence = Sentence::from_knp_tab(STUDY_NLP).unwrap();
        assert_eq!(sentence.id, "1");
        assert_eq!(sentence.chunks.len(), 3);
        assert_eq!(sentence.chunks[0].surface(), "自然言語処理の");
        assert_eq!(sentence.surface(), "自然言語処理の勉強をする");

        let predicate = &sentence.chunks[2];
        assert_eq!(predicate.features.predicate_type(), Some(PredicateType::Verbal));
        assert_eq!(predicate.head_repname(), Some("する/する"));

        let suru = &predicate.morphemes[0];
        assert_eq!(suru.pos, PartOfSpeech::Verb);
        assert_eq!(suru.conjugation_type, "サ変動詞");
        assert_eq!(suru.conjugation_form, "基本形");
        assert_eq!(suru.repname.as_deref(), Some("する/する"));
        assert!(suru.has_label("自他動詞:自:成る"));
        // prefix-indexed form of the parameterized label
        assert!(suru.has_label("自他動詞:自"));
        assert!(!suru.has_label("自他動詞:他"));
    }

    #[test]
    fn test_parse_case_frame_slots() {
        let sentence = Sentence::from_knp_tab(STUDY_NLP).unwrap();
        let frame = sentence.chunks[2].case_frame.as_ref().unwrap();
        // ガ was unfilled (U), ヲ points at the 勉強 chunk
        assert!(frame.nominative().is_none());
        assert_eq!(
            frame.arguments("ヲ"),
            &[Argument::Chunk { sid: "1".to_string(), index: 1 }]
        );
    }

    #[test]
    fn test_exophoric_argument() {
        let input = "\
# S-ID:7
* -1D <文末><用言:動>
+ -1D <文末><用言:動><格解析結果:飼う/かう:動2:ガ/E/著者/-/-/-;ヲ/C/ペット/0/0/7>
飼って かって 飼う 動詞 2 * 0 子音動詞ワ行 12 タ系連用テ形 14 \"代表表記:飼う/かう\"
EOS
";
        let sentence = Sentence::from_knp_tab(input).unwrap();
        let frame = sentence.chunks[0].case_frame.as_ref().unwrap();
        assert_eq!(frame.nominative(), Some(&Argument::Special("著者".to_string())));
    }

    #[test]
    fn test_morpheme_before_bunsetsu_is_an_error() {
        let input = "考える かんがえる 考える 動詞 2 * 0 母音動詞 1 基本形 2 NIL\nEOS\n";
        assert!(matches!(
            Sentence::from_knp_tab(input),
            Err(TabParseError::OrphanMorpheme { line: 1 })
        ));
    }

    #[test]
    fn test_malformed_morpheme() {
        let input = "* -1D <用言:動>\n考える かんがえる 考える 動詞\nEOS\n";
        assert!(matches!(
            Sentence::from_knp_tab(input),
            Err(TabParseError::MalformedMorpheme { line: 2 })
        ));
    }

    #[test]
    fn test_unknown_pos() {
        let input =
            "* -1D <用言:動>\n考える かんがえる 考える 動詞X 2 * 0 母音動詞 1 基本形 2 NIL\nEOS\n";
        assert!(matches!(
            Sentence::from_knp_tab(input),
            Err(TabParseError::UnknownPos { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_eos_and_empty() {
        assert!(matches!(
            Sentence::from_knp_tab("* -1D <用言:動>\n"),
            Err(TabParseError::MissingEos)
        ));
        assert!(matches!(Sentence::from_knp_tab("EOS\n"), Err(TabParseError::Empty)));
    }
}
