use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, anyhow};
use bunsetsu::Sentence;
use volition::parser::KnpCommand;
use volition::{Input, RuleBook, VolitionClassifier};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "classify" => {
            if args.len() < 3 {
                eprintln!("Error: 'classify' requires at least one sentence");
                eprintln!("Usage: volition-cli classify <text> [<text>...]");
                return Err(anyhow!("Missing text for 'classify'"));
            }

            let classifier =
                VolitionClassifier::new(load_rules()?).with_parser(KnpCommand::new());

            for text in &args[2..] {
                let decision = classifier
                    .classify_traced(Input::Text(text.clone()), None)
                    .context(format!("failed to classify 「{text}」"))?;
                log::info!(
                    "「{text}」 decided at {:?} ({:?})",
                    decision.stage,
                    decision.matched
                );
                println!("{}\t{}", verdict_label(decision.volitional), text);
            }
        }
        "batch" => {
            let path = args
                .get(2)
                .ok_or_else(|| anyhow!("Missing JSONL file for 'batch'"))?;
            let classifier = VolitionClassifier::new(load_rules()?);

            let file =
                File::open(path).context(format!("Failed to open sentence file: {path}"))?;
            for (idx, line) in BufReader::new(file).lines().enumerate() {
                let line = line.context(format!("Failed to read line {idx}"))?;
                if line.trim().is_empty() {
                    continue;
                }
                let sentence: Sentence = serde_json::from_str(&line)
                    .context(format!("Failed to deserialize line {idx}: {line}"))?;
                let surface = sentence.surface();
                let volitional = classifier.classify(Input::Sentence(sentence), None)?;
                println!("{}\t{}", verdict_label(volitional), surface);
            }
        }
        command => {
            eprintln!("Error: Unknown command '{command}'");
            print_usage();
            return Err(anyhow!("Unknown command"));
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: volition-cli <command> [args...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  classify <text> [<text>...]  Parse with jumanpp/knp and classify each sentence");
    eprintln!("  batch <file.jsonl>           Classify pre-parsed sentences, one JSON per line");
    eprintln!();
    eprintln!("Set VOLITION_RULES_DIR to load rule files from a directory instead of the");
    eprintln!("bundled defaults.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  volition-cli classify 自然言語処理の勉強をする");
    eprintln!("  volition-cli batch parsed_sentences.jsonl");
}

fn load_rules() -> anyhow::Result<RuleBook> {
    match std::env::var_os("VOLITION_RULES_DIR") {
        Some(dir) => RuleBook::from_dir(Path::new(&dir))
            .context("Failed to load rule directory from VOLITION_RULES_DIR"),
        None => Ok(RuleBook::bundled()),
    }
}

fn verdict_label(volitional: bool) -> &'static str {
    if volitional { "volitional" } else { "non-volitional" }
}
