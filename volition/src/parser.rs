//! Parser collaborator.
//!
//! Turning raw text into a parsed [`Sentence`] is outside the classifier's
//! core; it happens behind this trait so tests can substitute a stub. The
//! shipped adapter pipes text through the JUMAN and KNP command-line tools.

use std::io::Write;
use std::process::{Command, Stdio};

use bunsetsu::Sentence;
use bunsetsu::knp::TabParseError;
use bunsetsu::normalize::to_fullwidth;

/// Collaborator failures are passed through the classifier unchanged.
pub type ParserError = Box<dyn std::error::Error + Send + Sync>;

/// External morphological/dependency parser. A blocking call; latency,
/// retries and timeouts are this collaborator's business, not the
/// classifier's. `Send + Sync` so a classifier can be shared across
/// threads.
pub trait SentenceParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Sentence, ParserError>;
}

#[derive(Debug, thiserror::Error)]
pub enum KnpError {
    #[error("failed to run {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("parser output is not valid UTF-8")]
    Utf8(#[source] std::string::FromUtf8Error),
    #[error(transparent)]
    Tab(#[from] TabParseError),
}

/// Adapter over the `jumanpp | knp -tab` command pipeline.
///
/// Input is normalized to full width first, since JUMAN rejects half-width
/// text.
pub struct KnpCommand {
    juman: String,
    knp: String,
}

impl KnpCommand {
    pub fn new() -> Self {
        Self::with_commands("jumanpp", "knp")
    }

    pub fn with_commands(juman: impl Into<String>, knp: impl Into<String>) -> Self {
        Self { juman: juman.into(), knp: knp.into() }
    }
}

impl Default for KnpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceParser for KnpCommand {
    fn parse(&self, text: &str) -> Result<Sentence, ParserError> {
        let normalized = to_fullwidth(text);
        let morphology = run_piped(&self.juman, &[], normalized.as_bytes())?;
        let analysis = run_piped(&self.knp, &["-tab"], &morphology)?;
        let output = String::from_utf8(analysis).map_err(KnpError::Utf8)?;
        Ok(Sentence::from_knp_tab(&output).map_err(KnpError::from)?)
    }
}

fn run_piped(command: &str, args: &[&str], input: &[u8]) -> Result<Vec<u8>, KnpError> {
    let io = |source| KnpError::Io { command: command.to_string(), source };

    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(io)?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input).map_err(io)?;
    }
    let output = child.wait_with_output().map_err(io)?;

    if !output.status.success() {
        return Err(KnpError::Failed {
            command: command.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}
