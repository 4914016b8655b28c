//! JSON-lines record of verification attempts.
//!
//! Each attempt, successful or not, becomes one line. The file can be replayed with
//! [`read_entries`] to assert on what happened during a run.

use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Write},
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::{FailureKind, VerificationResult, VerifyError};

/// Error writing or reading a transcript.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// I/O failure on the underlying writer or reader.
    #[error("transcript I/O error: {0}")]
    Io(#[from] io::Error),
    /// An entry could not be encoded or decoded.
    #[error("transcript encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    /// A previous writer panicked while holding the transcript.
    #[error("transcript writer poisoned")]
    Poisoned,
}

/// What an attempt ended with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TranscriptOutcome {
    /// The attempt reached the comparison stage.
    Verified {
        /// The comparison outcome.
        result: VerificationResult,
    },
    /// The attempt failed before comparison.
    Failed {
        /// Failure class.
        kind: FailureKind,
        /// Rendered error.
        message: String,
    },
}

impl From<&Result<VerificationResult, VerifyError>> for TranscriptOutcome {
    fn from(outcome: &Result<VerificationResult, VerifyError>) -> Self {
        match outcome {
            Ok(result) => Self::Verified { result: result.clone() },
            Err(err) => Self::Failed { kind: err.kind(), message: err.to_string() },
        }
    }
}

/// One line of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Position of the attempt within the transcript, starting at zero.
    pub sequence: u64,
    /// Salt of the attempt.
    pub salt: B256,
    /// Digest of the attempted init code.
    pub init_code_hash: B256,
    /// How the attempt ended.
    #[serde(flatten)]
    pub outcome: TranscriptOutcome,
}

/// A shared, append-only transcript writer.
#[derive(Debug)]
pub struct Transcript<W> {
    writer: Mutex<W>,
    next_sequence: AtomicU64,
}

impl Transcript<BufWriter<File>> {
    /// Creates (or truncates) a transcript file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> Transcript<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer), next_sequence: AtomicU64::new(0) }
    }

    /// Appends one attempt and flushes it.
    pub fn record(
        &self,
        salt: B256,
        init_code_hash: B256,
        outcome: &Result<VerificationResult, VerifyError>,
    ) -> Result<TranscriptEntry, TranscriptError> {
        let mut writer = self.writer.lock().map_err(|_| TranscriptError::Poisoned)?;
        let entry = TranscriptEntry {
            sequence: self.next_sequence.fetch_add(1, Ordering::SeqCst),
            salt,
            init_code_hash,
            outcome: outcome.into(),
        };
        serde_json::to_writer(&mut *writer, &entry)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(entry)
    }

    /// Number of entries written so far.
    pub fn len(&self) -> u64 {
        self.next_sequence.load(Ordering::SeqCst)
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> Result<W, TranscriptError> {
        self.writer.into_inner().map_err(|_| TranscriptError::Poisoned)
    }
}

/// Reads back every entry of a transcript. Blank lines are skipped.
pub fn read_entries(reader: impl BufRead) -> Result<Vec<TranscriptEntry>, TranscriptError> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        entries.push(serde_json::from_str(&line)?);
    }
    Ok(entries)
}
