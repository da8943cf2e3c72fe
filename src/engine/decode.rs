//! Line-oriented decoding of the generation stream.
//!
//! Network chunks are cut into lines, and each non-blank line becomes one
//! independent decode attempt. A failed attempt only loses its own line.

use chat_types::StreamChunk;
use thiserror::Error;

/// A single streamed line that could not be decoded.
#[derive(Error, Debug)]
pub enum ChunkDecodeError {
    #[error("line is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("line is not a response record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of decoding one line.
#[derive(Debug)]
pub enum DecodeAttempt {
    Fragment(String),
    Skip(ChunkDecodeError),
}

/// Decode one raw line. Blank lines yield nothing.
pub fn decode_line(line: &[u8]) -> Option<DecodeAttempt> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text.trim(),
        Err(e) => return Some(DecodeAttempt::Skip(e.into())),
    };
    if text.is_empty() {
        return None;
    }

    Some(match StreamChunk::from_line(text) {
        Ok(chunk) => DecodeAttempt::Fragment(chunk.response),
        Err(e) => DecodeAttempt::Skip(e.into()),
    })
}

/// Reassembles lines from arbitrarily split byte chunks.
///
/// Bytes are buffered until a `\n` arrives, so a multi-byte character or a
/// JSON record split across network reads is decoded whole.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Feed bytes; returns every line completed by them (without `\n`).
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Vec<u8>> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            lines.push(line);
        }
        lines
    }

    /// The trailing line when the stream ends without a final newline.
    pub fn finish(self) -> Option<Vec<u8>> {
        (!self.pending.is_empty()).then_some(self.pending)
    }
}

/// Accumulated text plus decode bookkeeping for one stream.
#[derive(Debug, Default)]
pub struct Accumulator {
    text: String,
    fragments: usize,
    skipped: usize,
}

impl Accumulator {
    pub fn absorb(&mut self, attempt: DecodeAttempt) {
        match attempt {
            DecodeAttempt::Fragment(fragment) => {
                self.text.push_str(&fragment);
                self.fragments += 1;
            }
            DecodeAttempt::Skip(e) => {
                tracing::debug!(error = %e, "skipping undecodable stream line");
                self.skipped += 1;
            }
        }
    }

    /// Decode and absorb every non-blank line.
    pub fn absorb_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        for attempt in lines.into_iter().filter_map(|l| decode_line(&l)) {
            self.absorb(attempt);
        }
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Final reply text, surrounding whitespace removed.
    pub fn finish(self) -> String {
        self.text.trim().to_string()
    }
}
