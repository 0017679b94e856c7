// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret redaction for transcripts.
//!
//! Any `api_key=`, `api-key=`, `apikey=`, `token=` or `secret=` assignment
//! (case-insensitive) has its value replaced with `<redacted>`. The key
//! keeps its original spelling.

use regex::Regex;
use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::LazyLock;

/// Replacement for a redacted value
pub const REDACTED: &str = "<redacted>";

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static SECRET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(api[_-]?key|token|secret)=\S+").expect("constant regex pattern is valid")
});

/// Redact secret assignments in one line of text.
pub fn redact(text: &str) -> Cow<'_, str> {
    SECRET_PATTERN.replace_all(text, |caps: &regex::Captures<'_>| {
        format!("{}={REDACTED}", &caps[1])
    })
}

/// Line-buffered redaction stage in front of a writer.
///
/// Bytes accumulate until a newline; each completed line is redacted and
/// forwarded with its newline. [`finish`](Self::finish) forwards any
/// trailing partial line as a final, newline-terminated line.
pub struct LineRedactor<W: Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> LineRedactor<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::new(),
        }
    }

    /// Feed raw output bytes.
    pub fn push(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.pending.extend_from_slice(bytes);
        let mut start = 0;
        while let Some(offset) = self.pending[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            let line = String::from_utf8_lossy(&self.pending[start..end]);
            write_line(&mut self.inner, &line)?;
            start = end + 1;
        }
        self.pending.drain(..start);
        Ok(())
    }

    /// Flush the trailing partial line, if any.
    pub fn finish(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            let line = String::from_utf8_lossy(&rest);
            write_line(&mut self.inner, line.trim_end_matches('\n'))?;
        }
        self.inner.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

// One write per line so writers shared between streams never split a line
fn write_line<W: Write>(out: &mut W, line: &str) -> io::Result<()> {
    let mut bytes = redact(line).into_owned().into_bytes();
    bytes.push(b'\n');
    out.write_all(&bytes)
}

#[cfg(test)]
#[path = "redact_tests.rs"]
mod tests;
