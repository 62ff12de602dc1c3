// Streaming field extractor for the player API's pretty-printed bodies
// Handles the format: `"key" : value,\n` (one field per line)

use bytes::Bytes;
use futures::{Stream, StreamExt};

use crate::RemoteError;

/// Outcome of scanning a byte source for one field. Callers must branch on
/// this; `NotFound` and `Truncated` mean the whole poll is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Found(String),
    NotFound,
    Truncated,
}

/// Pull-based byte source the scanner is driven from. A read suspends until
/// a byte is available or the source reports closed (`Ok(None)`).
#[allow(async_fn_in_trait)]
pub trait ByteSource {
    async fn next_byte(&mut self) -> Result<Option<u8>, RemoteError>;
}

/// Byte source over a chunked HTTP response body. Holds at most one chunk
/// at a time, so memory use is independent of the payload size.
pub struct ChunkedByteSource<S> {
    stream: S,
    chunk: Bytes,
    pos: usize,
    closed: bool,
}

impl<S> ChunkedByteSource<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            chunk: Bytes::new(),
            pos: 0,
            closed: false,
        }
    }
}

impl<S> ByteSource for ChunkedByteSource<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Unpin,
{
    async fn next_byte(&mut self) -> Result<Option<u8>, RemoteError> {
        while self.pos >= self.chunk.len() {
            if self.closed {
                return Ok(None);
            }
            match self.stream.next().await {
                Some(Ok(chunk)) => {
                    if chunk.is_empty() {
                        continue;
                    }
                    self.chunk = chunk;
                    self.pos = 0;
                }
                Some(Err(e)) => return Err(RemoteError::RequestFailed(e)),
                None => {
                    self.closed = true;
                    return Ok(None);
                }
            }
        }
        let byte = self.chunk[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }
}

/// In-memory byte source, mainly for tests and demos.
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    async fn next_byte(&mut self) -> Result<Option<u8>, RemoteError> {
        match self.bytes.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }
}

/// Byte-at-a-time scanner for a single `key : value` line.
pub struct FieldScanner<'k> {
    key: &'k [u8],
    state: ScanState,
}

enum ScanState {
    // No prefix of the key matched yet
    Idle,
    // First n bytes of the key matched
    MatchingKey(usize),
    // Full key matched, waiting for the `:` separating key and value
    AwaitingDelimiter,
    // Delimiter seen, discard the one character after it (opening quote or
    // the space of a pretty-printed payload)
    SkippingOpener,
    // Collecting value bytes until the line terminator
    Accumulating(Vec<u8>),
    // Value emitted, further input ignored
    Done,
}

/// Result of feeding one byte to the scanner.
pub enum ScanStep {
    Continue,
    Complete(String),
}

impl<'k> FieldScanner<'k> {
    pub fn new(key: &'k str) -> Self {
        assert!(!key.is_empty(), "field key must be non-empty");
        Self {
            key: key.as_bytes(),
            state: ScanState::Idle,
        }
    }

    /// Advance the state machine by one input byte.
    pub fn push(&mut self, byte: u8) -> ScanStep {
        match &mut self.state {
            ScanState::Idle => {
                if byte == self.key[0] {
                    self.state = if self.key.len() == 1 {
                        ScanState::AwaitingDelimiter
                    } else {
                        ScanState::MatchingKey(1)
                    };
                }
                ScanStep::Continue
            }
            ScanState::MatchingKey(matched) => {
                if byte == self.key[*matched] {
                    *matched += 1;
                    if *matched == self.key.len() {
                        self.state = ScanState::AwaitingDelimiter;
                    }
                } else if byte == self.key[0] {
                    // A failed match can still start a fresh one
                    self.state = ScanState::MatchingKey(1);
                } else {
                    self.state = ScanState::Idle;
                }
                ScanStep::Continue
            }
            ScanState::AwaitingDelimiter => {
                if byte == b':' {
                    self.state = ScanState::SkippingOpener;
                }
                ScanStep::Continue
            }
            ScanState::SkippingOpener => {
                self.state = ScanState::Accumulating(Vec::new());
                ScanStep::Continue
            }
            ScanState::Accumulating(buf) => {
                if byte == b'\n' {
                    let value = strip_field_envelope(buf);
                    self.state = ScanState::Done;
                    ScanStep::Complete(value)
                } else {
                    buf.push(byte);
                    ScanStep::Continue
                }
            }
            ScanState::Done => ScanStep::Continue,
        }
    }

    /// Classify the terminal state once the source reports closed. A
    /// completed scanner already handed its value out through `push`.
    pub fn finish(self) -> ExtractionResult {
        match self.state {
            ScanState::Idle | ScanState::MatchingKey(_) | ScanState::Done => {
                ExtractionResult::NotFound
            }
            ScanState::AwaitingDelimiter
            | ScanState::SkippingOpener
            | ScanState::Accumulating(_) => ExtractionResult::Truncated,
        }
    }
}

/// Strips the one-line field envelope from an accumulated value: one
/// trailing field separator (comma) if present, then one trailing and one
/// leading quote if present. Bare scalars (numbers, booleans) pass through
/// untouched. Specific to the one-field-per-line payload shape; this is
/// not a string unescape.
pub fn strip_field_envelope(raw: &[u8]) -> String {
    let mut value = String::from_utf8_lossy(raw).into_owned();
    if value.ends_with(',') {
        value.pop();
    }
    if value.ends_with('"') {
        value.pop();
    }
    if value.starts_with('"') {
        value.remove(0);
    }
    value
}

/// Scan `source` for the value of `key`. Consumes the source up to and
/// including the value's terminating newline; the remainder stays available
/// for subsequent extractions, so callers request fields in document order.
pub async fn extract_field(
    source: &mut impl ByteSource,
    key: &str,
) -> Result<ExtractionResult, RemoteError> {
    let mut scanner = FieldScanner::new(key);
    while let Some(byte) = source.next_byte().await? {
        if let ScanStep::Complete(value) = scanner.push(byte) {
            return Ok(ExtractionResult::Found(value));
        }
    }
    Ok(scanner.finish())
}

/// Treats anything but `Found` as a hard failure, so callers skip the
/// downstream state update instead of feeding partial strings onward.
pub fn require_field(
    result: ExtractionResult,
    key: &'static str,
) -> Result<String, RemoteError> {
    match result {
        ExtractionResult::Found(value) => Ok(value),
        ExtractionResult::NotFound => Err(RemoteError::FieldNotFound(key)),
        ExtractionResult::Truncated => Err(RemoteError::FieldTruncated(key)),
    }
}

/// Fits `value` to `max_width` as measured by `width_of`. A value that
/// already fits is returned unchanged; otherwise the longest prefix whose
/// width stays within `max_width` is returned with an ellipsis appended.
pub fn fit_to_width<F>(value: &str, width_of: F, max_width: u32) -> String
where
    F: Fn(&str) -> u32,
{
    if width_of(value) <= max_width {
        return value.to_string();
    }

    let mut fitted = String::new();
    for ch in value.chars() {
        let mut widened = fitted.clone();
        widened.push(ch);
        if width_of(&widened) > max_width {
            break;
        }
        fitted = widened;
    }
    fitted.push_str("...");
    fitted
}
