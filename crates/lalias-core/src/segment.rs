//! Line model and the segment lexer.
//!
//! A [`Line`] is an ordered run of [`Segment`]s: verbatim literal bytes and
//! `<<N>>` placeholders that stand for the Nth positional argument at
//! invocation time. The same lexer scans line bodies inside the store file and
//! line text typed on the command line, so both produce identical segments.
//!
//! Placeholders keep their raw inner bytes. The index is only resolved when
//! an alias is invoked, which is where a non-numeric placeholder is reported.

use crate::error::{LalError, Result};

pub const PLACEHOLDER_OPEN: &[u8] = b"<<";
pub const PLACEHOLDER_CLOSE: &[u8] = b">>";

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    raw: Vec<u8>,
}

impl Placeholder {
    pub fn new(index: usize) -> Self {
        Self {
            raw: index.to_string().into_bytes(),
        }
    }

    pub fn from_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    /// The bytes between the outer `<<` and `>>`.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Resolve the argument index this placeholder refers to.
    pub fn index(&self) -> Result<usize> {
        parse_non_negative(&self.raw).ok_or_else(|| {
            LalError::MalformedPlaceholder(String::from_utf8_lossy(&self.raw).into_owned())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(Vec<u8>),
    Placeholder(Placeholder),
}

/// One shell-command template: the contents of a single `{...}` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lex command-line text into a line.
    ///
    /// Braces in literal text must balance, otherwise the serialized
    /// `{...}` block would close early or never close on reparse.
    pub fn from_text(text: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(text);
        let mut line = Line::new();
        let mut depth = 0usize;

        while !cursor.is_eof() {
            match lex_segment(&mut cursor, &mut line)? {
                Some(b'{') => depth += 1,
                Some(b'}') => {
                    depth = depth.checked_sub(1).ok_or_else(|| unbalanced(text))?;
                }
                _ => {}
            }
        }

        if depth != 0 {
            return Err(unbalanced(text));
        }
        Ok(line)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append one literal byte, extending the trailing literal if there is one.
    pub fn push_literal_byte(&mut self, byte: u8) {
        match self.segments.last_mut() {
            Some(Segment::Literal(bytes)) => bytes.push(byte),
            _ => self.segments.push(Segment::Literal(vec![byte])),
        }
    }

    pub fn push_placeholder(&mut self, placeholder: Placeholder) {
        self.segments.push(Segment::Placeholder(placeholder));
    }

    /// Write the canonical text of this line (without the enclosing braces).
    pub fn write_text(&self, out: &mut Vec<u8>) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(bytes) => out.extend_from_slice(bytes),
                Segment::Placeholder(p) => {
                    out.extend_from_slice(PLACEHOLDER_OPEN);
                    out.extend_from_slice(p.raw());
                    out.extend_from_slice(PLACEHOLDER_CLOSE);
                }
            }
        }
    }

    pub fn to_text(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_text(&mut out);
        out
    }
}

fn unbalanced(text: &[u8]) -> LalError {
    LalError::UnbalancedLine(String::from_utf8_lossy(text).into_owned())
}

/// Parse a non-empty run of ASCII digits. Signs, whitespace and values that
/// overflow `usize` are rejected.
pub fn parse_non_negative(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Explicit scan position over a byte buffer.
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    pub fn starts_with(&self, pattern: &[u8]) -> bool {
        self.buf
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(pattern))
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.buf.len());
    }

    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// Scan one segment at the cursor into `line`.
///
/// A `<<` consumes a whole (possibly nested) placeholder and returns `None`.
/// Anything else consumes exactly one literal byte and returns it, so callers
/// can track brace depth.
pub fn lex_segment(cursor: &mut Cursor<'_>, line: &mut Line) -> Result<Option<u8>> {
    if cursor.starts_with(PLACEHOLDER_OPEN) {
        let placeholder = lex_placeholder(cursor)?;
        line.push_placeholder(placeholder);
        return Ok(None);
    }
    match cursor.bump() {
        Some(byte) => {
            line.push_literal_byte(byte);
            Ok(Some(byte))
        }
        None => Ok(None),
    }
}

fn lex_placeholder(cursor: &mut Cursor<'_>) -> Result<Placeholder> {
    let open_at = cursor.pos();
    cursor.advance(PLACEHOLDER_OPEN.len());

    let mut depth = 1usize;
    let mut raw = Vec::new();
    loop {
        if cursor.is_eof() {
            return Err(LalError::UnexpectedEndOfInput {
                offset: open_at,
                delimiter: "<<",
            });
        }
        if cursor.starts_with(PLACEHOLDER_OPEN) {
            depth += 1;
            raw.extend_from_slice(PLACEHOLDER_OPEN);
            cursor.advance(PLACEHOLDER_OPEN.len());
        } else if cursor.starts_with(PLACEHOLDER_CLOSE) {
            depth -= 1;
            cursor.advance(PLACEHOLDER_CLOSE.len());
            if depth == 0 {
                return Ok(Placeholder::from_raw(raw));
            }
            raw.extend_from_slice(PLACEHOLDER_CLOSE);
        } else if let Some(byte) = cursor.bump() {
            raw.push(byte);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
