//! Store parser: raw `.lal` bytes into an [`AliasStore`].
//!
//! ```text
//! File   := Entry*
//! Entry  := Name ':' Line* '<<END>>' Skip*
//! Line   := '{' Segment* '}'
//! ```

use crate::error::{LalError, Result};
use crate::paths::is_restricted;
use crate::segment::{lex_segment, Cursor, Line};
use crate::store::{AliasNode, AliasStore};

pub const END_SENTINEL: &[u8] = b"<<END>>";

pub fn parse(bytes: &[u8]) -> Result<AliasStore> {
    let mut cursor = Cursor::new(bytes);
    let mut store = AliasStore::new();

    while !cursor.is_eof() {
        let name = read_name(&mut cursor)?;
        let lines = read_body(&mut cursor, &name)?;
        skip_restricted(&mut cursor);
        store.push(AliasNode::from_parts(name, lines));
    }

    tracing::debug!(aliases = store.len(), bytes = bytes.len(), "parsed alias store");
    Ok(store)
}

fn read_name(cursor: &mut Cursor<'_>) -> Result<Vec<u8>> {
    let start = cursor.pos();
    let mut name = Vec::new();
    loop {
        match cursor.bump() {
            None => {
                return Err(LalError::UnexpectedEndOfInput {
                    offset: start,
                    delimiter: ":",
                })
            }
            Some(b':') => break,
            Some(byte) if is_restricted(byte) => {
                name.push(byte);
                return Err(malformed(&name));
            }
            Some(byte) => name.push(byte),
        }
    }
    if name.is_empty() {
        return Err(malformed(&name));
    }
    Ok(name)
}

fn read_body(cursor: &mut Cursor<'_>, name: &[u8]) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    loop {
        if cursor.starts_with(END_SENTINEL) {
            cursor.advance(END_SENTINEL.len());
            return Ok(lines);
        }
        match cursor.peek() {
            Some(b'{') => lines.push(read_line(cursor)?),
            // Tolerate whitespace between blocks in hand-edited files.
            Some(byte) if byte.is_ascii_whitespace() => cursor.advance(1),
            Some(byte) => {
                return Err(LalError::UnexpectedBodyByte {
                    label: String::from_utf8_lossy(name).into_owned(),
                    offset: cursor.pos(),
                    byte: char::from(byte),
                })
            }
            None => {
                return Err(LalError::MissingTerminator(
                    String::from_utf8_lossy(name).into_owned(),
                ))
            }
        }
    }
}

fn read_line(cursor: &mut Cursor<'_>) -> Result<Line> {
    let open_at = cursor.pos();
    cursor.advance(1);

    let mut line = Line::new();
    let mut depth = 1usize;
    loop {
        match cursor.peek() {
            None => {
                return Err(LalError::UnexpectedEndOfInput {
                    offset: open_at,
                    delimiter: "{",
                })
            }
            Some(b'{') => depth += 1,
            Some(b'}') => {
                depth -= 1;
                if depth == 0 {
                    cursor.advance(1);
                    return Ok(line);
                }
            }
            _ => {}
        }
        lex_segment(cursor, &mut line)?;
    }
}

fn skip_restricted(cursor: &mut Cursor<'_>) {
    while cursor.peek().is_some_and(is_restricted) {
        cursor.advance(1);
    }
}

fn malformed(name: &[u8]) -> LalError {
    LalError::MalformedLabel(String::from_utf8_lossy(name).into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
