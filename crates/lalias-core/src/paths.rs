use crate::error::{LalError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const STORE_FILE: &str = ".lal";

/// Bytes that may never appear in an alias label.
pub const RESTRICTED_LABEL_BYTES: &[u8] = b" \n{}<>";

pub fn store_path(root: &Path) -> PathBuf {
    root.join(STORE_FILE)
}

// ---------------------------------------------------------------------------
// Label validation
// ---------------------------------------------------------------------------

pub fn is_restricted(byte: u8) -> bool {
    RESTRICTED_LABEL_BYTES.contains(&byte)
}

/// Validate a label supplied from outside the store file. The `:` name
/// terminator is rejected as well, since it would split the label on reparse.
pub fn validate_label(label: &[u8]) -> Result<()> {
    if label.is_empty() || label.iter().any(|&b| is_restricted(b) || b == b':') {
        return Err(LalError::MalformedLabel(
            String::from_utf8_lossy(label).into_owned(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
