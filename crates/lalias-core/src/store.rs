//! The alias store and its mutation engine.
//!
//! Every mutation validates all of its inputs before touching the store, so a
//! failed command leaves the in-memory store exactly as it was loaded.

use crate::error::{LalError, Result};
use crate::io::{atomic_write, read_if_exists};
use crate::paths::{store_path, validate_label};
use crate::segment::Line;
use crate::{parser, serializer};
use std::path::Path;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// One named alias: a label and its ordered command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasNode {
    name: Vec<u8>,
    lines: Vec<Line>,
}

impl AliasNode {
    pub(crate) fn from_parts(name: Vec<u8>, lines: Vec<Line>) -> Self {
        Self { name, lines }
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

/// Ordered collection of aliases backing one `.lal` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasStore {
    nodes: Vec<AliasNode>,
}

/// What `append` did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Created,
    Extended,
}

impl AliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `root/.lal`. A missing or zero-length file is an
    /// empty store.
    pub fn load(root: &Path) -> Result<Self> {
        let path = store_path(root);
        match read_if_exists(&path)? {
            Some(bytes) => parser::parse(&bytes),
            None => {
                tracing::debug!(path = %path.display(), "no store file; starting empty");
                Ok(Self::new())
            }
        }
    }

    /// Atomically replace `root/.lal` with the serialized store.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = store_path(root);
        let bytes = serializer::serialize(self);
        atomic_write(&path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "rewrote store");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasNode> {
        self.nodes.iter()
    }

    pub fn get(&self, name: &[u8]) -> Option<&AliasNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Look up an alias by exact label, failing with `LabelNotFound`.
    pub fn find(&self, name: &[u8]) -> Result<&AliasNode> {
        self.get(name).ok_or_else(|| not_found(name))
    }

    pub(crate) fn push(&mut self, node: AliasNode) {
        self.nodes.push(node);
    }

    fn position(&self, name: &[u8]) -> Result<usize> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .ok_or_else(|| not_found(name))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append one line per text to `name`, creating the alias at the tail of
    /// the store if it does not exist yet.
    pub fn append<T: AsRef<[u8]>>(&mut self, name: &[u8], texts: &[T]) -> Result<AppendOutcome> {
        validate_label(name)?;
        let new_lines = lex_lines(texts)?;

        let outcome = match self.nodes.iter_mut().find(|n| n.name == name) {
            Some(node) => {
                node.lines.extend(new_lines);
                AppendOutcome::Extended
            }
            None => {
                self.nodes
                    .push(AliasNode::from_parts(name.to_vec(), new_lines));
                AppendOutcome::Created
            }
        };
        tracing::debug!(alias = %String::from_utf8_lossy(name), lines = texts.len(), ?outcome, "appended");
        Ok(outcome)
    }

    /// Remove the last `count` lines of `name`. An alias left without lines is
    /// removed from the store. Returns the number of lines remaining.
    pub fn truncate(&mut self, name: &[u8], count: usize) -> Result<usize> {
        let idx = self.position(name)?;
        let available = self.nodes[idx].lines.len();
        if count > available {
            return Err(LalError::TruncateFailure {
                label: String::from_utf8_lossy(name).into_owned(),
                requested: count,
                available,
            });
        }

        let remaining = available - count;
        self.nodes[idx].lines.truncate(remaining);
        if remaining == 0 {
            self.nodes.remove(idx);
            tracing::debug!(alias = %String::from_utf8_lossy(name), "truncated to empty; alias removed");
        }
        Ok(remaining)
    }

    /// Remove `name` and all of its lines.
    pub fn delete(&mut self, name: &[u8]) -> Result<AliasNode> {
        let idx = self.position(name)?;
        Ok(self.nodes.remove(idx))
    }

    /// Give `name` a new label. Renaming onto a label held by another alias is
    /// rejected so labels stay unique.
    pub fn rename(&mut self, name: &[u8], new_name: &[u8]) -> Result<()> {
        validate_label(new_name)?;
        let idx = self.position(name)?;
        if name == new_name {
            return Ok(());
        }
        if self.get(new_name).is_some() {
            return Err(LalError::LabelExists(
                String::from_utf8_lossy(new_name).into_owned(),
            ));
        }
        self.nodes[idx].name = new_name.to_vec();
        Ok(())
    }

    /// Replace every line of an existing alias.
    pub fn overwrite<T: AsRef<[u8]>>(&mut self, name: &[u8], texts: &[T]) -> Result<()> {
        let idx = self.position(name)?;
        let new_lines = lex_lines(texts)?;
        self.nodes[idx].lines = new_lines;
        Ok(())
    }
}

fn lex_lines<T: AsRef<[u8]>>(texts: &[T]) -> Result<Vec<Line>> {
    if texts.is_empty() {
        return Err(LalError::InsufficientInputs {
            expected: 1,
            got: 0,
        });
    }
    texts.iter().map(|t| Line::from_text(t.as_ref())).collect()
}

fn not_found(name: &[u8]) -> LalError {
    LalError::LabelNotFound(String::from_utf8_lossy(name).into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
