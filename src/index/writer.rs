//! Append side of the inverted index

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::MurexError;
use crate::index::path;
use crate::index::shard::Shard;
use crate::query::iter::DocId;
use crate::Result;

/// Append-only writer for per-term posting files.
///
/// Keeps a bounded cache of open append handles keyed by file path;
/// when the cache is full, every cached handle is closed before the new
/// one is opened. Callers must serialize appends and must feed each
/// term ascending, already-normalized ids.
pub struct InvertedWriter {
    root: PathBuf,
    descriptors: HashMap<PathBuf, File>,
    max_open_descriptors: usize,
    closed: bool,
}

impl InvertedWriter {
    pub fn new(root: impl Into<PathBuf>, max_open_descriptors: usize) -> Self {
        Self {
            root: root.into(),
            descriptors: HashMap::new(),
            max_open_descriptors,
            closed: false,
        }
    }

    /// Append one document id to the posting list for
    /// `(tag_key, tag_value)` in `shard`.
    pub fn append(
        &mut self,
        shard: &Shard,
        tag_key: &str,
        tag_value: &str,
        doc_id: DocId,
    ) -> Result<()> {
        if self.closed {
            return Err(MurexError::WriterClosed);
        }
        let filename = path::posting_file(&self.root, shard, tag_key, tag_value);

        if !self.descriptors.contains_key(&filename)
            && self.descriptors.len() >= self.max_open_descriptors
        {
            warn!(
                open = self.descriptors.len(),
                "descriptor cache full, closing all handles"
            );
            self.descriptors.clear();
        }

        let file = match self.descriptors.entry(filename) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                if let Some(dir) = entry.key().parent() {
                    fs::create_dir_all(dir)?;
                }
                debug!(path = %entry.key().display(), "opening posting file");
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(entry.key())?;
                entry.insert(file)
            }
        };

        // one aligned 8-byte write; readers never observe a torn word
        file.write_all(&doc_id.to_le_bytes())?;
        Ok(())
    }

    /// Close every cached handle. Further appends fail with
    /// [`MurexError::WriterClosed`].
    pub fn close(&mut self) {
        self.descriptors.clear();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of handles currently cached.
    pub fn open_descriptors(&self) -> usize {
        self.descriptors.len()
    }
}
