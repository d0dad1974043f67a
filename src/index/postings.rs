//! Posting-file read path
//!
//! A posting file is the concatenation of little-endian 64-bit document
//! ids with no header or framing; its size is a multiple of 8. A
//! truncated tail corrupts only the trailing bytes, so reads stop at
//! the nearest multiple of 8 below the file size.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::query::iter::DocId;
use crate::Result;

const WORD: u64 = 8;

/// Read the tail of a posting list: at most `max_documents` ids, with a
/// non-positive limit meaning all of them.
///
/// A missing file is a normal case and yields no postings. Any other
/// I/O failure is surfaced; degrading it to an empty list would turn
/// corruption into silent false negatives.
pub fn read_postings(path: &Path, max_documents: i64) -> Result<Vec<DocId>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no posting file, returning empty");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let size = file.metadata()?.len();
    let total = size / WORD;
    let take = if max_documents > 0 && total > max_documents as u64 {
        file.seek(SeekFrom::Start((total - max_documents as u64) * WORD))?;
        max_documents as u64
    } else {
        total
    };

    let mut buf = vec![0u8; (take * WORD) as usize];
    file.read_exact(&mut buf)?;
    Ok(decode(&buf))
}

fn decode(buf: &[u8]) -> Vec<DocId> {
    let mut postings = Vec::with_capacity(buf.len() / WORD as usize);
    for word in buf.chunks_exact(WORD as usize) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(word);
        postings.push(i64::from_le_bytes(raw));
    }
    postings
}
