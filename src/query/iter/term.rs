//! Leaf iterator over one posting list

use super::{DocId, NO_MORE, NOT_READY};

/// Iterator over a single term's posting list.
///
/// The list is sorted ascending and duplicate free. State is the pair
/// `(cursor, doc_id)`; the cursor only moves forward, so a left-to-right
/// traversal interleaving `next` and `advance` stays amortized linear.
#[derive(Debug)]
pub struct TermIter {
    term: String,
    postings: Vec<DocId>,
    cursor: isize,
    doc_id: DocId,
}

impl TermIter {
    pub fn new(term: impl Into<String>, postings: Vec<DocId>) -> Self {
        Self {
            term: term.into(),
            postings,
            cursor: -1,
            doc_id: NOT_READY,
        }
    }

    /// Diagnostic label, usually `shard:tag_key:tag_value`.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn current(&self) -> DocId {
        self.doc_id
    }

    pub fn next(&mut self) -> DocId {
        self.cursor += 1;
        self.doc_id = match self.postings.get(self.cursor as usize) {
            Some(&doc) => doc,
            None => NO_MORE,
        };
        self.doc_id
    }

    pub fn advance(&mut self, target: DocId) -> DocId {
        if target == NO_MORE {
            self.exhaust();
            return self.doc_id;
        }
        if self.doc_id == NO_MORE || self.doc_id == target {
            self.doc_id = target;
            return self.doc_id;
        }
        if self.cursor < 0 {
            self.cursor = 0;
        }

        // search only the half-open [cursor, len) window
        let start = self.cursor as usize;
        if start >= self.postings.len() {
            self.exhaust();
            return self.doc_id;
        }
        let offset = self.postings[start..].partition_point(|&doc| doc < target);
        match self.postings.get(start + offset) {
            Some(&doc) => {
                self.cursor = (start + offset) as isize;
                self.doc_id = doc;
            }
            None => self.exhaust(),
        }
        self.doc_id
    }

    // park the cursor past the end so a later `next` stays exhausted
    fn exhaust(&mut self) {
        self.cursor = self.postings.len() as isize;
        self.doc_id = NO_MORE;
    }

    pub fn score(&self) -> f32 {
        1.0
    }

    pub fn reset(&mut self) {
        self.cursor = -1;
        self.doc_id = NOT_READY;
    }
}
