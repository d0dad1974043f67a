//! Leapfrog intersection iterator

use super::{DocId, DocIter, NO_MORE, NOT_READY};

/// Intersection over an ordered list of child iterators.
///
/// Child 0 is the conductor: it proposes candidates and the remaining
/// children advance to match. On a mismatch the conductor jumps to the
/// offending child's position and the loop restarts. Callers should put
/// the cheapest child first; that is a hint only.
///
/// An optional exclusion iterator rejects candidates that survive the
/// intersection, so its scanning cost is bounded by the number of
/// surviving candidates rather than the size of the exclusion list.
#[derive(Debug)]
pub struct AndIter {
    children: Vec<DocIter>,
    not: Option<Box<DocIter>>,
    doc_id: DocId,
}

impl AndIter {
    pub fn new(children: Vec<DocIter>) -> Self {
        Self {
            children,
            not: None,
            doc_id: NOT_READY,
        }
    }

    /// Attach an exclusion iterator.
    pub fn with_exclusion(mut self, not: DocIter) -> Self {
        self.not = Some(Box::new(not));
        self
    }

    pub(crate) fn children(&self) -> &[DocIter] {
        &self.children
    }

    pub(crate) fn exclusion(&self) -> Option<&DocIter> {
        self.not.as_deref()
    }

    pub fn current(&self) -> DocId {
        self.doc_id
    }

    pub fn next(&mut self) -> DocId {
        if self.children.is_empty() {
            self.doc_id = NO_MORE;
            return self.doc_id;
        }
        let candidate = self.children[0].next();
        self.settle(candidate)
    }

    pub fn advance(&mut self, target: DocId) -> DocId {
        if self.children.is_empty() {
            self.doc_id = NO_MORE;
            return self.doc_id;
        }
        let candidate = self.children[0].advance(target);
        self.settle(candidate)
    }

    /// Run the leapfrog loop on `candidate`, then reject anything the
    /// exclusion iterator also matches.
    fn settle(&mut self, mut candidate: DocId) -> DocId {
        loop {
            candidate = self.leapfrog(candidate);
            if candidate == NO_MORE || !self.excluded(candidate) {
                break;
            }
            candidate = self.children[0].next();
        }
        self.doc_id = candidate;
        self.doc_id
    }

    fn leapfrog(&mut self, mut target: DocId) -> DocId {
        let mut i = 1;
        while i < self.children.len() {
            if self.children[i].current() < target {
                self.children[i].advance(target);
            }
            if self.children[i].current() == target {
                i += 1;
                continue;
            }
            // mismatch: move the conductor up and restart the loop
            let up_to = self.children[i].current();
            target = self.children[0].advance(up_to);
            i = 1;
        }
        target
    }

    fn excluded(&mut self, target: DocId) -> bool {
        match self.not.as_mut() {
            Some(not) => {
                if not.current() < target {
                    not.advance(target);
                }
                not.current() == target
            }
            None => false,
        }
    }

    pub fn score(&self) -> f32 {
        self.children.len() as f32
    }

    pub fn reset(&mut self) {
        self.doc_id = NOT_READY;
        for child in &mut self.children {
            child.reset();
        }
        if let Some(not) = self.not.as_mut() {
            not.reset();
        }
    }
}
