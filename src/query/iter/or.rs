//! Union iterator

use super::{DocId, DocIter, NO_MORE, NOT_READY};

/// Union over an ordered list of child iterators.
///
/// The current id is the minimum of the children's current ids; a step
/// moves every child sitting on that minimum.
#[derive(Debug)]
pub struct OrIter {
    children: Vec<DocIter>,
    doc_id: DocId,
}

impl OrIter {
    pub fn new(children: Vec<DocIter>) -> Self {
        Self {
            children,
            doc_id: NOT_READY,
        }
    }

    pub(crate) fn children(&self) -> &[DocIter] {
        &self.children
    }

    pub fn current(&self) -> DocId {
        self.doc_id
    }

    pub fn next(&mut self) -> DocId {
        let mut new_doc = NO_MORE;
        for child in &mut self.children {
            let mut doc = child.current();
            if doc == self.doc_id {
                doc = child.next();
            }
            new_doc = new_doc.min(doc);
        }
        self.doc_id = new_doc;
        self.doc_id
    }

    pub fn advance(&mut self, target: DocId) -> DocId {
        let mut new_doc = NO_MORE;
        for child in &mut self.children {
            let mut doc = child.current();
            if doc < target {
                doc = child.advance(target);
            }
            new_doc = new_doc.min(doc);
        }
        self.doc_id = new_doc;
        self.doc_id
    }

    /// Number of children matching the current document.
    pub fn score(&self) -> f32 {
        self.children
            .iter()
            .filter(|child| child.current() == self.doc_id)
            .count() as f32
    }

    pub fn reset(&mut self) {
        self.doc_id = NOT_READY;
        for child in &mut self.children {
            child.reset();
        }
    }
}
