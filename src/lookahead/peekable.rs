use crate::{
    error::{Error, Result},
    sequence::Sequence,
};

/// An iterator with a single element of lookahead.
///
/// invariants:
/// `peeked` holds at most one element that was pulled from `iter`
/// but not yet handed out. Once `iter` reports the end, `exhausted`
/// is set and `iter` is never polled again.
pub struct Peekable<I: Iterator> {
    iter: I,
    peeked: Option<I::Item>,
    exhausted: bool,
}

impl<I: Iterator> Peekable<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            peeked: None,
            exhausted: false,
        }
    }

    /// pulls one element into the lookahead slot if it is empty.
    fn fill(&mut self) {
        if self.peeked.is_none() && !self.exhausted {
            self.peeked = self.iter.next();
            self.exhausted = self.peeked.is_none();
        }
    }

    /// Returns the next element without consuming it.
    pub fn peek(&mut self) -> Option<&I::Item> {
        self.fill();
        self.peeked.as_ref()
    }

    /// Like [`Peekable::peek`], but allows modifying the element in place.
    pub fn peek_mut(&mut self) -> Option<&mut I::Item> {
        self.fill();
        self.peeked.as_mut()
    }

    /// Returns the next element without consuming it,
    /// failing with [`Error::Exhausted`] if nothing remains.
    pub fn try_peek(&mut self) -> Result<&I::Item> {
        self.peek().ok_or(Error::Exhausted)
    }

    /// Consumes the next element only if it satisfies `pred`.
    /// A rejected element stays in the lookahead slot.
    pub fn next_if(&mut self, pred: impl FnOnce(&I::Item) -> bool) -> Option<I::Item> {
        let matched = self.peek().map_or(false, pred);
        if matched {
            self.peeked.take()
        } else {
            None
        }
    }

    /// the element currently held in the lookahead slot, if any.
    /// Unlike `peek`, this never pulls from the source.
    pub(crate) fn peeked(&self) -> Option<&I::Item> {
        self.peeked.as_ref()
    }
}

impl<I: Iterator> Iterator for Peekable<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(item) = self.peeked.take() {
            return Some(item);
        }
        if self.exhausted {
            return None;
        }
        let next = self.iter.next();
        self.exhausted = next.is_none();
        next
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let held = usize::from(self.peeked.is_some());
        if self.exhausted {
            return (held, Some(held));
        }
        let (lower, upper) = self.iter.size_hint();
        (
            lower.saturating_add(held),
            upper.and_then(|u| u.checked_add(held)),
        )
    }
}

impl<I: Iterator> Sequence for Peekable<I> {
    fn has_more(&mut self) -> bool {
        self.peek().is_some()
    }

    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("Peekable"))
    }
}
