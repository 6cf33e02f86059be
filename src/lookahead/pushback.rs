use std::iter::Fuse;

use crate::{
    error::{Error, Result},
    sequence::Sequence,
};

/// An iterator that replays pushed back elements before
/// pulling from its source again.
/// Pushed elements come back in LIFO order.
pub struct Pushback<I: Iterator> {
    iter: Fuse<I>,
    stack: Vec<I::Item>,
}

impl<I: Iterator> Pushback<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
            stack: Vec::new(),
        }
    }

    /// Makes `item` the next element returned by `next` or `peek`.
    pub fn push_back(&mut self, item: I::Item) {
        self.stack.push(item);
    }

    /// Returns the next element without consuming it.
    /// If no element was pushed back, one is pulled from the source
    /// and parked on the stack.
    pub fn peek(&mut self) -> Option<&I::Item> {
        if self.stack.is_empty() {
            let item = self.iter.next()?;
            self.stack.push(item);
        }
        self.stack.last()
    }

    /// the number of elements waiting to be replayed.
    pub fn pending(&self) -> usize {
        self.stack.len()
    }
}

impl<I: Iterator> Iterator for Pushback<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.stack.pop().or_else(|| self.iter.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        let held = self.stack.len();
        (
            lower.saturating_add(held),
            upper.and_then(|u| u.checked_add(held)),
        )
    }
}

impl<I: Iterator> Sequence for Pushback<I> {
    fn has_more(&mut self) -> bool {
        self.peek().is_some()
    }

    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("Pushback"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pushed_element_is_returned_next() {
        let mut it = Pushback::new(vec!["a", "b"].into_iter());
        let first = it.next().unwrap();
        assert!(it.has_more());
        assert!(it.has_more());
        it.push_back(first);
        assert!(it.has_more());
        assert_eq!(Some("a"), it.next());
        assert_eq!(Some("b"), it.next());
        assert!(!it.has_more());
    }

    #[test]
    fn pushes_replay_in_lifo_order() {
        let mut it = Pushback::new(10..12);
        it.push_back(1);
        it.push_back(2);
        it.push_back(3);
        assert_eq!(Some(&3), it.peek());
        assert_eq!(3, it.pending());
        assert_eq!(vec![3, 2, 1, 10, 11], it.collect::<Vec<_>>());
    }

    #[test]
    fn push_back_on_exhausted_source() {
        let mut it = Pushback::new(std::iter::empty::<i32>());
        assert!(matches!(it.pull(), Err(Error::Exhausted)));
        it.push_back(7);
        assert_eq!(7, it.pull().unwrap());
        assert!(!it.has_more());
    }
}
