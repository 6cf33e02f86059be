use std::collections::VecDeque;

use crate::{
    error::{Error, Result},
    lookahead::Peekable,
    sequence::Sequence,
};

/// Concatenates a list of sequences.
///
/// The list itself is collected up front, but each member is only
/// pulled from once all members before it are exhausted.
pub struct Chain<I: Iterator> {
    /// the members that might still yield elements, in order.
    queue: VecDeque<Peekable<I>>,
}

impl<I: Iterator> Chain<I> {
    pub fn new<S>(sources: S) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I>,
    {
        let queue = sources
            .into_iter()
            .map(|source| Peekable::new(source.into_iter()))
            .collect();
        Self { queue }
    }

    /// Builds a chain from a list with missing members, skipping the `None`s.
    pub fn from_optional<S, J>(sources: S) -> Self
    where
        S: IntoIterator<Item = Option<J>>,
        J: IntoIterator<IntoIter = I>,
    {
        Self::new(sources.into_iter().flatten())
    }

    /// drops members from the front of the queue until the
    /// front member has an element ready or the queue is empty.
    fn drop_exhausted(&mut self) {
        while let Some(front) = self.queue.front_mut() {
            if front.has_more() {
                break;
            }
            self.queue.pop_front();
        }
    }

    /// the number of members that are not known to be exhausted.
    pub fn remaining_sources(&self) -> usize {
        self.queue.len()
    }
}

impl<I: Iterator> Iterator for Chain<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.drop_exhausted();
        self.queue.front_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.queue.iter().map(|s| s.size_hint()).fold(
            (0, Some(0)),
            |(lower, upper), (l, u)| {
                (
                    lower.saturating_add(l),
                    upper.zip(u).and_then(|(a, b)| a.checked_add(b)),
                )
            },
        )
    }
}

impl<I: Iterator> Sequence for Chain<I> {
    fn has_more(&mut self) -> bool {
        self.drop_exhausted();
        !self.queue.is_empty()
    }

    // the member that produced the last element may already have been
    // dropped from the queue, and the members only expose a lookahead view.
    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("Chain"))
    }
}

#[cfg(test)]
mod test {
    use crate::sequence::SequenceExt;

    use super::*;

    #[test]
    fn concatenates_in_order() {
        let a = vec![1, 2, 3];
        let b = vec![4];
        let c = vec![5, 6];
        let chained: Vec<_> = Chain::new(vec![a.clone(), b.clone(), c.clone()]).collect();
        assert_eq!(a.len() + b.len() + c.len(), chained.len());
        assert_eq!(vec![1, 2, 3, 4, 5, 6], chained);
    }

    #[test]
    fn empty_members_are_skipped() {
        let a = vec!["x", "y"];
        let chained: Vec<_> = Chain::new(vec![vec![], a.clone(), vec![]]).collect();
        assert_eq!(a, chained);

        let chained: Vec<_> = Chain::from_optional(vec![None, Some(a.clone()), None]).collect();
        assert_eq!(a, chained);
    }

    #[test]
    fn all_empty() {
        let mut chain = Chain::new(vec![Vec::<u8>::new(), Vec::new()]);
        assert!(!chain.has_more());
        assert_eq!(0, chain.remaining_sources());
        assert!(matches!(chain.pull(), Err(Error::Exhausted)));

        let mut chain = Chain::new(Vec::<Vec<u8>>::new());
        assert_eq!(None, chain.next());
    }

    #[test]
    fn has_more_is_idempotent() {
        let mut chain = vec![0..2, 2..2, 2..3].into_iter().chain_all();
        for expected in 0..3 {
            assert!(chain.has_more());
            assert!(chain.has_more());
            assert_eq!(expected, chain.pull().unwrap());
        }
        assert!(!chain.has_more());
        assert!(matches!(chain.remove_last(), Err(Error::Unsupported(_))));
    }

    #[test]
    fn works_on_infinite_members() {
        let chain = Chain::new(vec![Box::new(0u32..2) as Box<dyn Iterator<Item = u32>>, Box::new(10u32..)]);
        let taken: Vec<_> = chain.take(5).collect();
        assert_eq!(vec![0, 1, 10, 11, 12], taken);
    }
}
