use crate::{
    error::{Error, Result},
    lookahead::Peekable,
    sequence::Sequence,
};

/// Walks several sequences in lockstep until all of them are exhausted.
///
/// Each step yields one slot per input, in input order. Inputs that already
/// ended contribute `None`.
pub struct ZipLongest<I: Iterator> {
    sources: Vec<Peekable<I>>,
}

/// Zips the sequences together, padding the shorter ones with `None`.
pub fn zip_longest<S>(sources: S) -> ZipLongest<<S::Item as IntoIterator>::IntoIter>
where
    S: IntoIterator,
    S::Item: IntoIterator,
{
    ZipLongest {
        sources: sources
            .into_iter()
            .map(|source| Peekable::new(source.into_iter()))
            .collect(),
    }
}

impl<I: Iterator> Iterator for ZipLongest<I> {
    type Item = Vec<Option<I::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_more() {
            return None;
        }
        Some(self.sources.iter_mut().map(Iterator::next).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sources
            .iter()
            .map(|source| source.size_hint())
            .fold((0, Some(0)), |(lower, upper), (l, u)| {
                (lower.max(l), upper.zip(u).map(|(a, b)| a.max(b)))
            })
    }
}

impl<I: Iterator> Sequence for ZipLongest<I> {
    fn has_more(&mut self) -> bool {
        self.sources.iter_mut().any(|source| source.has_more())
    }

    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("ZipLongest"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pads_shorter_inputs() {
        let zipped: Vec<_> = zip_longest(vec![vec![1, 2, 3], vec![10], vec![]]).collect();
        assert_eq!(
            vec![
                vec![Some(1), Some(10), None],
                vec![Some(2), None, None],
                vec![Some(3), None, None],
            ],
            zipped
        );
    }

    #[test]
    fn empty_inputs() {
        let mut zipped = zip_longest(vec![Vec::<u8>::new(), Vec::new()]);
        assert!(!zipped.has_more());
        assert!(matches!(zipped.pull(), Err(Error::Exhausted)));

        let mut zipped = zip_longest(Vec::<Vec<u8>>::new());
        assert_eq!(None, zipped.next());
    }

    #[test]
    fn size_hint_is_longest_input() {
        let zipped = zip_longest(vec![0..2, 0..5, 0..1]);
        assert_eq!((5, Some(5)), zipped.size_hint());
        assert_eq!(5, zipped.count());
    }
}
