//! k-way merge of sorted sequences.

use std::{
    cmp::Ordering,
    collections::{binary_heap::PeekMut, BinaryHeap},
    rc::Rc,
};

use crate::{
    error::{Error, Result},
    lookahead::Peekable,
    orderer::{FuncOrderer, KeyOrderer, OrdOrderer, Orderer},
    sequence::Sequence,
};

/// One input of the merge together with its lookahead.
///
/// invariant: every entry inside the heap has its lookahead filled,
/// so the ordering can be computed from `peeked` without pulling.
struct HeapEntry<I: Iterator, O> {
    cursor: Peekable<I>,
    /// the position of the input in the source list. Used to break ties.
    index: usize,
    orderer: Rc<O>,
}

impl<I, O> PartialEq for HeapEntry<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}
impl<I, O> Eq for HeapEntry<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
}

impl<I, O> PartialOrd for HeapEntry<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I, O> Ord for HeapEntry<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        let by_value = match (self.cursor.peeked(), other.cursor.peeked()) {
            (Some(l), Some(r)) => self.orderer.compare(l, r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        // BinaryHeap is a max-heap, so the whole order is reversed
        // to get the smallest head (and the lowest index on ties) on top.
        by_value.then(self.index.cmp(&other.index)).reverse()
    }
}

/// Merges sequences that are each sorted according to the orderer
/// into a single sorted sequence.
///
/// Equal elements are returned in the order of the sources they came from,
/// so the merge is stable. If an input is not sorted, the output is not
/// either, but every element is still returned exactly once.
pub struct Merge<I: Iterator, O> {
    heap: BinaryHeap<HeapEntry<I, O>>,
}

impl<I, O> Merge<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
    pub fn new<S>(sources: S, orderer: O) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I>,
    {
        let orderer = Rc::new(orderer);
        let heap = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| HeapEntry {
                cursor: Peekable::new(source.into_iter()),
                index,
                orderer: orderer.clone(),
            })
            .filter_map(|mut entry| entry.cursor.has_more().then_some(entry))
            .collect();
        Self { heap }
    }

    /// the number of inputs that still have elements.
    pub fn remaining_sources(&self) -> usize {
        self.heap.len()
    }
}

/// Merges sorted sequences by their natural order.
pub fn merge<S, I>(sources: S) -> Merge<I, OrdOrderer>
where
    S: IntoIterator,
    S::Item: IntoIterator<IntoIter = I>,
    I: Iterator,
    I::Item: Ord,
{
    Merge::new(sources, OrdOrderer::new())
}

/// Merges sequences sorted by the given comparison function.
pub fn merge_by<S, I, F>(sources: S, comparator: F) -> Merge<I, FuncOrderer<F>>
where
    S: IntoIterator,
    S::Item: IntoIterator<IntoIter = I>,
    I: Iterator,
    F: Fn(&I::Item, &I::Item) -> Ordering,
{
    Merge::new(sources, FuncOrderer::new(comparator))
}

/// Merges sequences sorted by the key the function extracts.
pub fn merge_by_key<S, I, F, K>(sources: S, key_extractor: F) -> Merge<I, KeyOrderer<F>>
where
    S: IntoIterator,
    S::Item: IntoIterator<IntoIter = I>,
    I: Iterator,
    F: Fn(&I::Item) -> K,
    K: Ord,
{
    Merge::new(sources, KeyOrderer::new(key_extractor))
}

impl<I, O> Iterator for Merge<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let mut first = self.heap.peek_mut()?;
        let next = first.cursor.next();
        if first.cursor.has_more() {
            // dropping the PeekMut moves the entry to its new place in the heap.
            drop(first);
        } else {
            PeekMut::pop(first);
        }
        next
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.heap
            .iter()
            .map(|entry| entry.cursor.size_hint())
            .fold((0, Some(0)), |(lower, upper), (l, u)| {
                (
                    lower.saturating_add(l),
                    upper.zip(u).and_then(|(a, b)| a.checked_add(b)),
                )
            })
    }
}

impl<I, O> Sequence for Merge<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
    fn has_more(&mut self) -> bool {
        !self.heap.is_empty()
    }

    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("Merge"))
    }
}
