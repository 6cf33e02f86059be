//! The pull protocol shared by every adapter in this crate.
//!
//! All adapters are plain [`Iterator`]s, so they compose with the standard
//! combinators. On top of that, [`Sequence`] lets a consumer ask whether
//! another element is available without taking it, and get a typed error
//! instead of `None` when it pulls past the end.

use crate::{
    chain::Chain,
    error::{Error, Result},
    group::{eager::Groups, lazy::LazyGroups},
    grouper::Always,
    lookahead::{Peekable, Pushback},
    slice::Slice,
};

pub trait Sequence: Iterator {
    /// Reports whether another element is available.
    ///
    /// Calling this any number of times never changes which element `next`
    /// returns. Implementations may pull one element into a lookahead slot.
    fn has_more(&mut self) -> bool;

    /// Takes the next element, failing with [`Error::Exhausted`] at the end.
    fn pull(&mut self) -> Result<Self::Item> {
        self.next().ok_or(Error::Exhausted)
    }

    /// Removes the element most recently returned from the underlying source.
    ///
    /// None of the adapters here can attribute an element to a removable
    /// source, so the default reports the operation as unsupported.
    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported(std::any::type_name::<Self>()))
    }
}

/// Fluent constructors for the adapters, available on every iterator.
pub trait SequenceExt: Iterator + Sized {
    /// Wraps the iterator with a one element lookahead.
    fn peekable_seq(self) -> Peekable<Self> {
        Peekable::new(self)
    }

    /// Wraps the iterator so that elements can be pushed back into it.
    fn pushback(self) -> Pushback<Self> {
        Pushback::new(self)
    }

    /// Groups adjacent elements, buffering each group in memory.
    fn group_by_eager<F>(self, grouper: F) -> Groups<Self, F>
    where
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        Groups::new(self, grouper)
    }

    /// Groups adjacent elements, exposing each group as a view into this iterator.
    fn lazy_group_by<F>(self, grouper: F) -> LazyGroups<Self, F>
    where
        F: Fn(&Self::Item, &Self::Item) -> bool,
        Self::Item: Clone,
    {
        LazyGroups::new(self, grouper)
    }

    /// Splits the iterator into lazy groups of at most `size` elements.
    fn lazy_chunks(self, size: usize) -> Result<LazyGroups<Self, Always>>
    where
        Self::Item: Clone,
    {
        if size == 0 {
            return Err(Error::InvalidArgument("chunk size must be positive".into()));
        }
        Ok(LazyGroups::new(self, Always).max_group_size(size))
    }

    /// Selects elements by position. Negative arguments select the defaults.
    fn slice(self, start: i64, stop: i64, step: i64) -> Result<Slice<Self>> {
        Slice::new(self, start, stop, step)
    }

    /// Concatenates the sequences produced by this iterator.
    fn chain_all(self) -> Chain<<Self::Item as IntoIterator>::IntoIter>
    where
        Self::Item: IntoIterator,
    {
        Chain::new(self)
    }
}

impl<I: Iterator> SequenceExt for I {}
