use crate::{
    error::{Error, Result},
    sequence::Sequence,
};

/// Selects elements by position, like `x[start..stop].iter().step_by(step)`
/// on a sequence whose length is not known.
///
/// The source is never pulled past position `stop`, so slicing an
/// infinite iterator with a stop value is fine.
pub struct Slice<I: Iterator> {
    iter: I,
    start: usize,
    stop: usize,
    step: usize,
    /// the position of the next element pulled from `iter`.
    position: usize,
    /// the next selected element, if it was already looked up by `has_more`.
    pending: Option<I::Item>,
    done: bool,
}

impl<I: Iterator> Slice<I> {
    /// Creates a slice. A negative `start` means 0, a negative `stop` means
    /// unbounded and a `step` less than 1 means 1.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the resolved start lies after the stop.
    pub fn new(iter: I, start: i64, stop: i64, step: i64) -> Result<Self> {
        let start = usize::try_from(start).unwrap_or(0);
        let stop = usize::try_from(stop).unwrap_or(usize::MAX);
        let step = usize::try_from(step).ok().filter(|&s| s > 0).unwrap_or(1);

        if start > stop {
            return Err(Error::InvalidArgument(format!(
                "slice start {start} is greater than slice stop {stop}"
            )));
        }

        Ok(Self {
            iter,
            start,
            stop,
            step,
            position: 0,
            pending: None,
            done: false,
        })
    }

    /// finds the next selected element.
    fn advance(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.position >= self.stop {
                self.done = true;
                return None;
            }
            let Some(item) = self.iter.next() else {
                self.done = true;
                return None;
            };
            let position = self.position;
            self.position += 1;

            if position >= self.start && (position - self.start) % self.step == 0 {
                return Some(item);
            }
        }
    }
}

impl<I: Iterator> Iterator for Slice<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.pending.take().or_else(|| self.advance())
    }
}

impl<I: Iterator> Sequence for Slice<I> {
    fn has_more(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.advance();
        }
        self.pending.is_some()
    }

    // positions would no longer line up with the source after a removal.
    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("Slice"))
    }
}
