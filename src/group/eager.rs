use crate::{
    error::{Error, Result},
    grouper::Grouper,
    lookahead::Peekable,
    sequence::Sequence,
};

/// Groups adjacent elements for which the grouper holds against
/// the first element of the group. Each group is read completely
/// into an internal buffer before it is handed out.
///
/// Use [`Groups::max_group_size`] to bound the buffer when the source
/// may contain very long runs; a run longer than the limit is split
/// into several groups.
pub struct Groups<I: Iterator, G> {
    source: Peekable<I>,
    grouper: G,
    /// holds the current group. Reused between groups.
    buffer: Vec<I::Item>,
    max_group_size: usize,
}

impl<I, G> Groups<I, G>
where
    I: Iterator,
    G: Grouper<I::Item>,
{
    pub fn new(source: I, grouper: G) -> Self {
        Self {
            source: Peekable::new(source),
            grouper,
            buffer: Vec::new(),
            max_group_size: usize::MAX,
        }
    }

    /// Limits the number of elements per group. 0 means unbounded.
    pub fn max_group_size(self, size: usize) -> Self {
        Self {
            max_group_size: if size == 0 { usize::MAX } else { size },
            ..self
        }
    }

    /// reads the next group into the buffer.
    /// Returns false if the source has no elements left.
    fn fill_group(&mut self) -> bool {
        self.buffer.clear();
        let Some(anchor) = self.source.next() else {
            return false;
        };
        self.buffer.push(anchor);

        while self.buffer.len() < self.max_group_size {
            let anchor = &self.buffer[0];
            let grouper = &self.grouper;
            match self.source.next_if(|item| grouper.group(anchor, item)) {
                Some(item) => self.buffer.push(item),
                // the element that broke the group stays in the lookahead
                // and becomes the anchor of the next group.
                None => break,
            }
        }
        true
    }

    /// Returns the next group as a view into the internal buffer.
    /// The view is only valid until the next group is requested.
    pub fn next_group(&mut self) -> Option<&[I::Item]> {
        if self.fill_group() {
            Some(&self.buffer)
        } else {
            None
        }
    }
}

impl<I, G> Iterator for Groups<I, G>
where
    I: Iterator,
    G: Grouper<I::Item>,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        if self.fill_group() {
            Some(self.buffer.drain(..).collect())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        (lower.min(1), upper)
    }
}

impl<I, G> Sequence for Groups<I, G>
where
    I: Iterator,
    G: Grouper<I::Item>,
{
    fn has_more(&mut self) -> bool {
        self.source.has_more()
    }

    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("Groups"))
    }
}
