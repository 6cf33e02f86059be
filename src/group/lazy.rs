use std::{cell::RefCell, rc::Rc};

use crate::{
    error::{Error, Result},
    grouper::Grouper,
    lookahead::Pushback,
    sequence::Sequence,
};

/// The read position shared by a [`LazyGroups`] and the [`Group`] views
/// it hands out.
///
/// invariants:
/// while a group is open, `anchor` holds a copy of its first element.
/// Before the first member was handed out (`taken == 0`), that element
/// is also the top of the pushback stack.
struct GroupCursor<I: Iterator, G> {
    source: Pushback<I>,
    grouper: G,
    /// bumped every time the parent moves past an open group.
    /// Views created for an older generation are dead.
    generation: u64,
    /// true while a view for the current generation is outstanding.
    view_open: bool,
    anchor: Option<I::Item>,
    /// the number of members of the open group handed out so far.
    taken: usize,
    max_group_size: usize,
}

impl<I, G> GroupCursor<I, G>
where
    I: Iterator,
    G: Grouper<I::Item>,
{
    /// yields the next member of the open group.
    /// Once this returns None, the group is closed for good and the
    /// element that ended it (if any) is back on the pushback stack.
    fn next_member(&mut self) -> Option<I::Item> {
        let anchor = self.anchor.as_ref()?;
        let member = if self.taken == 0 {
            self.source.next()
        } else if self.taken < self.max_group_size {
            match self.source.next() {
                Some(item) if !self.grouper.group(anchor, &item) => {
                    self.source.push_back(item);
                    None
                }
                other => other,
            }
        } else {
            None
        };

        match member {
            Some(_) => self.taken += 1,
            None => self.anchor = None,
        }
        member
    }

    /// checks for another member without consuming it.
    fn has_member(&mut self) -> bool {
        match self.next_member() {
            Some(item) => {
                self.source.push_back(item);
                self.taken -= 1;
                true
            }
            None => false,
        }
    }

    /// skips the rest of the outstanding group, if any, and invalidates its view.
    fn close_view(&mut self) {
        if self.view_open {
            while self.next_member().is_some() {}
            self.generation += 1;
            self.view_open = false;
        }
    }
}

impl<I, G> GroupCursor<I, G>
where
    I: Iterator,
    I::Item: Clone,
    G: Grouper<I::Item>,
{
    /// starts a new group and returns its generation.
    fn open_group(&mut self) -> Option<u64> {
        self.close_view();
        let first = self.source.next()?;
        self.anchor = Some(first.clone());
        self.source.push_back(first);
        self.taken = 0;
        self.view_open = true;
        Some(self.generation)
    }
}

/// Groups adjacent elements like [`Groups`](crate::group::eager::Groups),
/// without buffering the groups.
///
/// Every group is a [`Group`] view that reads straight from the shared
/// source. Only one view is live at a time: calling `next` or `has_more`
/// on the parent skips whatever is left of the previous group, and the
/// old view then reports [`Error::Invalidated`] from `pull`.
pub struct LazyGroups<I: Iterator, G> {
    cursor: Rc<RefCell<GroupCursor<I, G>>>,
}

impl<I, G> LazyGroups<I, G>
where
    I: Iterator,
    I::Item: Clone,
    G: Grouper<I::Item>,
{
    pub fn new(source: I, grouper: G) -> Self {
        let cursor = GroupCursor {
            source: Pushback::new(source),
            grouper,
            generation: 0,
            view_open: false,
            anchor: None,
            taken: 0,
            max_group_size: usize::MAX,
        };
        Self {
            cursor: Rc::new(RefCell::new(cursor)),
        }
    }

    /// Ends each group after `size` members. 0 means unbounded.
    pub fn max_group_size(self, size: usize) -> Self {
        self.cursor.borrow_mut().max_group_size = if size == 0 { usize::MAX } else { size };
        self
    }
}

impl<I, G> Iterator for LazyGroups<I, G>
where
    I: Iterator,
    I::Item: Clone,
    G: Grouper<I::Item>,
{
    type Item = Group<I, G>;

    fn next(&mut self) -> Option<Group<I, G>> {
        let generation = self.cursor.borrow_mut().open_group()?;
        Some(Group {
            cursor: Rc::clone(&self.cursor),
            generation,
        })
    }
}

impl<I, G> Sequence for LazyGroups<I, G>
where
    I: Iterator,
    I::Item: Clone,
    G: Grouper<I::Item>,
{
    fn has_more(&mut self) -> bool {
        let mut cursor = self.cursor.borrow_mut();
        cursor.close_view();
        cursor.source.has_more()
    }

    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("LazyGroups"))
    }
}

/// A single group handed out by [`LazyGroups`].
pub struct Group<I: Iterator, G> {
    cursor: Rc<RefCell<GroupCursor<I, G>>>,
    generation: u64,
}

impl<I, G> Group<I, G>
where
    I: Iterator,
    G: Grouper<I::Item>,
{
    /// false once the parent has moved on to another group.
    pub fn is_valid(&self) -> bool {
        self.cursor.borrow().generation == self.generation
    }
}

impl<I, G> Iterator for Group<I, G>
where
    I: Iterator,
    G: Grouper<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let mut cursor = self.cursor.borrow_mut();
        if cursor.generation != self.generation {
            return None;
        }
        cursor.next_member()
    }
}

impl<I, G> Sequence for Group<I, G>
where
    I: Iterator,
    G: Grouper<I::Item>,
{
    fn has_more(&mut self) -> bool {
        let mut cursor = self.cursor.borrow_mut();
        cursor.generation == self.generation && cursor.has_member()
    }

    fn pull(&mut self) -> Result<I::Item> {
        let mut cursor = self.cursor.borrow_mut();
        if cursor.generation != self.generation {
            return Err(Error::Invalidated);
        }
        cursor.next_member().ok_or(Error::Exhausted)
    }

    fn remove_last(&mut self) -> Result<()> {
        Err(Error::Unsupported("Group"))
    }
}

#[cfg(test)]
mod test {
    use crate::sequence::SequenceExt;

    use super::*;

    fn collect_groups<I, G>(groups: LazyGroups<I, G>) -> Vec<Vec<I::Item>>
    where
        I: Iterator,
        I::Item: Clone,
        G: Grouper<I::Item>,
    {
        groups.map(|group| group.collect()).collect()
    }

    #[test]
    fn groups_runs() {
        let groups = "aaabccd".chars().lazy_group_by(|a, b| a == b);
        let groups: Vec<String> = collect_groups(groups)
            .into_iter()
            .map(|g| g.into_iter().collect())
            .collect();
        assert_eq!(vec!["aaa", "b", "cc", "d"], groups);
    }

    #[test]
    fn advancing_parent_skips_rest_of_group() {
        let mut groups = vec![1, 1, 1, 2, 2, 3].into_iter().lazy_group_by(|a, b| a == b);
        let mut first = groups.next().unwrap();
        assert_eq!(Some(1), first.next());

        let mut second = groups.next().unwrap();
        assert_eq!(vec![2, 2], second.by_ref().collect::<Vec<_>>());

        assert!(!first.is_valid());
        assert!(!first.has_more());
        assert_eq!(None, first.next());
        assert!(matches!(first.pull(), Err(Error::Invalidated)));

        assert_eq!(vec![3], groups.next().unwrap().collect::<Vec<_>>());
        assert!(!groups.has_more());
        assert!(groups.next().is_none());
    }

    #[test]
    fn has_more_on_parent_invalidates_view() {
        let mut groups = vec![1, 1, 2].into_iter().lazy_group_by(|a, b| a == b);
        let mut first = groups.next().unwrap();
        assert!(first.is_valid());
        assert!(groups.has_more());
        assert!(matches!(first.pull(), Err(Error::Invalidated)));
        assert_eq!(vec![2], groups.next().unwrap().collect::<Vec<_>>());
    }

    #[test]
    fn view_has_more_is_idempotent() {
        let mut groups = vec![5, 5, 6].into_iter().lazy_group_by(|a, b| a == b);
        let mut group = groups.next().unwrap();
        assert!(group.has_more());
        assert!(group.has_more());
        assert_eq!(5, group.pull().unwrap());
        assert!(group.has_more());
        assert_eq!(5, group.pull().unwrap());
        assert!(!group.has_more());
        assert!(matches!(group.pull(), Err(Error::Exhausted)));
        // a finished group is exhausted, not invalidated, until the parent moves.
        assert!(group.is_valid());
        assert_eq!(vec![6], groups.next().unwrap().collect::<Vec<_>>());
    }

    #[test]
    fn chunks() {
        let chunks = collect_groups((0..8).lazy_chunks(3).unwrap());
        assert_eq!(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7]], chunks);
        assert!(matches!((0..8).lazy_chunks(0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn chunks_of_infinite_source() {
        let mut chunks = (0u64..).lazy_chunks(4).unwrap();
        let sums: Vec<u64> = chunks.by_ref().take(3).map(|c| c.sum()).collect();
        assert_eq!(vec![6, 22, 38], sums);
    }

    #[test]
    fn max_group_size() {
        let groups = LazyGroups::new(vec![1, 1, 1, 2].into_iter(), |a: &i32, b: &i32| a == b)
            .max_group_size(2);
        assert_eq!(vec![vec![1, 1], vec![1], vec![2]], collect_groups(groups));
    }

    #[test]
    fn empty_source() {
        let mut groups = std::iter::empty::<u8>().lazy_group_by(|a, b| a == b);
        assert!(!groups.has_more());
        assert!(groups.pull().is_err());
        assert!(matches!(groups.remove_last(), Err(Error::Unsupported(_))));
    }
}
