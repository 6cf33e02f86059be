/// Decides whether an element belongs to the group started by `anchor`.
///
/// Implementations must be reflexive: `group(x, x)` has to hold,
/// otherwise a group could end up empty.
/// Any `Fn(&T, &T) -> bool` closure is a grouper.
pub trait Grouper<T> {
    fn group(&self, anchor: &T, item: &T) -> bool;
}

impl<T, F> Grouper<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn group(&self, anchor: &T, item: &T) -> bool {
        self(anchor, item)
    }
}

/// groups runs of equal elements, like unix `uniq`.
#[derive(Default, Clone, Copy)]
pub struct EqGrouper;

impl<T: PartialEq> Grouper<T> for EqGrouper {
    fn group(&self, anchor: &T, item: &T) -> bool {
        anchor == item
    }
}

/// puts every element into the current group.
/// Only useful together with a maximum group size.
#[derive(Default, Clone, Copy)]
pub struct Always;

impl<T> Grouper<T> for Always {
    fn group(&self, _anchor: &T, _item: &T) -> bool {
        true
    }
}

/// groups elements whose extracted keys are equal.
pub struct KeyGrouper<F> {
    key_extractor: F,
}

impl<F> KeyGrouper<F> {
    pub fn new<T, K>(key_extractor: F) -> Self
    where
        F: Fn(&T) -> K,
        K: PartialEq,
    {
        Self { key_extractor }
    }
}

impl<F, T, K> Grouper<T> for KeyGrouper<F>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    fn group(&self, anchor: &T, item: &T) -> bool {
        (self.key_extractor)(anchor) == (self.key_extractor)(item)
    }
}
