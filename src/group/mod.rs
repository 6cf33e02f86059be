//! Adapters that split a sequence into runs of related elements,
//! like unix `uniq` or python's `itertools.groupby`.
//!
//! [`eager::Groups`] buffers each group and can hand it out as a slice or
//! an owned vector. [`lazy::LazyGroups`] hands out views that read directly
//! from the source, so memory stays constant no matter how long a group is.
//! Both produce the same group boundaries for the same grouper.

pub mod eager;
pub mod lazy;

#[cfg(test)]
mod test {
    use rand::Rng;

    use crate::sequence::SequenceExt;

    fn eager_groups(data: &[u32], grouper: fn(&u32, &u32) -> bool) -> Vec<Vec<u32>> {
        data.iter().copied().group_by_eager(grouper).collect()
    }

    fn lazy_groups(data: &[u32], grouper: fn(&u32, &u32) -> bool) -> Vec<Vec<u32>> {
        data.iter()
            .copied()
            .lazy_group_by(grouper)
            .map(|group| group.collect())
            .collect()
    }

    fn check_partition(data: &[u32], grouper: fn(&u32, &u32) -> bool) {
        let eager = eager_groups(data, grouper);
        let lazy = lazy_groups(data, grouper);
        assert_eq!(eager, lazy, "input: {data:?}");

        let flattened: Vec<u32> = eager.iter().flatten().copied().collect();
        assert_eq!(data, &flattened[..]);

        for group in &eager {
            assert!(!group.is_empty());
            assert!(group.iter().all(|member| grouper(&group[0], member)));
        }
        for pair in eager.windows(2) {
            assert!(!grouper(&pair[0][0], &pair[1][0]));
        }
    }

    #[test]
    fn eager_and_lazy_agree_on_fixed_input() {
        let data = [3, 3, 4, 14, 15, 15, 29, 20, 21, 2];
        check_partition(&data, |a, b| a == b);
        check_partition(&data, |a, b| a / 10 == b / 10);
        check_partition(&data, |a, b| a.abs_diff(*b) <= 1);
        check_partition(&[], |a, b| a == b);
    }

    #[test]
    #[cfg(not(miri))]
    fn eager_and_lazy_agree_on_random_input() {
        let mut rng = rand::thread_rng();
        for len in 0..60 {
            let data: Vec<u32> = (0..len).map(|_| rng.gen_range(0..6)).collect();
            check_partition(&data, |a, b| a == b);
            check_partition(&data, |a, b| a / 3 == b / 3);
            check_partition(&data, |a, b| a.abs_diff(*b) <= 1);
        }
    }
}
