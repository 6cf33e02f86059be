//! Lazy iterator decorators and an external merge sort built from them.
//!
//! Every adapter is a plain [`Iterator`] that does no work until it is
//! asked for an element. On top of that, each adapter implements
//! [`Sequence`], which adds a side effect free `has_more` check and typed
//! errors for pulling past the end.
//!
//! ```
//! use lazyseq::{merge, SequenceExt};
//!
//! let merged: Vec<_> = merge(vec![vec![1, 4, 7], vec![2, 5], vec![3, 6]]).collect();
//! assert_eq!(vec![1, 2, 3, 4, 5, 6, 7], merged);
//!
//! let evens: Vec<_> = (0..).slice(0, 10, 2).unwrap().collect();
//! assert_eq!(vec![0, 2, 4, 6, 8], evens);
//!
//! let runs: Vec<Vec<char>> = "aabccc".chars().group_by_eager(|a, b| a == b).collect();
//! assert_eq!(3, runs.len());
//! ```

pub mod chain;
pub mod error;
pub mod group;
pub mod grouper;
pub mod lines;
pub mod lookahead;
pub mod merge;
pub mod orderer;
pub mod sequence;
pub mod slice;
pub mod sorter;
pub mod spill;
pub mod zip;

pub use chain::Chain;
pub use error::{Error, Result};
pub use group::{
    eager::Groups,
    lazy::{Group, LazyGroups},
};
pub use lines::{LineReader, ReadPolicy, Record};
pub use lookahead::{Peekable, Pushback};
pub use merge::{merge, merge_by, merge_by_key, Merge};
pub use sequence::{Sequence, SequenceExt};
pub use slice::Slice;
pub use sorter::{ExternalSorter, ExtsortConfig, SortSummary};
pub use zip::{zip_longest, ZipLongest};
