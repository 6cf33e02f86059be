use std::cmp::Ordering;

/// A total order over `T` that can carry state of its own.
///
/// The merge and the external sort take their ordering through this trait,
/// so plain `Ord` types, comparison closures and key extractors are all
/// handled by the same code.
pub trait Orderer<T> {
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// Orders values by their `Ord` implementation.
#[derive(Default, Clone, Copy)]
pub struct OrdOrderer {}
impl OrdOrderer {
    pub fn new() -> Self {
        Self {}
    }
}

impl<T: Ord> Orderer<T> for OrdOrderer {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Orders values by a key extracted from them.
pub struct KeyOrderer<F> {
    key_extractor: F,
}
impl<F> KeyOrderer<F> {
    pub fn new<T, K>(key_extractor: F) -> Self
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        Self { key_extractor }
    }
}

impl<F, T, K> Orderer<T> for KeyOrderer<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.key_extractor)(left).cmp(&(self.key_extractor)(right))
    }
}

/// Orders values with a comparison function.
pub struct FuncOrderer<F> {
    comparator: F,
}

impl<F> FuncOrderer<F> {
    pub fn new<T>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering,
    {
        Self { comparator }
    }
}

impl<F, T> Orderer<T> for FuncOrderer<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.comparator)(left, right)
    }
}

/// Inverts another orderer.
pub struct Reversed<O>(pub O);

impl<T, O: Orderer<T>> Orderer<T> for Reversed<O> {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(right, left)
    }
}

/// Orders byte strings as if ASCII letters were lowercase.
/// Other bytes, including non-ASCII ones, compare by value.
#[derive(Default, Clone, Copy)]
pub struct IgnoreAsciiCase;

impl<T: AsRef<[u8]>> Orderer<T> for IgnoreAsciiCase {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        let left = left.as_ref().iter().map(u8::to_ascii_lowercase);
        let right = right.as_ref().iter().map(u8::to_ascii_lowercase);
        left.cmp(right)
    }
}

/// Orders failed reads before every value so that a merge over
/// fallible sources hands out an error as soon as it is read.
/// Successful values are ordered by the inner orderer.
pub struct ErrorsFirst<O>(pub O);

impl<T, E, O> Orderer<Result<T, E>> for ErrorsFirst<O>
where
    O: Orderer<T>,
{
    fn compare(&self, left: &Result<T, E>, right: &Result<T, E>) -> Ordering {
        match (left, right) {
            (Ok(l), Ok(r)) => self.0.compare(l, r),
            (Err(_), Ok(_)) => Ordering::Less,
            (Ok(_), Err(_)) => Ordering::Greater,
            (Err(_), Err(_)) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn orderers_agree_on_strings() {
        let a = "Apple".to_string();
        let b = "banana".to_string();

        assert_eq!(Ordering::Less, OrdOrderer::new().compare(&a, &b));
        assert_eq!(
            Ordering::Less,
            KeyOrderer::new(|s: &String| s.len()).compare(&a, &b)
        );
        assert_eq!(
            Ordering::Equal,
            KeyOrderer::new(|s: &String| s.to_lowercase()).compare(&a, &"APPLE".to_string())
        );
        assert_eq!(
            Ordering::Greater,
            FuncOrderer::new(|l: &String, r: &String| r.cmp(l)).compare(&a, &b)
        );
    }

    #[test]
    fn reversed_and_case_insensitive() {
        let upper = b"ZEBRA".to_vec();
        let lower = b"apple".to_vec();
        assert_eq!(Ordering::Less, OrdOrderer::new().compare(&upper, &lower));
        assert_eq!(Ordering::Greater, IgnoreAsciiCase.compare(&upper, &lower));
        assert_eq!(Ordering::Less, Reversed(IgnoreAsciiCase).compare(&upper, &lower));
        assert_eq!(
            Ordering::Equal,
            IgnoreAsciiCase.compare(&b"Caf\xe9".to_vec(), &b"cAF\xe9".to_vec())
        );
        assert_eq!(
            Ordering::Less,
            IgnoreAsciiCase.compare(&b"ab".to_vec(), &b"abc".to_vec())
        );
    }

    #[test]
    fn errors_order_first() {
        let orderer = ErrorsFirst(OrdOrderer::new());
        let err: Result<u8, &str> = Err("broken");
        assert_eq!(Ordering::Less, orderer.compare(&err, &Ok(0)));
        assert_eq!(Ordering::Greater, orderer.compare(&Ok(0), &err));
        assert_eq!(Ordering::Equal, orderer.compare(&err, &err));
        assert_eq!(Ordering::Less, orderer.compare(&Ok::<u8, &str>(1), &Ok(2)));
    }
}
