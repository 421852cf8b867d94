use std::cmp;

/// A retained observation together with its rank-uncertainty bookkeeping.
///
/// `g` is the minimum number of stream items this entry stands in for
/// relative to its predecessor; `delta` is the maximum additional rank
/// uncertainty attributable to this entry. `g + delta - 1` bounds the number
/// of observations that may sit between this entry and its predecessor.
#[derive(Debug, Clone)]
pub struct Entry<T>
where
    T: PartialEq,
{
    /// The observation itself.
    pub v: T,
    /// Minimum rank distance to the previous retained entry, self included.
    pub g: usize,
    /// Additional rank uncertainty beyond `g`.
    pub delta: usize,
}

// The derivation of PartialEq for Entry is not appropriate. The sole ordering
// value in an Entry is the value 'v'.
impl<T> PartialEq for Entry<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Entry<T>) -> bool {
        self.v == other.v
    }
}

impl<T> PartialOrd for Entry<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Entry<T>) -> Option<cmp::Ordering> {
        self.v.partial_cmp(&other.v)
    }
}
