/// A pair of elements sorted in increasing order.
///
/// Used to key undirected mesh edges so that both triangles sharing an edge
/// agree on its orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd + Copy> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        Self::new_with_order(element1, element2).0
    }

    /// Sorts two elements in increasing order into a new pair, and indicates
    /// whether they had to be swapped.
    pub fn new_with_order(element1: T, element2: T) -> (Self, bool) {
        if element1 > element2 {
            (SortedPair([element2, element1]), true)
        } else {
            (SortedPair([element1, element2]), false)
        }
    }

    /// The smallest element of this pair.
    #[inline]
    pub fn lo(&self) -> T {
        self.0[0]
    }

    /// The greatest element of this pair.
    #[inline]
    pub fn hi(&self) -> T {
        self.0[1]
    }
}
