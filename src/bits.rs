//! Subsets of a finite universe `{0, ..., n-1}` encoded as bitmasks.
//!
//! Element `k` belongs to the subset encoded by `mask` iff bit `k` of `mask` is set. For a
//! universe of size `n`, masks range over `[0, 2^n)`: `0` is the empty set and `2^n - 1` the full
//! set.
//!
//! # Examples
//!
//! ```rust
//! use finmodel::bits;
//! let (a, b) = (0b011, 0b110);
//! assert_eq!(bits::union(a, b), 0b111);
//! assert_eq!(bits::inter(a, b), 0b010);
//! assert!(bits::is_subset(0b010, a));
//! assert_eq!(bits::complement(a, 3), 0b100);
//! assert_eq!(&bits::Subset::new(a, 3).to_string(), "{0, 1}");
//! ```

crate::prelude!();


/// The empty set.
pub const EMPTY: Mask = 0;

/// Number of subsets of a universe of size `universe`, *i.e.* `2^universe`.
///
/// Panics if the result does not fit a [`Mask`].
pub fn powerset_size(universe: usize) -> usize {
    assert!(
        universe < Mask::BITS as usize,
        "universe of size {} is too large for bitmasks",
        universe
    );
    1 << universe
}

/// The full set of a universe of size `universe`.
pub fn full(universe: usize) -> Mask {
    powerset_size(universe) - 1
}

/// Singleton `{elem}`.
///
/// Panics if `elem` does not fit a [`Mask`].
pub fn singleton(elem: usize) -> Mask {
    assert!(
        elem < Mask::BITS as usize,
        "element {} is too large for bitmasks",
        elem
    );
    1 << elem
}

/// True if `elem` belongs to `mask`.
pub fn contains(mask: Mask, elem: usize) -> bool {
    elem < Mask::BITS as usize && mask & (1 << elem) != 0
}

/// Union.
pub fn union(lft: Mask, rgt: Mask) -> Mask {
    lft | rgt
}

/// Intersection.
pub fn inter(lft: Mask, rgt: Mask) -> Mask {
    lft & rgt
}

/// Complement of `mask` relative to a universe of size `universe`.
pub fn complement(mask: Mask, universe: usize) -> Mask {
    !mask & full(universe)
}

/// True if `sub` is a (non-strict) subset of `sup`.
pub fn is_subset(sub: Mask, sup: Mask) -> bool {
    sub & !sup == 0
}

/// Number of elements in `mask`.
pub fn card(mask: Mask) -> usize {
    mask.count_ones() as usize
}

/// Iterator over the elements of `mask`, in increasing order.
pub fn elems(mask: Mask) -> impl Iterator<Item = usize> {
    (0..Mask::BITS as usize).filter(move |elem| contains(mask, *elem))
}

/// Iterator over all the subsets of a universe of size `universe`, in increasing mask order.
pub fn powerset(universe: usize) -> impl Iterator<Item = Mask> {
    0..powerset_size(universe)
}

/// Bit-string representation, most significant element first.
///
/// ```rust
/// # use finmodel::bits;
/// assert_eq!(&bits::to_bit_string(0b011, 4), "0011");
/// ```
pub fn to_bit_string(mask: Mask, universe: usize) -> String {
    (0..universe)
        .rev()
        .map(|elem| if contains(mask, elem) { '1' } else { '0' })
        .collect()
}

/// A subset paired with the size of its universe, for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subset {
    /// Bitmask.
    pub mask: Mask,
    /// Size of the universe.
    pub universe: usize,
}
impl Subset {
    /// Constructor.
    pub fn new(mask: Mask, universe: usize) -> Self {
        Self { mask, universe }
    }

    /// Bit-string representation, see [`to_bit_string`].
    pub fn to_bit_string(self) -> String {
        to_bit_string(self.mask, self.universe)
    }
}
impl fmt::Display for Subset {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{{")?;
        for (idx, elem) in elems(self.mask)
            .take_while(|elem| *elem < self.universe)
            .enumerate()
        {
            if idx > 0 {
                write!(fmt, ", ")?;
            }
            write!(fmt, "{}", elem)?;
        }
        write!(fmt, "}}")
    }
}
