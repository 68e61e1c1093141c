use core::{fmt, hash::Hash};

mod sealed {
    pub trait Sealed {}
}

/// An unsigned integer type that can be stored in a [SparseSetValue](crate::SparseSetValue).
///
/// Elements double as indices into the sparse array of the set, so every value of the type must
/// be representable as a `usize`. This is checked once per element type, at the point where a
/// sparse set is instantiated for it, rather than on every operation.
///
/// This trait is sealed, it is implemented for the unsigned integer types no wider than `usize`
/// on the target platform.
pub trait SparseElement:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + sealed::Sealed + 'static
{
    /// The smallest element, used to initialize unused slots of the dense array
    const ZERO: Self;

    /// The largest element of this type, as an index
    const MAX_INDEX: usize;

    #[doc(hidden)]
    const WIDTH_CHECK: () = assert!(
        core::mem::size_of::<Self>() <= core::mem::size_of::<usize>(),
        "sparse set elements must be no wider than usize"
    );

    /// Convert this element to its index in the universe
    fn index(self) -> usize;

    /// Convert `index` back to an element, if it is representable by this type
    fn from_index(index: usize) -> Option<Self>;
}

macro_rules! sparse_element {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl SparseElement for $ty {
                const ZERO: Self = 0;
                const MAX_INDEX: usize = <$ty>::MAX as usize;

                #[inline(always)]
                fn index(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_index(index: usize) -> Option<Self> {
                    <$ty>::try_from(index).ok()
                }
            }
        )*
    };
}

sparse_element!(u8, u16, usize);
#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
sparse_element!(u32);
#[cfg(target_pointer_width = "64")]
sparse_element!(u64);

#[cfg(test)]
mod tests {
    use super::SparseElement;

    #[test]
    fn sparse_element_index_conversions() {
        assert_eq!(7u8.index(), 7);
        assert_eq!(u8::MAX_INDEX, 255);
        assert_eq!(u8::from_index(255), Some(255));
        assert_eq!(u8::from_index(256), None);
        assert_eq!(u16::from_index(300), Some(300));
        assert_eq!(u32::from_index(42).map(SparseElement::index), Some(42));
        assert_eq!(usize::MAX_INDEX, usize::MAX);
    }
}
