//! Typed indices ("handles") used to refer to mesh elements.
//!
//! All elements of a [`DcelMesh`][crate::DcelMesh] are stored in flat arrays
//! and referred to by their index in that array. To avoid mixing up indices
//! of different element kinds, each kind has its own handle type which is
//! just a newtype around [`hsize`].

use std::fmt;


/// The integer type used as the underlying type for all handles.
#[allow(non_camel_case_types)]
#[cfg(not(feature = "large-handle"))]
pub type hsize = u32;

/// The integer type used as the underlying type for all handles.
#[allow(non_camel_case_types)]
#[cfg(feature = "large-handle")]
pub type hsize = u64;

/// Types that can be used to refer to some data. See module documentation.
///
/// A handle is just a wrapper around an integer index. Handles are compared
/// and hashed by that index; they carry no reference to the mesh they came
/// from.
pub trait Handle: 'static + Copy + fmt::Debug + PartialEq + Eq + Ord {
    /// Creates a handle from the given index. The index must not be
    /// `hsize::max_value()` as that value is reserved as the "none" sentinel
    /// of optional handles.
    fn new(idx: hsize) -> Self;

    /// Returns the index of the current handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle directly from an `usize`.
    ///
    /// If `raw` cannot be represented by `hsize`, this function either
    /// panics or returns a nonsensical handle. In debug builds, this
    /// function is guaranteed to panic in this case.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        debug_assert!(raw <= hsize::max_value() as usize);
        Self::new(raw as hsize)
    }

    /// Helper method to get the index as an `usize` directly from this
    /// handle.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

/// Generates a newtype handle with all the trait impls a handle needs.
///
/// The `Noned` and `OptEq` impls allow the handle to be stored in an
/// [`optional::Optioned`], which represents "no handle" with the all-ones
/// bit pattern instead of taking up a discriminant word.
macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(id: hsize) -> Self {
                $name(id)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!($short, "{}"), self.0)
            }
        }

        impl optional::Noned for $name {
            #[inline(always)]
            fn is_none(&self) -> bool {
                self.0 == hsize::max_value()
            }

            #[inline(always)]
            fn get_none() -> Self {
                $name(hsize::max_value())
            }
        }

        impl optional::OptEq for $name {
            #[inline(always)]
            fn opt_eq(&self, other: &Self) -> bool {
                self == other
            }
        }
    }
}

make_handle_type!(
    /// A handle referring to a vertex.
    VertexHandle = "V";
);
make_handle_type!(
    /// A handle referring to a full edge, i.e. a pair of opposite half
    /// edges. See [`HalfEdgeHandle`][crate::HalfEdgeHandle] for how the two
    /// handle spaces relate.
    EdgeHandle = "E";
);
make_handle_type!(
    /// A handle referring to a face.
    FaceHandle = "F";
);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_roundtrip() {
        let v = VertexHandle::new(7);
        assert_eq!(v.idx(), 7);
        assert_eq!(v.to_usize(), 7);
        assert_eq!(VertexHandle::from_usize(7), v);
    }

    #[test]
    fn debug_repr() {
        assert_eq!(format!("{:?}", VertexHandle::new(3)), "V3");
        assert_eq!(format!("{:?}", EdgeHandle::new(0)), "E0");
        assert_eq!(format!("{:?}", FaceHandle::new(12)), "F12");
    }

    #[test]
    fn optional_is_sentinel_based() {
        use optional::Optioned;
        use std::mem::size_of;

        assert_eq!(size_of::<Optioned<VertexHandle>>(), size_of::<VertexHandle>());
        assert!(Optioned::<VertexHandle>::none().is_none());
        assert_eq!(
            Optioned::some(VertexHandle::new(4)).into_option(),
            Some(VertexHandle::new(4)),
        );
    }
}
