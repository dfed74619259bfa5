//! Dense, handle-indexed storage for mesh elements.

use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use stable_vec::{
    core::DefaultCore,
    iter::{Indices, Iter as SvIter, IterMut as SvIterMut},
    StableVec,
};

use crate::handle::{hsize, Handle};


/// A map that stores its values in a simple contiguous vector, indexed by the
/// handle's index.
///
/// This map's memory requirement grows with the highest handle index, not
/// with the number of elements. All handle sources in this library (the mesh
/// arenas) hand out sequentially increasing indices, which makes this the
/// right storage: lookup is a plain array access.
///
/// The underlying `StableVec` keeps per-slot occupancy, so handles that were
/// never pushed (or whose slot was removed) are simply absent rather than
/// undefined. Nothing in this library removes individual elements today, but
/// all iterators already skip holes.
#[derive(Clone)]
pub struct DenseMap<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> DenseMap<H, T> {
    /// Creates an empty `DenseMap`.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    /// Appends a new value, returning the handle it was stored under.
    pub fn push(&mut self, elem: T) -> H {
        H::from_usize(self.vec.push(elem))
    }

    /// Number of elements currently stored.
    pub fn num_elements(&self) -> hsize {
        self.vec.num_elements() as hsize
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn contains_handle(&self, handle: H) -> bool {
        self.vec.has_element_at(handle.to_usize())
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
    }

    /// Removes all elements and truncates the storage.
    pub fn clear(&mut self) {
        self.vec.clear();
    }

    pub fn reserve(&mut self, additional: hsize) {
        self.vec.reserve(additional as usize);
    }

    /// Iterator over `(handle, &value)` pairs in increasing handle order.
    pub fn iter(&self) -> Iter<'_, H, T> {
        Iter {
            iter: self.vec.iter(),
            _dummy: PhantomData,
        }
    }

    /// Iterator over `(handle, &mut value)` pairs in increasing handle order.
    pub fn iter_mut(&mut self) -> IterMut<'_, H, T> {
        IterMut {
            iter: self.vec.iter_mut(),
            _dummy: PhantomData,
        }
    }

    /// Iterator over all existing handles in increasing index order.
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles {
            iter: self.vec.indices(),
            _dummy: PhantomData,
        }
    }

    /// Access without the bounds check.
    ///
    /// The caller has to guarantee that an element exists for `handle`. This
    /// is used internally with [`Checked`][crate::core] handles only.
    pub(crate) unsafe fn get_unchecked(&self, handle: H) -> &T {
        self.vec.get_unchecked(handle.to_usize())
    }

    /// Mutable access without the bounds check. See
    /// [`get_unchecked`][Self::get_unchecked].
    pub(crate) unsafe fn get_unchecked_mut(&mut self, handle: H) -> &mut T {
        self.vec.get_unchecked_mut(handle.to_usize())
    }
}

impl<H: Handle, T> Index<H> for DenseMap<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("no element found for handle {:?}", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for DenseMap<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no element found for handle {:?}", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> Default for DenseMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for DenseMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.vec.indices().map(|k| (H::from_usize(k), &self.vec[k])))
            .finish()
    }
}


// ===== Iterators ===============================================================================

#[derive(Debug, Clone)]
pub struct Iter<'a, H: Handle, T> {
    iter: SvIter<'a, T, DefaultCore<T>>,
    _dummy: PhantomData<H>,
}

impl<'a, H: Handle, T> Iterator for Iter<'a, H, T> {
    type Item = (H, &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(i, e)| (H::from_usize(i), e))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<H: Handle, T> ExactSizeIterator for Iter<'_, H, T> {}
impl<H: Handle, T> FusedIterator for Iter<'_, H, T> {}

#[derive(Debug)]
pub struct IterMut<'a, H: Handle, T> {
    iter: SvIterMut<'a, T, DefaultCore<T>>,
    _dummy: PhantomData<H>,
}

impl<'a, H: Handle, T> Iterator for IterMut<'a, H, T> {
    type Item = (H, &'a mut T);
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(i, e)| (H::from_usize(i), e))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<H: Handle, T> ExactSizeIterator for IterMut<'_, H, T> {}
impl<H: Handle, T> FusedIterator for IterMut<'_, H, T> {}

#[derive(Debug, Clone)]
pub struct Handles<'a, H: Handle, T> {
    iter: Indices<'a, T, DefaultCore<T>>,
    _dummy: PhantomData<&'a H>,
}

impl<H: Handle, T> Iterator for Handles<'_, H, T> {
    type Item = H;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(H::from_usize)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<H: Handle, T> ExactSizeIterator for Handles<'_, H, T> {}
impl<H: Handle, T> FusedIterator for Handles<'_, H, T> {}


// ===== Tests ===================================================================================
