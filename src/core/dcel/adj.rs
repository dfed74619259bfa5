//! Iterators over adjacent elements: vertex fans, boundary cycles and open
//! chains.
//!
//! All iterators here hold a shared borrow of the mesh, so the borrow
//! checker statically rules out mutation during iteration.

use crate::handle::{EdgeHandle, Handle, VertexHandle};
use crate::map;
use super::{Checked, DcelMesh, Error, HalfEdge, HalfEdgeHandle};


// ===============================================================================================
// ===== Vertex fan circulation
// ===============================================================================================

/// Internal circulator around a vertex, yielding outgoing half edges in
/// counter-clockwise order. Stops after a full rotation, or earlier if a
/// `prev` link is missing (open boundary fan).
#[derive(Debug, Clone)]
pub(crate) enum CcwVertexCirculator<'a, V, E, F> {
    Empty,
    NonEmpty {
        mesh: &'a DcelMesh<V, E, F>,
        current_he: Checked<HalfEdgeHandle>,
        start_he: Checked<HalfEdgeHandle>,
    },
}

impl<V, E, F> Iterator for CcwVertexCirculator<'_, V, E, F> {
    type Item = Checked<HalfEdgeHandle>;

    fn next(&mut self) -> Option<Self::Item> {
        let (mesh, current_he, start_he) = match self {
            CcwVertexCirculator::Empty => return None,
            CcwVertexCirculator::NonEmpty { mesh, current_he, start_he } => {
                (*mesh, *current_he, *start_he)
            }
        };

        // The CCW neighbor of an outgoing half edge is the twin of the
        // incoming edge right before it in its cycle.
        let next = match mesh[current_he].prev.into_option() {
            None => None,
            Some(prev) => {
                let next = prev.twin();
                if next == start_he {
                    None
                } else {
                    Some(next)
                }
            }
        };

        match next {
            None => *self = CcwVertexCirculator::Empty,
            Some(next) => match self {
                CcwVertexCirculator::NonEmpty { current_he, .. } => *current_he = next,
                _ => unreachable!(),
            },
        }

        Some(current_he)
    }
}

/// Iterator over the outgoing half edges of a vertex in counter-clockwise
/// order. Returned by [`DcelMesh::edges_around_vertex`].
#[derive(Debug, Clone)]
pub struct VertexEdges<'a, V, E, F>(CcwVertexCirculator<'a, V, E, F>);

impl<'a, V, E, F> VertexEdges<'a, V, E, F> {
    pub(crate) fn new(inner: CcwVertexCirculator<'a, V, E, F>) -> Self {
        Self(inner)
    }
}

impl<V, E, F> Iterator for VertexEdges<'_, V, E, F> {
    type Item = HalfEdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|he| *he)
    }
}

/// Iterator over the neighbor vertices of a vertex in counter-clockwise
/// order. Returned by [`DcelMesh::vertices_around_vertex`].
#[derive(Debug, Clone)]
pub struct VertexNeighbors<'a, V, E, F> {
    mesh: &'a DcelMesh<V, E, F>,
    inner: CcwVertexCirculator<'a, V, E, F>,
}

impl<'a, V, E, F> VertexNeighbors<'a, V, E, F> {
    pub(crate) fn new(mesh: &'a DcelMesh<V, E, F>, inner: CcwVertexCirculator<'a, V, E, F>) -> Self {
        Self { mesh, inner }
    }
}

impl<V, E, F> Iterator for VertexNeighbors<'_, V, E, F> {
    type Item = VertexHandle;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|outgoing| *self.mesh[outgoing.twin()].from)
    }
}


// ===============================================================================================
// ===== Cycle and chain walks
// ===============================================================================================

#[derive(Debug, Clone, Copy)]
enum WalkState {
    At(Checked<HalfEdgeHandle>),
    Done,
}

/// Iterator over a closed boundary cycle. Returned by
/// [`DcelMesh::edges_in_cycle`].
///
/// Yields `Err(EdgeNotClosed)` as the final item if the chain turns out not
/// to close; callers that have already verified closedness (e.g. via
/// [`DcelMesh::is_closed`]) can safely unwrap the items.
#[derive(Debug, Clone)]
pub struct CycleIter<'a, V, E, F> {
    mesh: &'a DcelMesh<V, E, F>,
    start: Checked<HalfEdgeHandle>,
    forwards: bool,
    state: WalkState,
}

impl<'a, V, E, F> CycleIter<'a, V, E, F> {
    pub(crate) fn new(mesh: &'a DcelMesh<V, E, F>, start: Checked<HalfEdgeHandle>, forwards: bool) -> Self {
        Self {
            mesh,
            start,
            forwards,
            state: WalkState::At(start),
        }
    }
}

impl<V, E, F> Iterator for CycleIter<'_, V, E, F> {
    type Item = Result<HalfEdgeHandle, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = match self.state {
            WalkState::Done => return None,
            WalkState::At(he) => he,
        };

        let link = if self.forwards {
            self.mesh[current].next
        } else {
            self.mesh[current].prev
        };

        match link.into_option() {
            None => {
                self.state = WalkState::Done;
                Some(Err(Error::EdgeNotClosed(*self.start)))
            }
            Some(n) => {
                self.state = if n == self.start {
                    WalkState::Done
                } else {
                    WalkState::At(n)
                };
                Some(Ok(*current))
            }
        }
    }
}

/// Iterator over the `from` vertices of a closed boundary cycle. Returned by
/// [`DcelMesh::vertices_in_cycle`].
#[derive(Debug, Clone)]
pub struct CycleVertices<'a, V, E, F> {
    inner: CycleIter<'a, V, E, F>,
}

impl<'a, V, E, F> CycleVertices<'a, V, E, F> {
    pub(crate) fn new(mesh: &'a DcelMesh<V, E, F>, start: Checked<HalfEdgeHandle>) -> Self {
        Self {
            inner: CycleIter::new(mesh, start, true),
        }
    }
}

impl<V, E, F> Iterator for CycleVertices<'_, V, E, F> {
    type Item = Result<VertexHandle, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mesh = self.inner.mesh;
        self.inner.next().map(|item| item.map(|he| mesh[he].from()))
    }
}

/// Iterator over an open chain (or a full cycle), tolerant of missing links.
/// Returned by [`DcelMesh::edges_in_line`].
#[derive(Debug, Clone)]
pub struct LineIter<'a, V, E, F> {
    mesh: &'a DcelMesh<V, E, F>,
    start: Checked<HalfEdgeHandle>,
    forwards: bool,
    state: WalkState,
}

impl<'a, V, E, F> LineIter<'a, V, E, F> {
    pub(crate) fn new(mesh: &'a DcelMesh<V, E, F>, start: Checked<HalfEdgeHandle>, forwards: bool) -> Self {
        Self {
            mesh,
            start,
            forwards,
            state: WalkState::At(start),
        }
    }
}

impl<V, E, F> Iterator for LineIter<'_, V, E, F> {
    type Item = HalfEdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let current = match self.state {
            WalkState::Done => return None,
            WalkState::At(he) => he,
        };

        let link = if self.forwards {
            self.mesh[current].next
        } else {
            self.mesh[current].prev
        };

        // A missing link is simply the end of the chain here. The start
        // check guards against endless loops on closed cycles.
        self.state = match link.into_option() {
            Some(n) if n != self.start => WalkState::At(n),
            _ => WalkState::Done,
        };

        Some(*current)
    }
}

/// Iterator over the half edges from a start to a target within one cycle.
/// Returned by [`DcelMesh::edges_to`].
#[derive(Debug, Clone)]
pub struct EdgesToIter<'a, V, E, F> {
    mesh: &'a DcelMesh<V, E, F>,
    start: Checked<HalfEdgeHandle>,
    target: Checked<HalfEdgeHandle>,
    state: WalkState,
}

impl<'a, V, E, F> EdgesToIter<'a, V, E, F> {
    pub(crate) fn new(
        mesh: &'a DcelMesh<V, E, F>,
        start: Checked<HalfEdgeHandle>,
        target: Checked<HalfEdgeHandle>,
    ) -> Self {
        Self {
            mesh,
            start,
            target,
            state: WalkState::At(start),
        }
    }
}

impl<V, E, F> Iterator for EdgesToIter<'_, V, E, F> {
    type Item = Result<HalfEdgeHandle, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = match self.state {
            WalkState::Done => return None,
            WalkState::At(he) => he,
        };

        if current == self.target {
            self.state = WalkState::Done;
            return Some(Ok(*current));
        }

        match self.mesh[current].next.into_option() {
            Some(n) if n != self.start => {
                self.state = WalkState::At(n);
                Some(Ok(*current))
            }
            // Wrapped around or hit a missing link without finding the
            // target.
            _ => {
                self.state = WalkState::Done;
                Some(Err(Error::TargetNotInCycle {
                    start: *self.start,
                    target: *self.target,
                }))
            }
        }
    }
}


// ===============================================================================================
// ===== Full-edge enumeration
// ===============================================================================================

/// Iterator over all full-edge handles of a mesh (one per twin pair).
/// Returned by [`DcelMesh::edge_handles`].
#[derive(Debug, Clone)]
pub struct EdgeHandles<'a, E> {
    inner: map::Handles<'a, HalfEdgeHandle, HalfEdge<E>>,
}

impl<'a, E> EdgeHandles<'a, E> {
    pub(crate) fn new(inner: map::Handles<'a, HalfEdgeHandle, HalfEdge<E>>) -> Self {
        Self { inner }
    }
}

impl<E> Iterator for EdgeHandles<'_, E> {
    type Item = EdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        // Twins are stored adjacently, so the half edge with the even index
        // represents the full edge.
        while let Some(he) = self.inner.next() {
            if he.idx() % 2 == 0 {
                return Some(he.full_edge());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.inner.size_hint();
        (lo / 2, hi.map(|h| (h + 1) / 2))
    }
}
