//! The planar half-edge mesh (doubly connected edge list).

// # Some notes for developers about this implementation
//
// - The twin half edges are stored implicitly: twins are always stored next
//   to one another in the underlying vector and thus always have handle
//   indices only one apart. Furthermore, since we start with the handle
//   index 0, the indices of two twins are always 2k and 2k + 1 where k is an
//   integer.
// - We map edge handles to half edge handles by multiplying by two. Half
//   edge to edge is integer division by two. This works out very nicely: the
//   edge handle space is contiguous and the conversion operations are a
//   simple shift.
// - `insert_edge` resolves the angular fan slots at *both* endpoints before
//   mutating a single link. That way a geometric failure (collinear
//   direction, degenerate query) surfaces as an `Err` while the mesh is
//   still exactly in its pre-call state.

use std::{fmt, mem, ops};

use cgmath::{prelude::*, Matrix4, Point2, Point3, Vector2};
use optional::Optioned as Opt;
use smallvec::SmallVec;
use static_assertions::const_assert_eq;

use crate::{
    geo,
    handle::{hsize, EdgeHandle, FaceHandle, Handle, VertexHandle},
    map::{self, DenseMap},
};
use super::{BetweenEdgeReason, Checked, Error};

pub use self::adj::{
    CycleIter, CycleVertices, EdgeHandles, EdgesToIter, LineIter, VertexEdges, VertexNeighbors,
};
pub(crate) use self::adj::CcwVertexCirculator;

mod adj;


// ===============================================================================================
// ===== HalfEdgeHandle
// ===============================================================================================

/// Handle to refer to half edges.
///
/// Unlike the other handle types, this one is defined here and not in
/// [`handle`][crate::handle]: the relationship between half-edge handles and
/// [`EdgeHandle`]s is a storage detail of this data structure (twins are
/// stored adjacently).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfEdgeHandle(hsize);

impl HalfEdgeHandle {
    /// Returns the handle of this half edge's twin (the half edge between
    /// the same two vertices, pointing in the opposite direction).
    ///
    /// Twins are always stored right next to each other and the handle
    /// indices start counting at 0, so the twin handle is obtained by
    /// flipping the last bit of the index. This is pure index arithmetic:
    /// it does not check that the half edge actually exists.
    #[inline(always)]
    pub fn twin(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Returns the half edge of the given edge with the lower index value.
    #[inline(always)]
    pub fn lower_half_of(edge: EdgeHandle) -> Self {
        Self(edge.idx() * 2)
    }

    /// Returns the full edge this half edge belongs to.
    #[inline(always)]
    pub fn full_edge(self) -> EdgeHandle {
        EdgeHandle::new(self.0 / 2)
    }
}

impl Handle for HalfEdgeHandle {
    #[inline(always)]
    fn new(id: hsize) -> Self {
        HalfEdgeHandle(id)
    }

    #[inline(always)]
    fn idx(&self) -> hsize {
        self.0
    }
}

impl fmt::Debug for HalfEdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HE{}", self.0)
    }
}

impl optional::Noned for HalfEdgeHandle {
    #[inline(always)]
    fn is_none(&self) -> bool {
        self.0 == hsize::max_value()
    }

    #[inline(always)]
    fn get_none() -> Self {
        HalfEdgeHandle(hsize::max_value())
    }
}

impl optional::OptEq for HalfEdgeHandle {
    #[inline(always)]
    fn opt_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Checked<HalfEdgeHandle> {
    /// See [`HalfEdgeHandle::twin`]. A pair of twins is always pushed
    /// together, so the twin of an existing half edge exists as well.
    #[inline(always)]
    pub(crate) fn twin(self) -> Self {
        unsafe { Checked::new((*self).twin()) }
    }
}

// The optional links below rely on the sentinel representation: an optional
// handle has to be exactly as big as the handle itself.
const_assert_eq!(
    mem::size_of::<Opt<Checked<HalfEdgeHandle>>>(),
    mem::size_of::<hsize>()
);


// ===============================================================================================
// ===== Definition of types stored inside the data structure
// ===============================================================================================

/// A vertex of a [`DcelMesh`]: a 2D position plus a link to one outgoing
/// half edge.
#[derive(Clone)]
pub struct Vertex<V> {
    position: Point2<f64>,

    /// Handle of one outgoing half edge. `None` for isolated vertices. For
    /// non-isolated vertices this always satisfies `mesh.from(outgoing) ==
    /// this vertex`.
    outgoing: Opt<Checked<HalfEdgeHandle>>,

    /// Scratch space for client algorithms. Never interpreted by the mesh.
    tag: hsize,

    data: Option<V>,
}

impl<V> Vertex<V> {
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn set_position(&mut self, position: Point2<f64>) {
        self.position = position;
    }

    /// One outgoing half edge, or `None` if this vertex is isolated.
    pub fn outgoing(&self) -> Option<HalfEdgeHandle> {
        self.outgoing.into_option().map(|he| *he)
    }

    pub fn tag(&self) -> hsize {
        self.tag
    }

    pub fn set_tag(&mut self, tag: hsize) {
        self.tag = tag;
    }

    pub fn data(&self) -> Option<&V> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut V> {
        self.data.as_mut()
    }

    /// Replaces the payload, returning the old one.
    pub fn set_data(&mut self, data: Option<V>) -> Option<V> {
        mem::replace(&mut self.data, data)
    }
}

/// A half edge of a [`DcelMesh`].
///
/// Half edges always exist in twin pairs; the twin is found by index
/// arithmetic ([`HalfEdgeHandle::twin`]) and is not stored. The `next` and
/// `prev` links tie the half edge into its face boundary cycle; they are
/// `None` while the cycle is still incomplete.
#[derive(Clone)]
pub struct HalfEdge<E> {
    /// The vertex this half edge starts at.
    from: Checked<VertexHandle>,

    /// The adjacent face, if one has been attached.
    face: Opt<Checked<FaceHandle>>,

    /// The next half edge along the boundary cycle (counter clockwise).
    next: Opt<Checked<HalfEdgeHandle>>,

    /// The previous half edge along the boundary cycle.
    prev: Opt<Checked<HalfEdgeHandle>>,

    /// Scratch space for client algorithms. Never interpreted by the mesh.
    tag: hsize,

    data: Option<E>,
}

impl<E> HalfEdge<E> {
    /// The vertex this half edge starts at.
    pub fn from(&self) -> VertexHandle {
        *self.from
    }

    pub fn face(&self) -> Option<FaceHandle> {
        self.face.into_option().map(|f| *f)
    }

    pub fn next(&self) -> Option<HalfEdgeHandle> {
        self.next.into_option().map(|he| *he)
    }

    pub fn prev(&self) -> Option<HalfEdgeHandle> {
        self.prev.into_option().map(|he| *he)
    }

    pub fn tag(&self) -> hsize {
        self.tag
    }

    pub fn set_tag(&mut self, tag: hsize) {
        self.tag = tag;
    }

    pub fn data(&self) -> Option<&E> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut E> {
        self.data.as_mut()
    }

    /// Replaces the payload, returning the old one.
    pub fn set_data(&mut self, data: Option<E>) -> Option<E> {
        mem::replace(&mut self.data, data)
    }
}

/// A face of a [`DcelMesh`], holding a link to one half edge of its boundary
/// cycle.
///
/// Faces are only ever created attached to a closed cycle (via
/// [`DcelMesh::insert_face`]), so the edge link always exists. By convention
/// boundary cycles run counter-clockwise; this is not checked.
#[derive(Clone)]
pub struct Face<F> {
    /// Handle of one (arbitrary) half edge of the boundary cycle.
    edge: Checked<HalfEdgeHandle>,

    /// Scratch space for client algorithms. Never interpreted by the mesh.
    tag: hsize,

    data: Option<F>,
}

impl<F> Face<F> {
    /// One half edge of this face's boundary cycle.
    pub fn edge(&self) -> HalfEdgeHandle {
        *self.edge
    }

    pub fn tag(&self) -> hsize {
        self.tag
    }

    pub fn set_tag(&mut self, tag: hsize) {
        self.tag = tag;
    }

    pub fn data(&self) -> Option<&F> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut F> {
        self.data.as_mut()
    }

    /// Replaces the payload, returning the old one.
    pub fn set_data(&mut self, data: Option<F>) -> Option<F> {
        mem::replace(&mut self.data, data)
    }
}

impl<V> fmt::Debug for Vertex<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Vertex {{ position: ({}, {}), outgoing: {:?}, tag: {} }}",
            self.position.x, self.position.y, self.outgoing, self.tag,
        )
    }
}

impl<E> fmt::Debug for HalfEdge<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "HalfEdge {{ from: {:5} next: {:6} prev: {:6} face: {:?} }}",
            format!("{:?},", self.from),
            format!("{:?},", self.next),
            format!("{:?},", self.prev),
            self.face,
        )
    }
}

impl<F> fmt::Debug for Face<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Face {{ edge: {:?}, tag: {} }}", self.edge, self.tag)
    }
}


// ===============================================================================================
// ===== The mesh
// ===============================================================================================

/// A half-edge mesh (doubly connected edge list) over 2D points.
///
/// The mesh is built incrementally with [`insert_vertex`][Self::insert_vertex]
/// and [`insert_edge`][Self::insert_edge]; the latter keeps the rotation of
/// edges around every vertex sorted counter-clockwise by angle. Once edge
/// cycles are complete, faces can be attached with
/// [`insert_face`][Self::insert_face].
///
/// The type parameters `V`, `E` and `F` are optional per-element payloads
/// (vertex, half edge, face). The mesh stores them but never interprets
/// them; use `()` if you don't need one.
///
/// There is no per-element removal: the only way to remove anything is
/// [`clear`][Self::clear], which empties the whole mesh.
#[derive(Clone)]
pub struct DcelMesh<V = (), E = (), F = ()> {
    vertices: DenseMap<VertexHandle, Vertex<V>>,
    half_edges: DenseMap<HalfEdgeHandle, HalfEdge<E>>,
    faces: DenseMap<FaceHandle, Face<F>>,
}

/// Helper macro to set the `next` and `prev` handles in one line. These two
/// handles always have to be set at the same time, so with this macro you
/// cannot forget one.
macro_rules! set_next_prev {
    ($mesh:ident, $prev:ident -> $next:ident) => {{
        $mesh[$prev].next = Opt::some($next);
        $mesh[$next].prev = Opt::some($prev);
    }};
}

/// How a new half-edge pair has to be spliced into the fan of one endpoint.
/// Resolved for both endpoints before any link is written.
enum Splice {
    /// The vertex has no incident edges yet.
    Isolated,

    /// The vertex has exactly one incident edge (the stored outgoing one);
    /// there is only one possible slot.
    Single(Checked<HalfEdgeHandle>),

    /// The vertex has several incident edges; the new pair goes into the
    /// corner right before this fan edge.
    Fan(Checked<HalfEdgeHandle>),
}


// ===============================================================================================
// ===== Internal helper methods
// ===============================================================================================

impl<V, E, F> DcelMesh<V, E, F> {
    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_vertex(&self, vh: VertexHandle) -> Checked<VertexHandle> {
        if self.vertices.contains_handle(vh) {
            // We just checked `vh` is valid, so `unsafe` is fine.
            unsafe { Checked::new(vh) }
        } else {
            panic!("{:?} was passed to a DCEL mesh, but this vertex does not exist in this mesh", vh);
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_half_edge(&self, heh: HalfEdgeHandle) -> Checked<HalfEdgeHandle> {
        if self.half_edges.contains_handle(heh) {
            // We just checked `heh` is valid, so `unsafe` is fine.
            unsafe { Checked::new(heh) }
        } else {
            panic!(
                "{:?} was passed to a DCEL mesh, but this half edge does not exist in this mesh",
                heh,
            );
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_face(&self, fh: FaceHandle) -> Checked<FaceHandle> {
        if self.faces.contains_handle(fh) {
            // We just checked `fh` is valid, so `unsafe` is fine.
            unsafe { Checked::new(fh) }
        } else {
            panic!("{:?} was passed to a DCEL mesh, but this face does not exist in this mesh", fh);
        }
    }

    /// Returns an iterator that circulates around the vertex `center` in
    /// counter-clockwise order, yielding outgoing half edges.
    fn circulate_around_vertex(&self, center: Checked<VertexHandle>) -> CcwVertexCirculator<'_, V, E, F> {
        match self[center].outgoing.into_option() {
            None => CcwVertexCirculator::Empty,
            Some(start_he) => CcwVertexCirculator::NonEmpty {
                mesh: self,
                current_he: start_he,
                start_he,
            },
        }
    }

    /// Tries to find the half edge from `from` to `to`. Returns `None` if
    /// there is no edge between the two vertices.
    fn he_between(
        &self,
        from: Checked<VertexHandle>,
        to: Checked<VertexHandle>,
    ) -> Option<Checked<HalfEdgeHandle>> {
        self.circulate_around_vertex(from)
            .find(|&outgoing| self[outgoing.twin()].from == to)
    }

    /// Adds a fresh twin pair: the half edge `from → to` (returned first)
    /// and its twin `to → from`. All links except `from` stay unset; the
    /// caller splices the pair into the endpoint fans.
    fn push_edge_pair(
        &mut self,
        from: Checked<VertexHandle>,
        to: Checked<VertexHandle>,
    ) -> (Checked<HalfEdgeHandle>, Checked<HalfEdgeHandle>) {
        let unlinked = |from| HalfEdge {
            from,
            face: Opt::none(),
            next: Opt::none(),
            prev: Opt::none(),
            tag: 0,
            data: None,
        };

        let e0 = self.half_edges.push(unlinked(from));
        let e1 = self.half_edges.push(unlinked(to));
        debug_assert_eq!(e0.idx() % 2, 0);
        debug_assert_eq!(e1.idx(), e0.idx() + 1);

        // We just pushed both, so `unsafe` is fine.
        unsafe { (Checked::new(e0), Checked::new(e1)) }
    }

    /// Determines how a new edge from `v` towards the point `towards` has to
    /// be spliced into `v`'s fan. Pure: reads the fan, writes nothing.
    fn resolve_splice(
        &self,
        v: Checked<VertexHandle>,
        towards: Point2<f64>,
    ) -> Result<Splice, Error> {
        match self[v].outgoing.into_option() {
            None => Ok(Splice::Isolated),
            Some(outgoing) => {
                if self.circulate_around_vertex(v).count() <= 1 {
                    Ok(Splice::Single(outgoing))
                } else {
                    Ok(Splice::Fan(self.find_slot(v, towards)?))
                }
            }
        }
    }

    /// Splices the new twin pair into the fan of `v`. `new_out` starts at
    /// `v`, `new_in` is its twin (pointing at `v`). Infallible: all decisions
    /// were made in [`resolve_splice`][Self::resolve_splice].
    fn commit_splice(
        &mut self,
        v: Checked<VertexHandle>,
        splice: Splice,
        new_out: Checked<HalfEdgeHandle>,
        new_in: Checked<HalfEdgeHandle>,
    ) {
        match splice {
            Splice::Isolated => {
                self[v].outgoing = Opt::some(new_out);
            }
            Splice::Single(existing) => {
                // With one existing edge there is only one corner the new
                // pair can go into.
                let existing_in = existing.twin();
                set_next_prev!(self, existing_in -> new_out);
                set_next_prev!(self, new_in -> existing);
            }
            Splice::Fan(slot) => {
                let before = self[slot]
                    .prev
                    .into_option()
                    .expect("internal DCEL error: fan slot lost its `prev` link");
                set_next_prev!(self, before -> new_out);
                set_next_prev!(self, new_in -> slot);
            }
        }
    }

    /// Finds the fan edge of `v` whose corner (the angular wedge between it
    /// and its fan predecessor) contains the direction from `v` towards the
    /// given point. See [`find_in_between_edges`][Self::find_in_between_edges]
    /// for the public contract.
    fn find_slot(
        &self,
        v: Checked<VertexHandle>,
        towards: Point2<f64>,
    ) -> Result<Checked<HalfEdgeHandle>, Error> {
        let err = |reason| Error::BetweenEdgeNotFound { vertex: *v, reason };

        let p = self[v].position;
        if towards == p {
            // The direction is undefined; no cone can contain it.
            return Err(err(BetweenEdgeReason::NotFound));
        }
        let origin = Point2::origin();
        let ab = origin + (towards - p).normalize();

        let start = match self[v].outgoing.into_option() {
            Some(start) => start,
            None => return Err(err(BetweenEdgeReason::NotFound)),
        };

        let mut e = start;
        loop {
            let prev = self[e]
                .prev
                .into_option()
                .ok_or_else(|| err(BetweenEdgeReason::OpenFan))?;

            // The corner of `e` is bounded by the direction of the previous
            // fan edge (`a0`, towards the far endpoint of `prev`) and this
            // edge's own direction (`a1`). All directions are normalized so
            // that the exact-sign predicates compare angles, not magnitudes.
            let a0 = origin + (self[self[prev].from].position - p).normalize();
            let a1 = origin + (self[self[e.twin()].from].position - p).normalize();

            if geo::collinear(a0, origin, a1) && geo::collinear(a0, origin, ab) {
                // Two exactly opposite incident directions and the query on
                // the same line: neither cone wins.
                return Err(err(BetweenEdgeReason::AmbiguousDirection));
            }

            if geo::in_cone(a0, origin, a1, ab) {
                return Ok(e);
            }

            e = prev.twin();
            if e == start {
                return Err(err(BetweenEdgeReason::NotFound));
            }
        }
    }

    /// Collects the closed cycle starting at `start` (following `next`).
    /// Fails without side effects if the chain doesn't close.
    fn collect_cycle(
        &self,
        start: Checked<HalfEdgeHandle>,
    ) -> Result<SmallVec<[Checked<HalfEdgeHandle>; 8]>, Error> {
        let mut out = SmallVec::new();
        let mut current = start;
        loop {
            out.push(current);
            match self[current].next.into_option() {
                None => return Err(Error::EdgeNotClosed(*start)),
                Some(n) if n == start => return Ok(out),
                Some(n) => current = n,
            }
        }
    }
}


// ===============================================================================================
// ===== Construction and mutation
// ===============================================================================================

impl<V, E, F> DcelMesh<V, E, F> {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: DenseMap::new(),
            half_edges: DenseMap::new(),
            faces: DenseMap::new(),
        }
    }

    /// Adds a new isolated vertex at the given position.
    ///
    /// No geometric validation happens here; in particular, several vertices
    /// may share a position. Only [`insert_edge`][Self::insert_edge] rejects
    /// coincident endpoints.
    pub fn insert_vertex(&mut self, position: Point2<f64>) -> VertexHandle {
        self.vertices.push(Vertex {
            position,
            outgoing: Opt::none(),
            tag: 0,
            data: None,
        })
    }

    /// Inserts an edge between `v0` and `v1`, returning the half edge
    /// directed `v0 → v1` (its twin is the reverse direction).
    ///
    /// The new twin pair is spliced into the counter-clockwise rotation of
    /// edges around both endpoints. At an endpoint with more than one
    /// existing edge, the angular slot is found via
    /// [`find_in_between_edges`][Self::find_in_between_edges]; its failure
    /// conditions apply (most importantly: the new direction must not be
    /// collinear with an existing edge at that vertex).
    ///
    /// Fails with [`Error::SelfLoop`] or [`Error::CoincidentVertices`] for
    /// degenerate input. On any error the mesh is left unchanged: both fan
    /// slots are resolved before the first link is written.
    pub fn insert_edge(&mut self, v0: VertexHandle, v1: VertexHandle) -> Result<HalfEdgeHandle, Error> {
        let v0 = self.check_vertex(v0);
        let v1 = self.check_vertex(v1);

        if v0 == v1 {
            return Err(Error::SelfLoop(*v0));
        }

        let p0 = self[v0].position;
        let p1 = self[v1].position;
        if p0 == p1 {
            return Err(Error::CoincidentVertices(*v0, *v1));
        }

        // Validate-then-commit: resolve both fan slots before touching any
        // link, so an `Err` leaves the mesh unchanged.
        let splice0 = self.resolve_splice(v0, p1)?;
        let splice1 = self.resolve_splice(v1, p0)?;

        let (e0, e1) = self.push_edge_pair(v0, v1);
        self.commit_splice(v0, splice0, e0, e1);
        self.commit_splice(v1, splice1, e1, e0);

        Ok(*e0)
    }

    /// Creates a new face and attaches it to the closed cycle containing
    /// `he`: the face's edge link is set to `he` and every half edge in the
    /// cycle gets its face link set to the new face.
    ///
    /// Fails with [`Error::EdgeNotClosed`] (without creating anything) if
    /// the chain of `he` doesn't close. Which cycles constitute faces is up
    /// to the caller; this method doesn't check orientation or overlap.
    pub fn insert_face(&mut self, he: HalfEdgeHandle) -> Result<FaceHandle, Error> {
        let he = self.check_half_edge(he);
        let cycle = self.collect_cycle(he)?;

        let fh = self.faces.push(Face {
            edge: he,
            tag: 0,
            data: None,
        });
        // We just pushed the face, so `unsafe` is fine.
        let fh = unsafe { Checked::new(fh) };

        for e in cycle {
            self[e].face = Opt::some(fh);
        }

        Ok(*fh)
    }

    /// Sets the face link of every half edge in the closed cycle starting at
    /// `he` to `face`.
    ///
    /// Fails with [`Error::EdgeNotClosed`] if the chain doesn't close; in
    /// that case no half edge is modified.
    pub fn set_faces_in_cycle(&mut self, he: HalfEdgeHandle, face: FaceHandle) -> Result<(), Error> {
        let he = self.check_half_edge(he);
        let face = self.check_face(face);
        let cycle = self.collect_cycle(he)?;

        for e in cycle {
            self[e].face = Opt::some(face);
        }

        Ok(())
    }

    /// Removes all vertices, half edges and faces.
    ///
    /// This is the only removal operation: individual elements cannot be
    /// removed. Handles obtained before the call are invalid afterwards
    /// (using them panics or refers to newly inserted elements).
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.half_edges.clear();
        self.faces.clear();
    }
}

impl<V, E, F> Default for DcelMesh<V, E, F> {
    fn default() -> Self {
        Self::new()
    }
}


// ===============================================================================================
// ===== Counts, lookup and enumeration
// ===============================================================================================

impl<V, E, F> DcelMesh<V, E, F> {
    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    /// Number of full edges (twin pairs).
    pub fn num_edges(&self) -> hsize {
        self.half_edges.num_elements() / 2
    }

    /// Number of half edges (always `2 * num_edges`).
    pub fn num_half_edges(&self) -> hsize {
        self.half_edges.num_elements()
    }

    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    pub fn contains_vertex(&self, vh: VertexHandle) -> bool {
        self.vertices.contains_handle(vh)
    }

    pub fn contains_half_edge(&self, heh: HalfEdgeHandle) -> bool {
        self.half_edges.contains_handle(heh)
    }

    pub fn contains_face(&self, fh: FaceHandle) -> bool {
        self.faces.contains_handle(fh)
    }

    /// Iterator over all vertex handles in increasing index order.
    pub fn vertex_handles(&self) -> map::Handles<'_, VertexHandle, Vertex<V>> {
        self.vertices.handles()
    }

    /// Iterator over all half edge handles. Twins are adjacent: the handles
    /// come in `2k`, `2k + 1` pairs.
    pub fn half_edge_handles(&self) -> map::Handles<'_, HalfEdgeHandle, HalfEdge<E>> {
        self.half_edges.handles()
    }

    /// Iterator over all full-edge handles (one per twin pair).
    pub fn edge_handles(&self) -> EdgeHandles<'_, E> {
        EdgeHandles::new(self.half_edges.handles())
    }

    /// Iterator over all face handles in increasing index order.
    pub fn face_handles(&self) -> map::Handles<'_, FaceHandle, Face<F>> {
        self.faces.handles()
    }

    /// Iterator over `(handle, vertex)` pairs.
    pub fn vertices(&self) -> map::Iter<'_, VertexHandle, Vertex<V>> {
        self.vertices.iter()
    }

    /// Iterator over `(handle, half edge)` pairs.
    pub fn half_edges(&self) -> map::Iter<'_, HalfEdgeHandle, HalfEdge<E>> {
        self.half_edges.iter()
    }

    /// Iterator over `(handle, face)` pairs.
    pub fn faces(&self) -> map::Iter<'_, FaceHandle, Face<F>> {
        self.faces.iter()
    }
}


// ===============================================================================================
// ===== Adjacency queries
// ===============================================================================================

impl<V, E, F> DcelMesh<V, E, F> {
    /// Returns the twin of `he` (the half edge between the same vertices,
    /// pointing the other way).
    pub fn twin(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        *self.check_half_edge(he).twin()
    }

    /// The vertex `he` starts at.
    pub fn from(&self, he: HalfEdgeHandle) -> VertexHandle {
        let he = self.check_half_edge(he);
        *self[he].from
    }

    /// The vertex `he` points at (the `from` of its twin).
    pub fn to(&self, he: HalfEdgeHandle) -> VertexHandle {
        let he = self.check_half_edge(he);
        *self[he.twin()].from
    }

    /// The successor of `he` along its boundary cycle, if linked yet.
    pub fn next(&self, he: HalfEdgeHandle) -> Option<HalfEdgeHandle> {
        self[he].next()
    }

    /// The predecessor of `he` along its boundary cycle, if linked yet.
    pub fn prev(&self, he: HalfEdgeHandle) -> Option<HalfEdgeHandle> {
        self[he].prev()
    }

    /// The face attached to `he`'s boundary cycle, if any.
    pub fn face_of(&self, he: HalfEdgeHandle) -> Option<FaceHandle> {
        self[he].face()
    }

    /// Euclidean length of the edge.
    pub fn length(&self, he: HalfEdgeHandle) -> f64 {
        self.sqr_length(he).sqrt()
    }

    /// Squared Euclidean length of the edge.
    pub fn sqr_length(&self, he: HalfEdgeHandle) -> f64 {
        let he = self.check_half_edge(he);
        let p0 = self[self[he].from].position;
        let p1 = self[self[he.twin()].from].position;
        (p1 - p0).magnitude2()
    }

    /// Checks whether following `next` from `he` leads back to `he` (i.e.
    /// the half edge lies on a closed cycle).
    pub fn is_closed(&self, he: HalfEdgeHandle) -> bool {
        let start = self.check_half_edge(he);
        let mut current = start;
        loop {
            match self[current].next.into_option() {
                None => return false,
                Some(n) if n == start => return true,
                Some(n) => current = n,
            }
        }
    }

    /// Number of half edges reachable from `he` by following `next`,
    /// including `he` itself. For a closed cycle this is the cycle length;
    /// for an open chain it counts the remaining edges up to the chain end.
    pub fn edge_count(&self, he: HalfEdgeHandle) -> hsize {
        let start = self.check_half_edge(he);
        let mut count = 1;
        let mut current = start;
        loop {
            match self[current].next.into_option() {
                None => return count,
                Some(n) if n == start => return count,
                Some(n) => {
                    count += 1;
                    current = n;
                }
            }
        }
    }

    /// The start of the chain containing `he` (follows `prev` until a
    /// missing link). Returns `he` itself if the chain is a closed cycle.
    pub fn first(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        let start = self.check_half_edge(he);
        let mut current = start;
        loop {
            match self[current].prev.into_option() {
                None => return *current,
                Some(p) if p == start => return *start,
                Some(p) => current = p,
            }
        }
    }

    /// The end of the chain containing `he` (follows `next` until a missing
    /// link). Returns `he` itself if the chain is a closed cycle.
    pub fn last(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        let start = self.check_half_edge(he);
        let mut current = start;
        loop {
            match self[current].next.into_option() {
                None => return *current,
                Some(n) if n == start => return *start,
                Some(n) => current = n,
            }
        }
    }

    /// Iterator over the outgoing half edges of `v`, in counter-clockwise
    /// fan order, starting at the stored outgoing edge.
    ///
    /// If the fan is not a closed rotation (the vertex lies on an
    /// unfinished boundary), the iteration stops at the missing link and
    /// yields only the reachable part. That's by design, not an error.
    pub fn edges_around_vertex(&self, v: VertexHandle) -> VertexEdges<'_, V, E, F> {
        let v = self.check_vertex(v);
        VertexEdges::new(self.circulate_around_vertex(v))
    }

    /// Iterator over the neighbor vertices of `v`, in counter-clockwise fan
    /// order. Same caveats as [`edges_around_vertex`][Self::edges_around_vertex].
    pub fn vertices_around_vertex(&self, v: VertexHandle) -> VertexNeighbors<'_, V, E, F> {
        let v = self.check_vertex(v);
        VertexNeighbors::new(self, self.circulate_around_vertex(v))
    }

    /// Number of incident edges of `v` (the length of
    /// [`edges_around_vertex`][Self::edges_around_vertex]).
    pub fn degree(&self, v: VertexHandle) -> hsize {
        let v = self.check_vertex(v);
        self.circulate_around_vertex(v).count() as hsize
    }

    /// Finds the fan edge of `v` before which an edge towards `towards`
    /// would have to be spliced: the returned edge `e` is the one whose
    /// corner contains the query direction. The corner of a fan edge is the
    /// angular wedge swept counter-clockwise from the edge's own direction
    /// to the direction of its fan predecessor. The incoming half of a new
    /// edge spliced there gets `e` as its `next`; `e`'s old `prev` gets the
    /// outgoing half as its `next`.
    ///
    /// Fails if the fan is not a closed rotation, if the direction is
    /// ambiguous (collinear with two exactly opposite incident edges) or if
    /// no corner contains it (direction collinear with an incident edge, or
    /// `towards` equals the vertex position).
    pub fn find_in_between_edges(
        &self,
        v: VertexHandle,
        towards: Point2<f64>,
    ) -> Result<HalfEdgeHandle, Error> {
        let v = self.check_vertex(v);
        self.find_slot(v, towards).map(|he| *he)
    }

    /// Scans the fan of `v0` for a half edge pointing at `v1`. Returns
    /// `None` if the vertices are not connected (in particular if either is
    /// isolated).
    pub fn find_connecting_edge(&self, v0: VertexHandle, v1: VertexHandle) -> Option<HalfEdgeHandle> {
        let v0 = self.check_vertex(v0);
        let v1 = self.check_vertex(v1);
        self.he_between(v0, v1).map(|he| *he)
    }

    /// Checks whether an edge between `v0` and `v1` exists.
    pub fn are_connected(&self, v0: VertexHandle, v1: VertexHandle) -> bool {
        self.find_connecting_edge(v0, v1).is_some()
    }

    /// Iterator over the closed cycle containing `he`, in `next` direction
    /// if `forwards`, in `prev` direction otherwise.
    ///
    /// The cycle *must* be closed: if a missing link is hit before the walk
    /// returns to `he`, the iterator yields `Err(EdgeNotClosed)` as its last
    /// item. Use [`edges_in_line`][Self::edges_in_line] for open chains.
    pub fn edges_in_cycle(&self, he: HalfEdgeHandle, forwards: bool) -> CycleIter<'_, V, E, F> {
        let he = self.check_half_edge(he);
        CycleIter::new(self, he, forwards)
    }

    /// Iterator over the `from` vertices of the closed cycle containing
    /// `he`, in `next` direction. Yields `Err(EdgeNotClosed)` as its last
    /// item if the cycle doesn't close.
    pub fn vertices_in_cycle(&self, he: HalfEdgeHandle) -> CycleVertices<'_, V, E, F> {
        let he = self.check_half_edge(he);
        CycleVertices::new(self, he)
    }

    /// Iterator over the chain containing `he`: from the chain's
    /// [`first`][Self::first] following `next` (if `forwards`), or from its
    /// [`last`][Self::last] following `prev`. Stops at a missing link
    /// without error; on a closed cycle it yields each half edge once.
    pub fn edges_in_line(&self, he: HalfEdgeHandle, forwards: bool) -> LineIter<'_, V, E, F> {
        let he = self.check_half_edge(he);
        let start = if forwards { self.first(*he) } else { self.last(*he) };
        // `first`/`last` only return existing half edges.
        let start = unsafe { Checked::new(start) };
        LineIter::new(self, start, forwards)
    }

    /// Iterator over the half edges from `he` up to and including `target`,
    /// following `next`. If the walk returns to `he` or hits a missing link
    /// before finding `target`, the final item is `Err(TargetNotInCycle)`.
    pub fn edges_to(&self, he: HalfEdgeHandle, target: HalfEdgeHandle) -> EdgesToIter<'_, V, E, F> {
        let he = self.check_half_edge(he);
        let target = self.check_half_edge(target);
        EdgesToIter::new(self, he, target)
    }
}


// ===============================================================================================
// ===== Bulk operations: tagging, transforms, payload clearing
// ===============================================================================================

impl<V, E, F> DcelMesh<V, E, F> {
    /// Sets the tag of every vertex to `tag`.
    pub fn tag_vertices(&mut self, tag: hsize) {
        for (_, v) in self.vertices.iter_mut() {
            v.tag = tag;
        }
    }

    /// Tags all vertices sequentially (0, 1, 2, …) in enumeration order.
    pub fn tag_vertices_by_index(&mut self) {
        for (i, (_, v)) in self.vertices.iter_mut().enumerate() {
            v.tag = i as hsize;
        }
    }

    /// Sets the tag of every half edge to `tag`. Both halves of every twin
    /// pair are tagged.
    pub fn tag_half_edges(&mut self, tag: hsize) {
        for (_, he) in self.half_edges.iter_mut() {
            he.tag = tag;
        }
    }

    /// Tags all half edges sequentially in enumeration order. Twins get
    /// adjacent tags (`2k` and `2k + 1`).
    pub fn tag_half_edges_by_index(&mut self) {
        for (i, (_, he)) in self.half_edges.iter_mut().enumerate() {
            he.tag = i as hsize;
        }
    }

    /// Sets the tag of every face to `tag`.
    pub fn tag_faces(&mut self, tag: hsize) {
        for (_, f) in self.faces.iter_mut() {
            f.tag = tag;
        }
    }

    /// Tags all faces sequentially in enumeration order.
    pub fn tag_faces_by_index(&mut self) {
        for (i, (_, f)) in self.faces.iter_mut().enumerate() {
            f.tag = i as hsize;
        }
    }

    /// Sets the tag of every vertex, half edge and face to `tag`.
    pub fn tag_all(&mut self, tag: hsize) {
        self.tag_vertices(tag);
        self.tag_half_edges(tag);
        self.tag_faces(tag);
    }

    /// Tags all vertices, half edges and faces sequentially (each element
    /// kind counts on its own).
    pub fn tag_all_by_index(&mut self) {
        self.tag_vertices_by_index();
        self.tag_half_edges_by_index();
        self.tag_faces_by_index();
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector2<f64>) {
        for (_, v) in self.vertices.iter_mut() {
            v.position += offset;
        }
    }

    /// Scales every vertex position component-wise (around the origin).
    pub fn scale(&mut self, factors: Vector2<f64>) {
        for (_, v) in self.vertices.iter_mut() {
            v.position.x *= factors.x;
            v.position.y *= factors.y;
        }
    }

    /// Applies a homogeneous transform to every vertex position: the point
    /// `(x, y)` is lifted to `(x, y, 0, 1)`, multiplied by `m` and the
    /// resulting x/y taken.
    pub fn transform(&mut self, m: &Matrix4<f64>) {
        for (_, v) in self.vertices.iter_mut() {
            let lifted = m.transform_point(Point3::new(v.position.x, v.position.y, 0.0));
            v.position = Point2::new(lifted.x, lifted.y);
        }
    }

    /// Drops the payload of every vertex. Topology is untouched.
    pub fn clear_vertex_data(&mut self) {
        for (_, v) in self.vertices.iter_mut() {
            v.data = None;
        }
    }

    /// Drops the payload of every half edge. Topology is untouched.
    pub fn clear_edge_data(&mut self) {
        for (_, he) in self.half_edges.iter_mut() {
            he.data = None;
        }
    }

    /// Drops the payload of every face. Topology is untouched.
    pub fn clear_face_data(&mut self) {
        for (_, f) in self.faces.iter_mut() {
            f.data = None;
        }
    }

    /// Drops all payloads of all element kinds.
    pub fn clear_all_data(&mut self) {
        self.clear_vertex_data();
        self.clear_edge_data();
        self.clear_face_data();
    }
}


// ===============================================================================================
// ===== Indexing
// ===============================================================================================

macro_rules! impl_index {
    ($handle:ident, $field:ident, $out:ty) => {
        impl<V, E, F> ops::Index<$handle> for DcelMesh<V, E, F> {
            type Output = $out;
            fn index(&self, handle: $handle) -> &Self::Output {
                &self.$field[handle]
            }
        }

        impl<V, E, F> ops::IndexMut<$handle> for DcelMesh<V, E, F> {
            fn index_mut(&mut self, handle: $handle) -> &mut Self::Output {
                &mut self.$field[handle]
            }
        }

        impl<V, E, F> ops::Index<Checked<$handle>> for DcelMesh<V, E, F> {
            type Output = $out;
            fn index(&self, handle: Checked<$handle>) -> &Self::Output {
                // `Checked` handles are guaranteed valid by the one who
                // created them.
                unsafe { self.$field.get_unchecked(*handle) }
            }
        }

        impl<V, E, F> ops::IndexMut<Checked<$handle>> for DcelMesh<V, E, F> {
            fn index_mut(&mut self, handle: Checked<$handle>) -> &mut Self::Output {
                unsafe { self.$field.get_unchecked_mut(*handle) }
            }
        }
    };
}

impl_index!(VertexHandle, vertices, Vertex<V>);
impl_index!(HalfEdgeHandle, half_edges, HalfEdge<E>);
impl_index!(FaceHandle, faces, Face<F>);

impl<V, E, F> fmt::Debug for DcelMesh<V, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DcelMesh")
            .field("vertices", &self.vertices)
            .field("half_edges", &self.half_edges)
            .field("faces", &self.faces)
            .finish()
    }
}
