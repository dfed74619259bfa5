//! The half-edge mesh data structure and its error type.
//!
//! This module contains the connectivity engine of the crate: [`DcelMesh`]
//! stores vertices, half edges and faces in flat arenas and maintains the
//! topological links between them under incremental mutation. See the
//! [crate documentation][crate] for an introduction and
//! [`dcel`][self::dcel] for the details of the data structure.

use failure::Fail;

use crate::handle::VertexHandle;

mod checked;
pub mod dcel;

pub use self::dcel::{DcelMesh, Face, HalfEdge, HalfEdgeHandle, Vertex};

pub(crate) use self::checked::Checked;


/// Why [`DcelMesh::find_in_between_edges`] could not place a direction in a
/// vertex's edge fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetweenEdgeReason {
    /// The fan around the vertex is not a closed rotation (a `prev` link is
    /// missing). Edge fans of degree ≥ 2 built through
    /// [`DcelMesh::insert_edge`] are always closed, so this indicates a
    /// corrupted mesh.
    OpenFan,

    /// The vertex has two exactly opposite incident edge directions and the
    /// query direction is collinear with them, so there is no unique angular
    /// slot.
    AmbiguousDirection,

    /// No angular slot contains the query direction. This happens when the
    /// direction is collinear with an existing incident edge or when the
    /// query point coincides with the vertex itself.
    NotFound,
}

/// Errors reported by [`DcelMesh`] operations.
///
/// None of these are recovered from internally: every fallible operation
/// either completes fully or returns an error *before* any link of the mesh
/// was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum Error {
    /// `insert_edge` was called with the same vertex for both endpoints.
    #[fail(display = "cannot insert an edge from {:?} to itself", _0)]
    SelfLoop(VertexHandle),

    /// `insert_edge` was called with two vertices at the exact same
    /// position.
    #[fail(display = "cannot insert an edge between {:?} and {:?}: identical positions", _0, _1)]
    CoincidentVertices(VertexHandle, VertexHandle),

    /// A cycle-only operation (like `edges_in_cycle` or
    /// `set_faces_in_cycle`) hit a missing link before returning to its
    /// starting half edge.
    #[fail(display = "half edge chain starting at {:?} is not a closed cycle", _0)]
    EdgeNotClosed(HalfEdgeHandle),

    /// `find_in_between_edges` could not determine the angular slot for a
    /// new edge at the given vertex.
    #[fail(display = "no fan slot at {:?} admits the new edge direction ({:?})", vertex, reason)]
    BetweenEdgeNotFound {
        vertex: VertexHandle,
        reason: BetweenEdgeReason,
    },

    /// `edges_to` walked the full cycle of `start` without encountering
    /// `target`.
    #[fail(display = "{:?} is not reachable in the cycle of {:?}", target, start)]
    TargetNotInCycle {
        start: HalfEdgeHandle,
        target: HalfEdgeHandle,
    },
}
