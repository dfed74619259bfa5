//! A half-edge mesh (DCEL) for planar straight-line graphs.
//!
//! This library implements the *doubly connected edge list*: a planar-graph
//! representation in which every undirected edge is stored as two
//! oppositely-directed *half edges*. Each half edge knows the vertex it
//! starts at, the face it borders, its predecessor and successor along that
//! face's boundary and (implicitly) its twin. This makes all the usual
//! adjacency questions ("which edges leave this vertex?", "walk this face's
//! boundary") cheap to answer, at the cost of maintaining a handful of
//! mutually-consistent links under mutation.
//!
//! A graph is built incrementally: [`DcelMesh::insert_vertex`] adds isolated
//! vertices, [`DcelMesh::insert_edge`] connects two of them and splices the
//! new half-edge pair into the counter-clockwise rotation of edges around
//! each endpoint. At vertices with more than one incident edge the correct
//! angular slot is found with the cone-containment predicate from [`geo`].
//! Once cycles are complete, faces can be attached to them with
//! [`DcelMesh::insert_face`].
//!
//! # Handles
//!
//! All elements live in flat arenas and are addressed by small typed indices
//! called *handles* ([`VertexHandle`], [`HalfEdgeHandle`], [`EdgeHandle`],
//! [`FaceHandle`]). Handles are `Copy` and don't borrow the mesh; passing a
//! handle that does not refer to an existing element of the mesh you pass it
//! to is a logic error and will panic.
//!
//! # Example
//!
//! ```
//! use cgmath::Point2;
//! use pslg::DcelMesh;
//!
//! let mut mesh = DcelMesh::<(), (), ()>::new();
//! let a = mesh.insert_vertex(Point2::new(0.0, 0.0));
//! let b = mesh.insert_vertex(Point2::new(1.0, 0.0));
//! let c = mesh.insert_vertex(Point2::new(0.0, 1.0));
//!
//! mesh.insert_edge(a, b).unwrap();
//! mesh.insert_edge(b, c).unwrap();
//! let ca = mesh.insert_edge(c, a).unwrap();
//!
//! assert!(mesh.is_closed(ca));
//! assert_eq!(mesh.edge_count(ca), 3);
//! ```

pub mod core;
pub mod geo;
pub mod handle;
pub mod map;
pub mod math;
pub mod prelude;

pub use crate::{
    core::{BetweenEdgeReason, DcelMesh, Error, HalfEdgeHandle},
    handle::{hsize, EdgeHandle, FaceHandle, Handle, VertexHandle},
};
