//! Reexports of commonly used types and traits.
//!
//! This is a convenience: `use pslg::prelude::*;` brings the mesh, the
//! handle types and the handle trait into scope at once.

pub use crate::core::{DcelMesh, Error, HalfEdgeHandle};
pub use crate::handle::{EdgeHandle, FaceHandle, Handle, VertexHandle};
