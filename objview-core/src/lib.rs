//! objview core: the mesh model behind the viewer.
//!
//! Reads the vertex/face subset of Wavefront OBJ in two passes (count, then
//! fill), stores the result in 1-indexed arrays and applies rotation,
//! translation, centering and scale-to-fit to the stored vertices.

pub mod error;
pub mod geometry;
pub mod obj;
pub mod transform;

// Re-export commonly used types
pub use error::{MeshError, MeshResult};
pub use geometry::{Face, Mesh, MeshCounts, Vertex};
pub use obj::LineKind;
pub use transform::{Axis, PendingRotation, Sign, Transform, TransformKind};
