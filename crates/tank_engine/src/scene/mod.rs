//! Scene graph
//!
//! Hierarchical transform graph shared by gameplay, collision resolution and
//! hit detection:
//!
//! ```text
//! SceneGraph (arena, root list)
//!   └─ Node (local T/R/S, children, optional Arc<Mesh>, entity tags)
//!        └─ Mesh ─ Primitive (optional local bounds)
//! ```

mod scene_graph;
pub mod mesh;
pub mod node;

pub use mesh::{Mesh, Primitive};
pub use node::{Node, PowerupKind};
pub use scene_graph::{NodeId, SceneError, SceneGraph};
