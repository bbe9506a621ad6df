//! Pool resources referenced by scene nodes.

pub mod mesh;

pub use mesh::{Mesh, SkinBinding};
