//! Rendering module
//!
//! Projection and scene building are pure (testable without a GPU); the
//! WebGPU pipeline only tessellates and uploads the finished display list.

pub mod pipeline;
pub mod projection;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use projection::{Projected, project};
pub use scene::{DrawItem, Frame, Shape, Source, build_frame};
pub use shapes::tessellate;
pub use vertex::{Color, Vertex, colors};
