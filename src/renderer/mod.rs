//! WebGPU rendering module
//!
//! The simulation fills a `DrawList`; `tessellate` turns it into coloured
//! triangles in world space and `RenderState` uploads them, leaving the
//! viewport mapping to the shader. Text commands are left to the host.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{CLEAR_COLOR, RenderState};
pub use shapes::tessellate;
pub use vertex::Vertex;
