pub mod loader;
pub mod transform;
pub mod bounds;
pub mod cpu;

pub use transform::HalaTransform;
pub use bounds::HalaBounds;
pub use cpu::{
  HalaNode,
  HalaMesh,
  HalaScene,
};
