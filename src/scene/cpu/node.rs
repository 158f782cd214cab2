use serde::{
  Deserialize,
  Serialize,
};

use crate::scene::HalaTransform;

/// A node is a local transform, an optional mesh binding and child indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalaNode {
  pub name: String,
  pub parent: Option<u32>,
  pub children: Vec<u32>,
  pub transform: HalaTransform,

  pub mesh_index: Option<u32>,
}

/// The default implementation of the node.
impl Default for HalaNode {
  fn default() -> Self {
    Self {
      name: String::new(),
      parent: None,
      children: Vec::new(),
      transform: HalaTransform::IDENTITY,
      mesh_index: None,
    }
  }
}
