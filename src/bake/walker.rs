use crate::error::HalaBakeError;
use crate::scene::HalaScene;
use super::{
  HalaBakeContext,
  HalaTransformFlags,
  node_baker::bake_node,
};

/// Apply the transform to each root and then to all of its descendants, depth first.
/// The roots must not be ancestors of each other.
/// param scene: The scene.
/// param roots: The root node indices.
/// param flags: The components to apply.
/// param context: The bake collaborators.
/// return: The number of nodes visited.
pub fn bake_recursive(
  scene: &mut HalaScene,
  roots: &[u32],
  flags: HalaTransformFlags,
  context: &mut HalaBakeContext,
) -> Result<usize, HalaBakeError> {
  let mut num_of_nodes = 0;
  for &root in roots.iter() {
    bake_node(scene, root, flags, context)?;
    num_of_nodes += 1;
    log::debug!("Applied transform on \"{}\", walking its children.", scene.nodes[root as usize].name);

    // Children are re-read after the parent has compensated them.
    let children = scene.nodes[root as usize].children.clone();
    num_of_nodes += bake_recursive(scene, &children, flags, context)?;
  }
  Ok(num_of_nodes)
}
