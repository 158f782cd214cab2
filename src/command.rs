use crate::bake::{
  HalaBakeContext,
  HalaTransformFlags,
  bake_node,
  bake_recursive,
  order_for_individual_apply,
};
use crate::error::HalaBakeError;
use crate::scene::HalaScene;

/// How a selection is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalaApplyMode {
  /// Only the selected nodes, ancestors first.
  Individual,
  /// The top level selected nodes and all of their descendants.
  Recursive,
}

/// Resolve node names to indices.
/// param scene: The scene.
/// param names: The node names.
/// return: The node indices in the order of the names.
pub fn resolve_selection<S: AsRef<str>>(scene: &HalaScene, names: &[S]) -> Result<Vec<u32>, HalaBakeError> {
  names.iter()
    .map(|name| {
      let name = name.as_ref();
      scene.find_node(name)
        .ok_or_else(|| HalaBakeError::new(&format!("Node \"{}\" not found.", name), None))
    })
    .collect()
}

/// Check that the selection is not empty and only holds existing nodes.
fn validate_selection(scene: &HalaScene, selection: &[u32]) -> Result<(), HalaBakeError> {
  if selection.is_empty() {
    return Err(HalaBakeError::new("No selected object.", None));
  }
  if let Some(node) = selection.iter().find(|&&node| node as usize >= scene.nodes.len()) {
    return Err(HalaBakeError::new(&format!("Selected node {} does not exist.", node), None));
  }
  Ok(())
}

/// Apply the transform of every selected node, ancestors before descendants.
/// param scene: The scene.
/// param selection: The selected node indices.
/// param flags: The components to apply.
/// param context: The bake collaborators.
/// return: The number of nodes applied.
pub fn apply_individual(
  scene: &mut HalaScene,
  selection: &[u32],
  flags: HalaTransformFlags,
  context: &mut HalaBakeContext,
) -> Result<usize, HalaBakeError> {
  validate_selection(scene, selection)?;

  let order = order_for_individual_apply(scene, selection);
  for &node in order.iter() {
    bake_node(scene, node, flags, context)?;
  }
  Ok(order.len())
}

/// Apply the transform of the top level selected nodes and all of their descendants.
/// param scene: The scene.
/// param selection: The selected node indices.
/// param flags: The components to apply.
/// param context: The bake collaborators.
/// return: The number of nodes applied.
pub fn apply_recursive(
  scene: &mut HalaScene,
  selection: &[u32],
  flags: HalaTransformFlags,
  context: &mut HalaBakeContext,
) -> Result<usize, HalaBakeError> {
  validate_selection(scene, selection)?;

  let roots = scene.top_level(selection);
  bake_recursive(scene, &roots, flags, context)
}

/// Apply a selection with the given mode.
/// param scene: The scene.
/// param mode: The apply mode.
/// param selection: The selected node indices.
/// param flags: The components to apply.
/// param context: The bake collaborators.
/// return: The number of nodes applied.
pub fn apply(
  scene: &mut HalaScene,
  mode: HalaApplyMode,
  selection: &[u32],
  flags: HalaTransformFlags,
  context: &mut HalaBakeContext,
) -> Result<usize, HalaBakeError> {
  match mode {
    HalaApplyMode::Individual => apply_individual(scene, selection, flags, context),
    HalaApplyMode::Recursive => apply_recursive(scene, selection, flags, context),
  }
}
