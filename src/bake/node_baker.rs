use crate::error::HalaBakeError;
use crate::scene::HalaScene;
use super::{
  HalaBakeContext,
  HalaTransformFlags,
  mesh_baker::bake_mesh,
  compensator::{
    compensate_child,
    reset_transform,
  },
};

/// Apply the flagged components of a node's local transform.
/// The node's mesh, if any, is baked into a new mesh appended to the scene and the node is
/// rebound to it; other nodes sharing the original mesh keep it. The direct children are
/// compensated and the flagged components of the node are reset to identity.
/// param scene: The scene.
/// param node: The node index.
/// param flags: The components to apply.
/// param context: The bake collaborators.
/// return: The index of the newly baked mesh, None if the node has no mesh or flags are empty.
pub fn bake_node(
  scene: &mut HalaScene,
  node: u32,
  flags: HalaTransformFlags,
  context: &mut HalaBakeContext,
) -> Result<Option<u32>, HalaBakeError> {
  let node_idx = node as usize;
  if node_idx >= scene.nodes.len() {
    return Err(HalaBakeError::new(&format!("Node {} does not exist.", node), None));
  }
  if flags.is_empty() {
    log::debug!("No transform component selected for \"{}\", skipped.", scene.nodes[node_idx].name);
    return Ok(None);
  }

  context.undo.record(scene, node, context.undo_label);

  let transform = scene.nodes[node_idx].transform;
  let mut baked_mesh_index = None;
  if let Some(mesh_index) = scene.nodes[node_idx].mesh_index {
    let node_name = &scene.nodes[node_idx].name;
    let original = &scene.meshes[mesh_index as usize];
    log::debug!("Baking mesh \"{}\" for object \"{}\".", original.name, node_name);

    let mut baked = bake_mesh(&transform, flags, original);
    baked.name = context.store.baked_name(node_name, &original.name, &baked);
    context.store.save(&baked)?;

    let index = scene.add_mesh(baked);
    scene.nodes[node_idx].mesh_index = Some(index);
    baked_mesh_index = Some(index);
  }

  // Keep the children where they are once the parent is reset.
  for child in scene.nodes[node_idx].children.clone() {
    let child_node = &mut scene.nodes[child as usize];
    child_node.transform = compensate_child(&transform, flags, &child_node.transform);
  }

  scene.nodes[node_idx].transform = reset_transform(&transform, flags);
  log::info!("Applied transform to \"{}\".", scene.nodes[node_idx].name);

  Ok(baked_mesh_index)
}

#[cfg(test)]
mod tests {
  use glam::{vec3, Quat, Vec3};

  use crate::persistence::HalaMemoryMeshStore;
  use crate::scene::{HalaMesh, HalaTransform};
  use crate::undo::{HalaNoUndo, HalaUndoJournal};
  use super::*;

  fn scene_with_shared_mesh() -> (HalaScene, u32, u32, u32) {
    let mut scene = HalaScene::default();
    let cube = scene.add_mesh(HalaMesh::unit_cube("Cube"));
    let a = scene.add_node(
      "A",
      None,
      HalaTransform::new(vec3(1.0, 2.0, 3.0), Quat::from_rotation_x(0.5), Vec3::splat(2.0)),
      Some(cube),
    ).unwrap();
    let b = scene.add_node("B", None, HalaTransform::from_translation(Vec3::Y), Some(cube)).unwrap();
    let child = scene.add_node("Child", Some(a), HalaTransform::from_translation(Vec3::X), None).unwrap();
    (scene, a, b, child)
  }

  #[test]
  fn shared_mesh_is_not_mutated() {
    let (mut scene, a, b, _) = scene_with_shared_mesh();
    let original = scene.meshes[0].clone();
    let mut store = HalaMemoryMeshStore::new("BakedMesh");
    let mut undo = HalaNoUndo;
    let mut context = HalaBakeContext::new(&mut store, &mut undo, "Apply Transform");

    let baked = bake_node(&mut scene, a, HalaTransformFlags::ALL, &mut context).unwrap();
    assert_eq!(baked, Some(1));
    assert_eq!(scene.nodes[a as usize].mesh_index, Some(1));
    assert_eq!(scene.nodes[b as usize].mesh_index, Some(0));
    assert_eq!(scene.meshes[0], original);
    assert_eq!(store.meshes.len(), 1);
    assert!(store.meshes.contains_key(&scene.meshes[1].name));
  }

  #[test]
  fn group_node_is_reset_without_mesh() {
    let mut scene = HalaScene::default();
    let group = scene.add_node("Group", None, HalaTransform::from_translation(vec3(0.0, 5.0, 0.0)), None).unwrap();
    let child = scene.add_node("Child", Some(group), HalaTransform::from_translation(Vec3::X), None).unwrap();
    let before = scene.world_transform(child);

    let mut store = HalaMemoryMeshStore::new("BakedMesh");
    let mut undo = HalaNoUndo;
    let mut context = HalaBakeContext::new(&mut store, &mut undo, "Apply Transform");
    let baked = bake_node(&mut scene, group, HalaTransformFlags::ALL, &mut context).unwrap();

    assert_eq!(baked, None);
    assert!(store.meshes.is_empty());
    assert!(scene.nodes[group as usize].transform.is_identity(0.0));
    assert!(scene.world_transform(child).abs_diff_eq(before, 1e-5));
  }

  #[test]
  fn empty_flags_are_a_no_op() {
    let (mut scene, a, _, _) = scene_with_shared_mesh();
    let nodes = scene.nodes.clone();
    let mut store = HalaMemoryMeshStore::new("BakedMesh");
    let mut undo = HalaUndoJournal::default();
    let mut context = HalaBakeContext::new(&mut store, &mut undo, "Apply Transform");

    let baked = bake_node(&mut scene, a, HalaTransformFlags::NONE, &mut context).unwrap();
    assert_eq!(baked, None);
    assert_eq!(scene.nodes, nodes);
    assert_eq!(scene.meshes.len(), 1);
    assert!(store.meshes.is_empty());
    assert!(undo.is_empty());
  }

  #[test]
  fn checkpoint_is_recorded_before_mutation() {
    let (mut scene, a, _, child) = scene_with_shared_mesh();
    let before = scene.nodes.clone();
    let mut store = HalaMemoryMeshStore::new("BakedMesh");
    let mut undo = HalaUndoJournal::default();
    {
      let mut context = HalaBakeContext::new(&mut store, &mut undo, "Apply Transform");
      bake_node(&mut scene, a, HalaTransformFlags::ALL, &mut context).unwrap();
    }
    assert_eq!(undo.len(), 1);
    assert_eq!(undo.undo_last(&mut scene).as_deref(), Some("Apply Transform"));
    assert_eq!(scene.nodes[a as usize], before[a as usize]);
    assert_eq!(scene.nodes[child as usize], before[child as usize]);
  }

  #[test]
  fn missing_node_is_an_error() {
    let mut scene = HalaScene::default();
    let mut store = HalaMemoryMeshStore::new("BakedMesh");
    let mut undo = HalaNoUndo;
    let mut context = HalaBakeContext::new(&mut store, &mut undo, "Apply Transform");
    assert!(bake_node(&mut scene, 0, HalaTransformFlags::ALL, &mut context).is_err());
  }
}
