use std::path::Path;

use crate::error::HalaBakeError;
use crate::scene::HalaTransform;
use super::node::HalaNode;
use super::mesh::HalaMesh;
use super::super::loader::HalaGltfLoader;

/// A scene is an arena of nodes and the meshes they reference.
/// Nodes and meshes are addressed by their index, which never changes.
#[derive(Debug, Default)]
pub struct HalaScene {
  pub nodes: Vec<HalaNode>,
  pub meshes: Vec<HalaMesh>,
}

/// The Drop implementation of the scene.
impl Drop for HalaScene {
  fn drop(&mut self) {
    log::debug!("A HalaScene dropped.");
  }
}

/// The implementation of the scene.
impl HalaScene {
  /// Create a new scene from glTF file.
  /// param path: The path to the glTF file.
  /// return: The scene.
  pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, HalaBakeError> {
    // Check the file extension.
    let path = path.as_ref();
    let extension = path.extension()
      .ok_or(HalaBakeError::new(&format!("Get file \"{:?}\" extension failed.", path), None))?;
    let mut scene = match extension.to_str() {
      // glTF file.
      Some("gltf") | Some("glb") => HalaGltfLoader::load(path),
      // Unsupported file.
      _ => Err(HalaBakeError::new(&format!("Unsupported file \"{:?}\".", path), None)),
    }?;
    scene.update_node_hierarchies();

    log::debug!("A HalaScene created.");
    Ok(scene)
  }

  /// Add a mesh to the scene.
  /// param mesh: The mesh.
  /// return: The index of the mesh.
  pub fn add_mesh(&mut self, mesh: HalaMesh) -> u32 {
    self.meshes.push(mesh);
    (self.meshes.len() - 1) as u32
  }

  /// Add a node to the scene as the last child of its parent.
  /// param name: The name of the node.
  /// param parent: The parent index, None for a root.
  /// param transform: The local transform.
  /// param mesh_index: The mesh index, None for a group node.
  /// return: The index of the node.
  pub fn add_node(
    &mut self,
    name: &str,
    parent: Option<u32>,
    transform: HalaTransform,
    mesh_index: Option<u32>,
  ) -> Result<u32, HalaBakeError> {
    if let Some(parent_idx) = parent {
      if parent_idx as usize >= self.nodes.len() {
        return Err(HalaBakeError::new(&format!("Parent node {} of \"{}\" does not exist.", parent_idx, name), None));
      }
    }
    if let Some(mesh_idx) = mesh_index {
      if mesh_idx as usize >= self.meshes.len() {
        return Err(HalaBakeError::new(&format!("Mesh {} of \"{}\" does not exist.", mesh_idx, name), None));
      }
    }

    let index = self.nodes.len() as u32;
    self.nodes.push(HalaNode {
      name: name.to_owned(),
      parent,
      transform,
      mesh_index,
      ..Default::default()
    });
    if let Some(parent_idx) = parent {
      self.nodes[parent_idx as usize].children.push(index);
    }
    Ok(index)
  }

  /// Find the first node with the given name.
  /// param name: The name of the node.
  /// return: The index of the node.
  pub fn find_node(&self, name: &str) -> Option<u32> {
    self.nodes.iter().position(|node| node.name == name).map(|idx| idx as u32)
  }

  /// Check if a node is a strict ancestor of another node.
  /// param ancestor: The candidate ancestor.
  /// param node: The node.
  /// return: True if ancestor is on the parent chain of node.
  pub fn is_ancestor_of(&self, ancestor: u32, node: u32) -> bool {
    let mut current = self.nodes[node as usize].parent;
    while let Some(parent_idx) = current {
      if parent_idx == ancestor {
        return true;
      }
      current = self.nodes[parent_idx as usize].parent;
    }
    false
  }

  /// Compute the world transform of a node from the current local transforms.
  /// param node: The node index.
  /// return: The world matrix.
  pub fn world_transform(&self, node: u32) -> glam::Mat4 {
    let node = &self.nodes[node as usize];
    let local = node.transform.to_matrix();
    match node.parent {
      Some(parent_idx) => self.world_transform(parent_idx) * local,
      None => local,
    }
  }

  /// Keep only the nodes with no ancestor in the selection.
  /// Duplicates are removed, the selection order is kept.
  /// param selection: The selected node indices.
  /// return: The top level nodes.
  pub fn top_level(&self, selection: &[u32]) -> Vec<u32> {
    let mut top_level: Vec<u32> = Vec::with_capacity(selection.len());
    for &node in selection.iter() {
      if top_level.contains(&node) {
        continue;
      }
      if selection.iter().any(|&other| other != node && self.is_ancestor_of(other, node)) {
        continue;
      }
      top_level.push(node);
    }
    top_level
  }

  /// Update the node hierarchies.
  /// Set the children of each node from the parent links.
  fn update_node_hierarchies(&mut self) {
    let mut temp_children = vec![vec![]; self.nodes.len()];
    for (idx, node) in self.nodes.iter().enumerate() {
      if let Some(parent_idx) = node.parent {
        temp_children[parent_idx as usize].push(idx as u32);
      }
    }
    for (node, children) in self.nodes.iter_mut().zip(temp_children) {
      node.children = children;
    }
  }
}

#[cfg(test)]
mod tests {
  use glam::{vec3, Quat, Vec3};

  use super::*;

  fn chain() -> (HalaScene, u32, u32, u32) {
    let mut scene = HalaScene::default();
    let root = scene.add_node("Root", None, HalaTransform::from_translation(Vec3::X), None).unwrap();
    let mid = scene.add_node(
      "Mid",
      Some(root),
      HalaTransform::new(Vec3::Y, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2), Vec3::ONE),
      None,
    ).unwrap();
    let leaf = scene.add_node("Leaf", Some(mid), HalaTransform::from_translation(Vec3::X), None).unwrap();
    (scene, root, mid, leaf)
  }

  #[test]
  fn add_node_links_children() {
    let (scene, root, mid, leaf) = chain();
    assert_eq!(scene.nodes[root as usize].children, vec![mid]);
    assert_eq!(scene.nodes[mid as usize].children, vec![leaf]);
    assert_eq!(scene.nodes[leaf as usize].parent, Some(mid));
    assert_eq!(scene.find_node("Leaf"), Some(leaf));
    assert_eq!(scene.find_node("Missing"), None);
  }

  #[test]
  fn add_node_rejects_missing_parent() {
    let mut scene = HalaScene::default();
    assert!(scene.add_node("Orphan", Some(3), HalaTransform::IDENTITY, None).is_err());
    assert!(scene.add_node("NoMesh", None, HalaTransform::IDENTITY, Some(0)).is_err());
  }

  #[test]
  fn ancestry_is_strict() {
    let (scene, root, mid, leaf) = chain();
    assert!(scene.is_ancestor_of(root, leaf));
    assert!(scene.is_ancestor_of(mid, leaf));
    assert!(!scene.is_ancestor_of(leaf, root));
    assert!(!scene.is_ancestor_of(leaf, leaf));
  }

  #[test]
  fn world_transform_composes_parents() {
    let (scene, _, _, leaf) = chain();
    let world = scene.world_transform(leaf);
    // Leaf offset along X is rotated onto Y by its parent.
    assert!(world.transform_point3(Vec3::ZERO).abs_diff_eq(vec3(1.0, 2.0, 0.0), 1e-5));
  }

  #[test]
  fn top_level_drops_descendants_and_duplicates() {
    let (mut scene, root, mid, leaf) = chain();
    let other = scene.add_node("Other", None, HalaTransform::IDENTITY, None).unwrap();
    assert_eq!(scene.top_level(&[leaf, other, mid, other]), vec![other, mid]);
    assert_eq!(scene.top_level(&[leaf, root]), vec![root]);
  }

  #[test]
  fn update_node_hierarchies_rebuilds_children() {
    let (mut scene, root, mid, _) = chain();
    for node in scene.nodes.iter_mut() {
      node.children.clear();
    }
    scene.update_node_hierarchies();
    assert_eq!(scene.nodes[root as usize].children, vec![mid]);
  }
}
