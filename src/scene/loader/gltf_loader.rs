use std::path::Path;
use std::collections::VecDeque;

use glam::{
  Quat,
  Vec2,
  Vec3,
};

use crate::error::HalaBakeError;
use super::super::{
  cpu::scene::HalaScene,
  cpu::node::HalaNode,
  cpu::mesh::HalaMesh,
  transform::HalaTransform,
};

/// The glTF loader.
pub struct HalaGltfLoader;

/// The implementation of the glTF loader.
impl HalaGltfLoader {
  /// Load the glTF file from the given path.
  /// Only the node hierarchy and the mesh geometry are read.
  /// param path The path of the glTF file.
  /// return The loaded scene.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<HalaScene, HalaBakeError> {
    let path = path.as_ref();
    let (gltf, mesh_data, _) = gltf::import(path)
      .map_err(|err| HalaBakeError::new(&format!("Load glTF file \"{:?}\" failed.", path), Some(Box::new(err))))?;

    // Load all meshes. Meshes that cannot be baked are left out and their nodes unbound.
    let mut loaded_meshes = Vec::new();
    let mut mesh_indices = Vec::with_capacity(gltf.meshes().len());
    for mesh in gltf.meshes() {
      match Self::load_mesh(&mesh, &mesh_data) {
        Some(loaded_mesh) => {
          mesh_indices.push(Some(loaded_meshes.len() as u32));
          loaded_meshes.push(loaded_mesh);
        },
        None => mesh_indices.push(None),
      }
    }

    // Load all nodes.
    let mut loaded_nodes = Vec::new();
    let mut scenes = gltf.scenes();
    if scenes.len() > 1 {
      log::warn!("More than one scene in glTF file \"{:?}\". Only the first scene will be loaded.", path);
    }
    let scene = scenes.next()
      .ok_or(HalaBakeError::new(&format!("No scene in glTF file \"{:?}\".", path), None))?;
    log::debug!("Loading scene \"{}\".", scene.name().unwrap_or("<Unnamed>"));

    let mut node_queue = VecDeque::new();
    node_queue.extend(scene.nodes().map(|node| (None, node)));

    while let Some((parent_idx, node)) = node_queue.pop_front() {
      let (translation, rotation, scale) = node.transform().decomposed();
      let current_index = loaded_nodes.len() as u32;
      loaded_nodes.push(HalaNode {
        name: node.name().unwrap_or("<Unnamed>").to_owned(),
        parent: parent_idx,
        transform: HalaTransform::new(
          Vec3::from(translation),
          Quat::from_array(rotation).normalize(),
          Vec3::from(scale),
        ),
        mesh_index: node.mesh().and_then(|mesh| mesh_indices[mesh.index()]),
        ..Default::default()
      });
      node_queue.extend(node.children().map(|child| (Some(current_index), child)));
    }

    Ok(HalaScene {
      nodes: loaded_nodes,
      meshes: loaded_meshes,
    })
  }

  /// Load the mesh. All primitives are concatenated into one set of buffers.
  /// param mesh The gltf mesh.
  /// param buffers The gltf buffers.
  /// return The loaded mesh, None if a primitive lacks positions or normals.
  fn load_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Option<HalaMesh> {
    let mesh_name = mesh.name().unwrap_or("<Unnamed>");
    log::debug!("Loading mesh \"{}\".", mesh_name);

    let mut loaded_mesh = HalaMesh {
      name: mesh_name.to_owned(),
      ..Default::default()
    };
    let mut all_have_tex_coords = true;
    for primitive in mesh.primitives() {
      log::debug!("Loading primitive {} from mesh \"{}\".", primitive.index(), mesh_name);
      let reader = primitive.reader(|i| Some(&buffers[i.index()]));
      let base_vertex = loaded_mesh.positions.len() as u32;

      let (Some(positions), Some(normals)) = (reader.read_positions(), reader.read_normals()) else {
        log::warn!("Mesh \"{}\" has a primitive without positions or normals, skipped.", mesh_name);
        return None;
      };
      let positions = positions.map(Vec3::from).collect::<Vec<_>>();
      let normals = normals.map(Vec3::from).collect::<Vec<_>>();
      if positions.len() != normals.len() {
        log::warn!("Mesh \"{}\" has {} positions but {} normals, skipped.", mesh_name, positions.len(), normals.len());
        return None;
      }
      let num_of_vertices = positions.len() as u32;

      match reader.read_tex_coords(0) {
        Some(tex_coords) => loaded_mesh.tex_coords.extend(tex_coords.into_f32().map(Vec2::from)),
        None => all_have_tex_coords = false,
      }
      match reader.read_indices() {
        Some(indices) => loaded_mesh.indices.extend(indices.into_u32().map(|idx| idx + base_vertex)),
        None => loaded_mesh.indices.extend(base_vertex..base_vertex + num_of_vertices),
      }
      loaded_mesh.positions.extend(positions);
      loaded_mesh.normals.extend(normals);
    }

    if !all_have_tex_coords {
      loaded_mesh.tex_coords.clear();
    }
    loaded_mesh.recalculate_bounds();
    loaded_mesh.recalculate_tangents();

    Some(loaded_mesh)
  }
}
