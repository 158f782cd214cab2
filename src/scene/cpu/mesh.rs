use glam::{
  Vec2,
  Vec3,
};
use serde::{
  Deserialize,
  Serialize,
};

use crate::scene::HalaBounds;

/// A mesh is a set of parallel vertex buffers and the triangle indices over them.
/// positions and normals always have the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HalaMesh {
  pub name: String,
  pub positions: Vec<Vec3>,
  pub normals: Vec<Vec3>,
  #[serde(default)]
  pub tangents: Vec<Vec3>,
  #[serde(default)]
  pub tex_coords: Vec<Vec2>,
  #[serde(default)]
  pub indices: Vec<u32>,
  #[serde(default)]
  pub bounds: HalaBounds,
}

/// The implementation of the mesh.
impl HalaMesh {

  /// Create a new mesh from positions and normals.
  /// Bounds are computed, tangents are left empty.
  /// param name: The name of the mesh.
  /// param positions: The vertex positions.
  /// param normals: The vertex normals.
  /// return: The mesh.
  pub fn new(name: &str, positions: Vec<Vec3>, normals: Vec<Vec3>) -> Self {
    debug_assert_eq!(positions.len(), normals.len(), "Mesh \"{}\" has mismatched vertex and normal counts.", name);
    let bounds = HalaBounds::from_points(&positions);
    Self {
      name: name.to_owned(),
      positions,
      normals,
      bounds,
      ..Default::default()
    }
  }

  /// A unit cube centered at the origin, one vertex per corner with the normalized corner
  /// direction as normal.
  /// param name: The name of the mesh.
  /// return: The mesh.
  pub fn unit_cube(name: &str) -> Self {
    let mut positions = Vec::with_capacity(8);
    for x in [-0.5f32, 0.5] {
      for y in [-0.5f32, 0.5] {
        for z in [-0.5f32, 0.5] {
          positions.push(Vec3::new(x, y, z));
        }
      }
    }
    let normals = positions.iter().map(|p| p.normalize()).collect();
    let mut mesh = Self::new(name, positions, normals);
    mesh.indices = vec![
      0, 1, 3, 0, 3, 2, // -X
      4, 6, 7, 4, 7, 5, // +X
      0, 4, 5, 0, 5, 1, // -Y
      2, 3, 7, 2, 7, 6, // +Y
      0, 2, 6, 0, 6, 4, // -Z
      1, 5, 7, 1, 7, 3, // +Z
    ];
    mesh
  }

  /// Get the number of vertices.
  /// return: The number of vertices.
  pub fn num_of_vertices(&self) -> usize {
    self.positions.len()
  }

  /// Recalculate the bounds from the positions.
  pub fn recalculate_bounds(&mut self) {
    self.bounds = HalaBounds::from_points(&self.positions);
  }

  /// Recalculate the tangents.
  /// With texture coordinates and triangles the tangent follows the U direction of each
  /// triangle, otherwise an arbitrary direction perpendicular to the normal is used.
  pub fn recalculate_tangents(&mut self) {
    let num_of_vertices = self.positions.len();
    let has_uv_triangles = self.tex_coords.len() == num_of_vertices && !self.indices.is_empty();

    // Fill the tangents with a direction perpendicular to the normal.
    let mut tangents = self.normals.iter()
      .map(|normal| normal.try_normalize().map_or(Vec3::ZERO, |n| n.any_orthonormal_vector()))
      .collect::<Vec<_>>();
    if has_uv_triangles {
      for tri_indices in self.indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri_indices[0] as usize, tri_indices[1] as usize, tri_indices[2] as usize];
        if i0 >= num_of_vertices || i1 >= num_of_vertices || i2 >= num_of_vertices {
          log::warn!("Mesh \"{}\" has a triangle index out of range.", self.name);
          continue;
        }

        let delta_pos1 = self.positions[i1] - self.positions[i0];
        let delta_pos2 = self.positions[i2] - self.positions[i0];
        let delta_uv1 = self.tex_coords[i1] - self.tex_coords[i0];
        let delta_uv2 = self.tex_coords[i2] - self.tex_coords[i0];

        let det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
        if det.abs() <= f32::EPSILON {
          continue;
        }
        let invdet = 1.0 / det;

        if let Some(tangent) = ((delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * invdet).try_normalize() {
          tangents[i0] = tangent;
          tangents[i1] = tangent;
          tangents[i2] = tangent;
        }
      }
    }
    self.tangents = tangents;
  }
}
