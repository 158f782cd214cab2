use glam::Vec3;
use rayon::prelude::*;

use crate::scene::{
  HalaMesh,
  HalaTransform,
};
use super::HalaTransformFlags;

/// Bake a single position: scale, then rotate, then translate.
/// param transform: The transform to fold in.
/// param flags: The components to fold in.
/// param position: The position.
/// return: The baked position.
#[inline]
pub fn bake_position(transform: &HalaTransform, flags: HalaTransformFlags, position: Vec3) -> Vec3 {
  let mut baked = position;
  if flags.scale {
    baked *= transform.scale;
  }
  if flags.rotation {
    baked = transform.rotation * baked;
  }
  if flags.translation {
    baked += transform.translation;
  }
  baked
}

/// Bake a single normal. Only the rotation affects normals, scale is not corrected for.
/// param transform: The transform to fold in.
/// param flags: The components to fold in.
/// param normal: The normal.
/// return: The baked normal.
#[inline]
pub fn bake_normal(transform: &HalaTransform, flags: HalaTransformFlags, normal: Vec3) -> Vec3 {
  if flags.rotation {
    transform.rotation * normal
  } else {
    normal
  }
}

/// Fold a transform into a copy of the mesh.
/// The source mesh is left untouched, the result has recalculated bounds and tangents.
/// param transform: The transform to fold in.
/// param flags: The components to fold in.
/// param mesh: The source mesh.
/// return: The baked mesh.
pub fn bake_mesh(transform: &HalaTransform, flags: HalaTransformFlags, mesh: &HalaMesh) -> HalaMesh {
  debug_assert_eq!(mesh.positions.len(), mesh.normals.len(), "Mesh \"{}\" has mismatched vertex and normal counts.", mesh.name);

  let positions = mesh.positions.par_iter()
    .map(|position| bake_position(transform, flags, *position))
    .collect::<Vec<_>>();
  let normals = mesh.normals.par_iter()
    .map(|normal| bake_normal(transform, flags, *normal))
    .collect::<Vec<_>>();

  let mut baked = HalaMesh {
    name: mesh.name.clone(),
    positions,
    normals,
    tangents: Vec::new(),
    tex_coords: mesh.tex_coords.clone(),
    indices: mesh.indices.clone(),
    bounds: Default::default(),
  };
  baked.recalculate_bounds();
  baked.recalculate_tangents();
  baked
}
