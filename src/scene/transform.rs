use glam::{
  Mat4,
  Quat,
  Vec3,
};
use serde::{
  Deserialize,
  Serialize,
};

/// The local transform of a node, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalaTransform {
  pub translation: Vec3,
  pub rotation: Quat,
  pub scale: Vec3,
}

/// The default implementation of the transform.
impl Default for HalaTransform {
  fn default() -> Self {
    Self::IDENTITY
  }
}

/// The implementation of the transform.
impl HalaTransform {
  pub const IDENTITY: Self = Self {
    translation: Vec3::ZERO,
    rotation: Quat::IDENTITY,
    scale: Vec3::ONE,
  };

  /// Create a new transform.
  /// param translation: The translation.
  /// param rotation: The rotation.
  /// param scale: The scale.
  /// return: The transform.
  pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
    Self {
      translation,
      rotation,
      scale,
    }
  }

  pub fn from_translation(translation: Vec3) -> Self {
    Self {
      translation,
      ..Self::IDENTITY
    }
  }

  /// Compose the transform into a matrix, scale first, then rotation, then translation.
  /// return: The matrix.
  pub fn to_matrix(&self) -> Mat4 {
    Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
  }

  /// Check whether the transform is the identity within the tolerance.
  /// param max_abs_diff: The tolerance.
  /// return: True if every component is at identity.
  pub fn is_identity(&self, max_abs_diff: f32) -> bool {
    self.translation.abs_diff_eq(Vec3::ZERO, max_abs_diff)
      && self.rotation.abs_diff_eq(Quat::IDENTITY, max_abs_diff)
      && self.scale.abs_diff_eq(Vec3::ONE, max_abs_diff)
  }
}
