use glam::Vec3;
use serde::{
  Deserialize,
  Serialize,
};

/// Axis-aligned bounding box (AABB) representation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HalaBounds {
  pub center: Vec3,
  pub extents: Vec3,
}

/// Implementation of HalaBounds.
impl HalaBounds {

  /// Create a new HalaBounds instance.
  /// param center: The center of the AABB.
  /// param extents: The extents of the AABB.
  /// return: The new HalaBounds instance.
  pub fn new(center: Vec3, extents: Vec3) -> Self {
    Self { center, extents }
  }

  /// Create the smallest AABB enclosing all points.
  /// An empty point set gives a zero sized AABB at the origin.
  /// param points: The points to enclose.
  /// return: The new HalaBounds instance.
  pub fn from_points(points: &[Vec3]) -> Self {
    let Some((first, rest)) = points.split_first() else {
      return Self::default();
    };
    let mut bounds = Self::new(*first, Vec3::ZERO);
    for point in rest {
      bounds.encapsulate_point(*point);
    }
    bounds
  }

  /// Get the size of the AABB.
  /// return: The size of the AABB.
  pub fn get_size(&self) -> Vec3 {
    self.extents * 2.0
  }

  /// Get the minimum bounds of the AABB.
  /// return: The minimum bounds of the AABB.
  pub fn get_min(&self) -> Vec3 {
    self.center - self.extents
  }

  /// Get the maximum bounds of the AABB.
  /// return: The maximum bounds of the AABB.
  pub fn get_max(&self) -> Vec3 {
    self.center + self.extents
  }

  /// Set the minimum and maximum bounds of the AABB.
  /// param min: The minimum bounds of the AABB.
  /// param max: The maximum bounds of the AABB.
  pub fn set_min_max(&mut self, min: Vec3, max: Vec3) {
    self.extents = (max - min) * 0.5;
    self.center = min + self.extents;
  }

  /// Grows the AABB to include the given point.
  /// param point: The point to include.
  pub fn encapsulate_point(&mut self, point: Vec3) {
    let min = self.get_min().min(point);
    let max = self.get_max().max(point);
    self.set_min_max(min, max);
  }

}
