use glam::{
  Quat,
  Vec3,
};

use crate::scene::HalaTransform;
use super::HalaTransformFlags;

/// Compute the local transform a child needs so that its world pose survives resetting the
/// flagged components of its parent.
/// The flagged part of the parent is applied to the child in the same order as vertices are
/// baked: scale, then rotation, then translation.
/// param parent: The parent transform before the reset.
/// param flags: The components being reset.
/// param child: The current local transform of the child.
/// return: The compensated local transform of the child.
pub fn compensate_child(parent: &HalaTransform, flags: HalaTransformFlags, child: &HalaTransform) -> HalaTransform {
  let mut compensated = *child;

  if flags.scale {
    compensated.translation *= parent.scale;
    compensated.scale *= parent.scale;
  }

  if flags.rotation {
    compensated.translation = parent.rotation * compensated.translation;
    compensated.rotation = (parent.rotation * compensated.rotation).normalize();
  }

  if flags.translation {
    compensated.translation += parent.translation;
  }

  compensated
}

/// Reset the flagged components to identity, leaving the others untouched.
/// param transform: The transform.
/// param flags: The components to reset.
/// return: The reset transform.
pub fn reset_transform(transform: &HalaTransform, flags: HalaTransformFlags) -> HalaTransform {
  let mut reset = *transform;
  if flags.translation {
    reset.translation = Vec3::ZERO;
  }
  if flags.rotation {
    reset.rotation = Quat::IDENTITY;
  }
  if flags.scale {
    reset.scale = Vec3::ONE;
  }
  reset
}
