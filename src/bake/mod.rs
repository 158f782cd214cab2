pub mod mesh_baker;
pub mod compensator;
pub mod node_baker;
pub mod order;
pub mod walker;

use crate::persistence::HalaMeshStore;
use crate::undo::HalaUndoRecorder;

pub use mesh_baker::bake_mesh;
pub use compensator::{
  compensate_child,
  reset_transform,
};
pub use node_baker::bake_node;
pub use order::order_for_individual_apply;
pub use walker::bake_recursive;

/// Which components of a local transform are folded into the mesh and reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HalaTransformFlags {
  pub translation: bool,
  pub rotation: bool,
  pub scale: bool,
}

/// The implementation of the transform flags.
impl HalaTransformFlags {
  pub const NONE: Self = Self { translation: false, rotation: false, scale: false };
  pub const ALL: Self = Self { translation: true, rotation: true, scale: true };

  pub fn new(translation: bool, rotation: bool, scale: bool) -> Self {
    Self {
      translation,
      rotation,
      scale,
    }
  }

  /// Check if no component is selected.
  /// return: True if applying these flags is a no-op.
  pub fn is_empty(&self) -> bool {
    !(self.translation || self.rotation || self.scale)
  }
}

/// The collaborators a bake reports to.
pub struct HalaBakeContext<'a> {
  /// Receives every newly baked mesh.
  pub store: &'a mut dyn HalaMeshStore,
  /// Checkpoints a node right before it is mutated.
  pub undo: &'a mut dyn HalaUndoRecorder,
  pub undo_label: &'a str,
}

/// The implementation of the bake context.
impl<'a> HalaBakeContext<'a> {
  /// Create a new bake context.
  /// param store: The baked mesh store.
  /// param undo: The undo recorder.
  /// param undo_label: The label of the undo checkpoints.
  /// return: The bake context.
  pub fn new(store: &'a mut dyn HalaMeshStore, undo: &'a mut dyn HalaUndoRecorder, undo_label: &'a str) -> Self {
    Self {
      store,
      undo,
      undo_label,
    }
  }
}
