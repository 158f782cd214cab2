pub use crate::error::HalaBakeError;
pub use crate::config::HalaBakeConfig;
pub use crate::scene::{
  HalaBounds,
  HalaMesh,
  HalaNode,
  HalaScene,
  HalaTransform,
};
pub use crate::bake::{
  HalaBakeContext,
  HalaTransformFlags,
};
pub use crate::persistence::{
  HalaMeshStore,
  HalaDirectoryMeshStore,
  HalaMemoryMeshStore,
};
pub use crate::undo::{
  HalaUndoRecorder,
  HalaUndoJournal,
  HalaNoUndo,
};
pub use crate::command::{
  HalaApplyMode,
  apply,
  apply_individual,
  apply_recursive,
  resolve_selection,
};
