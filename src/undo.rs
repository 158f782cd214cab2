use crate::scene::{
  HalaScene,
  HalaTransform,
};

/// Records a checkpoint right before a node and its direct children are mutated.
pub trait HalaUndoRecorder {
  /// Record a checkpoint.
  /// param scene: The scene before the mutation.
  /// param node: The node about to be mutated.
  /// param label: The label of the checkpoint.
  fn record(&mut self, scene: &HalaScene, node: u32, label: &str);
}

/// Discards all checkpoints.
#[derive(Debug, Default, Clone, Copy)]
pub struct HalaNoUndo;

impl HalaUndoRecorder for HalaNoUndo {
  fn record(&mut self, _scene: &HalaScene, _node: u32, _label: &str) {}
}

/// The state of a node and its direct children at a checkpoint.
#[derive(Debug, Clone)]
pub struct HalaUndoEntry {
  pub label: String,
  pub node: u32,
  pub transform: HalaTransform,
  pub mesh_index: Option<u32>,
  pub children: Vec<(u32, HalaTransform)>,
}

/// An in-memory journal of checkpoints, restored newest first.
/// Baked meshes stay in the scene after an undo, only the bindings are restored.
#[derive(Debug, Default)]
pub struct HalaUndoJournal {
  entries: Vec<HalaUndoEntry>,
}

/// The implementation of the undo journal.
impl HalaUndoJournal {
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[HalaUndoEntry] {
    &self.entries
  }

  /// Restore the newest checkpoint.
  /// param scene: The scene the checkpoint was recorded on.
  /// return: The label of the restored checkpoint.
  pub fn undo_last(&mut self, scene: &mut HalaScene) -> Option<String> {
    let entry = self.entries.pop()?;
    let node = &mut scene.nodes[entry.node as usize];
    node.transform = entry.transform;
    node.mesh_index = entry.mesh_index;
    for (child, transform) in entry.children {
      scene.nodes[child as usize].transform = transform;
    }
    log::debug!("Undo \"{}\" on node {}.", entry.label, entry.node);
    Some(entry.label)
  }

  /// Restore every checkpoint.
  /// param scene: The scene the checkpoints were recorded on.
  /// return: The number of restored checkpoints.
  pub fn undo_all(&mut self, scene: &mut HalaScene) -> usize {
    let mut num_of_entries = 0;
    while self.undo_last(scene).is_some() {
      num_of_entries += 1;
    }
    num_of_entries
  }
}

impl HalaUndoRecorder for HalaUndoJournal {
  fn record(&mut self, scene: &HalaScene, node: u32, label: &str) {
    let state = &scene.nodes[node as usize];
    self.entries.push(HalaUndoEntry {
      label: label.to_owned(),
      node,
      transform: state.transform,
      mesh_index: state.mesh_index,
      children: state.children.iter()
        .map(|&child| (child, scene.nodes[child as usize].transform))
        .collect(),
    });
  }
}
