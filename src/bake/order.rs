use crate::scene::HalaScene;

/// Order a selection so that every node comes after all of its selected ancestors.
/// Each pass walks the selection in order and takes every pending node whose selected
/// ancestors are already taken, so unrelated nodes keep their selection order.
/// Duplicate entries are taken once.
/// param scene: The scene.
/// param selection: The selected node indices.
/// return: The node indices in processing order.
pub fn order_for_individual_apply(scene: &HalaScene, selection: &[u32]) -> Vec<u32> {
  let (ordered, num_of_passes) = order_in_passes(scene, selection);
  log::debug!("Ordered {} selected nodes in {} passes.", ordered.len(), num_of_passes);
  ordered
}

/// Order a selection and count the passes it took.
fn order_in_passes(scene: &HalaScene, selection: &[u32]) -> (Vec<u32>, usize) {
  let mut unique: Vec<u32> = Vec::with_capacity(selection.len());
  for &node in selection.iter() {
    if !unique.contains(&node) {
      unique.push(node);
    }
  }

  let mut applied = vec![false; unique.len()];
  let mut ordered = Vec::with_capacity(unique.len());
  let mut num_of_passes = 0;
  while ordered.len() != unique.len() {
    num_of_passes += 1;
    for i in 0..unique.len() {
      if applied[i] {
        continue;
      }

      // Wait for any selected ancestor that is still pending.
      let blocked = (0..unique.len())
        .any(|j| j != i && !applied[j] && scene.is_ancestor_of(unique[j], unique[i]));
      if !blocked {
        applied[i] = true;
        ordered.push(unique[i]);
      }
    }
  }

  (ordered, num_of_passes)
}

#[cfg(test)]
mod tests {
  use crate::scene::HalaTransform;
  use super::*;

  /// root -> mid -> leaf, plus an unrelated node.
  fn scene() -> (HalaScene, [u32; 4]) {
    let mut scene = HalaScene::default();
    let root = scene.add_node("Root", None, HalaTransform::IDENTITY, None).unwrap();
    let mid = scene.add_node("Mid", Some(root), HalaTransform::IDENTITY, None).unwrap();
    let leaf = scene.add_node("Leaf", Some(mid), HalaTransform::IDENTITY, None).unwrap();
    let other = scene.add_node("Other", None, HalaTransform::IDENTITY, None).unwrap();
    (scene, [root, mid, leaf, other])
  }

  fn position(order: &[u32], node: u32) -> usize {
    order.iter().position(|&n| n == node).unwrap()
  }

  #[test]
  fn ancestors_come_first() {
    let (scene, [root, mid, leaf, other]) = scene();
    let order = order_for_individual_apply(&scene, &[leaf, other, mid, root]);
    assert_eq!(order.len(), 4);
    assert!(position(&order, root) < position(&order, mid));
    assert!(position(&order, mid) < position(&order, leaf));
    assert_eq!(order, vec![other, root, mid, leaf]);
  }

  #[test]
  fn unrelated_nodes_keep_selection_order() {
    let (scene, [_, mid, _, other]) = scene();
    assert_eq!(order_for_individual_apply(&scene, &[other, mid]), vec![other, mid]);
    assert_eq!(order_for_individual_apply(&scene, &[mid, other]), vec![mid, other]);
  }

  #[test]
  fn skipped_generation_still_orders() {
    let (scene, [root, _, leaf, _]) = scene();
    assert_eq!(order_for_individual_apply(&scene, &[leaf, root]), vec![root, leaf]);
  }

  #[test]
  fn unrelated_selection_takes_one_pass() {
    let (scene, [root, _, _, other]) = scene();
    assert_eq!(order_in_passes(&scene, &[other, root]), (vec![other, root], 1));
  }

  #[test]
  fn ancestors_taken_earlier_in_a_pass_do_not_block() {
    let (scene, [root, mid, leaf, _]) = scene();
    assert_eq!(order_in_passes(&scene, &[root, mid, leaf]), (vec![root, mid, leaf], 1));
    assert_eq!(order_in_passes(&scene, &[leaf, mid, root]), (vec![root, mid, leaf], 3));
  }

  #[test]
  fn duplicates_are_taken_once() {
    let (scene, [root, mid, _, _]) = scene();
    assert_eq!(order_for_individual_apply(&scene, &[mid, root, mid]), vec![root, mid]);
  }

  #[test]
  fn empty_selection_is_empty() {
    let (scene, _) = scene();
    assert!(order_for_individual_apply(&scene, &[]).is_empty());
  }
}
