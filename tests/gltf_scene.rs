use std::path::PathBuf;

use glam::{vec3, Vec3};

use hala_mesh_bake::prelude::*;

fn data(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

fn fixture() -> PathBuf {
  data("triangle.gltf")
}

#[test]
fn load_hierarchy_and_meshes() {
  let scene = HalaScene::new(fixture()).unwrap();
  assert_eq!(scene.nodes.len(), 3);
  assert_eq!(scene.meshes.len(), 1);

  let root = scene.find_node("Root").unwrap();
  let child = scene.find_node("Child").unwrap();
  let other = scene.find_node("Other").unwrap();
  assert_eq!(scene.nodes[root as usize].children, vec![child]);
  assert_eq!(scene.nodes[child as usize].parent, Some(root));
  assert_eq!(scene.nodes[other as usize].parent, None);
  assert_eq!(scene.nodes[root as usize].mesh_index, Some(0));
  assert_eq!(scene.nodes[other as usize].mesh_index, Some(0));
  assert_eq!(scene.nodes[root as usize].transform.scale, vec3(2.0, 1.0, 1.0));

  let mesh = &scene.meshes[0];
  assert_eq!(mesh.name, "Triangle");
  assert_eq!(mesh.positions, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
  assert_eq!(mesh.normals, vec![Vec3::Z; 3]);
  assert_eq!(mesh.indices, vec![0, 1, 2]);
  assert!(mesh.tex_coords.is_empty());
  assert_eq!(mesh.tangents.len(), 3);
}

#[test]
fn mesh_without_normals_is_skipped() {
  let mut scene = HalaScene::new(data("missing_normals.gltf")).unwrap();
  assert_eq!(scene.meshes.len(), 1);
  assert_eq!(scene.meshes[0].name, "Triangle");

  let bare = scene.find_node("Bare").unwrap();
  let solid = scene.find_node("Solid").unwrap();
  assert_eq!(scene.nodes[bare as usize].mesh_index, None);
  assert_eq!(scene.nodes[solid as usize].mesh_index, Some(0));

  let mut store = HalaMemoryMeshStore::new("BakedMesh");
  let mut undo = HalaNoUndo;
  let mut context = HalaBakeContext::new(&mut store, &mut undo, "Apply Transform");
  let count = apply_individual(&mut scene, &[bare, solid], HalaTransformFlags::ALL, &mut context).unwrap();
  assert_eq!(count, 2);
  assert_eq!(store.meshes.len(), 1);
  let baked = &scene.meshes[scene.nodes[solid as usize].mesh_index.unwrap() as usize];
  assert_eq!(baked.positions, vec![vec3(0.0, 0.0, 1.0), vec3(1.0, 0.0, 1.0), vec3(0.0, 1.0, 1.0)]);
}

#[test]
fn unsupported_extension_is_rejected() {
  assert!(HalaScene::new("scene.obj").is_err());
  assert!(HalaScene::new("scene").is_err());
}

#[test]
fn bake_loaded_scene_to_directory() {
  let mut scene = HalaScene::new(fixture()).unwrap();
  let selection = resolve_selection(&scene, &["Root"]).unwrap();
  let output_dir = std::env::temp_dir().join(format!("hala-mesh-bake-gltf-{}", std::process::id()));
  let _ = std::fs::remove_dir_all(&output_dir);

  let mut store = HalaDirectoryMeshStore::new(&output_dir, "BakedMesh");
  let mut undo = HalaNoUndo;
  let mut context = HalaBakeContext::new(&mut store, &mut undo, "Apply Transform");
  let count = apply(
    &mut scene,
    HalaApplyMode::Individual,
    &selection,
    HalaTransformFlags::new(true, false, true),
    &mut context,
  ).unwrap();
  assert_eq!(count, 1);

  let root = scene.find_node("Root").unwrap();
  let other = scene.find_node("Other").unwrap();
  let child = scene.find_node("Child").unwrap();
  let baked_index = scene.nodes[root as usize].mesh_index.unwrap();
  assert_ne!(baked_index, 0);
  assert_eq!(scene.nodes[other as usize].mesh_index, Some(0));
  assert!(scene.nodes[child as usize].transform.translation.abs_diff_eq(vec3(1.0, 1.0, 0.0), 1e-6));

  let baked = &scene.meshes[baked_index as usize];
  assert!(baked.name.starts_with("BakedMesh_Root_Triangle_"));
  assert_eq!(store.load(&baked.name).unwrap(), *baked);
  assert_eq!(baked.positions, vec![vec3(1.0, 0.0, 0.0), vec3(3.0, 0.0, 0.0), vec3(1.0, 1.0, 0.0)]);

  std::fs::remove_dir_all(&output_dir).unwrap();
}
