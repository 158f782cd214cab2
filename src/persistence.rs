use std::collections::BTreeMap;
use std::hash::Hasher;
use std::io::{
  BufWriter,
  Write,
};
use std::path::{
  Path,
  PathBuf,
};

use crate::config::HalaBakeConfig;
use crate::error::HalaBakeError;
use crate::scene::HalaMesh;

/// The store that receives every newly baked mesh.
pub trait HalaMeshStore {
  /// Get the name a baked mesh is stored under.
  /// param node_name: The name of the baked node.
  /// param original_mesh_name: The name of the mesh before baking.
  /// param mesh: The baked mesh.
  /// return: The name.
  fn baked_name(&self, node_name: &str, original_mesh_name: &str, mesh: &HalaMesh) -> String;

  /// Store the baked mesh under its name, replacing any previous mesh with that name.
  /// param mesh: The baked mesh.
  fn save(&mut self, mesh: &HalaMesh) -> Result<(), HalaBakeError>;
}

/// 64 bit FNV-1a. The output only depends on the bytes written, so names derived from it
/// are the same across toolchains and platforms.
pub struct HalaContentHasher(u64);

impl HalaContentHasher {
  const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
  const PRIME: u64 = 0x0000_0100_0000_01b3;
}

impl Default for HalaContentHasher {
  fn default() -> Self {
    Self(Self::OFFSET_BASIS)
  }
}

impl Hasher for HalaContentHasher {
  fn finish(&self) -> u64 {
    self.0
  }

  fn write(&mut self, bytes: &[u8]) {
    for &byte in bytes {
      self.0 ^= byte as u64;
      self.0 = self.0.wrapping_mul(Self::PRIME);
    }
  }
}

/// Hash the baked geometry.
/// param mesh: The mesh.
/// return: The hash.
pub fn content_hash(mesh: &HalaMesh) -> u64 {
  let mut hasher = HalaContentHasher::default();
  hasher.write(&(mesh.positions.len() as u64).to_le_bytes());
  for v in mesh.positions.iter().chain(mesh.normals.iter()) {
    for c in v.to_array() {
      hasher.write(&c.to_bits().to_le_bytes());
    }
  }
  hasher.finish()
}

/// Derive the name of a baked mesh.
/// A mesh already carrying the prefix keeps its name so a re-bake replaces it, otherwise the
/// name is built from the prefix, the node, the original mesh and the content hash.
/// The result never contains path separators.
/// param prefix: The baked mesh prefix.
/// param node_name: The name of the baked node.
/// param original_mesh_name: The name of the mesh before baking.
/// param mesh: The baked mesh.
/// return: The name.
pub fn baked_mesh_name(prefix: &str, node_name: &str, original_mesh_name: &str, mesh: &HalaMesh) -> String {
  if original_mesh_name.starts_with(prefix) {
    return sanitize(original_mesh_name);
  }
  format!(
    "{}_{}_{}_{:016x}",
    prefix,
    sanitize(node_name),
    sanitize(original_mesh_name),
    content_hash(mesh),
  )
}

/// Replace the characters that are not safe in a file name.
/// Dots are kept except in leading position, so no name resolves to "." or "..".
fn sanitize(name: &str) -> String {
  name.chars()
    .enumerate()
    .map(|(i, c)| match c {
      '.' if i > 0 => c,
      '-' => c,
      c if c.is_ascii_alphanumeric() => c,
      _ => '_',
    })
    .collect()
}

/// Stores baked meshes as JSON files in a directory.
pub struct HalaDirectoryMeshStore {
  pub output_dir: PathBuf,
  pub prefix: String,
  pub pretty: bool,
}

/// The implementation of the directory mesh store.
impl HalaDirectoryMeshStore {

  /// Create a new directory mesh store. The directory is created on first save.
  /// param output_dir: The output directory.
  /// param prefix: The baked mesh prefix.
  /// return: The store.
  pub fn new<P: AsRef<Path>>(output_dir: P, prefix: &str) -> Self {
    Self {
      output_dir: output_dir.as_ref().to_path_buf(),
      prefix: prefix.to_owned(),
      pretty: false,
    }
  }

  /// Create a new directory mesh store from the configuration.
  /// param config: The configuration.
  /// return: The store.
  pub fn from_config(config: &HalaBakeConfig) -> Self {
    Self {
      output_dir: config.output_dir.clone(),
      prefix: config.baked_prefix.clone(),
      pretty: config.pretty_json,
    }
  }

  /// Get the file path of a baked mesh.
  /// param name: The name of the mesh.
  /// return: The file path.
  pub fn path_of(&self, name: &str) -> PathBuf {
    self.output_dir.join(format!("{}.json", name))
  }

  /// Load a stored mesh.
  /// param name: The name of the mesh.
  /// return: The mesh.
  pub fn load(&self, name: &str) -> Result<HalaMesh, HalaBakeError> {
    let path = self.path_of(name);
    let file = std::fs::File::open(&path)
      .map_err(|err| HalaBakeError::new(&format!("Open baked mesh \"{:?}\" failed.", path), Some(Box::new(err))))?;
    let mesh = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(mesh)
  }
}

impl HalaMeshStore for HalaDirectoryMeshStore {
  fn baked_name(&self, node_name: &str, original_mesh_name: &str, mesh: &HalaMesh) -> String {
    baked_mesh_name(&self.prefix, node_name, original_mesh_name, mesh)
  }

  fn save(&mut self, mesh: &HalaMesh) -> Result<(), HalaBakeError> {
    if !self.output_dir.is_dir() {
      log::debug!("Creating baked mesh directory \"{:?}\".", self.output_dir);
      std::fs::create_dir_all(&self.output_dir)?;
    }

    let path = self.path_of(&mesh.name);
    if path.exists() {
      log::info!("Replacing existing baked mesh \"{}\".", mesh.name);
    }
    let mut writer = BufWriter::new(std::fs::File::create(&path)?);
    if self.pretty {
      serde_json::to_writer_pretty(&mut writer, mesh)?;
    } else {
      serde_json::to_writer(&mut writer, mesh)?;
    }
    writer.flush()?;
    log::debug!("Baked mesh saved to \"{:?}\".", path);
    Ok(())
  }
}

/// Keeps baked meshes in memory, for dry runs.
#[derive(Debug, Default)]
pub struct HalaMemoryMeshStore {
  pub prefix: String,
  pub meshes: BTreeMap<String, HalaMesh>,
  pub num_of_saves: usize,
}

impl HalaMemoryMeshStore {
  pub fn new(prefix: &str) -> Self {
    Self {
      prefix: prefix.to_owned(),
      ..Default::default()
    }
  }
}

impl HalaMeshStore for HalaMemoryMeshStore {
  fn baked_name(&self, node_name: &str, original_mesh_name: &str, mesh: &HalaMesh) -> String {
    baked_mesh_name(&self.prefix, node_name, original_mesh_name, mesh)
  }

  fn save(&mut self, mesh: &HalaMesh) -> Result<(), HalaBakeError> {
    self.num_of_saves += 1;
    self.meshes.insert(mesh.name.clone(), mesh.clone());
    Ok(())
  }
}
