use std::path::{
  Path,
  PathBuf,
};

use serde::{
  Deserialize,
  Serialize,
};

use crate::error::HalaBakeError;

fn default_output_dir() -> PathBuf {
  PathBuf::from("Baked Meshes")
}

fn default_baked_prefix() -> String {
  String::from("BakedMesh")
}

fn default_undo_label() -> String {
  String::from("Apply Transform")
}

/// The bake configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalaBakeConfig {
  /// Where baked meshes are written.
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,
  /// Meshes whose name starts with this prefix are replaced in place when baked again.
  #[serde(default = "default_baked_prefix")]
  pub baked_prefix: String,
  #[serde(default = "default_undo_label")]
  pub undo_label: String,
  #[serde(default)]
  pub pretty_json: bool,
}

impl Default for HalaBakeConfig {
  fn default() -> Self {
    Self {
      output_dir: default_output_dir(),
      baked_prefix: default_baked_prefix(),
      undo_label: default_undo_label(),
      pretty_json: false,
    }
  }
}

/// The implementation of the bake configuration.
impl HalaBakeConfig {
  /// Load the configuration from a JSON file. Missing fields take their defaults.
  /// param path: The path to the JSON file.
  /// return: The configuration.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HalaBakeError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
      .map_err(|err| HalaBakeError::new(&format!("Open config file \"{:?}\" failed.", path), Some(Box::new(err))))?;
    let config = serde_json::from_reader(std::io::BufReader::new(file))
      .map_err(|err| HalaBakeError::new(&format!("Parse config file \"{:?}\" failed.", path), Some(Box::new(err))))?;
    log::debug!("Bake config loaded from \"{:?}\".", path);
    Ok(config)
  }
}
