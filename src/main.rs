use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use hala_mesh_bake::prelude::*;

/// Apply node transforms to mesh data in a glTF scene.
#[derive(Parser, Debug)]
#[command(name = "mesh-apply-transform", version)]
struct Cli {
  /// The glTF scene.
  scene: PathBuf,

  /// Name of a selected node, may be repeated.
  #[arg(short, long = "node", value_name = "NAME")]
  nodes: Vec<String>,

  /// Apply the translation.
  #[arg(short = 't', long)]
  translation: bool,

  /// Apply the rotation.
  #[arg(short = 'r', long)]
  rotation: bool,

  /// Apply the scale.
  #[arg(short = 's', long)]
  scale: bool,

  /// Apply to the top level selected nodes and all their descendants.
  #[arg(long)]
  recursive: bool,

  /// JSON configuration file.
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Overrides the output directory of the configuration.
  #[arg(short, long)]
  output_dir: Option<PathBuf>,

  /// Keep baked meshes in memory instead of writing them.
  #[arg(long)]
  dry_run: bool,

  /// Write the resulting node transforms to this JSON file.
  #[arg(long)]
  report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  let cli = Cli::parse();

  let mut config = match &cli.config {
    Some(path) => HalaBakeConfig::load(path)?,
    None => HalaBakeConfig::default(),
  };
  if let Some(output_dir) = &cli.output_dir {
    config.output_dir = output_dir.clone();
  }

  let mut scene = HalaScene::new(&cli.scene)
    .with_context(|| format!("Failed to load scene {:?}", cli.scene))?;
  let selection = resolve_selection(&scene, cli.nodes.as_slice())?;
  let flags = HalaTransformFlags::new(cli.translation, cli.rotation, cli.scale);
  if flags.is_empty() {
    log::warn!("No transform component selected, nothing will change.");
  }
  let mode = if cli.recursive { HalaApplyMode::Recursive } else { HalaApplyMode::Individual };

  let mut undo = HalaNoUndo;
  let num_of_nodes = if cli.dry_run {
    let mut store = HalaMemoryMeshStore::new(&config.baked_prefix);
    let mut context = HalaBakeContext::new(&mut store, &mut undo, &config.undo_label);
    let num_of_nodes = apply(&mut scene, mode, &selection, flags, &mut context)?;
    log::info!("Dry run baked {} meshes.", store.num_of_saves);
    num_of_nodes
  } else {
    let mut store = HalaDirectoryMeshStore::from_config(&config);
    let mut context = HalaBakeContext::new(&mut store, &mut undo, &config.undo_label);
    apply(&mut scene, mode, &selection, flags, &mut context)?
  };
  log::info!("Applied transform on {} nodes.", num_of_nodes);

  if let Some(report) = &cli.report {
    let file = std::fs::File::create(report)
      .with_context(|| format!("Failed to create report {:?}", report))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &scene.nodes)?;
    writer.flush()?;
    log::info!("Report written to {:?}.", report);
  }

  Ok(())
}
