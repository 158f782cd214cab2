pub mod prelude;
pub mod error;
pub mod config;
pub mod scene;
pub mod bake;
pub mod persistence;
pub mod undo;
pub mod command;
